use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryListingPool};
use crate::routes::with_valuation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_valuation::config::AppConfig;
use estate_valuation::error::AppError;
use estate_valuation::telemetry;
use estate_valuation::valuation::{ValuationEngine, ValuationService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let tables = config.valuation.load_tables()?;
    let pool = match &config.valuation.listings_csv {
        Some(path) => InMemoryListingPool::from_path(path)?,
        None => {
            warn!("APP_LISTINGS_CSV not set; serving the bundled sample listings");
            InMemoryListingPool::sample()?
        }
    };
    info!(listings = pool.len(), "listing pool loaded");

    let valuation_service = Arc::new(ValuationService::new(
        Arc::new(pool),
        ValuationEngine::new(tables),
    ));

    let app = with_valuation_routes(valuation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "home valuation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
