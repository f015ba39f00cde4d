use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ValuationError, ValuationRequest};
use super::repository::ListingPool;
use super::service::{ValuationService, ValuationServiceError};

/// Router builder exposing the valuation endpoints.
pub fn valuation_router<P>(service: Arc<ValuationService<P>>) -> Router
where
    P: ListingPool + 'static,
{
    Router::new()
        .route("/api/v1/home-valuation", post(valuation_handler::<P>))
        .route(
            "/api/v1/market-conditions/:city",
            get(market_conditions_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn valuation_handler<P>(
    State(service): State<Arc<ValuationService<P>>>,
    axum::Json(request): axum::Json<ValuationRequest>,
) -> Response
where
    P: ListingPool + 'static,
{
    match service.estimate(&request) {
        Ok(valuation) => (StatusCode::OK, axum::Json(valuation)).into_response(),
        Err(ValuationServiceError::Valuation(ValuationError::InvalidInput { field, reason })) => {
            let payload = json!({
                "error": "invalid valuation request",
                "field": field,
                "reason": reason,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ValuationServiceError::Pool(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn market_conditions_handler<P>(
    State(service): State<Arc<ValuationService<P>>>,
    Path(city): Path<String>,
) -> Response
where
    P: ListingPool + 'static,
{
    let conditions = service.market_conditions(&city).clone();
    (StatusCode::OK, axum::Json(conditions)).into_response()
}
