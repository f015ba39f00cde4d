use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{MarketConditions, MarketValuation, ValuationError, ValuationRequest};
use super::engine::ValuationEngine;
use super::repository::{ListingPool, PoolError};

/// Service composing the listing pool with the valuation engine.
pub struct ValuationService<P> {
    pool: Arc<P>,
    engine: Arc<ValuationEngine>,
}

impl<P> ValuationService<P>
where
    P: ListingPool + 'static,
{
    pub fn new(pool: Arc<P>, engine: ValuationEngine) -> Self {
        Self {
            pool,
            engine: Arc::new(engine),
        }
    }

    /// Value a home against the current listing pool.
    pub fn estimate(
        &self,
        request: &ValuationRequest,
    ) -> Result<MarketValuation, ValuationServiceError> {
        request.validate()?;

        let pool = self.pool.candidates(request)?;
        debug!(city = %request.city, candidates = pool.len(), "listing pool loaded");

        let valuation = self.engine.calculate_market_value(request, &pool)?;
        info!(
            city = %request.city,
            estimated_value = valuation.estimated_value,
            comparables = valuation.market_analysis.comparables_considered,
            confidence = valuation.confidence_score,
            "home valuation computed"
        );

        Ok(valuation)
    }

    pub fn market_conditions(&self, city: &str) -> &MarketConditions {
        self.engine.market_conditions(city)
    }
}

/// Error raised by the valuation service.
#[derive(Debug, thiserror::Error)]
pub enum ValuationServiceError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}
