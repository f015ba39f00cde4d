use super::domain::{PropertyRecord, ValuationRequest};

/// Source of candidate listings so the service can be exercised in isolation.
pub trait ListingPool: Send + Sync {
    /// Candidate comparables for `request`, already narrowed by the caller's
    /// query layer if it has one.
    fn candidates(&self, request: &ValuationRequest) -> Result<Vec<PropertyRecord>, PoolError>;
}

/// Error enumeration for listing pool failures.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("listing pool unavailable: {0}")]
    Unavailable(String),
}
