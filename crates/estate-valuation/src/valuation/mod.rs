//! Comparable-driven market valuation for residential listings.
//!
//! The engine is pure: callers hand it a request and an already materialized
//! listing pool. [`ValuationService`] wires the engine to a [`ListingPool`]
//! and [`valuation_router`] exposes it over HTTP.

pub mod adjustments;
pub mod comparables;
pub mod domain;
pub mod engine;
pub mod market;
pub mod repository;
pub mod router;
pub mod service;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use adjustments::{compute_adjustments, AdjustmentSummary};
pub use comparables::{find_comparables, MAX_COMPARABLES, SIMILARITY_FLOOR};
pub use domain::{
    AdjustmentLine, Comparable, DistanceBand, MarketAnalysis, MarketConditions, MarketValuation,
    PropertyCondition, PropertyRecord, ValuationBasis, ValuationError, ValuationRequest,
    ValuePredictions, ValueRange,
};
pub use engine::{ValuationEngine, DISPLAYED_COMPARABLES};
pub use market::{CityBaselineTable, MarketConditionsTable, ValuationTables};
pub use repository::{ListingPool, PoolError};
pub use router::valuation_router;
pub use service::{ValuationService, ValuationServiceError};
