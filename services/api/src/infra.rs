use estate_valuation::error::AppError;
use estate_valuation::listings::ListingImporter;
use estate_valuation::valuation::{
    ListingPool, PoolError, PropertyCondition, PropertyRecord, ValuationRequest,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Listings bundled for the demo and for servers started without an export.
pub(crate) const SAMPLE_LISTINGS_CSV: &str = include_str!("../data/sample_listings.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listing pool held in memory for the life of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingPool {
    records: Arc<Vec<PropertyRecord>>,
}

impl InMemoryListingPool {
    pub(crate) fn new(records: Vec<PropertyRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        Ok(Self::new(ListingImporter::from_path(path)?))
    }

    pub(crate) fn sample() -> Result<Self, AppError> {
        let records = ListingImporter::from_reader(SAMPLE_LISTINGS_CSV.as_bytes())?;
        Ok(Self::new(records))
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

impl ListingPool for InMemoryListingPool {
    fn candidates(&self, _request: &ValuationRequest) -> Result<Vec<PropertyRecord>, PoolError> {
        Ok(self.records.as_ref().clone())
    }
}

pub(crate) fn parse_condition(raw: &str) -> Result<PropertyCondition, String> {
    raw.parse::<PropertyCondition>()
        .map_err(|err| err.to_string())
}

pub(crate) fn format_dollars(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_listings_import() {
        let pool = InMemoryListingPool::sample().expect("sample listings import");
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn dollars_are_grouped_by_thousands() {
        assert_eq!(format_dollars(5_675_000), "$5,675,000");
        assert_eq!(format_dollars(950), "$950");
        assert_eq!(format_dollars(-75_000), "-$75,000");
    }

    #[test]
    fn condition_parser_reports_allowed_values() {
        assert_eq!(parse_condition("FAIR"), Ok(PropertyCondition::Fair));
        let err = parse_condition("mint").expect_err("unknown condition rejected");
        assert!(err.contains("excellent, good, fair, poor"));
    }
}
