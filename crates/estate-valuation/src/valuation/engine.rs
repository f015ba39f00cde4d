use super::adjustments::compute_adjustments;
use super::comparables::find_comparables;
use super::domain::{
    Comparable, MarketAnalysis, MarketConditions, MarketValuation, PropertyRecord, ValuationBasis,
    ValuationRequest, ValuePredictions, ValueRange,
};
use super::market::ValuationTables;
use super::ValuationError;

/// Comparables returned to callers for display.
pub const DISPLAYED_COMPARABLES: usize = 6;

const RANGE_SPREAD: f64 = 0.10;
const BASE_CONFIDENCE: f64 = 0.5;
const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.95;
// 2^63; every f64 below it converts to i64 without saturating.
const I64_CEILING: f64 = i64::MAX as f64;

/// Stateless valuation engine over injected lookup tables.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    tables: ValuationTables,
}

impl ValuationEngine {
    pub fn new(tables: ValuationTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ValuationTables {
        &self.tables
    }

    pub fn market_conditions(&self, city: &str) -> &MarketConditions {
        self.tables.market.lookup(city)
    }

    pub fn calculate_market_value(
        &self,
        request: &ValuationRequest,
        pool: &[PropertyRecord],
    ) -> Result<MarketValuation, ValuationError> {
        request.validate()?;

        let comparables = find_comparables(request, pool);
        let (base_value, valuation_basis) = match weighted_price_per_sqft(&comparables) {
            Some(price_per_sqft) => (
                request.square_feet * price_per_sqft,
                ValuationBasis::Comparables,
            ),
            None => (
                request.square_feet * self.tables.baselines.price_per_sqft(&request.city),
                ValuationBasis::CityBaseline,
            ),
        };

        let adjustments = compute_adjustments(request)?;
        let estimate = base_value + adjustments.total;
        let conditions = self.tables.market.lookup(&request.city).clone();
        ensure_representable(estimate, &conditions)?;
        let estimated_value = estimate.round() as i64;

        let value_range = ValueRange {
            low: scale(estimated_value, 1.0 - RANGE_SPREAD),
            high: scale(estimated_value, 1.0 + RANGE_SPREAD),
        };
        let predictions = project(estimated_value, conditions.annual_rate());
        let confidence_score = confidence(&comparables);
        let comparables_considered = comparables.len();

        let market_analysis = MarketAnalysis {
            city: request.city.trim().to_string(),
            suggested_list_price: scale(estimated_value, conditions.list_price_multiplier),
            conditions,
            valuation_basis,
            base_value,
            comparables_considered,
            adjustments: adjustments.lines,
            total_adjustments: adjustments.total,
        };

        let mut comparables = comparables;
        comparables.truncate(DISPLAYED_COMPARABLES);

        Ok(MarketValuation {
            estimated_value,
            value_range,
            price_per_sqft: estimated_value as f64 / request.square_feet,
            confidence_score,
            comparables,
            market_analysis,
            predictions,
        })
    }
}

/// Rejects estimates that are not a positive whole-dollar amount, or whose
/// range, list price or five-year projection would overflow `i64`.
fn ensure_representable(
    estimate: f64,
    conditions: &MarketConditions,
) -> Result<(), ValuationError> {
    let headroom = (1.0 + RANGE_SPREAD)
        .max((1.0 + conditions.annual_rate()).powi(5))
        .max(conditions.list_price_multiplier);
    let peak = estimate * headroom;

    if !peak.is_finite() || peak >= I64_CEILING {
        return Err(ValuationError::invalid(
            "square_feet",
            "produces a value outside the representable range",
        ));
    }
    if estimate.round() <= 0.0 {
        return Err(ValuationError::invalid(
            "condition",
            "adjustments leave no positive market value",
        ));
    }
    Ok(())
}

/// Similarity and proximity weighted mean of comparable price per sqft.
fn weighted_price_per_sqft(comparables: &[Comparable]) -> Option<f64> {
    let (weighted_sum, total_weight) =
        comparables
            .iter()
            .fold((0.0, 0.0), |(sum, weights), comparable| {
                let weight =
                    comparable.similarity / (f64::from(comparable.distance_band.rank()) + 1.0);
                (sum + weight * comparable.price_per_sqft, weights + weight)
            });

    (total_weight > 0.0).then(|| weighted_sum / total_weight)
}

fn confidence(comparables: &[Comparable]) -> f64 {
    if comparables.is_empty() {
        return BASE_CONFIDENCE;
    }

    let count = comparables.len() as f64;
    let avg_similarity = comparables.iter().map(|c| c.similarity).sum::<f64>() / count;
    let avg_band = comparables
        .iter()
        .map(|c| f64::from(c.distance_band.rank()))
        .sum::<f64>()
        / count;

    let score = BASE_CONFIDENCE
        + (count / 10.0).min(1.0) * 0.2
        + avg_similarity * 0.2
        + ((5.0 - avg_band) / 5.0).max(0.0) * 0.1;

    score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn project(value: i64, annual_rate: f64) -> ValuePredictions {
    let growth = 1.0 + annual_rate;
    let grown = |factor: f64| (value as f64 * factor).round() as i64;

    ValuePredictions {
        six_months: grown(growth.sqrt()),
        one_year: grown(growth),
        three_years: grown(growth.powi(3)),
        five_years: grown(growth.powi(5)),
    }
}

fn scale(value: i64, factor: f64) -> i64 {
    (value as f64 * factor).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::domain::DistanceBand;

    fn comparable(similarity: f64, band: DistanceBand, price_per_sqft: f64) -> Comparable {
        Comparable {
            source_id: "mls-1".to_string(),
            address: "1 Test Way".to_string(),
            price: price_per_sqft * 2000.0,
            square_feet: 2000.0,
            price_per_sqft,
            distance_band: band,
            similarity,
            bedrooms: 3,
            bathrooms: 2.0,
        }
    }

    #[test]
    fn weighted_average_favours_closer_comparables() {
        let comps = [
            comparable(1.0, DistanceBand::SameCity, 1000.0),
            comparable(1.0, DistanceBand::Other, 2000.0),
        ];
        // weights 1/2 and 1/4
        let expected = (0.5 * 1000.0 + 0.25 * 2000.0) / 0.75;
        let actual = weighted_price_per_sqft(&comps).expect("weights present");
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn no_comparables_means_no_weighted_price() {
        assert!(weighted_price_per_sqft(&[]).is_none());
    }

    #[test]
    fn confidence_rewards_many_close_matches() {
        let comps: Vec<_> = (0..8)
            .map(|_| comparable(1.0, DistanceBand::SameCity, 1200.0))
            .collect();
        // 0.5 + 0.16 + 0.2 + 0.08 = 0.94
        assert!((confidence(&comps) - 0.94).abs() < 1e-9);
    }

    #[test]
    fn confidence_stays_above_floor_for_weak_matches() {
        let comps = [comparable(0.3, DistanceBand::Other, 900.0)];
        let score = confidence(&comps);
        assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&score));
    }

    #[test]
    fn representable_check_accounts_for_growth_headroom() {
        let mut conditions = ValuationTables::standard().market.fallback;
        assert!(ensure_representable(6.0e18, &conditions).is_ok());

        conditions.annual_appreciation_pct = 20.0;
        // 6e18 * 1.2^5 overflows even though 6e18 itself fits
        assert!(matches!(
            ensure_representable(6.0e18, &conditions),
            Err(ValuationError::InvalidInput { field: "square_feet", .. })
        ));
    }

    #[test]
    fn projection_compounds_annually() {
        let predictions = project(1_000_000, 0.05);
        assert_eq!(predictions.one_year, 1_050_000);
        assert_eq!(predictions.three_years, 1_157_625);
        assert_eq!(predictions.six_months, 1_024_695);
    }
}
