use super::domain::{
    validate_lot_size, validate_square_feet, AdjustmentLine, PropertyCondition, ValuationRequest,
};
use super::ValuationError;
use serde::{Deserialize, Serialize};

const OCEAN_VIEW_PER_SQFT: f64 = 200.0;
const CONDITION_BASELINE_PER_SQFT: f64 = 1000.0;
const PREMIUM_AMENITY_VALUE: f64 = 75_000.0;
const PREMIUM_AMENITY_KEYWORDS: [&str; 5] =
    ["pool", "spa", "tennis", "private beach", "guest house"];
const LARGE_LOT_THRESHOLD_SQFT: f64 = 10_000.0;
const LARGE_LOT_PER_SQFT: f64 = 25.0;

/// Ordered adjustment lines and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSummary {
    pub total: f64,
    pub lines: Vec<AdjustmentLine>,
}

/// Dollar adjustments derived from the request alone.
///
/// Lines are emitted in a fixed order (ocean view, condition, premium
/// amenities, lot) and only when they change the value.
pub fn compute_adjustments(target: &ValuationRequest) -> Result<AdjustmentSummary, ValuationError> {
    validate_square_feet(target.square_feet)?;
    validate_lot_size(target.lot_size)?;

    let mut lines = Vec::new();

    if target
        .amenities
        .iter()
        .any(|amenity| amenity.to_ascii_lowercase().contains("ocean"))
    {
        lines.push(AdjustmentLine {
            label: "Ocean view".to_string(),
            dollar_delta: OCEAN_VIEW_PER_SQFT * target.square_feet,
            reason: format!(
                "${OCEAN_VIEW_PER_SQFT:.0}/sqft premium across {:.0} sqft",
                target.square_feet
            ),
        });
    }

    if let Some(line) = condition_line(target.condition, target.square_feet) {
        lines.push(line);
    }

    let premium_count = target
        .amenities
        .iter()
        .filter(|amenity| is_premium_amenity(amenity))
        .count();
    if premium_count > 0 {
        lines.push(AdjustmentLine {
            label: "Premium amenities".to_string(),
            dollar_delta: PREMIUM_AMENITY_VALUE * premium_count as f64,
            reason: format!(
                "{premium_count} premium amenit{} at $75,000 each",
                plural_y(premium_count)
            ),
        });
    }

    if let Some(lot) = target.lot_size.filter(|lot| *lot > LARGE_LOT_THRESHOLD_SQFT) {
        let excess = lot - LARGE_LOT_THRESHOLD_SQFT;
        lines.push(AdjustmentLine {
            label: "Large lot".to_string(),
            dollar_delta: LARGE_LOT_PER_SQFT * excess,
            reason: format!(
                "{excess:.0} sqft beyond the {LARGE_LOT_THRESHOLD_SQFT:.0} sqft lot threshold"
            ),
        });
    }

    let total = lines.iter().map(|line| line.dollar_delta).sum();
    Ok(AdjustmentSummary { total, lines })
}

fn condition_line(condition: PropertyCondition, square_feet: f64) -> Option<AdjustmentLine> {
    let factor = condition.multiplier() - 1.0;
    if factor == 0.0 {
        return None;
    }

    let baseline = square_feet * CONDITION_BASELINE_PER_SQFT;
    Some(AdjustmentLine {
        label: format!("{} condition", condition.label()),
        dollar_delta: baseline * factor,
        reason: format!("{:+.0}% of the ${baseline:.0} condition baseline", factor * 100.0),
    })
}

fn is_premium_amenity(amenity: &str) -> bool {
    let amenity = amenity.to_ascii_lowercase();
    PREMIUM_AMENITY_KEYWORDS
        .iter()
        .any(|keyword| amenity.contains(keyword))
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
