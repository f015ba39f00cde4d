use super::domain::{PropertyRecord, ValuationRequest};

/// Relative weights of each attribute dimension. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub square_feet: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub property_type: f64,
    pub city: f64,
}

impl SimilarityWeights {
    pub const STANDARD: Self = Self {
        square_feet: 0.30,
        bedrooms: 0.20,
        bathrooms: 0.20,
        property_type: 0.15,
        city: 0.15,
    };

    pub fn total(&self) -> f64 {
        self.square_feet + self.bedrooms + self.bathrooms + self.property_type + self.city
    }
}

/// Similarity of `candidate` to `target` in `[0, 1]`.
pub fn score(target: &ValuationRequest, candidate: &PropertyRecord) -> f64 {
    let weights = SimilarityWeights::STANDARD;

    let total = square_feet_score(target.square_feet, candidate.square_feet) * weights.square_feet
        + bedroom_score(target.bedrooms, candidate.bedrooms) * weights.bedrooms
        + bathroom_score(target.bathrooms, candidate.bathrooms) * weights.bathrooms
        + exact_match(&target.property_type, &candidate.property_type) * weights.property_type
        + exact_match(&target.city, &candidate.city) * weights.city;

    if total.is_finite() {
        total.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn square_feet_score(target: f64, candidate: f64) -> f64 {
    if target == 0.0 || !target.is_finite() || !candidate.is_finite() {
        return 0.0;
    }
    let relative_gap = ((target - candidate).abs() / target).min(1.0);
    1.0 - relative_gap
}

fn bedroom_score(target: u32, candidate: u32) -> f64 {
    let diff = target.abs_diff(candidate) as f64;
    ((4.0 - diff) / 4.0).max(0.0)
}

fn bathroom_score(target: f64, candidate: f64) -> f64 {
    let diff = (target - candidate).abs();
    if !diff.is_finite() {
        return 0.0;
    }
    ((3.0 - diff) / 3.0).max(0.0)
}

fn exact_match(left: &str, right: &str) -> f64 {
    if same_text(left, right) {
        1.0
    } else {
        0.0
    }
}

/// Case-insensitive, trimmed equality. Blank values never match.
pub(crate) fn same_text(left: &str, right: &str) -> bool {
    let left = left.trim();
    !left.is_empty() && left.eq_ignore_ascii_case(right.trim())
}
