use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Listing snapshot read from the property pool at valuation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    pub address: String,
    pub city: String,
    #[serde(alias = "zipCode", alias = "zip", alias = "postal_code")]
    pub zip_code: String,
    #[serde(alias = "list_price", alias = "listPrice")]
    pub price: f64,
    #[serde(alias = "sqft", alias = "squareFeet", alias = "living_area")]
    pub square_feet: f64,
    #[serde(alias = "beds")]
    pub bedrooms: u32,
    #[serde(alias = "baths")]
    pub bathrooms: f64,
    #[serde(alias = "propertyType", alias = "type")]
    pub property_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, alias = "listedOn", skip_serializing_if = "Option::is_none")]
    pub listed_on: Option<NaiveDate>,
}

impl PropertyRecord {
    /// Price per square foot, or `None` when either side is unusable.
    pub fn price_per_sqft(&self) -> Option<f64> {
        let usable = self.price.is_finite()
            && self.square_feet.is_finite()
            && self.price > 0.0
            && self.square_feet > 0.0;
        usable.then(|| self.price / self.square_feet)
    }
}

/// Physical condition reported by the owner or agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PropertyCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PropertyCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    /// Multiplier applied to the per-square-foot condition baseline.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Excellent => 1.15,
            Self::Good => 1.00,
            Self::Fair => 0.90,
            Self::Poor => 0.75,
        }
    }
}

impl FromStr for PropertyCondition {
    type Err = ValuationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(ValuationError::invalid(
                "condition",
                format!("'{other}' is not one of excellent, good, fair, poor"),
            )),
        }
    }
}

impl TryFrom<String> for PropertyCondition {
    type Error = ValuationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Attributes of the home being valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub address: String,
    pub city: String,
    #[serde(alias = "zipCode", alias = "zip")]
    pub zip_code: String,
    #[serde(alias = "sqft", alias = "squareFeet")]
    pub square_feet: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    #[serde(default, alias = "yearBuilt")]
    pub year_built: Option<u16>,
    #[serde(alias = "propertyType")]
    pub property_type: String,
    pub condition: PropertyCondition,
    #[serde(default, alias = "lotSize")]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub upgrades: Vec<String>,
}

impl ValuationRequest {
    pub fn validate(&self) -> Result<(), ValuationError> {
        for (field, value) in [
            ("address", &self.address),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("property_type", &self.property_type),
        ] {
            if value.trim().is_empty() {
                return Err(ValuationError::invalid(field, "must not be blank"));
            }
        }

        validate_square_feet(self.square_feet)?;

        if !self.bathrooms.is_finite() || self.bathrooms < 0.0 {
            return Err(ValuationError::invalid(
                "bathrooms",
                format!("{} is not a valid bathroom count", self.bathrooms),
            ));
        }

        validate_lot_size(self.lot_size)?;

        if let Some(year) = self.year_built {
            if !(1800..=2100).contains(&year) {
                return Err(ValuationError::invalid(
                    "year_built",
                    format!("{year} is outside 1800-2100"),
                ));
            }
        }

        Ok(())
    }
}

pub(crate) fn validate_square_feet(square_feet: f64) -> Result<(), ValuationError> {
    if square_feet.is_finite() && square_feet > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::invalid(
            "square_feet",
            format!("{square_feet} must be a positive number"),
        ))
    }
}

pub(crate) fn validate_lot_size(lot_size: Option<f64>) -> Result<(), ValuationError> {
    match lot_size {
        Some(lot) if !lot.is_finite() || lot < 0.0 => Err(ValuationError::invalid(
            "lot_size",
            format!("{lot} must be a non-negative number"),
        )),
        _ => Ok(()),
    }
}

/// Coarse proximity class; symbolic, not geographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DistanceBand {
    SameCity,
    SameZip,
    Other,
}

impl DistanceBand {
    pub const fn rank(self) -> u8 {
        match self {
            Self::SameCity => 1,
            Self::SameZip => 2,
            Self::Other => 3,
        }
    }
}

impl From<DistanceBand> for u8 {
    fn from(band: DistanceBand) -> Self {
        band.rank()
    }
}

impl TryFrom<u8> for DistanceBand {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SameCity),
            2 => Ok(Self::SameZip),
            3 => Ok(Self::Other),
            other => Err(format!("distance band {other} is not 1, 2 or 3")),
        }
    }
}

/// Reference listing selected for a single valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparable {
    pub source_id: String,
    pub address: String,
    pub price: f64,
    pub square_feet: f64,
    #[serde(serialize_with = "round_cents")]
    pub price_per_sqft: f64,
    pub distance_band: DistanceBand,
    pub similarity: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    pub label: String,
    pub dollar_delta: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub annual_appreciation_pct: f64,
    pub average_time_to_sell: String,
    pub demand_index: u8,
    pub list_price_multiplier: f64,
    pub description: String,
}

impl MarketConditions {
    pub fn annual_rate(&self) -> f64 {
        self.annual_appreciation_pct / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: i64,
    pub high: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePredictions {
    pub six_months: i64,
    pub one_year: i64,
    pub three_years: i64,
    pub five_years: i64,
}

/// Where the base value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBasis {
    Comparables,
    CityBaseline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub city: String,
    pub conditions: MarketConditions,
    pub valuation_basis: ValuationBasis,
    pub base_value: f64,
    pub comparables_considered: usize,
    pub adjustments: Vec<AdjustmentLine>,
    pub total_adjustments: f64,
    pub suggested_list_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketValuation {
    pub estimated_value: i64,
    pub value_range: ValueRange,
    #[serde(serialize_with = "round_cents")]
    pub price_per_sqft: f64,
    pub confidence_score: f64,
    pub comparables: Vec<Comparable>,
    pub market_analysis: MarketAnalysis,
    pub predictions: ValuePredictions,
}

fn round_cents<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// Rejected valuation input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ValuationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DistanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SameCity => "same city",
            Self::SameZip => "same zip",
            Self::Other => "other area",
        };
        f.write_str(label)
    }
}
