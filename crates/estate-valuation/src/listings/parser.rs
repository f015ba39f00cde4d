use super::normalizer::{collapse_whitespace, parse_amount, split_amenities};
use crate::valuation::PropertyRecord;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Parsed CSV row; `None` marks a row without a usable price or area.
pub(crate) type ParsedRow = (usize, Option<PropertyRecord>);

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = record?;
        // header is line 1
        rows.push((index + 2, row.into_record()));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(alias = "ID", alias = "listing_id", alias = "mls_id", alias = "mlsNumber")]
    id: String,
    #[serde(alias = "Address")]
    address: String,
    #[serde(alias = "City")]
    city: String,
    #[serde(
        alias = "zipCode",
        alias = "zip",
        alias = "postal_code",
        alias = "Zip",
        default
    )]
    zip_code: String,
    #[serde(alias = "list_price", alias = "listPrice", alias = "Price")]
    price: String,
    #[serde(
        alias = "sqft",
        alias = "squareFeet",
        alias = "living_area",
        alias = "Sqft"
    )]
    square_feet: String,
    #[serde(alias = "beds", alias = "Bedrooms", default)]
    bedrooms: u32,
    #[serde(alias = "baths", alias = "Bathrooms", default)]
    bathrooms: f64,
    #[serde(alias = "propertyType", alias = "type", alias = "Type", default)]
    property_type: String,
    #[serde(alias = "Amenities", default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
    #[serde(
        alias = "listedOn",
        alias = "list_date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    listed_on: Option<String>,
}

impl ListingRow {
    fn into_record(self) -> Option<PropertyRecord> {
        let price = parse_amount(&self.price).filter(|value| *value > 0.0)?;
        let square_feet = parse_amount(&self.square_feet).filter(|value| *value > 0.0)?;

        Some(PropertyRecord {
            id: self.id.trim().to_string(),
            address: collapse_whitespace(&self.address),
            city: collapse_whitespace(&self.city),
            zip_code: self.zip_code.trim().to_string(),
            price,
            square_feet,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            property_type: collapse_whitespace(&self.property_type).to_ascii_lowercase(),
            amenities: self
                .amenities
                .as_deref()
                .map(split_amenities)
                .unwrap_or_default(),
            listed_on: self.listed_on.as_deref().and_then(parse_date),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
