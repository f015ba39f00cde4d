//! Listing pool ingestion from MLS-style CSV and JSON exports.

mod normalizer;
mod parser;

use crate::valuation::PropertyRecord;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            ListingImportError::Json(err) => write!(f, "invalid listing JSON data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
            ListingImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ListingImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads listing snapshots into canonical [`PropertyRecord`]s.
pub struct ListingImporter;

impl ListingImporter {
    /// Import from a file, choosing JSON for `.json` paths and CSV otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    /// Import a CSV export; rows without a usable price or area are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let mut records = Vec::new();

        for (line, record) in parser::parse_rows(reader)? {
            match record {
                Some(record) => records.push(record),
                None => warn!(line, "skipping listing without a positive price and area"),
            }
        }

        Ok(records)
    }

    /// Import a JSON array of listing objects.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, ListingImportError> {
        let listings: Vec<PropertyRecord> = serde_json::from_reader(reader)?;

        Ok(listings
            .into_iter()
            .filter_map(|mut record| {
                if record.price_per_sqft().is_none() {
                    warn!(id = %record.id, "skipping listing without a positive price and area");
                    return None;
                }
                record.city = normalizer::collapse_whitespace(&record.city);
                record.property_type =
                    normalizer::collapse_whitespace(&record.property_type).to_ascii_lowercase();
                Some(record)
            })
            .collect())
    }
}
