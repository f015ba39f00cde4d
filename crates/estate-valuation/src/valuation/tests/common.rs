use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::valuation::domain::{PropertyCondition, PropertyRecord, ValuationRequest};
use crate::valuation::engine::ValuationEngine;
use crate::valuation::repository::{ListingPool, PoolError};
use crate::valuation::service::ValuationService;

pub(super) fn request() -> ValuationRequest {
    ValuationRequest {
        address: "44 Kailua Rd".to_string(),
        city: "Kailua".to_string(),
        zip_code: "96734".to_string(),
        square_feet: 3000.0,
        bedrooms: 4,
        bathrooms: 3.0,
        year_built: Some(2004),
        property_type: "house".to_string(),
        condition: PropertyCondition::Good,
        lot_size: None,
        amenities: Vec::new(),
        upgrades: Vec::new(),
    }
}

pub(super) fn listing(
    id: &str,
    city: &str,
    zip_code: &str,
    price: f64,
    square_feet: f64,
) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        address: format!("{id} Aalapapa Dr"),
        city: city.to_string(),
        zip_code: zip_code.to_string(),
        price,
        square_feet,
        bedrooms: 4,
        bathrooms: 3.0,
        property_type: "house".to_string(),
        amenities: Vec::new(),
        listed_on: None,
    }
}

/// Listing with exactly the request's attributes, so similarity is 1.0.
pub(super) fn twin_of(request: &ValuationRequest, id: &str, price: f64) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        address: format!("{id} {}", request.address),
        city: request.city.clone(),
        zip_code: request.zip_code.clone(),
        price,
        square_feet: request.square_feet,
        bedrooms: request.bedrooms,
        bathrooms: request.bathrooms,
        property_type: request.property_type.clone(),
        amenities: request.amenities.clone(),
        listed_on: None,
    }
}

pub(super) fn engine() -> ValuationEngine {
    ValuationEngine::default()
}

#[derive(Default)]
pub(super) struct MemoryPool {
    pub(super) records: Vec<PropertyRecord>,
}

impl ListingPool for MemoryPool {
    fn candidates(&self, _request: &ValuationRequest) -> Result<Vec<PropertyRecord>, PoolError> {
        Ok(self.records.clone())
    }
}

pub(super) struct UnavailablePool;

impl ListingPool for UnavailablePool {
    fn candidates(&self, _request: &ValuationRequest) -> Result<Vec<PropertyRecord>, PoolError> {
        Err(PoolError::Unavailable("mls feed offline".to_string()))
    }
}

pub(super) fn service_with(records: Vec<PropertyRecord>) -> Arc<ValuationService<MemoryPool>> {
    Arc::new(ValuationService::new(
        Arc::new(MemoryPool { records }),
        engine(),
    ))
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
