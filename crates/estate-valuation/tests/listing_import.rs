use estate_valuation::listings::ListingImporter;
use estate_valuation::valuation::{
    DistanceBand, PropertyCondition, ValuationBasis, ValuationEngine, ValuationRequest,
};

fn fixture_pool() -> Vec<estate_valuation::valuation::PropertyRecord> {
    let data = include_bytes!("fixtures/oahu_listings.csv");
    ListingImporter::from_reader(&data[..]).expect("fixture imports")
}

#[test]
fn importer_skips_unpriced_listings() {
    let pool = fixture_pool();

    assert_eq!(pool.len(), 7);
    assert!(pool.iter().all(|record| record.id != "WAI-402"));
    let kahala = pool
        .iter()
        .find(|record| record.id == "HNL-301")
        .expect("kahala listing present");
    assert_eq!(
        kahala.amenities,
        vec!["Pool", "Tennis Court", "Guest House"]
    );
    assert!(kahala.listed_on.is_some());
}

#[test]
fn imported_pool_supports_valuation() {
    let pool = fixture_pool();
    let request = ValuationRequest {
        address: "200 Kaelepulu Dr".to_string(),
        city: "Kailua".to_string(),
        zip_code: "96734".to_string(),
        square_feet: 3200.0,
        bedrooms: 4,
        bathrooms: 3.0,
        year_built: Some(1998),
        property_type: "House".to_string(),
        condition: PropertyCondition::Good,
        lot_size: None,
        amenities: Vec::new(),
        upgrades: vec!["Solar".to_string()],
    };

    let valuation = ValuationEngine::default()
        .calculate_market_value(&request, &pool)
        .expect("valuation computes");

    assert_eq!(valuation.market_analysis.valuation_basis, ValuationBasis::Comparables);
    assert!(!valuation.comparables.is_empty());
    assert_eq!(valuation.comparables[0].distance_band, DistanceBand::SameCity);
    assert!(valuation.confidence_score > 0.5 && valuation.confidence_score <= 0.95);
    assert!(valuation.value_range.low <= valuation.estimated_value);
    assert!(valuation.estimated_value <= valuation.value_range.high);
}
