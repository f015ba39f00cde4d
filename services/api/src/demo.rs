use crate::infra::{format_dollars, parse_condition, InMemoryListingPool};
use chrono::Local;
use clap::Args;
use estate_valuation::config::{AppConfig, ValuationConfig};
use estate_valuation::error::AppError;
use estate_valuation::valuation::{
    ListingPool, MarketValuation, PropertyCondition, ValuationBasis, ValuationEngine,
    ValuationRequest,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Street address of the home being valued
    #[arg(long)]
    pub(crate) address: String,
    /// City used for comparables, baselines and market conditions
    #[arg(long)]
    pub(crate) city: String,
    /// Zip code used as the secondary proximity band
    #[arg(long)]
    pub(crate) zip_code: String,
    /// Interior living area in square feet
    #[arg(long)]
    pub(crate) square_feet: f64,
    #[arg(long)]
    pub(crate) bedrooms: u32,
    #[arg(long)]
    pub(crate) bathrooms: f64,
    /// Property type such as house or condo
    #[arg(long, default_value = "house")]
    pub(crate) property_type: String,
    /// excellent, good, fair or poor
    #[arg(long, default_value = "good", value_parser = parse_condition)]
    pub(crate) condition: PropertyCondition,
    #[arg(long)]
    pub(crate) year_built: Option<u16>,
    /// Lot size in square feet
    #[arg(long)]
    pub(crate) lot_size: Option<f64>,
    /// Amenity description (repeatable)
    #[arg(long = "amenity")]
    pub(crate) amenities: Vec<String>,
    /// Recent upgrade (repeatable)
    #[arg(long = "upgrade")]
    pub(crate) upgrades: Vec<String>,
    /// Listing export (CSV, or JSON by extension) to draw comparables from
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Use the bundled Oahu sample listings when no export is given
    #[arg(long)]
    pub(crate) sample_listings: bool,
    /// Emit the valuation as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl EstimateArgs {
    fn request(&self) -> ValuationRequest {
        ValuationRequest {
            address: self.address.clone(),
            city: self.city.clone(),
            zip_code: self.zip_code.clone(),
            square_feet: self.square_feet,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            year_built: self.year_built,
            property_type: self.property_type.clone(),
            condition: self.condition,
            lot_size: self.lot_size,
            amenities: self.amenities.clone(),
            upgrades: self.upgrades.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Listing export to use instead of the bundled sample listings
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Print full comparable tables for every sample home
    #[arg(long)]
    pub(crate) show_comparables: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = engine_from(&config.valuation)?;
    let pool = match (&args.listings, args.sample_listings) {
        (Some(path), _) => InMemoryListingPool::from_path(path)?,
        (None, true) => InMemoryListingPool::sample()?,
        (None, false) => InMemoryListingPool::default(),
    };

    let request = args.request();
    let valuation = estimate(&engine, &pool, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&valuation)?);
    } else {
        render_valuation(&request, &valuation, true);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        listings,
        show_comparables,
    } = args;

    let config = AppConfig::load()?;
    let engine = engine_from(&config.valuation)?;
    let pool = match listings {
        Some(path) => InMemoryListingPool::from_path(&path)?,
        None => InMemoryListingPool::sample()?,
    };

    println!("Home valuation demo");
    println!(
        "Listing pool: {} active listings (prepared {})",
        pool.len(),
        Local::now().date_naive()
    );

    for request in demo_requests() {
        let candidates = pool.candidates(&request)?;
        match engine.calculate_market_value(&request, &candidates) {
            Ok(valuation) => render_valuation(&request, &valuation, show_comparables),
            Err(err) => println!("\n{}: valuation rejected ({err})", request.address),
        }
    }

    Ok(())
}

/// Engine over the configured lookup tables (`APP_VALUATION_TABLES`).
fn engine_from(config: &ValuationConfig) -> Result<ValuationEngine, AppError> {
    Ok(ValuationEngine::new(config.load_tables()?))
}

fn estimate(
    engine: &ValuationEngine,
    pool: &InMemoryListingPool,
    request: &ValuationRequest,
) -> Result<MarketValuation, AppError> {
    let candidates = pool.candidates(request)?;
    Ok(engine.calculate_market_value(request, &candidates)?)
}

fn demo_requests() -> Vec<ValuationRequest> {
    vec![
        ValuationRequest {
            address: "1 Kalaheo Ave".to_string(),
            city: "Kailua".to_string(),
            zip_code: "96734".to_string(),
            square_feet: 3000.0,
            bedrooms: 4,
            bathrooms: 3.0,
            year_built: Some(2008),
            property_type: "house".to_string(),
            condition: PropertyCondition::Excellent,
            lot_size: Some(12_000.0),
            amenities: vec!["Ocean View".to_string(), "Pool".to_string()],
            upgrades: vec!["Chef's kitchen".to_string()],
        },
        ValuationRequest {
            address: "1350 Ala Moana Blvd 1802".to_string(),
            city: "Honolulu".to_string(),
            zip_code: "96814".to_string(),
            square_feet: 1500.0,
            bedrooms: 2,
            bathrooms: 2.0,
            year_built: Some(2016),
            property_type: "condo".to_string(),
            condition: PropertyCondition::Good,
            lot_size: None,
            amenities: vec!["Ocean view lanai".to_string(), "Gym".to_string()],
            upgrades: Vec::new(),
        },
        ValuationRequest {
            address: "66-500 Haleiwa Rd".to_string(),
            city: "Haleiwa".to_string(),
            zip_code: "96712".to_string(),
            square_feet: 1900.0,
            bedrooms: 3,
            bathrooms: 2.0,
            year_built: Some(1972),
            property_type: "plantation cottage".to_string(),
            condition: PropertyCondition::Fair,
            lot_size: Some(9_500.0),
            amenities: Vec::new(),
            upgrades: Vec::new(),
        },
    ]
}

pub(crate) fn render_valuation(
    request: &ValuationRequest,
    valuation: &MarketValuation,
    show_comparables: bool,
) {
    let analysis = &valuation.market_analysis;

    println!("\n{} ({})", request.address, analysis.city);
    println!(
        "Estimated value: {} (range {} - {})",
        format_dollars(valuation.estimated_value),
        format_dollars(valuation.value_range.low),
        format_dollars(valuation.value_range.high)
    );
    println!(
        "Price per sqft: ${:.2} | Confidence {:.0}%",
        valuation.price_per_sqft,
        valuation.confidence_score * 100.0
    );

    match analysis.valuation_basis {
        ValuationBasis::Comparables => println!(
            "Basis: {} comparable listings (base {})",
            analysis.comparables_considered,
            format_dollars(analysis.base_value.round() as i64)
        ),
        ValuationBasis::CityBaseline => println!(
            "Basis: city baseline, no comparable listings (base {})",
            format_dollars(analysis.base_value.round() as i64)
        ),
    }

    if analysis.adjustments.is_empty() {
        println!("Adjustments: none");
    } else {
        println!("Adjustments");
        for line in &analysis.adjustments {
            println!(
                "- {}: {} ({})",
                line.label,
                format_dollars(line.dollar_delta.round() as i64),
                line.reason
            );
        }
    }

    let conditions = &analysis.conditions;
    println!(
        "Market: {:.1}% annual appreciation | demand {}/10 | {} to sell",
        conditions.annual_appreciation_pct, conditions.demand_index, conditions.average_time_to_sell
    );
    println!(
        "Suggested list price: {}",
        format_dollars(analysis.suggested_list_price)
    );

    let predictions = &valuation.predictions;
    println!(
        "Projection: 6mo {} | 1yr {} | 3yr {} | 5yr {}",
        format_dollars(predictions.six_months),
        format_dollars(predictions.one_year),
        format_dollars(predictions.three_years),
        format_dollars(predictions.five_years)
    );

    if show_comparables && !valuation.comparables.is_empty() {
        println!("Comparables");
        for comparable in &valuation.comparables {
            println!(
                "- {} | {} | {} | ${:.0}/sqft | {} | similarity {:.2}",
                comparable.source_id,
                comparable.address,
                format_dollars(comparable.price.round() as i64),
                comparable.price_per_sqft,
                comparable.distance_band,
                comparable.similarity
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_valuation::valuation::ValuationTables;

    #[test]
    fn demo_requests_all_value_against_sample_pool() {
        let pool = InMemoryListingPool::sample().expect("sample listings import");
        let engine = ValuationEngine::default();

        for request in demo_requests() {
            let valuation = estimate(&engine, &pool, &request).expect("demo request values");
            assert!(valuation.estimated_value > 0);
        }
    }

    fn kailua_args() -> EstimateArgs {
        EstimateArgs {
            address: "1 Kalaheo Ave".to_string(),
            city: "Kailua".to_string(),
            zip_code: "96734".to_string(),
            square_feet: 3000.0,
            bedrooms: 4,
            bathrooms: 3.0,
            property_type: "house".to_string(),
            condition: PropertyCondition::Excellent,
            year_built: None,
            lot_size: Some(12_000.0),
            amenities: vec!["Ocean View".to_string()],
            upgrades: Vec::new(),
            listings: None,
            sample_listings: false,
            json: true,
        }
    }

    #[test]
    fn estimate_args_build_request() {
        let request = kailua_args().request();
        assert_eq!(request.condition, PropertyCondition::Excellent);
        assert_eq!(request.amenities, vec!["Ocean View"]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn configured_tables_file_changes_the_estimate() {
        let mut tables = ValuationTables::standard();
        tables.baselines.cities.insert("Kailua".to_string(), 2500.0);
        let path = std::env::temp_dir().join(format!(
            "estate-valuation-cli-tables-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&tables).expect("tables serialize"))
            .expect("tables file written");

        let configured = engine_from(&ValuationConfig {
            listings_csv: None,
            tables_path: Some(path.clone()),
        })
        .expect("tables file loads");
        let standard = engine_from(&ValuationConfig::default()).expect("standard tables");
        std::fs::remove_file(&path).ok();

        let request = kailua_args().request();
        let pool = InMemoryListingPool::default();
        let with_file = estimate(&configured, &pool, &request).expect("valuation computes");
        let without = estimate(&standard, &pool, &request).expect("valuation computes");

        // 3000 sqft at 2500 vs 1500 per sqft; adjustments are identical
        assert_eq!(with_file.estimated_value - without.estimated_value, 3_000_000);
    }
}
