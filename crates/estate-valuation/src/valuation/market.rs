use super::domain::MarketConditions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static lookup data injected into the valuation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationTables {
    pub baselines: CityBaselineTable,
    pub market: MarketConditionsTable,
}

impl ValuationTables {
    /// Oahu tables used when no override file is configured.
    pub fn standard() -> Self {
        Self {
            baselines: CityBaselineTable::standard(),
            market: MarketConditionsTable::standard(),
        }
    }

    /// Checks that every figure is usable in the valuation arithmetic.
    pub fn validate(&self) -> Result<(), String> {
        let baseline_ok = |value: f64| value.is_finite() && value > 0.0;

        if !baseline_ok(self.baselines.default_price_per_sqft) {
            return Err("default_price_per_sqft must be a positive number".to_string());
        }
        if let Some((city, _)) = self
            .baselines
            .cities
            .iter()
            .find(|(_, value)| !baseline_ok(**value))
        {
            return Err(format!("baseline for {city} must be a positive number"));
        }

        let conditions = std::iter::once(("fallback", &self.market.fallback)).chain(
            self.market
                .cities
                .iter()
                .map(|(city, conditions)| (city.as_str(), conditions)),
        );
        for (city, conditions) in conditions {
            if !conditions.annual_appreciation_pct.is_finite()
                || conditions.annual_appreciation_pct <= -100.0
            {
                return Err(format!("appreciation for {city} must be above -100%"));
            }
            if !baseline_ok(conditions.list_price_multiplier) {
                return Err(format!("list price multiplier for {city} must be positive"));
            }
            if !(1..=10).contains(&conditions.demand_index) {
                return Err(format!("demand index for {city} must be between 1 and 10"));
            }
        }

        Ok(())
    }
}

impl Default for ValuationTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Dollars per square foot used when no comparables qualify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBaselineTable {
    pub default_price_per_sqft: f64,
    pub cities: BTreeMap<String, f64>,
}

impl CityBaselineTable {
    pub fn standard() -> Self {
        let cities = [
            ("Honolulu", 1200.0),
            ("Kailua", 1500.0),
            ("Waialua", 800.0),
            ("Haleiwa", 900.0),
            ("Lanikai", 2000.0),
        ]
        .into_iter()
        .map(|(city, value)| (city.to_string(), value))
        .collect();

        Self {
            default_price_per_sqft: 1000.0,
            cities,
        }
    }

    pub fn price_per_sqft(&self, city: &str) -> f64 {
        find_city(&self.cities, city)
            .copied()
            .unwrap_or(self.default_price_per_sqft)
    }
}

/// Market figures keyed by city, with a fallback for unlisted cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditionsTable {
    pub fallback: MarketConditions,
    pub cities: BTreeMap<String, MarketConditions>,
}

impl MarketConditionsTable {
    pub fn standard() -> Self {
        let honolulu = MarketConditions {
            annual_appreciation_pct: 5.2,
            average_time_to_sell: "45-60 days".to_string(),
            demand_index: 8,
            list_price_multiplier: 1.02,
            description: "Strong urban demand with steady appreciation across luxury condos and estates."
                .to_string(),
        };
        let kailua = MarketConditions {
            annual_appreciation_pct: 6.8,
            average_time_to_sell: "30-45 days".to_string(),
            demand_index: 9,
            list_price_multiplier: 1.05,
            description: "Limited beachfront inventory keeps windward buyers competing for listings."
                .to_string(),
        };
        let waialua = MarketConditions {
            annual_appreciation_pct: 4.1,
            average_time_to_sell: "60-90 days".to_string(),
            demand_index: 6,
            list_price_multiplier: 0.98,
            description: "North Shore market with slower turnover and value-oriented pricing."
                .to_string(),
        };

        let cities = BTreeMap::from([
            ("Honolulu".to_string(), honolulu.clone()),
            ("Kailua".to_string(), kailua),
            ("Waialua".to_string(), waialua),
        ]);

        Self {
            fallback: honolulu,
            cities,
        }
    }

    /// Conditions for `city`; unknown cities get the fallback entry.
    pub fn lookup(&self, city: &str) -> &MarketConditions {
        find_city(&self.cities, city).unwrap_or(&self.fallback)
    }
}

fn find_city<'a, V>(table: &'a BTreeMap<String, V>, city: &str) -> Option<&'a V> {
    let city = city.trim();
    table
        .iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(city))
        .map(|(_, value)| value)
}
