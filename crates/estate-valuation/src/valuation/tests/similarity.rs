use super::common::*;
use crate::valuation::similarity::score;

#[test]
fn identical_property_scores_one() {
    let target = request();
    let twin = twin_of(&target, "mls-1", 4_500_000.0);

    assert!((score(&target, &twin) - 1.0).abs() < 1e-12);
}

#[test]
fn score_stays_within_unit_interval() {
    let target = request();
    for square_feet in [0.0, 1.0, 1500.0, 3000.0, 9000.0, 1e9] {
        for bedrooms in [0, 2, 4, 12] {
            for bathrooms in [0.0, 1.5, 3.0, 10.0] {
                for (city, property_type) in [("Kailua", "house"), ("Hilo", "condo")] {
                    let mut candidate = listing("mls-x", city, "96720", 1e6, square_feet);
                    candidate.bedrooms = bedrooms;
                    candidate.bathrooms = bathrooms;
                    candidate.property_type = property_type.to_string();

                    let value = score(&target, &candidate);
                    assert!((0.0..=1.0).contains(&value), "score {value} out of range");
                }
            }
        }
    }
}

#[test]
fn zero_square_feet_target_does_not_divide_by_zero() {
    let mut target = request();
    target.square_feet = 0.0;
    let twin = twin_of(&request(), "mls-1", 1e6);

    let value = score(&target, &twin);
    assert!(value.is_finite());
    assert!((value - 0.70).abs() < 1e-12);
}

#[test]
fn mismatched_type_and_city_lose_their_weight() {
    let target = request();
    let mut candidate = twin_of(&target, "mls-1", 1e6);
    candidate.property_type = "Condo".to_string();
    candidate.city = "Honolulu".to_string();

    assert!((score(&target, &candidate) - 0.70).abs() < 1e-12);
}
