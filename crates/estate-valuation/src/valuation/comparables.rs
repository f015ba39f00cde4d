use super::domain::{Comparable, DistanceBand, PropertyRecord, ValuationRequest};
use super::similarity::{self, same_text};

/// Candidates scoring below this are not comparable at all.
pub const SIMILARITY_FLOOR: f64 = 0.30;
/// Maximum number of comparables considered for a valuation.
pub const MAX_COMPARABLES: usize = 8;

const SIMILARITY_RANK_WEIGHT: f64 = 0.7;
const CLOSENESS_RANK_WEIGHT: f64 = 0.3;

/// Similarity-ranked, distance-weighted subset of `pool` for `target`.
pub fn find_comparables(target: &ValuationRequest, pool: &[PropertyRecord]) -> Vec<Comparable> {
    let mut ranked: Vec<(f64, Comparable)> = pool
        .iter()
        .filter_map(|candidate| {
            let price_per_sqft = candidate.price_per_sqft()?;
            let similarity = similarity::score(target, candidate);
            if similarity < SIMILARITY_FLOOR {
                return None;
            }

            let distance_band = distance_band(target, candidate);
            let comparable = Comparable {
                source_id: candidate.id.clone(),
                address: candidate.address.clone(),
                price: candidate.price,
                square_feet: candidate.square_feet,
                price_per_sqft,
                distance_band,
                similarity,
                bedrooms: candidate.bedrooms,
                bathrooms: candidate.bathrooms,
            };
            Some((rank_score(&comparable), comparable))
        })
        .collect();

    // Stable: equal scores keep pool order.
    ranked.sort_by(|(left, _), (right, _)| right.total_cmp(left));

    ranked
        .into_iter()
        .take(MAX_COMPARABLES)
        .map(|(_, comparable)| comparable)
        .collect()
}

pub(crate) fn distance_band(target: &ValuationRequest, candidate: &PropertyRecord) -> DistanceBand {
    if same_text(&target.city, &candidate.city) {
        DistanceBand::SameCity
    } else if same_text(&target.zip_code, &candidate.zip_code) {
        DistanceBand::SameZip
    } else {
        DistanceBand::Other
    }
}

fn rank_score(comparable: &Comparable) -> f64 {
    let closeness = (10.0 - f64::from(comparable.distance_band.rank())) / 10.0;
    SIMILARITY_RANK_WEIGHT * comparable.similarity + CLOSENESS_RANK_WEIGHT * closeness
}
