//! Stop sequencing: priority-weighted greedy nearest neighbor.
//!
//! Starting at the depot, the next stop is always the unvisited geolocated
//! stop with the smallest `distance / priority_weight`. Dividing by the weight
//! lets an express stop beat a marginally closer standard one while locality
//! still decides between stops of equal priority. Ties go to the stop that
//! came first in the input. Stops without coordinates are appended after all
//! geolocated stops in their original order.
//!
//! # Complexity
//!
//! O(n²) in the number of stops, fine for a rider's daily batch.

use std::cmp::Reverse;

use crate::geo::{GeoPoint, haversine_km};
use crate::stop::DeliveryStop;

/// Order `stops` into a visiting sequence starting from `depot`.
///
/// The result is a permutation of the input. Identical inputs always yield
/// the identical sequence.
pub fn optimize(stops: Vec<DeliveryStop>, depot: GeoPoint) -> Vec<DeliveryStop> {
    let total = stops.len();
    let (geolocated, unlocated): (Vec<_>, Vec<_>) =
        stops.into_iter().partition(DeliveryStop::is_geolocated);

    let mut pending: Vec<Option<DeliveryStop>> = geolocated.into_iter().map(Some).collect();
    let mut sequence = Vec::with_capacity(total);
    let mut current = depot;

    while let Some(next) = best_next_stop(&pending, current) {
        if let Some(stop) = pending[next].take() {
            if let Some(destination) = stop.destination {
                current = destination;
            }
            sequence.push(stop);
        }
    }

    sequence.extend(unlocated);
    sequence
}

/// Score of travelling from `from` to a stop; lower is better.
pub fn weighted_score(from: GeoPoint, to: GeoPoint, priority_weight: u32) -> f64 {
    haversine_km(from, to) / f64::from(priority_weight)
}

/// Index of the pending stop with the lowest weighted score.
///
/// Strict `<` keeps the earliest stop on exact ties.
fn best_next_stop(pending: &[Option<DeliveryStop>], from: GeoPoint) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, slot) in pending.iter().enumerate() {
        let Some(stop) = slot else { continue };
        let Some(destination) = stop.destination else { continue };

        let score = weighted_score(from, destination, stop.priority_weight);
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((idx, score));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Stops ordered by descending priority only, ties in input order.
///
/// This is the "no geographic optimization" baseline used for efficiency.
pub fn priority_order(stops: &[DeliveryStop]) -> Vec<DeliveryStop> {
    let mut ordered = stops.to_vec();
    ordered.sort_by_key(|stop| Reverse(stop.priority_weight));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Priority;

    fn depot() -> GeoPoint {
        GeoPoint::new(0.0, 0.0).unwrap()
    }

    fn stop(id: &str, location: Option<(f64, f64)>, weight: u32) -> DeliveryStop {
        DeliveryStop::new(
            id,
            id,
            location.map(|(lat, lng)| GeoPoint::new(lat, lng).unwrap()),
            Priority { weight, service_time_minutes: 5 },
        )
        .unwrap()
    }

    fn ids(stops: &[DeliveryStop]) -> Vec<&str> {
        stops.iter().map(|s| s.order_id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(optimize(Vec::new(), depot()).is_empty());
    }

    #[test]
    fn test_locality_wins_at_equal_priority() {
        let stops = vec![stop("far", Some((0.5, 0.0)), 5), stop("near", Some((0.01, 0.0)), 5)];
        assert_eq!(ids(&optimize(stops, depot())), vec!["near", "far"]);
    }

    #[test]
    fn test_priority_wins_at_equal_distance() {
        let stops = vec![
            stop("standard", Some((0.0, 0.1)), 5),
            stop("express", Some((0.0, -0.1)), 10),
        ];
        assert_eq!(ids(&optimize(stops, depot())), vec!["express", "standard"]);
    }

    #[test]
    fn test_priority_does_not_override_large_distance() {
        // Express is 10x weight but 50x further away.
        let stops = vec![
            stop("express", Some((0.5, 0.0)), 10),
            stop("standard", Some((0.01, 0.0)), 5),
        ];
        assert_eq!(ids(&optimize(stops, depot())), vec!["standard", "express"]);
    }

    #[test]
    fn test_tie_goes_to_first_input() {
        let stops = vec![stop("first", Some((0.0, 0.1)), 5), stop("second", Some((0.0, -0.1)), 5)];
        assert_eq!(ids(&optimize(stops, depot())), vec!["first", "second"]);

        let stops = vec![stop("second", Some((0.0, -0.1)), 5), stop("first", Some((0.0, 0.1)), 5)];
        assert_eq!(ids(&optimize(stops, depot())), vec!["second", "first"]);
    }

    #[test]
    fn test_greedy_moves_from_current_position() {
        // From the depot "a" is closest; from "a", "c" is closer than "b".
        let stops = vec![
            stop("b", Some((0.0, -0.05)), 5),
            stop("c", Some((0.0, 0.06)), 5),
            stop("a", Some((0.0, 0.03)), 5),
        ];
        assert_eq!(ids(&optimize(stops, depot())), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_unlocated_trail_in_original_order() {
        let stops = vec![
            stop("x", None, 10),
            stop("a", Some((0.0, 0.02)), 5),
            stop("y", None, 3),
            stop("b", Some((0.0, 0.01)), 5),
        ];
        assert_eq!(ids(&optimize(stops, depot())), vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_all_unlocated_passthrough() {
        let stops = vec![stop("z", None, 3), stop("y", None, 10), stop("x", None, 5)];
        assert_eq!(ids(&optimize(stops, depot())), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_priority_order_is_stable() {
        let stops = vec![
            stop("s1", None, 5),
            stop("e1", None, 10),
            stop("s2", None, 5),
            stop("sch", None, 3),
            stop("e2", None, 10),
        ];
        assert_eq!(ids(&priority_order(&stops)), vec!["e1", "e2", "s1", "s2", "sch"]);
    }

    #[test]
    fn test_weighted_score() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, 0.1).unwrap();
        let raw = haversine_km(a, b);
        assert_eq!(weighted_score(a, b, 1), raw);
        assert_eq!(weighted_score(a, b, 10), raw / 10.0);
    }
}
