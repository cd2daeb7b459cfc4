//! Distance, duration and efficiency of a stop sequence.

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, haversine_km};
use crate::stop::DeliveryStop;

/// Urban average of roughly 20 km/h.
pub const DEFAULT_TRAVEL_MINUTES_PER_KM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    pub total_distance_km: f64,
    pub total_duration_minutes: u32,
    pub efficiency_percent: u8,
}

impl RouteMetrics {
    /// Metrics for an optimized sequence, with the efficiency measured
    /// against `baseline_stops`.
    ///
    /// The baseline is the priority-only ordering of the stops as they were
    /// given, see [`crate::builder::priority_order`]. It must be built from
    /// the input order: equal-priority stops keep their input positions.
    pub fn compute(
        ordered_stops: &[DeliveryStop],
        baseline_stops: &[DeliveryStop],
        depot: GeoPoint,
        travel_minutes_per_km: f64,
    ) -> Self {
        let total_distance_km = compute_distance(ordered_stops, depot);
        let baseline_km = compute_distance(baseline_stops, depot);
        let total_duration_minutes =
            compute_duration(ordered_stops, total_distance_km, travel_minutes_per_km);

        Self {
            total_distance_km,
            total_duration_minutes,
            efficiency_percent: compute_efficiency(baseline_km, total_distance_km),
        }
    }
}

/// Sum of leg distances starting at `depot`.
///
/// Stops without coordinates add nothing and leave the reference position
/// where it was.
pub fn compute_distance(ordered_stops: &[DeliveryStop], depot: GeoPoint) -> f64 {
    let mut previous = depot;
    let mut total = 0.0;

    for destination in ordered_stops.iter().filter_map(|stop| stop.destination) {
        total += haversine_km(previous, destination);
        previous = destination;
    }

    total
}

/// Service time of every stop plus travel time for the whole distance, in
/// whole minutes.
pub fn compute_duration(
    ordered_stops: &[DeliveryStop],
    total_distance_km: f64,
    travel_minutes_per_km: f64,
) -> u32 {
    let service = ordered_stops
        .iter()
        .fold(0u32, |total, stop| total.saturating_add(stop.service_time_minutes));
    let travel = (total_distance_km * travel_minutes_per_km).round().max(0.0) as u32;
    service.saturating_add(travel)
}

/// Percentage of the baseline distance saved by the optimized sequence.
///
/// A zero baseline yields 0. The result is clamped to `0..=100`.
pub fn compute_efficiency(baseline_distance_km: f64, optimized_distance_km: f64) -> u8 {
    if baseline_distance_km <= 0.0 {
        return 0;
    }
    let saved = (1.0 - optimized_distance_km / baseline_distance_km) * 100.0;
    saved.round().clamp(0.0, 100.0) as u8
}
