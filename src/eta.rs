//! Per-stop arrival estimates for a finalized stop sequence.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::{GeoPoint, haversine_km};
use crate::stop::DeliveryStop;

pub const DEFAULT_ASSUMED_SPEED_KMH: f64 = 20.0;

/// Travel time charged for a stop whose location is unknown.
pub const DEFAULT_FALLBACK_TRAVEL_MINUTES: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEstimate {
    pub order_id: String,
    pub estimated_arrival: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaOptions {
    pub assumed_speed_kmh: f64,
    pub fallback_travel_minutes: f64,
}

impl Default for EtaOptions {
    fn default() -> Self {
        Self {
            assumed_speed_kmh: DEFAULT_ASSUMED_SPEED_KMH,
            fallback_travel_minutes: DEFAULT_FALLBACK_TRAVEL_MINUTES,
        }
    }
}

impl EtaOptions {
    /// Speed must be positive and fallback time non-negative, both finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.assumed_speed_kmh.is_finite() && self.assumed_speed_kmh > 0.0) {
            return Err(ValidationError::InvalidSpeed(self.assumed_speed_kmh));
        }
        if !(self.fallback_travel_minutes.is_finite() && self.fallback_travel_minutes >= 0.0) {
            return Err(ValidationError::InvalidFallbackMinutes(self.fallback_travel_minutes));
        }
        Ok(())
    }
}

/// Walk the sequence from `depot`, accumulating travel and service time.
///
/// Each stop's estimate is the cumulative time after its service time has
/// been added. Stops without coordinates are charged the fallback travel
/// time and do not move the previous position.
///
/// Fails on invalid `options`, or when an estimate does not fit in a
/// timestamp.
pub fn estimate_arrivals(
    ordered_stops: &[DeliveryStop],
    depot: GeoPoint,
    start_time: DateTime<Utc>,
    options: EtaOptions,
) -> Result<Vec<ArrivalEstimate>, ValidationError> {
    options.validate()?;

    let mut elapsed_minutes = 0.0;
    let mut previous = depot;
    let mut estimates = Vec::with_capacity(ordered_stops.len());

    for stop in ordered_stops {
        match stop.destination {
            Some(destination) => {
                let km = haversine_km(previous, destination);
                elapsed_minutes += travel_minutes(km, options.assumed_speed_kmh);
                previous = destination;
            }
            None => elapsed_minutes += options.fallback_travel_minutes,
        }
        elapsed_minutes += f64::from(stop.service_time_minutes);

        let estimated_arrival = minutes_to_duration(elapsed_minutes)
            .and_then(|offset| start_time.checked_add_signed(offset))
            .ok_or_else(|| ValidationError::ArrivalOutOfRange {
                order_id: stop.order_id.clone(),
            })?;

        estimates.push(ArrivalEstimate {
            order_id: stop.order_id.clone(),
            estimated_arrival,
        });
    }

    Ok(estimates)
}

/// `speed_kmh` has been validated as positive.
fn travel_minutes(km: f64, speed_kmh: f64) -> f64 {
    km / speed_kmh * 60.0
}

/// Whole-second precision. `None` when the span is not representable.
fn minutes_to_duration(minutes: f64) -> Option<TimeDelta> {
    let seconds = (minutes * 60.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_seconds(seconds as i64)
}
