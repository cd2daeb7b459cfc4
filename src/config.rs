//! Planner configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::eta::{DEFAULT_ASSUMED_SPEED_KMH, DEFAULT_FALLBACK_TRAVEL_MINUTES, EtaOptions};
use crate::geo::{DEFAULT_DEPOT, GeoPoint};
use crate::metrics::DEFAULT_TRAVEL_MINUTES_PER_KM;

pub const ENV_DEPOT_LATITUDE: &str = "ROUTE_DEPOT_LATITUDE";
pub const ENV_DEPOT_LONGITUDE: &str = "ROUTE_DEPOT_LONGITUDE";
pub const ENV_TRAVEL_MINUTES_PER_KM: &str = "ROUTE_TRAVEL_MINUTES_PER_KM";
pub const ENV_ASSUMED_SPEED_KMH: &str = "ROUTE_ASSUMED_SPEED_KMH";
pub const ENV_FALLBACK_TRAVEL_MINUTES: &str = "ROUTE_FALLBACK_TRAVEL_MINUTES";

/// A kilometer at walking pace.
pub const MAX_TRAVEL_MINUTES_PER_KM: f64 = 60.0;
pub const MIN_ASSUMED_SPEED_KMH: f64 = 1.0;
pub const MAX_ASSUMED_SPEED_KMH: f64 = 150.0;
/// Half a shift.
pub const MAX_FALLBACK_TRAVEL_MINUTES: f64 = 240.0;

/// Settings for [`crate::RoutePlanner`].
///
/// Every constructor validates: `from_env`, `from_lookup` and serde all go
/// through [`PlannerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPlannerConfig")]
pub struct PlannerConfig {
    /// Warehouse every route starts from.
    pub depot: GeoPoint,
    /// Travel minutes charged per kilometer in route duration.
    pub travel_minutes_per_km: f64,
    /// Average rider speed used for arrival estimates.
    pub assumed_speed_kmh: f64,
    /// Travel minutes charged for a stop without coordinates.
    pub fallback_travel_minutes: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            travel_minutes_per_km: DEFAULT_TRAVEL_MINUTES_PER_KM,
            assumed_speed_kmh: DEFAULT_ASSUMED_SPEED_KMH,
            fallback_travel_minutes: DEFAULT_FALLBACK_TRAVEL_MINUTES,
        }
    }
}

/// Unvalidated wire form of [`PlannerConfig`].
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPlannerConfig {
    depot: GeoPoint,
    travel_minutes_per_km: f64,
    assumed_speed_kmh: f64,
    fallback_travel_minutes: f64,
}

impl Default for RawPlannerConfig {
    fn default() -> Self {
        let defaults = PlannerConfig::default();
        Self {
            depot: defaults.depot,
            travel_minutes_per_km: defaults.travel_minutes_per_km,
            assumed_speed_kmh: defaults.assumed_speed_kmh,
            fallback_travel_minutes: defaults.fallback_travel_minutes,
        }
    }
}

impl TryFrom<RawPlannerConfig> for PlannerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPlannerConfig) -> Result<Self, Self::Error> {
        let config = Self {
            depot: raw.depot,
            travel_minutes_per_km: raw.travel_minutes_per_km,
            assumed_speed_kmh: raw.assumed_speed_kmh,
            fallback_travel_minutes: raw.fallback_travel_minutes,
        };
        config.validate()?;
        Ok(config)
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let latitude = parse_or(&lookup, ENV_DEPOT_LATITUDE, defaults.depot.latitude())?;
        let longitude = parse_or(&lookup, ENV_DEPOT_LONGITUDE, defaults.depot.longitude())?;
        let depot = GeoPoint::new(latitude, longitude)?;

        let config = Self {
            depot,
            travel_minutes_per_km: parse_or(
                &lookup,
                ENV_TRAVEL_MINUTES_PER_KM,
                defaults.travel_minutes_per_km,
            )?,
            assumed_speed_kmh: parse_or(
                &lookup,
                ENV_ASSUMED_SPEED_KMH,
                defaults.assumed_speed_kmh,
            )?,
            fallback_travel_minutes: parse_or(
                &lookup,
                ENV_FALLBACK_TRAVEL_MINUTES,
                defaults.fallback_travel_minutes,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric setting against its bounds.
    ///
    /// Errors name the environment variable of the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(ENV_TRAVEL_MINUTES_PER_KM, self.travel_minutes_per_km)?;
        within(
            ENV_TRAVEL_MINUTES_PER_KM,
            self.travel_minutes_per_km,
            0.0,
            MAX_TRAVEL_MINUTES_PER_KM,
        )?;

        positive(ENV_ASSUMED_SPEED_KMH, self.assumed_speed_kmh)?;
        within(
            ENV_ASSUMED_SPEED_KMH,
            self.assumed_speed_kmh,
            MIN_ASSUMED_SPEED_KMH,
            MAX_ASSUMED_SPEED_KMH,
        )?;

        within(
            ENV_FALLBACK_TRAVEL_MINUTES,
            self.fallback_travel_minutes,
            0.0,
            MAX_FALLBACK_TRAVEL_MINUTES,
        )
    }

    pub fn eta_options(&self) -> EtaOptions {
        EtaOptions {
            assumed_speed_kmh: self.assumed_speed_kmh,
            fallback_travel_minutes: self.fallback_travel_minutes,
        }
    }
}

fn parse_or<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { key })
    }
}

fn within(key: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.travel_minutes_per_km, 3.0);
        assert_eq!(config.assumed_speed_kmh, 20.0);
        assert_eq!(config.fallback_travel_minutes, 10.0);
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (ENV_DEPOT_LATITUDE, "-4.0435"),
            (ENV_DEPOT_LONGITUDE, " 39.6682 "),
            (ENV_ASSUMED_SPEED_KMH, "25"),
        ]))
        .unwrap();
        assert_eq!(config.depot, GeoPoint::new(-4.0435, 39.6682).unwrap());
        assert_eq!(config.assumed_speed_kmh, 25.0);
        assert_eq!(config.travel_minutes_per_km, 3.0);
    }

    #[test]
    fn test_invalid_number() {
        let err =
            PlannerConfig::from_lookup(lookup(&[(ENV_TRAVEL_MINUTES_PER_KM, "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber { key: ENV_TRAVEL_MINUTES_PER_KM, value: "fast".to_string() }
        );
    }

    #[test]
    fn test_non_positive_speed() {
        let err = PlannerConfig::from_lookup(lookup(&[(ENV_ASSUMED_SPEED_KMH, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::NonPositive { key: ENV_ASSUMED_SPEED_KMH });
    }

    #[test]
    fn test_invalid_depot() {
        let err = PlannerConfig::from_lookup(lookup(&[(ENV_DEPOT_LATITUDE, "95")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDepot(ValidationError::LatitudeOutOfRange(95.0)));
    }

    #[test]
    fn test_nan_rejected() {
        let err =
            PlannerConfig::from_lookup(lookup(&[(ENV_ASSUMED_SPEED_KMH, "NaN")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn test_huge_fallback_rejected() {
        let err = PlannerConfig::from_lookup(lookup(&[(ENV_FALLBACK_TRAVEL_MINUTES, "1e20")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                key: ENV_FALLBACK_TRAVEL_MINUTES,
                value: 1e20,
                min: 0.0,
                max: MAX_FALLBACK_TRAVEL_MINUTES,
            }
        );
    }

    #[test]
    fn test_tiny_speed_rejected() {
        let err =
            PlannerConfig::from_lookup(lookup(&[(ENV_ASSUMED_SPEED_KMH, "1e-300")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: ENV_ASSUMED_SPEED_KMH, .. }));
    }

    #[test]
    fn test_negative_fallback_rejected() {
        let err = PlannerConfig::from_lookup(lookup(&[(ENV_FALLBACK_TRAVEL_MINUTES, "-5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (ENV_TRAVEL_MINUTES_PER_KM, "60"),
            (ENV_ASSUMED_SPEED_KMH, "150"),
            (ENV_FALLBACK_TRAVEL_MINUTES, "0"),
        ]))
        .unwrap();
        assert_eq!(config.fallback_travel_minutes, 0.0);
    }

    #[test]
    fn test_validate_struct_literal() {
        let config = PlannerConfig {
            assumed_speed_kmh: 0.0,
            ..PlannerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive { key: ENV_ASSUMED_SPEED_KMH })
        );
        assert!(PlannerConfig::default().validate().is_ok());
    }
}
