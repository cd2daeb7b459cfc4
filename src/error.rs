//! Error taxonomy for the route planner.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::route::RouteStatus;

/// Malformed input rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("order {order_id} has a zero priority weight")]
    ZeroPriorityWeight { order_id: String },

    #[error("a route needs at least one stop")]
    EmptyRoute,

    #[error("order {0} appears more than once in the route")]
    DuplicateStop(String),

    #[error("assumed speed {0} km/h must be a positive finite number")]
    InvalidSpeed(f64),

    #[error("fallback travel time {0} minutes must be a non-negative finite number")]
    InvalidFallbackMinutes(f64),

    #[error("arrival estimate for order {order_id} is out of range")]
    ArrivalOutOfRange { order_id: String },
}

/// Illegal route status change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route {route_id} cannot move from {from} to {to}")]
pub struct InvalidTransitionError {
    pub route_id: Uuid,
    pub from: RouteStatus,
    pub to: RouteStatus,
}

/// Failures reported by a [`crate::traits::RouteRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("route {0} not found")]
    NotFound(Uuid),

    #[error("order {0} not found")]
    UnknownOrder(String),

    #[error("rider {rider_id} already has an active route on {date}")]
    Conflict { rider_id: String, date: NaiveDate },

    #[error("repository backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by the planning and route-management glue.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Only routes nobody has started may be re-optimized.
    #[error("route {route_id} is {status} and cannot be replaced")]
    NotReplaceable { route_id: Uuid, status: RouteStatus },
}

/// Configuration values that could not be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{key} is not a number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be greater than zero")]
    NonPositive { key: &'static str },

    #[error("{key} is {value}, expected a value in [{min}, {max}]")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid depot location: {0}")]
    InvalidDepot(#[from] ValidationError),
}
