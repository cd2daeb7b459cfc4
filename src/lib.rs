//! Delivery route planner
//!
//! Sequences a rider's daily orders from the depot, favouring both
//! proximity and delivery urgency, and derives distance, duration,
//! efficiency and per-stop arrival estimates.

pub mod builder;
pub mod config;
pub mod error;
pub mod eta;
pub mod geo;
pub mod manager;
pub mod memory;
pub mod metrics;
pub mod planner;
pub mod priority;
pub mod route;
pub mod stop;
pub mod traits;
pub mod zones;

pub use config::PlannerConfig;
pub use error::{
    ConfigError, InvalidTransitionError, PlannerError, RepositoryError, ValidationError,
};
pub use geo::{GeoPoint, haversine_km};
pub use manager::RouteManager;
pub use planner::{RoutePlan, RoutePlanner};
pub use route::{Route, RouteStatus};
pub use stop::{DeliveryStop, OrderRecord};
