//! Persisted route and its lifecycle.
//!
//! ```text
//! Planned ──start──▶ InProgress ──complete──▶ Completed
//!    │                   │
//!    └──────cancel───────┴──────────────────▶ Cancelled
//! ```
//!
//! The stop sequence is fixed when the route is created; re-optimizing
//! produces a new route. Only the status (and its timestamps) changes.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InvalidTransitionError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Planned => "planned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RouteStatus::Completed | RouteStatus::Cancelled)
    }

    pub const fn can_transition_to(self, next: RouteStatus) -> bool {
        matches!(
            (self, next),
            (RouteStatus::Planned, RouteStatus::InProgress)
                | (RouteStatus::InProgress, RouteStatus::Completed)
                | (RouteStatus::Planned, RouteStatus::Cancelled)
                | (RouteStatus::InProgress, RouteStatus::Cancelled)
        )
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rider's route for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub rider_id: String,
    pub date: NaiveDate,
    status: RouteStatus,
    stops: Vec<String>,
    pub total_distance_km: f64,
    pub total_duration_minutes: u32,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Route {
    /// New `Planned` route. Stops must be non-empty and free of duplicates.
    pub fn new(
        rider_id: impl Into<String>,
        date: NaiveDate,
        stops: Vec<String>,
        total_distance_km: f64,
        total_duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if stops.is_empty() {
            return Err(ValidationError::EmptyRoute);
        }
        let mut seen = HashSet::with_capacity(stops.len());
        for order_id in &stops {
            if !seen.insert(order_id.as_str()) {
                return Err(ValidationError::DuplicateStop(order_id.clone()));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            rider_id: rider_id.into(),
            date,
            status: RouteStatus::Planned,
            stops,
            total_distance_km: total_distance_km.max(0.0),
            total_duration_minutes,
            started_at: None,
            completed_at: None,
        })
    }

    pub fn status(&self) -> RouteStatus {
        self.status
    }

    /// Order ids in visiting order.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn start(&mut self, at: DateTime<Utc>) -> Result<(), InvalidTransitionError> {
        self.transition(RouteStatus::InProgress)?;
        self.started_at = Some(at);
        Ok(())
    }

    pub fn complete(&mut self, at: DateTime<Utc>) -> Result<(), InvalidTransitionError> {
        self.transition(RouteStatus::Completed)?;
        self.completed_at = Some(at);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), InvalidTransitionError> {
        self.transition(RouteStatus::Cancelled)
    }

    fn transition(&mut self, next: RouteStatus) -> Result<(), InvalidTransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransitionError {
                route_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
