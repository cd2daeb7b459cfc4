//! End-to-end planning of a rider's orders.
//!
//! orders -> stops (classified, validated) -> optimized sequence ->
//! metrics -> arrival estimates -> [`RoutePlan`].

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::builder;
use crate::config::PlannerConfig;
use crate::error::ValidationError;
use crate::eta::{self, ArrivalEstimate};
use crate::metrics::RouteMetrics;
use crate::stop::{self, DeliveryStop};
use crate::traits::DeliveryOrder;

/// Result handed to dispatch and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub ordered_order_ids: Vec<String>,
    /// Rounded to one decimal.
    pub total_distance_km: f64,
    pub total_duration_minutes: u32,
    pub efficiency_percent: u8,
    pub per_stop_arrival: Vec<ArrivalEstimate>,
}

#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan one rider's orders.
    ///
    /// Fails on invalid coordinates, or when arrival estimates cannot be
    /// represented with the configured speeds.
    pub fn plan<O: DeliveryOrder>(
        &self,
        orders: &[O],
        start_time: DateTime<Utc>,
    ) -> Result<RoutePlan, ValidationError> {
        let stops = stop::stops_from_orders(orders)?;

        let unlocated = stops.iter().filter(|stop| !stop.is_geolocated()).count();
        if unlocated > 0 {
            warn!(
                unlocated,
                total = stops.len(),
                "orders without coordinates will be visited last"
            );
        }

        self.plan_stops(stops, start_time)
    }

    /// Plan already-built stops, given in input order.
    pub fn plan_stops(
        &self,
        stops: Vec<DeliveryStop>,
        start_time: DateTime<Utc>,
    ) -> Result<RoutePlan, ValidationError> {
        let depot = self.config.depot;
        let baseline = builder::priority_order(&stops);
        let ordered = builder::optimize(stops, depot);

        let metrics =
            RouteMetrics::compute(&ordered, &baseline, depot, self.config.travel_minutes_per_km);
        let per_stop_arrival =
            eta::estimate_arrivals(&ordered, depot, start_time, self.config.eta_options())?;

        debug!(
            stops = ordered.len(),
            distance_km = metrics.total_distance_km,
            duration_minutes = metrics.total_duration_minutes,
            efficiency_percent = metrics.efficiency_percent,
            "planned route"
        );

        Ok(RoutePlan {
            ordered_order_ids: ordered.into_iter().map(|stop| stop.order_id).collect(),
            total_distance_km: round_to_tenth(metrics.total_distance_km),
            total_duration_minutes: metrics.total_duration_minutes,
            efficiency_percent: metrics.efficiency_percent,
            per_stop_arrival,
        })
    }

    /// Plan several independent order sets (e.g. one per rider) in parallel.
    ///
    /// Results come back in input order, each paired with its key.
    pub fn plan_batch<K, O>(
        &self,
        batches: &[(K, Vec<O>)],
        start_time: DateTime<Utc>,
    ) -> Vec<(K, Result<RoutePlan, ValidationError>)>
    where
        K: Clone + Send + Sync,
        O: DeliveryOrder + Sync,
    {
        batches
            .par_iter()
            .map(|(key, orders)| (key.clone(), self.plan(orders, start_time)))
            .collect()
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
