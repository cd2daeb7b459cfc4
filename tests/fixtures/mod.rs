//! Test fixtures for the route planner.
//!
//! Provides realistic test data including:
//! - Nairobi drop-off locations
//! - A builder for orders with sensible defaults

#![allow(dead_code)]

pub mod nairobi_locations;

pub use nairobi_locations::*;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use route_planner::traits::DeliveryOrder;
use route_planner::{DeliveryStop, GeoPoint};

/// Builder for test orders.
#[derive(Clone, Debug)]
pub struct TestOrder {
    pub id: String,
    pub customer: String,
    pub destination: Option<(f64, f64)>,
    pub method: String,
    pub locality: Option<String>,
}

impl TestOrder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            customer: format!("Customer {}", id),
            destination: None,
            method: "Standard Delivery".to_string(),
            locality: None,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.destination = Some((lat, lng));
        self
    }

    pub fn at_location(mut self, location: &Location) -> Self {
        self.destination = Some(location.coords());
        self.locality = Some(location.locality.to_string());
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn locality(mut self, locality: &str) -> Self {
        self.locality = Some(locality.to_string());
        self
    }
}

impl DeliveryOrder for TestOrder {
    fn order_id(&self) -> &str {
        &self.id
    }

    fn customer_name(&self) -> &str {
        &self.customer
    }

    fn destination(&self) -> Option<(f64, f64)> {
        self.destination
    }

    fn delivery_method(&self) -> &str {
        &self.method
    }

    fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }
}

pub fn depot() -> GeoPoint {
    GeoPoint::new(CBD_WAREHOUSE.lat, CBD_WAREHOUSE.lng).unwrap()
}

pub fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn shift_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
}

pub fn stops(orders: &[TestOrder]) -> Vec<DeliveryStop> {
    orders.iter().map(|o| DeliveryStop::from_order(o).unwrap()).collect()
}

pub fn ids(stops: &[DeliveryStop]) -> Vec<&str> {
    stops.iter().map(|s| s.order_id.as_str()).collect()
}
