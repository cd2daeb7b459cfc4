//! Delivery stops built from orders for a single optimization call.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::priority::{self, Priority};
use crate::traits::DeliveryOrder;

/// A stop to be sequenced. Built fresh per planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    pub order_id: String,
    pub customer_name: String,
    pub destination: Option<GeoPoint>,
    pub priority_weight: u32,
    pub service_time_minutes: u32,
}

impl DeliveryStop {
    pub fn new(
        order_id: impl Into<String>,
        customer_name: impl Into<String>,
        destination: Option<GeoPoint>,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        let order_id = order_id.into();
        if priority.weight == 0 {
            return Err(ValidationError::ZeroPriorityWeight { order_id });
        }
        Ok(Self {
            order_id,
            customer_name: customer_name.into(),
            destination,
            priority_weight: priority.weight,
            service_time_minutes: priority.service_time_minutes,
        })
    }

    /// Classify the order's delivery method and validate its coordinates.
    pub fn from_order<O: DeliveryOrder>(order: &O) -> Result<Self, ValidationError> {
        let destination = order
            .destination()
            .map(GeoPoint::try_from)
            .transpose()?;

        Self::new(
            order.order_id(),
            order.customer_name(),
            destination,
            priority::classify(order.delivery_method()),
        )
    }

    pub fn is_geolocated(&self) -> bool {
        self.destination.is_some()
    }
}

/// Build stops for every order, failing on the first invalid one.
pub fn stops_from_orders<O: DeliveryOrder>(
    orders: &[O],
) -> Result<Vec<DeliveryStop>, ValidationError> {
    orders.iter().map(DeliveryStop::from_order).collect()
}

/// Plain order record for callers without their own order type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_display_name: String,
    pub destination: Option<Coordinates>,
    pub delivery_method_label: String,
    #[serde(default)]
    pub locality: Option<String>,
}

/// Unvalidated coordinates as received from the order store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl DeliveryOrder for OrderRecord {
    fn order_id(&self) -> &str {
        &self.order_id
    }

    fn customer_name(&self) -> &str {
        &self.customer_display_name
    }

    fn destination(&self) -> Option<(f64, f64)> {
        self.destination.map(|c| (c.latitude, c.longitude))
    }

    fn delivery_method(&self) -> &str {
        &self.delivery_method_label
    }

    fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }
}
