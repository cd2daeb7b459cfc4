//! Locality buckets for batch dispatch views.

use std::collections::BTreeMap;

use crate::traits::DeliveryOrder;

/// Key for orders whose locality is missing or blank.
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Group orders by trimmed locality, keeping input order inside each group.
pub fn group_by_zone<O: DeliveryOrder>(orders: &[O]) -> BTreeMap<String, Vec<&O>> {
    let mut zones: BTreeMap<String, Vec<&O>> = BTreeMap::new();
    for order in orders {
        zones.entry(zone_key(order.locality())).or_default().push(order);
    }
    zones
}

fn zone_key(locality: Option<&str>) -> String {
    match locality.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_ZONE.to_string(),
    }
}
