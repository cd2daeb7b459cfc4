//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. The storefront owns its order and
//! route storage; it implements these traits for its own data models.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::route::Route;

/// An order assigned to a rider, as seen by the planner.
pub trait DeliveryOrder {
    fn order_id(&self) -> &str;

    /// Name shown to the rider for this drop-off.
    fn customer_name(&self) -> &str;

    /// Raw destination coordinates (lat, lng), if the address was geocoded.
    ///
    /// Values are validated when the order becomes a stop.
    fn destination(&self) -> Option<(f64, f64)>;

    /// Free-text delivery method chosen at checkout.
    fn delivery_method(&self) -> &str;

    /// City or neighbourhood used to batch orders for dispatch.
    fn locality(&self) -> Option<&str>;
}

/// Lookup of the storefront's orders by id.
pub trait OrderSource {
    type Order: DeliveryOrder;

    /// Orders for `order_ids`, returned in the same order.
    ///
    /// Fails with [`RepositoryError::UnknownOrder`] on the first id that has
    /// no order.
    fn orders(&self, order_ids: &[String]) -> Result<Vec<Self::Order>, RepositoryError>;
}

impl<T: OrderSource + ?Sized> OrderSource for Arc<T> {
    type Order = T::Order;

    fn orders(&self, order_ids: &[String]) -> Result<Vec<Self::Order>, RepositoryError> {
        (**self).orders(order_ids)
    }
}

/// Persistence of routes and order-route linkage.
///
/// Implementations must make `insert_route` atomic with respect to the
/// `(rider_id, date)` key: while a non-cancelled route exists for that key,
/// inserting another one fails with [`RepositoryError::Conflict`].
pub trait RouteRepository {
    fn insert_route(&self, route: Route) -> Result<Route, RepositoryError>;

    fn route(&self, route_id: Uuid) -> Result<Option<Route>, RepositoryError>;

    /// Persist a status change of an existing route.
    fn update_route(&self, route: &Route) -> Result<(), RepositoryError>;

    /// Active (non-cancelled) route for a rider on a date.
    fn active_route_for(
        &self,
        rider_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Route>, RepositoryError>;

    fn route_for_order(&self, order_id: &str) -> Result<Option<Uuid>, RepositoryError>;
}

impl<T: RouteRepository + ?Sized> RouteRepository for Arc<T> {
    fn insert_route(&self, route: Route) -> Result<Route, RepositoryError> {
        (**self).insert_route(route)
    }

    fn route(&self, route_id: Uuid) -> Result<Option<Route>, RepositoryError> {
        (**self).route(route_id)
    }

    fn update_route(&self, route: &Route) -> Result<(), RepositoryError> {
        (**self).update_route(route)
    }

    fn active_route_for(
        &self,
        rider_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Route>, RepositoryError> {
        (**self).active_route_for(rider_id, date)
    }

    fn route_for_order(&self, order_id: &str) -> Result<Option<Uuid>, RepositoryError> {
        (**self).route_for_order(order_id)
    }
}
