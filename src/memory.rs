//! In-memory [`RouteRepository`] and [`OrderSource`], for tests and
//! single-process deployments.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::route::{Route, RouteStatus};
use crate::traits::{DeliveryOrder, OrderSource, RouteRepository};

#[derive(Debug, Default)]
pub struct InMemoryRouteRepository {
    store: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    routes: HashMap<Uuid, Route>,
    /// Latest route each order was linked to.
    order_routes: HashMap<String, Uuid>,
}

impl Store {
    fn active_for(&self, rider_id: &str, date: NaiveDate) -> Option<&Route> {
        self.routes.values().find(|route| {
            route.rider_id == rider_id
                && route.date == date
                && route.status() != RouteStatus::Cancelled
        })
    }
}

impl InMemoryRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.read().routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteRepository for InMemoryRouteRepository {
    fn insert_route(&self, route: Route) -> Result<Route, RepositoryError> {
        let mut store = self.store.write();

        if store.active_for(&route.rider_id, route.date).is_some() {
            warn!(rider_id = %route.rider_id, date = %route.date, "rejected second active route");
            return Err(RepositoryError::Conflict {
                rider_id: route.rider_id.clone(),
                date: route.date,
            });
        }

        for order_id in route.stops() {
            store.order_routes.insert(order_id.clone(), route.id);
        }
        store.routes.insert(route.id, route.clone());
        Ok(route)
    }

    fn route(&self, route_id: Uuid) -> Result<Option<Route>, RepositoryError> {
        Ok(self.store.read().routes.get(&route_id).cloned())
    }

    fn update_route(&self, route: &Route) -> Result<(), RepositoryError> {
        let mut store = self.store.write();
        match store.routes.get_mut(&route.id) {
            Some(existing) => {
                *existing = route.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(route.id)),
        }
    }

    fn active_route_for(
        &self,
        rider_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Route>, RepositoryError> {
        Ok(self.store.read().active_for(rider_id, date).cloned())
    }

    fn route_for_order(&self, order_id: &str) -> Result<Option<Uuid>, RepositoryError> {
        Ok(self.store.read().order_routes.get(order_id).copied())
    }
}

/// Orders keyed by id.
#[derive(Debug)]
pub struct InMemoryOrderSource<O> {
    orders: RwLock<HashMap<String, O>>,
}

impl<O> Default for InMemoryOrderSource<O> {
    fn default() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }
}

impl<O: DeliveryOrder> InMemoryOrderSource<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an order.
    pub fn insert(&self, order: O) {
        self.orders.write().insert(order.order_id().to_string(), order);
    }
}

impl<O: DeliveryOrder> FromIterator<O> for InMemoryOrderSource<O> {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        let orders = iter
            .into_iter()
            .map(|order| (order.order_id().to_string(), order))
            .collect();
        Self {
            orders: RwLock::new(orders),
        }
    }
}

impl<O: DeliveryOrder + Clone> OrderSource for InMemoryOrderSource<O> {
    type Order = O;

    fn orders(&self, order_ids: &[String]) -> Result<Vec<O>, RepositoryError> {
        let orders = self.orders.read();
        order_ids
            .iter()
            .map(|id| {
                orders
                    .get(id)
                    .cloned()
                    .ok_or_else(|| RepositoryError::UnknownOrder(id.clone()))
            })
            .collect()
    }
}
