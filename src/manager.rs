//! Route-management operations on top of a [`RouteRepository`] and an
//! [`OrderSource`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{InvalidTransitionError, PlannerError, RepositoryError};
use crate::planner::{RoutePlan, RoutePlanner};
use crate::route::{Route, RouteStatus};
use crate::traits::{DeliveryOrder, OrderSource, RouteRepository};

pub struct RouteManager<R, S> {
    repository: R,
    orders: S,
    planner: RoutePlanner,
}

impl<R: RouteRepository, S: OrderSource> RouteManager<R, S> {
    pub fn new(repository: R, orders: S, planner: RoutePlanner) -> Self {
        Self {
            repository,
            orders,
            planner,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn orders(&self) -> &S {
        &self.orders
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    /// Look up `order_ids`, optimize them and persist the `Planned` route.
    ///
    /// The stop sequence and totals come from the planner, not from the
    /// order of `order_ids`. Arrival estimates are not stored on the route,
    /// so the plan is anchored at midnight UTC of `date`.
    pub fn create_route(
        &self,
        rider_id: &str,
        order_ids: &[String],
        date: NaiveDate,
    ) -> Result<Route, PlannerError> {
        let orders = self.orders.orders(order_ids)?;
        let start_time = date.and_time(NaiveTime::MIN).and_utc();
        let (route, _) = self.create_planned_route(rider_id, date, &orders, start_time)?;
        Ok(route)
    }

    /// Optimize `orders` and persist the resulting `Planned` route.
    pub fn create_planned_route<O: DeliveryOrder>(
        &self,
        rider_id: &str,
        date: NaiveDate,
        orders: &[O],
        start_time: DateTime<Utc>,
    ) -> Result<(Route, RoutePlan), PlannerError> {
        let (route, plan) = self.build_planned(rider_id, date, orders, start_time)?;
        Ok((self.insert(route)?, plan))
    }

    pub fn route(&self, route_id: Uuid) -> Result<Route, PlannerError> {
        Ok(self.load(route_id)?)
    }

    pub fn start_route(&self, route_id: Uuid) -> Result<Route, PlannerError> {
        self.start_route_at(route_id, Utc::now())
    }

    pub fn start_route_at(&self, route_id: Uuid, at: DateTime<Utc>) -> Result<Route, PlannerError> {
        self.apply(route_id, RouteStatus::InProgress, |route| route.start(at))
    }

    pub fn complete_route(&self, route_id: Uuid) -> Result<Route, PlannerError> {
        self.complete_route_at(route_id, Utc::now())
    }

    pub fn complete_route_at(
        &self,
        route_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Route, PlannerError> {
        self.apply(route_id, RouteStatus::Completed, |route| route.complete(at))
    }

    pub fn cancel_route(&self, route_id: Uuid) -> Result<Route, PlannerError> {
        self.apply(route_id, RouteStatus::Cancelled, Route::cancel)
    }

    /// Re-optimize a `Planned` route: the old route is cancelled and a new
    /// one is created for the same rider and date.
    pub fn replace_route<O: DeliveryOrder>(
        &self,
        route_id: Uuid,
        orders: &[O],
        start_time: DateTime<Utc>,
    ) -> Result<(Route, RoutePlan), PlannerError> {
        let mut current = self.load(route_id)?;
        if current.status() != RouteStatus::Planned {
            warn!(%route_id, status = %current.status(), "refused to replace route");
            return Err(PlannerError::NotReplaceable {
                route_id,
                status: current.status(),
            });
        }

        let (replacement, plan) =
            self.build_planned(&current.rider_id, current.date, orders, start_time)?;

        current.cancel()?;
        self.repository.update_route(&current)?;
        let replacement = self.insert(replacement)?;

        info!(old = %route_id, new = %replacement.id, "route replaced");
        Ok((replacement, plan))
    }

    fn build_planned<O: DeliveryOrder>(
        &self,
        rider_id: &str,
        date: NaiveDate,
        orders: &[O],
        start_time: DateTime<Utc>,
    ) -> Result<(Route, RoutePlan), PlannerError> {
        let plan = self.planner.plan(orders, start_time)?;
        let route = Route::new(
            rider_id,
            date,
            plan.ordered_order_ids.clone(),
            plan.total_distance_km,
            plan.total_duration_minutes,
        )?;
        Ok((route, plan))
    }

    fn insert(&self, route: Route) -> Result<Route, PlannerError> {
        let route = self.repository.insert_route(route)?;
        info!(
            route_id = %route.id,
            rider_id = %route.rider_id,
            date = %route.date,
            stops = route.stops().len(),
            distance_km = route.total_distance_km,
            "route created"
        );
        Ok(route)
    }

    fn load(&self, route_id: Uuid) -> Result<Route, RepositoryError> {
        self.repository
            .route(route_id)?
            .ok_or(RepositoryError::NotFound(route_id))
    }

    fn apply<F>(
        &self,
        route_id: Uuid,
        target: RouteStatus,
        transition: F,
    ) -> Result<Route, PlannerError>
    where
        F: FnOnce(&mut Route) -> Result<(), InvalidTransitionError>,
    {
        let mut route = self.load(route_id)?;
        let from = route.status();

        if let Err(err) = transition(&mut route) {
            warn!(%route_id, %from, to = %target, "rejected route transition");
            return Err(err.into());
        }

        self.repository.update_route(&route)?;
        info!(%route_id, %from, to = %target, "route transitioned");
        Ok(route)
    }
}
