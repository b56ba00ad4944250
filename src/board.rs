use crate::catalog::{Catalog, CityId, DestinationId, RouteId};

use log::warn;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// Public view of the board's claim state.
#[derive(Debug, PartialEq, Serialize)]
pub struct BoardState {
    /// Owner per route, indexed by route id.
    pub route_owners: Vec<Option<usize>>,
    /// Owner per city, indexed by city id; only port cities can be owned.
    pub port_owners: Vec<Option<usize>>,
}

/// The authoritative claim state of the shared map: which player, if any,
/// owns each route and each port city.
///
/// A route transitions from available to owned exactly once and never
/// reverts; the same holds for ports.
pub struct Board {
    route_owners: Vec<Option<usize>>,
    port_owners: Vec<Option<usize>>,
}

impl Board {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            route_owners: vec![None; catalog.num_routes()],
            port_owners: vec![None; catalog.num_cities()],
        }
    }

    #[inline]
    pub fn route_owner(&self, id: RouteId) -> Option<usize> {
        self.route_owners[id.0 as usize]
    }

    #[inline]
    pub fn is_route_available(&self, id: RouteId) -> bool {
        self.route_owner(id).is_none()
    }

    /// Every route not yet captured, in catalog order.
    pub fn available_routes(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.route_owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| RouteId(index as u16))
    }

    /// Every route captured by the given player, in catalog order.
    pub fn routes_of(&self, player_id: usize) -> impl Iterator<Item = RouteId> + '_ {
        self.route_owners
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == Some(player_id))
            .map(|(index, _)| RouteId(index as u16))
    }

    /// Marks a route as captured by `player_id`.
    ///
    /// Returns an `Err` if the route is already owned, or if the player
    /// already owns its parallel counterpart.
    pub fn claim_route(
        &mut self,
        catalog: &Catalog,
        id: RouteId,
        player_id: usize,
    ) -> Result<(), String> {
        if let Some(owner) = self.route_owner(id) {
            // Option generation should have filtered captured routes out;
            // reaching this is an upstream logic error, not a user error.
            warn!(
                "player {} attempted to capture {}, already owned by player {}",
                player_id,
                catalog.route_name(id),
                owner
            );
            return Err(format!(
                "The route {} is already captured.",
                catalog.route_name(id)
            ));
        }

        let route = catalog.route(id);
        if let Some(parallel) = route.parallel() {
            if self.route_owner(parallel) == Some(player_id) {
                let (start, end) = route.endpoints();
                return Err(format!(
                    "Cannot capture both parallel routes between {} and {}.",
                    catalog.city(start).name,
                    catalog.city(end).name
                ));
            }
        }

        self.route_owners[id.0 as usize] = Some(player_id);
        Ok(())
    }

    #[inline]
    pub fn port_owner(&self, city: CityId) -> Option<usize> {
        self.port_owners[city.0 as usize]
    }

    /// Whether a port can still be built at the given city.
    pub fn is_port_available(&self, catalog: &Catalog, city: CityId) -> bool {
        catalog.city(city).is_port && self.port_owner(city).is_none()
    }

    /// Every city where a port can still be built, in catalog order.
    pub fn available_ports<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = CityId> + 'a {
        catalog
            .cities()
            .map(|(id, _)| id)
            .filter(|id| self.is_port_available(catalog, *id))
    }

    /// Marks a port city as claimed by `player_id`.
    pub fn claim_port(
        &mut self,
        catalog: &Catalog,
        city: CityId,
        player_id: usize,
    ) -> Result<(), String> {
        if !catalog.city(city).is_port {
            return Err(format!(
                "No port can be built at {}.",
                catalog.city(city).name
            ));
        }
        if let Some(owner) = self.port_owner(city) {
            warn!(
                "player {} attempted to build a port at {}, already owned by player {}",
                player_id,
                catalog.city(city).name,
                owner
            );
            return Err(format!(
                "The port at {} is already built.",
                catalog.city(city).name
            ));
        }

        self.port_owners[city.0 as usize] = Some(player_id);
        Ok(())
    }

    /// The set of cities touched by the player's owned routes.
    pub fn network_cities(&self, catalog: &Catalog, player_id: usize) -> HashSet<CityId> {
        let mut cities = HashSet::new();
        for id in self.routes_of(player_id) {
            let (start, end) = catalog.route(id).endpoints();
            cities.insert(start);
            cities.insert(end);
        }
        cities
    }

    /// Whether every city listed by the destination is reachable from its
    /// first city using only the player's owned routes.
    pub fn is_destination_complete(
        &self,
        catalog: &Catalog,
        player_id: usize,
        destination: DestinationId,
    ) -> bool {
        let cities = catalog.destination(destination).cities();
        let owned: Vec<RouteId> = self.routes_of(player_id).collect();

        let mut visited = vec![false; catalog.num_cities()];
        let mut to_visit = VecDeque::with_capacity(owned.len() + 1);

        let start = cities[0];
        visited[start.0 as usize] = true;
        to_visit.push_back(start);

        while let Some(city) = to_visit.pop_front() {
            for id in &owned {
                if let Some(neighbor) = catalog.route(*id).other_endpoint(city) {
                    if !visited[neighbor.0 as usize] {
                        visited[neighbor.0 as usize] = true;
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }

        cities.iter().all(|city| visited[city.0 as usize])
    }

    pub fn state(&self) -> BoardState {
        BoardState {
            route_owners: self.route_owners.clone(),
            port_owners: self.port_owners.clone(),
        }
    }
}
