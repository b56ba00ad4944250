use crate::card::{Card, CardColor};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Index of a city in the catalog.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct CityId(pub u16);

/// Index of a route in the catalog.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct RouteId(pub u16);

/// Index of a destination in the catalog.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct DestinationId(pub u16);

/// The two kinds of movement tokens a player places on captured routes.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    Land,
    Sea,
}

/// The route variants, which drive payment rules and token spending.
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RouteKind {
    Land,
    Sea,
    /// A land route payable only in matched same-color card pairs.
    Paired,
}

impl RouteKind {
    /// Which token pool a route of this kind draws from.
    #[inline]
    pub fn token_kind(&self) -> TokenKind {
        match self {
            RouteKind::Sea => TokenKind::Sea,
            _ => TokenKind::Land,
        }
    }
}

/// A city on the board.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct City {
    pub name: String,
    /// Whether a port may be built here.
    pub is_port: bool,
}

impl City {
    pub fn new(name: impl Into<String>, is_port: bool) -> Self {
        Self {
            name: name.into(),
            is_port,
        }
    }
}

/// Points granted for capturing a route of the given length.
pub fn points_for_length(length: u8) -> u8 {
    match length {
        1 => 1,
        2 => 2,
        3 => 4,
        4 => 7,
        5 => 10,
        6 => 15,
        7 => 18,
        _ => 21,
    }
}

/// One route between two adjacent cities.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Route {
    endpoints: (CityId, CityId),
    kind: RouteKind,
    /// `None` means the route accepts any single color.
    color: Option<CardColor>,
    length: u8,
    score: u8,
    /// A parallel route between the same two cities that the same owner
    /// cannot also hold.
    parallel: Option<RouteId>,
}

impl Route {
    /// Creates a route; its score is derived from the length table.
    pub fn new(
        endpoints: (CityId, CityId),
        kind: RouteKind,
        color: Option<CardColor>,
        length: u8,
    ) -> Self {
        Self {
            endpoints,
            kind,
            color,
            length,
            score: points_for_length(length),
            parallel: None,
        }
    }

    /// Links this route to its parallel counterpart.
    pub fn with_parallel(mut self, parallel: RouteId) -> Self {
        self.parallel = Some(parallel);
        self
    }

    #[inline]
    pub fn endpoints(&self) -> (CityId, CityId) {
        self.endpoints
    }

    #[inline]
    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Option<CardColor> {
        self.color
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[inline]
    pub fn parallel(&self) -> Option<RouteId> {
        self.parallel
    }

    #[inline]
    pub fn token_kind(&self) -> TokenKind {
        self.kind.token_kind()
    }

    pub fn touches(&self, city: CityId) -> bool {
        self.endpoints.0 == city || self.endpoints.1 == city
    }

    /// The endpoint opposite `city`, if `city` is an endpoint at all.
    pub fn other_endpoint(&self, city: CityId) -> Option<CityId> {
        if self.endpoints.0 == city {
            Some(self.endpoints.1)
        } else if self.endpoints.1 == city {
            Some(self.endpoints.0)
        } else {
            None
        }
    }
}

/// A scored goal requiring connectivity between two or more cities.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Destination {
    cities: Vec<CityId>,
    simple_value: u8,
    /// Value granted instead of `simple_value` for goals listing more than
    /// two cities.
    itinerary_value: u8,
    penalty: u8,
}

impl Destination {
    pub fn new(cities: Vec<CityId>, simple_value: u8, itinerary_value: u8, penalty: u8) -> Self {
        Self {
            cities,
            simple_value,
            itinerary_value,
            penalty,
        }
    }

    #[inline]
    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Goals listing more than two cities are itineraries.
    #[inline]
    pub fn is_itinerary(&self) -> bool {
        self.cities.len() > 2
    }

    /// Points granted on completion: the itinerary value for itineraries,
    /// the simple value otherwise.
    pub fn value_when_complete(&self) -> u8 {
        if self.is_itinerary() {
            self.itinerary_value
        } else {
            self.simple_value
        }
    }

    #[inline]
    pub fn penalty(&self) -> u8 {
        self.penalty
    }
}

/// How many cards of each variant the transport decks hold, per palette
/// color (wildcards are a flat count; they are neutral and live in the land
/// deck).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DeckComposition {
    pub land_plain_per_color: u8,
    pub land_anchor_per_color: u8,
    pub sea_single_per_color: u8,
    pub sea_double_per_color: u8,
    pub wildcards: u8,
}

impl DeckComposition {
    /// The standard composition: per color, 7 plain + 4 anchored land cards
    /// and 4 single + 6 double sea cards, plus 14 wildcards.
    pub fn standard() -> Self {
        Self {
            land_plain_per_color: 7,
            land_anchor_per_color: 4,
            sea_single_per_color: 4,
            sea_double_per_color: 6,
            wildcards: 14,
        }
    }

    /// Builds the two physical decks, assigning every card a unique id.
    /// Returns `(land_family, sea_family)`; wildcards are in the land family.
    pub fn build(&self) -> (Vec<Card>, Vec<Card>) {
        let mut next_id = 0;
        let mut id = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let mut land = Vec::new();
        let mut sea = Vec::new();
        for color in CardColor::palette() {
            for _ in 0..self.land_anchor_per_color {
                land.push(Card::land(id(), color, true));
            }
            for _ in 0..self.land_plain_per_color {
                land.push(Card::land(id(), color, false));
            }
            for _ in 0..self.sea_single_per_color {
                sea.push(Card::sea(id(), color, false));
            }
            for _ in 0..self.sea_double_per_color {
                sea.push(Card::sea(id(), color, true));
            }
        }
        for _ in 0..self.wildcards {
            land.push(Card::wildcard(id()));
        }

        (land, sea)
    }
}

/// Owns every static entity of a game: cities, routes, destinations and the
/// deck composition. The engine's mutable state only ever holds ids into it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Catalog {
    cities: Vec<City>,
    routes: Vec<Route>,
    destinations: Vec<Destination>,
    deck: DeckComposition,
}

impl Catalog {
    /// Creates a catalog with the standard deck composition, validating the
    /// cross-references between entities.
    pub fn new(
        cities: Vec<City>,
        routes: Vec<Route>,
        destinations: Vec<Destination>,
    ) -> Result<Self, String> {
        Self::with_deck(cities, routes, destinations, DeckComposition::standard())
    }

    pub fn with_deck(
        cities: Vec<City>,
        routes: Vec<Route>,
        destinations: Vec<Destination>,
        deck: DeckComposition,
    ) -> Result<Self, String> {
        let catalog = Self {
            cities,
            routes,
            destinations,
            deck,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), String> {
        let num_cities = self.cities.len() as u16;

        for (index, route) in self.routes.iter().enumerate() {
            let (start, end) = route.endpoints;
            if start.0 >= num_cities || end.0 >= num_cities {
                return Err(format!("Route {} references an unknown city.", index));
            }
            if start == end {
                return Err(format!("Route {} loops back onto a single city.", index));
            }
            if route.length == 0 {
                return Err(format!("Route {} has a length of zero.", index));
            }
            if route.color == Some(CardColor::Neutral) {
                return Err(format!("Route {} cannot require the neutral color.", index));
            }
            if let Some(parallel) = route.parallel {
                let counterpart = self
                    .routes
                    .get(parallel.0 as usize)
                    .ok_or_else(|| format!("Route {} references an unknown parallel route.", index))?;
                if parallel.0 as usize == index {
                    return Err(format!("Route {} is parallel to itself.", index));
                }
                if counterpart.parallel != Some(RouteId(index as u16)) {
                    return Err(format!(
                        "Route {} and its parallel route do not reference each other.",
                        index
                    ));
                }
            }
        }

        for (index, destination) in self.destinations.iter().enumerate() {
            if destination.cities.len() < 2 {
                return Err(format!(
                    "Destination {} must list at least two cities.",
                    index
                ));
            }
            for city in &destination.cities {
                if city.0 >= num_cities {
                    return Err(format!("Destination {} references an unknown city.", index));
                }
            }
        }

        Ok(())
    }

    #[inline]
    pub fn city(&self, id: CityId) -> &City {
        &self.cities[id.0 as usize]
    }

    #[inline]
    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.0 as usize]
    }

    #[inline]
    pub fn destination(&self, id: DestinationId) -> &Destination {
        &self.destinations[id.0 as usize]
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    #[inline]
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }

    pub fn cities(&self) -> impl Iterator<Item = (CityId, &City)> {
        self.cities
            .iter()
            .enumerate()
            .map(|(index, city)| (CityId(index as u16), city))
    }

    pub fn routes(&self) -> impl Iterator<Item = (RouteId, &Route)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, route)| (RouteId(index as u16), route))
    }

    pub fn destinations(&self) -> impl Iterator<Item = (DestinationId, &Destination)> {
        self.destinations
            .iter()
            .enumerate()
            .map(|(index, destination)| (DestinationId(index as u16), destination))
    }

    #[inline]
    pub fn deck(&self) -> &DeckComposition {
        &self.deck
    }

    /// Human-readable name for a route, e.g. `Lisboa – Marseille`. The
    /// second route of a parallel pair is suffixed to stay unambiguous.
    pub fn route_name(&self, id: RouteId) -> String {
        let route = self.route(id);
        let (start, end) = route.endpoints;
        let base = format!("{} – {}", self.city(start).name, self.city(end).name);
        match route.parallel {
            Some(parallel) if parallel < id => format!("{} (bis)", base),
            _ => base,
        }
    }

    /// Human-readable name for a destination, e.g. `Lisboa – Marseille – Roma`.
    pub fn destination_name(&self, id: DestinationId) -> String {
        let names: Vec<&str> = self
            .destination(id)
            .cities
            .iter()
            .map(|city| self.city(*city).name.as_str())
            .collect();
        names.join(" – ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A five-city board exercising every route variant:
    ///
    /// ```text
    ///   Aria* ──r0/r1── Brine* ──r2── Cobalt ──r3── Dune*
    ///     └──── r4 ──── Ember ──────── r5 ─────────── ┘
    /// ```
    ///
    /// Starred cities accept ports. r0/r1 are parallel, r2/r5 are sea,
    /// r3 is paired, r4 is colorless.
    pub fn mini_catalog() -> Catalog {
        let cities = vec![
            City::new("Aria", true),
            City::new("Brine", true),
            City::new("Cobalt", false),
            City::new("Dune", true),
            City::new("Ember", false),
        ];
        let routes = vec![
            Route::new((CityId(0), CityId(1)), RouteKind::Land, Some(CardColor::Red), 2)
                .with_parallel(RouteId(1)),
            Route::new(
                (CityId(0), CityId(1)),
                RouteKind::Land,
                Some(CardColor::White),
                2,
            )
            .with_parallel(RouteId(0)),
            Route::new(
                (CityId(1), CityId(2)),
                RouteKind::Sea,
                Some(CardColor::Green),
                3,
            ),
            Route::new((CityId(2), CityId(3)), RouteKind::Paired, None, 2),
            Route::new((CityId(0), CityId(4)), RouteKind::Land, None, 1),
            Route::new((CityId(3), CityId(4)), RouteKind::Sea, None, 4),
        ];
        let destinations = vec![
            Destination::new(vec![CityId(0), CityId(1)], 7, 0, 4),
            Destination::new(vec![CityId(0), CityId(1), CityId(2)], 10, 15, 6),
            Destination::new(vec![CityId(1), CityId(3)], 9, 0, 5),
        ];

        Catalog::new(cities, routes, destinations).unwrap()
    }
}
