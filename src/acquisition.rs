//! The acquisition transaction: the all-or-nothing path by which a route is
//! captured or a port is built.
//!
//! A transaction is opened against a target (checking every precondition
//! that does not depend on the final card selection), and cards are then
//! moved from hand to staging one at a time. The transaction either commits,
//! discarding the staged cards by family and transferring ownership, or
//! aborts, rolling the staged cards back to the hand unchanged.

use crate::board::Board;
use crate::card::{Card, CardKind, CardSupply};
use crate::catalog::{Catalog, CityId, RouteId};
use crate::payment::{self, Cost};
use crate::player::Player;

use log::warn;

/// What an open transaction is paying for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AcquisitionTarget {
    Route(RouteId),
    Port(CityId),
}

/// An in-progress route capture or port construction.
///
/// The transaction holds ids only; the staged cards live in the player's
/// staging area, so an abandoned transaction can always be rolled back via
/// [`AcquisitionTransaction::abort`].
#[derive(Debug, PartialEq)]
pub struct AcquisitionTransaction {
    target: AcquisitionTarget,
    cost: Cost,
}

impl AcquisitionTransaction {
    /// Opens a capture transaction for a route.
    ///
    /// Returns an `Err` if the route is already captured, if the player
    /// owns its parallel counterpart, if they lack the movement tokens to
    /// place on it, or if no payment in their hand can cover it.
    pub fn begin_route(
        catalog: &Catalog,
        board: &Board,
        player: &Player,
        id: RouteId,
    ) -> Result<Self, String> {
        debug_assert!(player.staged().is_empty(), "staging area left dirty");

        let route = catalog.route(id);

        if board.route_owner(id).is_some() {
            return Err(format!(
                "The route {} is already captured.",
                catalog.route_name(id)
            ));
        }
        if let Some(parallel) = route.parallel() {
            if board.route_owner(parallel) == Some(player.id()) {
                let (start, end) = route.endpoints();
                return Err(format!(
                    "Cannot capture both parallel routes between {} and {}.",
                    catalog.city(start).name,
                    catalog.city(end).name
                ));
            }
        }

        let tokens = player.tokens(route.token_kind()).in_play;
        if tokens < route.length() {
            return Err(format!(
                "Cannot capture {} of length {} with only {} {} tokens in play.",
                catalog.route_name(id),
                route.length(),
                tokens,
                route.token_kind()
            ));
        }

        let cost = Cost::for_route(route);
        if payment::feasible_colors(&cost, player.hand()).is_empty() {
            // Option generation filters unpayable routes through the
            // resolver first, so an unpayable target here is a logic error.
            warn!(
                "player {} was offered the unpayable route {}",
                player.id(),
                catalog.route_name(id)
            );
            return Err(format!(
                "No payment in hand can capture {}.",
                catalog.route_name(id)
            ));
        }

        Ok(Self {
            target: AcquisitionTarget::Route(id),
            cost,
        })
    }

    /// Opens a construction transaction for a port.
    ///
    /// Returns an `Err` if the city is not an unclaimed port, if the player
    /// has no port-building rights left, if the city is not part of the
    /// player's route network, or if no payment in their hand can cover it.
    pub fn begin_port(
        catalog: &Catalog,
        board: &Board,
        player: &Player,
        city: CityId,
    ) -> Result<Self, String> {
        debug_assert!(player.staged().is_empty(), "staging area left dirty");

        if !catalog.city(city).is_port {
            return Err(format!(
                "No port can be built at {}.",
                catalog.city(city).name
            ));
        }
        if board.port_owner(city).is_some() {
            return Err(format!(
                "The port at {} is already built.",
                catalog.city(city).name
            ));
        }
        if player.port_rights() == 0 {
            return Err(String::from("No port-building rights remain."));
        }
        if !board
            .network_cities(catalog, player.id())
            .contains(&city)
        {
            return Err(format!(
                "Cannot build a port at {}, which none of your routes reaches.",
                catalog.city(city).name
            ));
        }

        let cost = Cost::port();
        if payment::feasible_colors(&cost, player.hand()).is_empty() {
            warn!(
                "player {} was offered an unpayable port at {}",
                player.id(),
                catalog.city(city).name
            );
            return Err(format!(
                "No payment in hand can build a port at {}.",
                catalog.city(city).name
            ));
        }

        Ok(Self {
            target: AcquisitionTarget::Port(city),
            cost,
        })
    }

    #[inline]
    pub fn target(&self) -> AcquisitionTarget {
        self.target
    }

    #[inline]
    pub fn cost(&self) -> &Cost {
        &self.cost
    }

    /// Labels of the hand cards that may join the staged payment next.
    pub fn stageable_labels(&self, player: &Player) -> Vec<String> {
        player
            .hand()
            .iter()
            .filter(|card| payment::stageable(&self.cost, player.staged(), card))
            .map(Card::label)
            .collect()
    }

    /// Moves one card from the player's hand into the staging area.
    pub fn stage(&self, player: &mut Player, label: &str) -> Result<(), String> {
        let card = player
            .hand()
            .iter()
            .find(|card| card.label() == label)
            .copied()
            .ok_or_else(|| format!("No card {} in hand.", label))?;

        if !payment::stageable(&self.cost, player.staged(), &card) {
            return Err(format!("The card {} cannot join this payment.", label));
        }

        player.stage_card(label)?;
        Ok(())
    }

    /// Whether the staged cards pay for the target under the exact-amount
    /// rule.
    pub fn is_satisfied(&self, player: &Player) -> bool {
        payment::covers(&self.cost, player.staged())
    }

    /// Commits the transaction: validates the staged payment, transfers
    /// ownership, discards the staged cards split by family (wildcards go
    /// to the land discard), and updates the player's score and tokens.
    ///
    /// On an `Err` nothing has been transferred and the cards are still
    /// staged; the caller decides whether to keep staging or abort.
    pub fn commit(
        self,
        catalog: &Catalog,
        board: &mut Board,
        player: &mut Player,
        land: &mut CardSupply,
        sea: &mut CardSupply,
    ) -> Result<(), String> {
        if !self.is_satisfied(player) {
            return Err(String::from(
                "The staged cards do not pay for the selected target.",
            ));
        }

        match self.target {
            AcquisitionTarget::Route(id) => {
                board.claim_route(catalog, id, player.id())?;
                let route = catalog.route(id);
                Self::discard_staged(player, land, sea);
                player.record_route(id, route.score(), route.token_kind(), route.length());
            }
            AcquisitionTarget::Port(city) => {
                board.claim_port(catalog, city, player.id())?;
                Self::discard_staged(player, land, sea);
                player.record_port(city);
            }
        }

        Ok(())
    }

    /// Rolls every staged card back into the hand.
    pub fn abort(self, player: &mut Player) {
        player.unstage_all();
    }

    fn discard_staged(player: &mut Player, land: &mut CardSupply, sea: &mut CardSupply) {
        for card in player.take_staged() {
            if card.kind == CardKind::Sea {
                sea.discard(card);
            } else {
                land.discard(card);
            }
        }
    }
}
