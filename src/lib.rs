//! Rules engine for a network-building board game played with land and sea
//! transport cards: players capture routes on a shared map, build ports,
//! collect destination goals, and are scored on network connectivity at the
//! end of the game.
//!
//! The crate is the rules/validation core only. Board data (cities, routes,
//! destinations, deck composition) is handed in through a [`catalog::Catalog`],
//! and player decisions flow through the [`game::Decider`] exchange; rendering
//! and transport are left to the caller.

pub mod acquisition;
pub mod board;
pub mod card;
pub mod catalog;
pub mod game;
pub mod payment;
pub mod player;
pub mod score;
pub mod turn;

#[macro_use]
extern crate smallvec;
