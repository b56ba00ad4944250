use crate::card::Card;
use crate::catalog::{CityId, DestinationId, RouteId, TokenKind};

use array_init::array_init;
use log::warn;
use serde::Serialize;
use smallvec::SmallVec;

/// Every player may build this many ports over a game.
pub const STARTING_PORT_RIGHTS: u8 = 3;
/// Total land tokens per player (in play + reserve).
pub const LAND_TOKENS_TOTAL: u8 = 25;
/// Total sea tokens per player (in play + reserve).
pub const SEA_TOKENS_TOTAL: u8 = 50;
/// Tokens put in play at setup, across both kinds.
pub const TOKENS_IN_PLAY_TOTAL: u8 = 60;
/// Bounds of the land-token split chosen at setup.
pub const STARTING_LAND_TOKENS: std::ops::RangeInclusive<u8> = 10..=25;

/// One movement-token pool. The in-play tokens are spent on captured
/// routes; the reserve sits in the box.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TokenPool {
    pub in_play: u8,
    pub reserve: u8,
}

/// Information about a player that is part of every state snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerState {
    pub id: usize,
    pub name: String,
    pub score: i32,
    pub hand_size: usize,
    pub staged_size: usize,
    pub land_tokens: TokenPool,
    pub sea_tokens: TokenPool,
    pub port_rights: u8,
    pub routes: Vec<RouteId>,
    pub ports: Vec<CityId>,
    pub destinations: Vec<DestinationId>,
}

/// One player's mutable state: hand and staging area, captured routes and
/// built ports, running score, port-building rights, token pools, and the
/// end-game turn counter.
///
/// A `Player` records the outcomes of validated actions; the validation
/// itself lives in [`crate::payment`], [`crate::board::Board`] and
/// [`crate::acquisition`].
pub struct Player {
    id: usize,
    name: String,
    hand: Vec<Card>,
    staged: SmallVec<[Card; 8]>,
    routes: Vec<RouteId>,
    ports: Vec<CityId>,
    destinations: Vec<DestinationId>,
    score: i32,
    port_rights: u8,
    tokens: [TokenPool; 2],
    end_turns_played: u8,
}

fn token_index(kind: TokenKind) -> usize {
    match kind {
        TokenKind::Land => 0,
        TokenKind::Sea => 1,
    }
}

impl Player {
    /// Creates a player with an empty hand and no tokens in play; the token
    /// split is applied separately at setup via [`Player::apply_token_split`].
    pub fn new(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            staged: SmallVec::new(),
            routes: Vec::new(),
            ports: Vec::new(),
            destinations: Vec::new(),
            score: 0,
            port_rights: STARTING_PORT_RIGHTS,
            tokens: array_init(|_| TokenPool::default()),
            end_turns_played: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[inline]
    pub fn staged(&self) -> &[Card] {
        &self.staged
    }

    #[inline]
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }

    #[inline]
    pub fn ports(&self) -> &[CityId] {
        &self.ports
    }

    #[inline]
    pub fn destinations(&self) -> &[DestinationId] {
        &self.destinations
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    pub fn port_rights(&self) -> u8 {
        self.port_rights
    }

    #[inline]
    pub fn tokens(&self, kind: TokenKind) -> TokenPool {
        self.tokens[token_index(kind)]
    }

    /// Land plus sea tokens currently in play; the end of the game is
    /// announced when this first drops to six or fewer.
    pub fn total_tokens_in_play(&self) -> u8 {
        self.tokens.iter().map(|pool| pool.in_play).sum()
    }

    #[inline]
    pub fn end_turns_played(&self) -> u8 {
        self.end_turns_played
    }

    pub fn mark_end_turn_played(&mut self) {
        self.end_turns_played += 1;
    }

    /// Applies the setup split: `land_in_play` land tokens (between 10 and
    /// 25) and the remaining 60 − `land_in_play` sea tokens go in play; the
    /// rest of each kind goes to the reserve.
    pub fn apply_token_split(&mut self, land_in_play: u8) -> Result<(), String> {
        if !STARTING_LAND_TOKENS.contains(&land_in_play) {
            return Err(format!(
                "Cannot start with {} land tokens: the split must be between {} and {}.",
                land_in_play,
                STARTING_LAND_TOKENS.start(),
                STARTING_LAND_TOKENS.end()
            ));
        }

        let sea_in_play = TOKENS_IN_PLAY_TOTAL - land_in_play;
        self.tokens[token_index(TokenKind::Land)] = TokenPool {
            in_play: land_in_play,
            reserve: LAND_TOKENS_TOTAL - land_in_play,
        };
        self.tokens[token_index(TokenKind::Sea)] = TokenPool {
            in_play: sea_in_play,
            reserve: SEA_TOKENS_TOTAL - sea_in_play,
        };
        Ok(())
    }

    /// Exchanges `count` in-play tokens of the opposite kind for `count`
    /// reserve tokens of `gain`, at the price of one point per token.
    /// The retired tokens leave the game.
    pub fn exchange_tokens(&mut self, gain: TokenKind, count: u8) -> Result<(), String> {
        let give = match gain {
            TokenKind::Land => TokenKind::Sea,
            TokenKind::Sea => TokenKind::Land,
        };

        if count == 0 {
            return Err(String::from("Cannot exchange zero tokens."));
        }
        if self.tokens(give).in_play < count {
            return Err(format!(
                "Cannot retire {} {} tokens, whilst having only {} in play.",
                count,
                give,
                self.tokens(give).in_play
            ));
        }
        if self.tokens(gain).reserve < count {
            return Err(format!(
                "Cannot take {} {} tokens, whilst having only {} in reserve.",
                count,
                gain,
                self.tokens(gain).reserve
            ));
        }

        self.tokens[token_index(give)].in_play -= count;
        self.tokens[token_index(gain)].reserve -= count;
        self.tokens[token_index(gain)].in_play += count;
        self.score -= i32::from(count);
        Ok(())
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Moves the hand card with the given label into the staging area.
    pub fn stage_card(&mut self, label: &str) -> Result<Card, String> {
        match self.hand.iter().position(|card| card.label() == label) {
            Some(index) => {
                let card = self.hand.remove(index);
                self.staged.push(card);
                Ok(card)
            }
            None => Err(format!("No card {} in hand.", label)),
        }
    }

    /// Rolls every staged card back into the hand, unchanged.
    pub fn unstage_all(&mut self) {
        self.hand.extend(self.staged.drain(..));
    }

    /// Empties the staging area, handing the cards to the caller for
    /// discarding. Only [`crate::acquisition`] calls this, on commit.
    pub fn take_staged(&mut self) -> SmallVec<[Card; 8]> {
        std::mem::take(&mut self.staged)
    }

    /// Records a successfully captured route: ownership, score, and the
    /// spent movement tokens.
    pub fn record_route(&mut self, id: RouteId, score: u8, kind: TokenKind, length: u8) {
        let pool = &mut self.tokens[token_index(kind)];
        if pool.in_play < length {
            // The transaction checks the token floor before staging starts.
            warn!(
                "player {} captured a route of length {} with only {} {} tokens in play",
                self.id, length, pool.in_play, kind
            );
        }
        pool.in_play = pool.in_play.saturating_sub(length);

        self.routes.push(id);
        self.score += i32::from(score);
    }

    /// Records a successfully built port.
    pub fn record_port(&mut self, city: CityId) {
        debug_assert!(self.port_rights > 0, "port built past the allowance");
        self.ports.push(city);
        self.port_rights = self.port_rights.saturating_sub(1);
    }

    pub fn add_destination(&mut self, destination: DestinationId) {
        self.destinations.push(destination);
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            id: self.id,
            name: self.name.clone(),
            score: self.score,
            hand_size: self.hand.len(),
            staged_size: self.staged.len(),
            land_tokens: self.tokens(TokenKind::Land),
            sea_tokens: self.tokens(TokenKind::Sea),
            port_rights: self.port_rights,
            routes: self.routes.clone(),
            ports: self.ports.clone(),
            destinations: self.destinations.clone(),
        }
    }

    /// Mutable accessor to the hand.
    ///
    /// Should only be used for testing!
    pub fn get_mut_hand(&mut self) -> &mut Vec<Card> {
        &mut self.hand
    }

    /// Mutable accessor to a token pool.
    ///
    /// Should only be used for testing!
    pub fn get_mut_tokens(&mut self, kind: TokenKind) -> &mut TokenPool {
        &mut self.tokens[token_index(kind)]
    }
}
