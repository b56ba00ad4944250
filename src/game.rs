//! The game loop: drives rounds across players to the end condition, owns
//! every pool of shared state, and runs the decision protocol.
//!
//! Each decision point is an explicit request/response exchange: the engine
//! emits a [`Prompt`] (instruction, legal option identifiers, pass-allowed
//! flag) through the [`Decider`] and validates the answer against the option
//! set, re-issuing the prompt on an invalid selection. A full [`GameState`]
//! snapshot is published after every mutating action.

use crate::acquisition::{AcquisitionTarget, AcquisitionTransaction};
use crate::board::{Board, BoardState};
use crate::card::{Card, CardKind, CardSupply, SupplyState, VisibleWindow};
use crate::catalog::{Catalog, CityId, DestinationId, RouteId, TokenKind};
use crate::payment::{self, Cost};
use crate::player::{Player, PlayerState, STARTING_LAND_TOKENS};
use crate::score::{self, ScoreBreakdown};
use crate::turn::{ActionKind, TurnEngine};

use array_init::array_init;
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use strum::IntoEnumIterator;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

const INITIAL_LAND_CARDS: usize = 3;
const INITIAL_SEA_CARDS: usize = 7;
const INITIAL_DESTINATION_DRAW: usize = 5;
const INITIAL_DESTINATION_KEEP: usize = 3;
const TURN_DESTINATION_DRAW: usize = 4;
const TURN_DESTINATION_KEEP: usize = 1;

/// The end of the game is announced when a player's in-play tokens first
/// drop this low.
pub const END_ANNOUNCED_TOKEN_FLOOR: u8 = 6;
/// Completed turns every player receives once the end is announced.
pub const END_TURNS_PER_PLAYER: u8 = 2;

/// A decision request sent to the external actor playing for one player.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prompt {
    /// Name of the player the decision belongs to.
    pub player: String,
    pub instruction: String,
    /// The currently legal option identifiers, in order.
    pub options: Vec<String>,
    /// Whether answering with a pass is legal.
    pub can_pass: bool,
}

/// An answer to a [`Prompt`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// One of the prompt's option identifiers. Anything else is an invalid
    /// selection, recovered by re-issuing the prompt.
    Choice(String),
    Pass,
    /// The exchange was cancelled (for instance by a timeout). Treated like
    /// a pass wherever passing is legal, and aborts the pending action
    /// otherwise.
    Cancelled,
}

/// The external actor answering prompts: a GUI, a bot, or a test script.
pub trait Decider {
    fn decide(&mut self, prompt: &Prompt) -> Decision;
}

/// A [`Decider`] answering from a fixed queue of responses. An empty string
/// means pass; an exhausted queue cancels every further exchange.
pub struct ScriptedDecider {
    responses: VecDeque<String>,
}

impl ScriptedDecider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

impl Decider for ScriptedDecider {
    fn decide(&mut self, _prompt: &Prompt) -> Decision {
        match self.responses.pop_front() {
            Some(response) if response.is_empty() => Decision::Pass,
            Some(response) => Decision::Choice(response),
            None => Decision::Cancelled,
        }
    }
}

/// A [`Decider`] reading responses from a channel, with an optional timeout
/// after which the pending exchange is cancelled.
pub struct ChannelDecider {
    receiver: Receiver<String>,
    timeout: Option<Duration>,
}

impl ChannelDecider {
    pub fn new(receiver: Receiver<String>) -> Self {
        Self {
            receiver,
            timeout: None,
        }
    }

    pub fn with_timeout(receiver: Receiver<String>, timeout: Duration) -> Self {
        Self {
            receiver,
            timeout: Some(timeout),
        }
    }
}

impl Decider for ChannelDecider {
    fn decide(&mut self, _prompt: &Prompt) -> Decision {
        let received = match self.timeout {
            Some(timeout) => self.receiver.recv_timeout(timeout).ok(),
            None => self.receiver.recv().ok(),
        };

        match received {
            Some(response) if response.is_empty() => Decision::Pass,
            Some(response) => Decision::Choice(response),
            None => Decision::Cancelled,
        }
    }
}

/// Receives a full state snapshot after every mutating action.
pub trait StateObserver {
    fn state_changed(&mut self, state: &GameState);
}

/// An immutable snapshot of the whole game, for rendering.
#[derive(Debug, Serialize)]
pub struct GameState {
    pub round: usize,
    /// Seating index of the player whose turn it is, if any.
    pub current_player: Option<usize>,
    pub end_announced: bool,
    pub land_supply: SupplyState,
    pub sea_supply: SupplyState,
    pub visible_window: Vec<Card>,
    pub destination_pile_size: usize,
    pub board: BoardState,
    /// Players in seating order.
    pub players: Vec<PlayerState>,
    pub log: Vec<String>,
}

/// The whole game: shared card pools, board, players, and the loop driving
/// rounds to the end condition.
///
/// Execution is single-threaded and strictly sequential; exactly one player
/// acts at a time and every mutation happens between two prompts.
pub struct Game {
    catalog: Catalog,
    board: Board,
    land_supply: CardSupply,
    sea_supply: CardSupply,
    window: VisibleWindow,
    destination_pile: VecDeque<DestinationId>,
    players: Vec<Player>,
    log: Vec<String>,
    round: usize,
    current_player: Option<usize>,
    end_announced: bool,
    rng: ChaCha8Rng,
    decider: Box<dyn Decider>,
    observer: Option<Box<dyn StateObserver>>,
}

impl Game {
    /// Creates a game over the given catalog, with two to five uniquely
    /// named players. Every shuffle of the game derives from `seed`.
    pub fn new(
        catalog: Catalog,
        player_names: Vec<String>,
        seed: u64,
        decider: Box<dyn Decider>,
    ) -> Result<Self, String> {
        if player_names.len() < MIN_PLAYERS || player_names.len() > MAX_PLAYERS {
            return Err(format!(
                "Cannot create a game with {} players: one must have at least two, and at most 5 players.",
                player_names.len()
            ));
        }
        for (index, name) in player_names.iter().enumerate() {
            if player_names[..index].contains(name) {
                return Err(format!("Cannot have two players named `{}`.", name));
            }
        }

        let [land_seed, sea_seed, game_seed]: [u64; 3] =
            array_init(|i| seed.wrapping_add((i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)));

        let (land_cards, sea_cards) = catalog.deck().build();
        let land_supply = CardSupply::new(CardKind::Land, land_cards, land_seed);
        let sea_supply = CardSupply::new(CardKind::Sea, sea_cards, sea_seed);

        let mut rng = ChaCha8Rng::seed_from_u64(game_seed);
        let mut destination_pile: Vec<DestinationId> =
            catalog.destinations().map(|(id, _)| id).collect();
        destination_pile.shuffle(&mut rng);

        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name))
            .collect();

        let board = Board::new(&catalog);

        Ok(Self {
            catalog,
            board,
            land_supply,
            sea_supply,
            window: VisibleWindow::new(),
            destination_pile: VecDeque::from(destination_pile),
            players,
            log: Vec::new(),
            round: 0,
            current_player: None,
            end_announced: false,
            rng,
            decider,
            observer: None,
        })
    }

    /// Registers an observer receiving a snapshot after every mutating
    /// action.
    pub fn set_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observer = Some(observer);
    }

    #[inline]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Plays the whole game: setup, rounds until the end condition, and the
    /// final scoring pass. Returns the score breakdowns in seating order.
    pub fn run(&mut self) -> Vec<ScoreBreakdown> {
        self.setup();
        self.play_rounds();
        self.finish()
    }

    /// The current state of the game, for rendering.
    pub fn state(&self) -> GameState {
        GameState {
            round: self.round,
            current_player: self.current_player,
            end_announced: self.end_announced,
            land_supply: self.land_supply.state(),
            sea_supply: self.sea_supply.state(),
            visible_window: self.window.cards().to_vec(),
            destination_pile_size: self.destination_pile.len(),
            board: self.board.state(),
            players: self.players.iter().map(Player::state).collect(),
            log: self.log.clone(),
        }
    }

    // Setup.

    fn setup(&mut self) {
        // Seating order is randomized once; player ids are unaffected.
        self.players.shuffle(&mut self.rng);
        self.window
            .refill(&mut self.land_supply, &mut self.sea_supply);

        for index in 0..self.players.len() {
            self.current_player = Some(index);
            self.deal_initial_hand(index);
            self.offer_destinations(index, INITIAL_DESTINATION_DRAW, INITIAL_DESTINATION_KEEP);
            self.choose_token_split(index);
            self.publish_state();
        }
        self.current_player = None;
    }

    fn deal_initial_hand(&mut self, index: usize) {
        let land: [Option<Card>; INITIAL_LAND_CARDS] = array_init(|_| self.land_supply.draw());
        let sea: [Option<Card>; INITIAL_SEA_CARDS] = array_init(|_| self.sea_supply.draw());

        let player = &mut self.players[index];
        player.add_cards(land.into_iter().flatten());
        player.add_cards(sea.into_iter().flatten());
    }

    /// Draws up to `draw` destination cards, lets the player return all but
    /// `min_keep` of them to the bottom of the pile, and keeps the rest.
    /// Returns how many were kept.
    fn offer_destinations(&mut self, index: usize, draw: usize, min_keep: usize) -> usize {
        let mut drawn: Vec<DestinationId> = (0..draw)
            .filter_map(|_| self.destination_pile.pop_front())
            .collect();
        if drawn.is_empty() {
            return 0;
        }

        while drawn.len() > min_keep {
            let options: Vec<String> = drawn
                .iter()
                .map(|id| format!("discard:{}", id.0))
                .collect();
            let instruction = format!(
                "Which destination do you want to return to the pile? You must keep at least {}.",
                min_keep
            );

            match self.choose(index, instruction, options, true) {
                Some(choice) => {
                    // Option identifiers are generated above, so they parse.
                    let id: u16 = choice["discard:".len()..].parse().unwrap();
                    let position = drawn.iter().position(|drawn_id| drawn_id.0 == id).unwrap();
                    let returned = drawn.remove(position);
                    self.destination_pile.push_back(returned);
                }
                None => break,
            }
        }

        let kept = drawn.len();
        let names: Vec<String> = drawn
            .iter()
            .map(|id| self.catalog.destination_name(*id))
            .collect();
        let player = &mut self.players[index];
        for id in drawn {
            player.add_destination(id);
        }

        self.log_line(format!(
            "{} keeps {} destination cards: {}.",
            self.players[index].name(),
            kept,
            names.join(", ")
        ));
        kept
    }

    fn choose_token_split(&mut self, index: usize) {
        let options: Vec<String> = STARTING_LAND_TOKENS.map(|count| count.to_string()).collect();
        let choice = self.choose(
            index,
            String::from("How many land tokens do you want to start with?"),
            options,
            false,
        );

        let land_in_play = choice
            .and_then(|count| count.parse().ok())
            .unwrap_or(*STARTING_LAND_TOKENS.start());
        // The options span the valid range, so the split cannot fail.
        self.players[index].apply_token_split(land_in_play).unwrap();

        let player = &self.players[index];
        self.log_line(format!(
            "{} starts with {} land tokens and {} sea tokens in play.",
            player.name(),
            player.tokens(TokenKind::Land).in_play,
            player.tokens(TokenKind::Sea).in_play
        ));
    }

    // Rounds.

    fn play_rounds(&mut self) {
        loop {
            self.round += 1;

            for index in 0..self.players.len() {
                if self.end_announced
                    && self.players[index].end_turns_played() >= END_TURNS_PER_PLAYER
                {
                    continue;
                }

                self.current_player = Some(index);
                self.play_turn(index);

                if self.end_announced {
                    self.players[index].mark_end_turn_played();
                } else if self.players[index].total_tokens_in_play() <= END_ANNOUNCED_TOKEN_FLOOR
                {
                    self.end_announced = true;
                    self.log_line(format!(
                        "{} has only {} tokens left in play: every player gets {} more turns.",
                        self.players[index].name(),
                        self.players[index].total_tokens_in_play(),
                        END_TURNS_PER_PLAYER
                    ));
                }
            }

            if self.end_announced
                && self
                    .players
                    .iter()
                    .all(|player| player.end_turns_played() >= END_TURNS_PER_PLAYER)
            {
                break;
            }
        }
    }

    fn play_turn(&mut self, index: usize) {
        let mut turn = TurnEngine::new();

        while !turn.is_complete() {
            let menu = self.turn_menu(index, &turn);
            if menu.is_empty() {
                self.log_line(format!(
                    "{} has no available action and passes.",
                    self.players[index].name()
                ));
                // Passing is always legal.
                turn.apply(ActionKind::Pass).unwrap();
                break;
            }

            let options: Vec<String> = menu.iter().map(|(option, _)| option.clone()).collect();
            let choice = match self.choose(
                index,
                String::from("What do you want to do?"),
                options,
                true,
            ) {
                Some(choice) => choice,
                None => {
                    self.log_line(format!("{} passes.", self.players[index].name()));
                    turn.apply(ActionKind::Pass).unwrap();
                    break;
                }
            };

            // The choice was validated against the menu.
            let kind = menu
                .iter()
                .find(|(option, _)| *option == choice)
                .map(|(_, kind)| *kind)
                .unwrap();

            match self.perform(index, &choice, kind) {
                Ok(()) => {
                    // The menu only offers actions the budget authorizes.
                    turn.apply(kind).unwrap();
                    self.publish_state();
                }
                Err(message) => {
                    // The action was abandoned or failed validation; the
                    // budget is untouched and the player chooses again.
                    debug!("action {} not completed: {}", choice, message);
                }
            }
        }
    }

    /// The currently legal actions, as `(option identifier, action kind)`
    /// pairs. Acquisition targets are pre-filtered through the payment
    /// resolver so that no unpayable target is ever offered.
    fn turn_menu(&self, index: usize, turn: &TurnEngine) -> Vec<(String, ActionKind)> {
        let player = &self.players[index];
        let mut menu = Vec::new();

        if !self.land_supply.is_empty() {
            menu.push((String::from("draw:land"), ActionKind::DrawSupplyCard));
        }
        if !self.sea_supply.is_empty() {
            menu.push((String::from("draw:sea"), ActionKind::DrawSupplyCard));
        }

        for (position, card) in self.window.cards().iter().enumerate() {
            let kind = if card.is_wildcard() {
                ActionKind::DrawVisibleWildcard
            } else {
                ActionKind::DrawVisibleCard
            };
            menu.push((format!("window:{}", position), kind));
        }

        if !self.destination_pile.is_empty() {
            menu.push((String::from("destinations"), ActionKind::DrawDestinations));
        }

        for gain in TokenKind::iter() {
            let give = match gain {
                TokenKind::Land => TokenKind::Sea,
                TokenKind::Sea => TokenKind::Land,
            };
            if player.tokens(give).in_play >= 1 && player.tokens(gain).reserve >= 1 {
                menu.push((format!("exchange:{}", gain), ActionKind::ExchangeTokens));
            }
        }

        for id in self.board.available_routes() {
            let route = self.catalog.route(id);
            if let Some(parallel) = route.parallel() {
                if self.board.route_owner(parallel) == Some(player.id()) {
                    continue;
                }
            }
            if player.tokens(route.token_kind()).in_play < route.length() {
                continue;
            }
            if payment::feasible_colors(&Cost::for_route(route), player.hand()).is_empty() {
                continue;
            }
            menu.push((format!("route:{}", id.0), ActionKind::CaptureRoute));
        }

        if player.port_rights() > 0
            && !payment::feasible_colors(&Cost::port(), player.hand()).is_empty()
        {
            let network = self.board.network_cities(&self.catalog, player.id());
            for city in self.board.available_ports(&self.catalog) {
                if network.contains(&city) {
                    menu.push((format!("port:{}", city.0), ActionKind::BuildPort));
                }
            }
        }

        menu.retain(|(_, kind)| turn.authorize(*kind).is_ok());
        menu
    }

    fn perform(&mut self, index: usize, choice: &str, kind: ActionKind) -> Result<(), String> {
        match kind {
            ActionKind::DrawSupplyCard => self.draw_supply_card(index, choice),
            ActionKind::DrawVisibleCard | ActionKind::DrawVisibleWildcard => {
                self.take_visible_card(index, choice)
            }
            ActionKind::DrawDestinations => {
                let draw = TURN_DESTINATION_DRAW.min(self.destination_pile.len());
                self.offer_destinations(index, draw, TURN_DESTINATION_KEEP);
                Ok(())
            }
            ActionKind::ExchangeTokens => self.exchange_tokens(index, choice),
            ActionKind::CaptureRoute => {
                // Menu-generated identifiers always parse.
                let id = RouteId(choice["route:".len()..].parse().unwrap());
                let transaction = AcquisitionTransaction::begin_route(
                    &self.catalog,
                    &self.board,
                    &self.players[index],
                    id,
                )?;
                self.stage_and_commit(index, transaction)
            }
            ActionKind::BuildPort => {
                let city = CityId(choice["port:".len()..].parse().unwrap());
                let transaction = AcquisitionTransaction::begin_port(
                    &self.catalog,
                    &self.board,
                    &self.players[index],
                    city,
                )?;
                self.stage_and_commit(index, transaction)
            }
            ActionKind::Pass => Ok(()),
        }
    }

    fn draw_supply_card(&mut self, index: usize, choice: &str) -> Result<(), String> {
        let (supply, family) = if choice == "draw:land" {
            (&mut self.land_supply, "land")
        } else {
            (&mut self.sea_supply, "sea")
        };

        let card = supply
            .draw()
            .ok_or_else(|| format!("The {} pile is empty.", family))?;
        self.players[index].add_card(card);

        // The drawn card stays hidden from the other players.
        self.log_line(format!(
            "{} drew a card from the {} pile.",
            self.players[index].name(),
            family
        ));
        Ok(())
    }

    fn take_visible_card(&mut self, index: usize, choice: &str) -> Result<(), String> {
        let position: usize = choice["window:".len()..].parse().unwrap();
        let card = self
            .window
            .take(position, &mut self.land_supply, &mut self.sea_supply)?;
        self.players[index].add_card(card);

        self.log_line(format!(
            "{} took a {} card from the visible cards.",
            self.players[index].name(),
            card
        ));
        Ok(())
    }

    fn exchange_tokens(&mut self, index: usize, choice: &str) -> Result<(), String> {
        let gain = if choice == "exchange:land" {
            TokenKind::Land
        } else {
            TokenKind::Sea
        };
        let give = match gain {
            TokenKind::Land => TokenKind::Sea,
            TokenKind::Sea => TokenKind::Land,
        };

        let player = &self.players[index];
        let max = player
            .tokens(give)
            .in_play
            .min(player.tokens(gain).reserve);
        let options: Vec<String> = (1..=max).map(|count| count.to_string()).collect();

        let count = match self.choose(
            index,
            format!("How many {} tokens do you want to take into play?", gain),
            options,
            true,
        ) {
            // The options span the legal counts, so this parses.
            Some(choice) => choice.parse::<u8>().unwrap(),
            None => return Err(String::from("The token exchange was abandoned.")),
        };

        self.players[index].exchange_tokens(gain, count)?;
        self.log_line(format!(
            "{} exchanged {} {} tokens for {} tokens, losing {} points.",
            self.players[index].name(),
            count,
            give,
            gain,
            count
        ));
        Ok(())
    }

    /// Runs the staging loop of an acquisition: the player commits cards
    /// one at a time until the payment is satisfied (which commits the
    /// transaction) or they cancel (which rolls everything back).
    fn stage_and_commit(
        &mut self,
        index: usize,
        transaction: AcquisitionTransaction,
    ) -> Result<(), String> {
        loop {
            if transaction.is_satisfied(&self.players[index]) {
                let description = match transaction.target() {
                    AcquisitionTarget::Route(id) => format!(
                        "{} captured the route {} ({} points).",
                        self.players[index].name(),
                        self.catalog.route_name(id),
                        self.catalog.route(id).score()
                    ),
                    AcquisitionTarget::Port(city) => format!(
                        "{} built a port at {}.",
                        self.players[index].name(),
                        self.catalog.city(city).name
                    ),
                };

                return match transaction.commit(
                    &self.catalog,
                    &mut self.board,
                    &mut self.players[index],
                    &mut self.land_supply,
                    &mut self.sea_supply,
                ) {
                    Ok(()) => {
                        self.log_line(description);
                        Ok(())
                    }
                    Err(message) => {
                        self.players[index].unstage_all();
                        Err(message)
                    }
                };
            }

            let labels = transaction.stageable_labels(&self.players[index]);
            if labels.is_empty() {
                transaction.abort(&mut self.players[index]);
                return Err(String::from(
                    "No remaining card can complete the payment.",
                ));
            }

            let options: Vec<String> = labels
                .iter()
                .map(|label| format!("card:{}", label))
                .collect();
            match self.choose(
                index,
                String::from("Select a card to pay with, or pass to cancel."),
                options,
                true,
            ) {
                Some(choice) => {
                    let label = &choice["card:".len()..];
                    if let Err(message) = transaction.stage(&mut self.players[index], label) {
                        debug!("could not stage {}: {}", label, message);
                    }
                }
                None => {
                    transaction.abort(&mut self.players[index]);
                    return Err(String::from("The acquisition was cancelled."));
                }
            }
        }
    }

    // Decision protocol.

    /// Emits a prompt and blocks until a legal answer arrives. An invalid
    /// selection re-issues the same prompt; it is never fatal. Returns
    /// `None` on a pass (where allowed) or a cancelled exchange.
    fn choose(
        &mut self,
        index: usize,
        instruction: String,
        options: Vec<String>,
        can_pass: bool,
    ) -> Option<String> {
        let prompt = Prompt {
            player: self.players[index].name().to_string(),
            instruction,
            options,
            can_pass,
        };

        loop {
            match self.decider.decide(&prompt) {
                Decision::Choice(choice) if prompt.options.contains(&choice) => {
                    return Some(choice)
                }
                Decision::Choice(choice) => {
                    debug!("invalid selection `{}`; re-issuing the prompt", choice);
                }
                Decision::Pass if can_pass => return None,
                Decision::Pass => {
                    debug!("pass is not allowed here; re-issuing the prompt");
                }
                Decision::Cancelled => return None,
            }
        }
    }

    // Bookkeeping.

    fn log_line(&mut self, line: String) {
        debug!("{}", line);
        self.log.push(line);
    }

    fn publish_state(&mut self) {
        if self.observer.is_none() {
            return;
        }

        let state = self.state();
        if let Some(observer) = self.observer.as_mut() {
            observer.state_changed(&state);
        }
    }

    fn player_name(&self, player_id: usize) -> String {
        self.players
            .iter()
            .find(|player| player.id() == player_id)
            .map(|player| player.name().to_string())
            .unwrap_or_else(|| format!("Player {}", player_id))
    }

    // End of game.

    fn finish(&mut self) -> Vec<ScoreBreakdown> {
        self.current_player = None;

        let scores = score::final_scores(&self.catalog, &self.board, &self.players);
        for breakdown in &scores {
            let line = format!(
                "{} finishes with {} points: {} captured, {} from destinations, \
                 {} in port bonuses, {} for unused port rights.",
                self.player_name(breakdown.player_id),
                breakdown.total,
                breakdown.capture,
                breakdown.destinations,
                breakdown.port_bonus,
                breakdown.unused_port_rights
            );
            self.log_line(line);
        }

        let winner_ids = score::winners(&scores);
        let best = scores
            .iter()
            .map(|breakdown| breakdown.total)
            .max()
            .unwrap_or(0);
        let winner_names: Vec<String> = winner_ids
            .iter()
            .map(|player_id| self.player_name(*player_id))
            .collect();
        let line = if winner_names.len() == 1 {
            format!(
                "{} wins the game with {} points!",
                winner_names[0], best
            )
        } else {
            // No tie-break rule exists; every tied player is reported.
            format!(
                "{} tie for the win with {} points.",
                winner_names.join(" and "),
                best
            )
        };
        self.log_line(line);

        self.publish_state();
        scores
    }
}
