use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Maximum number of cards offered face-up at a time.
pub const WINDOW_SIZE: usize = 6;
/// A visible window holding this many wildcards must be discarded and redrawn.
pub const WILDCARD_LIMIT: usize = 3;

/// The three families of transport cards.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardKind {
    Land,
    Sea,
    Wildcard,
}

/// The card palette. `Neutral` is reserved for wildcards, which match any
/// color during payment.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardColor {
    Black,
    Green,
    Purple,
    Red,
    White,
    Yellow,
    /// Only carried by wildcards.
    Neutral,
}

impl CardColor {
    /// Whether the current color is the neutral wildcard color.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        *self == CardColor::Neutral
    }

    /// Iterates over the six concrete palette colors, excluding `Neutral`.
    pub fn palette() -> impl Iterator<Item = CardColor> {
        CardColor::iter().filter(|color| !color.is_neutral())
    }
}

/// A single transport card. Cards are created once at setup and circulate
/// between supply, hand and discard for the whole game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    /// Unique across the whole deck; used as a stable identifier in prompts.
    pub id: u32,
    pub kind: CardKind,
    pub color: CardColor,
    /// Sea cards flagged as double are worth 2 payment units.
    pub double: bool,
    /// Whether the card can be spent toward port construction.
    pub anchor: bool,
}

impl Card {
    /// A land card of the given color.
    pub fn land(id: u32, color: CardColor, anchor: bool) -> Self {
        Self {
            id,
            kind: CardKind::Land,
            color,
            double: false,
            anchor,
        }
    }

    /// A sea card of the given color. Double sea cards carry no anchor.
    pub fn sea(id: u32, color: CardColor, double: bool) -> Self {
        Self {
            id,
            kind: CardKind::Sea,
            color,
            double,
            anchor: !double,
        }
    }

    /// A wildcard. Wildcards are neutral-colored and always anchored.
    pub fn wildcard(id: u32) -> Self {
        Self {
            id,
            kind: CardKind::Wildcard,
            color: CardColor::Neutral,
            double: false,
            anchor: true,
        }
    }

    /// Whether the card matches any color.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.kind == CardKind::Wildcard
    }

    /// How many payment units the card is worth toward a sea route.
    #[inline]
    pub fn units(&self) -> u8 {
        if self.double {
            2
        } else {
            1
        }
    }

    /// Stable identifier used in prompt option lists, e.g. `L12`, `S45`, `J3`.
    pub fn label(&self) -> String {
        let prefix = match self.kind {
            CardKind::Land => 'L',
            CardKind::Sea => 'S',
            CardKind::Wildcard => 'J',
        };
        format!("{}{}", prefix, self.id)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            CardKind::Wildcard => write!(f, "wildcard"),
            CardKind::Sea if self.double => write!(f, "{} double sea", self.color),
            CardKind::Sea => write!(f, "{} sea", self.color),
            CardKind::Land => write!(f, "{} land", self.color),
        }
    }
}

/// Public view of a supply, exposing pile sizes only.
#[derive(Debug, PartialEq, Serialize)]
pub struct SupplyState {
    pub family: CardKind,
    pub draw_pile_size: usize,
    pub discard_pile_size: usize,
}

/// Draw and discard piles for one card family (land or sea).
///
/// Shuffles are driven by a seeded RNG owned by the supply, so a game built
/// from a fixed seed replays identically.
///
/// # Example
/// ```
/// use rails_and_sails::card::{Card, CardColor, CardKind, CardSupply};
///
/// let cards = vec![Card::land(0, CardColor::Red, false)];
/// let mut supply = CardSupply::new(CardKind::Land, cards, 7);
///
/// assert!(supply.draw().is_some());
/// assert!(supply.draw().is_none());
/// ```
#[derive(Debug)]
pub struct CardSupply {
    family: CardKind,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: ChaCha8Rng,
}

impl CardSupply {
    /// Creates a supply for one card family, shuffling the given cards into
    /// the draw pile.
    pub fn new(family: CardKind, cards: Vec<Card>, seed: u64) -> Self {
        debug_assert!(family != CardKind::Wildcard, "wildcards live in the land supply");

        let mut supply = Self {
            family,
            draw_pile: cards,
            discard_pile: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        supply.draw_pile.shuffle(&mut supply.rng);
        supply
    }

    /// Removes and returns the top card of the draw pile.
    ///
    /// If the draw pile is empty but the discard pile is not, the discard
    /// pile is shuffled into the draw pile first. Returns `None` only when
    /// both piles are empty.
    pub fn draw(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return None;
            }

            debug!(
                "{} supply draw pile empty; reshuffling {} discarded cards",
                self.family,
                self.discard_pile.len()
            );
            std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
            self.draw_pile.shuffle(&mut self.rng);
        }

        self.draw_pile.pop()
    }

    /// Appends a card to the discard pile.
    pub fn discard(&mut self, card: Card) {
        debug_assert!(
            self.accepts(&card),
            "discarded a {} card into the {} supply",
            card.kind,
            self.family
        );
        self.discard_pile.push(card);
    }

    /// Whether a card belongs to this supply's family. Wildcards belong to
    /// the land supply.
    pub fn accepts(&self, card: &Card) -> bool {
        match self.family {
            CardKind::Land => card.kind != CardKind::Sea,
            _ => card.kind == CardKind::Sea,
        }
    }

    /// True when no card can be drawn at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty() && self.discard_pile.is_empty()
    }

    /// Total number of cards currently held across both piles.
    #[inline]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Number of non-wildcard cards held across both piles.
    pub fn non_wildcard_len(&self) -> usize {
        self.draw_pile
            .iter()
            .chain(&self.discard_pile)
            .filter(|card| !card.is_wildcard())
            .count()
    }

    pub fn family(&self) -> CardKind {
        self.family
    }

    pub fn state(&self) -> SupplyState {
        SupplyState {
            family: self.family,
            draw_pile_size: self.draw_pile.len(),
            discard_pile_size: self.discard_pile.len(),
        }
    }

    /// Accessor to the draw pile.
    ///
    /// Should only be used for testing!
    pub fn get_draw_pile(&self) -> &Vec<Card> {
        &self.draw_pile
    }

    /// Mutable accessor to the draw pile.
    ///
    /// Should only be used for testing!
    pub fn get_mut_draw_pile(&mut self) -> &mut Vec<Card> {
        &mut self.draw_pile
    }

    /// Accessor to the discard pile.
    ///
    /// Should only be used for testing!
    pub fn get_discard_pile(&self) -> &Vec<Card> {
        &self.discard_pile
    }

    /// Mutable accessor to the discard pile.
    ///
    /// Should only be used for testing!
    pub fn get_mut_discard_pile(&mut self) -> &mut Vec<Card> {
        &mut self.discard_pile
    }
}

/// The shared face-up offer pool, drawn from both supplies.
///
/// The window never offers three or more wildcards at a decision point: any
/// refill or take that leaves it over the limit triggers a full discard and
/// redraw, repeated until the window is legal or no legal window can be built
/// from the cards that remain.
#[derive(Debug, Default)]
pub struct VisibleWindow {
    cards: SmallVec<[Card; WINDOW_SIZE]>,
}

impl VisibleWindow {
    pub fn new() -> Self {
        Self {
            cards: SmallVec::new(),
        }
    }

    /// The currently offered cards, at most [`WINDOW_SIZE`] of them.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of wildcards currently offered.
    pub fn wildcard_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_wildcard()).count()
    }

    /// Fills the window up to [`WINDOW_SIZE`] cards, preferring an even split
    /// between the two supplies and leaning on whichever supply still has
    /// cards when the other runs short. Re-checks the wildcard limit.
    pub fn refill(&mut self, land: &mut CardSupply, sea: &mut CardSupply) {
        self.fill_from_supplies(land, sea);
        self.enforce_wildcard_limit(land, sea);
    }

    fn fill_from_supplies(&mut self, land: &mut CardSupply, sea: &mut CardSupply) {
        let want = WINDOW_SIZE - self.cards.len();
        let mut from_land = land.len().min(want / 2 + want % 2);
        let from_sea = sea.len().min(want - from_land);
        from_land = land.len().min(want - from_sea);

        for _ in 0..from_land {
            match land.draw() {
                Some(card) => self.cards.push(card),
                None => break,
            }
        }
        for _ in 0..from_sea {
            match sea.draw() {
                Some(card) => self.cards.push(card),
                None => break,
            }
        }
    }

    /// Takes the card at `index` out of the window.
    ///
    /// The freed slot is replaced with a single draw from the supply matching
    /// the taken card's family (falling back to the other supply when that
    /// one is exhausted), after which the wildcard limit is re-checked.
    ///
    /// Returns an `Err` if the index is out of bounds.
    pub fn take(
        &mut self,
        index: usize,
        land: &mut CardSupply,
        sea: &mut CardSupply,
    ) -> Result<Card, String> {
        if index >= self.cards.len() {
            return Err(format!(
                "Card looked up at index {} is out of bounds (size {}).",
                index,
                self.cards.len()
            ));
        }

        let taken = self.cards.remove(index);

        let replacement = if taken.kind == CardKind::Sea {
            sea.draw().or_else(|| land.draw())
        } else {
            land.draw().or_else(|| sea.draw())
        };
        if let Some(card) = replacement {
            self.cards.push(card);
        }

        self.enforce_wildcard_limit(land, sea);

        Ok(taken)
    }

    /// Returns every offered card to its originating supply's discard pile.
    pub fn discard_all(&mut self, land: &mut CardSupply, sea: &mut CardSupply) {
        for card in self.cards.drain(..) {
            if card.kind == CardKind::Sea {
                sea.discard(card);
            } else {
                land.discard(card);
            }
        }
    }

    /// While the window offers [`WILDCARD_LIMIT`] or more wildcards, discards
    /// the whole window back to the supplies and redraws it.
    ///
    /// The loop only runs while the window and supplies jointly hold enough
    /// non-wildcard cards for a legal window to exist at all; without that
    /// guard a wildcard-heavy endgame would recycle the same cards forever.
    ///
    /// Returns whether at least one purge happened.
    pub fn enforce_wildcard_limit(&mut self, land: &mut CardSupply, sea: &mut CardSupply) -> bool {
        let mut purged = false;

        while self.wildcard_count() >= WILDCARD_LIMIT {
            if !self.purge_can_succeed(land, sea) {
                debug!(
                    "leaving the visible window over the wildcard limit: \
                     not enough non-wildcard cards remain"
                );
                break;
            }

            debug!("visible window holds {} wildcards; redrawing", self.wildcard_count());
            self.discard_all(land, sea);
            self.fill_from_supplies(land, sea);
            purged = true;
        }

        purged
    }

    fn purge_can_succeed(&self, land: &CardSupply, sea: &CardSupply) -> bool {
        let total = self.cards.len() + land.len() + sea.len();
        let non_wild = self
            .cards
            .iter()
            .filter(|card| !card.is_wildcard())
            .count()
            + land.non_wildcard_len()
            + sea.non_wildcard_len();

        // A redrawn window holds min(total, WINDOW_SIZE) cards; a legal one
        // needs all but WILDCARD_LIMIT - 1 of them to be non-wildcards.
        non_wild >= total.min(WINDOW_SIZE).saturating_sub(WILDCARD_LIMIT - 1)
    }

    /// Mutable accessor to the offered cards.
    ///
    /// Should only be used for testing!
    pub fn get_mut_cards(&mut self) -> &mut SmallVec<[Card; WINDOW_SIZE]> {
        &mut self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    // Tests for `CardColor` and `CardKind`.

    #[test]
    fn card_color_to_string() {
        assert_eq!(CardColor::Purple.to_string(), "purple");
        assert_eq!(CardColor::Neutral.to_string(), "neutral");
    }

    #[test]
    fn card_color_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&CardColor::Black)?, r#""black""#);
        assert_eq!(serde_json::to_string(&CardColor::Yellow)?, r#""yellow""#);
        Ok(())
    }

    #[test]
    fn json_to_card_color() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::from_str::<CardColor>(r#""green""#)?,
            CardColor::Green
        );
        assert_eq!(
            serde_json::from_str::<CardColor>(r#""neutral""#)?,
            CardColor::Neutral
        );
        Ok(())
    }

    #[test]
    fn invalid_json_to_card_color() {
        assert!(serde_json::from_str::<CardColor>(r#""turquoise""#).is_err());
    }

    #[test]
    fn palette_excludes_neutral() {
        let palette: Vec<CardColor> = CardColor::palette().collect();
        assert_eq!(palette.len(), 6);
        assert!(!palette.contains(&CardColor::Neutral));
    }

    #[test]
    fn card_kind_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&CardKind::Sea)?, r#""sea""#);
        assert_eq!(serde_json::to_string(&CardKind::Wildcard)?, r#""wildcard""#);
        Ok(())
    }

    // Tests for `Card`.

    #[test]
    fn card_units() {
        assert_eq!(Card::land(0, CardColor::Red, false).units(), 1);
        assert_eq!(Card::sea(1, CardColor::Red, false).units(), 1);
        assert_eq!(Card::sea(2, CardColor::Red, true).units(), 2);
        assert_eq!(Card::wildcard(3).units(), 1);
    }

    #[test]
    fn card_anchors() {
        assert!(Card::land(0, CardColor::Red, true).anchor);
        assert!(!Card::land(1, CardColor::Red, false).anchor);
        // Single sea cards are anchored, doubles are not.
        assert!(Card::sea(2, CardColor::Red, false).anchor);
        assert!(!Card::sea(3, CardColor::Red, true).anchor);
        assert!(Card::wildcard(4).anchor);
    }

    #[test]
    fn card_labels() {
        assert_eq!(Card::land(12, CardColor::Red, false).label(), "L12");
        assert_eq!(Card::sea(45, CardColor::Green, true).label(), "S45");
        assert_eq!(Card::wildcard(3).label(), "J3");
    }

    #[test]
    fn card_display() {
        assert_eq!(Card::land(0, CardColor::Red, false).to_string(), "red land");
        assert_eq!(
            Card::sea(1, CardColor::Green, true).to_string(),
            "green double sea"
        );
        assert_eq!(Card::wildcard(2).to_string(), "wildcard");
    }

    // Tests for `CardSupply`.

    fn land_cards(n: u32) -> Vec<Card> {
        (0..n).map(|id| Card::land(id, CardColor::Red, false)).collect()
    }

    fn sea_cards(n: u32) -> Vec<Card> {
        (0..n)
            .map(|id| Card::sea(100 + id, CardColor::Green, false))
            .collect()
    }

    #[test]
    fn supply_draw_until_empty() {
        let mut supply = CardSupply::new(CardKind::Land, land_cards(3), 1);

        assert_eq!(supply.len(), 3);
        for _ in 0..3 {
            assert!(supply.draw().is_some());
        }
        assert!(supply.draw().is_none());
        assert!(supply.is_empty());
    }

    #[test]
    fn supply_reshuffles_discard_pile_on_empty_draw_pile() {
        let mut supply = CardSupply::new(CardKind::Land, Vec::new(), 1);
        supply.discard(Card::land(0, CardColor::Red, false));
        supply.discard(Card::land(1, CardColor::Black, false));
        supply.discard(Card::wildcard(2));

        assert!(supply.get_draw_pile().is_empty());
        assert_eq!(supply.get_discard_pile().len(), 3);

        assert!(supply.draw().is_some());
        assert_eq!(supply.get_draw_pile().len(), 2);
        assert!(supply.get_discard_pile().is_empty());
    }

    #[test]
    fn supply_conserves_cards() {
        let mut supply = CardSupply::new(CardKind::Land, land_cards(10), 3);
        let mut in_hand = Vec::new();

        for _ in 0..6 {
            in_hand.push(supply.draw().unwrap());
        }
        for card in in_hand.drain(..3) {
            supply.discard(card);
        }

        assert_eq!(supply.len() + in_hand.len(), 10);
    }

    #[test]
    fn supply_same_seed_same_order() {
        let first: Vec<Card> = {
            let mut supply = CardSupply::new(CardKind::Land, land_cards(20), 42);
            (0..20).map(|_| supply.draw().unwrap()).collect()
        };
        let second: Vec<Card> = {
            let mut supply = CardSupply::new(CardKind::Land, land_cards(20), 42);
            (0..20).map(|_| supply.draw().unwrap()).collect()
        };

        assert_eq!(first, second);
    }

    #[test]
    fn supply_accepts_by_family() {
        let land_supply = CardSupply::new(CardKind::Land, Vec::new(), 1);
        assert!(land_supply.accepts(&Card::land(0, CardColor::Red, false)));
        assert!(land_supply.accepts(&Card::wildcard(1)));
        assert!(!land_supply.accepts(&Card::sea(2, CardColor::Red, false)));

        let sea_supply = CardSupply::new(CardKind::Sea, Vec::new(), 1);
        assert!(sea_supply.accepts(&Card::sea(2, CardColor::Red, false)));
        assert!(!sea_supply.accepts(&Card::land(0, CardColor::Red, false)));
        assert!(!sea_supply.accepts(&Card::wildcard(1)));
    }

    #[test]
    fn supply_state() {
        let mut supply = CardSupply::new(CardKind::Sea, sea_cards(4), 1);
        let card = supply.draw().unwrap();
        supply.discard(card);

        assert_eq!(
            supply.state(),
            SupplyState {
                family: CardKind::Sea,
                draw_pile_size: 3,
                discard_pile_size: 1,
            }
        );
    }

    // Tests for `VisibleWindow`.

    #[test]
    fn window_refill_splits_evenly() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(10), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(10), 2);
        let mut window = VisibleWindow::new();

        window.refill(&mut land, &mut sea);

        assert_eq!(window.len(), WINDOW_SIZE);
        let land_count = window
            .cards()
            .iter()
            .filter(|card| card.kind == CardKind::Land)
            .count();
        assert_eq!(land_count, 3);
    }

    #[test]
    fn window_refill_leans_on_remaining_supply() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(1), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(10), 2);
        let mut window = VisibleWindow::new();

        window.refill(&mut land, &mut sea);

        assert_eq!(window.len(), WINDOW_SIZE);
        assert!(land.is_empty());
        assert_eq!(
            window
                .cards()
                .iter()
                .filter(|card| card.kind == CardKind::Sea)
                .count(),
            5
        );
    }

    #[test]
    fn window_refill_short_when_supplies_cannot_provide() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(2), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(2), 2);
        let mut window = VisibleWindow::new();

        window.refill(&mut land, &mut sea);

        assert_eq!(window.len(), 4);
        assert!(land.is_empty());
        assert!(sea.is_empty());
    }

    #[test]
    fn window_purges_three_wildcards() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(10), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(10), 2);
        let mut window = VisibleWindow::new();
        *window.get_mut_cards() = smallvec![
            Card::wildcard(200),
            Card::wildcard(201),
            Card::wildcard(202),
            Card::land(203, CardColor::Black, false),
            Card::sea(204, CardColor::Red, false),
            Card::sea(205, CardColor::Green, false),
        ];

        assert!(window.enforce_wildcard_limit(&mut land, &mut sea));

        assert_eq!(window.len(), WINDOW_SIZE);
        assert!(window.wildcard_count() < WILDCARD_LIMIT);
        // The six previous cards were returned to the supplies' discard piles.
        assert_eq!(land.get_discard_pile().len(), 4);
        assert_eq!(sea.get_discard_pile().len(), 2);
    }

    #[test]
    fn window_keeps_two_wildcards() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(10), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(10), 2);
        let mut window = VisibleWindow::new();
        let cards = smallvec![
            Card::wildcard(200),
            Card::wildcard(201),
            Card::land(202, CardColor::Black, false),
            Card::sea(203, CardColor::Red, false),
        ];
        *window.get_mut_cards() = cards;

        assert!(!window.enforce_wildcard_limit(&mut land, &mut sea));
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn window_purge_stops_when_only_wildcards_remain() {
        let wilds: Vec<Card> = (0..4).map(Card::wildcard).collect();
        let mut land = CardSupply::new(CardKind::Land, wilds, 1);
        let mut sea = CardSupply::new(CardKind::Sea, Vec::new(), 2);
        let mut window = VisibleWindow::new();
        *window.get_mut_cards() = smallvec![
            Card::wildcard(200),
            Card::wildcard(201),
            Card::wildcard(202),
            Card::land(203, CardColor::Black, false),
        ];

        // No legal window can be built; the purge must terminate and leave
        // the window as-is rather than cycle forever.
        assert!(!window.enforce_wildcard_limit(&mut land, &mut sea));
        assert_eq!(window.wildcard_count(), 3);
    }

    #[test]
    fn window_take_replaces_from_matching_supply() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(5), 1);
        let mut sea = CardSupply::new(CardKind::Sea, sea_cards(5), 2);
        let mut window = VisibleWindow::new();
        *window.get_mut_cards() = smallvec![
            Card::sea(200, CardColor::Red, false),
            Card::land(201, CardColor::Black, false),
        ];

        let taken = window.take(0, &mut land, &mut sea).unwrap();
        assert_eq!(taken.id, 200);
        assert_eq!(window.len(), 2);
        assert_eq!(sea.len(), 4);
        assert_eq!(land.len(), 5);
    }

    #[test]
    fn window_take_falls_back_to_other_supply() {
        let mut land = CardSupply::new(CardKind::Land, land_cards(5), 1);
        let mut sea = CardSupply::new(CardKind::Sea, Vec::new(), 2);
        let mut window = VisibleWindow::new();
        *window.get_mut_cards() = smallvec![Card::sea(200, CardColor::Red, false)];

        assert!(window.take(0, &mut land, &mut sea).is_ok());
        assert_eq!(window.len(), 1);
        assert_eq!(window.cards()[0].kind, CardKind::Land);
    }

    #[test]
    fn window_take_out_of_bounds() {
        let mut land = CardSupply::new(CardKind::Land, Vec::new(), 1);
        let mut sea = CardSupply::new(CardKind::Sea, Vec::new(), 2);
        let mut window = VisibleWindow::new();

        assert!(window.take(0, &mut land, &mut sea).is_err());
    }

    #[test]
    fn window_take_leaves_slot_unfilled_when_supplies_empty() {
        let mut land = CardSupply::new(CardKind::Land, Vec::new(), 1);
        let mut sea = CardSupply::new(CardKind::Sea, Vec::new(), 2);
        let mut window = VisibleWindow::new();
        *window.get_mut_cards() = smallvec![
            Card::land(200, CardColor::Black, false),
            Card::sea(201, CardColor::Red, false),
        ];

        assert!(window.take(1, &mut land, &mut sea).is_ok());
        assert_eq!(window.len(), 1);
    }
}
