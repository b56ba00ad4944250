//! The payment-eligibility resolver: pure, mutation-free queries deciding
//! which card combinations legally pay for a route or a port.
//!
//! [`feasible_colors`] filters the menu of legal targets before they are
//! offered to a player; [`covers`] validates a committed staging area under
//! the exact-amount rule. Both answer from a hand slice and never touch
//! shared state.

use crate::card::{Card, CardColor, CardKind};
use crate::catalog::{Route, RouteKind};

use smallvec::SmallVec;

/// Building a port always costs exactly four anchored cards.
pub const PORT_CARD_COUNT: usize = 4;

/// The valid port payments, as `(wildcards, land anchors, sea anchors)`
/// counts. Any other distribution of four anchored cards is infeasible.
const PORT_LAYOUTS: [(u8, u8, u8); 9] = [
    (4, 0, 0),
    (3, 1, 0),
    (3, 0, 1),
    (2, 2, 0),
    (2, 0, 2),
    (2, 1, 1),
    (1, 2, 1),
    (1, 1, 2),
    (0, 2, 2),
];

/// What a cost is paid with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CostKind {
    /// Single land cards of one color.
    Land,
    /// Sea cards of one color; doubles are worth two units.
    Sea,
    /// Same-color land card pairs; a wildcard may complete an unmatched card.
    Paired,
    /// Exactly four anchored cards of one committed color.
    Port,
}

/// A cost specification: what kind of payment, in which color (or any), and
/// how many units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cost {
    pub kind: CostKind,
    /// `None` means every palette color is tried independently.
    pub color: Option<CardColor>,
    /// Route length, or pair count for paired routes. Fixed at 4 for ports.
    pub units: u8,
}

impl Cost {
    /// The cost of capturing the given route.
    pub fn for_route(route: &Route) -> Self {
        let kind = match route.kind() {
            RouteKind::Land => CostKind::Land,
            RouteKind::Sea => CostKind::Sea,
            RouteKind::Paired => CostKind::Paired,
        };
        Self {
            kind,
            color: route.color(),
            units: route.length(),
        }
    }

    /// The fixed cost of building a port.
    pub fn port() -> Self {
        Self {
            kind: CostKind::Port,
            color: None,
            units: PORT_CARD_COUNT as u8,
        }
    }
}

/// The set of concrete colors for which the hand holds a valid payment.
///
/// For a cost bound to one color the result is that color or nothing; for
/// an any-color cost every palette color is tried independently, with the
/// uniform-color constraint applying per attempt.
pub fn feasible_colors(cost: &Cost, hand: &[Card]) -> SmallVec<[CardColor; 6]> {
    match cost.color {
        Some(color) => {
            if color_is_feasible(cost, color, hand) {
                smallvec![color]
            } else {
                SmallVec::new()
            }
        }
        None => CardColor::palette()
            .filter(|color| color_is_feasible(cost, *color, hand))
            .collect(),
    }
}

/// Whether the hand can pay the cost committed to the single color `color`.
pub fn color_is_feasible(cost: &Cost, color: CardColor, hand: &[Card]) -> bool {
    let wildcards = hand.iter().filter(|card| card.is_wildcard()).count() as u8;

    match cost.kind {
        CostKind::Land => {
            let matching = hand
                .iter()
                .filter(|card| card.kind == CardKind::Land && card.color == color)
                .count() as u8;
            matching + wildcards >= cost.units
        }
        CostKind::Sea => {
            let value: u8 = hand
                .iter()
                .filter(|card| card.kind == CardKind::Sea && card.color == color)
                .map(|card| card.units())
                .sum();
            value + wildcards >= cost.units
        }
        CostKind::Paired => {
            let matching = hand
                .iter()
                .filter(|card| card.kind == CardKind::Land && card.color == color)
                .count() as u8;

            let mut pairs = matching / 2;
            let mut wildcards = wildcards;
            if matching % 2 == 1 && wildcards > 0 {
                // A lone card completed by a wildcard.
                pairs += 1;
                wildcards -= 1;
            }
            pairs += wildcards / 2;

            pairs >= cost.units
        }
        CostKind::Port => {
            let land_anchors = hand
                .iter()
                .filter(|card| card.kind == CardKind::Land && card.anchor && card.color == color)
                .count() as u8;
            let sea_anchors = hand
                .iter()
                .filter(|card| card.kind == CardKind::Sea && card.anchor && card.color == color)
                .count() as u8;

            PORT_LAYOUTS.iter().any(|(wild, land, sea)| {
                *wild <= wildcards && *land <= land_anchors && *sea <= sea_anchors
            })
        }
    }
}

/// Validates a committed staging area under the exact-amount rule:
///
/// * land: exactly `units` matching cards;
/// * paired: exactly `units` same-color pairs (wildcards complete);
/// * sea: payment value at least `units`, with no superfluous card. A
///   double may overshoot the requirement, but a card whose removal still
///   pays is rejected;
/// * port: exactly four anchored cards in one of the valid distributions.
///
/// The committed color is the cost's color or, for an any-color cost, the
/// color shared by the staged non-wildcards.
pub fn covers(cost: &Cost, staged: &[Card]) -> bool {
    // All staged non-wildcards must agree on one color.
    let mut committed = cost.color;
    for card in staged.iter().filter(|card| !card.is_wildcard()) {
        match committed {
            None => committed = Some(card.color),
            Some(color) if color != card.color => return false,
            _ => {}
        }
    }

    match cost.kind {
        CostKind::Land => {
            staged
                .iter()
                .all(|card| card.kind != CardKind::Sea)
                && staged.len() == cost.units as usize
        }
        CostKind::Paired => {
            staged
                .iter()
                .all(|card| card.kind != CardKind::Sea)
                && staged.len() == 2 * cost.units as usize
        }
        CostKind::Sea => {
            if staged.iter().any(|card| card.kind == CardKind::Land) {
                return false;
            }
            let value: u8 = staged.iter().map(|card| card.units()).sum();
            value >= cost.units && staged.iter().all(|card| value - card.units() < cost.units)
        }
        CostKind::Port => {
            if staged.len() != PORT_CARD_COUNT || staged.iter().any(|card| !card.anchor) {
                return false;
            }
            let wildcards = staged.iter().filter(|card| card.is_wildcard()).count() as u8;
            let land = staged
                .iter()
                .filter(|card| card.kind == CardKind::Land)
                .count() as u8;
            let sea = staged
                .iter()
                .filter(|card| card.kind == CardKind::Sea)
                .count() as u8;

            PORT_LAYOUTS.contains(&(wildcards, land, sea))
        }
    }
}

/// Whether adding `card` to the staging area keeps the payment well-formed.
///
/// This is a structural check used to build the card menu while a player
/// stages a payment one card at a time; it does not assert that the final
/// amount can still be reached.
pub fn stageable(cost: &Cost, staged: &[Card], card: &Card) -> bool {
    if !card.is_wildcard() {
        // The card must agree with the committed color, if any.
        let committed = cost.color.or_else(|| {
            staged
                .iter()
                .find(|staged_card| !staged_card.is_wildcard())
                .map(|staged_card| staged_card.color)
        });
        if let Some(color) = committed {
            if card.color != color {
                return false;
            }
        }
    }

    match cost.kind {
        CostKind::Land => card.kind != CardKind::Sea && staged.len() < cost.units as usize,
        CostKind::Paired => {
            card.kind != CardKind::Sea && staged.len() < 2 * cost.units as usize
        }
        CostKind::Sea => {
            let value: u8 = staged.iter().map(|staged_card| staged_card.units()).sum();
            card.kind != CardKind::Land && value < cost.units
        }
        CostKind::Port => {
            if !card.anchor || staged.len() >= PORT_CARD_COUNT {
                return false;
            }
            let of_kind = |kind: CardKind| {
                staged.iter().filter(|staged_card| staged_card.kind == kind).count()
                    + usize::from(card.kind == kind)
            };
            // No valid distribution holds more than two of either family.
            of_kind(CardKind::Land) <= 2 && of_kind(CardKind::Sea) <= 2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use CardColor::*;

    fn land(color: CardColor) -> Card {
        Card::land(0, color, false)
    }

    fn land_anchor(color: CardColor) -> Card {
        Card::land(0, color, true)
    }

    fn sea(color: CardColor) -> Card {
        Card::sea(0, color, false)
    }

    fn sea_double(color: CardColor) -> Card {
        Card::sea(0, color, true)
    }

    fn wild() -> Card {
        Card::wildcard(0)
    }

    // Tests for `feasible_colors`.

    #[test]
    fn land_route_feasible_colors() {
        // A length-3 red land route against two red cards, one wildcard and
        // a stray white card: only red can pay.
        let cost = Cost {
            kind: CostKind::Land,
            color: Some(Red),
            units: 3,
        };
        let hand = [land(Red), land(Red), wild(), land(White)];

        let feasible = feasible_colors(&cost, &hand);
        assert_eq!(feasible.as_slice(), &[Red]);
    }

    #[test]
    fn land_route_infeasible_when_short() {
        let cost = Cost {
            kind: CostKind::Land,
            color: Some(Red),
            units: 3,
        };
        let hand = [land(Red), land(White), land(White)];

        assert!(feasible_colors(&cost, &hand).is_empty());
    }

    #[test]
    fn any_color_route_tries_every_color() {
        let cost = Cost {
            kind: CostKind::Land,
            color: None,
            units: 2,
        };
        let hand = [land(Red), land(Red), land(Green), wild()];

        let feasible = feasible_colors(&cost, &hand);
        assert!(feasible.contains(&Red));
        assert!(feasible.contains(&Green));
        assert!(!feasible.contains(&White));
    }

    #[test]
    fn all_wildcard_hand_pays_any_color() {
        let cost = Cost {
            kind: CostKind::Land,
            color: None,
            units: 2,
        };
        let hand = [wild(), wild()];

        assert_eq!(feasible_colors(&cost, &hand).len(), 6);
    }

    #[test]
    fn sea_route_counts_doubles() {
        let cost = Cost {
            kind: CostKind::Sea,
            color: Some(Green),
            units: 4,
        };

        // 2 + 1 + 1 = 4 units.
        let hand = [sea_double(Green), sea(Green), wild()];
        assert!(!feasible_colors(&cost, &hand).is_empty());

        // Land cards of the right color do not pay sea routes.
        let hand = [land(Green), land(Green), land(Green), land(Green)];
        assert!(feasible_colors(&cost, &hand).is_empty());
    }

    #[test]
    fn paired_route_counts_pairs() {
        let cost = Cost {
            kind: CostKind::Paired,
            color: Some(Red),
            units: 2,
        };

        // Two natural pairs.
        assert!(color_is_feasible(&cost, Red, &[land(Red); 4]));
        // One natural pair, one lone card completed by a wildcard.
        assert!(color_is_feasible(
            &cost,
            Red,
            &[land(Red), land(Red), land(Red), wild()]
        ));
        // One natural pair plus a pair of wildcards.
        assert!(color_is_feasible(
            &cost,
            Red,
            &[land(Red), land(Red), wild(), wild()]
        ));
        // Three matching cards only make one pair and a lone card.
        assert!(!color_is_feasible(&cost, Red, &[land(Red); 3]));
    }

    #[test]
    fn port_feasibility_follows_layouts() {
        let cost = Cost::port();

        // Two land anchors and two sea anchors of one color.
        assert!(color_is_feasible(
            &cost,
            Red,
            &[land_anchor(Red), land_anchor(Red), sea(Red), sea(Red)]
        ));
        // Four wildcards.
        assert!(color_is_feasible(&cost, Red, &[wild(), wild(), wild(), wild()]));
        // Three land anchors cannot form any layout.
        assert!(!color_is_feasible(
            &cost,
            Red,
            &[land_anchor(Red), land_anchor(Red), land_anchor(Red), sea(Red)]
        ));
        // Anchors of mixed colors do not combine.
        assert!(!color_is_feasible(
            &cost,
            Red,
            &[land_anchor(Red), land_anchor(White), sea(Red), sea(Red)]
        ));
        // Plain cards carry no anchor.
        assert!(!color_is_feasible(
            &cost,
            Red,
            &[land(Red), land(Red), sea(Red), sea(Red)]
        ));
    }

    // Tests for `covers`.

    #[test]
    fn covers_land_exact_amount() {
        let cost = Cost {
            kind: CostKind::Land,
            color: Some(Red),
            units: 3,
        };

        assert!(covers(&cost, &[land(Red), land(Red), wild()]));
        // Too few and too many both fail.
        assert!(!covers(&cost, &[land(Red), land(Red)]));
        assert!(!covers(&cost, &[land(Red), land(Red), wild(), land(Red)]));
        // A color mismatch fails.
        assert!(!covers(&cost, &[land(Red), land(White), wild()]));
        // Sea cards cannot pay a land route.
        assert!(!covers(&cost, &[land(Red), land(Red), sea(Red)]));
    }

    #[test]
    fn covers_sea_allows_double_overshoot() {
        let cost = Cost {
            kind: CostKind::Sea,
            color: Some(Green),
            units: 3,
        };

        // 2 + 2 = 4 units for a length-3 route: the second double overshoots
        // by one, but removing either card would underpay.
        assert!(covers(&cost, &[sea_double(Green), sea_double(Green)]));
        // 2 + 1 + 1 = 4, but the single card is superfluous.
        assert!(!covers(&cost, &[sea_double(Green), sea(Green), sea(Green)]));
        // Exact value.
        assert!(covers(&cost, &[sea_double(Green), sea(Green)]));
        assert!(covers(&cost, &[sea(Green), sea(Green), wild()]));
        // Underpayment.
        assert!(!covers(&cost, &[sea_double(Green)]));
    }

    #[test]
    fn covers_paired_exact_pairs() {
        let cost = Cost {
            kind: CostKind::Paired,
            color: Some(Red),
            units: 2,
        };

        assert!(covers(&cost, &[land(Red), land(Red), land(Red), wild()]));
        assert!(covers(&cost, &[land(Red), land(Red), wild(), wild()]));
        assert!(!covers(&cost, &[land(Red), land(Red), land(Red)]));
        assert!(!covers(&cost, &[land(Red), land(White), wild(), wild()]));
    }

    #[test]
    fn covers_port_distributions() {
        let cost = Cost::port();

        assert!(covers(&cost, &[wild(), wild(), wild(), wild()]));
        assert!(covers(&cost, &[wild(), wild(), land_anchor(Red), sea(Red)]));
        assert!(covers(
            &cost,
            &[land_anchor(Red), land_anchor(Red), sea(Red), sea(Red)]
        ));
        assert!(covers(&cost, &[wild(), land_anchor(Red), sea(Red), sea(Red)]));

        // Three of one family never forms a valid distribution.
        assert!(!covers(
            &cost,
            &[land_anchor(Red), land_anchor(Red), land_anchor(Red), wild()]
        ));
        assert!(!covers(&cost, &[sea(Red), sea(Red), sea(Red), wild()]));
        // Five cards, or any unanchored card, fail outright.
        assert!(!covers(
            &cost,
            &[wild(), wild(), wild(), wild(), land_anchor(Red)]
        ));
        assert!(!covers(&cost, &[wild(), wild(), wild(), land(Red)]));
        // Mixed colors fail.
        assert!(!covers(
            &cost,
            &[land_anchor(Red), land_anchor(White), sea(Red), sea(Red)]
        ));
    }

    // Tests for `stageable`.

    #[test]
    fn stageable_respects_committed_color() {
        let cost = Cost {
            kind: CostKind::Land,
            color: None,
            units: 3,
        };
        let staged = [land(Red)];

        assert!(stageable(&cost, &staged, &land(Red)));
        assert!(stageable(&cost, &staged, &wild()));
        assert!(!stageable(&cost, &staged, &land(White)));
        assert!(!stageable(&cost, &staged, &sea(Red)));
    }

    #[test]
    fn stageable_caps_card_count() {
        let cost = Cost {
            kind: CostKind::Land,
            color: Some(Red),
            units: 2,
        };
        let staged = [land(Red), land(Red)];

        assert!(!stageable(&cost, &staged, &land(Red)));
    }

    #[test]
    fn stageable_sea_stops_at_value() {
        let cost = Cost {
            kind: CostKind::Sea,
            color: Some(Green),
            units: 3,
        };

        assert!(stageable(&cost, &[sea_double(Green)], &sea_double(Green)));
        assert!(!stageable(
            &cost,
            &[sea_double(Green), sea(Green)],
            &sea(Green)
        ));
    }

    #[test]
    fn stageable_port_caps_families() {
        let cost = Cost::port();
        let staged = [land_anchor(Red), land_anchor(Red)];

        assert!(!stageable(&cost, &staged, &land_anchor(Red)));
        assert!(stageable(&cost, &staged, &sea(Red)));
        assert!(stageable(&cost, &staged, &wild()));
        assert!(!stageable(&cost, &staged, &land(Red)));
    }

    // Resolver soundness: whenever a color is reported feasible, a concrete
    // staged subset of the hand passes the exact-amount check.

    fn arbitrary_card() -> impl Strategy<Value = Card> {
        prop_oneof![
            (0..6usize, any::<bool>()).prop_map(|(color, anchor)| {
                Card::land(0, palette_color(color), anchor)
            }),
            (0..6usize, any::<bool>()).prop_map(|(color, double)| {
                Card::sea(0, palette_color(color), double)
            }),
            Just(Card::wildcard(0)),
        ]
    }

    fn palette_color(index: usize) -> CardColor {
        CardColor::palette().nth(index).unwrap()
    }

    fn greedy_payment(cost: &Cost, color: CardColor, hand: &[Card]) -> Vec<Card> {
        let mut staged = Vec::new();

        match cost.kind {
            CostKind::Land | CostKind::Paired => {
                let wanted = if cost.kind == CostKind::Land {
                    cost.units as usize
                } else {
                    2 * cost.units as usize
                };
                let matching = hand
                    .iter()
                    .filter(|card| card.kind == CardKind::Land && card.color == color);
                let wildcards = hand.iter().filter(|card| card.is_wildcard());
                staged.extend(matching.chain(wildcards).take(wanted).cloned());
            }
            CostKind::Sea => {
                // Doubles first: ending on a one-unit card always lands on the
                // exact value, and an all-doubles payment overshoots by at
                // most one, which the exact-amount rule allows.
                let doubles = hand
                    .iter()
                    .filter(|card| card.kind == CardKind::Sea && card.color == color && card.double);
                let singles = hand
                    .iter()
                    .filter(|card| {
                        card.kind == CardKind::Sea && card.color == color && !card.double
                    })
                    .chain(hand.iter().filter(|card| card.is_wildcard()));

                let mut value = 0;
                for card in doubles.chain(singles) {
                    if value >= cost.units {
                        break;
                    }
                    value += card.units();
                    staged.push(*card);
                }
            }
            CostKind::Port => unreachable!("the property only covers route costs"),
        }

        staged
    }

    proptest! {
        #[test]
        fn feasible_color_admits_concrete_payment(
            hand in proptest::collection::vec(arbitrary_card(), 2..16),
            kind in prop_oneof![
                Just(CostKind::Land),
                Just(CostKind::Sea),
                Just(CostKind::Paired)
            ],
            units in 1u8..4,
            color_index in 0..6usize,
        ) {
            let color = palette_color(color_index);
            let cost = Cost { kind, color: Some(color), units };

            prop_assume!(color_is_feasible(&cost, color, &hand));

            let staged = greedy_payment(&cost, color, &hand);
            prop_assert!(covers(&cost, &staged), "staged = {:?}", staged);
        }
    }
}
