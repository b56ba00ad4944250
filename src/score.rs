//! The end-of-game scoring pass: destination contributions, port bonuses
//! and penalties, layered on top of the score accumulated during play.

use crate::board::Board;
use crate::catalog::Catalog;
use crate::player::Player;

use serde::Serialize;

/// Bonus for a port touched by 1, 2, or 3-or-more completed destinations.
pub const PORT_BONUS: [i32; 3] = [20, 30, 40];
/// Points lost per port-building right left unused at game end.
pub const UNUSED_PORT_RIGHT_PENALTY: i32 = 4;

/// One player's final score, split by source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub player_id: usize,
    /// The running score accumulated during play: captured route values,
    /// minus token-exchange costs.
    pub capture: i32,
    /// Completed destinations add their value, incomplete ones subtract
    /// their penalty.
    pub destinations: i32,
    /// Port-connectivity bonuses.
    pub port_bonus: i32,
    /// Penalty for unused port-building rights; zero or negative.
    pub unused_port_rights: i32,
    pub total: i32,
}

/// Computes one player's final score.
pub fn final_score(catalog: &Catalog, board: &Board, player: &Player) -> ScoreBreakdown {
    let capture = player.score();

    let mut destinations = 0;
    for id in player.destinations() {
        let destination = catalog.destination(*id);
        if board.is_destination_complete(catalog, player.id(), *id) {
            destinations += i32::from(destination.value_when_complete());
        } else {
            destinations -= i32::from(destination.penalty());
        }
    }

    let mut port_bonus = 0;
    for city in player.ports() {
        let touching = player
            .destinations()
            .iter()
            .filter(|id| {
                catalog.destination(**id).cities().contains(city)
                    && board.is_destination_complete(catalog, player.id(), **id)
            })
            .count();

        port_bonus += match touching {
            0 => 0,
            1 => PORT_BONUS[0],
            2 => PORT_BONUS[1],
            _ => PORT_BONUS[2],
        };
    }

    let unused_port_rights = -UNUSED_PORT_RIGHT_PENALTY * i32::from(player.port_rights());

    ScoreBreakdown {
        player_id: player.id(),
        capture,
        destinations,
        port_bonus,
        unused_port_rights,
        total: capture + destinations + port_bonus + unused_port_rights,
    }
}

/// Computes every player's final score, in the given order.
pub fn final_scores(catalog: &Catalog, board: &Board, players: &[Player]) -> Vec<ScoreBreakdown> {
    players
        .iter()
        .map(|player| final_score(catalog, board, player))
        .collect()
}

/// The ids of every player sharing the maximal final score.
///
/// No tie-break rule is defined by the game; callers receive the full set
/// of tied players and decide for themselves.
pub fn winners(scores: &[ScoreBreakdown]) -> Vec<usize> {
    let best = match scores.iter().map(|score| score.total).max() {
        Some(best) => best,
        None => return Vec::new(),
    };

    scores
        .iter()
        .filter(|score| score.total == best)
        .map(|score| score.player_id)
        .collect()
}
