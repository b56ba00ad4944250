use serde::Serialize;

/// Action points granted at the start of every turn.
pub const TURN_BUDGET: u8 = 2;

/// Everything a player can do with their turn. Used by the [`TurnEngine`]
/// to decide legality and budget consumption.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionKind {
    /// Blind draw from a supply's draw pile.
    DrawSupplyCard,
    /// Take a non-wildcard from the visible window.
    DrawVisibleCard,
    /// Take a wildcard from the visible window.
    DrawVisibleWildcard,
    CaptureRoute,
    BuildPort,
    DrawDestinations,
    ExchangeTokens,
    /// End the turn without doing anything.
    Pass,
}

/// The per-turn action-budget state machine.
///
/// A turn starts with two budget points. Drawing a card (blind, or a
/// non-wildcard from the window) costs one point. Every other action
/// (taking a visible wildcard, capturing a route, building a port, drawing
/// destinations, exchanging tokens) is only legal on an untouched budget
/// and consumes all of it. Passing is always legal and ends the turn.
///
/// An action attempted outside its legal budget state is rejected with an
/// `Err`; it never silently succeeds.
///
/// # Example
/// ```
/// use rails_and_sails::turn::{ActionKind, TurnEngine};
///
/// let mut turn = TurnEngine::new();
/// assert!(turn.apply(ActionKind::DrawSupplyCard).is_ok());
/// // A wildcard can no longer be taken this turn.
/// assert!(turn.apply(ActionKind::DrawVisibleWildcard).is_err());
/// assert!(turn.apply(ActionKind::DrawVisibleCard).is_ok());
/// assert!(turn.is_complete());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TurnEngine {
    budget: u8,
}

impl TurnEngine {
    pub fn new() -> Self {
        Self {
            budget: TURN_BUDGET,
        }
    }

    #[inline]
    pub fn budget(&self) -> u8 {
        self.budget
    }

    /// The turn ends once the budget is spent.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.budget == 0
    }

    /// Whether the action is legal in the current budget state.
    pub fn authorize(&self, action: ActionKind) -> Result<(), String> {
        match action {
            ActionKind::Pass => Ok(()),
            ActionKind::DrawSupplyCard | ActionKind::DrawVisibleCard => {
                if self.budget >= 1 {
                    Ok(())
                } else {
                    Err(String::from("The turn is already over."))
                }
            }
            _ if self.budget == TURN_BUDGET => Ok(()),
            ActionKind::DrawVisibleWildcard => Err(String::from(
                "Cannot take a wildcard from the window after having already drawn a card this turn.",
            )),
            ActionKind::CaptureRoute => Err(String::from(
                "Cannot capture a route after having already drawn a card this turn.",
            )),
            ActionKind::BuildPort => Err(String::from(
                "Cannot build a port after having already drawn a card this turn.",
            )),
            ActionKind::DrawDestinations => Err(String::from(
                "Cannot draw destination cards after having already drawn a card this turn.",
            )),
            ActionKind::ExchangeTokens => Err(String::from(
                "Cannot exchange tokens after having already drawn a card this turn.",
            )),
        }
    }

    /// Authorizes the action and consumes its budget.
    pub fn apply(&mut self, action: ActionKind) -> Result<(), String> {
        self.authorize(action)?;

        self.budget = match action {
            ActionKind::DrawSupplyCard | ActionKind::DrawVisibleCard => self.budget - 1,
            _ => 0,
        };
        Ok(())
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}
