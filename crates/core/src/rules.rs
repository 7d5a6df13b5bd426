//! The uniform state-machine contract every game implements.

use crate::error::GameResult;
use crate::grid::GridModel;
use crate::types::{Action, Cell, GameKind, GameStatus, Rejection, StepResult};

/// A single round of one game.
///
/// A round is mutated only through [`apply`](GameRules::apply) and, for
/// tick-driven games, [`tick`](GameRules::tick). Rule violations come back as
/// rejected [`StepResult`]s with the state untouched; `Err` is reserved for
/// out-of-range coordinates and random source failures, and is raised before
/// anything is written.
pub trait GameRules {
    fn kind(&self) -> GameKind;

    fn apply(&mut self, action: Action) -> GameResult<StepResult>;

    /// Advance one time quantum. Turn-driven games do not tick.
    fn tick(&mut self) -> GameResult<StepResult> {
        Ok(StepResult::rejected(Rejection::Unsupported))
    }

    fn status(&self) -> GameStatus;

    fn score(&self) -> u32;

    /// Owned render snapshot; mutating it never touches the round.
    fn view(&self) -> GridModel<Cell>;

    /// One-line status text for the HUD (attempts left, mines, turn...).
    fn summary(&self) -> String {
        String::new()
    }
}

/// Rejection to return when a finished round is asked to change.
pub(crate) fn terminal_guard(status: GameStatus) -> Option<StepResult> {
    if status.is_terminal() {
        Some(StepResult::rejected(Rejection::TerminalState))
    } else {
        None
    }
}

/// Move `status` to `next`, logging the transition. Returns whether it changed.
pub(crate) fn transition(kind: GameKind, status: &mut GameStatus, next: GameStatus) -> bool {
    if *status == next {
        return false;
    }
    tracing::info!(game = kind.as_str(), from = status.as_str(), to = next.as_str(), "round status changed");
    *status = next;
    true
}

pub(crate) fn log_rejected(kind: GameKind, action: Action, reason: Rejection) -> StepResult {
    tracing::trace!(game = kind.as_str(), action = action.name(), ?reason, "action rejected");
    StepResult::rejected(reason)
}
