//! Action-driven driver for 2048, Minesweeper, Hangman and Battleship.

use crate::core::{Game, GameResult, GameRules, RandomSource};
use crate::types::{Action, StepResult};
use crate::QuitSignal;

#[derive(Debug)]
pub struct TurnEngine<R> {
    game: Game<R>,
    quit: QuitSignal,
    turns: u32,
}

impl<R: RandomSource> TurnEngine<R> {
    pub fn new(game: Game<R>, quit: QuitSignal) -> Self {
        Self {
            game,
            quit,
            turns: 0,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn quit_signal(&self) -> &QuitSignal {
        &self.quit
    }

    /// Accepted turns so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Apply one action. `None` once quit has been requested.
    pub fn step(&mut self, action: Action) -> GameResult<Option<StepResult>> {
        if action == Action::Quit {
            self.quit.raise();
        }
        if self.quit.is_raised() {
            return Ok(None);
        }
        let step = self.game.apply(action)?;
        if step.accepted {
            self.turns += 1;
        }
        Ok(Some(step))
    }
}
