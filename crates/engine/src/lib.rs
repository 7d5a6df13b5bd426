//! Engines that drive a [`Game`](crate::core::Game) round.
//!
//! - [`TickEngine`]: Snake and Tetris advance once per fixed quantum whether
//!   or not input arrived
//! - [`TurnEngine`]: the other games advance only on actions
//!
//! Both consume [`Action::Quit`](crate::types::Action::Quit) by raising the
//! shared [`QuitSignal`], which they check at every tick/turn boundary. The
//! [`Engine`] enum picks the right driver from the game's discipline.

pub mod quit;
pub mod tick;
pub mod turn;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use quit::QuitSignal;
pub use tick::{InputBuffer, TickEngine, TickReport};
pub use turn::TurnEngine;

use std::time::Duration;

use crate::core::{ArcadeConfig, Game, GameResult, GameRules, RandomSource};
use crate::types::{Action, Discipline, StepResult};

#[derive(Debug)]
pub enum Engine<R> {
    Tick(TickEngine<R>),
    Turn(TurnEngine<R>),
}

impl<R: RandomSource> Engine<R> {
    /// Wrap `game` in the driver its kind calls for.
    pub fn for_game(game: Game<R>, config: &ArcadeConfig, quit: QuitSignal) -> Self {
        let kind = game.kind();
        match kind.discipline() {
            Discipline::Tick => {
                let tick_ms = config.tick_ms(kind).unwrap_or(types::SNAKE_TICK_MS);
                Engine::Tick(TickEngine::new(game, tick_ms, quit))
            }
            Discipline::Turn => Engine::Turn(TurnEngine::new(game, quit)),
        }
    }

    pub fn game(&self) -> &Game<R> {
        match self {
            Engine::Tick(e) => e.game(),
            Engine::Turn(e) => e.game(),
        }
    }

    pub fn quit_signal(&self) -> &QuitSignal {
        match self {
            Engine::Tick(e) => e.quit_signal(),
            Engine::Turn(e) => e.quit_signal(),
        }
    }

    pub fn step(&mut self, action: Action) -> GameResult<Option<StepResult>> {
        match self {
            Engine::Tick(e) => e.step(action),
            Engine::Turn(e) => e.step(action),
        }
    }

    /// Advance time. Turn engines ignore the clock.
    pub fn advance(&mut self, elapsed_ms: u64) -> GameResult<TickReport> {
        match self {
            Engine::Tick(e) => e.advance(elapsed_ms),
            Engine::Turn(_) => Ok(TickReport::default()),
        }
    }

    /// How long the frontend may wait for input: the time left in the
    /// current quantum, or `None` to block until a key arrives.
    pub fn poll_timeout(&self) -> Option<Duration> {
        match self {
            Engine::Tick(e) => Some(Duration::from_millis(e.time_to_next_tick_ms())),
            Engine::Turn(_) => None,
        }
    }

    /// Quit was requested or the round reached a terminal status.
    pub fn is_finished(&self) -> bool {
        self.quit_signal().is_raised() || self.game().status().is_terminal()
    }
}
