//! Closed set of games behind one value.
//!
//! The frontend and the engines only ever hold a [`Game`]; the variant is
//! chosen once from a [`GameKind`] when the round is created.

use crate::config::ArcadeConfig;
use crate::error::GameResult;
use crate::games::{Battleship, Hangman, Minesweeper, Snake, Tetris, TwentyFortyEight};
use crate::grid::GridModel;
use crate::rng::{GameRng, RandomSource};
use crate::rules::GameRules;
use crate::types::{Action, Cell, GameKind, GameStatus, StepResult};

#[derive(Debug, Clone)]
pub enum Game<R = GameRng> {
    Snake(Snake<R>),
    Tetris(Tetris<R>),
    TwentyFortyEight(TwentyFortyEight<R>),
    Minesweeper(Minesweeper),
    Hangman(Hangman),
    Battleship(Battleship<R>),
}

macro_rules! dispatch {
    ($game:expr, $g:ident => $body:expr) => {
        match $game {
            Game::Snake($g) => $body,
            Game::Tetris($g) => $body,
            Game::TwentyFortyEight($g) => $body,
            Game::Minesweeper($g) => $body,
            Game::Hangman($g) => $body,
            Game::Battleship($g) => $body,
        }
    };
}

impl<R: RandomSource> Game<R> {
    /// Start a round of `kind` using the matching section of `config`.
    pub fn new(kind: GameKind, config: &ArcadeConfig, rng: R) -> GameResult<Self> {
        config.validate(kind)?;
        let game = match kind {
            GameKind::Snake => Game::Snake(Snake::new(&config.snake, rng)?),
            GameKind::Tetris => Game::Tetris(Tetris::new(&config.tetris, rng)?),
            GameKind::TwoZeroFourEight => {
                Game::TwentyFortyEight(TwentyFortyEight::new(&config.twenty48, rng)?)
            }
            GameKind::Minesweeper => {
                Game::Minesweeper(Minesweeper::new(&config.minesweeper, rng)?)
            }
            GameKind::Hangman => Game::Hangman(Hangman::new(&config.hangman, rng)?),
            GameKind::Battleship => Game::Battleship(Battleship::new(&config.battleship, rng)?),
        };
        let view = game.view();
        tracing::info!(
            game = kind.as_str(),
            width = view.width(),
            height = view.height(),
            "round created"
        );
        Ok(game)
    }
}

impl<R: RandomSource> GameRules for Game<R> {
    fn kind(&self) -> GameKind {
        dispatch!(self, g => g.kind())
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        dispatch!(self, g => g.apply(action))
    }

    fn tick(&mut self) -> GameResult<StepResult> {
        dispatch!(self, g => g.tick())
    }

    fn status(&self) -> GameStatus {
        dispatch!(self, g => g.status())
    }

    fn score(&self) -> u32 {
        dispatch!(self, g => g.score())
    }

    fn view(&self) -> GridModel<Cell> {
        dispatch!(self, g => g.view())
    }

    fn summary(&self) -> String {
        dispatch!(self, g => g.summary())
    }
}
