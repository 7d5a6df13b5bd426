//! Core game logic - pure, deterministic, and testable
//!
//! Six small grid games share one state-machine contract ([`GameRules`]) and
//! one bounded container ([`GridModel`]). Nothing in this crate performs I/O:
//! a round is created from a config section and a [`RandomSource`], mutated
//! through `apply`/`tick`, and observed through owned `view()` snapshots.
//!
//! - **Deterministic**: a seeded [`GameRng`] replays identical mine layouts,
//!   spawns and AI shots
//! - **Atomic steps**: random draws happen before a step commits, so an `Err`
//!   never leaves a grid half-updated
//! - **Uniform**: the frontend only ever holds a [`Game`]
//!
//! # Module Structure
//!
//! - [`grid`]: bounded 2D container, row removal, transpose/mirror helpers
//! - [`rng`]: injectable random sources (seeded ChaCha8, scripted)
//! - [`rules`]: the [`GameRules`] contract
//! - [`games`]: Snake, Tetris, 2048, Minesweeper, Hangman, Battleship
//! - [`game`]: the closed [`Game`] enum
//! - [`config`]: per-game configuration with JSON and env layering
//! - [`error`]: [`GameError`]
//!
//! # Example
//!
//! ```
//! use grid_arcade_core::{ArcadeConfig, Game, GameRng, GameRules};
//! use grid_arcade_core::types::{Action, Direction, GameKind, GameStatus};
//!
//! let config = ArcadeConfig::default();
//! let mut game = Game::new(GameKind::TwoZeroFourEight, &config, GameRng::new(12345)).unwrap();
//!
//! // A move either slides something (and spawns a tile) or is refused.
//! let step = game.apply(Action::Move(Direction::Left)).unwrap();
//! assert!(step.accepted || step.rejection.is_some());
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod games;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod rules;

pub use grid_arcade_types as types;

// Re-export commonly used types for convenience
pub use config::{
    ArcadeConfig, BattleshipConfig, BattleshipMode, HangmanConfig, MinesweeperConfig,
    SnakeConfig, TetrisConfig, TwentyFortyEightConfig,
};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use games::{adjacent_mines, compact_left};
pub use grid::GridModel;
pub use pieces::{get_shape, Tetromino};
pub use rng::{GameRng, RandomSource, ScriptedRandom};
pub use rules::GameRules;
