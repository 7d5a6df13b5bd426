//! Error taxonomy for the game core.
//!
//! Expected rule violations (a repeated guess, a reversal into the snake's
//! neck) are not errors: they come back as a rejected [`StepResult`]. `Err`
//! is reserved for coordinates outside the grid, broken configuration and a
//! random source that cannot answer.
//!
//! [`StepResult`]: crate::types::StepResult

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("invalid action: {0}")]
    InvalidAction(&'static str),

    #[error("round is already over")]
    TerminalStateViolation,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("empty random range {low}..={high}")]
    EmptyRange { low: i32, high: i32 },

    #[error("random source exhausted")]
    RandomExhausted,
}

pub type GameResult<T> = Result<T, GameError>;
