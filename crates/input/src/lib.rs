//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into abstract [`Action`](crate::types::Action)
//! values for a given game, keeping a board cursor for the games whose
//! actions name a cell.

pub mod cursor;
pub mod map;

pub use grid_arcade_types as types;

pub use cursor::Cursor;
pub use map::{should_quit, KeyMap};
