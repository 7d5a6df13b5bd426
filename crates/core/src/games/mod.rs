//! The six hosted games, one module each.

pub mod battleship;
pub mod hangman;
pub mod minesweeper;
pub mod snake;
pub mod tetris;
pub mod twenty48;

pub use battleship::{place_fleet, AiGunner, Battleship, Player, Shot};
pub use hangman::Hangman;
pub use minesweeper::{adjacent_mines, Minesweeper};
pub use snake::Snake;
pub use tetris::{line_clear_score, Tetris};
pub use twenty48::{compact_left, slide, TwentyFortyEight};
