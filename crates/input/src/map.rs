//! Key mapping from terminal events to game actions.
//!
//! Each game reads the keyboard a little differently:
//!
//! | Game | Keys |
//! |------|------|
//! | Snake, 2048 | arrows / WASD move |
//! | Tetris | Left/Right/Down (A/D/S) move, Up/W rotates |
//! | Minesweeper | arrows / WASD move the cursor, Enter/Space reveal, F flags |
//! | Battleship | arrows / WASD move the cursor, Enter/Space fire |
//! | Hangman | any letter guesses |
//!
//! Esc and Ctrl-C always quit; `Q` quits everywhere except Hangman, where it
//! is a guess.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cursor::Cursor;
use crate::types::{Action, Direction, GameKind};

/// Direction for arrow keys and WASD.
fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Check if key should quit the current game.
pub fn should_quit(kind: GameKind, key: KeyEvent) -> bool {
    let ctrl_c = matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL);
    let q = matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        && kind != GameKind::Hangman;
    key.code == KeyCode::Esc || ctrl_c || q
}

/// Translates key presses into actions for one game.
#[derive(Debug, Clone)]
pub struct KeyMap {
    kind: GameKind,
    cursor: Option<Cursor>,
}

impl KeyMap {
    /// `board` is the size of the board the cursor addresses, for the games
    /// that use one.
    pub fn new(kind: GameKind, board: (i32, i32)) -> Self {
        let cursor = kind.uses_cursor().then(|| Cursor::new(board.0, board.1));
        Self { kind, cursor }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Map one key press. Cursor keys move the cursor and yield `None`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if should_quit(self.kind, key) {
            return Some(Action::Quit);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        match self.kind {
            GameKind::Snake | GameKind::TwoZeroFourEight => direction(key.code).map(Action::Move),
            GameKind::Tetris => match direction(key.code)? {
                Direction::Up => Some(Action::Rotate),
                dir => Some(Action::Move(dir)),
            },
            GameKind::Hangman => match key.code {
                KeyCode::Char(c) => Some(Action::Guess(c)),
                _ => None,
            },
            GameKind::Minesweeper | GameKind::Battleship => self.handle_cursor_key(key.code),
        }
    }

    fn handle_cursor_key(&mut self, code: KeyCode) -> Option<Action> {
        let cursor = self.cursor.as_mut()?;
        if let Some(dir) = direction(code) {
            cursor.step(dir);
            return None;
        }
        let at = cursor.at();
        match (self.kind, code) {
            (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => Some(match self.kind {
                GameKind::Battleship => Action::Fire(at),
                _ => Action::Reveal(at),
            }),
            (GameKind::Minesweeper, KeyCode::Char('f')) | (GameKind::Minesweeper, KeyCode::Char('F')) => {
                Some(Action::Flag(at))
            }
            _ => None,
        }
    }
}
