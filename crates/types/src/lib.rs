//! Shared types for the arcade - pure data with no external dependencies
//!
//! Everything the core, the engines and the terminal frontend exchange lives
//! here: coordinates, directions, abstract actions, step results and the
//! unified render cell.
//!
//! # Coordinates
//!
//! All grids use `(x, y)` with the origin at the top-left corner. `x` grows to
//! the right, `y` grows downwards. Coordinates are signed so that movement can
//! produce an off-grid position which the grid then rejects.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SNAKE_TICK_MS` | 100 | Snake advances ten times a second |
//! | `TETRIS_TICK_MS` | 330 | Gravity step for falling blocks |
//! | `MAX_CATCH_UP_TICKS` | 5 | Upper bound of ticks run per `advance` call |
//!
//! # Examples
//!
//! ```
//! use grid_arcade_types::{Action, Coord, Direction, GameKind};
//!
//! let head = Coord::new(4, 4);
//! assert_eq!(head.step(Direction::Up), Coord::new(4, 3));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//!
//! let kind: GameKind = "2048".parse().unwrap();
//! assert_eq!(kind, GameKind::TwoZeroFourEight);
//! assert!(Action::Move(Direction::Down).is_directional());
//! ```

use std::fmt;
use std::str::FromStr;

/// Snake tick interval in milliseconds (the original ran at 10 frames per second).
pub const SNAKE_TICK_MS: u32 = 100;

/// Falling-block gravity interval in milliseconds.
pub const TETRIS_TICK_MS: u32 = 330;

/// Upper bound of ticks a tick engine runs in one `advance` call.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// A grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by an arbitrary delta.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring coordinate one step in `dir`.
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit `(dx, dy)` for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Abstract player intent, produced by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Rotate,
    Fire(Coord),
    Flag(Coord),
    Reveal(Coord),
    Guess(char),
    Quit,
}

impl Action {
    /// Directional actions are coalesced by the tick engine (latest wins).
    pub fn is_directional(&self) -> bool {
        matches!(self, Action::Move(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Rotate => "rotate",
            Action::Fire(_) => "fire",
            Action::Flag(_) => "flag",
            Action::Reveal(_) => "reveal",
            Action::Guess(_) => "guess",
            Action::Quit => "quit",
        }
    }
}

/// How a game advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Advances once per fixed time quantum, input or not.
    Tick,
    /// Advances only on an accepted action.
    Turn,
}

/// A game name that names no hosted game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGame(pub String);

impl fmt::Display for UnknownGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game {:?}", self.0)
    }
}

impl std::error::Error for UnknownGame {}

/// Closed set of hosted games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Snake,
    Tetris,
    TwoZeroFourEight,
    Minesweeper,
    Hangman,
    Battleship,
}

impl GameKind {
    /// Panel order of the game menu (`[1] Snake` .. `[6] 2048`).
    pub const PANEL: [GameKind; 6] = [
        GameKind::Snake,
        GameKind::Battleship,
        GameKind::Tetris,
        GameKind::Minesweeper,
        GameKind::Hangman,
        GameKind::TwoZeroFourEight,
    ];

    /// Resolve a 1-based panel choice.
    pub fn from_panel_choice(choice: &str) -> Option<Self> {
        let n: usize = choice.trim().parse().ok()?;
        Self::PANEL.get(n.checked_sub(1)?).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Tetris => "tetris",
            GameKind::TwoZeroFourEight => "2048",
            GameKind::Minesweeper => "minesweeper",
            GameKind::Hangman => "hangman",
            GameKind::Battleship => "battleship",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Tetris => "Tetris",
            GameKind::TwoZeroFourEight => "2048",
            GameKind::Minesweeper => "Minesweeper",
            GameKind::Hangman => "Hangman",
            GameKind::Battleship => "Battleship",
        }
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            GameKind::Snake | GameKind::Tetris => Discipline::Tick,
            _ => Discipline::Turn,
        }
    }

    /// Games whose actions address a board coordinate (driven by a cursor).
    pub fn uses_cursor(&self) -> bool {
        matches!(self, GameKind::Minesweeper | GameKind::Battleship)
    }
}

/// Parse a game name (case-insensitive).
impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snake" => Ok(GameKind::Snake),
            "tetris" => Ok(GameKind::Tetris),
            "2048" | "twozerofoureight" => Ok(GameKind::TwoZeroFourEight),
            "minesweeper" | "mines" => Ok(GameKind::Minesweeper),
            "hangman" => Ok(GameKind::Hangman),
            "battleship" => Ok(GameKind::Battleship),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

/// Round status. Won and Lost are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Why an action was not applied. The round continues unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Legal action type, illegal in the current state.
    InvalidAction,
    /// The round already ended.
    TerminalState,
    /// The game does not understand this action.
    Unsupported,
}

/// Outcome of one `apply` or `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub accepted: bool,
    pub status_changed: bool,
    pub score_delta: u32,
    pub rejection: Option<Rejection>,
}

impl StepResult {
    /// Accepted step with no score or status change.
    pub const fn accepted() -> Self {
        Self {
            accepted: true,
            status_changed: false,
            score_delta: 0,
            rejection: None,
        }
    }

    pub const fn rejected(reason: Rejection) -> Self {
        Self {
            accepted: false,
            status_changed: false,
            score_delta: 0,
            rejection: Some(reason),
        }
    }

    /// Nothing happened, and nothing was wrong (e.g. a tick before the snake moves).
    pub const fn idle() -> Self {
        Self {
            accepted: false,
            status_changed: false,
            score_delta: 0,
            rejection: None,
        }
    }

    pub const fn with_score(mut self, delta: u32) -> Self {
        self.score_delta = delta;
        self
    }

    pub const fn with_status_change(mut self, changed: bool) -> Self {
        self.status_changed = changed;
        self
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// Unified render cell for `view()` snapshots.
///
/// Every game translates its private payload into these so a single renderer
/// can paint all six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
    /// Settled tetromino block.
    Block(PieceKind),
    /// Block of the falling piece.
    ActiveBlock(PieceKind),
    /// 2048 tile value.
    Tile(u32),
    /// Unrevealed minesweeper cell.
    Hidden,
    Flagged,
    /// Revealed safe cell with its neighbouring mine count.
    Revealed(u8),
    Mine,
    Ship,
    Hit,
    Miss,
    /// Guessed hangman letter.
    Letter(char),
    /// Not yet guessed hangman letter.
    Blank,
    /// Separator column between two boards.
    Divider,
}

/// Line clear scoring (Classic rules)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];
