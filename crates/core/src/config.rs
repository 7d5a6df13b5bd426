//! Round configuration.
//!
//! Layered: built-in defaults, then an optional JSON file, then `ARCADE_*`
//! environment overrides. The binary applies its CLI flags last. Defaults follow the classic games: a 30x20
//! snake field, a 10x20 well, a 4x4 2048 board, 8x8 minesweeper with 10
//! mines, six hangman attempts and a 10x10 battleship sea.
//!
//! Environment variables:
//!
//! - `ARCADE_CONFIG`: path of a JSON config file
//! - `ARCADE_SEED`: fixed RNG seed
//! - `ARCADE_SNAKE_TICK_MS`, `ARCADE_TETRIS_TICK_MS`: tick quanta

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::types::{GameKind, SNAKE_TICK_MS, TETRIS_TICK_MS};

fn invalid(msg: impl Into<String>) -> GameError {
    GameError::InvalidConfig(msg.into())
}

/// Longest board side any game accepts.
pub const MAX_SIDE: i32 = 1024;

/// Cell count of a `width` x `height` board, rejecting non-positive or
/// oversized sides.
fn area(what: &str, width: i32, height: i32) -> GameResult<usize> {
    if width <= 0 || height <= 0 {
        return Err(invalid(format!("{} dimensions must be positive", what)));
    }
    if width > MAX_SIDE || height > MAX_SIDE {
        return Err(invalid(format!(
            "{} sides must be at most {}, got {}x{}",
            what, MAX_SIDE, width, height
        )));
    }
    width
        .checked_mul(height)
        .and_then(|cells| usize::try_from(cells).ok())
        .ok_or_else(|| invalid(format!("{} of {}x{} is too large", what, width, height)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnakeConfig {
    pub width: i32,
    pub height: i32,
    pub tick_ms: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
            tick_ms: SNAKE_TICK_MS,
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> GameResult<()> {
        area("snake field", self.width, self.height)?;
        if self.width < 2 {
            return Err(invalid("snake field must be at least 2x1"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("snake tick_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TetrisConfig {
    pub width: i32,
    pub height: i32,
    pub tick_ms: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            tick_ms: TETRIS_TICK_MS,
        }
    }
}

impl TetrisConfig {
    pub fn validate(&self) -> GameResult<()> {
        area("tetris well", self.width, self.height)?;
        // Every piece fits its 4x4 box at the spawn column.
        if self.width < 4 || self.height < 4 {
            return Err(invalid("tetris well must be at least 4x4"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tetris tick_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwentyFortyEightConfig {
    pub size: i32,
    pub target: u32,
    pub initial_tiles: usize,
    /// Probability that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl Default for TwentyFortyEightConfig {
    fn default() -> Self {
        Self {
            size: 4,
            target: 2048,
            initial_tiles: 2,
            four_probability: 0.1,
        }
    }
}

impl TwentyFortyEightConfig {
    pub fn validate(&self) -> GameResult<()> {
        let cells = area("2048 board", self.size, self.size)?;
        if self.size < 2 {
            return Err(invalid("2048 board must be at least 2x2"));
        }
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(invalid("2048 target must be a power of two >= 4"));
        }
        if self.initial_tiles == 0 || self.initial_tiles > cells {
            return Err(invalid("2048 initial_tiles must fit on the board"));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(invalid("2048 four_probability must be within 0..=1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinesweeperConfig {
    pub width: i32,
    pub height: i32,
    pub mines: usize,
    /// Flood-reveal the neighbours of zero-count cells.
    pub cascade: bool,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            mines: 10,
            cascade: false,
        }
    }
}

impl MinesweeperConfig {
    pub fn validate(&self) -> GameResult<()> {
        let cells = area("minesweeper field", self.width, self.height)?;
        if self.mines == 0 || self.mines >= cells {
            return Err(invalid(format!(
                "minesweeper needs between 1 and {} mines, got {}",
                cells - 1,
                self.mines
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HangmanConfig {
    pub words: Vec<String>,
    pub attempts: u32,
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            words: ["python", "zenpo", "hangman", "developer", "terminal"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            attempts: 6,
        }
    }
}

impl HangmanConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.words.is_empty() {
            return Err(invalid("hangman needs at least one word"));
        }
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(invalid(format!("hangman word {:?} must be ascii letters", bad)));
        }
        if self.attempts == 0 {
            return Err(invalid("hangman attempts must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleshipMode {
    /// One human against the automated opponent.
    VsAi,
    /// Two humans taking turns at the same terminal.
    Hotseat,
}

impl BattleshipMode {
    /// Mode menu shown before a battleship round (`[1] Play vs AI`, `[2] Play vs Friend`).
    pub const PANEL: [BattleshipMode; 2] = [BattleshipMode::VsAi, BattleshipMode::Hotseat];

    /// Resolve a 1-based mode menu choice.
    pub fn from_panel_choice(choice: &str) -> Option<Self> {
        let n: usize = choice.trim().parse().ok()?;
        Self::PANEL.get(n.checked_sub(1)?).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            BattleshipMode::VsAi => "Play vs AI",
            BattleshipMode::Hotseat => "Play vs Friend",
        }
    }
}

/// Parse a mode name: `vs-ai`/`ai` or `hotseat`/`friend` (case-insensitive).
impl FromStr for BattleshipMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vs-ai" | "vs_ai" | "ai" => Ok(BattleshipMode::VsAi),
            "hotseat" | "friend" => Ok(BattleshipMode::Hotseat),
            other => Err(invalid(format!(
                "unknown battleship mode {:?} (expected vs-ai or hotseat)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BattleshipConfig {
    pub size: i32,
    pub ship_lengths: Vec<i32>,
    pub mode: BattleshipMode,
}

impl Default for BattleshipConfig {
    fn default() -> Self {
        Self {
            size: 10,
            ship_lengths: vec![3],
            mode: BattleshipMode::VsAi,
        }
    }
}

impl BattleshipConfig {
    pub fn validate(&self) -> GameResult<()> {
        let cells = area("battleship sea", self.size, self.size)?;
        if self.ship_lengths.is_empty() {
            return Err(invalid("battleship fleet must not be empty"));
        }
        if self.ship_lengths.iter().any(|&l| l <= 0 || l > self.size) {
            return Err(invalid("battleship ships must fit inside the sea"));
        }
        let total: usize = self.ship_lengths.iter().map(|&l| l as usize).sum();
        if total > cells / 2 {
            return Err(invalid("battleship fleet covers more than half the sea"));
        }
        Ok(())
    }
}

/// Configuration for every game plus the shared seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ArcadeConfig {
    /// Fixed seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
    #[serde(rename = "2048")]
    pub twenty48: TwentyFortyEightConfig,
    pub minesweeper: MinesweeperConfig,
    pub hangman: HangmanConfig,
    pub battleship: BattleshipConfig,
}

impl ArcadeConfig {
    pub fn from_json_str(s: &str) -> GameResult<Self> {
        serde_json::from_str(s).map_err(|e| invalid(format!("config json: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| invalid(format!("reading {}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Defaults, then `ARCADE_CONFIG`, then the other `ARCADE_*` overrides.
    pub fn from_env() -> GameResult<Self> {
        let mut config = match std::env::var("ARCADE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (unparsable values are ignored).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = lookup("ARCADE_SEED").and_then(|s| s.trim().parse().ok()) {
            self.seed = Some(seed);
        }
        if let Some(ms) = lookup("ARCADE_SNAKE_TICK_MS").and_then(|s| s.trim().parse().ok()) {
            self.snake.tick_ms = ms;
        }
        if let Some(ms) = lookup("ARCADE_TETRIS_TICK_MS").and_then(|s| s.trim().parse().ok()) {
            self.tetris.tick_ms = ms;
        }
    }

    /// Validate the section used by `kind`.
    pub fn validate(&self, kind: GameKind) -> GameResult<()> {
        match kind {
            GameKind::Snake => self.snake.validate(),
            GameKind::Tetris => self.tetris.validate(),
            GameKind::TwoZeroFourEight => self.twenty48.validate(),
            GameKind::Minesweeper => self.minesweeper.validate(),
            GameKind::Hangman => self.hangman.validate(),
            GameKind::Battleship => self.battleship.validate(),
        }
    }

    /// Tick quantum for tick-driven games.
    pub fn tick_ms(&self, kind: GameKind) -> Option<u32> {
        match kind {
            GameKind::Snake => Some(self.snake.tick_ms),
            GameKind::Tetris => Some(self.tetris.tick_ms),
            _ => None,
        }
    }
}
