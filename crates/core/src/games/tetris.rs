//! Falling blocks - tick-driven.
//!
//! One active tetromino over a settled board. Each tick drops the piece one
//! row; a piece that cannot drop locks, full rows clear, and a new random piece
//! spawns at the top centre. A spawn that overlaps settled blocks ends the
//! round. Shifts and rotations are validated against the current position and
//! refused outright on any overlap (no wall kicks).

use crate::config::TetrisConfig;
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::pieces::Tetromino;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{
    Action, Cell, Coord, Direction, GameKind, GameStatus, PieceKind, Rejection, StepResult,
    LINE_SCORES,
};

/// Settled board cell (None = empty, Some = filled with piece kind)
pub type Settled = Option<PieceKind>;

#[derive(Debug, Clone)]
pub struct Tetris<R> {
    board: GridModel<Settled>,
    active: Option<Tetromino>,
    spawn_at: Coord,
    score: u32,
    lines: u32,
    status: GameStatus,
    rng: R,
}

/// Points for clearing `lines` rows at `level` (classic table, scaled by level + 1).
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)] * (level + 1)
}

impl<R: RandomSource> Tetris<R> {
    pub fn new(config: &TetrisConfig, rng: R) -> GameResult<Self> {
        config.validate()?;
        let board = GridModel::new(config.width, config.height, None)?;
        let mut game = Self::assemble(config, board, None, rng);
        let kind = game.rng.choose(&PieceKind::ALL)?;
        game.spawn(kind);
        Ok(game)
    }

    /// Start from an explicit board and active piece.
    pub fn from_parts(
        config: &TetrisConfig,
        board: GridModel<Settled>,
        active: Tetromino,
        rng: R,
    ) -> GameResult<Self> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(GameError::InvalidConfig(
                "board does not match configured size".into(),
            ));
        }
        let game = Self::assemble(config, board, Some(active), rng);
        if !game.fits(&active) {
            return Err(GameError::InvalidConfig("active piece overlaps the board".into()));
        }
        Ok(game)
    }

    fn assemble(
        config: &TetrisConfig,
        board: GridModel<Settled>,
        active: Option<Tetromino>,
        rng: R,
    ) -> Self {
        Self {
            board,
            active,
            spawn_at: Coord::new(config.width / 2 - 2, 0),
            score: 0,
            lines: 0,
            status: GameStatus::InProgress,
            rng,
        }
    }

    pub fn board(&self) -> &GridModel<Settled> {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.lines / 10
    }

    /// Every mino lands on an empty, in-bounds cell.
    pub fn fits(&self, piece: &Tetromino) -> bool {
        piece
            .cells()
            .iter()
            .all(|&c| matches!(self.board.at(c), Some(None)))
    }

    /// Spawn `kind` at the top centre. Returns false (and loses) when blocked.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Tetromino::new(kind, self.spawn_at);
        if !self.fits(&piece) {
            self.active = None;
            transition(GameKind::Tetris, &mut self.status, GameStatus::Lost);
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Replace the active piece with `candidate` if it fits.
    fn try_replace(&mut self, action: Action, candidate: Tetromino) -> StepResult {
        if self.fits(&candidate) {
            self.active = Some(candidate);
            StepResult::accepted()
        } else {
            log_rejected(GameKind::Tetris, action, Rejection::InvalidAction)
        }
    }

    /// Lock the active piece, clear rows and spawn the next piece.
    fn lock_and_spawn(&mut self, active: Tetromino) -> GameResult<StepResult> {
        // Draw before touching the board so a failing source leaves it intact.
        let next = self.rng.choose(&PieceKind::ALL)?;

        for c in active.cells() {
            self.board.put(c, Some(active.kind))?;
        }
        self.active = None;

        let level = self.level();
        let cleared = self
            .board
            .remove_rows(|row| row.iter().all(|c| c.is_some()), None)
            .len();
        let gained = line_clear_score(cleared, level);
        self.lines += cleared as u32;
        self.score += gained;
        if cleared > 0 {
            tracing::debug!(cleared, lines = self.lines, "rows cleared");
        }

        let spawned = self.spawn(next);
        Ok(StepResult::accepted()
            .with_score(gained)
            .with_status_change(!spawned))
    }
}

impl<R: RandomSource> GameRules for Tetris<R> {
    fn kind(&self) -> GameKind {
        GameKind::Tetris
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        let Some(active) = self.active else {
            return Ok(StepResult::idle());
        };
        let result = match action {
            Action::Move(Direction::Left) => self.try_replace(action, active.shifted(-1, 0)),
            Action::Move(Direction::Right) => self.try_replace(action, active.shifted(1, 0)),
            Action::Move(Direction::Down) => self.try_replace(action, active.shifted(0, 1)),
            Action::Rotate if active.kind == PieceKind::O => {
                log_rejected(GameKind::Tetris, action, Rejection::InvalidAction)
            }
            Action::Rotate => self.try_replace(action, active.rotated_cw()),
            other => log_rejected(GameKind::Tetris, other, Rejection::Unsupported),
        };
        Ok(result)
    }

    fn tick(&mut self) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        let Some(active) = self.active else {
            return Ok(StepResult::idle());
        };
        let dropped = active.shifted(0, 1);
        if self.fits(&dropped) {
            self.active = Some(dropped);
            return Ok(StepResult::accepted());
        }
        self.lock_and_spawn(active)
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn view(&self) -> GridModel<Cell> {
        let mut grid = self.board.map(|c| c.map(Cell::Block).unwrap_or(Cell::Empty));
        if let Some(active) = self.active {
            for c in active.cells() {
                grid.paint(c, Cell::ActiveBlock(active.kind));
            }
        }
        grid
    }

    fn summary(&self) -> String {
        format!("Lines: {}  Level: {}", self.lines, self.level())
    }
}
