//! Minesweeper - turn-driven.
//!
//! Mines are laid once at creation by drawing distinct cells from a shrinking
//! pool. Revealing a mine loses; revealing every safe cell wins. With
//! `cascade` enabled, revealing a zero-count cell also reveals its unflagged
//! neighbours, recursively.

use std::collections::VecDeque;

use crate::config::MinesweeperConfig;
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{Action, Cell, Coord, GameKind, GameStatus, Rejection, StepResult};

/// Number of mines in the clamped 8-neighbourhood of `at` on a `width` x `height` field.
///
/// ```
/// use grid_arcade_core::adjacent_mines;
/// use grid_arcade_core::types::Coord;
///
/// let mines = [Coord::new(1, 1)];
/// assert_eq!(adjacent_mines(&mines, 8, 8, Coord::new(0, 0)), 1);
/// assert_eq!(adjacent_mines(&mines, 8, 8, Coord::new(3, 3)), 0);
/// ```
pub fn adjacent_mines(mines: &[Coord], width: i32, height: i32, at: Coord) -> u8 {
    mines
        .iter()
        .filter(|m| {
            **m != at
                && (m.x - at.x).abs() <= 1
                && (m.y - at.y).abs() <= 1
                && m.x >= 0
                && m.x < width
                && m.y >= 0
                && m.y < height
        })
        .count() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Hidden,
    Flagged,
    Revealed(u8),
}

#[derive(Debug, Clone)]
pub struct Minesweeper {
    marks: GridModel<Mark>,
    mines: Vec<Coord>,
    cascade: bool,
    revealed: usize,
    status: GameStatus,
}

impl Minesweeper {
    pub fn new<R: RandomSource>(config: &MinesweeperConfig, mut rng: R) -> GameResult<Self> {
        config.validate()?;
        let marks = GridModel::new(config.width, config.height, Mark::Hidden)?;

        let mut pool: Vec<Coord> = marks.coords().collect();
        let mut mines = Vec::with_capacity(config.mines);
        for _ in 0..config.mines {
            let idx = rng.pick_index(pool.len())?;
            mines.push(pool.swap_remove(idx));
        }
        tracing::debug!(mines = mines.len(), "minefield laid");

        Ok(Self::assemble(config, marks, mines))
    }

    /// Start with an explicit mine layout.
    pub fn with_mines(config: &MinesweeperConfig, mines: Vec<Coord>) -> GameResult<Self> {
        let marks = GridModel::new(config.width, config.height, Mark::Hidden)?;
        for &m in &mines {
            marks.check(m)?;
        }
        let mut sorted = mines.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != mines.len() || mines.is_empty() || mines.len() >= marks.len() {
            return Err(GameError::InvalidConfig(
                "mines must be distinct and leave at least one safe cell".into(),
            ));
        }
        Ok(Self::assemble(config, marks, mines))
    }

    fn assemble(config: &MinesweeperConfig, marks: GridModel<Mark>, mines: Vec<Coord>) -> Self {
        Self {
            marks,
            mines,
            cascade: config.cascade,
            revealed: 0,
            status: GameStatus::InProgress,
        }
    }

    pub fn mines(&self) -> &[Coord] {
        &self.mines
    }

    pub fn is_mine(&self, at: Coord) -> bool {
        self.mines.contains(&at)
    }

    pub fn is_flagged(&self, at: Coord) -> bool {
        self.marks.at(at) == Some(Mark::Flagged)
    }

    /// Neighbour count of a revealed cell.
    pub fn revealed_count(&self, at: Coord) -> Option<u8> {
        match self.marks.at(at) {
            Some(Mark::Revealed(n)) => Some(n),
            _ => None,
        }
    }

    pub fn flags(&self) -> usize {
        self.marks.count(|&m| m == Mark::Flagged)
    }

    fn safe_cells(&self) -> usize {
        self.marks.len() - self.mines.len()
    }

    fn neighbours(&self, at: Coord) -> u8 {
        adjacent_mines(&self.mines, self.marks.width(), self.marks.height(), at)
    }

    /// Reveal `start` and, with cascade on, flood out from zero-count cells.
    /// Returns the number of cells newly revealed.
    fn flood(&mut self, start: Coord) -> GameResult<u32> {
        let mut queue = VecDeque::from([start]);
        let mut opened = 0;
        while let Some(at) = queue.pop_front() {
            if self.marks.at(at) != Some(Mark::Hidden) || self.is_mine(at) {
                continue;
            }
            let n = self.neighbours(at);
            self.marks.put(at, Mark::Revealed(n))?;
            opened += 1;
            if self.cascade && n == 0 {
                queue.extend(self.marks.neighbors8(at));
            }
        }
        Ok(opened)
    }

    fn reveal(&mut self, at: Coord) -> GameResult<StepResult> {
        self.marks.check(at)?;
        match self.marks.at(at) {
            Some(Mark::Hidden) => {}
            _ => {
                return Ok(log_rejected(
                    GameKind::Minesweeper,
                    Action::Reveal(at),
                    Rejection::InvalidAction,
                ))
            }
        }

        if self.is_mine(at) {
            let changed = transition(GameKind::Minesweeper, &mut self.status, GameStatus::Lost);
            return Ok(StepResult::accepted().with_status_change(changed));
        }

        let opened = self.flood(at)?;
        self.revealed += opened as usize;
        let changed = if self.revealed == self.safe_cells() {
            transition(GameKind::Minesweeper, &mut self.status, GameStatus::Won)
        } else {
            false
        };
        Ok(StepResult::accepted()
            .with_score(opened)
            .with_status_change(changed))
    }

    fn toggle_flag(&mut self, at: Coord) -> GameResult<StepResult> {
        self.marks.check(at)?;
        let next = match self.marks.at(at) {
            Some(Mark::Hidden) => Mark::Flagged,
            Some(Mark::Flagged) => Mark::Hidden,
            _ => {
                return Ok(log_rejected(
                    GameKind::Minesweeper,
                    Action::Flag(at),
                    Rejection::InvalidAction,
                ))
            }
        };
        self.marks.put(at, next)?;
        Ok(StepResult::accepted())
    }
}

impl GameRules for Minesweeper {
    fn kind(&self) -> GameKind {
        GameKind::Minesweeper
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        match action {
            Action::Reveal(at) => self.reveal(at),
            Action::Flag(at) => self.toggle_flag(at),
            other => Ok(log_rejected(GameKind::Minesweeper, other, Rejection::Unsupported)),
        }
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.revealed as u32
    }

    fn view(&self) -> GridModel<Cell> {
        let mut view = self.marks.map(|m| match m {
            Mark::Hidden => Cell::Hidden,
            Mark::Flagged => Cell::Flagged,
            Mark::Revealed(n) => Cell::Revealed(n),
        });
        if self.status == GameStatus::Lost {
            for &m in &self.mines {
                view.paint(m, Cell::Mine);
            }
        }
        view
    }

    fn summary(&self) -> String {
        format!("Mines: {}  Flags: {}", self.mines.len(), self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn config(width: i32, height: i32, cascade: bool) -> MinesweeperConfig {
        MinesweeperConfig {
            width,
            height,
            mines: 1,
            cascade,
        }
    }

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_adjacent_mines_corner_and_centre() {
        let mines = [c(1, 1)];
        assert_eq!(adjacent_mines(&mines, 8, 8, c(0, 0)), 1);
        let mines = [c(0, 0), c(1, 0), c(2, 0), c(0, 1), c(2, 1), c(0, 2), c(1, 2), c(2, 2)];
        assert_eq!(adjacent_mines(&mines, 8, 8, c(1, 1)), 8);
        // A mine never counts itself.
        assert_eq!(adjacent_mines(&mines, 8, 8, c(0, 0)), 2);
    }

    #[test]
    fn test_new_lays_distinct_mines() {
        let game = Minesweeper::new(&MinesweeperConfig::default(), GameRng::new(9)).unwrap();
        let mut mines = game.mines().to_vec();
        mines.sort();
        mines.dedup();
        assert_eq!(mines.len(), 10);
        assert!(mines.iter().all(|m| (0..8).contains(&m.x) && (0..8).contains(&m.y)));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Minesweeper::new(&MinesweeperConfig::default(), GameRng::new(77)).unwrap();
        let b = Minesweeper::new(&MinesweeperConfig::default(), GameRng::new(77)).unwrap();
        assert_eq!(a.mines(), b.mines());
    }

    #[test]
    fn test_reveal_safe_records_count() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        let r = game.apply(Action::Reveal(c(0, 0))).unwrap();
        assert!(r.accepted);
        assert_eq!(r.score_delta, 1);
        assert_eq!(game.revealed_count(c(0, 0)), Some(1));
        assert_eq!(game.view().get(0, 0), Some(Cell::Revealed(1)));
        assert_eq!(game.view().get(3, 3), Some(Cell::Hidden));
    }

    #[test]
    fn test_reveal_mine_loses_and_shows_mines() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        assert_eq!(game.view().get(1, 1), Some(Cell::Hidden));
        let r = game.apply(Action::Reveal(c(1, 1))).unwrap();
        assert!(r.status_changed);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.view().get(1, 1), Some(Cell::Mine));
    }

    #[test]
    fn test_reveal_revealed_or_flagged_rejected() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        game.apply(Action::Reveal(c(0, 0))).unwrap();
        let r = game.apply(Action::Reveal(c(0, 0))).unwrap();
        assert_eq!(r.rejection, Some(Rejection::InvalidAction));

        game.apply(Action::Flag(c(3, 3))).unwrap();
        let r = game.apply(Action::Reveal(c(3, 3))).unwrap();
        assert_eq!(r.rejection, Some(Rejection::InvalidAction));
        assert!(game.is_flagged(c(3, 3)));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_flag_toggle_is_idempotent_pair() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        let before = game.view();
        assert!(game.apply(Action::Flag(c(2, 2))).unwrap().accepted);
        assert!(game.is_flagged(c(2, 2)));
        assert_eq!(game.view().get(2, 2), Some(Cell::Flagged));
        assert!(game.apply(Action::Flag(c(2, 2))).unwrap().accepted);
        assert_eq!(game.view(), before);
    }

    #[test]
    fn test_flag_revealed_rejected() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        game.apply(Action::Reveal(c(3, 0))).unwrap();
        assert_eq!(
            game.apply(Action::Flag(c(3, 0))).unwrap().rejection,
            Some(Rejection::InvalidAction)
        );
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1)]).unwrap();
        assert!(matches!(
            game.apply(Action::Reveal(c(4, 0))),
            Err(GameError::OutOfRange { x: 4, y: 0, .. })
        ));
        assert!(game.apply(Action::Flag(c(0, -1))).is_err());
    }

    #[test]
    fn test_revealing_every_safe_cell_wins() {
        let mut game = Minesweeper::with_mines(&config(2, 2, false), vec![c(0, 0)]).unwrap();
        game.apply(Action::Reveal(c(1, 0))).unwrap();
        game.apply(Action::Reveal(c(0, 1))).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        let r = game.apply(Action::Reveal(c(1, 1))).unwrap();
        assert!(r.status_changed);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.score(), 3);
    }

    #[test]
    fn test_cascade_floods_from_zero() {
        let mut game = Minesweeper::with_mines(&config(4, 4, true), vec![c(3, 3)]).unwrap();
        let r = game.apply(Action::Reveal(c(0, 0))).unwrap();
        assert_eq!(r.score_delta, 15);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.revealed_count(c(2, 2)), Some(1));
    }

    #[test]
    fn test_cascade_skips_flagged_cells() {
        let mut game = Minesweeper::with_mines(&config(4, 4, true), vec![c(3, 3)]).unwrap();
        game.apply(Action::Flag(c(1, 0))).unwrap();
        game.apply(Action::Reveal(c(0, 0))).unwrap();
        assert!(game.is_flagged(c(1, 0)));
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.score(), 14);
    }

    #[test]
    fn test_without_cascade_only_one_cell_opens() {
        let mut game = Minesweeper::with_mines(&config(4, 4, false), vec![c(3, 3)]).unwrap();
        let r = game.apply(Action::Reveal(c(0, 0))).unwrap();
        assert_eq!(r.score_delta, 1);
        assert_eq!(game.revealed_count(c(0, 0)), Some(0));
    }

    #[test]
    fn test_with_mines_rejects_duplicates() {
        assert!(Minesweeper::with_mines(&config(4, 4, false), vec![c(1, 1), c(1, 1)]).is_err());
    }
}
