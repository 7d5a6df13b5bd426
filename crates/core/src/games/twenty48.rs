//! 2048 - turn-driven sliding tiles.
//!
//! Every direction is normalised to a left slide: the board is transposed
//! and/or mirrored, each row is compacted with [`compact_left`], and the
//! inverse transform is applied. A move that changes nothing is refused and
//! spawns nothing.

use crate::config::TwentyFortyEightConfig;
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{Action, Cell, Coord, Direction, GameKind, GameStatus, Rejection, StepResult};

/// Slide one row to the left.
///
/// Zeros are dropped, each tile merges with the next equal tile at most once,
/// and the row is padded back to its length with zeros. Returns the new row
/// and the sum of the merged tile values.
///
/// ```
/// use grid_arcade_core::compact_left;
///
/// assert_eq!(compact_left(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
/// assert_eq!(compact_left(&[0, 4, 0, 4]), (vec![8, 0, 0, 0], 8));
/// ```
pub fn compact_left(row: &[u32]) -> (Vec<u32>, u32) {
    let tiles: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::with_capacity(row.len());
    let mut gained = 0;

    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out.push(merged);
            gained += merged;
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }

    out.resize(row.len(), 0);
    (out, gained)
}

/// Board after sliding every tile in `dir`, plus the merge score.
pub fn slide(board: &GridModel<u32>, dir: Direction) -> GameResult<(GridModel<u32>, u32)> {
    let normalised = match dir {
        Direction::Left => board.clone(),
        Direction::Right => board.reverse_rows(),
        Direction::Up => board.transpose(),
        Direction::Down => board.transpose().reverse_rows(),
    };

    let mut gained = 0;
    let rows = normalised
        .rows()
        .map(|row| {
            let (out, score) = compact_left(row);
            gained += score;
            out
        })
        .collect();
    let compacted = GridModel::from_rows(rows)?;

    let restored = match dir {
        Direction::Left => compacted,
        Direction::Right => compacted.reverse_rows(),
        Direction::Up => compacted.transpose(),
        Direction::Down => compacted.reverse_rows().transpose(),
    };
    Ok((restored, gained))
}

/// Whether any two orthogonally adjacent tiles are equal.
fn has_merge(board: &GridModel<u32>) -> bool {
    board.coords().any(|c| {
        let v = board.at(c);
        v.is_some() && (board.at(c.offset(1, 0)) == v || board.at(c.offset(0, 1)) == v)
    })
}

#[derive(Debug, Clone)]
pub struct TwentyFortyEight<R> {
    board: GridModel<u32>,
    target: u32,
    four_probability: f64,
    score: u32,
    status: GameStatus,
    rng: R,
}

impl<R: RandomSource> TwentyFortyEight<R> {
    pub fn new(config: &TwentyFortyEightConfig, rng: R) -> GameResult<Self> {
        config.validate()?;
        let board = GridModel::new(config.size, config.size, 0)?;
        let mut game = Self::assemble(config, board, rng);
        for _ in 0..config.initial_tiles {
            let snapshot = game.board.clone();
            if let Some((at, value)) = game.draw_spawn(&snapshot)? {
                game.board.put(at, value)?;
            }
        }
        Ok(game)
    }

    /// Start from explicit rows (0 = empty).
    pub fn with_board(
        config: &TwentyFortyEightConfig,
        rows: Vec<Vec<u32>>,
        rng: R,
    ) -> GameResult<Self> {
        config.validate()?;
        let board = GridModel::from_rows(rows)?;
        if board.width() != config.size || board.height() != config.size {
            return Err(GameError::InvalidConfig(
                "board does not match configured size".into(),
            ));
        }
        if board.cells().iter().any(|&v| v == 1 || (v != 0 && !v.is_power_of_two())) {
            return Err(GameError::InvalidConfig(
                "tiles must be powers of two >= 2".into(),
            ));
        }
        let mut game = Self::assemble(config, board, rng);
        game.evaluate();
        Ok(game)
    }

    fn assemble(config: &TwentyFortyEightConfig, board: GridModel<u32>, rng: R) -> Self {
        Self {
            board,
            target: config.target,
            four_probability: config.four_probability,
            score: 0,
            status: GameStatus::InProgress,
            rng,
        }
    }

    pub fn board(&self) -> &GridModel<u32> {
        &self.board
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn max_tile(&self) -> u32 {
        self.board.cells().iter().copied().max().unwrap_or(0)
    }

    /// Choose an empty cell of `board` and a 2 or 4 for it.
    fn draw_spawn(&mut self, board: &GridModel<u32>) -> GameResult<Option<(Coord, u32)>> {
        let empty = board.coords_where(|&v| v == 0);
        if empty.is_empty() {
            return Ok(None);
        }
        let at = empty[self.rng.pick_index(empty.len())?];
        let value = if self.rng.next_bool(self.four_probability)? {
            4
        } else {
            2
        };
        Ok(Some((at, value)))
    }

    /// Won on reaching the target, Lost when full with nothing to merge.
    fn evaluate(&mut self) -> bool {
        let next = if self.max_tile() >= self.target {
            GameStatus::Won
        } else if self.board.count(|&v| v == 0) == 0 && !has_merge(&self.board) {
            GameStatus::Lost
        } else {
            return false;
        };
        transition(GameKind::TwoZeroFourEight, &mut self.status, next)
    }

    fn shift(&mut self, dir: Direction) -> GameResult<StepResult> {
        let (mut moved, gained) = slide(&self.board, dir)?;
        if moved == self.board {
            return Ok(log_rejected(
                GameKind::TwoZeroFourEight,
                Action::Move(dir),
                Rejection::InvalidAction,
            ));
        }

        let spawn = self.draw_spawn(&moved)?;
        if let Some((at, value)) = spawn {
            moved.put(at, value)?;
        }

        self.board = moved;
        self.score += gained;
        let changed = self.evaluate();
        Ok(StepResult::accepted()
            .with_score(gained)
            .with_status_change(changed))
    }
}

impl<R: RandomSource> GameRules for TwentyFortyEight<R> {
    fn kind(&self) -> GameKind {
        GameKind::TwoZeroFourEight
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        match action {
            Action::Move(dir) => self.shift(dir),
            other => Ok(log_rejected(
                GameKind::TwoZeroFourEight,
                other,
                Rejection::Unsupported,
            )),
        }
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn view(&self) -> GridModel<Cell> {
        self.board
            .map(|v| if v == 0 { Cell::Empty } else { Cell::Tile(v) })
    }

    fn summary(&self) -> String {
        format!("Best: {}  Target: {}", self.max_tile(), self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRandom};

    fn config(size: i32, target: u32) -> TwentyFortyEightConfig {
        TwentyFortyEightConfig {
            size,
            target,
            ..TwentyFortyEightConfig::default()
        }
    }

    #[test]
    fn test_compact_left_examples() {
        assert_eq!(compact_left(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
        assert_eq!(compact_left(&[2, 2, 4, 0]), (vec![4, 4, 0, 0], 4));
        assert_eq!(compact_left(&[4, 0, 4, 8]), (vec![8, 8, 0, 0], 8));
        assert_eq!(compact_left(&[0, 0, 0, 2]), (vec![2, 0, 0, 0], 0));
        assert_eq!(compact_left(&[2, 4, 8, 16]), (vec![2, 4, 8, 16], 0));
        assert_eq!(compact_left(&[]), (vec![], 0));
    }

    #[test]
    fn test_slide_each_direction() {
        let board = GridModel::from_rows(vec![vec![2, 0], vec![2, 4]]).unwrap();
        let (up, s) = slide(&board, Direction::Up).unwrap();
        assert_eq!(up, GridModel::from_rows(vec![vec![4, 4], vec![0, 0]]).unwrap());
        assert_eq!(s, 4);

        let (down, _) = slide(&board, Direction::Down).unwrap();
        assert_eq!(down, GridModel::from_rows(vec![vec![0, 0], vec![4, 4]]).unwrap());

        let (right, s) = slide(&board, Direction::Right).unwrap();
        assert_eq!(right, GridModel::from_rows(vec![vec![0, 2], vec![2, 4]]).unwrap());
        assert_eq!(s, 0);
    }

    #[test]
    fn test_new_places_initial_tiles() {
        let game = TwentyFortyEight::new(&TwentyFortyEightConfig::default(), GameRng::new(3))
            .unwrap();
        assert_eq!(game.board().count(|&v| v != 0), 2);
        assert!(game.board().cells().iter().all(|&v| v == 0 || v == 2 || v == 4));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_noop_move_rejected_without_spawn() {
        let rows = vec![vec![2, 4], vec![0, 0]];
        // An empty script: any spawn attempt would be an error.
        let mut game =
            TwentyFortyEight::with_board(&config(2, 2048), rows.clone(), ScriptedRandom::default())
                .unwrap();
        let r = game.apply(Action::Move(Direction::Left)).unwrap();
        assert!(!r.accepted);
        assert_eq!(r.rejection, Some(Rejection::InvalidAction));
        assert_eq!(game.board(), &GridModel::from_rows(rows).unwrap());
    }

    #[test]
    fn test_accepted_move_merges_scores_and_spawns() {
        let rows = vec![vec![0, 2, 2, 0], vec![0; 4], vec![0; 4], vec![0; 4]];
        let rng = ScriptedRandom::new([0]).with_bools([true]);
        let mut game = TwentyFortyEight::with_board(&config(4, 2048), rows, rng).unwrap();

        let r = game.apply(Action::Move(Direction::Left)).unwrap();
        assert!(r.accepted);
        assert_eq!(r.score_delta, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.board().get(0, 0), Some(4));
        // First empty cell after the slide is (1, 0); the script picked it with a 4.
        assert_eq!(game.board().get(1, 0), Some(4));
        assert_eq!(game.board().count(|&v| v != 0), 2);
    }

    #[test]
    fn test_full_board_without_merges_is_lost() {
        let rows = vec![vec![2, 4], vec![8, 0]];
        let rng = ScriptedRandom::new([0]).with_bools([true]);
        let mut game = TwentyFortyEight::with_board(&config(2, 2048), rows, rng).unwrap();

        let r = game.apply(Action::Move(Direction::Right)).unwrap();
        assert!(r.accepted);
        assert!(r.status_changed);
        assert_eq!(
            game.board(),
            &GridModel::from_rows(vec![vec![2, 4], vec![4, 8]]).unwrap()
        );
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(
            game.apply(Action::Move(Direction::Up)).unwrap().rejection,
            Some(Rejection::TerminalState)
        );
    }

    #[test]
    fn test_full_board_with_merge_continues() {
        let rows = vec![vec![2, 4], vec![8, 0]];
        let rng = ScriptedRandom::new([0]).with_bools([false]);
        let mut game = TwentyFortyEight::with_board(&config(2, 2048), rows, rng).unwrap();
        game.apply(Action::Move(Direction::Right)).unwrap();
        // [[2,4],[2,8]]: the left column can still merge.
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_reaching_target_wins() {
        let rows = vec![vec![4, 4], vec![0, 0]];
        let rng = ScriptedRandom::new([0]).with_bools([false]);
        let mut game = TwentyFortyEight::with_board(&config(2, 8), rows, rng).unwrap();
        let r = game.apply(Action::Move(Direction::Left)).unwrap();
        assert!(r.status_changed);
        assert_eq!(r.score_delta, 8);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_exhausted_rng_leaves_board_untouched() {
        let rows = vec![vec![0, 2], vec![0, 0]];
        let mut game =
            TwentyFortyEight::with_board(&config(2, 2048), rows.clone(), ScriptedRandom::default())
                .unwrap();
        assert!(game.apply(Action::Move(Direction::Left)).is_err());
        assert_eq!(game.board(), &GridModel::from_rows(rows).unwrap());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_rejects_bad_tiles() {
        let rows = vec![vec![3, 0], vec![0, 0]];
        assert!(
            TwentyFortyEight::with_board(&config(2, 2048), rows, ScriptedRandom::default())
                .is_err()
        );
    }

    #[test]
    fn test_non_move_actions_unsupported() {
        let mut game = TwentyFortyEight::new(&TwentyFortyEightConfig::default(), GameRng::new(1))
            .unwrap();
        assert_eq!(
            game.apply(Action::Rotate).unwrap().rejection,
            Some(Rejection::Unsupported)
        );
    }
}
