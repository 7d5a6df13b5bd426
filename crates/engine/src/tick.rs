//! Fixed-rate driver for Snake and Tetris.
//!
//! Input between ticks is buffered: only the latest directional action and at
//! most one rotation survive until the next tick, where they are applied just
//! before the game advances. Elapsed time accumulates across calls; a stalled
//! caller catches up at most [`MAX_CATCH_UP_TICKS`] ticks per call and the
//! remaining backlog is dropped.

use arrayvec::ArrayVec;

use crate::core::{Game, GameResult, GameRules, RandomSource};
use crate::types::{Action, StepResult, MAX_CATCH_UP_TICKS};
use crate::QuitSignal;

/// Pending input for the next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputBuffer {
    direction: Option<Action>,
    rotate: bool,
}

impl InputBuffer {
    /// Buffer `action`. Returns false for actions that are not buffered.
    pub fn push(&mut self, action: Action) -> bool {
        match action {
            Action::Move(_) => {
                self.direction = Some(action);
                true
            }
            Action::Rotate => {
                self.rotate = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.direction.is_none() && !self.rotate
    }

    /// Take the pending actions in application order (rotation first).
    pub fn drain(&mut self) -> ArrayVec<Action, 2> {
        let mut out = ArrayVec::new();
        if std::mem::take(&mut self.rotate) {
            out.push(Action::Rotate);
        }
        if let Some(dir) = self.direction.take() {
            out.push(dir);
        }
        out
    }
}

/// What one `advance` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticks: u32,
    pub score_delta: u32,
    pub status_changed: bool,
    /// Buffered actions the game refused.
    pub rejected: u32,
}

impl TickReport {
    fn absorb(&mut self, step: StepResult) {
        self.score_delta += step.score_delta;
        self.status_changed |= step.status_changed;
        if step.rejection.is_some() {
            self.rejected += 1;
        }
    }
}

#[derive(Debug)]
pub struct TickEngine<R> {
    game: Game<R>,
    tick_ms: u32,
    /// Elapsed time not yet consumed by a tick.
    pending_ms: u64,
    buffer: InputBuffer,
    quit: QuitSignal,
}

impl<R: RandomSource> TickEngine<R> {
    pub fn new(game: Game<R>, tick_ms: u32, quit: QuitSignal) -> Self {
        Self {
            game,
            tick_ms: tick_ms.max(1),
            pending_ms: 0,
            buffer: InputBuffer::default(),
            quit,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn quit_signal(&self) -> &QuitSignal {
        &self.quit
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Milliseconds until the next tick is due.
    pub fn time_to_next_tick_ms(&self) -> u64 {
        u64::from(self.tick_ms).saturating_sub(self.pending_ms)
    }

    /// Hand an action to the engine.
    ///
    /// `Quit` raises the quit signal, movement and rotation are buffered for
    /// the next tick (returning `None`), anything else goes straight to the
    /// game.
    pub fn step(&mut self, action: Action) -> GameResult<Option<StepResult>> {
        if action == Action::Quit {
            self.quit.raise();
            return Ok(None);
        }
        if self.buffer.push(action) {
            return Ok(None);
        }
        self.game.apply(action).map(Some)
    }

    /// Run every whole tick that fits into the accumulated time.
    pub fn advance(&mut self, elapsed_ms: u64) -> GameResult<TickReport> {
        let mut report = TickReport::default();
        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);

        let tick = u64::from(self.tick_ms);
        while self.pending_ms >= tick && report.ticks < MAX_CATCH_UP_TICKS {
            if self.quit.is_raised() || self.game.status().is_terminal() {
                break;
            }
            self.pending_ms -= tick;
            self.run_tick(&mut report)?;
        }

        if self.pending_ms >= tick {
            tracing::debug!(backlog_ms = self.pending_ms, "tick backlog dropped");
            self.pending_ms %= tick;
        }
        Ok(report)
    }

    fn run_tick(&mut self, report: &mut TickReport) -> GameResult<()> {
        for action in self.buffer.drain() {
            let step = self.game.apply(action)?;
            report.absorb(step);
        }
        let step = self.game.tick()?;
        report.absorb(step);
        report.ticks += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::games::Snake;
    use crate::core::{ArcadeConfig, GameRng, ScriptedRandom, SnakeConfig};
    use crate::types::{Coord, Direction, GameKind, GameStatus, Rejection};

    fn snake_engine(width: i32, food: Option<Coord>, rng: ScriptedRandom) -> TickEngine<ScriptedRandom> {
        let config = SnakeConfig {
            width,
            height: 1,
            tick_ms: 100,
        };
        let snake = Snake::with_layout(&config, vec![Coord::new(0, 0)], None, food, rng).unwrap();
        TickEngine::new(Game::Snake(snake), 100, QuitSignal::new())
    }

    fn head(engine: &TickEngine<ScriptedRandom>) -> Coord {
        match engine.game() {
            Game::Snake(s) => s.head(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_buffer_keeps_latest_direction_and_one_rotation() {
        let mut buf = InputBuffer::default();
        assert!(buf.push(Action::Move(Direction::Left)));
        assert!(buf.push(Action::Rotate));
        assert!(buf.push(Action::Rotate));
        assert!(buf.push(Action::Move(Direction::Down)));
        assert!(!buf.push(Action::Guess('a')));
        assert_eq!(
            buf.drain().as_slice(),
            &[Action::Rotate, Action::Move(Direction::Down)]
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_advance_runs_whole_ticks_only() {
        let mut engine = snake_engine(10, None, ScriptedRandom::default());
        engine.step(Action::Move(Direction::Right)).unwrap();

        let r = engine.advance(50).unwrap();
        assert_eq!(r.ticks, 0);
        assert_eq!(head(&engine), Coord::new(0, 0));
        assert_eq!(engine.time_to_next_tick_ms(), 50);

        let r = engine.advance(60).unwrap();
        assert_eq!(r.ticks, 1);
        assert_eq!(head(&engine), Coord::new(1, 0));
        assert_eq!(engine.time_to_next_tick_ms(), 90);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut engine = snake_engine(30, None, ScriptedRandom::default());
        engine.step(Action::Move(Direction::Right)).unwrap();
        let r = engine.advance(10_000).unwrap();
        assert_eq!(r.ticks, MAX_CATCH_UP_TICKS);
        assert_eq!(head(&engine), Coord::new(MAX_CATCH_UP_TICKS as i32, 0));
        assert!(engine.time_to_next_tick_ms() > 0);
    }

    #[test]
    fn test_ticks_stop_at_terminal_status() {
        let mut engine = snake_engine(3, None, ScriptedRandom::default());
        engine.step(Action::Move(Direction::Right)).unwrap();
        let r = engine.advance(500).unwrap();
        // Two moves reach the wall, the third leaves the field.
        assert_eq!(r.ticks, 3);
        assert!(r.status_changed);
        assert_eq!(engine.game().status(), GameStatus::Lost);
    }

    #[test]
    fn test_score_is_reported() {
        // Eating needs one draw for the next food position.
        let mut engine = snake_engine(4, Some(Coord::new(1, 0)), ScriptedRandom::new([0]));
        engine.step(Action::Move(Direction::Right)).unwrap();
        let r = engine.advance(100).unwrap();
        assert_eq!(r.score_delta, 1);
        assert_eq!(engine.game().score(), 1);
    }

    #[test]
    fn test_rejected_buffered_action_is_counted() {
        let mut engine = snake_engine(10, None, ScriptedRandom::default());
        engine.step(Action::Move(Direction::Right)).unwrap();
        engine.advance(100).unwrap();
        engine.step(Action::Move(Direction::Left)).unwrap();
        let r = engine.advance(100).unwrap();
        assert_eq!(r.rejected, 1);
        // Still heading right.
        assert_eq!(head(&engine), Coord::new(2, 0));
    }

    #[test]
    fn test_quit_stops_ticking() {
        let mut engine = snake_engine(10, None, ScriptedRandom::default());
        engine.step(Action::Move(Direction::Right)).unwrap();
        assert_eq!(engine.step(Action::Quit).unwrap(), None);
        assert!(engine.quit_signal().is_raised());
        assert_eq!(engine.advance(300).unwrap().ticks, 0);
    }

    #[test]
    fn test_unbuffered_actions_reach_the_game() {
        let config = ArcadeConfig::default();
        let game = Game::new(GameKind::Tetris, &config, GameRng::new(4)).unwrap();
        let mut engine = TickEngine::new(game, 330, QuitSignal::new());
        let r = engine.step(Action::Guess('x')).unwrap();
        assert_eq!(r.map(|s| s.rejection), Some(Some(Rejection::Unsupported)));
    }
}
