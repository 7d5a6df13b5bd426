//! Snake - tick-driven.
//!
//! The snake starts as a single segment in the middle of the field and stays
//! put until the first direction arrives. Each tick moves the head one cell;
//! food grows the body by one and respawns on a random empty cell. Filling
//! the whole field wins.

use std::collections::VecDeque;

use crate::config::SnakeConfig;
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{Action, Cell, Coord, Direction, GameKind, GameStatus, Rejection, StepResult};

#[derive(Debug, Clone)]
pub struct Snake<R> {
    /// Blank field; bounds and view template.
    field: GridModel<Cell>,
    /// Head first.
    body: VecDeque<Coord>,
    /// Direction of the last completed move (reversal is checked against this).
    heading: Option<Direction>,
    /// Direction the next tick will use.
    pending: Option<Direction>,
    food: Option<Coord>,
    score: u32,
    status: GameStatus,
    rng: R,
}

impl<R: RandomSource> Snake<R> {
    pub fn new(config: &SnakeConfig, mut rng: R) -> GameResult<Self> {
        config.validate()?;
        let field = GridModel::new(config.width, config.height, Cell::Empty)?;
        let head = Coord::new(config.width / 2, config.height / 2);
        let body = VecDeque::from([head]);
        let food = spawn_food(&field, &body, &mut rng)?;
        Ok(Self {
            field,
            body,
            heading: None,
            pending: None,
            food,
            score: 0,
            status: GameStatus::InProgress,
            rng,
        })
    }

    /// Test constructor with an explicit body (head first) and food.
    pub fn with_layout(
        config: &SnakeConfig,
        body: Vec<Coord>,
        heading: Option<Direction>,
        food: Option<Coord>,
        rng: R,
    ) -> GameResult<Self> {
        config.validate()?;
        if body.is_empty() {
            return Err(GameError::InvalidConfig("snake body must not be empty".into()));
        }
        let field = GridModel::new(config.width, config.height, Cell::Empty)?;
        for &segment in body.iter().chain(food.iter()) {
            field.check(segment)?;
        }
        Ok(Self {
            field,
            body: body.into(),
            heading,
            pending: heading,
            food,
            score: 0,
            status: GameStatus::InProgress,
            rng,
        })
    }

    pub fn body(&self) -> impl Iterator<Item = Coord> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    fn steer(&mut self, dir: Direction) -> StepResult {
        if self.heading == Some(dir.opposite()) {
            return log_rejected(GameKind::Snake, Action::Move(dir), Rejection::InvalidAction);
        }
        self.pending = Some(dir);
        StepResult::accepted()
    }

    fn advance(&mut self) -> GameResult<StepResult> {
        let Some(dir) = self.pending else {
            return Ok(StepResult::idle());
        };

        let new_head = self.head().step(dir);
        let eating = self.food == Some(new_head);

        // The tail vacates this tick unless the snake grows.
        let occupied_len = if eating {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        let collides = self.body.iter().take(occupied_len).any(|&c| c == new_head);

        if !self.field.contains(new_head) || collides {
            let changed = transition(GameKind::Snake, &mut self.status, GameStatus::Lost);
            return Ok(StepResult::accepted().with_status_change(changed));
        }

        if !eating {
            self.body.push_front(new_head);
            self.body.pop_back();
            self.heading = Some(dir);
            return Ok(StepResult::accepted());
        }

        // Draw the new food position against the grown body before committing.
        let mut grown = self.body.clone();
        grown.push_front(new_head);
        let food = spawn_food(&self.field, &grown, &mut self.rng)?;

        self.body = grown;
        self.heading = Some(dir);
        self.food = food;
        self.score += 1;

        let changed = if food.is_none() {
            transition(GameKind::Snake, &mut self.status, GameStatus::Won)
        } else {
            false
        };
        Ok(StepResult::accepted()
            .with_score(1)
            .with_status_change(changed))
    }
}

/// Pick a uniformly random cell not covered by `body`. `None` when the field is full.
fn spawn_food<R: RandomSource>(
    field: &GridModel<Cell>,
    body: &VecDeque<Coord>,
    rng: &mut R,
) -> GameResult<Option<Coord>> {
    let free: Vec<Coord> = field.coords().filter(|c| !body.contains(c)).collect();
    if free.is_empty() {
        return Ok(None);
    }
    let idx = rng.pick_index(free.len())?;
    Ok(Some(free[idx]))
}

impl<R: RandomSource> GameRules for Snake<R> {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        match action {
            Action::Move(dir) => Ok(self.steer(dir)),
            other => Ok(log_rejected(GameKind::Snake, other, Rejection::Unsupported)),
        }
    }

    fn tick(&mut self) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        self.advance()
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn view(&self) -> GridModel<Cell> {
        let mut grid = self.field.clone();
        if let Some(food) = self.food {
            grid.paint(food, Cell::Food);
        }
        for (i, &segment) in self.body.iter().enumerate() {
            let cell = if i == 0 { Cell::SnakeHead } else { Cell::SnakeBody };
            grid.paint(segment, cell);
        }
        grid
    }

    fn summary(&self) -> String {
        format!("Length: {}", self.body.len())
    }
}
