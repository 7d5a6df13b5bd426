//! Battleship - turn-driven.
//!
//! Each side owns a square sea with a fleet of straight, non-overlapping
//! ships. A shot at the opposing sea is recorded once as a hit or a miss;
//! sinking every ship cell wins.
//!
//! - Versus AI: after every player shot that does not win, the automated
//!   gunner fires back once, drawing from its pool of untried cells.
//! - Hotseat: two players alternate at the same terminal.
//!
//! The snapshot is two boards side by side: on the left the sea under fire by
//! the player to move (hits and misses only), a divider column, and on the
//! right that player's own sea with ships and incoming shots.

use crate::config::{BattleshipConfig, BattleshipMode};
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{Action, Cell, Coord, GameKind, GameStatus, Rejection, StepResult};

/// Result of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }
}

/// Automated opponent: fires at a uniformly random untried cell.
///
/// Each draw removes its cell from the pool, so the gunner never repeats and
/// needs exactly one random draw per shot.
#[derive(Debug, Clone)]
pub struct AiGunner {
    pool: Vec<Coord>,
}

impl AiGunner {
    pub fn new(size: i32) -> Self {
        let pool = (0..size)
            .flat_map(|y| (0..size).map(move |x| Coord::new(x, y)))
            .collect();
        Self { pool }
    }

    /// Untried cells left.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Next target, or `None` once every cell has been tried.
    pub fn next_target<R: RandomSource>(&mut self, rng: &mut R) -> GameResult<Option<Coord>> {
        if self.pool.is_empty() {
            return Ok(None);
        }
        let idx = rng.pick_index(self.pool.len())?;
        Ok(Some(self.pool.swap_remove(idx)))
    }
}

/// One player's sea: their ships and the shots fired at them.
#[derive(Debug, Clone)]
struct Sea {
    ships: GridModel<bool>,
    incoming: GridModel<Option<Shot>>,
    ship_cells: usize,
    hits: usize,
}

impl Sea {
    fn new(size: i32, ships: &[Vec<Coord>]) -> GameResult<Self> {
        let mut grid = GridModel::new(size, size, false)?;
        for &cell in ships.iter().flatten() {
            grid.check(cell)?;
            if grid.at(cell) == Some(true) {
                return Err(GameError::InvalidConfig(format!(
                    "ships overlap at ({}, {})",
                    cell.x, cell.y
                )));
            }
            grid.put(cell, true)?;
        }
        let ship_cells = grid.count(|&s| s);
        if ship_cells == 0 {
            return Err(GameError::InvalidConfig("a fleet needs at least one ship".into()));
        }
        Ok(Self {
            incoming: GridModel::new(size, size, None)?,
            ships: grid,
            ship_cells,
            hits: 0,
        })
    }

    /// Outcome of a shot at `at`; `None` when that cell was already shot.
    fn outcome(&self, at: Coord) -> GameResult<Option<Shot>> {
        self.incoming.check(at)?;
        if self.incoming.at(at).flatten().is_some() {
            return Ok(None);
        }
        Ok(Some(if self.ships.at(at) == Some(true) {
            Shot::Hit
        } else {
            Shot::Miss
        }))
    }

    fn record(&mut self, at: Coord, shot: Shot) -> GameResult<()> {
        self.incoming.put(at, Some(shot))?;
        if shot == Shot::Hit {
            self.hits += 1;
        }
        Ok(())
    }

    fn sunk(&self) -> bool {
        self.hits == self.ship_cells
    }
}

/// Lay out `lengths` as straight, non-overlapping ships on a `size` square.
///
/// Every legal placement for a ship is enumerated and one is drawn, so each
/// ship costs exactly one random draw.
pub fn place_fleet<R: RandomSource>(
    size: i32,
    lengths: &[i32],
    rng: &mut R,
) -> GameResult<Vec<Vec<Coord>>> {
    let mut taken = GridModel::new(size, size, false)?;
    let mut fleet = Vec::with_capacity(lengths.len());

    for &len in lengths {
        let mut candidates: Vec<Vec<Coord>> = Vec::new();
        let orientations: &[(i32, i32)] = if len == 1 { &[(1, 0)] } else { &[(1, 0), (0, 1)] };
        for &(dx, dy) in orientations {
            for start in taken.coords() {
                let cells: Vec<Coord> = (0..len).map(|i| start.offset(dx * i, dy * i)).collect();
                if cells.iter().all(|&c| taken.at(c) == Some(false)) {
                    candidates.push(cells);
                }
            }
        }
        if candidates.is_empty() {
            return Err(GameError::InvalidConfig(format!(
                "no room left for a ship of length {}",
                len
            )));
        }
        let ship = candidates.swap_remove(rng.pick_index(candidates.len())?);
        for &c in &ship {
            taken.put(c, true)?;
        }
        fleet.push(ship);
    }
    Ok(fleet)
}

#[derive(Debug, Clone)]
pub struct Battleship<R> {
    /// Indexed by [`Player`]: `seas[0]` belongs to player one.
    seas: [Sea; 2],
    mode: BattleshipMode,
    to_move: Player,
    gunner: AiGunner,
    last_shot: Option<(Coord, Shot)>,
    last_ai_shot: Option<(Coord, Shot)>,
    winner: Option<Player>,
    /// Hits landed by each player, indexed like `seas`.
    scores: [u32; 2],
    status: GameStatus,
    rng: R,
}

impl<R: RandomSource> Battleship<R> {
    pub fn new(config: &BattleshipConfig, mut rng: R) -> GameResult<Self> {
        config.validate()?;
        let one = place_fleet(config.size, &config.ship_lengths, &mut rng)?;
        let two = place_fleet(config.size, &config.ship_lengths, &mut rng)?;
        Self::with_fleets(config, one, two, rng)
    }

    /// Start with explicit fleets for player one and player two (or the AI).
    pub fn with_fleets(
        config: &BattleshipConfig,
        player_one: Vec<Vec<Coord>>,
        player_two: Vec<Vec<Coord>>,
        rng: R,
    ) -> GameResult<Self> {
        let seas = [
            Sea::new(config.size, &player_one)?,
            Sea::new(config.size, &player_two)?,
        ];
        Ok(Self {
            seas,
            mode: config.mode,
            to_move: Player::One,
            gunner: AiGunner::new(config.size),
            last_shot: None,
            last_ai_shot: None,
            winner: None,
            scores: [0; 2],
            status: GameStatus::InProgress,
            rng,
        })
    }

    pub fn mode(&self) -> BattleshipMode {
        self.mode
    }

    /// Player whose shot is next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Latest shot fired by a human player.
    pub fn last_shot(&self) -> Option<(Coord, Shot)> {
        self.last_shot
    }

    /// Latest shot fired by the automated opponent.
    pub fn last_ai_shot(&self) -> Option<(Coord, Shot)> {
        self.last_ai_shot
    }

    pub fn gunner(&self) -> &AiGunner {
        &self.gunner
    }

    /// Hits `player` has landed on the other fleet.
    pub fn score_of(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Hits landed on `player`'s fleet so far.
    pub fn hits_taken(&self, player: Player) -> usize {
        self.seas[player.index()].hits
    }

    fn finish(&mut self, winner: Player) -> bool {
        let next = match (self.mode, winner) {
            (BattleshipMode::VsAi, Player::Two) => GameStatus::Lost,
            _ => GameStatus::Won,
        };
        self.winner = Some(winner);
        transition(GameKind::Battleship, &mut self.status, next)
    }

    fn fire(&mut self, at: Coord) -> GameResult<StepResult> {
        let shooter = self.to_move;
        let target = shooter.other().index();

        let Some(shot) = self.seas[target].outcome(at)? else {
            return Ok(log_rejected(
                GameKind::Battleship,
                Action::Fire(at),
                Rejection::InvalidAction,
            ));
        };
        let sinks = shot == Shot::Hit && self.seas[target].hits + 1 == self.seas[target].ship_cells;

        // The reply is drawn before anything is recorded.
        let reply = if self.mode == BattleshipMode::VsAi && !sinks {
            self.gunner.next_target(&mut self.rng)?
        } else {
            None
        };

        self.seas[target].record(at, shot)?;
        self.last_shot = Some((at, shot));
        let gained = u32::from(shot == Shot::Hit);
        self.scores[shooter.index()] += gained;

        if sinks {
            let changed = self.finish(shooter);
            return Ok(StepResult::accepted()
                .with_score(gained)
                .with_status_change(changed));
        }

        let mut changed = false;
        match self.mode {
            BattleshipMode::Hotseat => self.to_move = shooter.other(),
            BattleshipMode::VsAi => {
                if let Some(ai_at) = reply {
                    changed = self.ai_fire(ai_at)?;
                }
            }
        }
        Ok(StepResult::accepted()
            .with_score(gained)
            .with_status_change(changed))
    }

    fn ai_fire(&mut self, at: Coord) -> GameResult<bool> {
        let own = Player::One.index();
        let shot = match self.seas[own].outcome(at)? {
            Some(shot) => shot,
            None => return Ok(false),
        };
        self.seas[own].record(at, shot)?;
        self.last_ai_shot = Some((at, shot));
        tracing::debug!(x = at.x, y = at.y, ?shot, "ai fired");
        if self.seas[own].sunk() {
            return Ok(self.finish(Player::Two));
        }
        Ok(false)
    }
}

impl<R: RandomSource> GameRules for Battleship<R> {
    fn kind(&self) -> GameKind {
        GameKind::Battleship
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        match action {
            Action::Fire(at) => self.fire(at),
            other => Ok(log_rejected(GameKind::Battleship, other, Rejection::Unsupported)),
        }
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    /// Score of the player at the controls: the human against the AI, the
    /// side to move in hotseat (the winner once the round is over).
    fn score(&self) -> u32 {
        self.score_of(self.to_move)
    }

    fn view(&self) -> GridModel<Cell> {
        let own = &self.seas[self.to_move.index()];
        let enemy = &self.seas[self.to_move.other().index()];
        let size = own.ships.width();

        let shot_cell = |shot: Option<Shot>| match shot {
            Some(Shot::Hit) => Cell::Hit,
            Some(Shot::Miss) => Cell::Miss,
            None => Cell::Empty,
        };

        let rows = (0..size)
            .map(|y| {
                let mut row = Vec::with_capacity((size * 2 + 1) as usize);
                for x in 0..size {
                    row.push(shot_cell(enemy.incoming.get(x, y).flatten()));
                }
                row.push(Cell::Divider);
                for x in 0..size {
                    let incoming = own.incoming.get(x, y).flatten();
                    row.push(match incoming {
                        None if own.ships.get(x, y) == Some(true) => Cell::Ship,
                        other => shot_cell(other),
                    });
                }
                row
            })
            .collect();
        GridModel::from_rows(rows).unwrap_or_else(|_| own.ships.map(|_| Cell::Empty))
    }

    fn summary(&self) -> String {
        let hits = |p: Player| {
            let sea = &self.seas[p.index()];
            format!("{}/{}", sea.hits, sea.ship_cells)
        };
        match (self.mode, self.winner) {
            (BattleshipMode::VsAi, Some(Player::One)) => "You win!".to_string(),
            (BattleshipMode::VsAi, Some(Player::Two)) => "AI wins!".to_string(),
            (BattleshipMode::Hotseat, Some(p)) => format!("{} wins!", p.label()),
            (BattleshipMode::VsAi, None) => {
                format!("Hits: {}  AI hits: {}", hits(Player::Two), hits(Player::One))
            }
            (BattleshipMode::Hotseat, None) => format!(
                "{} to fire  Hits: {}",
                self.to_move.label(),
                hits(self.to_move.other())
            ),
        }
    }
}
