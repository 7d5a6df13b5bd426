//! Board cursor for games whose actions name a cell.

use crate::types::{Coord, Direction};

/// Selected cell, clamped to a `width` x `height` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    at: Coord,
    width: i32,
    height: i32,
}

impl Cursor {
    /// Cursor at the top-left cell.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            at: Coord::new(0, 0),
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn at(&self) -> Coord {
        self.at
    }

    /// Move one cell; stays put at the board edge.
    pub fn step(&mut self, dir: Direction) {
        let next = self.at.step(dir);
        self.at = Coord::new(
            next.x.clamp(0, self.width - 1),
            next.y.clamp(0, self.height - 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut c = Cursor::new(3, 2);
        c.step(Direction::Left);
        c.step(Direction::Up);
        assert_eq!(c.at(), Coord::new(0, 0));
        for _ in 0..5 {
            c.step(Direction::Right);
            c.step(Direction::Down);
        }
        assert_eq!(c.at(), Coord::new(2, 1));
    }
}
