//! Grid module - the bounded 2D cell container shared by every game
//!
//! Cells are stored in a flat row-major vector (`y * width + x`) for cache
//! locality. The payload type is chosen by each game: settled tetromino kinds,
//! 2048 tile values, or the unified render [`Cell`](crate::types::Cell) for
//! snapshots.
//!
//! Coordinates are signed. Reads outside the grid return `None`; writes
//! outside the grid fail with [`GameError::OutOfRange`] and never wrap or clamp.

use arrayvec::ArrayVec;

use crate::error::{GameError, GameResult};
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel<T> {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<T>,
}

impl<T: Copy> GridModel<T> {
    /// Create a grid filled with `fill`.
    ///
    /// Dimensions must be positive and the cell count must fit an `i32`.
    pub fn new(width: i32, height: i32, fill: T) -> GameResult<Self> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "grid dimensions must be positive and bounded, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cells: vec![fill; (width as usize) * (height as usize)],
        })
    }

    /// Build a grid from rows (all rows must share the same length).
    pub fn from_rows(rows: Vec<Vec<T>>) -> GameResult<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as i32;
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfig("grid rows must be non-empty".into()));
        }
        if rows.iter().any(|r| r.len() as i32 != width) {
            return Err(GameError::InvalidConfig("grid rows must have equal length".into()));
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        self.in_bounds(at.x, at.y)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn at(&self, at: Coord) -> Option<T> {
        self.get(at.x, at.y)
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i32, y: i32, value: T) -> GameResult<()> {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                Ok(())
            }
            None => Err(self.out_of_range(x, y)),
        }
    }

    pub fn put(&mut self, at: Coord, value: T) -> GameResult<()> {
        self.set(at.x, at.y, value)
    }

    /// Like [`put`](Self::put) for overlays: a cell outside the grid is
    /// clipped. Returns whether it was painted.
    pub fn paint(&mut self, at: Coord, value: T) -> bool {
        match self.index(at.x, at.y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Error value describing `(x, y)` relative to this grid.
    pub fn out_of_range(&self, x: i32, y: i32) -> GameError {
        GameError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Fail with `OutOfRange` unless `at` lies on the grid.
    pub fn check(&self, at: Coord) -> GameResult<()> {
        if self.contains(at) {
            Ok(())
        } else {
            Err(self.out_of_range(at.x, at.y))
        }
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn row(&self, y: i32) -> Option<&[T]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }

    /// Coordinates whose cell satisfies `pred`, row-major.
    pub fn coords_where(&self, pred: impl Fn(&T) -> bool) -> Vec<Coord> {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| pred(cell))
            .map(|(at, _)| at)
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }

    /// The up-to-eight on-grid neighbours of `at` (clamped to the grid edges).
    pub fn neighbors8(&self, at: Coord) -> ArrayVec<Coord, 8> {
        let mut out = ArrayVec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = at.offset(dx, dy);
                if self.contains(n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for x in 0..self.width {
            for y in 0..self.height {
                cells.push(self.cells[(y * self.width + x) as usize]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Mirror every row left-to-right.
    pub fn reverse_rows(&self) -> Self {
        let mut out = self.clone();
        for row in out.cells.chunks_mut(self.width as usize) {
            row.reverse();
        }
        out
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> GridModel<U> {
        GridModel {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Remove every row matching `remove`, shift the rows above it down and
    /// fill the freed top rows with `fill`.
    ///
    /// Remaining rows keep their relative order. Uses a two-pointer scan from
    /// the bottom with `copy_within`, so no row buffer is allocated. Returns
    /// the removed row indices, bottom to top.
    pub fn remove_rows(&mut self, remove: impl Fn(&[T]) -> bool, fill: T) -> Vec<i32> {
        let width = self.width as usize;
        let mut removed = Vec::new();
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            let start = read_y * width;
            if remove(&self.cells[start..start + width]) {
                removed.push(read_y as i32);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.cells.copy_within(start..start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = fill;
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = GridModel::new(10, 20, 0u8).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(
            GridModel::new(0, 5, 0u8),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridModel::new(5, -1, 0u8),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridModel::new(70_000, 70_000, 0u8),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_paint_clips_outside_cells() {
        let mut grid = GridModel::new(3, 2, 0u8).unwrap();
        assert!(grid.paint(Coord::new(2, 1), 7));
        assert!(!grid.paint(Coord::new(3, 1), 9));
        assert!(!grid.paint(Coord::new(-1, 0), 9));
        assert_eq!(grid.cells(), &[0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn test_set_out_of_range_is_an_error() {
        let mut grid = GridModel::new(3, 2, 0u8).unwrap();
        assert_eq!(
            grid.set(3, 0, 1),
            Err(GameError::OutOfRange {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
        assert!(grid.set(-1, 1, 1).is_err());
        // Nothing was written anywhere.
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_neighbors8_clamps_at_corner() {
        let grid = GridModel::new(4, 4, 0u8).unwrap();
        assert_eq!(grid.neighbors8(Coord::new(0, 0)).len(), 3);
        assert_eq!(grid.neighbors8(Coord::new(3, 1)).len(), 5);
        assert_eq!(grid.neighbors8(Coord::new(1, 1)).len(), 8);
    }

    #[test]
    fn test_transpose_and_reverse() {
        let grid = GridModel::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let t = grid.transpose();
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 3);
        assert_eq!(t.row(0), Some(&[1, 4][..]));
        assert_eq!(t.row(2), Some(&[3, 6][..]));
        assert_eq!(t.transpose(), grid);

        let r = grid.reverse_rows();
        assert_eq!(r.row(0), Some(&[3, 2, 1][..]));
        assert_eq!(r.reverse_rows(), grid);
    }

    #[test]
    fn test_remove_rows_keeps_order() {
        let mut grid = GridModel::from_rows(vec![
            vec![0, 0],
            vec![1, 0],
            vec![9, 9],
            vec![2, 0],
            vec![9, 9],
        ])
        .unwrap();
        let removed = grid.remove_rows(|row| row.iter().all(|&c| c == 9), 0);
        assert_eq!(removed, vec![4, 2]);
        assert_eq!(
            grid.rows().map(|r| r.to_vec()).collect::<Vec<_>>(),
            vec![vec![0, 0], vec![0, 0], vec![0, 0], vec![1, 0], vec![2, 0]]
        );
    }

    #[test]
    fn test_coords_where_row_major() {
        let grid = GridModel::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(
            grid.coords_where(|&c| c == 1),
            vec![Coord::new(1, 0), Coord::new(0, 1)]
        );
        assert_eq!(grid.count(|&c| c == 0), 2);
    }
}
