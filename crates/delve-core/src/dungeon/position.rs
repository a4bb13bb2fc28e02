//! Grid geometry: positions and compass directions.
//!
//! Pure value operations. Arithmetic with raw deltas is unbounded so that
//! `p + d - d == p` always holds; bounds are enforced where they matter
//! (neighbor iteration, placement checks).

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::consts::{SCREEN_H, SCREEN_W};

/// Position of an object on the map.
///
/// Ordering is column-major (column first, then row), which is the order
/// rooms are sorted in before corridor generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether this position lies on the map.
    pub const fn in_bounds(self) -> bool {
        self.col >= 0 && self.col < SCREEN_W && self.row >= 0 && self.row < SCREEN_H
    }

    /// In-bounds adjacent positions, 4-way or 8-way.
    ///
    /// Lazy and restartable (call again for a fresh iteration);
    /// out-of-bounds candidates are silently skipped.
    pub fn neighbors(self, with_diagonals: bool) -> impl Iterator<Item = Position> {
        Direction::iter()
            .filter(move |d| with_diagonals || !d.is_diagonal())
            .map(move |d| self + d.delta())
            .filter(|p| p.in_bounds())
    }

    /// Manhattan distance to another position.
    pub const fn manhattan(self, other: Position) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }
}

impl Add<(i32, i32)> for Position {
    type Output = Position;

    fn add(self, (dc, dr): (i32, i32)) -> Position {
        Position::new(self.col + dc, self.row + dr)
    }
}

impl Sub<(i32, i32)> for Position {
    type Output = Position;

    fn sub(self, (dc, dr): (i32, i32)) -> Position {
        Position::new(self.col - dc, self.row - dr)
    }
}

/// The eight compass directions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// The four orthogonal directions.
    pub const BASIC: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// The four diagonal directions.
    pub const DIAGONAL: [Direction; 4] =
        [Direction::NE, Direction::SE, Direction::SW, Direction::NW];

    /// Unit delta as `(dcol, drow)`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dc, dr) = self.delta();
        dc != 0 && dr != 0
    }
}
