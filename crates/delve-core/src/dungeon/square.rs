//! Map squares and the position-to-square container.

use std::collections::BTreeMap;

use delve_rng::GameRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Position;
use crate::object::Item;

/// Square/terrain type.
///
/// Walkability is decided by which partition a variant belongs to, via a
/// direct match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SquareType {
    Room,
    Corridor,
    Doorway,
    WallTopLeft,
    WallTopRight,
    WallBottomLeft,
    WallBottomRight,
    WallHorizontal,
    WallVertical,
}

impl SquareType {
    /// Check if creatures can walk on this square type.
    pub const fn is_walkable(self) -> bool {
        matches!(
            self,
            SquareType::Room | SquareType::Corridor | SquareType::Doorway
        )
    }

    /// Check if this is a wall type.
    pub const fn is_wall(self) -> bool {
        !self.is_walkable()
    }
}

/// One map cell.
///
/// Topology (`typ`) is immutable after generation; only `known`, the
/// explicit light flag and the item list mutate during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    /// Terrain type.
    pub typ: SquareType,
    /// Whether the player has ever observed this square. Persists.
    pub known: bool,
    /// Explicit light flag; see [`Square::lit`] for the derived value.
    lit: bool,
    /// Items lying on the square, in drop order.
    pub items: Vec<Item>,
}

impl Square {
    pub fn new(typ: SquareType) -> Self {
        Self {
            typ,
            known: false,
            lit: false,
            items: Vec::new(),
        }
    }

    /// Whether the square is currently rendered as illuminated.
    ///
    /// Walls stay visible forever once observed; walkable squares go dark
    /// again when the explicit light is switched off.
    pub fn lit(&self) -> bool {
        self.lit || (self.known && !self.typ.is_walkable())
    }

    /// Set the explicit light flag.
    pub fn set_lit(&mut self, on: bool) {
        self.lit = on;
    }
}

/// Maps positions to squares, with bulk operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquareStore {
    squares: BTreeMap<Position, Square>,
}

impl SquareStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: Position, square: Square) {
        self.squares.insert(pos, square);
    }

    pub fn remove(&mut self, pos: Position) -> Option<Square> {
        self.squares.remove(&pos)
    }

    pub fn get(&self, pos: Position) -> Option<&Square> {
        self.squares.get(&pos)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Square> {
        self.squares.get_mut(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.squares.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Square)> {
        self.squares.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.squares.keys().copied()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Square> {
        self.squares.values_mut()
    }

    /// Turn the explicit light on or off on every square.
    pub fn switch_lights(&mut self, on: bool) {
        for sq in self.squares.values_mut() {
            sq.set_lit(on);
        }
    }

    /// A uniform-random position mapped to a walkable square, if any.
    pub fn random_walkable(&self, rng: &mut GameRng) -> Option<Position> {
        let walkable: Vec<Position> = self
            .squares
            .iter()
            .filter(|(_, sq)| sq.typ.is_walkable())
            .map(|(pos, _)| *pos)
            .collect();
        rng.choose(&walkable).copied()
    }
}
