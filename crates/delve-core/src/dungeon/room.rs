//! Rectangular rooms.
//!
//! A room owns its squares: four corner walls, the edge walls between
//! them and an interior rectangle of floor. Topology never changes after
//! construction except for doorway carving during corridor generation.

use delve_rng::GameRng;
use serde::{Deserialize, Serialize};

use crate::consts::{ROOM_HEIGHT_DICE, ROOM_MIN_DIM, ROOM_WIDTH_DICE, SCREEN_H, SCREEN_W};
use crate::dungeon::{Position, Square, SquareStore, SquareType};

/// A rectangular room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room.
    pub top_left: Position,
    /// Horizontal span, walls included.
    pub width: i32,
    /// Vertical span, walls included.
    pub height: i32,
    /// Rooms that are not `lit` never light up globally.
    pub lit: bool,
    squares: SquareStore,
}

impl Room {
    /// Build a room at a fixed location.
    pub fn new(top_left: Position, width: i32, height: i32) -> Self {
        let mut room = Self {
            top_left,
            width,
            height,
            lit: true,
            squares: SquareStore::new(),
        };
        room.build_squares();
        room
    }

    /// Generate a room with dice-rolled dimensions, placed uniformly so it
    /// fits on screen.
    pub fn create(rng: &mut GameRng) -> Self {
        let width = ROOM_MIN_DIM + rng.roll(ROOM_WIDTH_DICE.0, ROOM_WIDTH_DICE.1) as i32 - 1;
        let height = ROOM_MIN_DIM + rng.roll(ROOM_HEIGHT_DICE.0, ROOM_HEIGHT_DICE.1) as i32 - 1;
        let top_left = Position::new(
            rng.range(0, SCREEN_W - width - 1),
            rng.range(0, SCREEN_H - height - 1),
        );
        Room::new(top_left, width, height)
    }

    /// Bounding box as `(left, top, right, bottom)`, inclusive.
    pub fn bbox(&self) -> (i32, i32, i32, i32) {
        (
            self.top_left.col,
            self.top_left.row,
            self.top_left.col + self.width - 1,
            self.top_left.row + self.height - 1,
        )
    }

    /// Corner positions in CCW order (TL, BL, BR, TR).
    pub fn corners(&self) -> [Position; 4] {
        let (left, top, right, bottom) = self.bbox();
        [
            Position::new(left, top),
            Position::new(left, bottom),
            Position::new(right, bottom),
            Position::new(right, top),
        ]
    }

    /// Check if the margin-expanded bounding boxes of `self` and `other`
    /// overlap.
    pub fn intersects(&self, other: &Room, margin: i32) -> bool {
        let a = self.bbox();
        let b = other.bbox();
        !(a.0 > b.2 + margin    // self right of other
            || a.2 < b.0 - margin   // self left of other
            || a.1 > b.3 + margin   // self below other
            || a.3 < b.1 - margin) // self above other
    }

    /// Turn the room light on or off.
    ///
    /// Lighting up additionally marks every square known; unlit rooms
    /// (`lit == false`) never light up.
    pub fn switch_lights(&mut self, on: bool) {
        let on = on && self.lit;
        self.squares.switch_lights(on);
        if on {
            for sq in self.squares.values_mut() {
                sq.known = true;
            }
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.squares.contains(pos)
    }

    pub fn get(&self, pos: Position) -> Option<&Square> {
        self.squares.get(pos)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Square> {
        self.squares.get_mut(pos)
    }

    /// Carve a square out of the room (doorway creation).
    pub fn carve(&mut self, pos: Position) -> Option<Square> {
        self.squares.remove(pos)
    }

    pub fn store(&self) -> &SquareStore {
        &self.squares
    }

    pub(crate) fn store_mut(&mut self) -> &mut SquareStore {
        &mut self.squares
    }

    pub fn random_walkable(&self, rng: &mut GameRng) -> Option<Position> {
        self.squares.random_walkable(rng)
    }

    fn build_squares(&mut self) {
        let (left, top, right, bottom) = self.bbox();
        let corner_types = [
            SquareType::WallTopLeft,
            SquareType::WallBottomLeft,
            SquareType::WallBottomRight,
            SquareType::WallTopRight,
        ];
        for (pos, typ) in self.corners().into_iter().zip(corner_types) {
            self.squares.insert(pos, Square::new(typ));
        }
        for col in left + 1..right {
            self.squares
                .insert(Position::new(col, top), Square::new(SquareType::WallHorizontal));
            self.squares
                .insert(Position::new(col, bottom), Square::new(SquareType::WallHorizontal));
        }
        for row in top + 1..bottom {
            self.squares
                .insert(Position::new(left, row), Square::new(SquareType::WallVertical));
            self.squares
                .insert(Position::new(right, row), Square::new(SquareType::WallVertical));
        }
        for col in left + 1..right {
            for row in top + 1..bottom {
                self.squares
                    .insert(Position::new(col, row), Square::new(SquareType::Room));
            }
        }
    }
}
