//! Error taxonomy.
//!
//! Everything here is recoverable or diagnosable: lookup misses are
//! swallowed by callers, inventory conditions become in-game messages, and
//! generation failures abort level construction before gameplay starts.

use thiserror::Error;

use crate::dungeon::Position;

/// Errors raised by level generation and square lookup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    #[error("no feature contains {0:?}")]
    NoSuchSquare(Position),

    #[error("no corridor path from {from:?} to {to:?}")]
    NoPath { from: Position, to: Position },

    #[error("no valid doorway square found on room at {top_left:?}")]
    DoorwayExhausted { top_left: Position },

    #[error("level generation placed no rooms")]
    NoRooms,
}

/// Errors raised by inventory operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    #[error("all inventory slots are in use")]
    Full,

    #[error("the inventory holds no eligible items")]
    Empty,
}
