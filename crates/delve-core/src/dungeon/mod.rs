//! Dungeon model: geometry, squares, rooms, corridors and the level that
//! ties them together.

mod corridor;
mod level;
mod position;
mod room;
mod square;

pub use corridor::{CorridorBuilder, GridCorridorFactory};
pub use level::{FeatureId, Level};
pub use position::{Direction, Position};
pub use room::Room;
pub use square::{Square, SquareStore, SquareType};
