//! A dungeon level: rooms placed by rejection sampling plus the corridor
//! network that connects them, with unified square lookup across both.

use delve_rng::GameRng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ATTEMPTS, MAX_ROOMS, ROOM_MARGIN_MAX, ROOM_MARGIN_MIN};
use crate::dungeon::corridor::{CorridorBuilder, GridCorridorFactory};
use crate::dungeon::{Position, Room, Square, SquareStore};
use crate::errors::LevelError;

/// Handle to the feature (room or corridor store) containing a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureId {
    Room(usize),
    Corridor(usize),
}

/// A dungeon level.
///
/// Created once per game; room topology never changes after generation
/// (only light, knowledge and item state mutate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    rooms: Vec<Room>,
    corridors: Vec<SquareStore>,
}

impl Level {
    /// Build a random dungeon level.
    ///
    /// Rooms are accepted only when their margin-expanded bounding box
    /// (fresh random margin per pair check) clears every accepted room.
    /// Exhausting the attempt budget with fewer than [`MAX_ROOMS`] rooms
    /// is fine; placing none at all is not.
    pub fn generate(rng: &mut GameRng) -> Result<Level, LevelError> {
        let mut rooms: Vec<Room> = Vec::with_capacity(MAX_ROOMS);
        for _ in 0..MAX_ATTEMPTS {
            if rooms.len() == MAX_ROOMS {
                break;
            }
            let candidate = Room::create(rng);
            let blocked = rooms
                .iter()
                .any(|room| candidate.intersects(room, rng.range(ROOM_MARGIN_MIN, ROOM_MARGIN_MAX)));
            if !blocked {
                rooms.push(candidate);
            }
        }
        Level::from_rooms(rooms, rng)
    }

    /// Build a level from pre-placed rooms, generating corridors for them.
    pub fn from_rooms(mut rooms: Vec<Room>, rng: &mut GameRng) -> Result<Level, LevelError> {
        if rooms.is_empty() {
            return Err(LevelError::NoRooms);
        }
        let corridors = vec![GridCorridorFactory.build(&mut rooms, rng)?];
        Ok(Level { rooms, corridors })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    pub fn corridors(&self) -> &[SquareStore] {
        &self.corridors
    }

    /// The feature containing `pos`, if any.
    pub fn locate(&self, pos: Position) -> Option<FeatureId> {
        for (i, room) in self.rooms.iter().enumerate() {
            if room.contains(pos) {
                return Some(FeatureId::Room(i));
            }
        }
        for (i, corridor) in self.corridors.iter().enumerate() {
            if corridor.contains(pos) {
                return Some(FeatureId::Corridor(i));
            }
        }
        None
    }

    /// Look up the square at `pos` across all features.
    pub fn square(&self, pos: Position) -> Result<&Square, LevelError> {
        self.rooms
            .iter()
            .find_map(|room| room.get(pos))
            .or_else(|| self.corridors.iter().find_map(|c| c.get(pos)))
            .ok_or(LevelError::NoSuchSquare(pos))
    }

    pub fn square_mut(&mut self, pos: Position) -> Result<&mut Square, LevelError> {
        for room in &mut self.rooms {
            if room.contains(pos) {
                return room.get_mut(pos).ok_or(LevelError::NoSuchSquare(pos));
            }
        }
        for corridor in &mut self.corridors {
            if corridor.contains(pos) {
                return corridor.get_mut(pos).ok_or(LevelError::NoSuchSquare(pos));
            }
        }
        Err(LevelError::NoSuchSquare(pos))
    }

    /// All `(position, square)` pairs across every feature. Lazy;
    /// restartable by calling again.
    pub fn squares(&self) -> impl Iterator<Item = (Position, &Square)> {
        self.rooms
            .iter()
            .map(Room::store)
            .chain(self.corridors.iter())
            .flat_map(|store| store.iter().map(|(pos, sq)| (*pos, sq)))
    }

    /// Mutable access to every square across every feature.
    pub(crate) fn squares_mut(&mut self) -> impl Iterator<Item = &mut Square> {
        self.rooms
            .iter_mut()
            .map(Room::store_mut)
            .chain(self.corridors.iter_mut())
            .flat_map(|store| store.values_mut())
    }

    /// A random walkable position inside the level.
    ///
    /// Picks a feature uniformly, then a walkable square inside it,
    /// scanning onward when the picked feature has none.
    pub fn random_walkable(&self, rng: &mut GameRng, with_corridors: bool) -> Option<Position> {
        let mut stores: Vec<&SquareStore> = self.rooms.iter().map(Room::store).collect();
        if with_corridors {
            stores.extend(self.corridors.iter());
        }
        if stores.is_empty() {
            return None;
        }
        let first = rng.below(stores.len() as u32) as usize;
        for offset in 0..stores.len() {
            let store = stores[(first + offset) % stores.len()];
            if let Some(pos) = store.random_walkable(rng) {
                return Some(pos);
            }
        }
        None
    }
}
