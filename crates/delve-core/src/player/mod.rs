//! Creatures, the player, and hit points.

use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_START_HP;
use crate::dungeon::{Direction, FeatureId, Level, Position, Square};
use crate::errors::LevelError;
use crate::object::Inventory;

/// An actor positioned on a level.
///
/// The containing level is never stored as a back-reference; operations
/// that touch it borrow it explicitly at the call site.
pub trait Creature {
    fn position(&self) -> Position;
    fn health(&self) -> &Health;
    fn health_mut(&mut self) -> &mut Health;
    /// React to the death signal from [`Health::damage`].
    fn die(&mut self);
}

/// Hit points with clamped damage/heal semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    max_hp: i32,
    current_hp: i32,
}

impl Health {
    /// A full health pool. The maximum is at least 1 so that percentage
    /// math is always defined.
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            max_hp,
            current_hp: max_hp,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    /// Percentage health, integer division.
    pub fn percent(&self) -> i32 {
        self.current_hp * 100 / self.max_hp
    }

    /// Deal `points` damage, keeping hit points within `0..=max_hp`
    /// (negative points never push above the maximum).
    ///
    /// Returns `true` exactly when this call drove the hit points to 0;
    /// the caller forwards that to [`Creature::die`].
    pub fn damage(&mut self, points: i32) -> bool {
        if self.current_hp == 0 {
            return false;
        }
        self.current_hp = (self.current_hp - points).clamp(0, self.max_hp);
        self.current_hp == 0
    }

    /// Restore `points`, keeping hit points within `0..=max_hp` (negative
    /// points never push below zero).
    pub fn heal(&mut self, points: i32) {
        self.current_hp = (self.current_hp + points).clamp(0, self.max_hp);
    }
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub pos: Position,
    pub health: Health,
    pub inventory: Inventory,
}

impl Player {
    /// Create a player at `pos` with full health and an empty inventory,
    /// and light up the starting area.
    pub fn create(pos: Position, level: &mut Level) -> Self {
        let player = Self {
            name: "Adventurer".to_string(),
            pos,
            health: Health::new(PLAYER_START_HP),
            inventory: Inventory::new(),
        };
        player.update_lights(level);
        player
    }

    /// The square the player stands on.
    pub fn square<'a>(&self, level: &'a Level) -> Result<&'a Square, LevelError> {
        level.square(self.pos)
    }

    /// Step one square in `direction`.
    ///
    /// Walks only onto existing walkable squares and recomputes visibility
    /// after moving. A blocked or off-map step is a strict no-op and
    /// returns `false`.
    pub fn walk(&mut self, direction: Direction, level: &mut Level) -> bool {
        let target = self.pos + direction.delta();
        match level.square(target) {
            Ok(square) if square.typ.is_walkable() => {
                self.pos = target;
                self.update_lights(level);
                true
            }
            _ => false,
        }
    }

    /// Recompute the visibility window around the player.
    ///
    /// A room is globally lit iff it is the feature the player stands in;
    /// corridors are never globally lit. The player's own square and every
    /// 8-neighbor belonging to some feature are force-lit and marked
    /// known. Lookup misses are treated as "nothing there".
    pub fn update_lights(&self, level: &mut Level) {
        let here = level.locate(self.pos);
        for i in 0..level.rooms().len() {
            let current = here == Some(FeatureId::Room(i));
            level.rooms_mut()[i].switch_lights(current);
        }
        if let Ok(square) = level.square_mut(self.pos) {
            square.set_lit(true);
            square.known = true;
        }
        for neighbor in self.pos.neighbors(true) {
            if level.locate(neighbor).is_some() {
                if let Ok(square) = level.square_mut(neighbor) {
                    square.set_lit(true);
                    square.known = true;
                }
            }
        }
    }
}

impl Creature for Player {
    fn position(&self) -> Position {
        self.pos
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn die(&mut self) {
        // Player death ends the run at the presentation layer.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Room;
    use delve_rng::GameRng;
    use proptest::prelude::*;

    fn two_room_level() -> Level {
        let rooms = vec![
            Room::new(Position::new(1, 1), 7, 7),
            Room::new(Position::new(40, 10), 7, 7),
        ];
        let mut rng = GameRng::new(42);
        Level::from_rooms(rooms, &mut rng).unwrap()
    }

    #[test]
    fn test_damage_clamps_and_signals_once() {
        let mut health = Health::new(10);
        assert!(!health.damage(4));
        assert_eq!(health.current_hp(), 6);
        assert!(health.damage(100));
        assert_eq!(health.current_hp(), 0);
        // Already dead: never signals again.
        assert!(!health.damage(5));
        assert_eq!(health.current_hp(), 0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut health = Health::new(10);
        health.damage(3);
        health.heal(100);
        assert_eq!(health.current_hp(), 10);
    }

    #[test]
    fn test_negative_damage_cannot_overheal() {
        let mut health = Health::new(10);
        assert!(!health.damage(-5));
        assert_eq!(health.current_hp(), 10);
    }

    #[test]
    fn test_negative_heal_cannot_underflow() {
        let mut health = Health::new(10);
        health.heal(-100);
        assert_eq!(health.current_hp(), 0);
    }

    #[test]
    fn test_max_hp_is_at_least_one() {
        let health = Health::new(0);
        assert_eq!(health.max_hp(), 1);
        assert_eq!(health.percent(), 100);
    }

    #[test]
    fn test_percent_integer_division() {
        let mut health = Health::new(3);
        health.damage(1);
        assert_eq!(health.percent(), 66);
    }

    #[test]
    fn test_walk_into_open_square() {
        let mut level = two_room_level();
        let mut player = Player::create(Position::new(3, 3), &mut level);
        assert!(player.walk(Direction::E, &mut level));
        assert_eq!(player.pos, Position::new(4, 3));
    }

    #[test]
    fn test_walk_into_wall_is_noop() {
        let mut level = two_room_level();
        let mut player = Player::create(Position::new(2, 2), &mut level);
        let hp_before = player.health.current_hp();
        assert!(!player.walk(Direction::NW, &mut level));
        assert_eq!(player.pos, Position::new(2, 2));
        // No bump damage.
        assert_eq!(player.health.current_hp(), hp_before);
    }

    #[test]
    fn test_walk_off_feature_is_noop() {
        let mut level = two_room_level();
        // Stand outside every feature: the missing-square lookup is
        // swallowed and the step does nothing.
        let mut player = Player::create(Position::new(3, 3), &mut level);
        player.pos = Position::new(60, 18);
        assert!(!player.walk(Direction::E, &mut level));
        assert_eq!(player.pos, Position::new(60, 18));
    }

    #[test]
    fn test_update_lights_current_room_only() {
        let mut level = two_room_level();
        let player = Player::create(Position::new(3, 3), &mut level);
        player.update_lights(&mut level);

        assert!(level.square(Position::new(5, 5)).unwrap().lit());
        assert!(level.square(Position::new(5, 5)).unwrap().known);
        // The other room stays dark and unknown.
        let far = level.square(Position::new(43, 13)).unwrap();
        assert!(!far.lit());
        assert!(!far.known);
    }

    #[test]
    fn test_update_lights_corridor_edge() {
        let mut level = two_room_level();
        // Find a doorway and stand on it: the room light goes out but the
        // player's square and its feature-owned neighbors stay lit.
        let doorway = level
            .squares()
            .find(|(_, sq)| sq.typ == crate::dungeon::SquareType::Doorway)
            .map(|(pos, _)| pos)
            .unwrap();
        let mut player = Player::create(Position::new(3, 3), &mut level);
        player.pos = doorway;
        player.update_lights(&mut level);

        let own = level.square(doorway).unwrap();
        assert!(own.lit() && own.known);
        for neighbor in doorway.neighbors(true) {
            if let Ok(square) = level.square(neighbor) {
                assert!(square.lit());
                assert!(square.known);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(ops in proptest::collection::vec((any::<bool>(), -50..50i32), 0..64)) {
            let mut health = Health::new(10);
            for (is_damage, points) in ops {
                if is_damage {
                    health.damage(points);
                } else {
                    health.heal(points);
                }
                prop_assert!(health.current_hp() >= 0);
                prop_assert!(health.current_hp() <= health.max_hp());
            }
        }
    }
}
