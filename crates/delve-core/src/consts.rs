//! Game-wide constants.

/// Map width in columns.
pub const SCREEN_W: i32 = 79;

/// Map height in rows.
pub const SCREEN_H: i32 = 21;

/// Maximum number of rooms in a level.
pub const MAX_ROOMS: usize = 9;

/// Maximum number of placement attempts before the generator gives up.
pub const MAX_ATTEMPTS: usize = 400;

/// Minimum room dimension, walls included.
pub const ROOM_MIN_DIM: i32 = 5;

/// Dice added to the minimum room width (2d8).
pub const ROOM_WIDTH_DICE: (u32, u32) = (2, 8);

/// Dice added to the minimum room height (1d6).
pub const ROOM_HEIGHT_DICE: (u32, u32) = (1, 6);

/// Inclusive bounds for the per-pair room separation margin.
pub const ROOM_MARGIN_MIN: i32 = 3;
pub const ROOM_MARGIN_MAX: i32 = 6;

/// Attempt bound for picking a doorway square on a room perimeter.
pub const MAX_DOORWAY_ATTEMPTS: usize = 100;

/// Number of inventory slots (a-z, A-Z).
pub const MAX_INVENTORY_SLOTS: usize = 52;

/// Inventory slot letters in assignment order.
pub const INVENTORY_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Starting hit points for a new player.
pub const PLAYER_START_HP: i32 = 10;
