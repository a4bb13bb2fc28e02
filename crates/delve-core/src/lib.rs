//! delve-core: dungeon generation and turn engine for the delve roguelike.
//!
//! This crate contains all game logic with no I/O dependencies. A level is
//! generated once at game start (rooms by rejection sampling, corridors by
//! shortest-path search); afterwards every external input becomes one
//! [`action::Command`] which the [`game::Game`] dispatcher drains to
//! completion, emitting user-visible notifications as it goes.
//!
//! Presentation layers consume the notification queue and the square
//! enumeration; they never mutate state except through `add_command`.

pub mod action;
pub mod dungeon;
pub mod game;
pub mod object;
pub mod player;

mod consts;
mod errors;

pub use consts::*;
pub use delve_rng::GameRng;
pub use errors::{InventoryError, LevelError};
