//! Items, the slotted inventory, and item naming.

mod describe;
mod inventory;
mod item;

pub use describe::{EnglishNamer, ItemNamer};
pub(crate) use describe::capitalize;
pub use inventory::{slot_label, Inventory};
pub use item::{Beatitude, Item, ItemCategory, ItemEffect, ItemId, ItemKind};
