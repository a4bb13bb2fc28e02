//! Item model.
//!
//! A closed set of item kinds grouped into categories. Item identity is a
//! numeric id (inventory removal and query callbacks go by identity, not
//! by equality of kind).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Unique identity of one item instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// Broad item kind used for grouping and filtering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum ItemCategory {
    Potion,
    Scroll,
}

/// Concrete item kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ItemKind {
    HealingPotion,
    HealingScroll,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::HealingPotion, ItemKind::HealingScroll];

    pub const fn category(self) -> ItemCategory {
        match self {
            ItemKind::HealingPotion => ItemCategory::Potion,
            ItemKind::HealingScroll => ItemCategory::Scroll,
        }
    }

    /// Whether using the item reveals its kind to the player.
    pub const fn auto_discovery(self) -> bool {
        match self {
            ItemKind::HealingPotion | ItemKind::HealingScroll => true,
        }
    }

    /// The effect of consuming the item.
    pub const fn effect(self) -> ItemEffect {
        match self {
            ItemKind::HealingPotion => ItemEffect::Heal {
                base: 3,
                dice: (0, 0),
            },
            ItemKind::HealingScroll => ItemEffect::Heal {
                base: 1,
                dice: (0, 0),
            },
        }
    }
}

/// Outcome of consuming an item: a fixed base plus configured dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal { base: i32, dice: (u32, u32) },
}

/// Alters the behavior (and description) of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Beatitude {
    #[strum(serialize = "blessed")]
    Blessed,
    #[strum(serialize = "uncursed")]
    Uncursed,
    #[strum(serialize = "cursed")]
    Cursed,
}

/// One item instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub beatitude: Beatitude,
    pub beatitude_known: bool,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            beatitude: Beatitude::Uncursed,
            beatitude_known: false,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }
}
