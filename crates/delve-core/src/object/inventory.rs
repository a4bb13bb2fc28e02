//! Slotted, letter-addressed inventory.
//!
//! 52 slots labeled `a`-`z` then `A`-`Z`. Iteration preserves insertion
//! order; views that present slots to the player sort lowercase before
//! uppercase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::INVENTORY_LETTERS;
use crate::object::{Item, ItemCategory, ItemId};

use crate::errors::InventoryError;

/// Render one inventory entry the way the player sees it.
pub fn slot_label(slot: char, description: &str) -> String {
    format!("{} - {}", slot, description)
}

/// Ordered slot-to-item collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<(char, Item)>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` in the first free slot.
    ///
    /// Fails without mutating when every slot is taken.
    pub fn add(&mut self, item: Item) -> Result<char, InventoryError> {
        let slot = self.next_empty().ok_or(InventoryError::Full)?;
        self.slots.push((slot, item));
        Ok(slot)
    }

    /// The first unused slot letter.
    pub fn next_empty(&self) -> Option<char> {
        INVENTORY_LETTERS
            .chars()
            .find(|&letter| !self.slots.iter().any(|(slot, _)| *slot == letter))
    }

    /// Remove every slot holding the item with this identity.
    pub fn remove(&mut self, id: ItemId) {
        self.slots.retain(|(_, item)| item.id != id);
    }

    pub fn get(&self, slot: char) -> Option<&Item> {
        self.slots
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, item)| item)
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.slots.iter().map(|(_, item)| item).find(|i| i.id == id)
    }

    /// `(slot, item)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Item)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(slot, item)` pairs sorted by slot rank (lowercase first).
    pub fn entries_sorted(&self) -> Vec<(char, &Item)> {
        let mut entries: Vec<(char, &Item)> = self.iter().collect();
        entries.sort_by_key(|(slot, _)| slot_rank(*slot));
        entries
    }

    /// Group the contents by category into fresh inventories.
    pub fn sorted(&self) -> BTreeMap<ItemCategory, Inventory> {
        let mut out: BTreeMap<ItemCategory, Inventory> = BTreeMap::new();
        for (slot, item) in &self.slots {
            out.entry(item.category())
                .or_default()
                .slots
                .push((*slot, item.clone()));
        }
        out
    }

    /// A copy restricted to one category, or a plain copy without one.
    pub fn filter(&self, category: Option<ItemCategory>) -> Inventory {
        match category {
            Some(cat) => Inventory {
                slots: self
                    .slots
                    .iter()
                    .filter(|(_, item)| item.category() == cat)
                    .cloned()
                    .collect(),
            },
            None => self.clone(),
        }
    }
}

/// Slot ordering: `a`-`z` before `A`-`Z`.
fn slot_rank(slot: char) -> u8 {
    match slot {
        'a'..='z' => slot as u8 - b'a',
        'A'..='Z' => slot as u8 - b'A' + 26,
        _ => u8::MAX,
    }
}
