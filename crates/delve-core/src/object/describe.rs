//! Item naming.
//!
//! The name the player sees for an item depends on whether its kind has
//! been identified and whether its beatitude is known. Unidentified items
//! show a cosmetic appearance ("an emerald potion", "a scroll labeled
//! READ ME") randomly paired with their kind at game start.

use std::collections::{HashMap, HashSet};

use delve_rng::GameRng;
use strum::IntoEnumIterator;

use crate::object::{Item, ItemCategory, ItemKind};

/// Names items for the player and tracks which kinds are identified.
pub trait ItemNamer {
    /// The description of the item, article included.
    fn describe(&self, item: &Item) -> String;

    /// Plural form of a category, for popup headers.
    fn plural(&self, category: ItemCategory) -> String;

    /// Record that the player identified this kind.
    fn mark_known(&mut self, kind: ItemKind);

    fn is_known(&self, kind: ItemKind) -> bool;
}

const POTION_APPEARANCES: &[&str] = &["emerald", "black", "golden"];
const SCROLL_APPEARANCES: &[&str] = &["READ ME", "YUM YUM"];

/// English-language namer.
pub struct EnglishNamer {
    known: HashSet<ItemKind>,
    appearances: HashMap<ItemKind, &'static str>,
}

impl EnglishNamer {
    /// Create a namer with a fresh random appearance-to-kind pairing.
    pub fn new(rng: &mut GameRng) -> Self {
        let mut appearances = HashMap::new();
        for category in ItemCategory::iter() {
            let mut pool: Vec<&'static str> = match category {
                ItemCategory::Potion => POTION_APPEARANCES.to_vec(),
                ItemCategory::Scroll => SCROLL_APPEARANCES.to_vec(),
            };
            for kind in ItemKind::iter().filter(|k| k.category() == category) {
                if pool.is_empty() {
                    break;
                }
                let picked = pool.swap_remove(rng.below(pool.len() as u32) as usize);
                appearances.insert(kind, picked);
            }
        }
        Self {
            known: HashSet::new(),
            appearances,
        }
    }

    fn category_name(category: ItemCategory) -> &'static str {
        match category {
            ItemCategory::Potion => "potion",
            ItemCategory::Scroll => "scroll",
        }
    }

    fn kind_name(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::HealingPotion | ItemKind::HealingScroll => "healing",
        }
    }

    fn add_article(noun: String) -> String {
        match noun.chars().next() {
            Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => format!("an {}", noun),
            _ => format!("a {}", noun),
        }
    }
}

impl ItemNamer for EnglishNamer {
    fn describe(&self, item: &Item) -> String {
        let body = if self.known.contains(&item.kind) {
            format!(
                "{} of {}",
                Self::category_name(item.category()),
                Self::kind_name(item.kind)
            )
        } else {
            let appearance = self.appearances.get(&item.kind).copied().unwrap_or("murky");
            match item.category() {
                ItemCategory::Potion => format!("{} potion", appearance),
                ItemCategory::Scroll => format!("scroll labeled {}", appearance),
            }
        };
        let body = if item.beatitude_known {
            format!("{} {}", item.beatitude, body)
        } else {
            body
        };
        Self::add_article(body)
    }

    fn plural(&self, category: ItemCategory) -> String {
        match category {
            ItemCategory::Potion => "potions".to_string(),
            ItemCategory::Scroll => "scrolls".to_string(),
        }
    }

    fn mark_known(&mut self, kind: ItemKind) {
        self.known.insert(kind);
    }

    fn is_known(&self, kind: ItemKind) -> bool {
        self.known.contains(&kind)
    }
}

/// Capitalize the first character, for popup headers.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
