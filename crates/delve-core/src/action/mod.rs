//! The command set.
//!
//! Every external input becomes one [`Command`]; executing a command may
//! mutate game state and return follow-up commands, which the dispatcher
//! in [`crate::game`] runs before anything previously queued.

use crate::dungeon::Direction;
use crate::game::{Game, InventoryQuery};
use crate::object::{capitalize, slot_label, ItemCategory, ItemEffect, ItemId};

/// A player- or system-issued action.
///
/// Commands are ephemeral: constructed, executed once, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Step the player one square.
    Move(Direction),
    /// Take the sole item on the player's square.
    Pickup,
    /// Drink a potion from the inventory.
    Quaff(ItemId),
    /// List the inventory grouped by category.
    ShowInventory,
    /// Open an item-selection prompt feeding `callback`.
    AddInventoryQuery {
        callback: QueryCallback,
        filter: Option<ItemCategory>,
    },
    /// Queue a one-line message.
    AddMessage(String),
    /// Queue a titled multi-line popup.
    AddPopup { title: String, body: Vec<String> },
    /// Restore hit points: a fixed base plus a dice roll.
    Heal { base: i32, dice: (u32, u32) },
}

/// The command an [`InventoryQuery`] issues for the chosen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCallback {
    Quaff,
}

impl QueryCallback {
    /// Infinitive used in prompts and empty-inventory messages.
    pub fn verb(self) -> &'static str {
        match self {
            QueryCallback::Quaff => "to drink",
        }
    }

    /// Bind the callback to the chosen item.
    pub fn command(self, item: ItemId) -> Command {
        match self {
            QueryCallback::Quaff => Command::Quaff(item),
        }
    }
}

impl Command {
    /// Execute the command against the game, returning follow-ups.
    pub fn execute(self, game: &mut Game) -> Vec<Command> {
        match self {
            Command::Move(direction) => execute_move(game, direction),
            Command::Pickup => execute_pickup(game),
            Command::Quaff(item) => execute_quaff(game, item),
            Command::ShowInventory => execute_show_inventory(game),
            Command::AddInventoryQuery { callback, filter } => {
                execute_add_query(game, callback, filter)
            }
            Command::AddMessage(msg) => {
                game.add_message(msg);
                Vec::new()
            }
            Command::AddPopup { title, body } => {
                game.add_popup(title, body);
                Vec::new()
            }
            Command::Heal { base, dice } => execute_heal(game, base, dice),
        }
    }
}

fn execute_move(game: &mut Game, direction: Direction) -> Vec<Command> {
    if !game.player.walk(direction, &mut game.level) {
        return Vec::new();
    }
    let Ok(square) = game.level.square(game.player.pos) else {
        return Vec::new();
    };
    match square.items.as_slice() {
        [] => Vec::new(),
        [item] => vec![Command::AddMessage(format!(
            "You see here {}.",
            game.namer.describe(item)
        ))],
        items => vec![Command::AddPopup {
            title: "Things that are here:".to_string(),
            body: items.iter().map(|item| game.namer.describe(item)).collect(),
        }],
    }
}

fn execute_pickup(game: &mut Game) -> Vec<Command> {
    let pos = game.player.pos;
    let count = game.level.square(pos).map(|sq| sq.items.len()).unwrap_or(0);
    if count == 0 {
        game.add_message("There is nothing here to pick up.");
        return Vec::new();
    }
    if count > 1 {
        // More than one item cannot be auto-picked-up.
        game.add_message("There are several objects here.");
        return Vec::new();
    }
    if game.player.inventory.next_empty().is_none() {
        // The item stays on the floor.
        game.add_message("Your inventory is full.");
        return Vec::new();
    }
    let Some(item) = game
        .level
        .square_mut(pos)
        .ok()
        .and_then(|sq| sq.items.pop())
    else {
        return Vec::new();
    };
    let description = game.namer.describe(&item);
    match game.player.inventory.add(item) {
        Ok(slot) => game.add_message(slot_label(slot, &description)),
        Err(_) => game.add_message("Your inventory is full."),
    }
    Vec::new()
}

fn execute_quaff(game: &mut Game, item: ItemId) -> Vec<Command> {
    let Some(found) = game.player.inventory.get_by_id(item) else {
        return vec![Command::AddMessage("You don't have that item.".to_string())];
    };
    let kind = found.kind;
    if kind.auto_discovery() {
        game.namer.mark_known(kind);
    }
    game.destroy_item(item);
    let ItemEffect::Heal { base, dice } = kind.effect();
    vec![Command::Heal { base, dice }]
}

fn execute_show_inventory(game: &mut Game) -> Vec<Command> {
    if game.player.inventory.is_empty() {
        return vec![Command::AddMessage("Your inventory is empty.".to_string())];
    }
    let mut lines = Vec::new();
    for (category, group) in game.player.inventory.sorted() {
        lines.push(capitalize(&game.namer.plural(category)));
        for (slot, item) in group.entries_sorted() {
            lines.push(slot_label(slot, &game.namer.describe(item)));
        }
    }
    vec![Command::AddPopup {
        title: "Your inventory:".to_string(),
        body: lines,
    }]
}

fn execute_add_query(
    game: &mut Game,
    callback: QueryCallback,
    filter: Option<ItemCategory>,
) -> Vec<Command> {
    match InventoryQuery::new(&game.player.inventory, game.namer.as_ref(), callback, filter) {
        Ok(query) => {
            game.add_query(query);
            Vec::new()
        }
        Err(_) => {
            let msg = if filter.is_some() {
                format!("You don't have anything {}.", callback.verb())
            } else {
                "Your inventory is empty.".to_string()
            };
            vec![Command::AddMessage(msg)]
        }
    }
}

fn execute_heal(game: &mut Game, base: i32, dice: (u32, u32)) -> Vec<Command> {
    let points = base + game.rng.roll(dice.0, dice.1) as i32;
    game.player.health.heal(points);
    vec![Command::AddMessage(heal_message(None))]
}

/// Feedback for a heal: player vs. non-player phrasing.
fn heal_message(creature_name: Option<&str>) -> String {
    match creature_name {
        None => "You feel better.".to_string(),
        Some(name) => format!("{} looks better.", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_callback_verb_and_binding() {
        assert_eq!(QueryCallback::Quaff.verb(), "to drink");
        let id = ItemId::new(3);
        assert_eq!(QueryCallback::Quaff.command(id), Command::Quaff(id));
    }

    #[test]
    fn test_heal_message_phrasing() {
        assert_eq!(heal_message(None), "You feel better.");
        assert_eq!(heal_message(Some("the kobold")), "the kobold looks better.");
    }
}
