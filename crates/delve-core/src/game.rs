//! Game state and the command dispatcher.
//!
//! [`Game`] owns the level, the player, the item namer and the RNG, plus
//! two queues: commands waiting to run and notifications waiting to be
//! shown. External callers push exactly one command per turn through
//! [`Game::add_command`]; follow-up commands produced while executing jump
//! the queue, so a command's consequences resolve before anything that was
//! already waiting.

use std::collections::VecDeque;

use delve_rng::GameRng;

use crate::action::{Command, QueryCallback};
use crate::dungeon::{Level, Position};
use crate::errors::{InventoryError, LevelError};
use crate::object::{slot_label, Inventory, Item, ItemCategory, ItemId, ItemKind, ItemNamer};
use crate::player::Player;

/// Output the presentation layer has to show the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A single line for the message area.
    Message(String),
    /// A titled list, shown modally.
    Popup { title: String, body: Vec<String> },
    /// A prompt the player answers by picking an item (or cancelling).
    Query(InventoryQuery),
}

/// An item-selection prompt.
///
/// Built from a (possibly filtered) inventory snapshot; the chosen item id
/// goes back through [`InventoryQuery::respond`], which yields the command
/// to feed into [`Game::add_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    title: String,
    items: Vec<(String, ItemId)>,
    callback: QueryCallback,
}

impl InventoryQuery {
    /// Snapshot the matching items, failing if none match.
    pub fn new(
        inventory: &Inventory,
        namer: &dyn ItemNamer,
        callback: QueryCallback,
        filter: Option<ItemCategory>,
    ) -> Result<Self, InventoryError> {
        let view = inventory.filter(filter);
        if view.is_empty() {
            return Err(InventoryError::Empty);
        }
        let items = view
            .entries_sorted()
            .into_iter()
            .map(|(slot, item)| (slot_label(slot, &namer.describe(item)), item.id))
            .collect();
        Ok(Self {
            title: format!("What do you want {}?", callback.verb()),
            items,
            callback,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `(label, id)` choices in slot order.
    pub fn items(&self) -> &[(String, ItemId)] {
        &self.items
    }

    /// Turn the player's answer into the next command.
    pub fn respond(&self, choice: Option<ItemId>) -> Command {
        match choice {
            Some(item) => self.callback.command(item),
            None => Command::AddMessage("Never mind.".to_string()),
        }
    }
}

/// The whole mutable state of one run.
pub struct Game {
    pub level: Level,
    pub player: Player,
    pub namer: Box<dyn ItemNamer>,
    pub rng: GameRng,
    /// Count of commands accepted from the outside.
    pub turn: u64,
    notifications: VecDeque<Notification>,
    commands: VecDeque<Command>,
    next_item_id: u32,
}

impl Game {
    /// Generate a level, place the player, and scatter starting potions.
    pub fn new(namer: Box<dyn ItemNamer>, mut rng: GameRng) -> Result<Self, LevelError> {
        let level = Level::generate(&mut rng)?;
        let start = level
            .random_walkable(&mut rng, false)
            .ok_or(LevelError::NoRooms)?;
        let mut game = Self::with_level(level, start, namer, rng);
        game.place_starting_items(start);
        Ok(game)
    }

    /// Assemble a game on a prepared level. The player spawns at `start`.
    pub fn with_level(
        mut level: Level,
        start: Position,
        namer: Box<dyn ItemNamer>,
        rng: GameRng,
    ) -> Self {
        let player = Player::create(start, &mut level);
        Self {
            level,
            player,
            namer,
            rng,
            turn: 0,
            notifications: VecDeque::new(),
            commands: VecDeque::new(),
            next_item_id: 0,
        }
    }

    /// Drop one healing potion on each walkable orthogonal neighbor.
    fn place_starting_items(&mut self, start: Position) {
        let targets: Vec<Position> = start
            .neighbors(false)
            .filter(|&pos| {
                self.level
                    .square(pos)
                    .map(|sq| sq.typ.is_walkable())
                    .unwrap_or(false)
            })
            .collect();
        for pos in targets {
            let item = self.new_item(ItemKind::HealingPotion);
            if let Ok(square) = self.level.square_mut(pos) {
                square.items.push(item);
            }
        }
    }

    /// Mint an item with a fresh identity.
    pub fn new_item(&mut self, kind: ItemKind) -> Item {
        let id = ItemId::new(self.next_item_id);
        self.next_item_id += 1;
        Item::new(id, kind)
    }

    /// Remove the item from wherever it lives (inventory or floor).
    pub fn destroy_item(&mut self, id: ItemId) {
        self.player.inventory.remove(id);
        for square in self.level.squares_mut() {
            square.items.retain(|item| item.id != id);
        }
    }

    pub fn add_message(&mut self, text: impl Into<String>) {
        self.notifications.push_back(Notification::Message(text.into()));
    }

    pub fn add_popup(&mut self, title: impl Into<String>, body: Vec<String>) {
        self.notifications.push_back(Notification::Popup {
            title: title.into(),
            body,
        });
    }

    pub fn add_query(&mut self, query: InventoryQuery) {
        self.notifications.push_back(Notification::Query(query));
    }

    /// Next notification to show, oldest first.
    pub fn pop_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Accept a command from the outside and run the queue to quiescence.
    ///
    /// Reentrant-safe: a command arriving while the queue is already being
    /// drained simply joins it.
    pub fn add_command(&mut self, command: Command) {
        self.turn += 1;
        self.commands.push_back(command);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            let followups = command.execute(self);
            merge_followups(&mut self.commands, followups);
        }
    }
}

/// Queue follow-ups ahead of everything already waiting.
///
/// The batch lands at the front one by one, so within the batch the later
/// entries run first.
fn merge_followups(queue: &mut VecDeque<Command>, followups: Vec<Command>) {
    for command in followups {
        queue.push_front(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Direction, Room};
    use crate::object::EnglishNamer;

    fn test_namer() -> Box<dyn ItemNamer> {
        Box::new(EnglishNamer::new(&mut GameRng::new(42)))
    }

    /// Two rooms far enough apart to get a corridor between them.
    fn two_room_level() -> Level {
        let rooms = vec![
            Room::new(Position::new(1, 1), 7, 7),
            Room::new(Position::new(40, 10), 7, 7),
        ];
        let mut rng = GameRng::new(42);
        Level::from_rooms(rooms, &mut rng).unwrap()
    }

    fn test_game() -> Game {
        let level = two_room_level();
        Game::with_level(level, Position::new(3, 3), test_namer(), GameRng::new(42))
    }

    fn drain_messages(game: &mut Game) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Some(n) = game.pop_notification() {
            out.push(n);
        }
        out
    }

    #[test]
    fn test_new_game_spawns_on_lit_walkable_square() {
        let game = Game::new(test_namer(), GameRng::new(7)).unwrap();
        let square = game.level.square(game.player.pos).unwrap();
        assert!(square.typ.is_walkable());
        assert!(square.known);
        assert_eq!(game.player.health.current_hp(), game.player.health.max_hp());
    }

    #[test]
    fn test_new_game_scatters_potions_next_to_player() {
        let game = Game::new(test_namer(), GameRng::new(7)).unwrap();
        let nearby: usize = game
            .player
            .pos
            .neighbors(false)
            .filter_map(|pos| game.level.square(pos).ok())
            .map(|sq| sq.items.len())
            .sum();
        assert!(nearby > 0);
        assert!(game.player.inventory.is_empty());
    }

    #[test]
    fn test_move_into_wall_is_silent_noop() {
        let mut game = test_game();
        game.player.pos = Position::new(2, 3);
        game.player.update_lights(&mut game.level);

        game.add_command(Command::Move(Direction::W));
        assert_eq!(game.player.pos, Position::new(2, 3));
        assert!(drain_messages(&mut game).is_empty());
    }

    #[test]
    fn test_move_onto_empty_square_is_quiet() {
        let mut game = test_game();
        game.add_command(Command::Move(Direction::E));
        assert_eq!(game.player.pos, Position::new(4, 3));
        assert!(drain_messages(&mut game).is_empty());
    }

    #[test]
    fn test_move_onto_single_item_reports_it() {
        let mut game = test_game();
        let item = game.new_item(ItemKind::HealingPotion);
        let target = Position::new(4, 3);
        game.level.square_mut(target).unwrap().items.push(item);

        game.add_command(Command::Move(Direction::E));
        assert_eq!(game.player.pos, target);
        let notes = drain_messages(&mut game);
        assert_eq!(notes.len(), 1);
        match &notes[0] {
            Notification::Message(text) => {
                assert!(text.starts_with("You see here "), "got {:?}", text);
            }
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_move_onto_item_pile_opens_popup() {
        let mut game = test_game();
        let a = game.new_item(ItemKind::HealingPotion);
        let b = game.new_item(ItemKind::HealingScroll);
        let target = Position::new(4, 3);
        {
            let square = game.level.square_mut(target).unwrap();
            square.items.push(a);
            square.items.push(b);
        }

        game.add_command(Command::Move(Direction::E));
        let notes = drain_messages(&mut game);
        assert_eq!(notes.len(), 1);
        match &notes[0] {
            Notification::Popup { title, body } => {
                assert_eq!(title, "Things that are here:");
                assert_eq!(body.len(), 2);
            }
            other => panic!("expected popup, got {:?}", other),
        }
    }

    #[test]
    fn test_pickup_empty_square() {
        let mut game = test_game();
        game.add_command(Command::Pickup);
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message(
                "There is nothing here to pick up.".to_string()
            )]
        );
    }

    #[test]
    fn test_pickup_single_item_assigns_slot() {
        let mut game = test_game();
        let item = game.new_item(ItemKind::HealingPotion);
        let id = item.id;
        let pos = game.player.pos;
        game.level.square_mut(pos).unwrap().items.push(item);

        game.add_command(Command::Pickup);
        assert!(game.player.inventory.get_by_id(id).is_some());
        assert_eq!(game.player.inventory.get('a').map(|i| i.id), Some(id));
        assert!(game.level.square(pos).unwrap().items.is_empty());
        let notes = drain_messages(&mut game);
        match &notes[0] {
            Notification::Message(text) => assert!(text.starts_with("a - "), "got {:?}", text),
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_pickup_refuses_piles() {
        let mut game = test_game();
        let a = game.new_item(ItemKind::HealingPotion);
        let b = game.new_item(ItemKind::HealingPotion);
        let pos = game.player.pos;
        {
            let square = game.level.square_mut(pos).unwrap();
            square.items.push(a);
            square.items.push(b);
        }

        game.add_command(Command::Pickup);
        assert_eq!(game.level.square(pos).unwrap().items.len(), 2);
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message(
                "There are several objects here.".to_string()
            )]
        );
    }

    #[test]
    fn test_pickup_with_full_inventory_leaves_item_on_floor() {
        let mut game = test_game();
        for _ in 0..crate::consts::MAX_INVENTORY_SLOTS {
            let filler = game.new_item(ItemKind::HealingPotion);
            game.player.inventory.add(filler).unwrap();
        }
        let item = game.new_item(ItemKind::HealingPotion);
        let pos = game.player.pos;
        game.level.square_mut(pos).unwrap().items.push(item);

        game.add_command(Command::Pickup);
        assert_eq!(game.level.square(pos).unwrap().items.len(), 1);
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message("Your inventory is full.".to_string())]
        );
    }

    #[test]
    fn test_quaff_heals_and_identifies() {
        let mut game = test_game();
        game.player.health.damage(5);
        let item = game.new_item(ItemKind::HealingPotion);
        let id = item.id;
        game.player.inventory.add(item).unwrap();

        game.add_command(Command::Quaff(id));
        assert!(game.player.inventory.is_empty());
        assert!(game.namer.is_known(ItemKind::HealingPotion));
        assert_eq!(game.player.health.current_hp(), 8);
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message("You feel better.".to_string())]
        );
    }

    #[test]
    fn test_quaff_missing_item() {
        let mut game = test_game();
        game.add_command(Command::Quaff(ItemId::new(99)));
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message("You don't have that item.".to_string())]
        );
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut game = test_game();
        game.player.health.damage(1);
        game.add_command(Command::Heal {
            base: 100,
            dice: (0, 0),
        });
        assert_eq!(game.player.health.current_hp(), game.player.health.max_hp());
    }

    #[test]
    fn test_show_inventory_groups_by_category() {
        let mut game = test_game();
        let potion = game.new_item(ItemKind::HealingPotion);
        let scroll = game.new_item(ItemKind::HealingScroll);
        game.player.inventory.add(potion).unwrap();
        game.player.inventory.add(scroll).unwrap();

        game.add_command(Command::ShowInventory);
        let notes = drain_messages(&mut game);
        match &notes[0] {
            Notification::Popup { title, body } => {
                assert_eq!(title, "Your inventory:");
                // Header, entry, header, entry.
                assert_eq!(body.len(), 4);
                assert_eq!(body[0], "Potions");
                assert!(body[1].starts_with("a - "));
                assert_eq!(body[2], "Scrolls");
                assert!(body[3].starts_with("b - "));
            }
            other => panic!("expected popup, got {:?}", other),
        }
    }

    #[test]
    fn test_show_empty_inventory() {
        let mut game = test_game();
        game.add_command(Command::ShowInventory);
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message("Your inventory is empty.".to_string())]
        );
    }

    #[test]
    fn test_query_on_empty_filtered_view() {
        let mut game = test_game();
        let scroll = game.new_item(ItemKind::HealingScroll);
        game.player.inventory.add(scroll).unwrap();

        game.add_command(Command::AddInventoryQuery {
            callback: QueryCallback::Quaff,
            filter: Some(ItemCategory::Potion),
        });
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message(
                "You don't have anything to drink.".to_string()
            )]
        );
    }

    #[test]
    fn test_query_on_empty_inventory() {
        let mut game = test_game();
        game.add_command(Command::AddInventoryQuery {
            callback: QueryCallback::Quaff,
            filter: None,
        });
        assert_eq!(
            drain_messages(&mut game),
            vec![Notification::Message("Your inventory is empty.".to_string())]
        );
    }

    #[test]
    fn test_query_lists_matching_items_and_responds() {
        let mut game = test_game();
        let potion = game.new_item(ItemKind::HealingPotion);
        let id = potion.id;
        let scroll = game.new_item(ItemKind::HealingScroll);
        game.player.inventory.add(potion).unwrap();
        game.player.inventory.add(scroll).unwrap();

        game.add_command(Command::AddInventoryQuery {
            callback: QueryCallback::Quaff,
            filter: Some(ItemCategory::Potion),
        });
        let notes = drain_messages(&mut game);
        let query = match &notes[0] {
            Notification::Query(q) => q.clone(),
            other => panic!("expected query, got {:?}", other),
        };
        assert_eq!(query.title(), "What do you want to drink?");
        assert_eq!(query.items().len(), 1);
        assert_eq!(query.items()[0].1, id);

        assert_eq!(query.respond(Some(id)), Command::Quaff(id));
        assert_eq!(
            query.respond(None),
            Command::AddMessage("Never mind.".to_string())
        );
    }

    #[test]
    fn test_followups_run_before_queued_commands() {
        let mut queue: VecDeque<Command> = VecDeque::new();
        queue.push_back(Command::AddMessage("queued".to_string()));
        merge_followups(
            &mut queue,
            vec![
                Command::AddMessage("first".to_string()),
                Command::AddMessage("second".to_string()),
            ],
        );
        // Within the batch, the later follow-up runs first.
        assert_eq!(
            queue,
            VecDeque::from(vec![
                Command::AddMessage("second".to_string()),
                Command::AddMessage("first".to_string()),
                Command::AddMessage("queued".to_string()),
            ])
        );
    }

    #[test]
    fn test_turn_counter_tracks_external_commands_only() {
        let mut game = test_game();
        let item = game.new_item(ItemKind::HealingPotion);
        let id = item.id;
        game.player.inventory.add(item).unwrap();

        // Quaff spawns Heal and a message internally; still one turn.
        game.add_command(Command::Quaff(id));
        assert_eq!(game.turn, 1);
        game.add_command(Command::Pickup);
        assert_eq!(game.turn, 2);
    }

    #[test]
    fn test_destroy_item_clears_floor_copies() {
        let mut game = test_game();
        let item = game.new_item(ItemKind::HealingPotion);
        let id = item.id;
        let pos = game.player.pos;
        game.level.square_mut(pos).unwrap().items.push(item);

        game.destroy_item(id);
        assert!(game.level.square(pos).unwrap().items.is_empty());
    }
}
