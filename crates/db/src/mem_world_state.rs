// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::collections::BTreeMap;

use wold_common::model::{
    ConnectionId, CustomVerb, Exit, Item, ItemId, ItemLocation, ItemTemplate, Room, RoomId,
    TemplateVerb, User, UserId, VerbId, VerbScope, World, WorldState, WorldStateError,
};

/// Everything lives in ordered maps so iteration (and therefore message
/// ordering in room broadcasts, listings, etc.) is deterministic.
pub struct MemWorldState {
    world: World,
    users: BTreeMap<u64, User>,
    rooms: BTreeMap<u64, Room>,
    items: BTreeMap<u64, Item>,
    /// Creation order, which is also resolution order within a scope.
    verbs: Vec<CustomVerb>,
    templates: BTreeMap<String, ItemTemplate>,
    next_user: u64,
    next_room: u64,
    next_item: u64,
    next_verb: u64,
}

impl MemWorldState {
    /// Build a minimal world: the entry room and the reserved automation
    /// user, parked there. The automation user is master-mode so it can walk
    /// through locked exits and stays out of room listings, and it can never
    /// hold a connection.
    pub fn bootstrap(
        world_name: &str,
        entry_room_name: &str,
        entry_room_description: &str,
        automation_user_name: &str,
    ) -> Self {
        let entry_room = RoomId(1);
        let automation_user = UserId(1);
        let mut rooms = BTreeMap::new();
        rooms.insert(
            entry_room.0,
            Room {
                id: entry_room,
                name: entry_room_name.to_string(),
                description: entry_room_description.to_string(),
                exits: vec![],
            },
        );
        let mut users = BTreeMap::new();
        users.insert(
            automation_user.0,
            User {
                id: automation_user,
                name: automation_user_name.to_string(),
                room: entry_room,
                connection: None,
                master_mode: true,
                editor: false,
                automation: true,
            },
        );
        Self {
            world: World {
                name: world_name.to_string(),
                entry_room,
                automation_user,
            },
            users,
            rooms,
            items: BTreeMap::new(),
            verbs: vec![],
            templates: BTreeMap::new(),
            next_user: 2,
            next_room: 2,
            next_item: 1,
            next_verb: 1,
        }
    }

    fn user_mut(&mut self, id: UserId) -> Result<&mut User, WorldStateError> {
        self.users
            .get_mut(&id.0)
            .ok_or(WorldStateError::UserNotFound(id))
    }

    fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, WorldStateError> {
        self.rooms
            .get_mut(&id.0)
            .ok_or(WorldStateError::RoomNotFound(id))
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, WorldStateError> {
        self.items
            .get_mut(&id.0)
            .ok_or(WorldStateError::ItemNotFound(id))
    }

    fn exit_mut(&mut self, room: RoomId, name: &str) -> Result<&mut Exit, WorldStateError> {
        let room_record = self.room_mut(room)?;
        room_record
            .exits
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| WorldStateError::ExitNotFound(room, name.to_string()))
    }
}

impl WorldState for MemWorldState {
    fn world(&self) -> World {
        self.world.clone()
    }

    fn create_user(&mut self, name: &str, room: RoomId) -> Result<User, WorldStateError> {
        if let Some(existing) = self.user_named(name) {
            return if existing.automation {
                Err(WorldStateError::ReservedUserName(name.to_string()))
            } else {
                Err(WorldStateError::DuplicateUserName(name.to_string()))
            };
        }
        if !self.rooms.contains_key(&room.0) {
            return Err(WorldStateError::RoomNotFound(room));
        }
        let first_human = !self.users.values().any(|u| !u.automation);
        let id = UserId(self.next_user);
        self.next_user += 1;
        let user = User {
            id,
            name: name.to_string(),
            room,
            connection: None,
            master_mode: false,
            editor: first_human,
            automation: false,
        };
        self.users.insert(id.0, user.clone());
        Ok(user)
    }

    fn user(&self, id: UserId) -> Result<User, WorldStateError> {
        self.users
            .get(&id.0)
            .cloned()
            .ok_or(WorldStateError::UserNotFound(id))
    }

    fn user_named(&self, name: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn users_in_room(&self, room: RoomId) -> Vec<User> {
        self.users
            .values()
            .filter(|u| u.room == room)
            .cloned()
            .collect()
    }

    fn connect_user(
        &mut self,
        id: UserId,
        connection: ConnectionId,
    ) -> Result<(), WorldStateError> {
        self.user_mut(id)?.connection = Some(connection);
        Ok(())
    }

    fn disconnect_user(&mut self, id: UserId) -> Result<(), WorldStateError> {
        self.user_mut(id)?.connection = None;
        Ok(())
    }

    fn move_user(&mut self, id: UserId, to: RoomId) -> Result<(), WorldStateError> {
        if !self.rooms.contains_key(&to.0) {
            return Err(WorldStateError::RoomNotFound(to));
        }
        self.user_mut(id)?.room = to;
        Ok(())
    }

    fn set_master_mode(&mut self, id: UserId, on: bool) -> Result<(), WorldStateError> {
        self.user_mut(id)?.master_mode = on;
        Ok(())
    }

    fn set_editor(&mut self, id: UserId, on: bool) -> Result<(), WorldStateError> {
        self.user_mut(id)?.editor = on;
        Ok(())
    }

    fn create_room(&mut self, name: &str, description: &str) -> Result<Room, WorldStateError> {
        let id = RoomId(self.next_room);
        self.next_room += 1;
        let room = Room {
            id,
            name: name.to_string(),
            description: description.to_string(),
            exits: vec![],
        };
        self.rooms.insert(id.0, room.clone());
        Ok(room)
    }

    fn room(&self, id: RoomId) -> Result<Room, WorldStateError> {
        self.rooms
            .get(&id.0)
            .cloned()
            .ok_or(WorldStateError::RoomNotFound(id))
    }

    fn update_room(
        &mut self,
        id: RoomId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), WorldStateError> {
        let room = self.room_mut(id)?;
        if let Some(name) = name {
            room.name = name.to_string();
        }
        if let Some(description) = description {
            room.description = description.to_string();
        }
        Ok(())
    }

    fn delete_room(&mut self, id: RoomId) -> Result<Vec<UserId>, WorldStateError> {
        if id == self.world.entry_room {
            return Err(WorldStateError::EntryRoomDeletion(id));
        }
        self.rooms
            .remove(&id.0)
            .ok_or(WorldStateError::RoomNotFound(id))?;

        // The room's own verbs, then its items and theirs.
        self.verbs.retain(|v| v.scope != VerbScope::Room(id));
        let doomed_items: Vec<u64> = self
            .items
            .values()
            .filter(|i| i.location == ItemLocation::Room(id))
            .map(|i| i.id.0)
            .collect();
        for item_id in doomed_items {
            self.verbs
                .retain(|v| v.scope != VerbScope::Item(ItemId(item_id)));
            self.items.remove(&item_id);
        }

        // Exits elsewhere that led here are now dangling.
        for room in self.rooms.values_mut() {
            room.exits.retain(|e| e.destination != id);
        }

        // Anyone standing here washes up at the entry room.
        let entry = self.world.entry_room;
        let mut displaced = vec![];
        for user in self.users.values_mut() {
            if user.room == id {
                user.room = entry;
                displaced.push(user.id);
            }
        }
        Ok(displaced)
    }

    fn add_exit(&mut self, room: RoomId, exit: Exit) -> Result<(), WorldStateError> {
        if !self.rooms.contains_key(&exit.destination.0) {
            return Err(WorldStateError::RoomNotFound(exit.destination));
        }
        let room_record = self.room_mut(room)?;
        if room_record.exit_named(&exit.name).is_some() {
            return Err(WorldStateError::DuplicateExit(room, exit.name));
        }
        room_record.exits.push(exit);
        Ok(())
    }

    fn remove_exit(&mut self, room: RoomId, name: &str) -> Result<(), WorldStateError> {
        let room_record = self.room_mut(room)?;
        let before = room_record.exits.len();
        room_record
            .exits
            .retain(|e| !e.name.eq_ignore_ascii_case(name));
        if room_record.exits.len() == before {
            return Err(WorldStateError::ExitNotFound(room, name.to_string()));
        }
        Ok(())
    }

    fn set_exit_locked(
        &mut self,
        room: RoomId,
        name: &str,
        locked: bool,
    ) -> Result<(), WorldStateError> {
        self.exit_mut(room, name)?.locked = locked;
        Ok(())
    }

    fn set_exit_visible(
        &mut self,
        room: RoomId,
        name: &str,
        visible: bool,
    ) -> Result<(), WorldStateError> {
        self.exit_mut(room, name)?.visible = visible;
        Ok(())
    }

    fn create_item(
        &mut self,
        name: &str,
        description: &str,
        visible: bool,
        location: ItemLocation,
    ) -> Result<Item, WorldStateError> {
        match location {
            ItemLocation::Room(room) if !self.rooms.contains_key(&room.0) => {
                return Err(WorldStateError::RoomNotFound(room));
            }
            ItemLocation::User(user) if !self.users.contains_key(&user.0) => {
                return Err(WorldStateError::UserNotFound(user));
            }
            _ => {}
        }
        let id = ItemId(self.next_item);
        self.next_item += 1;
        let item = Item {
            id,
            name: name.to_string(),
            description: description.to_string(),
            visible,
            location,
            template: None,
        };
        self.items.insert(id.0, item.clone());
        Ok(item)
    }

    fn item(&self, id: ItemId) -> Result<Item, WorldStateError> {
        self.items
            .get(&id.0)
            .cloned()
            .ok_or(WorldStateError::ItemNotFound(id))
    }

    fn items_at(&self, location: ItemLocation) -> Vec<Item> {
        self.items
            .values()
            .filter(|i| i.location == location)
            .cloned()
            .collect()
    }

    fn move_item(&mut self, id: ItemId, to: ItemLocation) -> Result<(), WorldStateError> {
        match to {
            ItemLocation::Room(room) if !self.rooms.contains_key(&room.0) => {
                return Err(WorldStateError::RoomNotFound(room));
            }
            ItemLocation::User(user) if !self.users.contains_key(&user.0) => {
                return Err(WorldStateError::UserNotFound(user));
            }
            _ => {}
        }
        self.item_mut(id)?.location = to;
        Ok(())
    }

    fn delete_item(&mut self, id: ItemId) -> Result<(), WorldStateError> {
        self.items
            .remove(&id.0)
            .ok_or(WorldStateError::ItemNotFound(id))?;
        self.verbs.retain(|v| v.scope != VerbScope::Item(id));
        Ok(())
    }

    fn add_custom_verb(
        &mut self,
        scope: VerbScope,
        names: Vec<String>,
        commands: Vec<String>,
    ) -> Result<CustomVerb, WorldStateError> {
        match scope {
            VerbScope::Item(item) if !self.items.contains_key(&item.0) => {
                return Err(WorldStateError::ItemNotFound(item));
            }
            VerbScope::Room(room) if !self.rooms.contains_key(&room.0) => {
                return Err(WorldStateError::RoomNotFound(room));
            }
            _ => {}
        }
        let id = VerbId(self.next_verb);
        self.next_verb += 1;
        let verb = CustomVerb {
            id,
            scope,
            names,
            commands,
        };
        self.verbs.push(verb.clone());
        Ok(verb)
    }

    fn custom_verbs(&self, scope: VerbScope) -> Vec<CustomVerb> {
        self.verbs
            .iter()
            .filter(|v| v.scope == scope)
            .cloned()
            .collect()
    }

    fn delete_custom_verb(&mut self, id: VerbId) -> Result<(), WorldStateError> {
        let before = self.verbs.len();
        self.verbs.retain(|v| v.id != id);
        if self.verbs.len() == before {
            return Err(WorldStateError::VerbNotFound(id));
        }
        Ok(())
    }

    fn save_item_template(&mut self, item: ItemId) -> Result<String, WorldStateError> {
        let record = self.item(item)?;
        let verbs = self
            .custom_verbs(VerbScope::Item(item))
            .into_iter()
            .map(|v| TemplateVerb {
                names: v.names,
                commands: v.commands,
            })
            .collect();
        let key = record.name.clone();
        self.templates.insert(
            key.clone(),
            ItemTemplate {
                key: key.clone(),
                name: record.name,
                description: record.description,
                visible: record.visible,
                verbs,
            },
        );
        self.item_mut(item)?.template = Some(key.clone());
        Ok(key)
    }

    fn spawn_item_template(&mut self, key: &str, room: RoomId) -> Result<Item, WorldStateError> {
        let template = self
            .templates
            .get(key)
            .cloned()
            .ok_or_else(|| WorldStateError::TemplateNotFound(key.to_string()))?;
        let mut item = self.create_item(
            &template.name,
            &template.description,
            template.visible,
            ItemLocation::Room(room),
        )?;
        self.item_mut(item.id)?.template = Some(template.key.clone());
        item.template = Some(template.key);
        for verb in template.verbs {
            self.add_custom_verb(VerbScope::Item(item.id), verb.names, verb.commands)?;
        }
        Ok(item)
    }

    fn item_template_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wold_common::model::{
        Exit, ItemLocation, RoomId, VerbScope, WorldState, WorldStateError,
    };

    use super::MemWorldState;

    fn test_world() -> MemWorldState {
        MemWorldState::bootstrap("test world", "The Landing", "Where it all begins.", "ghost")
    }

    #[test]
    fn bootstrap_shape() {
        let state = test_world();
        let world = state.world();
        let entry = state.room(world.entry_room).unwrap();
        assert_eq!(entry.name, "The Landing");
        let ghost = state.user(world.automation_user).unwrap();
        assert!(ghost.automation);
        assert!(ghost.master_mode);
        assert!(!ghost.connected());
        assert_eq!(ghost.room, world.entry_room);
    }

    #[test]
    fn first_human_is_editor_later_ones_not() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let first = state.create_user("ada", entry).unwrap();
        let second = state.create_user("grace", entry).unwrap();
        assert!(first.editor);
        assert!(!second.editor);
    }

    #[test]
    fn name_claims() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        state.create_user("ada", entry).unwrap();
        assert_eq!(
            state.create_user("Ada", entry),
            Err(WorldStateError::DuplicateUserName("Ada".into()))
        );
        assert_eq!(
            state.create_user("ghost", entry),
            Err(WorldStateError::ReservedUserName("ghost".into()))
        );
    }

    #[test]
    fn exits_add_remove_and_duplicates() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let garden = state.create_room("Garden", "Green.").unwrap();
        state.add_exit(entry, Exit::new("north", garden.id)).unwrap();
        assert_eq!(
            state.add_exit(entry, Exit::new("North", garden.id)),
            Err(WorldStateError::DuplicateExit(entry, "North".into()))
        );
        state.remove_exit(entry, "north").unwrap();
        assert_eq!(
            state.remove_exit(entry, "north"),
            Err(WorldStateError::ExitNotFound(entry, "north".into()))
        );
    }

    #[test]
    fn exit_to_missing_room_refused() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        assert_eq!(
            state.add_exit(entry, Exit::new("void", RoomId(99))),
            Err(WorldStateError::RoomNotFound(RoomId(99)))
        );
    }

    #[test]
    fn entry_room_cannot_be_deleted() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        assert_eq!(
            state.delete_room(entry),
            Err(WorldStateError::EntryRoomDeletion(entry))
        );
    }

    #[test]
    fn room_deletion_cascades() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let cellar = state.create_room("Cellar", "Dank.").unwrap();
        state.add_exit(entry, Exit::new("down", cellar.id)).unwrap();
        state.add_exit(cellar.id, Exit::new("up", entry)).unwrap();
        let crate_item = state
            .create_item("crate", "A crate.", true, ItemLocation::Room(cellar.id))
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Item(crate_item.id),
                vec!["open".into()],
                vec!["say creak".into()],
            )
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Room(cellar.id),
                vec!["shiver".into()],
                vec!["emote shivers".into()],
            )
            .unwrap();
        let dweller = state.create_user("ada", cellar.id).unwrap();

        let displaced = state.delete_room(cellar.id).unwrap();

        assert_eq!(displaced, vec![dweller.id]);
        assert_eq!(state.user(dweller.id).unwrap().room, entry);
        assert_eq!(
            state.item(crate_item.id),
            Err(WorldStateError::ItemNotFound(crate_item.id))
        );
        assert!(state.custom_verbs(VerbScope::Item(crate_item.id)).is_empty());
        assert!(state.custom_verbs(VerbScope::Room(cellar.id)).is_empty());
        // The inbound exit from the entry room is gone too.
        assert!(state.room(entry).unwrap().exits.is_empty());
    }

    #[test]
    fn item_transfer_reassigns_never_copies() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let ada = state.create_user("ada", entry).unwrap();
        let lantern = state
            .create_item("lantern", "Rusty.", true, ItemLocation::Room(entry))
            .unwrap();
        state
            .move_item(lantern.id, ItemLocation::User(ada.id))
            .unwrap();
        assert!(state.items_at(ItemLocation::Room(entry)).is_empty());
        assert_eq!(state.items_at(ItemLocation::User(ada.id)).len(), 1);
    }

    #[test]
    fn item_deletion_drops_its_verbs() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let bell = state
            .create_item("bell", "Brass.", true, ItemLocation::Room(entry))
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Item(bell.id),
                vec!["ring".into()],
                vec!["say dong".into()],
            )
            .unwrap();
        state.delete_item(bell.id).unwrap();
        assert!(state.custom_verbs(VerbScope::Item(bell.id)).is_empty());
    }

    #[test]
    fn custom_verbs_keep_creation_order() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        state
            .add_custom_verb(
                VerbScope::Room(entry),
                vec!["first".into()],
                vec!["say one".into()],
            )
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Room(entry),
                vec!["second".into()],
                vec!["say two".into()],
            )
            .unwrap();
        let verbs = state.custom_verbs(VerbScope::Room(entry));
        assert_eq!(verbs[0].names, vec!["first".to_string()]);
        assert_eq!(verbs[1].names, vec!["second".to_string()]);
    }

    #[test]
    fn template_save_and_spawn() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        let bell = state
            .create_item("bell", "Brass.", true, ItemLocation::Room(entry))
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Item(bell.id),
                vec!["ring".into()],
                vec!["say dong".into()],
            )
            .unwrap();
        let key = state.save_item_template(bell.id).unwrap();
        assert_eq!(key, "bell");
        assert_eq!(state.item(bell.id).unwrap().template, Some("bell".into()));

        let annex = state.create_room("Annex", "Bare.").unwrap();
        let spawned = state.spawn_item_template("bell", annex.id).unwrap();
        assert_ne!(spawned.id, bell.id);
        assert_eq!(spawned.template, Some("bell".into()));
        let spawned_verbs = state.custom_verbs(VerbScope::Item(spawned.id));
        assert_eq!(spawned_verbs.len(), 1);
        assert_eq!(spawned_verbs[0].names, vec!["ring".to_string()]);
        // The original's verb is untouched and distinct.
        let original_verbs = state.custom_verbs(VerbScope::Item(bell.id));
        assert_eq!(original_verbs.len(), 1);
        assert_ne!(original_verbs[0].id, spawned_verbs[0].id);
    }

    #[test]
    fn spawn_from_missing_template() {
        let mut state = test_world();
        let entry = state.world().entry_room;
        assert_eq!(
            state.spawn_item_template("unicorn", entry),
            Err(WorldStateError::TemplateNotFound("unicorn".into()))
        );
    }
}
