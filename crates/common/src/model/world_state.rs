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

use thiserror::Error;

use crate::model::ids::{ConnectionId, ItemId, RoomId, UserId, VerbId};
use crate::model::objects::{Exit, Item, ItemLocation, Room, User, World};
use crate::model::verbs::{CustomVerb, VerbScope};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldStateError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Custom verb not found: {0}")]
    VerbNotFound(VerbId),
    #[error("No exit named '{1}' in room {0}")]
    ExitNotFound(RoomId, String),
    #[error("Room {0} already has an exit named '{1}'")]
    DuplicateExit(RoomId, String),
    #[error("The name '{0}' is already taken")]
    DuplicateUserName(String),
    #[error("The name '{0}' is reserved")]
    ReservedUserName(String),
    #[error("Room {0} is the world's entry room and cannot be deleted")]
    EntryRoomDeletion(RoomId),
    #[error("No saved item under the key '{0}'")]
    TemplateNotFound(String),
}

/// The repository the interaction core reads and writes the world through.
///
/// All mutation during one line's dispatch happens through a single
/// exclusive borrow of this, so a write made by a verb (or by a nested
/// automation replay) is visible to every later read in the same dispatch
/// chain. Implementations do not need interior locking for that; the
/// scheduler serializes dispatch.
pub trait WorldState: Send {
    fn world(&self) -> World;

    /// Create a human user. Rejects names already claimed and names reserved
    /// by automation identities. The first human created becomes an editor.
    fn create_user(&mut self, name: &str, room: RoomId) -> Result<User, WorldStateError>;
    fn user(&self, id: UserId) -> Result<User, WorldStateError>;
    /// Exact-name lookup, case-insensitive.
    fn user_named(&self, name: &str) -> Option<User>;
    fn users(&self) -> Vec<User>;
    fn users_in_room(&self, room: RoomId) -> Vec<User>;
    /// Bind a live connection to the user. An existing binding is replaced;
    /// the session that held it discovers the usurpation on its next line.
    fn connect_user(&mut self, id: UserId, connection: ConnectionId)
    -> Result<(), WorldStateError>;
    fn disconnect_user(&mut self, id: UserId) -> Result<(), WorldStateError>;
    fn move_user(&mut self, id: UserId, to: RoomId) -> Result<(), WorldStateError>;
    fn set_master_mode(&mut self, id: UserId, on: bool) -> Result<(), WorldStateError>;
    fn set_editor(&mut self, id: UserId, on: bool) -> Result<(), WorldStateError>;

    fn create_room(&mut self, name: &str, description: &str) -> Result<Room, WorldStateError>;
    fn room(&self, id: RoomId) -> Result<Room, WorldStateError>;
    /// Rename and/or redescribe. `None` keeps the current value.
    fn update_room(
        &mut self,
        id: RoomId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), WorldStateError>;
    /// Delete a room, cascading to its exits, its items and their verbs, its
    /// own verbs, and any exit elsewhere that led here. Occupants are moved
    /// to the entry room; their ids are returned so callers can tell them.
    fn delete_room(&mut self, id: RoomId) -> Result<Vec<UserId>, WorldStateError>;
    fn add_exit(&mut self, room: RoomId, exit: Exit) -> Result<(), WorldStateError>;
    fn remove_exit(&mut self, room: RoomId, name: &str) -> Result<(), WorldStateError>;
    fn set_exit_locked(
        &mut self,
        room: RoomId,
        name: &str,
        locked: bool,
    ) -> Result<(), WorldStateError>;
    fn set_exit_visible(
        &mut self,
        room: RoomId,
        name: &str,
        visible: bool,
    ) -> Result<(), WorldStateError>;

    fn create_item(
        &mut self,
        name: &str,
        description: &str,
        visible: bool,
        location: ItemLocation,
    ) -> Result<Item, WorldStateError>;
    fn item(&self, id: ItemId) -> Result<Item, WorldStateError>;
    fn items_at(&self, location: ItemLocation) -> Vec<Item>;
    fn move_item(&mut self, id: ItemId, to: ItemLocation) -> Result<(), WorldStateError>;
    /// Delete an item and every custom verb attached to it.
    fn delete_item(&mut self, id: ItemId) -> Result<(), WorldStateError>;

    fn add_custom_verb(
        &mut self,
        scope: VerbScope,
        names: Vec<String>,
        commands: Vec<String>,
    ) -> Result<CustomVerb, WorldStateError>;
    /// Verbs attached to exactly this scope, in creation order.
    fn custom_verbs(&self, scope: VerbScope) -> Vec<CustomVerb>;
    fn delete_custom_verb(&mut self, id: VerbId) -> Result<(), WorldStateError>;

    /// Snapshot an item (with its verbs) under its own name, overwriting any
    /// previous snapshot under that key. Returns the key.
    fn save_item_template(&mut self, item: ItemId) -> Result<String, WorldStateError>;
    /// Spawn a fresh item from a snapshot into the given room. The spawned
    /// item gets a new identity and fresh copies of the snapshot's verbs.
    fn spawn_item_template(&mut self, key: &str, room: RoomId) -> Result<Item, WorldStateError>;
    fn item_template_keys(&self) -> Vec<String>;
}
