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

use crate::model::ids::{ConnectionId, ItemId, RoomId, UserId};
use crate::model::verbs::TemplateVerb;

/// A user of the world. Humans get one at first login; the automation user is
/// minted once at world bootstrap and can never connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub room: RoomId,
    /// The live transport connection currently bound to this user, if any.
    /// Always `None` for automation users.
    pub connection: Option<ConnectionId>,
    /// Master mode grants invisibility and passage through locked exits.
    pub master_mode: bool,
    /// Editors may build and demolish. The first human through the door gets
    /// this automatically so a fresh world is editable at all.
    pub editor: bool,
    /// Reserved scripted identity; excluded from name claims at login.
    pub automation: bool,
}

impl User {
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Whether this user may use building/demolition verbs.
    #[must_use]
    pub fn privileged(&self) -> bool {
        self.editor || self.master_mode
    }

    /// Whether other users can see this one in room listings and presence
    /// announcements.
    #[must_use]
    pub fn visible(&self) -> bool {
        !self.master_mode
    }
}

/// A one-way passage out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub name: String,
    pub destination: RoomId,
    pub description: Option<String>,
    /// Hidden exits are usable but unlisted, except to master-mode users.
    pub visible: bool,
    /// Locked exits block passage for everyone except master-mode users.
    pub locked: bool,
}

impl Exit {
    #[must_use]
    pub fn new(name: impl Into<String>, destination: RoomId) -> Self {
        Self {
            name: name.into(),
            destination,
            description: None,
            visible: true,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    /// Ordered; build order is presentation order.
    pub exits: Vec<Exit>,
}

impl Room {
    /// Exact-name exit lookup, case-insensitive.
    #[must_use]
    pub fn exit_named(&self, name: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

/// Where an item currently is. Exactly one holder at a time; take/drop/give
/// reassign this, they never copy the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Room(RoomId),
    User(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Invisible items are unlisted but still addressable by name.
    pub visible: bool,
    pub location: ItemLocation,
    /// Key of the saved snapshot this item was saved as or spawned from.
    pub template: Option<String>,
}

/// A saved snapshot of an item, spawnable into any room. Carries copies of
/// the item's custom verbs so spawned items behave like the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    pub key: String,
    pub name: String,
    pub description: String,
    pub visible: bool,
    pub verbs: Vec<TemplateVerb>,
}

/// The world-wide singleton record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub name: String,
    /// Where fresh users appear, and the one room that can never be deleted.
    pub entry_room: RoomId,
    /// The reserved automation identity, minted at bootstrap.
    pub automation_user: UserId,
}
