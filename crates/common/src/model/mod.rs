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

//! The world model: the records verbs read and mutate, and the repository
//! trait the core talks to instead of a concrete store.

pub use crate::model::ids::{ConnectionId, ItemId, RoomId, UserId, VerbId};
pub use crate::model::objects::{Exit, Item, ItemLocation, ItemTemplate, Room, User, World};
pub use crate::model::verbs::{CustomVerb, TemplateVerb, VerbScope};
pub use crate::model::world_state::{WorldState, WorldStateError};

mod ids;
mod objects;
mod verbs;
mod world_state;
