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

use wold_common::matching::{MatchResult, match_name};
use wold_common::model::{ItemLocation, WorldStateError};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::look::{BE_MORE_SPECIFIC, NOTHING_LIKE_THAT, room_snapshot};
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

const ENTRY_ROOM_STAYS: &str = "The entry room holds the world together. It stays.";

enum DeleteRoomState {
    Start,
    AwaitConfirm,
}

/// Tear down the current room, after one explicit confirmation. Everyone
/// standing in it (the demolisher included) lands back at the entry room.
pub struct DeleteRoom {
    state: DeleteRoomState,
}

impl DeleteRoom {
    pub fn new() -> Self {
        DeleteRoom {
            state: DeleteRoomState::Start,
        }
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["deleteroom"])
    }
}

impl Verb for DeleteRoom {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        match self.state {
            DeleteRoomState::Start => {
                let user = frame.user()?;
                if user.room == frame.ctx.world.world().entry_room {
                    frame.send_to_self(Message::section(ENTRY_ROOM_STAYS));
                    return Ok(VerbFlow::Done);
                }
                let room = frame.room()?;
                frame.send_to_self(Message::boxed(format!(
                    "You are about to delete {} (room {}).\n\
                     Its items, its verbs, and every way leading here go with it.\n\
                     Type yes to proceed; anything else keeps it standing.",
                    room.name, room.id
                )));
                self.state = DeleteRoomState::AwaitConfirm;
                Ok(VerbFlow::Continue)
            }
            DeleteRoomState::AwaitConfirm => {
                if !line.trim().eq_ignore_ascii_case("yes") {
                    frame.send_to_self(Message::section("Nothing was deleted."));
                    return Ok(VerbFlow::Done);
                }
                let user = frame.user()?;
                let room = frame.room()?;
                let displaced = match frame.world().delete_room(room.id) {
                    Ok(displaced) => displaced,
                    Err(WorldStateError::EntryRoomDeletion(_)) => {
                        frame.send_to_self(Message::section(ENTRY_ROOM_STAYS));
                        return Ok(VerbFlow::Done);
                    }
                    Err(e) => return Err(e.into()),
                };
                frame.send_to_self(Message::section(format!(
                    "{} collapses into nothing.",
                    room.name
                )));
                for id in displaced {
                    let Ok(other) = frame.ctx.world.user(id) else {
                        continue;
                    };
                    if other.id != user.id {
                        frame.send_to_user(
                            &other,
                            Message::section("The room dissolves around you."),
                        );
                    }
                    let snapshot = room_snapshot(frame.ctx.world, &other)?;
                    frame.send_to_user(&other, snapshot);
                }
                Ok(VerbFlow::Done)
            }
        }
    }
}

/// Remove one way out of the current room. The way back from the far side,
/// if there is one, is its own exit and stays.
pub struct DeleteExit {}

impl DeleteExit {
    pub fn new() -> Self {
        DeleteExit {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["deleteexit"])
    }
}

impl Verb for DeleteExit {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Say it like this: deleteexit <way>."));
            return Ok(VerbFlow::Done);
        }
        let room = frame.room()?;
        let Some(exit) = room.exit_named(rest) else {
            frame.send_to_self(Message::section("No way called that leads out of here."));
            return Ok(VerbFlow::Done);
        };
        let name = exit.name.clone();
        frame.world().remove_exit(room.id, &name)?;
        frame.send_to_self(Message::section(format!("The way {name} is gone.")));
        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} seals away the way {}.",
                user.name, name
            )));
        }
        Ok(VerbFlow::Done)
    }
}

/// Destroy an item in the room or in the demolisher's own hands.
pub struct DeleteItem {}

impl DeleteItem {
    pub fn new() -> Self {
        DeleteItem {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["deleteitem"])
    }
}

impl Verb for DeleteItem {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Say it like this: deleteitem <item>."));
            return Ok(VerbFlow::Done);
        }
        let mut items = frame.ctx.world.items_at(ItemLocation::Room(user.room));
        items.extend(frame.ctx.world.items_at(ItemLocation::User(user.id)));
        let item = match match_name(rest, &items, |i| i.name.as_str()) {
            MatchResult::One(item) => item.clone(),
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {
                frame.send_to_self(Message::section(NOTHING_LIKE_THAT));
                return Ok(VerbFlow::Done);
            }
        };
        frame.world().delete_item(item.id)?;
        frame.send_to_self(Message::section(format!("{} crumbles to dust.", item.name)));
        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} destroys {}.",
                user.name, item.name
            )));
        }
        Ok(VerbFlow::Done)
    }
}
