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
use wold_common::model::RoomId;
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::look::{BE_MORE_SPECIFIC, room_snapshot};
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

/// Walk through an exit of the current room.
///
/// Hidden exits are real doors for those who know the name: they are left
/// out of partial matching but an exact name still goes through.
pub struct Go {}

impl Go {
    pub fn new() -> Self {
        Go {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["go"])
    }
}

impl Verb for Go {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Go where?"));
            return Ok(VerbFlow::Done);
        }

        let room = frame.room()?;
        let exit = match room.exit_named(rest) {
            Some(exit) => exit.clone(),
            None => {
                let visible: Vec<_> = room.exits.iter().filter(|e| e.visible).collect();
                match match_name(rest, visible.into_iter(), |e| e.name.as_str()) {
                    MatchResult::One(exit) => exit.clone(),
                    MatchResult::Many(_) => {
                        frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                        return Ok(VerbFlow::Done);
                    }
                    MatchResult::None => {
                        frame.send_to_self(Message::section("There is no way out in that direction."));
                        return Ok(VerbFlow::Done);
                    }
                }
            }
        };

        if exit.locked && !user.master_mode {
            frame.send_to_self(Message::section(format!("The way {} is locked.", exit.name)));
            return Ok(VerbFlow::Done);
        }

        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} leaves through {}.",
                user.name, exit.name
            )));
        }
        frame.world().move_user(user.id, exit.destination)?;
        if user.visible() {
            frame.send_to_others(Message::section(format!("{} arrives.", user.name)));
        }

        let user = frame.user()?;
        let snapshot = room_snapshot(frame.ctx.world, &user)?;
        frame.send_to_self(snapshot);
        Ok(VerbFlow::Done)
    }
}

/// Jump straight to a room by number. Editors only; nobody else should
/// even know rooms have numbers.
pub struct Teleport {}

impl Teleport {
    pub fn new() -> Self {
        Teleport {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["teleport", "tp"])
    }
}

impl Verb for Teleport {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        let Ok(number) = rest.parse::<u64>() else {
            frame.send_to_self(Message::section("Say it like this: teleport <room number>."));
            return Ok(VerbFlow::Done);
        };
        let target = RoomId(number);
        if frame.ctx.world.room(target).is_err() {
            frame.send_to_self(Message::section("No room goes by that number."));
            return Ok(VerbFlow::Done);
        }
        if target == user.room {
            frame.send_to_self(Message::section("You are already there."));
            return Ok(VerbFlow::Done);
        }

        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} vanishes in a puff of logic.",
                user.name
            )));
        }
        frame.world().move_user(user.id, target)?;
        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} materializes out of thin air.",
                user.name
            )));
        }

        let user = frame.user()?;
        let snapshot = room_snapshot(frame.ctx.world, &user)?;
        frame.send_to_self(snapshot);
        Ok(VerbFlow::Done)
    }
}

/// Pull yourself back to the world's entry room from wherever you are.
pub struct Recall {}

impl Recall {
    pub fn new() -> Self {
        Recall {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["recall"])
    }
}

impl Verb for Recall {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let entry = frame.ctx.world.world().entry_room;
        if user.room == entry {
            frame.send_to_self(Message::section("You are already where it all begins."));
            return Ok(VerbFlow::Done);
        }

        if user.visible() {
            frame.send_to_others(Message::section(format!(
                "{} is yanked away by an unseen force.",
                user.name
            )));
        }
        frame.world().move_user(user.id, entry)?;
        if user.visible() {
            frame.send_to_others(Message::section(format!("{} tumbles in from nowhere.", user.name)));
        }

        frame.send_to_self(Message::section("A force pulls you back to where it all began."));
        let user = frame.user()?;
        let snapshot = room_snapshot(frame.ctx.world, &user)?;
        frame.send_to_self(snapshot);
        Ok(VerbFlow::Done)
    }
}
