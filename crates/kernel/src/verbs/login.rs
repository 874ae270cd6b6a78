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

use wold_common::model::WorldStateError;
use wold_common::tasks::{CommandError, Message};
use wold_common::util::valid_user_name;

use crate::session::Frame;
use crate::verbs::{Verb, VerbFlow, look};

/// The door into the world: keeps asking for a name until one sticks.
/// There are no passwords; a name is an identity, and logging in with a
/// name that is already connected elsewhere quietly takes it over (the
/// stale session notices on its next line).
pub struct Login {}

impl Login {
    pub fn new() -> Self {
        Login {}
    }
}

impl Default for Login {
    fn default() -> Self {
        Self::new()
    }
}

impl Verb for Login {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let Some(connection) = frame.session.connection() else {
            // Automation sessions are born authenticated and never get here.
            return Ok(VerbFlow::Done);
        };
        let name = line.trim();
        if !valid_user_name(name) {
            frame.send_to_self(Message::section(
                "A name is one word: letters, digits, '-' or '_'. What is your name?",
            ));
            return Ok(VerbFlow::Continue);
        }

        if let Some(user) = frame.ctx.world.user_named(name) {
            if user.automation {
                frame.send_to_self(Message::section("That name is reserved. Pick another."));
                return Ok(VerbFlow::Continue);
            }
            frame.world().connect_user(user.id, connection)?;
            frame.session.bind_user(user.id);
            let user = frame.user()?;
            frame.send_to_self(Message::section(format!("Welcome back, {}.", user.name)));
            let snapshot = look::room_snapshot(frame.ctx.world, &user)?;
            frame.send_to_self(snapshot);
            if user.visible() {
                frame.send_to_others(Message::section(format!("{} wakes up.", user.name)));
            }
            return Ok(VerbFlow::Done);
        }

        let entry_room = frame.ctx.world.world().entry_room;
        let user = match frame.world().create_user(name, entry_room) {
            Ok(user) => user,
            Err(
                WorldStateError::DuplicateUserName(_) | WorldStateError::ReservedUserName(_),
            ) => {
                frame.send_to_self(Message::section(
                    "That name is spoken for. Pick another.",
                ));
                return Ok(VerbFlow::Continue);
            }
            Err(e) => return Err(e.into()),
        };
        frame.world().connect_user(user.id, connection)?;
        frame.session.bind_user(user.id);
        frame.send_to_self(Message::section(format!(
            "Welcome, {}. You are new here; 'help' will get you oriented.",
            user.name
        )));
        if user.editor {
            frame.send_to_self(Message::line(
                "You are the first one in, so the world is yours to shape: you have editor rights.",
            ));
        }
        let snapshot = look::room_snapshot(frame.ctx.world, &user)?;
        frame.send_to_self(snapshot);
        frame.send_to_others(Message::section(format!(
            "A newcomer called {} appears.",
            user.name
        )));
        Ok(VerbFlow::Done)
    }
}
