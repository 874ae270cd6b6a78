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
use wold_common::model::{ItemLocation, User, VerbScope, WorldState};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

/// What the user would want told when they ask for something ambiguous or
/// absent; shared by most argument-taking verbs.
pub(crate) const BE_MORE_SPECIFIC: &str = "Which one do you mean? Be more specific.";
pub(crate) const NOTHING_LIKE_THAT: &str = "You see nothing like that here.";

/// The titled description of the viewer's current room: description, who
/// else is awake here, visible items, and the ways out. Master mode also
/// sees hidden exits, marked as such.
pub(crate) fn room_snapshot(
    world: &dyn WorldState,
    viewer: &User,
) -> Result<Message, CommandError> {
    let room = world.room(viewer.room)?;
    let mut body = room.description.clone();

    let occupants: Vec<String> = world
        .users_in_room(room.id)
        .into_iter()
        .filter(|u| u.id != viewer.id && u.connected() && u.visible())
        .map(|u| u.name)
        .collect();
    if !occupants.is_empty() {
        body.push_str(&format!("\nAlso here: {}.", occupants.join(", ")));
    }

    let items: Vec<String> = world
        .items_at(ItemLocation::Room(room.id))
        .into_iter()
        .filter(|i| i.visible)
        .map(|i| i.name)
        .collect();
    if !items.is_empty() {
        body.push_str(&format!("\nYou see: {}.", items.join(", ")));
    }

    let exits: Vec<String> = room
        .exits
        .iter()
        .filter(|e| e.visible || viewer.master_mode)
        .map(|e| {
            if e.visible {
                e.name.clone()
            } else {
                format!("{} (hidden)", e.name)
            }
        })
        .collect();
    if exits.is_empty() {
        body.push_str("\nThere is no way out.");
    } else {
        body.push_str(&format!("\nExits: {}.", exits.join(", ")));
    }

    Ok(Message::titled(room.name, body))
}

/// `look` for the room, `look <thing>` for items, exits, and the people
/// around you. Forgiving, partial matching all round.
pub struct Look {}

impl Look {
    pub fn new() -> Self {
        Look {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["look", "l"])
    }
}

impl Verb for Look {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            let snapshot = room_snapshot(frame.ctx.world, &user)?;
            frame.send_to_self(snapshot);
            return Ok(VerbFlow::Done);
        }

        // Items first, in the room or carried.
        let mut items = frame.ctx.world.items_at(ItemLocation::Room(user.room));
        items.extend(frame.ctx.world.items_at(ItemLocation::User(user.id)));
        match match_name(rest, &items, |i| i.name.as_str()) {
            MatchResult::One(item) => {
                frame.send_to_self(Message::titled(item.name.clone(), item.description.clone()));
                return Ok(VerbFlow::Done);
            }
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {}
        }

        // Then the ways out.
        let room = frame.room()?;
        let exits: Vec<_> = room
            .exits
            .iter()
            .filter(|e| e.visible || user.master_mode)
            .collect();
        match match_name(rest, exits.iter().copied(), |e| e.name.as_str()) {
            MatchResult::One(exit) => {
                let body = exit
                    .description
                    .clone()
                    .unwrap_or_else(|| "Nothing special about it.".to_string());
                frame.send_to_self(Message::titled(exit.name.clone(), body));
                return Ok(VerbFlow::Done);
            }
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {}
        }

        // Then whoever is standing around.
        let occupants: Vec<_> = frame
            .ctx
            .world
            .users_in_room(user.room)
            .into_iter()
            .filter(|u| u.connected() && u.visible())
            .collect();
        match match_name(rest, &occupants, |u| u.name.as_str()) {
            MatchResult::One(other) if other.id == user.id => {
                frame.send_to_self(Message::section("That would be you."));
            }
            MatchResult::One(other) => {
                frame.send_to_self(Message::section(format!(
                    "{} is here, very much awake.",
                    other.name
                )));
            }
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
            }
            MatchResult::None => {
                frame.send_to_self(Message::section(NOTHING_LIKE_THAT));
            }
        }
        Ok(VerbFlow::Done)
    }
}

/// The editor's x-ray view of the current room: numbers, hidden exits,
/// locks, invisible items, template keys, and attached verbs.
pub struct Info {}

impl Info {
    pub fn new() -> Self {
        Info {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["info"])
    }
}

impl Verb for Info {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let room = frame.room()?;
        let world = &*frame.ctx.world;

        let mut body = format!("{}\n", room.description);
        body.push_str("Exits:\n");
        if room.exits.is_empty() {
            body.push_str("  (none)\n");
        }
        for exit in &room.exits {
            let mut flags = String::new();
            if exit.locked {
                flags.push_str(" [locked]");
            }
            if !exit.visible {
                flags.push_str(" [hidden]");
            }
            body.push_str(&format!("  {} -> {}{}\n", exit.name, exit.destination, flags));
        }

        body.push_str("Items:\n");
        let items = world.items_at(ItemLocation::Room(room.id));
        if items.is_empty() {
            body.push_str("  (none)\n");
        }
        for item in &items {
            let mut flags = String::new();
            if !item.visible {
                flags.push_str(" [invisible]");
            }
            if let Some(key) = &item.template {
                flags.push_str(&format!(" [saved: {key}]"));
            }
            body.push_str(&format!("  {}{}\n", item.name, flags));
        }

        let mut verb_lines = vec![];
        for item in &items {
            for verb in world.custom_verbs(VerbScope::Item(item.id)) {
                verb_lines.push(format!("  {} (on {})", verb.names.join(", "), item.name));
            }
        }
        for verb in world.custom_verbs(VerbScope::Room(room.id)) {
            verb_lines.push(format!("  {} (on this room)", verb.names.join(", ")));
        }
        for verb in world.custom_verbs(VerbScope::World) {
            verb_lines.push(format!("  {} (on the world)", verb.names.join(", ")));
        }
        body.push_str("Verbs:\n");
        if verb_lines.is_empty() {
            body.push_str("  (none)");
        } else {
            body.push_str(verb_lines.join("\n").as_str());
        }

        frame.send_to_self(Message::titled(format!("Room {}: {}", room.id, room.name), body));
        Ok(VerbFlow::Done)
    }
}
