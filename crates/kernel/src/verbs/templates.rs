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

//! Saving item designs and stamping out copies of them. A saved item keeps
//! its verbs, so a copy behaves like the original did when it was saved.

use wold_common::matching::{MatchResult, match_name};
use wold_common::model::{ItemLocation, WorldStateError};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::look::{BE_MORE_SPECIFIC, NOTHING_LIKE_THAT};
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

/// Snapshot an item under its own name, verbs included.
pub struct SaveItem {}

impl SaveItem {
    pub fn new() -> Self {
        SaveItem {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["saveitem"])
    }
}

impl Verb for SaveItem {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Say it like this: saveitem <item>."));
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
        let key = frame.world().save_item_template(item.id)?;
        frame.send_to_self(Message::section(format!(
            "Saved as '{key}'. Place copies with: placeitem {key}."
        )));
        Ok(VerbFlow::Done)
    }
}

/// Spawn a fresh copy of a saved item into the current room. Bare
/// `placeitem` lists what there is to place.
pub struct PlaceItem {}

impl PlaceItem {
    pub fn new() -> Self {
        PlaceItem {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["placeitem"])
    }
}

impl Verb for PlaceItem {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            let keys = frame.ctx.world.item_template_keys();
            let body = if keys.is_empty() {
                "Nothing saved yet.".to_string()
            } else {
                keys.join("\n")
            };
            frame.send_to_self(Message::titled("Saved items", body));
            return Ok(VerbFlow::Done);
        }
        let item = match frame.world().spawn_item_template(rest, user.room) {
            Ok(item) => item,
            Err(WorldStateError::TemplateNotFound(_)) => {
                frame.send_to_self(Message::section(
                    "Nothing is saved under that key. Try: placeitem.",
                ));
                return Ok(VerbFlow::Done);
            }
            Err(e) => return Err(e.into()),
        };
        frame.send_to_self(Message::section(format!(
            "{} takes shape in front of you.",
            item.name
        )));
        if user.visible() {
            let what = if item.visible {
                item.name.as_str()
            } else {
                "something"
            };
            frame.send_to_others(Message::section(format!(
                "{} conjures {} out of nothing.",
                user.name, what
            )));
        }
        Ok(VerbFlow::Done)
    }
}
