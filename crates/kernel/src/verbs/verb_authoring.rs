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

//! Teaching the world new verbs, and looking up what it already knows.
//!
//! A custom verb is names plus a list of command lines to replay. The
//! collection wizard uses `/` to cancel, which doubles as the guarantee
//! that no stored command is ever a bare `/`.

use std::mem;

use wold_common::matching::{MatchResult, match_name};
use wold_common::model::{CustomVerb, ItemLocation, User, VerbScope, WorldState, WorldStateError};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::look::{BE_MORE_SPECIFIC, NOTHING_LIKE_THAT};
use crate::verbs::{CANCEL_TOKEN, SENTINEL_OK, Verb, VerbFlow, matches_trigger, rest_of};

const LESSON_ABANDONED: &str = "The lesson is abandoned.";

fn is_ok_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(SENTINEL_OK)
}

/// Every custom verb that can fire in this room, in resolution order:
/// verbs on each item present, then the room's own, then the world's.
/// The position in this list is the number shown to (and typed by) users.
fn enumerate_here(world: &dyn WorldState, user: &User) -> Vec<(CustomVerb, String)> {
    let mut found = vec![];
    for item in world.items_at(ItemLocation::Room(user.room)) {
        for verb in world.custom_verbs(VerbScope::Item(item.id)) {
            found.push((verb, format!("on {}", item.name)));
        }
    }
    for verb in world.custom_verbs(VerbScope::Room(user.room)) {
        found.push((verb, "on this room".to_string()));
    }
    for verb in world.custom_verbs(VerbScope::World) {
        found.push((verb, "on the world".to_string()));
    }
    found
}

enum AddVerbState {
    Start,
    CollectNames {
        scope: VerbScope,
        target: String,
        names: Vec<String>,
    },
    CollectCommands {
        scope: VerbScope,
        names: Vec<String>,
        commands: Vec<String>,
    },
}

/// Attach a new verb to an item here, to this room, or to the world.
///
/// `addverb` teaches the room, `addverb world` the world, `addverb <item>`
/// an item present or carried. Names and commands are then collected one
/// line at a time until OK.
pub struct AddVerb {
    state: AddVerbState,
}

impl AddVerb {
    pub fn new() -> Self {
        AddVerb {
            state: AddVerbState::Start,
        }
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["addverb"])
    }
}

impl Verb for AddVerb {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        if line.trim() == CANCEL_TOKEN {
            frame.send_to_self(Message::section(LESSON_ABANDONED));
            return Ok(VerbFlow::Done);
        }
        match mem::replace(&mut self.state, AddVerbState::Start) {
            AddVerbState::Start => {
                let user = frame.user()?;
                let rest = rest_of(line);
                let (scope, target) = if rest.is_empty() {
                    (VerbScope::Room(user.room), "this room".to_string())
                } else if rest.eq_ignore_ascii_case("world") {
                    (VerbScope::World, "the world".to_string())
                } else {
                    let mut items = frame.ctx.world.items_at(ItemLocation::Room(user.room));
                    items.extend(frame.ctx.world.items_at(ItemLocation::User(user.id)));
                    match match_name(rest, &items, |i| i.name.as_str()) {
                        MatchResult::One(item) => {
                            (VerbScope::Item(item.id), item.name.clone())
                        }
                        MatchResult::Many(_) => {
                            frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                            return Ok(VerbFlow::Done);
                        }
                        MatchResult::None => {
                            frame.send_to_self(Message::section(NOTHING_LIKE_THAT));
                            return Ok(VerbFlow::Done);
                        }
                    }
                };
                frame.send_to_self(Message::section(format!(
                    "Teaching {target} a new verb. Type each name it will answer to, \
                     one per line; OK finishes the list."
                )));
                self.state = AddVerbState::CollectNames {
                    scope,
                    target,
                    names: vec![],
                };
            }
            AddVerbState::CollectNames {
                scope,
                target,
                mut names,
            } => {
                if is_ok_sentinel(line) {
                    if names.is_empty() {
                        frame.send_to_self(Message::line("It needs at least one name. Type one."));
                        self.state = AddVerbState::CollectNames {
                            scope,
                            target,
                            names,
                        };
                    } else {
                        frame.send_to_self(Message::line(
                            "Now the commands it runs, one per line; OK finishes.",
                        ));
                        self.state = AddVerbState::CollectCommands {
                            scope,
                            names,
                            commands: vec![],
                        };
                    }
                    return Ok(VerbFlow::Continue);
                }
                let name = line.trim().to_string();
                if name.is_empty() {
                    frame.send_to_self(Message::line("A name cannot be empty."));
                } else if names.iter().any(|n| n == &name) {
                    frame.send_to_self(Message::line("Already on the list."));
                } else {
                    frame.send_to_self(Message::line("Noted. Another name, or OK."));
                    names.push(name);
                }
                self.state = AddVerbState::CollectNames {
                    scope,
                    target,
                    names,
                };
            }
            AddVerbState::CollectCommands {
                scope,
                names,
                mut commands,
            } => {
                if is_ok_sentinel(line) {
                    if commands.is_empty() {
                        frame.send_to_self(Message::line(
                            "It needs at least one command. Type one.",
                        ));
                        self.state = AddVerbState::CollectCommands {
                            scope,
                            names,
                            commands,
                        };
                        return Ok(VerbFlow::Continue);
                    }
                    let first = names[0].clone();
                    match frame.world().add_custom_verb(scope, names, commands) {
                        Ok(_) => {
                            frame.send_to_self(Message::section(format!(
                                "Your verb is ready. Try it: {first}."
                            )));
                        }
                        Err(
                            WorldStateError::ItemNotFound(_) | WorldStateError::RoomNotFound(_),
                        ) => {
                            frame.send_to_self(Message::section(
                                "What you were teaching is gone; the lesson is lost.",
                            ));
                        }
                        Err(e) => return Err(e.into()),
                    }
                    return Ok(VerbFlow::Done);
                }
                let command = line.trim().to_string();
                if command.is_empty() {
                    frame.send_to_self(Message::line("A command cannot be empty."));
                } else {
                    frame.send_to_self(Message::line("Noted. Another command, or OK."));
                    commands.push(command);
                }
                self.state = AddVerbState::CollectCommands {
                    scope,
                    names,
                    commands,
                };
            }
        }
        Ok(VerbFlow::Continue)
    }
}

/// List the verbs that work here, or show one in full.
pub struct InspectVerb {}

impl InspectVerb {
    pub fn new() -> Self {
        InspectVerb {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["verbs", "inspectverb"])
    }
}

impl Verb for InspectVerb {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let found = enumerate_here(&*frame.ctx.world, &user);
        let rest = rest_of(line);

        if rest.is_empty() {
            if found.is_empty() {
                frame.send_to_self(Message::titled("Verbs that work here", "None yet."));
                return Ok(VerbFlow::Done);
            }
            let body: Vec<String> = found
                .iter()
                .enumerate()
                .map(|(i, (verb, label))| format!("{}. {} ({})", i + 1, verb.names.join(", "), label))
                .collect();
            frame.send_to_self(Message::titled("Verbs that work here", body.join("\n")));
            return Ok(VerbFlow::Done);
        }

        let picked = rest
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| found.get(i));
        let Some((verb, label)) = picked else {
            frame.send_to_self(Message::section("No verb has that number. Try: verbs."));
            return Ok(VerbFlow::Done);
        };
        let mut body = format!("Answers to: {}\nCommands:", verb.names.join(", "));
        for (i, command) in verb.commands.iter().enumerate() {
            body.push_str(&format!("\n  {}. {}", i + 1, command));
        }
        frame.send_to_self(Message::titled(
            format!("Verb {} ({})", verb.names[0], label),
            body,
        ));
        Ok(VerbFlow::Done)
    }
}

/// Unlearn a verb by its number in the `verbs` listing.
pub struct DeleteVerb {}

impl DeleteVerb {
    pub fn new() -> Self {
        DeleteVerb {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["deleteverb"])
    }
}

impl Verb for DeleteVerb {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        let Ok(number) = rest.parse::<usize>() else {
            frame.send_to_self(Message::section(
                "Say it like this: deleteverb <number>. The numbers come from: verbs.",
            ));
            return Ok(VerbFlow::Done);
        };
        let found = enumerate_here(&*frame.ctx.world, &user);
        let Some((verb, _)) = number.checked_sub(1).and_then(|i| found.get(i)) else {
            frame.send_to_self(Message::section("No verb has that number. Try: verbs."));
            return Ok(VerbFlow::Done);
        };
        let name = verb.names[0].clone();
        let id = verb.id;
        frame.world().delete_custom_verb(id)?;
        frame.send_to_self(Message::section(format!("The verb {name} is unlearned.")));
        Ok(VerbFlow::Done)
    }
}
