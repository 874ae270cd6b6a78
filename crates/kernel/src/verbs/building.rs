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

//! The construction wizards. Each one walks the builder through a few
//! questions, one line per answer, and only touches the world on the final
//! answer. `/` on its own abandons the whole thing at any point.

use std::mem;

use wold_common::model::{Exit, ItemLocation};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::{CANCEL_TOKEN, Verb, VerbFlow, matches_trigger};

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

enum BuildState {
    Start,
    AwaitName,
    AwaitDescription {
        name: String,
    },
    AwaitExit {
        name: String,
        description: String,
    },
    AwaitReturnExit {
        name: String,
        description: String,
        way_there: String,
    },
}

/// Build a new room off the current one, with a passage each way.
pub struct Build {
    state: BuildState,
}

impl Build {
    pub fn new() -> Self {
        Build {
            state: BuildState::Start,
        }
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["build"])
    }
}

impl Verb for Build {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        if line.trim() == CANCEL_TOKEN {
            frame.send_to_self(Message::section("Construction abandoned."));
            return Ok(VerbFlow::Done);
        }
        let answer = line.trim().to_string();
        match mem::replace(&mut self.state, BuildState::Start) {
            BuildState::Start => {
                frame.send_to_self(Message::section("What shall the new room be called?"));
                self.state = BuildState::AwaitName;
            }
            BuildState::AwaitName => {
                if answer.is_empty() {
                    frame.send_to_self(Message::line("It needs a name. What shall it be called?"));
                    self.state = BuildState::AwaitName;
                } else {
                    frame.send_to_self(Message::line("Describe it."));
                    self.state = BuildState::AwaitDescription { name: answer };
                }
            }
            BuildState::AwaitDescription { name } => {
                if answer.is_empty() {
                    frame.send_to_self(Message::line("Give it at least a line of description."));
                    self.state = BuildState::AwaitDescription { name };
                } else {
                    frame.send_to_self(Message::line("Name the way leading there."));
                    self.state = BuildState::AwaitExit {
                        name,
                        description: answer,
                    };
                }
            }
            BuildState::AwaitExit { name, description } => {
                if answer.is_empty() {
                    frame.send_to_self(Message::line("The way needs a name."));
                    self.state = BuildState::AwaitExit { name, description };
                } else if frame.room()?.exit_named(&answer).is_some() {
                    frame.send_to_self(Message::line(
                        "There is already a way called that here. Pick another name.",
                    ));
                    self.state = BuildState::AwaitExit { name, description };
                } else {
                    frame.send_to_self(Message::line("Name the way leading back."));
                    self.state = BuildState::AwaitReturnExit {
                        name,
                        description,
                        way_there: answer,
                    };
                }
            }
            BuildState::AwaitReturnExit {
                name,
                description,
                way_there,
            } => {
                if answer.is_empty() {
                    frame.send_to_self(Message::line("The way back needs a name, too."));
                    self.state = BuildState::AwaitReturnExit {
                        name,
                        description,
                        way_there,
                    };
                    return Ok(VerbFlow::Continue);
                }
                // The room may have changed hands between our prompts; other
                // sessions keep running while a wizard waits.
                if frame.room()?.exit_named(&way_there).is_some() {
                    frame.send_to_self(Message::line(
                        "Someone beat you to that name for the way there. Pick another.",
                    ));
                    self.state = BuildState::AwaitExit { name, description };
                    return Ok(VerbFlow::Continue);
                }
                let user = frame.user()?;
                let origin = user.room;
                let new_room = frame.world().create_room(&name, &description)?;
                frame
                    .world()
                    .add_exit(origin, Exit::new(way_there.clone(), new_room.id))?;
                frame
                    .world()
                    .add_exit(new_room.id, Exit::new(answer, origin))?;
                frame.send_to_self(Message::section(format!(
                    "Built: {} (room {}). The way {} leads there.",
                    new_room.name, new_room.id, way_there
                )));
                if user.visible() {
                    frame.send_to_others(Message::section(format!(
                        "{} builds something new beyond {}.",
                        user.name, way_there
                    )));
                }
                return Ok(VerbFlow::Done);
            }
        }
        Ok(VerbFlow::Continue)
    }
}

enum CraftState {
    Start,
    AwaitName,
    AwaitDescription {
        name: String,
    },
    AwaitVisibility {
        name: String,
        description: String,
    },
}

/// Craft a new item into the current room.
pub struct Craft {
    state: CraftState,
}

impl Craft {
    pub fn new() -> Self {
        Craft {
            state: CraftState::Start,
        }
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["craft"])
    }
}

impl Verb for Craft {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        if line.trim() == CANCEL_TOKEN {
            frame.send_to_self(Message::section("The half-formed item dissolves."));
            return Ok(VerbFlow::Done);
        }
        let answer = line.trim().to_string();
        match mem::replace(&mut self.state, CraftState::Start) {
            CraftState::Start => {
                frame.send_to_self(Message::section("What is the item called?"));
                self.state = CraftState::AwaitName;
            }
            CraftState::AwaitName => {
                let user = frame.user()?;
                let taken = frame
                    .ctx
                    .world
                    .items_at(ItemLocation::Room(user.room))
                    .iter()
                    .any(|i| i.name.eq_ignore_ascii_case(&answer));
                if answer.is_empty() {
                    frame.send_to_self(Message::line("It needs a name. What is it called?"));
                    self.state = CraftState::AwaitName;
                } else if taken {
                    frame.send_to_self(Message::line(
                        "Something called that is already here. Pick another name.",
                    ));
                    self.state = CraftState::AwaitName;
                } else {
                    frame.send_to_self(Message::line("Describe it."));
                    self.state = CraftState::AwaitDescription { name: answer };
                }
            }
            CraftState::AwaitDescription { name } => {
                if answer.is_empty() {
                    frame.send_to_self(Message::line("Give it at least a line of description."));
                    self.state = CraftState::AwaitDescription { name };
                } else {
                    frame.send_to_self(Message::line("Should it be plainly visible? (yes/no)"));
                    self.state = CraftState::AwaitVisibility {
                        name,
                        description: answer,
                    };
                }
            }
            CraftState::AwaitVisibility { name, description } => {
                let Some(visible) = parse_yes_no(&answer) else {
                    frame.send_to_self(Message::line("Just yes or no."));
                    self.state = CraftState::AwaitVisibility { name, description };
                    return Ok(VerbFlow::Continue);
                };
                let user = frame.user()?;
                let item = frame.world().create_item(
                    &name,
                    &description,
                    visible,
                    ItemLocation::Room(user.room),
                )?;
                frame.send_to_self(Message::section(format!("You craft {}.", item.name)));
                if user.visible() {
                    frame.send_to_others(Message::section(format!(
                        "{} crafts something new.",
                        user.name
                    )));
                }
                return Ok(VerbFlow::Done);
            }
        }
        Ok(VerbFlow::Continue)
    }
}

enum RemodelState {
    Start,
    AwaitName,
    AwaitDescription { name: Option<String> },
}

/// Rename or redescribe the current room. Empty answers keep what is there.
pub struct Remodel {
    state: RemodelState,
}

impl Remodel {
    pub fn new() -> Self {
        Remodel {
            state: RemodelState::Start,
        }
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["remodel"])
    }
}

impl Verb for Remodel {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        if line.trim() == CANCEL_TOKEN {
            frame.send_to_self(Message::section("Remodeling abandoned."));
            return Ok(VerbFlow::Done);
        }
        let answer = line.trim().to_string();
        match mem::replace(&mut self.state, RemodelState::Start) {
            RemodelState::Start => {
                let room = frame.room()?;
                frame.send_to_self(Message::section(format!(
                    "Remodeling {}. New name? (empty keeps it)",
                    room.name
                )));
                self.state = RemodelState::AwaitName;
            }
            RemodelState::AwaitName => {
                let name = (!answer.is_empty()).then_some(answer);
                frame.send_to_self(Message::line("New description? (empty keeps it)"));
                self.state = RemodelState::AwaitDescription { name };
            }
            RemodelState::AwaitDescription { name } => {
                let description = (!answer.is_empty()).then_some(answer);
                if name.is_none() && description.is_none() {
                    frame.send_to_self(Message::section("Nothing changed."));
                    return Ok(VerbFlow::Done);
                }
                let user = frame.user()?;
                frame
                    .world()
                    .update_room(user.room, name.as_deref(), description.as_deref())?;
                frame.send_to_self(Message::section("The room reshapes itself around you."));
                if user.visible() {
                    frame.send_to_others(Message::section(format!(
                        "{} remodels this place before your eyes.",
                        user.name
                    )));
                }
                return Ok(VerbFlow::Done);
            }
        }
        Ok(VerbFlow::Continue)
    }
}
