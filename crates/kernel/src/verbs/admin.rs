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

//! The curtain-side verbs: invisibility, locks, titles, and speaking with
//! the world's own voice.

use tracing::warn;

use wold_common::tasks::{CommandError, Message};
use wold_common::util::split_first_word;

use crate::session::Frame;
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

const NO_SUCH_WAY: &str = "No way called that leads out of here.";
const NO_SUCH_USER: &str = "Nobody goes by that name.";

/// Toggle master mode: invisible to listings and announcements, free to
/// pass locked exits, able to see what is hidden.
pub struct MasterMode {}

impl MasterMode {
    pub fn new() -> Self {
        MasterMode {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["mastermode"])
    }
}

impl Verb for MasterMode {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        if user.master_mode {
            frame.world().set_master_mode(user.id, false)?;
            frame.send_to_self(Message::section("You step back into view."));
            frame.send_to_others(Message::section(format!(
                "{} appears from nowhere.",
                user.name
            )));
        } else {
            frame.world().set_master_mode(user.id, true)?;
            frame.send_to_self(Message::section(
                "You slip behind the curtain. Nobody can see you now.",
            ));
        }
        Ok(VerbFlow::Done)
    }
}

/// Bar an exit. Locked ways refuse passage to everyone outside master mode.
pub struct Lock {}

impl Lock {
    pub fn new() -> Self {
        Lock {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["lock"])
    }
}

impl Verb for Lock {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        set_lock(frame, rest_of(line), true)
    }
}

pub struct Unlock {}

impl Unlock {
    pub fn new() -> Self {
        Unlock {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["unlock"])
    }
}

impl Verb for Unlock {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        set_lock(frame, rest_of(line), false)
    }
}

fn set_lock(frame: &mut Frame<'_, '_>, way: &str, locked: bool) -> Result<VerbFlow, CommandError> {
    if way.is_empty() {
        let usage = if locked { "lock <way>" } else { "unlock <way>" };
        frame.send_to_self(Message::section(format!("Say it like this: {usage}.")));
        return Ok(VerbFlow::Done);
    }
    let room = frame.room()?;
    let Some(exit) = room.exit_named(way) else {
        frame.send_to_self(Message::section(NO_SUCH_WAY));
        return Ok(VerbFlow::Done);
    };
    if exit.locked == locked {
        let already = if locked {
            "It is already locked."
        } else {
            "It is not locked."
        };
        frame.send_to_self(Message::section(already));
        return Ok(VerbFlow::Done);
    }
    let name = exit.name.clone();
    frame.world().set_exit_locked(room.id, &name, locked)?;
    // The click carries; everyone in the room hears it.
    frame.send_to_room(Message::section("You hear a heavy click."));
    Ok(VerbFlow::Done)
}

/// Conceal an exit from listings. It still works for anyone who knows its
/// exact name.
pub struct Hide {}

impl Hide {
    pub fn new() -> Self {
        Hide {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["hide"])
    }
}

impl Verb for Hide {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let way = rest_of(line);
        if way.is_empty() {
            frame.send_to_self(Message::section("Say it like this: hide <way>."));
            return Ok(VerbFlow::Done);
        }
        let room = frame.room()?;
        let Some(exit) = room.exit_named(way) else {
            frame.send_to_self(Message::section(NO_SUCH_WAY));
            return Ok(VerbFlow::Done);
        };
        if !exit.visible {
            frame.send_to_self(Message::section("It is already concealed."));
            return Ok(VerbFlow::Done);
        }
        let name = exit.name.clone();
        frame.world().set_exit_visible(room.id, &name, false)?;
        frame.send_to_self(Message::section(format!("The way {name} is now concealed.")));
        Ok(VerbFlow::Done)
    }
}

pub struct Reveal {}

impl Reveal {
    pub fn new() -> Self {
        Reveal {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["reveal"])
    }
}

impl Verb for Reveal {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let way = rest_of(line);
        if way.is_empty() {
            frame.send_to_self(Message::section("Say it like this: reveal <way>."));
            return Ok(VerbFlow::Done);
        }
        let room = frame.room()?;
        let Some(exit) = room.exit_named(way) else {
            frame.send_to_self(Message::section(NO_SUCH_WAY));
            return Ok(VerbFlow::Done);
        };
        if exit.visible {
            frame.send_to_self(Message::section("It is in plain view already."));
            return Ok(VerbFlow::Done);
        }
        let name = exit.name.clone();
        frame.world().set_exit_visible(room.id, &name, true)?;
        frame.send_to_room(Message::section(format!(
            "A way called {name} shimmers into view."
        )));
        Ok(VerbFlow::Done)
    }
}

/// Grant another user the right to build.
pub struct MakeEditor {}

impl MakeEditor {
    pub fn new() -> Self {
        MakeEditor {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["makeeditor"])
    }
}

impl Verb for MakeEditor {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let name = rest_of(line);
        if name.is_empty() {
            frame.send_to_self(Message::section("Say it like this: makeeditor <user>."));
            return Ok(VerbFlow::Done);
        }
        let Some(target) = frame.ctx.world.user_named(name) else {
            frame.send_to_self(Message::section(NO_SUCH_USER));
            return Ok(VerbFlow::Done);
        };
        if target.automation {
            frame.send_to_self(Message::section("That one needs no title."));
            return Ok(VerbFlow::Done);
        }
        if target.editor {
            frame.send_to_self(Message::section(format!(
                "{} is already an editor.",
                target.name
            )));
            return Ok(VerbFlow::Done);
        }
        frame.world().set_editor(target.id, true)?;
        frame.send_to_self(Message::section(format!(
            "{} can now shape the world.",
            target.name
        )));
        frame.send_to_user(
            &target,
            Message::section("You have been granted the right to shape the world."),
        );
        Ok(VerbFlow::Done)
    }
}

pub struct RemoveEditor {}

impl RemoveEditor {
    pub fn new() -> Self {
        RemoveEditor {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["removeeditor"])
    }
}

impl Verb for RemoveEditor {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let name = rest_of(line);
        if name.is_empty() {
            frame.send_to_self(Message::section("Say it like this: removeeditor <user>."));
            return Ok(VerbFlow::Done);
        }
        let Some(target) = frame.ctx.world.user_named(name) else {
            frame.send_to_self(Message::section(NO_SUCH_USER));
            return Ok(VerbFlow::Done);
        };
        if !target.editor {
            frame.send_to_self(Message::section(format!(
                "{} is not an editor.",
                target.name
            )));
            return Ok(VerbFlow::Done);
        }
        frame.world().set_editor(target.id, false)?;
        frame.send_to_self(Message::section(format!(
            "{} may no longer shape the world.",
            target.name
        )));
        frame.send_to_user(
            &target,
            Message::section("Your right to shape the world has been withdrawn."),
        );
        Ok(VerbFlow::Done)
    }
}

/// Speak with the world's own voice to one user: the text arrives bare,
/// with no name attached.
pub struct TextTo {}

impl TextTo {
    pub fn new() -> Self {
        TextTo {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["textto"])
    }
}

impl Verb for TextTo {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let rest = rest_of(line);
        let (name, text) = split_first_word(rest);
        if name.is_empty() || text.is_empty() {
            frame.send_to_self(Message::section("Say it like this: textto <user> <text>."));
            return Ok(VerbFlow::Done);
        }
        let Some(target) = frame.ctx.world.user_named(name) else {
            frame.send_to_self(Message::section(NO_SUCH_USER));
            return Ok(VerbFlow::Done);
        };
        if !target.connected() {
            frame.send_to_self(Message::section(format!(
                "{} is asleep; the words dissolve.",
                target.name
            )));
            return Ok(VerbFlow::Done);
        }
        frame.send_to_user(&target, Message::section(text));
        frame.send_to_self(Message::section(format!(
            "The world whispers to {}.",
            target.name
        )));
        Ok(VerbFlow::Done)
    }
}

/// Speak with the world's own voice to the whole room, the speaker
/// included.
pub struct TextRoom {}

impl TextRoom {
    pub fn new() -> Self {
        TextRoom {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["textroom"])
    }
}

impl Verb for TextRoom {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let text = rest_of(line);
        if text.is_empty() {
            frame.send_to_self(Message::section("Say it like this: textroom <text>."));
            return Ok(VerbFlow::Done);
        }
        frame.send_to_room(Message::section(text));
        Ok(VerbFlow::Done)
    }
}

/// Speak with the world's own voice to everyone connected anywhere.
pub struct TextWorld {}

impl TextWorld {
    pub fn new() -> Self {
        TextWorld {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["textworld"])
    }
}

impl Verb for TextWorld {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let text = rest_of(line);
        if text.is_empty() {
            frame.send_to_self(Message::section("Say it like this: textworld <text>."));
            return Ok(VerbFlow::Done);
        }
        frame.send_to_world(Message::section(text));
        Ok(VerbFlow::Done)
    }
}

/// Leave the world. The user record stays; only the connection goes.
pub struct Quit {}

impl Quit {
    pub fn new() -> Self {
        Quit {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["quit", "logout"])
    }
}

impl Verb for Quit {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        frame.send_to_self(Message::boxed(format!(
            "Farewell, {}. The world will remember you.",
            user.name
        )));
        if user.visible() {
            frame.send_to_others(Message::section(format!("{} fades away.", user.name)));
        }
        frame.world().disconnect_user(user.id)?;
        if let Some(connection) = frame.session.connection() {
            if let Err(e) = frame.ctx.sender.disconnect(connection) {
                warn!(%connection, "could not close connection on quit: {e}");
            }
        }
        frame.session.terminate();
        Ok(VerbFlow::Done)
    }
}
