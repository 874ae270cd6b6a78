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

use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::{Verb, VerbFlow, matches_trigger};

const EVERYONE: &str = "\
look [thing]            look around, or at one thing in particular
go <exit>               walk through an exit
recall                  return to where it all begins
say <text>              speak to the room
emote <text>            act something out
shout <text>            yell across the whole world
who                     see who is awake
roll [2d6]              roll dice in front of everyone
take <item>             pick something up
drop <item>             put something down
give <item> to <user>   hand something over
inventory               see what you are carrying
verbs [number]          list or inspect the verbs that work here
quit                    leave the world";

const EDITORS: &str = "\
build / craft / remodel     shape rooms and items
deleteroom / deleteexit / deleteitem
take <item> from <user>     repossess something
teleport <room number>      jump anywhere by number
info                        everything about this room
lock / unlock <exit>        bar or open a way
hide / reveal <exit>        conceal or expose a way
mastermode                  step behind the curtain
textto <user> <text>        speak as the world to one person
textroom <text>             speak as the world to this room
addverb / deleteverb        teach or unteach the world a verb
saveitem / placeitem        keep an item design and copy it";

const MASTERS: &str = "\
makeeditor <user>           grant editor rights
removeeditor <user>         revoke editor rights
textworld <text>            speak as the world to everyone";

/// The command list, sized to what the asker is allowed to do.
pub struct Help {}

impl Help {
    pub fn new() -> Self {
        Help {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["help", "?"])
    }
}

impl Verb for Help {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let mut body = EVERYONE.to_string();
        if user.privileged() {
            body.push_str("\n\nAs an editor:\n");
            body.push_str(EDITORS);
        }
        if user.master_mode {
            body.push_str("\n\nBehind the curtain:\n");
            body.push_str(MASTERS);
        }
        body.push_str("\n\nAnything else you type might be a verb someone taught the world.");
        frame.send_to_self(Message::titled("What you can do", body));
        Ok(VerbFlow::Done)
    }
}
