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

use rand::Rng;

use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

/// Speak to the room.
pub struct Say {}

impl Say {
    pub fn new() -> Self {
        Say {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["say"])
    }
}

impl Verb for Say {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let text = rest_of(line);
        if text.is_empty() {
            frame.send_to_self(Message::section("Say what?"));
            return Ok(VerbFlow::Done);
        }
        frame.send_to_self(Message::section(format!("You say: \"{text}\"")));
        frame.send_to_others(Message::section(format!("{} says: \"{}\"", user.name, text)));
        Ok(VerbFlow::Done)
    }
}

/// Act out something; the whole room sees the same third-person line.
pub struct Emote {}

impl Emote {
    pub fn new() -> Self {
        Emote {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["emote", "me"])
    }
}

impl Verb for Emote {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let text = rest_of(line);
        if text.is_empty() {
            frame.send_to_self(Message::section("Emote what?"));
            return Ok(VerbFlow::Done);
        }
        frame.send_to_room(Message::section(format!("{} {}", user.name, text)));
        Ok(VerbFlow::Done)
    }
}

/// Yell across the whole world. The text arrives in capitals whether you
/// typed it that way or not.
pub struct Shout {}

impl Shout {
    pub fn new() -> Self {
        Shout {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["shout"])
    }
}

impl Verb for Shout {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let text = rest_of(line);
        if text.is_empty() {
            frame.send_to_self(Message::section("Shout what?"));
            return Ok(VerbFlow::Done);
        }
        let text = text.to_uppercase();
        frame.send_to_self(Message::section(format!("You shout: \"{text}\"")));
        let announcement = Message::section(format!("{} shouts: \"{}\"", user.name, text));
        for other in frame.ctx.world.users() {
            if other.id == user.id {
                continue;
            }
            frame.send_to_user(&other, announcement.clone());
        }
        Ok(VerbFlow::Done)
    }
}

/// Who is awake, and where.
pub struct Who {}

impl Who {
    pub fn new() -> Self {
        Who {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["who"])
    }
}

impl Verb for Who {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let mut lines = vec![];
        for other in frame.ctx.world.users() {
            if !other.connected() {
                continue;
            }
            if !other.visible() && other.id != user.id && !user.master_mode {
                continue;
            }
            let place = frame
                .ctx
                .world
                .room(other.room)
                .map(|r| r.name)
                .unwrap_or_else(|_| "somewhere".to_string());
            let mut entry = format!("{} ({place})", other.name);
            if !other.visible() {
                entry.push_str(" [hidden]");
            }
            if other.id == user.id {
                entry.push_str(" (you)");
            }
            lines.push(entry);
        }
        frame.send_to_self(Message::titled("Awake right now", lines.join("\n")));
        Ok(VerbFlow::Done)
    }
}

/// Dice notation: `<count>d<sides>`, both parts optional. Count capped at
/// 20, sides at 1000, so nobody floods the room with a million d2s.
fn parse_dice(input: &str) -> Option<(u32, u32)> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Some((1, 6));
    }
    let (count_part, sides_part) = input.split_once('d')?;
    let count = if count_part.is_empty() {
        1
    } else {
        count_part.parse::<u32>().ok()?
    };
    let sides = sides_part.parse::<u32>().ok()?;
    if count == 0 || count > 20 || sides < 2 || sides > 1000 {
        return None;
    }
    Some((count, sides))
}

/// Roll dice in front of everyone. The room sees the same result you do,
/// which is the whole point of rolling in public.
pub struct Roll {}

impl Roll {
    pub fn new() -> Self {
        Roll {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["roll"])
    }
}

impl Verb for Roll {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let Some((count, sides)) = parse_dice(rest_of(line)) else {
            frame.send_to_self(Message::section(
                "Say it like this: roll 2d6. Up to 20 dice, up to 1000 sides.",
            ));
            return Ok(VerbFlow::Done);
        };

        let mut rng = rand::rng();
        let faces: Vec<u32> = (0..count).map(|_| rng.random_range(1..=sides)).collect();
        let total: u32 = faces.iter().sum();

        let text = if count == 1 {
            format!("{} rolls 1d{}: {}.", user.name, sides, total)
        } else {
            let shown: Vec<String> = faces.iter().map(|f| f.to_string()).collect();
            format!(
                "{} rolls {}d{}: {} = {}.",
                user.name,
                count,
                sides,
                shown.join(" + "),
                total
            )
        };
        frame.send_to_room(Message::section(text));
        Ok(VerbFlow::Done)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::parse_dice;

    #[test_case("", Some((1, 6)); "empty defaults to one d6")]
    #[test_case("2d6", Some((2, 6)); "plain notation")]
    #[test_case("d20", Some((1, 20)); "count may be omitted")]
    #[test_case("3D8", Some((3, 8)); "capital d accepted")]
    #[test_case(" 4d10 ", Some((4, 10)); "whitespace tolerated")]
    #[test_case("20d1000", Some((20, 1000)); "upper bounds inclusive")]
    #[test_case("0d6", None; "zero dice refused")]
    #[test_case("21d6", None; "too many dice refused")]
    #[test_case("2d1", None; "one-sided die refused")]
    #[test_case("2d1001", None; "too many sides refused")]
    #[test_case("banana", None; "gibberish refused")]
    #[test_case("2x6", None; "wrong separator refused")]
    fn dice_notation(input: &str, expected: Option<(u32, u32)>) {
        assert_eq!(parse_dice(input), expected);
    }
}
