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

//! Carrying things around. An item has exactly one holder at any moment;
//! everything here reassigns that holder, nothing ever copies an item.

use wold_common::matching::{MatchResult, match_name};
use wold_common::model::{Item, ItemLocation};
use wold_common::tasks::{CommandError, Message};

use crate::session::Frame;
use crate::verbs::look::{BE_MORE_SPECIFIC, NOTHING_LIKE_THAT};
use crate::verbs::{Verb, VerbFlow, matches_trigger, rest_of};

/// Rightmost ASCII-case-insensitive occurrence of `sep`. Returns a byte
/// index that is always a char boundary, since `sep` is pure ASCII.
fn rfind_separator(text: &str, sep: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let sep = sep.as_bytes();
    if bytes.len() < sep.len() {
        return None;
    }
    bytes
        .windows(sep.len())
        .enumerate()
        .rev()
        .find(|(_, window)| window.eq_ignore_ascii_case(sep))
        .map(|(i, _)| i)
}

/// `take <item> from <user>`: repossess something another user carries.
///
/// Shares its trigger word with plain `take`, so it is consulted first and
/// only claims lines that actually have a `from` clause. The split is on
/// the last `from`, which keeps items with `from` in their name takeable.
pub struct TakeFrom {}

impl TakeFrom {
    pub fn new() -> Self {
        TakeFrom {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["take"]) && rfind_separator(rest_of(line), " from ").is_some()
    }
}

impl Verb for TakeFrom {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        let Some(split) = rfind_separator(rest, " from ") else {
            frame.send_to_self(Message::section("Say it like this: take <item> from <user>."));
            return Ok(VerbFlow::Done);
        };
        let item_part = rest[..split].trim();
        let user_part = rest[split + " from ".len()..].trim();

        let Some(target) = frame.ctx.world.user_named(user_part) else {
            frame.send_to_self(Message::section("Nobody goes by that name."));
            return Ok(VerbFlow::Done);
        };
        if target.id == user.id {
            frame.send_to_self(Message::section("You already carry what you carry."));
            return Ok(VerbFlow::Done);
        }
        if target.room != user.room {
            frame.send_to_self(Message::section(format!("{} is not here.", target.name)));
            return Ok(VerbFlow::Done);
        }

        let held = frame.ctx.world.items_at(ItemLocation::User(target.id));
        let item = match match_name(item_part, &held, |i| i.name.as_str()) {
            MatchResult::One(item) => item.clone(),
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {
                frame.send_to_self(Message::section(format!(
                    "{} carries nothing like that.",
                    target.name
                )));
                return Ok(VerbFlow::Done);
            }
        };

        frame.world().move_item(item.id, ItemLocation::User(user.id))?;
        frame.send_to_self(Message::section(format!(
            "You take {} from {}.",
            item.name, target.name
        )));
        if user.visible() {
            frame.send_to_user(
                &target,
                Message::section(format!("{} takes {} from you.", user.name, item.name)),
            );
        } else {
            frame.send_to_user(
                &target,
                Message::section(format!("{} is plucked out of your hands.", item.name)),
            );
        }
        if user.visible() {
            for other in frame.ctx.world.users_in_room(user.room) {
                if other.id == user.id || other.id == target.id {
                    continue;
                }
                frame.send_to_user(
                    &other,
                    Message::section(format!(
                        "{} takes something from {}.",
                        user.name, target.name
                    )),
                );
            }
        }
        Ok(VerbFlow::Done)
    }
}

/// Pick something up from the room. Invisible items stay out of partial
/// matching but an exact name still finds them.
pub struct Take {}

impl Take {
    pub fn new() -> Self {
        Take {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["take", "get"])
    }
}

impl Verb for Take {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Take what?"));
            return Ok(VerbFlow::Done);
        }

        let items = frame.ctx.world.items_at(ItemLocation::Room(user.room));
        let exact = items.iter().find(|i| i.name.eq_ignore_ascii_case(rest));
        let item = match exact {
            Some(item) => item.clone(),
            None => {
                let visible: Vec<&Item> = items.iter().filter(|i| i.visible).collect();
                match match_name(rest, visible.into_iter(), |i| i.name.as_str()) {
                    MatchResult::One(item) => item.clone(),
                    MatchResult::Many(_) => {
                        frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                        return Ok(VerbFlow::Done);
                    }
                    MatchResult::None => {
                        frame.send_to_self(Message::section(NOTHING_LIKE_THAT));
                        return Ok(VerbFlow::Done);
                    }
                }
            }
        };

        frame.world().move_item(item.id, ItemLocation::User(user.id))?;
        frame.send_to_self(Message::section(format!("You take {}.", item.name)));
        if user.visible() {
            let what = if item.visible {
                item.name.as_str()
            } else {
                "something"
            };
            frame.send_to_others(Message::section(format!("{} picks up {}.", user.name, what)));
        }
        Ok(VerbFlow::Done)
    }
}

/// Put something you carry down in the room.
pub struct Drop {}

impl Drop {
    pub fn new() -> Self {
        Drop {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["drop"])
    }
}

impl Verb for Drop {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        if rest.is_empty() {
            frame.send_to_self(Message::section("Drop what?"));
            return Ok(VerbFlow::Done);
        }

        let held = frame.ctx.world.items_at(ItemLocation::User(user.id));
        let item = match match_name(rest, &held, |i| i.name.as_str()) {
            MatchResult::One(item) => item.clone(),
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {
                frame.send_to_self(Message::section("You carry nothing like that."));
                return Ok(VerbFlow::Done);
            }
        };

        frame.world().move_item(item.id, ItemLocation::Room(user.room))?;
        frame.send_to_self(Message::section(format!("You drop {}.", item.name)));
        if user.visible() {
            let what = if item.visible {
                item.name.as_str()
            } else {
                "something"
            };
            frame.send_to_others(Message::section(format!("{} drops {}.", user.name, what)));
        }
        Ok(VerbFlow::Done)
    }
}

/// `give <item> to <user>`: hand something you carry to someone present.
pub struct Give {}

impl Give {
    pub fn new() -> Self {
        Give {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["give"])
    }
}

impl Verb for Give {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let rest = rest_of(line);
        let Some(split) = rfind_separator(rest, " to ") else {
            frame.send_to_self(Message::section("Say it like this: give <item> to <user>."));
            return Ok(VerbFlow::Done);
        };
        let item_part = rest[..split].trim();
        let user_part = rest[split + " to ".len()..].trim();

        let Some(target) = frame.ctx.world.user_named(user_part) else {
            frame.send_to_self(Message::section("Nobody goes by that name."));
            return Ok(VerbFlow::Done);
        };
        if target.id == user.id {
            frame.send_to_self(Message::section("It is already yours."));
            return Ok(VerbFlow::Done);
        }
        if target.room != user.room {
            frame.send_to_self(Message::section(format!("{} is not here.", target.name)));
            return Ok(VerbFlow::Done);
        }

        let held = frame.ctx.world.items_at(ItemLocation::User(user.id));
        let item = match match_name(item_part, &held, |i| i.name.as_str()) {
            MatchResult::One(item) => item.clone(),
            MatchResult::Many(_) => {
                frame.send_to_self(Message::section(BE_MORE_SPECIFIC));
                return Ok(VerbFlow::Done);
            }
            MatchResult::None => {
                frame.send_to_self(Message::section("You carry nothing like that."));
                return Ok(VerbFlow::Done);
            }
        };

        frame.world().move_item(item.id, ItemLocation::User(target.id))?;
        frame.send_to_self(Message::section(format!(
            "You give {} to {}.",
            item.name, target.name
        )));
        if user.visible() {
            frame.send_to_user(
                &target,
                Message::section(format!("{} gives you {}.", user.name, item.name)),
            );
            for other in frame.ctx.world.users_in_room(user.room) {
                if other.id == user.id || other.id == target.id {
                    continue;
                }
                frame.send_to_user(
                    &other,
                    Message::section(format!(
                        "{} gives something to {}.",
                        user.name, target.name
                    )),
                );
            }
        } else {
            frame.send_to_user(
                &target,
                Message::section(format!("{} appears in your hands.", item.name)),
            );
        }
        Ok(VerbFlow::Done)
    }
}

/// What you are carrying.
pub struct Inventory {}

impl Inventory {
    pub fn new() -> Self {
        Inventory {}
    }

    pub fn matches(line: &str) -> bool {
        matches_trigger(line, &["inventory", "inv", "i"])
    }
}

impl Verb for Inventory {
    fn process(
        &mut self,
        frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        let user = frame.user()?;
        let held = frame.ctx.world.items_at(ItemLocation::User(user.id));
        let body = if held.is_empty() {
            "Nothing at all.".to_string()
        } else {
            held.iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        };
        frame.send_to_self(Message::titled("You are carrying", body));
        Ok(VerbFlow::Done)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::rfind_separator;

    #[test_case("lantern from ada", Some(7); "plain")]
    #[test_case("lantern FROM ada", Some(7); "case insensitive")]
    #[test_case("letter from home from ada", Some(16); "last occurrence wins")]
    #[test_case("lantern", None; "absent")]
    #[test_case("from", None; "bare word is not a separator")]
    fn separator_search(text: &str, expected: Option<usize>) {
        assert_eq!(rfind_separator(text, " from "), expected);
    }

    #[test]
    fn take_from_needs_a_from_clause() {
        assert!(super::TakeFrom::matches("take lantern from ada"));
        assert!(!super::TakeFrom::matches("take lantern"));
        assert!(super::Take::matches("take lantern from ada"));
    }
}
