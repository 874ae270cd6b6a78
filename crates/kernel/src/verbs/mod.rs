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

//! The built-in verb roster. Each verb is a small unit of work over one
//! logical command, which may span several input lines; the registry is the
//! fixed priority order they are consulted in.

use wold_common::model::User;
use wold_common::tasks::CommandError;
use wold_common::util::split_first_word;

use crate::session::Frame;

pub mod admin;
pub mod building;
pub mod communication;
pub mod demolition;
pub mod help;
pub mod inventory;
pub mod login;
pub mod look;
pub mod movement;
pub mod templates;
pub mod verb_authoring;

/// Multi-step verbs return `Continue` to keep the session engaged and
/// receive the next line too; `Done` releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbFlow {
    Continue,
    Done,
}

/// One in-flight command interpretation. The instance lives from the line
/// that matched it until it reports `Done`, holding whatever intermediate
/// state the interaction needs.
pub trait Verb: Send {
    fn process(&mut self, frame: &mut Frame<'_, '_>, line: &str)
    -> Result<VerbFlow, CommandError>;
}

/// Who may trigger a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermLevel {
    /// Anyone.
    Open,
    /// Editors, or anyone in master mode.
    Privileged,
    /// Master mode only.
    Master,
}

impl PermLevel {
    #[must_use]
    pub fn allows(&self, user: &User) -> bool {
        match self {
            PermLevel::Open => true,
            PermLevel::Privileged => user.privileged(),
            PermLevel::Master => user.master_mode,
        }
    }
}

/// Typing "/" inside any wizard abandons it without touching the world.
pub const CANCEL_TOKEN: &str = "/";
/// Ends a collection phase inside the verb-authoring wizard.
pub const SENTINEL_OK: &str = "OK";

/// One registry slot: how a line claims the verb, who may use it, and how
/// to mint a fresh instance once it does.
pub struct VerbEntry {
    name: &'static str,
    perm: PermLevel,
    /// Entry is only consulted for sessions with no user bound.
    login_only: bool,
    matcher: fn(&str) -> bool,
    ctor: fn() -> Box<dyn Verb>,
}

impl VerbEntry {
    #[must_use]
    pub fn new(
        name: &'static str,
        perm: PermLevel,
        matcher: fn(&str) -> bool,
        ctor: fn() -> Box<dyn Verb>,
    ) -> Self {
        Self {
            name,
            perm,
            login_only: false,
            matcher,
            ctor,
        }
    }

    fn login(name: &'static str, ctor: fn() -> Box<dyn Verb>) -> Self {
        Self {
            name,
            perm: PermLevel::Open,
            login_only: true,
            matcher: |_| true,
            ctor,
        }
    }
}

/// The ordered roster. Order is part of the observable contract: the first
/// entry whose matcher accepts the line wins, so a more specific verb must
/// be registered ahead of a more general one that shades it (take-from
/// ahead of take).
pub struct VerbRegistry {
    entries: Vec<VerbEntry>,
}

impl VerbRegistry {
    /// The stock roster, in its canonical order.
    #[must_use]
    pub fn standard() -> Self {
        use self::admin::{
            Hide, Lock, MakeEditor, MasterMode, Quit, RemoveEditor, Reveal, TextRoom, TextTo,
            TextWorld, Unlock,
        };
        use self::building::{Build, Craft, Remodel};
        use self::communication::{Emote, Roll, Say, Shout, Who};
        use self::demolition::{DeleteExit, DeleteItem, DeleteRoom};
        use self::help::Help;
        use self::inventory::{Drop, Give, Inventory, Take, TakeFrom};
        use self::login::Login;
        use self::look::{Info, Look};
        use self::movement::{Go, Recall, Teleport};
        use self::templates::{PlaceItem, SaveItem};
        use self::verb_authoring::{AddVerb, DeleteVerb, InspectVerb};

        let entries = vec![
            VerbEntry::login("login", || Box::new(Login::new())),
            VerbEntry::new("help", PermLevel::Open, Help::matches, || {
                Box::new(Help::new())
            }),
            VerbEntry::new("look", PermLevel::Open, Look::matches, || {
                Box::new(Look::new())
            }),
            VerbEntry::new("info", PermLevel::Privileged, Info::matches, || {
                Box::new(Info::new())
            }),
            VerbEntry::new("go", PermLevel::Open, Go::matches, || Box::new(Go::new())),
            VerbEntry::new("recall", PermLevel::Open, Recall::matches, || {
                Box::new(Recall::new())
            }),
            VerbEntry::new("teleport", PermLevel::Privileged, Teleport::matches, || {
                Box::new(Teleport::new())
            }),
            VerbEntry::new("say", PermLevel::Open, Say::matches, || {
                Box::new(Say::new())
            }),
            VerbEntry::new("emote", PermLevel::Open, Emote::matches, || {
                Box::new(Emote::new())
            }),
            VerbEntry::new("shout", PermLevel::Open, Shout::matches, || {
                Box::new(Shout::new())
            }),
            VerbEntry::new("who", PermLevel::Open, Who::matches, || {
                Box::new(Who::new())
            }),
            VerbEntry::new("roll", PermLevel::Open, Roll::matches, || {
                Box::new(Roll::new())
            }),
            VerbEntry::new("build", PermLevel::Privileged, Build::matches, || {
                Box::new(Build::new())
            }),
            VerbEntry::new("craft", PermLevel::Privileged, Craft::matches, || {
                Box::new(Craft::new())
            }),
            VerbEntry::new("remodel", PermLevel::Privileged, Remodel::matches, || {
                Box::new(Remodel::new())
            }),
            VerbEntry::new(
                "deleteroom",
                PermLevel::Privileged,
                DeleteRoom::matches,
                || Box::new(DeleteRoom::new()),
            ),
            VerbEntry::new(
                "deleteexit",
                PermLevel::Privileged,
                DeleteExit::matches,
                || Box::new(DeleteExit::new()),
            ),
            VerbEntry::new(
                "deleteitem",
                PermLevel::Privileged,
                DeleteItem::matches,
                || Box::new(DeleteItem::new()),
            ),
            // The more specific take form must come first; both claim lines
            // starting with "take".
            VerbEntry::new("take-from", PermLevel::Privileged, TakeFrom::matches, || {
                Box::new(TakeFrom::new())
            }),
            VerbEntry::new("take", PermLevel::Open, Take::matches, || {
                Box::new(Take::new())
            }),
            VerbEntry::new("drop", PermLevel::Open, Drop::matches, || {
                Box::new(Drop::new())
            }),
            VerbEntry::new("give", PermLevel::Open, Give::matches, || {
                Box::new(Give::new())
            }),
            VerbEntry::new("inventory", PermLevel::Open, Inventory::matches, || {
                Box::new(Inventory::new())
            }),
            VerbEntry::new(
                "mastermode",
                PermLevel::Privileged,
                MasterMode::matches,
                || Box::new(MasterMode::new()),
            ),
            VerbEntry::new("lock", PermLevel::Privileged, Lock::matches, || {
                Box::new(Lock::new())
            }),
            VerbEntry::new("unlock", PermLevel::Privileged, Unlock::matches, || {
                Box::new(Unlock::new())
            }),
            VerbEntry::new("hide", PermLevel::Privileged, Hide::matches, || {
                Box::new(Hide::new())
            }),
            VerbEntry::new("reveal", PermLevel::Privileged, Reveal::matches, || {
                Box::new(Reveal::new())
            }),
            VerbEntry::new("makeeditor", PermLevel::Master, MakeEditor::matches, || {
                Box::new(MakeEditor::new())
            }),
            VerbEntry::new(
                "removeeditor",
                PermLevel::Master,
                RemoveEditor::matches,
                || Box::new(RemoveEditor::new()),
            ),
            VerbEntry::new("textto", PermLevel::Privileged, TextTo::matches, || {
                Box::new(TextTo::new())
            }),
            VerbEntry::new("textroom", PermLevel::Privileged, TextRoom::matches, || {
                Box::new(TextRoom::new())
            }),
            VerbEntry::new("textworld", PermLevel::Master, TextWorld::matches, || {
                Box::new(TextWorld::new())
            }),
            VerbEntry::new("addverb", PermLevel::Privileged, AddVerb::matches, || {
                Box::new(AddVerb::new())
            }),
            VerbEntry::new("inspectverb", PermLevel::Open, InspectVerb::matches, || {
                Box::new(InspectVerb::new())
            }),
            VerbEntry::new(
                "deleteverb",
                PermLevel::Privileged,
                DeleteVerb::matches,
                || Box::new(DeleteVerb::new()),
            ),
            VerbEntry::new("saveitem", PermLevel::Privileged, SaveItem::matches, || {
                Box::new(SaveItem::new())
            }),
            VerbEntry::new("placeitem", PermLevel::Privileged, PlaceItem::matches, || {
                Box::new(PlaceItem::new())
            }),
            VerbEntry::new("quit", PermLevel::Open, Quit::matches, || {
                Box::new(Quit::new())
            }),
        ];
        Self { entries }
    }

    /// A registry out of explicit entries, for hosts or tests that want a
    /// different roster.
    #[must_use]
    pub fn with_entries(entries: Vec<VerbEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry after the standard ones.
    pub fn register(&mut self, entry: VerbEntry) {
        self.entries.push(entry);
    }

    /// First matching entry wins. Entries the user's permission level does
    /// not allow are skipped entirely, as are login-only entries once a
    /// user is bound (and everything else before one is).
    #[must_use]
    pub fn match_line(
        &self,
        line: &str,
        user: Option<&User>,
    ) -> Option<(&'static str, Box<dyn Verb>)> {
        for entry in &self.entries {
            match user {
                None => {
                    if !entry.login_only {
                        continue;
                    }
                }
                Some(user) => {
                    if entry.login_only || !entry.perm.allows(user) {
                        continue;
                    }
                }
            }
            if (entry.matcher)(line) {
                return Some((entry.name, (entry.ctor)()));
            }
        }
        None
    }
}

/// True when the line's first word is one of the triggers, case-insensitive.
/// The rest of the line is left alone; arguments keep their case.
pub(crate) fn matches_trigger(line: &str, triggers: &[&str]) -> bool {
    let (first, _) = split_first_word(line);
    triggers.iter().any(|t| first.eq_ignore_ascii_case(t))
}

/// The argument part of a trigger line.
pub(crate) fn rest_of(line: &str) -> &str {
    split_first_word(line).1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use wold_common::model::{RoomId, User, UserId};

    use super::*;

    fn plain_user() -> User {
        User {
            id: UserId(7),
            name: "ada".into(),
            room: RoomId(1),
            connection: None,
            master_mode: false,
            editor: false,
            automation: false,
        }
    }

    fn editor_user() -> User {
        User {
            editor: true,
            ..plain_user()
        }
    }

    #[test_case("look" ; "bare trigger")]
    #[test_case("LOOK" ; "case insensitive")]
    #[test_case("look lantern" ; "with argument")]
    #[test_case("  look  " ; "padded")]
    fn trigger_accepts(line: &str) {
        assert!(matches_trigger(line, &["look", "l"]));
    }

    #[test_case("lookout" ; "longer word")]
    #[test_case("overlook" ; "prefix elsewhere")]
    #[test_case("" ; "empty")]
    fn trigger_rejects(line: &str) {
        assert!(!matches_trigger(line, &["look", "l"]));
    }

    #[test]
    fn rest_of_strips_trigger() {
        assert_eq!(rest_of("take rusty lantern"), "rusty lantern");
        assert_eq!(rest_of("look"), "");
    }

    #[test]
    fn matching_is_deterministic() {
        let registry = VerbRegistry::standard();
        let user = plain_user();
        let first = registry.match_line("say hello", Some(&user)).unwrap().0;
        for _ in 0..10 {
            let again = registry.match_line("say hello", Some(&user)).unwrap().0;
            assert_eq!(first, again);
        }
    }

    #[test]
    fn take_from_wins_over_take() {
        let registry = VerbRegistry::standard();
        let user = editor_user();
        let (name, _) = registry
            .match_line("take lantern from ada", Some(&user))
            .unwrap();
        assert_eq!(name, "take-from");
        let (name, _) = registry.match_line("take lantern", Some(&user)).unwrap();
        assert_eq!(name, "take");
    }

    #[test]
    fn perm_gated_entries_are_skipped_not_refused() {
        let registry = VerbRegistry::standard();
        // A plain user typing "build" falls through the privileged entry and
        // matches nothing at all.
        assert!(registry.match_line("build", Some(&plain_user())).is_none());
        assert!(registry.match_line("build", Some(&editor_user())).is_some());
    }

    #[test]
    fn unauthenticated_sessions_only_reach_login() {
        let registry = VerbRegistry::standard();
        let (name, _) = registry.match_line("anything at all", None).unwrap();
        assert_eq!(name, "login");
        // And authenticated ones never fall into it.
        assert!(registry.match_line("zzz-unmatched", Some(&plain_user())).is_none());
    }

    #[test]
    fn master_only_entries() {
        let registry = VerbRegistry::standard();
        let mut master = plain_user();
        master.master_mode = true;
        assert!(registry.match_line("textworld hi", Some(&plain_user())).is_none());
        assert!(registry.match_line("textworld hi", Some(&master)).is_some());
    }
}
