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

//! Resolution of world-authored verbs, consulted only after every built-in
//! verb has declined a line.

use wold_common::model::{CustomVerb, ItemLocation, User, VerbScope, WorldState};
use wold_common::util::split_first_word;

/// Find the custom verb a line triggers, if any. Narrower scope shadows
/// broader: an item's verb beats a room's verb beats a world verb of the
/// same name, and within one scope the oldest verb wins.
///
/// All matching here is exact and case-sensitive, unlike the forgiving
/// matching built-ins use for their arguments:
/// - `"<word> <rest>"` fires an item verb when `<rest>` exactly names an
///   item in the user's room and that item has a verb named `<word>`.
/// - The whole line, as typed, can name a verb on the user's room.
/// - Failing that, the whole line can name a verb on the world.
pub(crate) fn resolve(world: &dyn WorldState, user: &User, line: &str) -> Option<CustomVerb> {
    let line = line.trim();
    let (word, rest) = split_first_word(line);
    if !rest.is_empty() {
        for item in world.items_at(ItemLocation::Room(user.room)) {
            if item.name != rest {
                continue;
            }
            for verb in world.custom_verbs(VerbScope::Item(item.id)) {
                if verb.answers_to(word) {
                    return Some(verb);
                }
            }
        }
    }
    for verb in world.custom_verbs(VerbScope::Room(user.room)) {
        if verb.answers_to(line) {
            return Some(verb);
        }
    }
    for verb in world.custom_verbs(VerbScope::World) {
        if verb.answers_to(line) {
            return Some(verb);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wold_db::MemWorldState;
    use wold_common::model::{ItemLocation, VerbScope, WorldState};

    use super::resolve;

    fn world_with_user() -> (MemWorldState, wold_common::model::User) {
        let mut state =
            MemWorldState::bootstrap("test", "The Landing", "Begin here.", "ghost");
        let entry = state.world().entry_room;
        let user = state.create_user("ada", entry).unwrap();
        (state, user)
    }

    #[test]
    fn item_scope_shadows_room_scope() {
        let (mut state, user) = world_with_user();
        let chest = state
            .create_item("chest", "Oak.", true, ItemLocation::Room(user.room))
            .unwrap();
        let room_verb = state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["open chest".into()],
                vec!["say the room one".into()],
            )
            .unwrap();
        let item_verb = state
            .add_custom_verb(
                VerbScope::Item(chest.id),
                vec!["open".into()],
                vec!["say the item one".into()],
            )
            .unwrap();

        let hit = resolve(&state, &user, "open chest").unwrap();
        assert_eq!(hit.id, item_verb.id);
        // Without the item form, the room verb is reachable by full line.
        let _ = room_verb;
    }

    #[test]
    fn room_scope_shadows_world_scope() {
        let (mut state, user) = world_with_user();
        state
            .add_custom_verb(
                VerbScope::World,
                vec!["dance".into()],
                vec!["emote dances the world dance".into()],
            )
            .unwrap();
        let room_verb = state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["dance".into()],
                vec!["emote dances the room dance".into()],
            )
            .unwrap();

        let hit = resolve(&state, &user, "dance").unwrap();
        assert_eq!(hit.id, room_verb.id);
    }

    #[test]
    fn world_scope_reached_last() {
        let (mut state, user) = world_with_user();
        let world_verb = state
            .add_custom_verb(
                VerbScope::World,
                vec!["ponder".into()],
                vec!["emote ponders".into()],
            )
            .unwrap();
        let hit = resolve(&state, &user, "ponder").unwrap();
        assert_eq!(hit.id, world_verb.id);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let (mut state, user) = world_with_user();
        state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["dance".into()],
                vec!["emote dances".into()],
            )
            .unwrap();
        assert_eq!(resolve(&state, &user, "Dance"), None);
        assert_eq!(resolve(&state, &user, "dance wildly"), None);
    }

    #[test]
    fn item_verbs_need_the_exact_item_name() {
        let (mut state, user) = world_with_user();
        let chest = state
            .create_item("oak chest", "Oak.", true, ItemLocation::Room(user.room))
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Item(chest.id),
                vec!["open".into()],
                vec!["say creak".into()],
            )
            .unwrap();
        assert!(resolve(&state, &user, "open oak chest").is_some());
        assert_eq!(resolve(&state, &user, "open chest"), None);
        assert_eq!(resolve(&state, &user, "open Oak Chest"), None);
    }

    #[test]
    fn aliases_all_answer() {
        let (mut state, user) = world_with_user();
        state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["bow".into(), "curtsy".into()],
                vec!["emote bows deeply".into()],
            )
            .unwrap();
        assert!(resolve(&state, &user, "bow").is_some());
        assert!(resolve(&state, &user, "curtsy").is_some());
    }

    #[test]
    fn oldest_verb_wins_within_a_scope() {
        let (mut state, user) = world_with_user();
        let first = state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["hum".into()],
                vec!["say hmm".into()],
            )
            .unwrap();
        state
            .add_custom_verb(
                VerbScope::Room(user.room),
                vec!["hum".into()],
                vec!["say hmmmm".into()],
            )
            .unwrap();
        assert_eq!(resolve(&state, &user, "hum").unwrap().id, first.id);
    }
}
