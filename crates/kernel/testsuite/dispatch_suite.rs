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

//! End-to-end dispatch: whole lines in, narrative events out, across login,
//! built-in verbs, wizards, custom-verb replay, and the failure paths.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::WorldHarness;
use wold_common::model::{
    ConnectionId, ItemLocation, RoomId, VerbScope, WorldState, WorldStateError,
};
use wold_common::tasks::{CommandError, LineDirection, MockSender, MockTranscript};
use wold_db::MemWorldState;
use wold_kernel::config::Config;
use wold_kernel::scheduler::Scheduler;
use wold_kernel::session::{
    APOLOGY, Frame, NOT_UNDERSTOOD, RECURSION_NOTICE, SessionState, USURPED_NOTICE,
};
use wold_kernel::verbs::{PermLevel, Verb, VerbEntry, VerbFlow, VerbRegistry};

fn strings(input: &[&str]) -> Vec<String> {
    input.iter().map(|s| s.to_string()).collect()
}

#[test]
fn login_greets_then_binds_and_shows_the_room() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    assert_eq!(harness.state(ada), SessionState::Idle);
    assert!(harness.saw(ada, "Welcome to wold"));
    assert!(harness.saw(ada, "What is your name?"));
    assert!(harness.saw(ada, "Welcome, ada."));
    assert!(harness.saw(ada, "The Landing"));
}

#[test]
fn first_human_in_becomes_editor() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    assert!(harness.user("ada").editor);
    assert!(!harness.user("bob").editor);
    assert!(harness.saw(ada, "editor rights"));
    assert!(!harness.saw(bob, "editor rights"));
    // The second arrival is announced to the first.
    assert!(harness.saw(ada, "A newcomer called bob appears."));
}

#[test]
fn reserved_name_reprompts_at_login() {
    let mut harness = WorldHarness::new();
    let connection = ConnectionId::new_random();
    let mut session = wold_kernel::session::Session::for_connection(connection);
    let mut ctx = wold_kernel::session::DispatchCtx {
        world: &mut harness.world,
        sender: harness.sender.as_ref(),
        transcript: None,
        registry: &harness.registry,
        config: &harness.config,
    };
    session.begin(&mut ctx);
    session.process_line(&mut ctx, "ghost").unwrap();
    assert_eq!(session.state(), SessionState::Unauthenticated);
    session.process_line(&mut ctx, "ada").unwrap();
    assert_eq!(session.state(), SessionState::Idle);
    let texts = harness.sender.texts_for(connection);
    assert!(texts.iter().any(|t| t.contains("That name is reserved")));
    assert!(texts.iter().any(|t| t.contains("Welcome, ada.")));
}

#[test]
fn unmatched_lines_are_not_understood() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness.line(ada, "frobnicate the widget").unwrap();
    assert!(harness.saw(ada, NOT_UNDERSTOOD));
    assert_eq!(harness.state(ada), SessionState::Idle);
}

#[test]
fn empty_lines_do_nothing_when_idle() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness.clear_output();
    harness.line(ada, "   ").unwrap();
    assert!(harness.texts_for(ada).is_empty());
}

#[test]
fn say_reaches_the_room_in_both_persons() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness.line(ada, "say hello there").unwrap();
    assert!(harness.saw(ada, "You say: \"hello there\""));
    assert!(harness.saw(bob, "ada says: \"hello there\""));
}

#[test]
fn engaged_wizard_owns_every_line_until_cancelled() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness.line(ada, "build").unwrap();
    assert_eq!(harness.state(ada), SessionState::Engaged);
    // "say" here is a room name answer, not the say verb.
    harness.line(ada, "say hello").unwrap();
    assert_eq!(harness.state(ada), SessionState::Engaged);
    harness.line(ada, "/").unwrap();
    assert!(harness.saw(ada, "Construction abandoned."));
    assert_eq!(harness.state(ada), SessionState::Idle);
    harness.line(ada, "say done now").unwrap();
    assert!(harness.saw(ada, "You say: \"done now\""));
}

#[test]
fn build_wizard_makes_a_room_with_a_way_each_direction() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    for line in ["build", "Attic", "Dust and slanted light.", "up", "down"] {
        harness.line(ada, line).unwrap();
    }
    assert!(harness.saw(ada, "Built: Attic"));
    harness.clear_output();
    harness.line(ada, "go up").unwrap();
    assert!(harness.saw(ada, "Attic"));
    assert!(harness.saw(ada, "Dust and slanted light."));
    harness.line(ada, "go down").unwrap();
    assert!(harness.saw(ada, "The Landing"));
}

#[test]
fn locked_ways_block_until_unlocked() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    for line in ["build", "Attic", "Dust.", "up", "down"] {
        harness.line(ada, line).unwrap();
    }
    harness.line(ada, "lock up").unwrap();
    assert!(harness.saw(bob, "You hear a heavy click."));
    harness.line(bob, "go up").unwrap();
    assert!(harness.saw(bob, "The way up is locked."));
    assert_eq!(harness.user("bob").room, RoomId(1));
    harness.line(ada, "unlock up").unwrap();
    harness.line(bob, "go up").unwrap();
    assert_ne!(harness.user("bob").room, RoomId(1));
}

#[test]
fn master_mode_passes_locks_and_hides_from_listings() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    for line in ["build", "Attic", "Dust.", "up", "down"] {
        harness.line(ada, line).unwrap();
    }
    harness.line(ada, "lock up").unwrap();
    harness.line(ada, "mastermode").unwrap();
    harness.line(ada, "go up").unwrap();
    assert_ne!(harness.user("ada").room, RoomId(1));
    harness.line(ada, "go down").unwrap();

    harness.clear_output();
    harness.line(bob, "who").unwrap();
    let who = harness.texts_for(bob).join("\n");
    assert!(!who.contains("ada"));
    harness.line(bob, "look").unwrap();
    assert!(!harness.saw(bob, "Also here: ada"));

    harness.line(ada, "mastermode").unwrap();
    assert!(harness.saw(bob, "ada appears from nowhere."));
}

#[test]
fn take_and_take_from() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness
        .world
        .create_item("rusty lantern", "Dented.", true, ItemLocation::Room(RoomId(1)))
        .unwrap();

    harness.line(bob, "take lantern").unwrap();
    assert!(harness.saw(bob, "You take rusty lantern."));
    assert!(harness.saw(ada, "bob picks up rusty lantern."));
    let bob_id = harness.user("bob").id;
    assert_eq!(
        harness.world.items_at(ItemLocation::User(bob_id)).len(),
        1
    );

    // Repossession is an editor's move and names the holder.
    harness.line(ada, "take lantern from bob").unwrap();
    assert!(harness.saw(ada, "You take rusty lantern from bob."));
    assert!(harness.saw(bob, "ada takes rusty lantern from you."));
    let ada_id = harness.user("ada").id;
    assert_eq!(harness.world.items_at(ItemLocation::User(bob_id)).len(), 0);
    assert_eq!(harness.world.items_at(ItemLocation::User(ada_id)).len(), 1);
}

#[test]
fn plain_users_cannot_reach_gated_verbs() {
    let mut harness = WorldHarness::new();
    let _ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness.line(bob, "build").unwrap();
    // The entry is skipped outright, so the line reads as an unknown verb.
    assert!(harness.saw(bob, NOT_UNDERSTOOD));
    assert_eq!(harness.state(bob), SessionState::Idle);
}

#[test]
fn room_verb_replays_through_the_automation_user() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness
        .world
        .add_custom_verb(
            VerbScope::Room(RoomId(1)),
            strings(&["sing"]),
            strings(&["emote sings a song", "textroom The walls echo."]),
        )
        .unwrap();

    harness.line(ada, "sing").unwrap();
    for connection in [ada, bob] {
        assert!(harness.saw(connection, "ghost sings a song"));
        assert!(harness.saw(connection, "The walls echo."));
    }
    assert_eq!(harness.state(ada), SessionState::Idle);
}

#[test]
fn invoker_token_is_substituted_into_commands() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness
        .world
        .add_custom_verb(
            VerbScope::Room(RoomId(1)),
            strings(&["shimmer"]),
            strings(&["textroom .user is surrounded by sparks."]),
        )
        .unwrap();
    harness.line(ada, "shimmer").unwrap();
    assert!(harness.saw(bob, "ada is surrounded by sparks."));
}

#[test]
fn item_verbs_need_the_item_named_exactly() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let lamp = harness
        .world
        .create_item("lamp", "Brass.", true, ItemLocation::Room(RoomId(1)))
        .unwrap();
    harness
        .world
        .add_custom_verb(
            VerbScope::Item(lamp.id),
            strings(&["rub"]),
            strings(&["textroom The lamp glows."]),
        )
        .unwrap();

    harness.line(ada, "rub lamp").unwrap();
    assert!(harness.saw(ada, "The lamp glows."));

    harness.clear_output();
    harness.line(ada, "rub la").unwrap();
    assert!(harness.saw(ada, NOT_UNDERSTOOD));
    harness.clear_output();
    harness.line(ada, "rub Lamp").unwrap();
    assert!(harness.saw(ada, NOT_UNDERSTOOD));
}

#[test]
fn item_verbs_shadow_room_verbs_of_the_same_shape() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let lamp = harness
        .world
        .create_item("lamp", "Brass.", true, ItemLocation::Room(RoomId(1)))
        .unwrap();
    harness
        .world
        .add_custom_verb(
            VerbScope::Room(RoomId(1)),
            strings(&["rub lamp"]),
            strings(&["textroom From the room."]),
        )
        .unwrap();
    harness
        .world
        .add_custom_verb(
            VerbScope::Item(lamp.id),
            strings(&["rub"]),
            strings(&["textroom From the item."]),
        )
        .unwrap();

    harness.line(ada, "rub lamp").unwrap();
    assert!(harness.saw(ada, "From the item."));
    assert!(!harness.saw(ada, "From the room."));
}

#[test]
fn world_verbs_act_where_the_invoker_stands() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    for line in ["build", "Attic", "Dust.", "up", "down"] {
        harness.line(ada, line).unwrap();
    }
    harness.line(ada, "go up").unwrap();
    harness
        .world
        .add_custom_verb(
            VerbScope::World,
            strings(&["ping"]),
            strings(&["textroom pong"]),
        )
        .unwrap();

    harness.clear_output();
    harness.line(ada, "ping").unwrap();
    assert!(harness.saw(ada, "pong"));
    assert!(!harness.saw(bob, "pong"));
    // The automation user is back home afterwards.
    assert_eq!(harness.user("ghost").room, RoomId(1));
}

#[test]
fn runaway_verb_chains_fizzle_in_character() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness
        .world
        .add_custom_verb(
            VerbScope::Room(RoomId(1)),
            strings(&["loop"]),
            strings(&["textroom tick", "loop"]),
        )
        .unwrap();

    harness.clear_output();
    harness.line(ada, "loop").unwrap();
    let ticks = harness
        .texts_for(ada)
        .iter()
        .filter(|t| t.as_str() == "tick")
        .count();
    assert_eq!(ticks, 10);
    assert!(harness.saw(ada, RECURSION_NOTICE));
    assert_eq!(harness.state(ada), SessionState::Idle);
    harness.line(ada, "say still here").unwrap();
    assert!(harness.saw(ada, "You say: \"still here\""));
}

#[test]
fn chains_of_ten_reach_bottom_and_eleven_do_not() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    for i in 1..=9 {
        harness
            .world
            .add_custom_verb(
                VerbScope::World,
                strings(&[&format!("chain{i}")]),
                strings(&[&format!("chain{}", i + 1)]),
            )
            .unwrap();
    }
    harness
        .world
        .add_custom_verb(
            VerbScope::World,
            strings(&["chain10"]),
            strings(&["textroom bottom"]),
        )
        .unwrap();
    harness.line(ada, "chain1").unwrap();
    assert!(harness.saw(ada, "bottom"));
    assert!(!harness.saw(ada, RECURSION_NOTICE));

    for i in 1..=10 {
        harness
            .world
            .add_custom_verb(
                VerbScope::World,
                strings(&[&format!("deep{i}")]),
                strings(&[&format!("deep{}", i + 1)]),
            )
            .unwrap();
    }
    harness
        .world
        .add_custom_verb(
            VerbScope::World,
            strings(&["deep11"]),
            strings(&["textroom too deep"]),
        )
        .unwrap();
    harness.clear_output();
    harness.line(ada, "deep1").unwrap();
    assert!(!harness.saw(ada, "too deep"));
    assert!(harness.saw(ada, RECURSION_NOTICE));
}

#[test]
fn stale_sessions_learn_of_usurpation_on_their_next_line() {
    let mut harness = WorldHarness::new();
    let first = harness.connect("ada");
    let second = harness.connect("ada");
    assert!(harness.saw(second, "Welcome back, ada."));

    harness.line(first, "look").unwrap();
    assert!(harness.saw(first, USURPED_NOTICE));
    assert!(harness.sender.disconnected().contains(&first));
    assert!(!harness.sessions[&first].is_live());

    // A dead session swallows further lines without effect.
    let before = harness.texts_for(first).len();
    harness.line(first, "look").unwrap();
    assert_eq!(harness.texts_for(first).len(), before);

    // The new session holds the identity.
    harness.line(second, "look").unwrap();
    assert!(harness.saw(second, "The Landing"));
}

struct Exploding {}

impl Verb for Exploding {
    fn process(
        &mut self,
        _frame: &mut Frame<'_, '_>,
        _line: &str,
    ) -> Result<VerbFlow, CommandError> {
        Err(CommandError::WorldState(WorldStateError::RoomNotFound(
            RoomId(404),
        )))
    }
}

fn explodes(line: &str) -> bool {
    line.trim() == "explode"
}

#[test]
fn unexpected_faults_apologize_reset_and_propagate() {
    let mut harness = WorldHarness::new();
    harness.registry.register(VerbEntry::new(
        "explode",
        PermLevel::Open,
        explodes,
        || Box::new(Exploding {}),
    ));
    let ada = harness.connect("ada");

    let result = harness.line(ada, "explode");
    assert!(matches!(result, Err(CommandError::WorldState(_))));
    assert!(harness.saw(ada, APOLOGY));
    assert_eq!(harness.state(ada), SessionState::Idle);

    harness.line(ada, "say unharmed").unwrap();
    assert!(harness.saw(ada, "You say: \"unharmed\""));
}

#[test]
fn quit_releases_the_connection_binding() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness.line(ada, "quit").unwrap();
    assert!(harness.saw(ada, "Farewell, ada."));
    assert!(harness.saw(bob, "ada fades away."));
    assert!(harness.sender.disconnected().contains(&ada));
    assert!(!harness.sessions[&ada].is_live());
    assert!(harness.user("ada").connection.is_none());
}

#[test]
fn detach_announces_and_unbinds() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    harness.detach(ada);
    assert!(harness.saw(bob, "ada fades away."));
    assert!(harness.user("ada").connection.is_none());
}

#[test]
fn verb_authoring_round_trip() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    for line in [
        "addverb",
        "dance",
        "boogie",
        "OK",
        "emote dances wildly",
        "textroom The floor shakes.",
        "OK",
    ] {
        harness.line(ada, line).unwrap();
    }
    assert!(harness.saw(ada, "Your verb is ready. Try it: dance."));

    harness.clear_output();
    harness.line(ada, "verbs").unwrap();
    assert!(harness.saw(ada, "1. dance, boogie (on this room)"));

    harness.line(ada, "verbs 1").unwrap();
    let texts = harness.texts_for(ada).join("\n");
    assert!(texts.contains("Answers to: dance, boogie"));
    let first = texts.find("1. emote dances wildly").unwrap();
    let second = texts.find("2. textroom The floor shakes.").unwrap();
    assert!(first < second);

    // Both names fire the same commands.
    harness.clear_output();
    harness.line(ada, "boogie").unwrap();
    assert!(harness.saw(bob, "ghost dances wildly"));
    assert!(harness.saw(bob, "The floor shakes."));
}

#[test]
fn verbs_are_unlearned_by_number() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness
        .world
        .add_custom_verb(
            VerbScope::Room(RoomId(1)),
            strings(&["hum"]),
            strings(&["textroom A low hum."]),
        )
        .unwrap();
    harness.line(ada, "deleteverb 1").unwrap();
    assert!(harness.saw(ada, "The verb hum is unlearned."));
    harness.clear_output();
    harness.line(ada, "hum").unwrap();
    assert!(harness.saw(ada, NOT_UNDERSTOOD));
}

#[test]
fn deleteroom_sends_everyone_back_to_the_entry() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    let bob = harness.connect("bob");
    for line in ["build", "Attic", "Dust.", "up", "down"] {
        harness.line(ada, line).unwrap();
    }
    harness.line(ada, "go up").unwrap();
    harness.line(bob, "go up").unwrap();
    harness.clear_output();

    harness.line(ada, "deleteroom").unwrap();
    assert!(harness.saw(ada, "You are about to delete Attic"));
    harness.line(ada, "yes").unwrap();

    assert!(harness.saw(ada, "Attic collapses into nothing."));
    assert!(harness.saw(bob, "The room dissolves around you."));
    assert!(harness.saw(bob, "The Landing"));
    assert_eq!(harness.user("ada").room, RoomId(1));
    assert_eq!(harness.user("bob").room, RoomId(1));
    // The way up is gone with the room.
    assert!(harness.world.room(RoomId(1)).unwrap().exits.is_empty());
}

#[test]
fn entry_room_refuses_demolition() {
    let mut harness = WorldHarness::new();
    let ada = harness.connect("ada");
    harness.line(ada, "deleteroom").unwrap();
    assert!(harness.saw(ada, "The entry room holds the world together."));
    assert_eq!(harness.state(ada), SessionState::Idle);
}

#[test]
fn transcripts_record_both_directions() {
    let mut harness = WorldHarness::new();
    let transcript = MockTranscript::new();
    let connection = ConnectionId::new_random();
    let mut session = wold_kernel::session::Session::for_connection(connection);
    let mut ctx = wold_kernel::session::DispatchCtx {
        world: &mut harness.world,
        sender: harness.sender.as_ref(),
        transcript: Some(&transcript),
        registry: &harness.registry,
        config: &harness.config,
    };
    session.begin(&mut ctx);
    session.process_line(&mut ctx, "ada").unwrap();

    let records = transcript.records();
    assert!(records.iter().any(|(c, d, t)| {
        *c == connection && *d == LineDirection::Inbound && t == "ada"
    }));
    assert!(records.iter().any(|(c, d, t)| {
        *c == connection && *d == LineDirection::Outbound && t.contains("Welcome, ada.")
    }));
}

#[test]
fn scheduler_thread_round_trip() {
    let config = Config::default();
    let world = MemWorldState::bootstrap(
        &config.world_name,
        &config.entry_room_name,
        &config.entry_room_description,
        &config.automation_user_name,
    );
    let sender = Arc::new(MockSender::new());
    let scheduler = Scheduler::new(
        Box::new(world),
        VerbRegistry::standard(),
        sender.clone(),
        None,
        config,
    );
    let client = scheduler.client();
    let handle = std::thread::spawn(move || scheduler.run());

    let connection = ConnectionId::new_random();
    client.new_connection(connection).unwrap();
    client.submit_line(connection, "ada").unwrap();
    client.submit_line(connection, "say hello out there").unwrap();

    let texts = sender.texts_for(connection);
    assert!(texts.iter().any(|t| t.contains("Welcome, ada.")));
    assert!(texts.iter().any(|t| t.contains("You say: \"hello out there\"")));

    let unknown = ConnectionId::new_random();
    assert!(client.submit_line(unknown, "look").is_err());

    client.shutdown().unwrap();
    handle.join().unwrap();
}
