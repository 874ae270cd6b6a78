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

//! Shared harness: a bootstrapped in-memory world, a mock sender, and as
//! many fake connections as a test cares to open. Lines are dispatched the
//! same way the scheduler does it, minus the thread.

use std::collections::HashMap;
use std::sync::Arc;

use wold_common::model::{ConnectionId, User, WorldState};
use wold_common::tasks::{CommandError, MockSender};
use wold_db::MemWorldState;
use wold_kernel::config::Config;
use wold_kernel::session::{DispatchCtx, Session, SessionState};
use wold_kernel::verbs::VerbRegistry;

pub struct WorldHarness {
    pub world: MemWorldState,
    pub registry: VerbRegistry,
    pub sender: Arc<MockSender>,
    pub config: Config,
    pub sessions: HashMap<ConnectionId, Session>,
}

impl WorldHarness {
    pub fn new() -> Self {
        let config = Config::default();
        let world = MemWorldState::bootstrap(
            &config.world_name,
            &config.entry_room_name,
            &config.entry_room_description,
            &config.automation_user_name,
        );
        Self {
            world,
            registry: VerbRegistry::standard(),
            sender: Arc::new(MockSender::new()),
            config,
            sessions: HashMap::new(),
        }
    }

    /// Open a fresh connection and log it in under `name`.
    pub fn connect(&mut self, name: &str) -> ConnectionId {
        let connection = ConnectionId::new_random();
        let mut session = Session::for_connection(connection);
        let mut ctx = DispatchCtx {
            world: &mut self.world,
            sender: self.sender.as_ref(),
            transcript: None,
            registry: &self.registry,
            config: &self.config,
        };
        session.begin(&mut ctx);
        session
            .process_line(&mut ctx, name)
            .expect("login line faulted");
        self.sessions.insert(connection, session);
        connection
    }

    /// Dispatch one line on an existing connection.
    pub fn line(&mut self, connection: ConnectionId, text: &str) -> Result<(), CommandError> {
        let session = self
            .sessions
            .get_mut(&connection)
            .expect("unknown connection");
        let mut ctx = DispatchCtx {
            world: &mut self.world,
            sender: self.sender.as_ref(),
            transcript: None,
            registry: &self.registry,
            config: &self.config,
        };
        session.process_line(&mut ctx, text)
    }

    /// Wind a session down the way the scheduler does when the transport
    /// goes away.
    #[allow(dead_code)]
    pub fn detach(&mut self, connection: ConnectionId) {
        let Some(mut session) = self.sessions.remove(&connection) else {
            return;
        };
        let mut ctx = DispatchCtx {
            world: &mut self.world,
            sender: self.sender.as_ref(),
            transcript: None,
            registry: &self.registry,
            config: &self.config,
        };
        session.end(&mut ctx);
    }

    pub fn state(&self, connection: ConnectionId) -> SessionState {
        self.sessions[&connection].state()
    }

    pub fn texts_for(&self, connection: ConnectionId) -> Vec<String> {
        self.sender.texts_for(connection)
    }

    /// Whether any event delivered to `connection` contains `needle`.
    pub fn saw(&self, connection: ConnectionId, needle: &str) -> bool {
        self.texts_for(connection).iter().any(|t| t.contains(needle))
    }

    /// Forget all output collected so far.
    pub fn clear_output(&self) {
        self.sender.clear();
    }

    pub fn user(&self, name: &str) -> User {
        self.world.user_named(name).expect("no such user")
    }
}
