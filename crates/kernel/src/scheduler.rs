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

//! The single dispatch loop. All lines from all connections funnel through
//! one thread running `Scheduler::run`, which is what makes one line's
//! effects fully settled before the next line (from anyone) starts.

use std::collections::HashMap;
use std::sync::Arc;

use flume::{Receiver, Sender};
use tracing::{debug, info, warn};

use wold_common::model::{ConnectionId, WorldState};
use wold_common::tasks::{Message, NarrativeEvent, SchedulerError, Sender as EventSender, Transcript};

use crate::config::Config;
use crate::scheduler_client::{SchedulerClient, SchedulerClientMsg};
use crate::session::{DispatchCtx, Session};
use crate::verbs::VerbRegistry;

const CLOSING_NOTICE: &str = "The world is closing down. Goodbye.";

pub struct Scheduler {
    world: Box<dyn WorldState>,
    registry: VerbRegistry,
    sender: Arc<dyn EventSender>,
    transcript: Option<Arc<dyn Transcript>>,
    config: Config,
    sessions: HashMap<ConnectionId, Session>,
    client_sender: Sender<SchedulerClientMsg>,
    client_receiver: Receiver<SchedulerClientMsg>,
}

impl Scheduler {
    pub fn new(
        world: Box<dyn WorldState>,
        registry: VerbRegistry,
        sender: Arc<dyn EventSender>,
        transcript: Option<Arc<dyn Transcript>>,
        config: Config,
    ) -> Self {
        let (client_sender, client_receiver) = flume::unbounded();
        Self {
            world,
            registry,
            sender,
            transcript,
            config,
            sessions: HashMap::new(),
            client_sender,
            client_receiver,
        }
    }

    /// A handle for feeding this scheduler. Take as many as you like before
    /// calling `run`.
    pub fn client(&self) -> SchedulerClient {
        SchedulerClient::new(self.client_sender.clone())
    }

    /// Run until told to shut down, or until every client handle is gone.
    /// Takes the thread it is called on.
    pub fn run(mut self) {
        info!(world = %self.world.world().name, "scheduler started");
        loop {
            let msg = match self.client_receiver.recv() {
                Ok(msg) => msg,
                Err(_) => {
                    debug!("all scheduler clients dropped, stopping");
                    break;
                }
            };
            match msg {
                SchedulerClientMsg::NewConnection { connection, reply } => {
                    let result = self.attach(connection);
                    if reply.send(result).is_err() {
                        warn!(%connection, "new-connection reply dropped");
                    }
                }
                SchedulerClientMsg::SubmitLine {
                    connection,
                    line,
                    reply,
                } => {
                    let result = self.dispatch(connection, &line);
                    if reply.send(result).is_err() {
                        warn!(%connection, "submit-line reply dropped");
                    }
                }
                SchedulerClientMsg::DetachConnection { connection } => {
                    self.detach(connection);
                }
                SchedulerClientMsg::Shutdown { reply } => {
                    self.announce_closing();
                    let _ = reply.send(());
                    break;
                }
            }
        }
        info!("scheduler stopped");
    }

    fn attach(&mut self, connection: ConnectionId) -> Result<(), SchedulerError> {
        debug!(%connection, "new connection");
        let mut session = Session::for_connection(connection);
        let mut ctx = DispatchCtx {
            world: self.world.as_mut(),
            sender: self.sender.as_ref(),
            transcript: self.transcript.as_deref(),
            registry: &self.registry,
            config: &self.config,
        };
        session.begin(&mut ctx);
        self.sessions.insert(connection, session);
        Ok(())
    }

    fn dispatch(&mut self, connection: ConnectionId, line: &str) -> Result<(), SchedulerError> {
        let Some(session) = self.sessions.get_mut(&connection) else {
            return Err(SchedulerError::UnknownConnection(connection));
        };
        let mut ctx = DispatchCtx {
            world: self.world.as_mut(),
            sender: self.sender.as_ref(),
            transcript: self.transcript.as_deref(),
            registry: &self.registry,
            config: &self.config,
        };
        let result = session.process_line(&mut ctx, line);
        let still_live = session.is_live();
        if !still_live {
            self.sessions.remove(&connection);
        }
        result.map_err(SchedulerError::CommandExecutionError)
    }

    fn detach(&mut self, connection: ConnectionId) {
        let Some(mut session) = self.sessions.remove(&connection) else {
            return;
        };
        debug!(%connection, "connection detached");
        let mut ctx = DispatchCtx {
            world: self.world.as_mut(),
            sender: self.sender.as_ref(),
            transcript: self.transcript.as_deref(),
            registry: &self.registry,
            config: &self.config,
        };
        session.end(&mut ctx);
    }

    fn announce_closing(&mut self) {
        for session in self.sessions.values() {
            let Some(connection) = session.connection() else {
                continue;
            };
            let event = NarrativeEvent::notify(None, Message::section(CLOSING_NOTICE));
            if let Err(e) = self.sender.send_event(connection, event) {
                warn!(%connection, "could not deliver closing notice: {e}");
            }
            let _ = self.sender.disconnect(connection);
        }
        self.sessions.clear();
    }
}
