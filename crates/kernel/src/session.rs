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

//! One session per live connection (plus headless ones for automation), each
//! a small state machine over the lines that connection types.

use tracing::{debug, error, warn};

use wold_common::model::{ConnectionId, Room, RoomId, User, UserId, WorldState};
use wold_common::tasks::{
    CommandError, LineDirection, Message, NarrativeEvent, Sender, Transcript,
};

use crate::config::Config;
use crate::verbs::login::Login;
use crate::verbs::{Verb, VerbFlow, VerbRegistry};
use crate::{custom_verbs, ghost};

/// Sent to a user whose line matched nothing at all.
pub const NOT_UNDERSTOOD: &str = "I don't understand that.";
/// Sent when a verb faulted unexpectedly mid-dispatch.
pub const APOLOGY: &str =
    "Something went wrong in the machinery. It has been noted; you can keep playing.";
/// Sent when an automation chain hit the recursion bound.
pub const RECURSION_NOTICE: &str = "The magic tangles up in itself and fizzles out.";
/// Sent to a stale session whose user has logged in from elsewhere.
pub const USURPED_NOTICE: &str =
    "Your name has connected from somewhere else, so this session is closing.";

/// Everything a line's dispatch may touch, borrowed for exactly one line.
/// The scheduler owns all of it and lends it out; nested automation replay
/// reborrows the same context, which is what makes writes from a ghost's
/// commands visible to the rest of the chain.
pub struct DispatchCtx<'a> {
    pub world: &'a mut dyn WorldState,
    pub sender: &'a dyn Sender,
    pub transcript: Option<&'a dyn Transcript>,
    pub registry: &'a VerbRegistry,
    pub config: &'a Config,
}

/// What a verb gets to work with: its session and the dispatch context.
pub struct Frame<'a, 'c> {
    pub(crate) session: &'a mut Session,
    pub(crate) ctx: &'a mut DispatchCtx<'c>,
}

impl Frame<'_, '_> {
    pub(crate) fn world(&mut self) -> &mut dyn WorldState {
        &mut *self.ctx.world
    }

    pub(crate) fn config(&self) -> &Config {
        self.ctx.config
    }

    /// Fresh read of the acting user's record.
    pub(crate) fn user(&self) -> Result<User, CommandError> {
        let id = self.session.user.ok_or(CommandError::NoUserBound)?;
        Ok(self.ctx.world.user(id)?)
    }

    /// Fresh read of the room the acting user stands in.
    pub(crate) fn room(&self) -> Result<Room, CommandError> {
        let user = self.user()?;
        Ok(self.ctx.world.room(user.room)?)
    }

    pub(crate) fn send_to_self(&self, message: Message) {
        self.session.send_to_self(self.ctx, message);
    }

    pub(crate) fn send_to_room(&self, message: Message) {
        self.session.send_to_room(self.ctx, message);
    }

    pub(crate) fn send_to_others(&self, message: Message) {
        self.session.send_to_others(self.ctx, message);
    }

    pub(crate) fn send_to_world(&self, message: Message) {
        self.session.send_to_world(self.ctx, message);
    }

    pub(crate) fn send_to_user(&self, target: &User, message: Message) {
        self.session.send_to_user(self.ctx, target, message);
    }
}

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No user bound yet; only the login flow is reachable.
    Unauthenticated,
    /// Ready to match a fresh command.
    Idle,
    /// An active verb is consuming every line.
    Engaged,
}

struct ActiveVerb {
    name: &'static str,
    verb: Box<dyn Verb>,
}

pub struct Session {
    /// The transport connection, or `None` for automation sessions.
    connection: Option<ConnectionId>,
    user: Option<UserId>,
    /// At most one active verb at any time; `None` means idle.
    active: Option<ActiveVerb>,
    /// Automation nesting depth. Real sessions sit at zero.
    depth: usize,
    /// For automation sessions, the user whose command started the chain.
    invoked_by: Option<UserId>,
    live: bool,
}

impl Session {
    /// A session for a freshly accepted connection. Starts engaged with the
    /// login flow; `begin` sends the greeting.
    pub fn for_connection(connection: ConnectionId) -> Self {
        Self {
            connection: Some(connection),
            user: None,
            active: None,
            depth: 0,
            invoked_by: None,
            live: true,
        }
    }

    /// A headless session for automation replay. Already authenticated as
    /// the automation user, never connected, never greeted.
    pub(crate) fn automation(user: UserId, invoked_by: UserId, depth: usize) -> Self {
        Self {
            connection: None,
            user: Some(user),
            active: None,
            depth,
            invoked_by: Some(invoked_by),
            live: true,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.user.is_none() {
            SessionState::Unauthenticated
        } else if self.active.is_some() {
            SessionState::Engaged
        } else {
            SessionState::Idle
        }
    }

    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub(crate) fn is_automation(&self) -> bool {
        self.connection.is_none()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn bind_user(&mut self, user: UserId) {
        self.user = Some(user);
    }

    pub(crate) fn terminate(&mut self) {
        self.live = false;
    }

    /// Greet a fresh connection and engage the login flow.
    pub fn begin(&mut self, ctx: &mut DispatchCtx<'_>) {
        let world = ctx.world.world();
        self.send_to_self(ctx, Message::boxed(format!("Welcome to {}", world.name)));
        self.send_to_self(ctx, Message::section("What is your name?"));
        self.active = Some(ActiveVerb {
            name: "login",
            verb: Box::new(Login::new()),
        });
    }

    /// Dispatch one inbound line.
    ///
    /// Validation problems never reach the caller; verbs re-prompt for those.
    /// A `RecursionTooDeep` fault from an automation chain is surfaced to the
    /// user in-character and swallowed. Anything else that escapes a verb is
    /// apologized for, logged, clears the session back to idle, and is then
    /// handed to the caller so the host can decide what to do with the
    /// connection. Automation sessions skip the niceties and just propagate,
    /// which is how a fault aborts the whole replay chain.
    pub fn process_line(
        &mut self,
        ctx: &mut DispatchCtx<'_>,
        line: &str,
    ) -> Result<(), CommandError> {
        if !self.live {
            return Ok(());
        }
        if let (Some(connection), Some(transcript)) = (self.connection, ctx.transcript) {
            transcript.record(connection, LineDirection::Inbound, line);
        }
        match self.run_line(ctx, line) {
            Ok(()) => Ok(()),
            Err(CommandError::NoCommandMatch) => {
                self.send_to_self(ctx, Message::section(NOT_UNDERSTOOD));
                Ok(())
            }
            Err(fault) => self.handle_fault(ctx, fault),
        }
    }

    fn run_line(&mut self, ctx: &mut DispatchCtx<'_>, line: &str) -> Result<(), CommandError> {
        // A user identity belongs to one live session at a time. If someone
        // logged in as us from elsewhere, this session finds out here.
        if let (Some(connection), Some(user_id)) = (self.connection, self.user) {
            let user = ctx.world.user(user_id)?;
            if user.connection != Some(connection) {
                debug!(%connection, user = %user.name, "stale session usurped, closing");
                self.deliver(ctx, connection, Message::section(USURPED_NOTICE));
                if let Err(e) = ctx.sender.disconnect(connection) {
                    warn!(%connection, "could not disconnect stale session: {e}");
                }
                self.terminate();
                return Ok(());
            }
        }

        // Engaged: the active verb owns every line until it is finished.
        if let Some(mut active) = self.active.take() {
            let flow = {
                let mut frame = Frame { session: self, ctx };
                active.verb.process(&mut frame, line)?
            };
            if matches!(flow, VerbFlow::Continue) {
                self.active = Some(active);
            }
            return Ok(());
        }

        if line.trim().is_empty() {
            return Ok(());
        }

        // Idle: first registry match wins, in registration order.
        let user = match self.user {
            Some(id) => Some(ctx.world.user(id)?),
            None => None,
        };
        if let Some((name, mut verb)) = ctx.registry.match_line(line, user.as_ref()) {
            debug!(verb = name, "dispatching");
            let flow = {
                let mut frame = Frame { session: self, ctx };
                verb.process(&mut frame, line)?
            };
            if matches!(flow, VerbFlow::Continue) {
                self.active = Some(ActiveVerb { name, verb });
            }
            return Ok(());
        }

        // No built-in claimed it; try the world's own verbs.
        let Some(user) = user else {
            return Err(CommandError::NoCommandMatch);
        };
        if let Some(custom) = custom_verbs::resolve(&*ctx.world, &user, line) {
            debug!(names = ?custom.names, invoker = %user.name, "running custom verb");
            return ghost::run_custom_verb(ctx, &custom, &user, self.depth + 1);
        }

        Err(CommandError::NoCommandMatch)
    }

    /// Every fault leaves the session idle again; what else happens depends
    /// on who we are and what broke.
    fn handle_fault(
        &mut self,
        ctx: &mut DispatchCtx<'_>,
        fault: CommandError,
    ) -> Result<(), CommandError> {
        self.active = None;
        if self.is_automation() {
            // Abort the chain; the originating real session deals with it.
            debug!(
                depth = self.depth,
                invoked_by = ?self.invoked_by,
                "automation fault, aborting chain: {fault}"
            );
            return Err(fault);
        }
        match fault {
            CommandError::RecursionTooDeep(depth) => {
                warn!(depth, "automation chain exceeded recursion bound");
                self.send_to_self(ctx, Message::section(RECURSION_NOTICE));
                Ok(())
            }
            fault => {
                error!(user = ?self.user, "verb fault during dispatch: {fault}");
                self.send_to_self(ctx, Message::section(APOLOGY));
                Err(fault)
            }
        }
    }

    /// Called when the transport goes away. Announces the departure and
    /// releases the user's connection binding, unless a newer session
    /// already took the identity over.
    pub fn end(&mut self, ctx: &mut DispatchCtx<'_>) {
        self.live = false;
        let (Some(connection), Some(user_id)) = (self.connection, self.user) else {
            return;
        };
        let Ok(user) = ctx.world.user(user_id) else {
            return;
        };
        if user.connection != Some(connection) {
            return;
        }
        if user.visible() {
            self.send_to_others(ctx, Message::section(format!("{} fades away.", user.name)));
        }
        if let Err(e) = ctx.world.disconnect_user(user_id) {
            warn!(user = %user.name, "could not release connection binding: {e}");
        }
    }

    /// To the session's own connection. Silently dropped for automation
    /// sessions, which have none.
    pub(crate) fn send_to_self(&self, ctx: &DispatchCtx<'_>, message: Message) {
        if let Some(connection) = self.connection {
            self.deliver(ctx, connection, message);
        }
    }

    /// To every connected user in the acting user's room, the actor
    /// included.
    pub(crate) fn send_to_room(&self, ctx: &DispatchCtx<'_>, message: Message) {
        let Some(room) = self.current_room(ctx) else {
            return;
        };
        for occupant in ctx.world.users_in_room(room) {
            if let Some(connection) = occupant.connection {
                self.deliver(ctx, connection, message.clone());
            }
        }
    }

    /// To every connected user in the acting user's room except the actor.
    pub(crate) fn send_to_others(&self, ctx: &DispatchCtx<'_>, message: Message) {
        let Some(room) = self.current_room(ctx) else {
            return;
        };
        for occupant in ctx.world.users_in_room(room) {
            if Some(occupant.id) == self.user {
                continue;
            }
            if let Some(connection) = occupant.connection {
                self.deliver(ctx, connection, message.clone());
            }
        }
    }

    /// To every connected user anywhere.
    pub(crate) fn send_to_world(&self, ctx: &DispatchCtx<'_>, message: Message) {
        for user in ctx.world.users() {
            if let Some(connection) = user.connection {
                self.deliver(ctx, connection, message.clone());
            }
        }
    }

    /// To one named user. A no-op when they have no live connection.
    pub(crate) fn send_to_user(&self, ctx: &DispatchCtx<'_>, target: &User, message: Message) {
        if let Some(connection) = target.connection {
            self.deliver(ctx, connection, message);
        }
    }

    fn current_room(&self, ctx: &DispatchCtx<'_>) -> Option<RoomId> {
        let user_id = self.user?;
        ctx.world.user(user_id).ok().map(|u| u.room)
    }

    fn deliver(&self, ctx: &DispatchCtx<'_>, connection: ConnectionId, message: Message) {
        if let Some(transcript) = ctx.transcript {
            transcript.record(connection, LineDirection::Outbound, &message.text);
        }
        let event = NarrativeEvent::notify(self.user, message);
        if let Err(e) = ctx.sender.send_event(connection, event) {
            warn!(%connection, "dropped outbound event: {e}");
        }
    }
}
