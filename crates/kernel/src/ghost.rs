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

//! Custom verbs execute by replay: a headless session bound to the world's
//! reserved automation user walks into the room and types the verb's stored
//! commands, one by one, through ordinary dispatch. Those commands can hit
//! further custom verbs, so replay nests; the depth bound is what keeps a
//! verb that invokes itself from recursing forever.

use tracing::warn;

use wold_common::model::{CustomVerb, RoomId, User, UserId};
use wold_common::tasks::CommandError;

use crate::session::{DispatchCtx, Session};

/// Scripts use this token to mean "the user whose command started the
/// chain". Substituted textually before each replayed line is dispatched.
pub const INVOKER_TOKEN: &str = ".user";

struct GhostSession {
    session: Session,
    automation_user: UserId,
    /// Where the automation user stood before we borrowed it, so nested
    /// replays don't leave the outer one acting in the wrong room.
    prior_room: RoomId,
}

impl GhostSession {
    /// Walk the automation user into the room and wrap a session around it.
    /// Fails, and thereby aborts the whole chain, when `depth` exceeds the
    /// configured bound.
    fn materialize(
        ctx: &mut DispatchCtx<'_>,
        room: RoomId,
        invoker: UserId,
        depth: usize,
    ) -> Result<Self, CommandError> {
        if depth > ctx.config.max_automation_depth {
            return Err(CommandError::RecursionTooDeep(depth));
        }
        let automation_user = ctx.world.world().automation_user;
        let prior_room = ctx.world.user(automation_user)?.room;
        ctx.world.move_user(automation_user, room)?;
        Ok(Self {
            session: Session::automation(automation_user, invoker, depth),
            automation_user,
            prior_room,
        })
    }

    /// Feed the verb's commands through dispatch as if typed. The first
    /// fault aborts the rest of the sequence.
    fn replay(
        &mut self,
        ctx: &mut DispatchCtx<'_>,
        verb: &CustomVerb,
        invoker_name: &str,
    ) -> Result<(), CommandError> {
        for command in &verb.commands {
            let line = command.replace(INVOKER_TOKEN, invoker_name);
            self.session.process_line(ctx, &line)?;
        }
        Ok(())
    }

    /// Step the automation user back out. The shared identity survives for
    /// the next invocation.
    fn dismiss(self, ctx: &mut DispatchCtx<'_>) {
        if let Err(e) = ctx.world.move_user(self.automation_user, self.prior_room) {
            warn!("could not step automation user back: {e}");
        }
    }
}

/// Run one resolved custom verb on behalf of `invoker`, at the given
/// nesting depth. The ghost acts in the invoker's current room. Dismissal
/// happens whether or not the replay finished.
pub(crate) fn run_custom_verb(
    ctx: &mut DispatchCtx<'_>,
    verb: &CustomVerb,
    invoker: &User,
    depth: usize,
) -> Result<(), CommandError> {
    let mut ghost = GhostSession::materialize(ctx, invoker.room, invoker.id, depth)?;
    let result = ghost.replay(ctx, verb, &invoker.name);
    ghost.dismiss(ctx);
    result
}
