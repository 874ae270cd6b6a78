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

use thiserror::Error;

use crate::model::{ConnectionId, WorldStateError};

/// Faults that can escape a line's dispatch. Validation problems inside a
/// multi-step verb never surface here; verbs re-prompt for those locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No built-in verb claimed the line and no custom verb resolved.
    #[error("Could not find a verb match for the command")]
    NoCommandMatch,
    /// A verb that requires an authenticated user ran without one. Points at
    /// a dispatcher bug, so it surfaces as an unexpected fault.
    #[error("No user bound to the session")]
    NoUserBound,
    /// Automation replay tried to nest deeper than the configured bound.
    /// Aborts the whole automation chain, and nothing else.
    #[error("Automation recursion too deep (depth {0})")]
    RecursionTooDeep(usize),
    #[error("World state fault during command execution")]
    WorldState(
        #[from]
        #[source]
        WorldStateError,
    ),
}

/// Errors the scheduler reports back to hosts through its client handle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler is not responding")]
    SchedulerNotResponding,
    #[error("Unknown connection: {0}")]
    UnknownConnection(ConnectionId),
    #[error("Command execution fault")]
    CommandExecutionError(#[source] CommandError),
}

/// Errors from the outbound delivery seam.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No live connection: {0}")]
    NoConnection(ConnectionId),
    #[error("Could not deliver session message")]
    DeliveryError,
}
