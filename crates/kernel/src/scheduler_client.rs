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

use std::time::Duration;

use flume::Sender;

use wold_common::model::ConnectionId;
use wold_common::tasks::SchedulerError;

/// What hosts may ask the scheduler to do.
pub enum SchedulerClientMsg {
    /// A transport connection appeared; make a session for it and greet it.
    NewConnection {
        connection: ConnectionId,
        reply: oneshot::Sender<Result<(), SchedulerError>>,
    },
    /// One line of input from a connection.
    SubmitLine {
        connection: ConnectionId,
        line: String,
        reply: oneshot::Sender<Result<(), SchedulerError>>,
    },
    /// The transport went away; wind the session down.
    DetachConnection { connection: ConnectionId },
    /// Stop the scheduler loop. Connected users get a closing notice.
    Shutdown { reply: oneshot::Sender<()> },
}

/// A handle for talking to the scheduler from the outside: the transport
/// host, tests, whoever owns the connections. Cheap to clone; every clone
/// feeds the same single scheduler loop.
#[derive(Clone)]
pub struct SchedulerClient {
    scheduler_sender: Sender<SchedulerClientMsg>,
}

impl SchedulerClient {
    pub(crate) fn new(scheduler_sender: Sender<SchedulerClientMsg>) -> Self {
        Self { scheduler_sender }
    }

    pub fn new_connection(&self, connection: ConnectionId) -> Result<(), SchedulerError> {
        let (reply, receive) = oneshot::channel();
        self.scheduler_sender
            .send(SchedulerClientMsg::NewConnection { connection, reply })
            .map_err(|_| SchedulerError::SchedulerNotResponding)?;
        receive
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| SchedulerError::SchedulerNotResponding)?
    }

    /// Dispatch one line and wait for it to finish; the world is consistent
    /// again by the time this returns. An `Err` of `CommandExecutionError`
    /// means the line faulted unexpectedly, not that the connection broke.
    pub fn submit_line(
        &self,
        connection: ConnectionId,
        line: impl Into<String>,
    ) -> Result<(), SchedulerError> {
        let (reply, receive) = oneshot::channel();
        self.scheduler_sender
            .send(SchedulerClientMsg::SubmitLine {
                connection,
                line: line.into(),
                reply,
            })
            .map_err(|_| SchedulerError::SchedulerNotResponding)?;
        receive
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| SchedulerError::SchedulerNotResponding)?
    }

    /// Fire-and-forget; there is nobody left to read a reply.
    pub fn detach_connection(&self, connection: ConnectionId) -> Result<(), SchedulerError> {
        self.scheduler_sender
            .send(SchedulerClientMsg::DetachConnection { connection })
            .map_err(|_| SchedulerError::SchedulerNotResponding)
    }

    pub fn shutdown(&self) -> Result<(), SchedulerError> {
        let (reply, receive) = oneshot::channel();
        self.scheduler_sender
            .send(SchedulerClientMsg::Shutdown { reply })
            .map_err(|_| SchedulerError::SchedulerNotResponding)?;
        receive
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| SchedulerError::SchedulerNotResponding)
    }
}
