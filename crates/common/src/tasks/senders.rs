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

use std::sync::Mutex;

use crate::model::ConnectionId;
use crate::tasks::errors::SessionError;
use crate::tasks::events::NarrativeEvent;

/// The outbound delivery seam, implemented by hosts. The core only ever
/// hands this connections the world currently marks as live; delivery
/// guarantees past that point (ordering, buffering) are the host's problem.
pub trait Sender: Send + Sync {
    fn send_event(
        &self,
        connection: ConnectionId,
        event: NarrativeEvent,
    ) -> Result<(), SessionError>;

    /// Ask the host to close the transport under this connection. Used when
    /// a session is terminated server-side, e.g. after a login usurps it.
    fn disconnect(&self, connection: ConnectionId) -> Result<(), SessionError>;
}

/// Swallows everything. For tests and tools that don't care about output.
pub struct NoopSender {}

impl NoopSender {
    pub fn new() -> Self {
        NoopSender {}
    }
}

impl Default for NoopSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for NoopSender {
    fn send_event(
        &self,
        _connection: ConnectionId,
        _event: NarrativeEvent,
    ) -> Result<(), SessionError> {
        Ok(())
    }

    fn disconnect(&self, _connection: ConnectionId) -> Result<(), SessionError> {
        Ok(())
    }
}

/// A mock sender that collects everything delivered, per connection, so
/// tests can assert on who saw what and in which order.
pub struct MockSender {
    inner: Mutex<MockSenderInner>,
}

struct MockSenderInner {
    received: Vec<(ConnectionId, NarrativeEvent)>,
    disconnected: Vec<ConnectionId>,
}

impl MockSender {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockSenderInner {
                received: vec![],
                disconnected: vec![],
            }),
        }
    }

    /// Everything delivered so far, in delivery order.
    pub fn received(&self) -> Vec<(ConnectionId, NarrativeEvent)> {
        self.inner.lock().unwrap().received.clone()
    }

    /// Bodies of the events delivered to one connection, in order.
    pub fn texts_for(&self, connection: ConnectionId) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .received
            .iter()
            .filter(|(c, _)| *c == connection)
            .map(|(_, e)| e.message.text.clone())
            .collect()
    }

    pub fn disconnected(&self) -> Vec<ConnectionId> {
        self.inner.lock().unwrap().disconnected.clone()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.received.clear();
        inner.disconnected.clear();
    }
}

impl Default for MockSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for MockSender {
    fn send_event(
        &self,
        connection: ConnectionId,
        event: NarrativeEvent,
    ) -> Result<(), SessionError> {
        self.inner.lock().unwrap().received.push((connection, event));
        Ok(())
    }

    fn disconnect(&self, connection: ConnectionId) -> Result<(), SessionError> {
        self.inner.lock().unwrap().disconnected.push(connection);
        Ok(())
    }
}
