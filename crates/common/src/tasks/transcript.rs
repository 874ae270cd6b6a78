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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Inbound,
    Outbound,
}

/// Optional interaction log: one record per line in, one per line out,
/// keyed by the connection involved. Dispatch behaves identically whether
/// or not one is installed.
pub trait Transcript: Send + Sync {
    fn record(&self, connection: ConnectionId, direction: LineDirection, text: &str);
}

/// Mirrors the transcript into the tracing log at debug level.
pub struct TracingTranscript {}

impl TracingTranscript {
    pub fn new() -> Self {
        TracingTranscript {}
    }
}

impl Default for TracingTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript for TracingTranscript {
    fn record(&self, connection: ConnectionId, direction: LineDirection, text: &str) {
        match direction {
            LineDirection::Inbound => {
                tracing::debug!(%connection, "<< {}", text);
            }
            LineDirection::Outbound => {
                tracing::debug!(%connection, ">> {}", text);
            }
        }
    }
}

/// Collects transcript records for test assertions.
pub struct MockTranscript {
    records: Mutex<Vec<(ConnectionId, LineDirection, String)>>,
}

impl MockTranscript {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(vec![]),
        }
    }

    pub fn records(&self) -> Vec<(ConnectionId, LineDirection, String)> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript for MockTranscript {
    fn record(&self, connection: ConnectionId, direction: LineDirection, text: &str) {
        self.records
            .lock()
            .unwrap()
            .push((connection, direction, text.to_string()));
    }
}
