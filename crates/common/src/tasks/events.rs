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

use std::time::SystemTime;

use uuid::Uuid;

use crate::model::UserId;

/// How a host should draw a message. Hosts that cannot draw boxes may
/// degrade however they like; the hint is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Plain,
    /// Body wrapped in a rule box.
    Boxed,
    /// First line of the body is a title, underlined; the rest is the body.
    Titled,
}

/// One outbound message: body text plus rendering hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    /// Ask the host to draw a visual break before the body. Most verb output
    /// opens a section; continuation prompts inside wizards do not.
    pub section_break: bool,
    pub display: DisplayMode,
}

impl Message {
    /// A bare line, no section break.
    #[must_use]
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            section_break: false,
            display: DisplayMode::Plain,
        }
    }

    /// A plain message that opens a new section.
    #[must_use]
    pub fn section(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            section_break: true,
            display: DisplayMode::Plain,
        }
    }

    #[must_use]
    pub fn boxed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            section_break: true,
            display: DisplayMode::Boxed,
        }
    }

    #[must_use]
    pub fn titled(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            text: format!("{}\n{}", title.into(), body.into()),
            section_break: true,
            display: DisplayMode::Titled,
        }
    }
}

/// A narrative event is a record of something that happened in the world,
/// as delivered to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeEvent {
    /// Chronologically-ordered unique identifier (UUID v7, embedded timestamp).
    pub event_id: Uuid,
    /// When the event happened, in the server's system time.
    pub timestamp: SystemTime,
    /// The user that authored or caused the event. `None` for events the
    /// dispatcher itself emits, like login prompts.
    pub author: Option<UserId>,
    pub message: Message,
}

impl NarrativeEvent {
    #[must_use]
    pub fn notify(author: Option<UserId>, message: Message) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            timestamp: SystemTime::now(),
            author,
            message,
        }
    }
}
