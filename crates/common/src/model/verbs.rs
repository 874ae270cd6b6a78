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

use crate::model::ids::{ItemId, RoomId, VerbId};

/// The single attachment point of a custom verb, which is also its
/// resolution scope. Narrower scopes shadow broader ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbScope {
    Item(ItemId),
    Room(RoomId),
    World,
}

/// A world-author-defined verb: one or more trigger names and the literal
/// command lines replayed through dispatch when it fires. Immutable once
/// created, short of deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomVerb {
    pub id: VerbId,
    pub scope: VerbScope,
    /// Trigger aliases. Matched exact and case-sensitive, unlike built-in
    /// verb triggers.
    pub names: Vec<String>,
    /// Never empty, and never contains the bare cancel token "/".
    pub commands: Vec<String>,
}

impl CustomVerb {
    /// Exact, case-sensitive trigger check.
    #[must_use]
    pub fn answers_to(&self, word: &str) -> bool {
        self.names.iter().any(|n| n == word)
    }
}

/// A custom verb as captured inside an item template: names and commands
/// only, re-minted with a fresh identity when the template is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVerb {
    pub names: Vec<String>,
    pub commands: Vec<String>,
}
