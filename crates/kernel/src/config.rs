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

use serde::{Deserialize, Serialize};

/// World-level knobs, usually loaded from a YAML file by the host. Every
/// field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shown in the login greeting.
    pub world_name: String,
    /// Name of the room the world starts with, where fresh users appear.
    pub entry_room_name: String,
    pub entry_room_description: String,
    /// Name reserved for the scripted identity that replays custom verbs.
    /// Nobody can log in under it.
    pub automation_user_name: String,
    /// How deep custom verbs may trigger each other before the chain is cut.
    pub max_automation_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_name: "wold".to_string(),
            entry_room_name: "The Landing".to_string(),
            entry_room_description:
                "A quiet clearing where new arrivals find their feet. Paths lead off into \
                 whatever the world has grown into."
                    .to_string(),
            automation_user_name: "ghost".to_string(),
            max_automation_depth: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.automation_user_name, "ghost");
        assert_eq!(config.max_automation_depth, 10);
        assert!(!config.world_name.is_empty());
        assert!(!config.entry_room_name.is_empty());
    }
}
