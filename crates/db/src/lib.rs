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

//! The storage side of the world. One implementation for now: everything in
//! memory, no persistence across restarts. The interaction core only ever
//! sees the `WorldState` trait, so a persistent store can slot in behind it
//! later without touching dispatch.

mod mem_world_state;

pub use mem_world_state::MemWorldState;
