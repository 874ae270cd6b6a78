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

//! The interaction core: sessions, the verb roster, custom-verb replay, and
//! the scheduler loop that serializes all of it.
//!
//! Hosts own transports and deliver lines through a [`SchedulerClient`]; the
//! world itself lives behind the `WorldState` trait and is only ever touched
//! from the scheduler thread.

pub mod config;
mod custom_verbs;
mod ghost;
pub mod scheduler;
pub mod scheduler_client;
pub mod session;
pub mod verbs;

pub use config::Config;
pub use scheduler::Scheduler;
pub use scheduler_client::{SchedulerClient, SchedulerClientMsg};
pub use session::{Session, SessionState};
pub use verbs::VerbRegistry;
