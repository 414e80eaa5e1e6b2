// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `tournaments`: Tournament transitions, history moves and likes
//! - `giveaways`: Giveaway transitions, entries and archival of one giveaway
//! - `venues`: Venue creation
//! - `maintenance`: Archival and recurrence steps
//!
//! Every public mutation that changes more than one row opens its own
//! transaction; helpers that expect to run inside one say so.

pub mod audit;
pub mod giveaways;
pub mod maintenance;
pub mod tournaments;
pub mod venues;

pub use tournaments::PersistedTournament;
