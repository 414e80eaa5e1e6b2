// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event queries
//! - `tournaments`: Live tournaments, history, likes and series lookups
//! - `giveaways`: Live and archived giveaways and their entries
//! - `venues`: Venue lookups

pub mod audit;
pub mod giveaways;
pub mod tournaments;
pub mod venues;
