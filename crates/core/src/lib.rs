// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod maintenance;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    apply_giveaway, apply_tournament, giveaway_entry_audit_event, venue_created_audit_event,
};
pub use command::{GiveawayCommand, TournamentCommand};
pub use error::CoreError;
pub use maintenance::{
    ArchiveGiveawaysReport, ArchiveTournamentsReport, FailureKind, MaintenanceOutcome,
    MaintenanceReport, SeriesGeneration, TournamentArchival, giveaway_archival_audit_event,
    plan_recurrence, select_expired_giveaways, select_expired_tournaments,
    series_generation_audit_event, tournament_archival_audit_event,
};
pub use state::{ApplyContext, GiveawayTransition, TournamentEffect, TournamentTransition};
