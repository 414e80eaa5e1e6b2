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

mod calendar;
mod error;
mod giveaway;
mod recurrence;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    format_date, format_time, format_timestamp, local_date, parse_date, parse_time,
    parse_timestamp, parse_timezone,
};
pub use error::DomainError;
pub use giveaway::{EntryAgreement, Giveaway, GiveawayEntry, GiveawayStatus, validate_entry};
pub use recurrence::{DEFAULT_HORIZON, RecurrenceInterval, TemplateStatus, plan_series_dates};
pub use status::{ALL_TOURNAMENT_STATUSES, RemovalReason, TournamentStatus, TransitionContext};

// Re-export public types
pub use chrono_tz::Tz;
pub use types::{
    ActorRole, GiveawayId, RecurrenceTemplate, SeriesId, Tournament, TournamentId, Venue,
};
pub use validation::{
    validate_deletion_reason, validate_giveaway_fields, validate_tournament_fields,
    validate_venue_fields,
};
