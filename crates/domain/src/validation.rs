// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::giveaway::Giveaway;
use crate::types::{Tournament, Venue};

fn require_text(
    value: &str,
    field: &'static str,
    make: fn(&'static str, String) -> DomainError,
) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(make(field, String::from("cannot be empty")));
    }
    Ok(())
}

const fn tournament_field(field: &'static str, reason: String) -> DomainError {
    DomainError::InvalidTournamentField { field, reason }
}

const fn giveaway_field(field: &'static str, reason: String) -> DomainError {
    DomainError::InvalidGiveawayField { field, reason }
}

const fn venue_field(field: &'static str, reason: String) -> DomainError {
    DomainError::InvalidVenueField { field, reason }
}

/// Validates a tournament's field constraints.
///
/// This checks the tournament in isolation. It does NOT check that the
/// referenced venue exists (that requires persistence).
///
/// # Errors
///
/// Returns an error if:
/// - `name`, `game_type` or `format` is blank
/// - `fee_cents` is negative
/// - `max_players` is zero
/// - a master is not recurring or lacks a template or series
/// - a non-master carries a recurrence template
pub fn validate_tournament_fields(tournament: &Tournament) -> Result<(), DomainError> {
    require_text(&tournament.name, "name", tournament_field)?;
    require_text(&tournament.game_type, "game_type", tournament_field)?;
    require_text(&tournament.format, "format", tournament_field)?;

    if tournament.fee_cents < 0 {
        return Err(tournament_field(
            "fee_cents",
            format!("must not be negative, got {}", tournament.fee_cents),
        ));
    }

    if tournament.max_players == Some(0) {
        return Err(tournament_field(
            "max_players",
            String::from("must be greater than zero"),
        ));
    }

    if tournament.is_recurring_master {
        if !tournament.is_recurring {
            return Err(tournament_field(
                "is_recurring",
                String::from("a recurring master must be recurring"),
            ));
        }
        if tournament.recurrence.is_none() {
            return Err(tournament_field(
                "recurrence_interval",
                String::from("a recurring master needs an interval"),
            ));
        }
        if tournament.recurring_series_id.is_none() {
            return Err(tournament_field(
                "recurring_series_id",
                String::from("a recurring master needs a series"),
            ));
        }
    } else if tournament.recurrence.is_some() {
        return Err(tournament_field(
            "recurrence_interval",
            String::from("only recurring masters carry a template"),
        ));
    }

    Ok(())
}

/// Validates and normalizes the reason given for a deletion or denial.
///
/// # Errors
///
/// Returns `DomainError::MissingDeletionReason` for a blank reason.
pub fn validate_deletion_reason(reason: &str) -> Result<String, DomainError> {
    let trimmed: &str = reason.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingDeletionReason);
    }
    Ok(trimmed.to_string())
}

/// Validates a venue's field constraints.
///
/// # Errors
///
/// Returns an error if the name or city is blank.
pub fn validate_venue_fields(venue: &Venue) -> Result<(), DomainError> {
    require_text(&venue.name, "name", venue_field)?;
    require_text(&venue.city, "city", venue_field)
}

/// Validates a giveaway's field constraints.
///
/// # Errors
///
/// Returns an error if:
/// - the title is blank
/// - the prize value is negative
/// - `maximum_entries` is zero
/// - `end_at` is not after `created_at`
pub fn validate_giveaway_fields(giveaway: &Giveaway) -> Result<(), DomainError> {
    require_text(&giveaway.title, "title", giveaway_field)?;

    if giveaway.prize_value_cents < 0 {
        return Err(giveaway_field(
            "prize_value_cents",
            format!("must not be negative, got {}", giveaway.prize_value_cents),
        ));
    }

    if giveaway.maximum_entries == Some(0) {
        return Err(giveaway_field(
            "maximum_entries",
            String::from("must be greater than zero"),
        ));
    }

    if giveaway.end_at <= giveaway.created_at {
        return Err(giveaway_field(
            "end_at",
            String::from("must be after the creation time"),
        ));
    }

    Ok(())
}
