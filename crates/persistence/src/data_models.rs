// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.
//!
//! Dates are stored as `YYYY-MM-DD`, wall-clock times as `HH:MM:SS` and
//! instants as RFC 3339 in UTC. Booleans are stored as integers.

use breakshot_domain::{
    EntryAgreement, Giveaway, GiveawayEntry, GiveawayId, GiveawayStatus, RecurrenceInterval,
    RecurrenceTemplate, RemovalReason, SeriesId, TemplateStatus, Tournament, TournamentId,
    TournamentStatus, Venue, format_date, format_time, format_timestamp, parse_date, parse_time,
    parse_timestamp,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::diesel_schema::{
    audit_events, giveaway_entries, giveaway_entries_archive, giveaways, giveaways_archive,
    tournaments, tournaments_history, venues,
};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// An archived or deleted tournament as stored in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// History row identifier.
    pub history_id: i64,
    /// The tournament as it was when removed.
    pub tournament: Tournament,
    /// Why it left the live table.
    pub removal_reason: RemovalReason,
    /// Free-text reason for deletions and denials.
    pub deletion_reason: Option<String>,
    /// When it was removed.
    pub removed_at: OffsetDateTime,
    /// Who removed it.
    pub removed_by: String,
    /// When it was restored, if it has been.
    pub restored_at: Option<OffsetDateTime>,
}

/// A giveaway moved out of the live table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedGiveaway {
    /// The giveaway, with status `archived`.
    pub giveaway: Giveaway,
    /// `expired` or `manual`.
    pub removal_reason: RemovalReason,
    /// When it was archived.
    pub removed_at: OffsetDateTime,
    /// Entries moved with it.
    pub entry_count: u32,
}

pub(crate) fn flag(value: bool) -> i32 {
    i32::from(value)
}

const fn is_set(value: i32) -> bool {
    value != 0
}

/// Formats an instant for storage, normalized to UTC.
pub(crate) fn timestamp_text(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(format_timestamp(value.to_offset(UtcOffset::UTC))?)
}

fn optional_count(value: Option<u32>, column: &str) -> Result<Option<i32>, PersistenceError> {
    value
        .map(|n| {
            n.to_i32().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!("{column} out of range: {n}"))
            })
        })
        .transpose()
}

fn stored_count(value: Option<i32>, column: &str) -> Result<Option<u32>, PersistenceError> {
    value
        .map(|n| {
            n.to_u32().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!("{column} out of range: {n}"))
            })
        })
        .transpose()
}

/// A live tournament row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tournaments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TournamentRow {
    pub tournament_id: String,
    pub sequence_number: i64,
    pub name: String,
    pub game_type: String,
    pub format: String,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue_id: Option<i64>,
    pub fee_cents: i64,
    pub equipment: Option<String>,
    pub table_size: Option<String>,
    pub max_players: Option<i32>,
    pub is_recurring: i32,
    pub is_recurring_master: i32,
    pub reports_to_fargo: i32,
    pub is_open_tournament: i32,
    pub status: String,
    pub recurring_series_id: Option<String>,
    pub parent_recurring_tournament_id: Option<String>,
    pub recurrence_interval: Option<String>,
    pub recurring_template_status: Option<String>,
    pub director_id: String,
    pub created_at: String,
}

impl TournamentRow {
    /// Builds a row from a domain tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in the schema.
    pub fn from_tournament(
        tournament: &Tournament,
        sequence_number: i64,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            tournament_id: tournament.id.to_string(),
            sequence_number,
            name: tournament.name.clone(),
            game_type: tournament.game_type.clone(),
            format: tournament.format.clone(),
            start_date: format_date(tournament.start_date),
            start_time: tournament.start_time.map(format_time),
            venue_id: tournament.venue_id,
            fee_cents: tournament.fee_cents,
            equipment: tournament.equipment.clone(),
            table_size: tournament.table_size.clone(),
            max_players: optional_count(tournament.max_players, "max_players")?,
            is_recurring: flag(tournament.is_recurring),
            is_recurring_master: flag(tournament.is_recurring_master),
            reports_to_fargo: flag(tournament.reports_to_fargo),
            is_open_tournament: flag(tournament.is_open_tournament),
            status: tournament.status.as_str().to_string(),
            recurring_series_id: tournament.recurring_series_id.map(|s| s.to_string()),
            parent_recurring_tournament_id: tournament
                .parent_recurring_tournament_id
                .map(|p| p.to_string()),
            recurrence_interval: tournament
                .recurrence
                .map(|r| r.interval.as_str().to_string()),
            recurring_template_status: tournament.recurrence.map(|r| r.status.as_str().to_string()),
            director_id: tournament.director_id.clone(),
            created_at: timestamp_text(tournament.created_at)?,
        })
    }

    /// Converts the row back into a domain tournament.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for malformed columns.
    pub fn into_tournament(self) -> Result<Tournament, PersistenceError> {
        let recurrence: Option<RecurrenceTemplate> =
            match (self.recurrence_interval, self.recurring_template_status) {
                (Some(interval), Some(status)) => Some(RecurrenceTemplate {
                    interval: interval.parse::<RecurrenceInterval>()?,
                    status: status.parse::<TemplateStatus>()?,
                }),
                (None, None) => None,
                _ => {
                    return Err(PersistenceError::ReconstructionError(format!(
                        "tournament {} has a partial recurrence template",
                        self.tournament_id
                    )));
                }
            };

        Ok(Tournament {
            id: self.tournament_id.parse::<TournamentId>()?,
            sequence_number: Some(self.sequence_number),
            name: self.name,
            game_type: self.game_type,
            format: self.format,
            start_date: parse_date(&self.start_date)?,
            start_time: self.start_time.as_deref().map(parse_time).transpose()?,
            venue_id: self.venue_id,
            fee_cents: self.fee_cents,
            equipment: self.equipment,
            table_size: self.table_size,
            max_players: stored_count(self.max_players, "max_players")?,
            is_recurring: is_set(self.is_recurring),
            is_recurring_master: is_set(self.is_recurring_master),
            reports_to_fargo: is_set(self.reports_to_fargo),
            is_open_tournament: is_set(self.is_open_tournament),
            status: self.status.parse::<TournamentStatus>()?,
            recurring_series_id: self
                .recurring_series_id
                .as_deref()
                .map(str::parse::<SeriesId>)
                .transpose()?,
            parent_recurring_tournament_id: self
                .parent_recurring_tournament_id
                .as_deref()
                .map(str::parse::<TournamentId>)
                .transpose()?,
            recurrence,
            director_id: self.director_id,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// A `tournaments_history` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tournaments_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryRow {
    pub history_id: i64,
    pub tournament_id: String,
    pub sequence_number: i64,
    pub name: String,
    pub game_type: String,
    pub format: String,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue_id: Option<i64>,
    pub fee_cents: i64,
    pub equipment: Option<String>,
    pub table_size: Option<String>,
    pub max_players: Option<i32>,
    pub is_recurring: i32,
    pub is_recurring_master: i32,
    pub reports_to_fargo: i32,
    pub is_open_tournament: i32,
    pub status: String,
    pub recurring_series_id: Option<String>,
    pub parent_recurring_tournament_id: Option<String>,
    pub recurrence_interval: Option<String>,
    pub recurring_template_status: Option<String>,
    pub director_id: String,
    pub created_at: String,
    pub removal_reason: String,
    pub deletion_reason: Option<String>,
    pub removed_at: String,
    pub removed_by: String,
    pub restored_at: Option<String>,
}

impl HistoryRow {
    /// Converts the row into a `HistoryRecord`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for malformed columns.
    pub fn into_record(self) -> Result<HistoryRecord, PersistenceError> {
        let removal_reason: RemovalReason = self.removal_reason.parse::<RemovalReason>()?;
        let removed_at: OffsetDateTime = parse_timestamp(&self.removed_at)?;
        let restored_at: Option<OffsetDateTime> =
            self.restored_at.as_deref().map(parse_timestamp).transpose()?;

        let tournament: Tournament = TournamentRow {
            tournament_id: self.tournament_id,
            sequence_number: self.sequence_number,
            name: self.name,
            game_type: self.game_type,
            format: self.format,
            start_date: self.start_date,
            start_time: self.start_time,
            venue_id: self.venue_id,
            fee_cents: self.fee_cents,
            equipment: self.equipment,
            table_size: self.table_size,
            max_players: self.max_players,
            is_recurring: self.is_recurring,
            is_recurring_master: self.is_recurring_master,
            reports_to_fargo: self.reports_to_fargo,
            is_open_tournament: self.is_open_tournament,
            status: self.status,
            recurring_series_id: self.recurring_series_id,
            parent_recurring_tournament_id: self.parent_recurring_tournament_id,
            recurrence_interval: self.recurrence_interval,
            recurring_template_status: self.recurring_template_status,
            director_id: self.director_id,
            created_at: self.created_at,
        }
        .into_tournament()?;

        Ok(HistoryRecord {
            history_id: self.history_id,
            tournament,
            removal_reason,
            deletion_reason: self.deletion_reason,
            removed_at,
            removed_by: self.removed_by,
            restored_at,
        })
    }
}

/// Insertable `tournaments_history` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tournaments_history)]
pub struct NewHistoryRow {
    pub tournament_id: String,
    pub sequence_number: i64,
    pub name: String,
    pub game_type: String,
    pub format: String,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue_id: Option<i64>,
    pub fee_cents: i64,
    pub equipment: Option<String>,
    pub table_size: Option<String>,
    pub max_players: Option<i32>,
    pub is_recurring: i32,
    pub is_recurring_master: i32,
    pub reports_to_fargo: i32,
    pub is_open_tournament: i32,
    pub status: String,
    pub recurring_series_id: Option<String>,
    pub parent_recurring_tournament_id: Option<String>,
    pub recurrence_interval: Option<String>,
    pub recurring_template_status: Option<String>,
    pub director_id: String,
    pub created_at: String,
    pub removal_reason: String,
    pub deletion_reason: Option<String>,
    pub removed_at: String,
    pub removed_by: String,
}

impl NewHistoryRow {
    /// Builds a history row from a live row.
    ///
    /// `status` is the history status (`archived` or `deleted`); the live
    /// row's own status is discarded.
    pub fn from_live(
        row: TournamentRow,
        status: TournamentStatus,
        removal_reason: RemovalReason,
        deletion_reason: Option<String>,
        removed_at: String,
        removed_by: String,
    ) -> Self {
        Self {
            tournament_id: row.tournament_id,
            sequence_number: row.sequence_number,
            name: row.name,
            game_type: row.game_type,
            format: row.format,
            start_date: row.start_date,
            start_time: row.start_time,
            venue_id: row.venue_id,
            fee_cents: row.fee_cents,
            equipment: row.equipment,
            table_size: row.table_size,
            max_players: row.max_players,
            is_recurring: row.is_recurring,
            is_recurring_master: row.is_recurring_master,
            reports_to_fargo: row.reports_to_fargo,
            is_open_tournament: row.is_open_tournament,
            status: status.as_str().to_string(),
            recurring_series_id: row.recurring_series_id,
            parent_recurring_tournament_id: row.parent_recurring_tournament_id,
            recurrence_interval: row.recurrence_interval,
            recurring_template_status: row.recurring_template_status,
            director_id: row.director_id,
            created_at: row.created_at,
            removal_reason: removal_reason.as_str().to_string(),
            deletion_reason,
            removed_at,
            removed_by,
        }
    }
}

/// A live giveaway row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = giveaways)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GiveawayRow {
    pub giveaway_id: String,
    pub title: String,
    pub prize_value_cents: i64,
    pub prize_details: Option<String>,
    pub end_at: String,
    pub single_entry: i32,
    pub maximum_entries: Option<i32>,
    pub minimum_age: Option<i32>,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
}

impl GiveawayRow {
    /// Builds a row from a domain giveaway.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in the schema.
    pub fn from_giveaway(giveaway: &Giveaway) -> Result<Self, PersistenceError> {
        Ok(Self {
            giveaway_id: giveaway.id.to_string(),
            title: giveaway.title.clone(),
            prize_value_cents: giveaway.prize_value_cents,
            prize_details: giveaway.prize_details.clone(),
            end_at: timestamp_text(giveaway.end_at)?,
            single_entry: flag(giveaway.single_entry),
            maximum_entries: optional_count(giveaway.maximum_entries, "maximum_entries")?,
            minimum_age: optional_count(giveaway.minimum_age, "minimum_age")?,
            status: giveaway.status.as_str().to_string(),
            created_by: giveaway.created_by.clone(),
            created_at: timestamp_text(giveaway.created_at)?,
        })
    }

    /// Converts the row back into a domain giveaway.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for malformed columns.
    pub fn into_giveaway(self) -> Result<Giveaway, PersistenceError> {
        Ok(Giveaway {
            id: self.giveaway_id.parse::<GiveawayId>()?,
            title: self.title,
            prize_value_cents: self.prize_value_cents,
            prize_details: self.prize_details,
            end_at: parse_timestamp(&self.end_at)?,
            single_entry: is_set(self.single_entry),
            maximum_entries: stored_count(self.maximum_entries, "maximum_entries")?,
            minimum_age: stored_count(self.minimum_age, "minimum_age")?,
            status: self.status.parse::<GiveawayStatus>()?,
            created_by: self.created_by,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// A `giveaways_archive` row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = giveaways_archive)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArchivedGiveawayRow {
    pub giveaway_id: String,
    pub title: String,
    pub prize_value_cents: i64,
    pub prize_details: Option<String>,
    pub end_at: String,
    pub single_entry: i32,
    pub maximum_entries: Option<i32>,
    pub minimum_age: Option<i32>,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
    pub removal_reason: String,
    pub removed_at: String,
}

impl ArchivedGiveawayRow {
    /// Builds an archive row from a live row.
    pub fn from_live(row: GiveawayRow, removal_reason: RemovalReason, removed_at: String) -> Self {
        Self {
            giveaway_id: row.giveaway_id,
            title: row.title,
            prize_value_cents: row.prize_value_cents,
            prize_details: row.prize_details,
            end_at: row.end_at,
            single_entry: row.single_entry,
            maximum_entries: row.maximum_entries,
            minimum_age: row.minimum_age,
            status: GiveawayStatus::Archived.as_str().to_string(),
            created_by: row.created_by,
            created_at: row.created_at,
            removal_reason: removal_reason.as_str().to_string(),
            removed_at,
        }
    }

    /// Converts the row into an `ArchivedGiveaway`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for malformed columns.
    pub fn into_archived(self, entry_count: u32) -> Result<ArchivedGiveaway, PersistenceError> {
        let removal_reason: RemovalReason = self.removal_reason.parse::<RemovalReason>()?;
        let removed_at: OffsetDateTime = parse_timestamp(&self.removed_at)?;
        let giveaway: Giveaway = GiveawayRow {
            giveaway_id: self.giveaway_id,
            title: self.title,
            prize_value_cents: self.prize_value_cents,
            prize_details: self.prize_details,
            end_at: self.end_at,
            single_entry: self.single_entry,
            maximum_entries: self.maximum_entries,
            minimum_age: self.minimum_age,
            status: self.status,
            created_by: self.created_by,
            created_at: self.created_at,
        }
        .into_giveaway()?;

        Ok(ArchivedGiveaway {
            giveaway,
            removal_reason,
            removed_at,
            entry_count,
        })
    }
}

/// A live giveaway entry row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = giveaway_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryRow {
    pub entry_id: i64,
    pub giveaway_id: String,
    pub user_id: String,
    pub entered_at: String,
    pub is_of_age: i32,
    pub accepted_rules: i32,
    pub accepted_privacy: i32,
}

impl EntryRow {
    /// Converts the row back into a domain entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for malformed columns.
    pub fn into_entry(self) -> Result<GiveawayEntry, PersistenceError> {
        Ok(GiveawayEntry {
            entry_id: Some(self.entry_id),
            giveaway_id: self.giveaway_id.parse::<GiveawayId>()?,
            user_id: self.user_id,
            entered_at: parse_timestamp(&self.entered_at)?,
            agreement: EntryAgreement {
                is_of_age: is_set(self.is_of_age),
                accepted_rules: is_set(self.accepted_rules),
                accepted_privacy: is_set(self.accepted_privacy),
            },
        })
    }
}

/// Insertable giveaway entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = giveaway_entries)]
pub struct NewEntryRow {
    pub giveaway_id: String,
    pub user_id: String,
    pub entered_at: String,
    pub is_of_age: i32,
    pub accepted_rules: i32,
    pub accepted_privacy: i32,
}

/// A `giveaway_entries_archive` row. Keeps the original entry id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = giveaway_entries_archive)]
pub struct ArchivedEntryRow {
    pub entry_id: i64,
    pub giveaway_id: String,
    pub user_id: String,
    pub entered_at: String,
    pub is_of_age: i32,
    pub accepted_rules: i32,
    pub accepted_privacy: i32,
    pub removal_reason: String,
    pub removed_at: String,
}

impl ArchivedEntryRow {
    pub fn from_live(row: EntryRow, removal_reason: RemovalReason, removed_at: String) -> Self {
        Self {
            entry_id: row.entry_id,
            giveaway_id: row.giveaway_id,
            user_id: row.user_id,
            entered_at: row.entered_at,
            is_of_age: row.is_of_age,
            accepted_rules: row.accepted_rules,
            accepted_privacy: row.accepted_privacy,
            removal_reason: removal_reason.as_str().to_string(),
            removed_at,
        }
    }
}

/// A venue row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = venues)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VenueRow {
    pub venue_id: i64,
    pub name: String,
    pub city: String,
    pub region: Option<String>,
    pub address: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Self {
            venue_id: Some(row.venue_id),
            name: row.name,
            city: row.city,
            region: row.region,
            address: row.address,
        }
    }
}

/// Insertable venue.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = venues)]
pub struct NewVenueRow<'a> {
    pub name: &'a str,
    pub city: &'a str,
    pub region: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Diesel Queryable struct for audit event rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub subject_kind: String,
    pub subject_id: String,
}
