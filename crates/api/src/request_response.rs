// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD`, wall-clock times as `HH:MM[:SS]` and
//! instants as RFC 3339 strings.

use breakshot_audit::AuditEvent;
use breakshot_domain::{
    Giveaway, GiveawayEntry, Tournament, Venue, format_date, format_time, format_timestamp,
};
use breakshot_persistence::HistoryRecord;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, translate_domain_error};

fn timestamp(value: time::OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(value).map_err(translate_domain_error)
}

// ============================================================================
// Tournaments
// ============================================================================

/// API request to submit a tournament for review.
///
/// A request carrying `recurrence_interval` submits a recurring master.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitTournamentRequest {
    /// Display name.
    pub name: String,
    /// Game played, e.g. `9-ball`.
    pub game_type: String,
    /// Bracket format, e.g. `double elimination`.
    pub format: String,
    /// Date of play (`YYYY-MM-DD`).
    pub start_date: String,
    /// Start time (`HH:MM`).
    pub start_time: Option<String>,
    /// Hosting venue.
    pub venue_id: Option<i64>,
    /// Entry fee in cents.
    pub fee_cents: i64,
    /// Table and equipment notes.
    pub equipment: Option<String>,
    /// Table size, e.g. `7ft`.
    pub table_size: Option<String>,
    /// Player cap.
    pub max_players: Option<u32>,
    /// Whether results are reported to Fargo.
    #[serde(default)]
    pub reports_to_fargo: bool,
    /// Whether the field is open to all ratings.
    #[serde(default)]
    pub is_open_tournament: bool,
    /// `weekly`, `biweekly` or `monthly` for a recurring master.
    pub recurrence_interval: Option<String>,
}

/// Query parameters for listing live tournaments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTournamentsRequest {
    /// Only this status.
    pub status: Option<String>,
    /// Only this venue.
    pub venue_id: Option<i64>,
    /// Only on or after this date.
    pub from: Option<String>,
    /// Only on or before this date.
    pub to: Option<String>,
    /// Only this series.
    pub series_id: Option<String>,
}

/// API request carrying the reason for a denial or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReasonRequest {
    /// Why the tournament is being removed.
    pub reason: String,
}

/// API request to restore a deleted tournament.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestoreTournamentRequest {
    /// `pending` or `approved`.
    pub target_status: String,
}

/// API request to change a recurring master's template status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetTemplateStatusRequest {
    /// `active`, `paused` or `ended`.
    pub template_status: String,
}

/// A tournament as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentInfo {
    /// Stable identifier.
    pub tournament_id: String,
    /// Human-readable number.
    pub sequence_number: Option<i64>,
    /// Display name.
    pub name: String,
    /// Game played.
    pub game_type: String,
    /// Bracket format.
    pub format: String,
    /// Date of play.
    pub start_date: String,
    /// Start time.
    pub start_time: Option<String>,
    /// Hosting venue.
    pub venue_id: Option<i64>,
    /// Entry fee in cents.
    pub fee_cents: i64,
    /// Equipment notes.
    pub equipment: Option<String>,
    /// Table size.
    pub table_size: Option<String>,
    /// Player cap.
    pub max_players: Option<u32>,
    /// Part of a recurring series.
    pub is_recurring: bool,
    /// The series template.
    pub is_recurring_master: bool,
    /// Reports to Fargo.
    pub reports_to_fargo: bool,
    /// Open field.
    pub is_open_tournament: bool,
    /// Lifecycle status.
    pub status: String,
    /// Series identifier.
    pub recurring_series_id: Option<String>,
    /// The master this instance was generated from.
    pub parent_recurring_tournament_id: Option<String>,
    /// Master only.
    pub recurrence_interval: Option<String>,
    /// Master only.
    pub recurring_template_status: Option<String>,
    /// Submitting director.
    pub director_id: String,
    /// Submission time.
    pub created_at: String,
}

impl TournamentInfo {
    /// Converts a domain tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_tournament(tournament: &Tournament) -> Result<Self, ApiError> {
        Ok(Self {
            tournament_id: tournament.id.to_string(),
            sequence_number: tournament.sequence_number,
            name: tournament.name.clone(),
            game_type: tournament.game_type.clone(),
            format: tournament.format.clone(),
            start_date: format_date(tournament.start_date),
            start_time: tournament.start_time.map(format_time),
            venue_id: tournament.venue_id,
            fee_cents: tournament.fee_cents,
            equipment: tournament.equipment.clone(),
            table_size: tournament.table_size.clone(),
            max_players: tournament.max_players,
            is_recurring: tournament.is_recurring,
            is_recurring_master: tournament.is_recurring_master,
            reports_to_fargo: tournament.reports_to_fargo,
            is_open_tournament: tournament.is_open_tournament,
            status: tournament.status.as_str().to_string(),
            recurring_series_id: tournament.recurring_series_id.map(|s| s.to_string()),
            parent_recurring_tournament_id: tournament
                .parent_recurring_tournament_id
                .map(|p| p.to_string()),
            recurrence_interval: tournament
                .recurrence
                .map(|r| r.interval.as_str().to_string()),
            recurring_template_status: tournament
                .recurrence
                .map(|r| r.status.as_str().to_string()),
            director_id: tournament.director_id.clone(),
            created_at: timestamp(tournament.created_at)?,
        })
    }
}

/// API response for any tournament write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWriteResponse {
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// The tournament after the write.
    pub tournament: TournamentInfo,
    /// A success message.
    pub message: String,
}

/// API response for a single tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDetailResponse {
    /// The tournament.
    pub tournament: TournamentInfo,
    /// Likes on the live row.
    pub like_count: u32,
}

/// API response for listing live tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTournamentsResponse {
    /// Tournaments ordered by date.
    pub tournaments: Vec<TournamentInfo>,
}

/// A history row as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecordInfo {
    /// History row identifier.
    pub history_id: i64,
    /// The tournament as it left the live table.
    pub tournament: TournamentInfo,
    /// `expired`, `admin_deletion` or `manual`.
    pub removal_reason: String,
    /// Administrator's reason for a deletion.
    pub deletion_reason: Option<String>,
    /// When it left the live table.
    pub removed_at: String,
    /// Who removed it.
    pub removed_by: String,
    /// When it was restored, if it was.
    pub restored_at: Option<String>,
}

impl HistoryRecordInfo {
    /// Converts a persisted history record.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_record(record: &HistoryRecord) -> Result<Self, ApiError> {
        Ok(Self {
            history_id: record.history_id,
            tournament: TournamentInfo::from_tournament(&record.tournament)?,
            removal_reason: record.removal_reason.as_str().to_string(),
            deletion_reason: record.deletion_reason.clone(),
            removed_at: timestamp(record.removed_at)?,
            removed_by: record.removed_by.clone(),
            restored_at: record.restored_at.map(timestamp).transpose()?,
        })
    }
}

/// API response for listing tournament history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListHistoryResponse {
    /// Newest first.
    pub records: Vec<HistoryRecordInfo>,
}

/// API response for a like or unlike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    /// The tournament.
    pub tournament_id: String,
    /// Whether the caller now likes it.
    pub liked: bool,
    /// Whether this call changed anything.
    pub changed: bool,
    /// Likes after the call.
    pub like_count: u32,
}

// ============================================================================
// Venues
// ============================================================================

/// API request to register a venue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateVenueRequest {
    /// Venue name.
    pub name: String,
    /// City.
    pub city: String,
    /// State or region.
    pub region: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

/// A venue as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueInfo {
    /// Venue identifier.
    pub venue_id: Option<i64>,
    /// Venue name.
    pub name: String,
    /// City.
    pub city: String,
    /// State or region.
    pub region: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

impl From<Venue> for VenueInfo {
    fn from(venue: Venue) -> Self {
        Self {
            venue_id: venue.venue_id,
            name: venue.name,
            city: venue.city,
            region: venue.region,
            address: venue.address,
        }
    }
}

/// API response for a venue registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVenueResponse {
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// The stored venue.
    pub venue: VenueInfo,
}

/// API response for listing venues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVenuesResponse {
    /// Venues by name.
    pub venues: Vec<VenueInfo>,
}

// ============================================================================
// Giveaways
// ============================================================================

/// API request to create a giveaway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGiveawayRequest {
    /// Title.
    pub title: String,
    /// Prize value in cents.
    pub prize_value_cents: i64,
    /// Prize description.
    pub prize_details: Option<String>,
    /// End of the entry window (RFC 3339).
    pub end_at: String,
    /// One entry per user.
    #[serde(default)]
    pub single_entry: bool,
    /// Cap on total entries.
    pub maximum_entries: Option<u32>,
    /// Minimum entrant age.
    pub minimum_age: Option<u32>,
}

/// API request to enter a giveaway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnterGiveawayRequest {
    /// The entrant confirms the minimum age.
    pub is_of_age: bool,
    /// The entrant accepts the official rules.
    pub accepted_rules: bool,
    /// The entrant accepts the privacy policy.
    pub accepted_privacy: bool,
}

/// A giveaway as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveawayInfo {
    /// Stable identifier.
    pub giveaway_id: String,
    /// Title.
    pub title: String,
    /// Prize value in cents.
    pub prize_value_cents: i64,
    /// Prize description.
    pub prize_details: Option<String>,
    /// End of the entry window.
    pub end_at: String,
    /// One entry per user.
    pub single_entry: bool,
    /// Cap on total entries.
    pub maximum_entries: Option<u32>,
    /// Minimum entrant age.
    pub minimum_age: Option<u32>,
    /// `active` or `ended`.
    pub status: String,
    /// Creating administrator.
    pub created_by: String,
    /// Creation time.
    pub created_at: String,
    /// Entries so far.
    pub entry_count: u32,
}

impl GiveawayInfo {
    /// Converts a domain giveaway.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_giveaway(giveaway: &Giveaway, entry_count: u32) -> Result<Self, ApiError> {
        Ok(Self {
            giveaway_id: giveaway.id.to_string(),
            title: giveaway.title.clone(),
            prize_value_cents: giveaway.prize_value_cents,
            prize_details: giveaway.prize_details.clone(),
            end_at: timestamp(giveaway.end_at)?,
            single_entry: giveaway.single_entry,
            maximum_entries: giveaway.maximum_entries,
            minimum_age: giveaway.minimum_age,
            status: giveaway.status.as_str().to_string(),
            created_by: giveaway.created_by.clone(),
            created_at: timestamp(giveaway.created_at)?,
            entry_count,
        })
    }
}

/// API response for a giveaway write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveawayWriteResponse {
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// The giveaway after the write.
    pub giveaway: GiveawayInfo,
}

/// API response for listing giveaways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGiveawaysResponse {
    /// Live giveaways.
    pub giveaways: Vec<GiveawayInfo>,
}

/// API response for an accepted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterGiveawayResponse {
    /// Entry identifier.
    pub entry_id: Option<i64>,
    /// The giveaway entered.
    pub giveaway_id: String,
    /// The entrant.
    pub user_id: String,
    /// When the entry was recorded.
    pub entered_at: String,
}

impl EnterGiveawayResponse {
    /// Converts a stored entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_entry(entry: &GiveawayEntry) -> Result<Self, ApiError> {
        Ok(Self {
            entry_id: entry.entry_id,
            giveaway_id: entry.giveaway_id.to_string(),
            user_id: entry.user_id.clone(),
            entered_at: timestamp(entry.entered_at)?,
        })
    }
}

// ============================================================================
// Audit
// ============================================================================

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// Event identifier.
    pub event_id: Option<i64>,
    /// Who acted.
    pub actor_id: String,
    /// The actor's role.
    pub actor_type: String,
    /// Request or run identifier.
    pub cause_id: String,
    /// Why.
    pub cause_description: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// State before.
    pub before: String,
    /// State after.
    pub after: String,
    /// Subject kind.
    pub subject_kind: String,
    /// Subject identifier.
    pub subject_id: String,
}

impl From<AuditEvent> for AuditEventInfo {
    fn from(event: AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            cause_id: event.cause.id,
            cause_description: event.cause.description,
            action: event.action.name,
            details: event.action.details,
            before: event.before.data,
            after: event.after.data,
            subject_kind: event.subject.kind.as_str().to_string(),
            subject_id: event.subject.id,
        }
    }
}

/// API response for an audit query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventsResponse {
    /// The matching events.
    pub events: Vec<AuditEventInfo>,
}
