// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament queries.
//!
//! The live table holds `pending`, `approved` and `active` tournaments.
//! `tournaments_history` holds `archived` and `deleted` ones, possibly more
//! than once per tournament when a deleted tournament was restored and
//! removed again.

use std::collections::BTreeMap;

use breakshot_domain::{
    RemovalReason, SeriesId, TemplateStatus, Tournament, TournamentId, TournamentStatus,
    format_date, parse_date,
};
use diesel::SqliteConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::Date;

use crate::data_models::{HistoryRecord, HistoryRow, TournamentRow};
use crate::diesel_schema::{tournament_likes, tournaments, tournaments_history};
use crate::error::PersistenceError;

/// Filters for listing live tournaments. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentFilter {
    /// Only this status.
    pub status: Option<TournamentStatus>,
    /// Only tournaments at this venue.
    pub venue_id: Option<i64>,
    /// Only tournaments on or after this date.
    pub from: Option<Date>,
    /// Only tournaments on or before this date.
    pub to: Option<Date>,
    /// Only instances of this series.
    pub series_id: Option<SeriesId>,
}

/// Retrieves the live row for a tournament, if there is one.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_live_row(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<Option<TournamentRow>, PersistenceError> {
    Ok(tournaments::table
        .filter(tournaments::tournament_id.eq(tournament_id.to_string()))
        .select(TournamentRow::as_select())
        .first::<TournamentRow>(conn)
        .optional()?)
}

/// Retrieves a live tournament.
///
/// # Errors
///
/// Returns `PersistenceError::TournamentNotFound` if the tournament is not
/// in the live table.
pub fn get_tournament(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<Tournament, PersistenceError> {
    find_live_row(conn, tournament_id)?
        .ok_or_else(|| PersistenceError::TournamentNotFound(tournament_id.to_string()))?
        .into_tournament()
}

/// Retrieves a live tournament by its sequence number.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no live tournament carries it.
pub fn get_tournament_by_sequence(
    conn: &mut SqliteConnection,
    sequence_number: i64,
) -> Result<Tournament, PersistenceError> {
    tournaments::table
        .filter(tournaments::sequence_number.eq(sequence_number))
        .select(TournamentRow::as_select())
        .first::<TournamentRow>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("No tournament with sequence number {sequence_number}"))
        })?
        .into_tournament()
}

/// Lists live tournaments ordered by date, time and sequence number.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_tournaments(
    conn: &mut SqliteConnection,
    filter: &TournamentFilter,
) -> Result<Vec<Tournament>, PersistenceError> {
    let mut query = tournaments::table.into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(tournaments::status.eq(status.as_str()));
    }
    if let Some(venue_id) = filter.venue_id {
        query = query.filter(tournaments::venue_id.eq(venue_id));
    }
    if let Some(from) = filter.from {
        query = query.filter(tournaments::start_date.ge(format_date(from)));
    }
    if let Some(to) = filter.to {
        query = query.filter(tournaments::start_date.le(format_date(to)));
    }
    if let Some(series_id) = filter.series_id {
        query = query.filter(tournaments::recurring_series_id.eq(series_id.to_string()));
    }

    let rows: Vec<TournamentRow> = query
        .order((
            tournaments::start_date.asc(),
            tournaments::start_time.asc(),
            tournaments::sequence_number.asc(),
        ))
        .select(TournamentRow::as_select())
        .load::<TournamentRow>(conn)?;

    rows.into_iter().map(TournamentRow::into_tournament).collect()
}

/// Lists live tournaments that are `approved` or `active`.
///
/// The archival step decides which of these have expired.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_archivable_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<TournamentRow>, PersistenceError> {
    Ok(tournaments::table
        .filter(tournaments::status.eq_any([
            TournamentStatus::Approved.as_str(),
            TournamentStatus::Active.as_str(),
        ]))
        .order(tournaments::sequence_number.asc())
        .select(TournamentRow::as_select())
        .load::<TournamentRow>(conn)?)
}

/// Lists history records, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_history(
    conn: &mut SqliteConnection,
    reason: Option<RemovalReason>,
) -> Result<Vec<HistoryRecord>, PersistenceError> {
    let mut query = tournaments_history::table.into_boxed();
    if let Some(reason) = reason {
        query = query.filter(tournaments_history::removal_reason.eq(reason.as_str()));
    }

    let rows: Vec<HistoryRow> = query
        .order(tournaments_history::history_id.desc())
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?;

    rows.into_iter().map(HistoryRow::into_record).collect()
}

/// Retrieves the latest unrestored history row of a tournament.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_latest_history_row(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<Option<HistoryRow>, PersistenceError> {
    Ok(tournaments_history::table
        .filter(tournaments_history::tournament_id.eq(tournament_id.to_string()))
        .filter(tournaments_history::restored_at.is_null())
        .order(tournaments_history::history_id.desc())
        .select(HistoryRow::as_select())
        .first::<HistoryRow>(conn)
        .optional()?)
}

/// Retrieves the history row a restore would bring back: the latest
/// unrestored administrative deletion.
///
/// # Errors
///
/// Returns `PersistenceError::HistoryNotFound` if there is none.
pub fn get_restorable_history_row(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<HistoryRow, PersistenceError> {
    tournaments_history::table
        .filter(tournaments_history::tournament_id.eq(tournament_id.to_string()))
        .filter(tournaments_history::removal_reason.eq(RemovalReason::AdminDeletion.as_str()))
        .filter(tournaments_history::restored_at.is_null())
        .order(tournaments_history::history_id.desc())
        .select(HistoryRow::as_select())
        .first::<HistoryRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::HistoryNotFound(tournament_id.to_string()))
}

/// Finds a tournament wherever it lives: the live row if present, else its
/// latest unrestored history row.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn find_tournament(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<Option<Tournament>, PersistenceError> {
    if let Some(row) = find_live_row(conn, tournament_id)? {
        return row.into_tournament().map(Some);
    }

    find_latest_history_row(conn, tournament_id)?
        .map(|row| row.into_record().map(|record| record.tournament))
        .transpose()
}

/// Returns the next free sequence number across live and history rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn next_sequence_number(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let live_max: Option<i64> = tournaments::table
        .select(max(tournaments::sequence_number))
        .first::<Option<i64>>(conn)?;
    let history_max: Option<i64> = tournaments_history::table
        .select(max(tournaments_history::sequence_number))
        .first::<Option<i64>>(conn)?;

    Ok(live_max.max(history_max).unwrap_or(0) + 1)
}

/// Lists every master whose template is active, live or archived.
///
/// A series appears once. When a master has both a live row and an old
/// history row, the live row wins.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn list_generating_masters(
    conn: &mut SqliteConnection,
) -> Result<Vec<Tournament>, PersistenceError> {
    let live: Vec<TournamentRow> = tournaments::table
        .filter(tournaments::is_recurring_master.eq(1))
        .filter(tournaments::recurring_template_status.eq(TemplateStatus::Active.as_str()))
        .order(tournaments::sequence_number.asc())
        .select(TournamentRow::as_select())
        .load::<TournamentRow>(conn)?;

    let archived: Vec<HistoryRow> = tournaments_history::table
        .filter(tournaments_history::is_recurring_master.eq(1))
        .filter(tournaments_history::recurring_template_status.eq(TemplateStatus::Active.as_str()))
        .filter(tournaments_history::restored_at.is_null())
        .order(tournaments_history::history_id.desc())
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?;

    let mut masters: BTreeMap<SeriesId, Tournament> = BTreeMap::new();
    for row in live {
        let master: Tournament = row.into_tournament()?;
        if let Some(series_id) = master.recurring_series_id {
            masters.entry(series_id).or_insert(master);
        }
    }
    for row in archived {
        let master: Tournament = row.into_record()?.tournament;
        if let Some(series_id) = master.recurring_series_id {
            masters.entry(series_id).or_insert(master);
        }
    }

    Ok(masters.into_values().collect())
}

/// Returns the dates of a series' live tournaments on or after `today`.
///
/// # Errors
///
/// Returns an error if the query fails or a date is malformed.
pub fn future_series_dates(
    conn: &mut SqliteConnection,
    series_id: SeriesId,
    today: Date,
) -> Result<Vec<Date>, PersistenceError> {
    let dates: Vec<String> = tournaments::table
        .filter(tournaments::recurring_series_id.eq(series_id.to_string()))
        .filter(tournaments::start_date.ge(format_date(today)))
        .order(tournaments::start_date.asc())
        .select(tournaments::start_date)
        .load::<String>(conn)?;

    dates
        .iter()
        .map(|d| parse_date(d).map_err(PersistenceError::from))
        .collect()
}

/// Returns the dates on or after `today` whose series instance an admin
/// deleted and nobody has restored.
///
/// # Errors
///
/// Returns an error if the query fails or a date is malformed.
pub fn withdrawn_series_dates(
    conn: &mut SqliteConnection,
    series_id: SeriesId,
    today: Date,
) -> Result<Vec<Date>, PersistenceError> {
    let dates: Vec<String> = tournaments_history::table
        .filter(tournaments_history::recurring_series_id.eq(series_id.to_string()))
        .filter(tournaments_history::removal_reason.eq(RemovalReason::AdminDeletion.as_str()))
        .filter(tournaments_history::restored_at.is_null())
        .filter(tournaments_history::start_date.ge(format_date(today)))
        .order(tournaments_history::start_date.asc())
        .select(tournaments_history::start_date)
        .distinct()
        .load::<String>(conn)?;

    dates
        .iter()
        .map(|d| parse_date(d).map_err(PersistenceError::from))
        .collect()
}

/// Counts the likes on a live tournament.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_likes(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
) -> Result<u32, PersistenceError> {
    let count: i64 = tournament_likes::table
        .filter(tournament_likes::tournament_id.eq(tournament_id.to_string()))
        .count()
        .get_result::<i64>(conn)?;

    count
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("like count {count}")))
}
