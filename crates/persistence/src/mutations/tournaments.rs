// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament mutations.
//!
//! Every function that moves a tournament between the live table and
//! history deletes its likes in the same step; likes only ever reference
//! live rows.

use breakshot::{TournamentEffect, TournamentTransition};
use breakshot_domain::{RemovalReason, TemplateStatus, Tournament, TournamentId, TournamentStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{HistoryRow, NewHistoryRow, TournamentRow, timestamp_text};
use crate::diesel_schema::{tournament_likes, tournaments, tournaments_history};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::tournaments::{find_live_row, get_restorable_history_row, next_sequence_number};

/// Result of persisting a tournament transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTournament {
    /// The audit event recorded for the transition.
    pub event_id: i64,
    /// The tournament as stored, with its sequence number.
    pub tournament: Tournament,
}

fn to_u32(count: usize, what: &str) -> Result<u32, PersistenceError> {
    count
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("{what} count {count}")))
}

/// Persists a tournament transition and its audit event in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The transition produced by the core
/// * `now` - Timestamp recorded for removals and restores
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is committed in that case.
pub fn persist_tournament_transition(
    conn: &mut SqliteConnection,
    transition: &TournamentTransition,
    now: OffsetDateTime,
) -> Result<PersistedTournament, PersistenceError> {
    conn.transaction::<PersistedTournament, PersistenceError, _>(|conn| {
        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;

        let tournament: Tournament = match &transition.effect {
            TournamentEffect::Insert => insert_live(conn, &transition.tournament)?,
            TournamentEffect::Update => update_live(conn, &transition.tournament)?,
            TournamentEffect::MoveToHistory {
                reason,
                deletion_reason,
            } => {
                let live: TournamentRow = find_live_row(conn, transition.tournament.id)?
                    .ok_or_else(|| {
                        PersistenceError::TournamentNotFound(transition.tournament.id.to_string())
                    })?;
                let row: TournamentRow =
                    TournamentRow::from_tournament(&transition.tournament, live.sequence_number)?;
                let likes_removed: u32 = move_row_to_history(
                    conn,
                    row,
                    transition.tournament.status,
                    *reason,
                    deletion_reason.clone(),
                    timestamp_text(now)?,
                    &transition.audit_event.actor.id,
                )?;
                debug!(
                    tournament_id = %transition.tournament.id,
                    reason = reason.as_str(),
                    likes_removed,
                    "Moved tournament to history"
                );
                Tournament {
                    sequence_number: Some(live.sequence_number),
                    ..transition.tournament.clone()
                }
            }
            TournamentEffect::Restore => restore_from_history(conn, &transition.tournament, now)?,
            TournamentEffect::UpdateTemplate { status } => {
                update_template_status(conn, transition.tournament.id, *status)?;
                transition.tournament.clone()
            }
        };

        info!(
            event_id,
            tournament_id = %tournament.id,
            action = %transition.audit_event.action.name,
            status = tournament.status.as_str(),
            "Persisted tournament transition"
        );

        Ok(PersistedTournament {
            event_id,
            tournament,
        })
    })
}

/// Inserts a new live tournament with the next sequence number.
fn insert_live(
    conn: &mut SqliteConnection,
    tournament: &Tournament,
) -> Result<Tournament, PersistenceError> {
    let sequence_number: i64 = next_sequence_number(conn)?;
    let row: TournamentRow = TournamentRow::from_tournament(tournament, sequence_number)?;

    diesel::insert_into(tournaments::table)
        .values(&row)
        .execute(conn)?;

    debug!(tournament_id = %tournament.id, sequence_number, "Inserted tournament");

    Ok(Tournament {
        sequence_number: Some(sequence_number),
        ..tournament.clone()
    })
}

fn update_live(
    conn: &mut SqliteConnection,
    tournament: &Tournament,
) -> Result<Tournament, PersistenceError> {
    let updated: usize = diesel::update(
        tournaments::table.filter(tournaments::tournament_id.eq(tournament.id.to_string())),
    )
    .set((
        tournaments::status.eq(tournament.status.as_str()),
        tournaments::recurring_template_status
            .eq(tournament.recurrence.map(|r| r.status.as_str())),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::TournamentNotFound(
            tournament.id.to_string(),
        ));
    }

    // The stored row carries the sequence number.
    find_live_row(conn, tournament.id)?
        .ok_or_else(|| PersistenceError::TournamentNotFound(tournament.id.to_string()))?
        .into_tournament()
}

/// Moves a live row into history, deleting its likes.
///
/// `row` is written as given, so callers pass the final state of the
/// tournament (with an ended template, for instance).
///
/// # Returns
///
/// The number of likes deleted.
///
/// # Errors
///
/// Returns an error if the live row does not exist or a write fails.
pub fn move_row_to_history(
    conn: &mut SqliteConnection,
    row: TournamentRow,
    history_status: TournamentStatus,
    reason: RemovalReason,
    deletion_reason: Option<String>,
    removed_at: String,
    removed_by: &str,
) -> Result<u32, PersistenceError> {
    let tournament_id: String = row.tournament_id.clone();

    diesel::insert_into(tournaments_history::table)
        .values(NewHistoryRow::from_live(
            row,
            history_status,
            reason,
            deletion_reason,
            removed_at,
            removed_by.to_string(),
        ))
        .execute(conn)?;

    let likes_removed: usize = diesel::delete(
        tournament_likes::table.filter(tournament_likes::tournament_id.eq(&tournament_id)),
    )
    .execute(conn)?;

    let deleted: usize =
        diesel::delete(tournaments::table.filter(tournaments::tournament_id.eq(&tournament_id)))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::TournamentNotFound(tournament_id));
    }

    to_u32(likes_removed, "like")
}

/// Moves the latest administrative deletion of a tournament back to the
/// live table and marks the history row as restored.
fn restore_from_history(
    conn: &mut SqliteConnection,
    tournament: &Tournament,
    now: OffsetDateTime,
) -> Result<Tournament, PersistenceError> {
    let history: HistoryRow = get_restorable_history_row(conn, tournament.id)?;

    if find_live_row(conn, tournament.id)?.is_some() {
        return Err(PersistenceError::ConstraintViolation(format!(
            "tournament {} is already live",
            tournament.id
        )));
    }

    let row: TournamentRow = TournamentRow::from_tournament(tournament, history.sequence_number)?;
    diesel::insert_into(tournaments::table)
        .values(&row)
        .execute(conn)?;

    diesel::update(
        tournaments_history::table.filter(tournaments_history::history_id.eq(history.history_id)),
    )
    .set(tournaments_history::restored_at.eq(timestamp_text(now)?))
    .execute(conn)?;

    debug!(
        tournament_id = %tournament.id,
        history_id = history.history_id,
        status = tournament.status.as_str(),
        "Restored tournament from history"
    );

    Ok(Tournament {
        sequence_number: Some(history.sequence_number),
        ..tournament.clone()
    })
}

/// Changes a master's template status on its live row, or on its latest
/// unrestored history row when the master has been archived.
///
/// # Errors
///
/// Returns `PersistenceError::TournamentNotFound` if no master row matches.
pub fn update_template_status(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
    status: TemplateStatus,
) -> Result<(), PersistenceError> {
    let id: String = tournament_id.to_string();

    let live_updated: usize = diesel::update(
        tournaments::table
            .filter(tournaments::tournament_id.eq(&id))
            .filter(tournaments::is_recurring_master.eq(1)),
    )
    .set(tournaments::recurring_template_status.eq(status.as_str()))
    .execute(conn)?;
    if live_updated > 0 {
        return Ok(());
    }

    let history_id: Option<i64> = tournaments_history::table
        .filter(tournaments_history::tournament_id.eq(&id))
        .filter(tournaments_history::is_recurring_master.eq(1))
        .filter(tournaments_history::restored_at.is_null())
        .order(tournaments_history::history_id.desc())
        .select(tournaments_history::history_id)
        .first::<i64>(conn)
        .optional()?;

    let Some(history_id) = history_id else {
        return Err(PersistenceError::TournamentNotFound(id));
    };

    diesel::update(tournaments_history::table.filter(tournaments_history::history_id.eq(history_id)))
        .set(tournaments_history::recurring_template_status.eq(status.as_str()))
        .execute(conn)?;

    Ok(())
}

/// Records a like. Liking twice is a no-op.
///
/// # Returns
///
/// True if a new like was recorded.
///
/// # Errors
///
/// Returns `PersistenceError::TournamentNotFound` unless the tournament is live.
pub fn like_tournament(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
    user_id: &str,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    if find_live_row(conn, tournament_id)?.is_none() {
        return Err(PersistenceError::TournamentNotFound(
            tournament_id.to_string(),
        ));
    }

    let inserted: usize = diesel::insert_or_ignore_into(tournament_likes::table)
        .values((
            tournament_likes::tournament_id.eq(tournament_id.to_string()),
            tournament_likes::user_id.eq(user_id),
            tournament_likes::liked_at.eq(timestamp_text(now)?),
        ))
        .execute(conn)?;

    Ok(inserted > 0)
}

/// Removes a like.
///
/// # Returns
///
/// True if a like was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn unlike_tournament(
    conn: &mut SqliteConnection,
    tournament_id: TournamentId,
    user_id: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        tournament_likes::table
            .filter(tournament_likes::tournament_id.eq(tournament_id.to_string()))
            .filter(tournament_likes::user_id.eq(user_id)),
    )
    .execute(conn)?;

    Ok(deleted > 0)
}
