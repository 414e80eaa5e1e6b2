// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maintenance steps.
//!
//! Archival steps run in a single transaction: either every qualifying row
//! is moved (with its audit event) or nothing is. Recurrence generation
//! commits series by series. Which rows qualify is decided by the core
//! selection functions, not by SQL predicates.

use std::collections::{BTreeMap, BTreeSet};

use breakshot::{
    ArchiveGiveawaysReport, SeriesGeneration, TournamentArchival, giveaway_archival_audit_event,
    plan_recurrence, select_expired_giveaways, select_expired_tournaments,
    series_generation_audit_event, tournament_archival_audit_event,
};
use breakshot_audit::{Actor, Cause};
use breakshot_domain::{
    Giveaway, RemovalReason, SeriesId, Tournament, TournamentId, TournamentStatus,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::data_models::{GiveawayRow, TournamentRow, timestamp_text};
use crate::diesel_schema::tournaments;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::giveaways::archive_giveaway_row;
use crate::mutations::tournaments::move_row_to_history;
use crate::queries::giveaways::load_giveaway_rows;
use crate::queries::tournaments::{
    future_series_dates, list_archivable_rows, list_generating_masters, next_sequence_number,
    withdrawn_series_dates,
};

fn to_u32(count: usize) -> Result<u32, PersistenceError> {
    count
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("count {count}")))
}

/// Moves every approved or active tournament dated before `today` into
/// history with reason `expired`, deleting its likes.
///
/// Masters are archived like any other tournament; their template status is
/// left untouched.
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is committed in that case.
pub fn archive_expired_tournaments(
    conn: &mut SqliteConnection,
    today: Date,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TournamentArchival, PersistenceError> {
    conn.transaction::<TournamentArchival, PersistenceError, _>(|conn| {
        let rows: Vec<TournamentRow> = list_archivable_rows(conn)?;
        let candidates: Vec<Tournament> = rows
            .iter()
            .cloned()
            .map(TournamentRow::into_tournament)
            .collect::<Result<Vec<Tournament>, PersistenceError>>()?;

        let expired: Vec<TournamentId> = select_expired_tournaments(&candidates, today);
        if expired.is_empty() {
            debug!(%today, "No expired tournaments to archive");
            return Ok(TournamentArchival::default());
        }

        let expired_ids: BTreeSet<String> = expired.iter().map(ToString::to_string).collect();
        let removed_at: String = timestamp_text(now)?;
        let mut likes_removed: u32 = 0;

        for row in rows
            .into_iter()
            .filter(|row| expired_ids.contains(&row.tournament_id))
        {
            let removed: u32 = move_row_to_history(
                conn,
                row,
                TournamentStatus::Archived,
                RemovalReason::Expired,
                None,
                removed_at.clone(),
                &actor.id,
            )?;
            likes_removed = likes_removed.saturating_add(removed);
        }

        let archived_count: u32 = to_u32(expired.len())?;
        let event_id: i64 = persist_audit_event(
            conn,
            &tournament_archival_audit_event(actor, cause, &expired, likes_removed),
        )?;

        info!(
            event_id,
            archived_count,
            likes_removed,
            %today,
            "Archived expired tournaments"
        );

        Ok(TournamentArchival {
            archived_count,
            likes_removed,
        })
    })
}

/// Tops up every generating series to `horizon` future instances.
///
/// Masters are read from the live table and from history, so an archived
/// master keeps its series going. Inserts that collide with an existing
/// instance on the same date are ignored, so a repeated run creates nothing.
/// Dates whose instance an admin deleted are stepped over until the
/// instance is restored.
///
/// Each series runs in its own savepoint. A series that fails is rolled back
/// on its own and reported with the error in its `message`; the others are
/// kept.
///
/// # Errors
///
/// Returns an error if the masters cannot be listed. Nothing is committed in
/// that case.
pub fn generate_recurring_horizon(
    conn: &mut SqliteConnection,
    today: Date,
    horizon: usize,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<Vec<SeriesGeneration>, PersistenceError> {
    conn.transaction::<Vec<SeriesGeneration>, PersistenceError, _>(|conn| {
        let masters: Vec<Tournament> = list_generating_masters(conn)?;
        let mut report: Vec<SeriesGeneration> = Vec::with_capacity(masters.len());

        for master in &masters {
            let Some(series_id) = master.recurring_series_id else {
                continue;
            };

            let outcome: Result<SeriesGeneration, PersistenceError> = conn
                .transaction::<SeriesGeneration, PersistenceError, _>(|conn| {
                    generate_series(conn, master, series_id, today, horizon, now, &actor, &cause)
                });

            match outcome {
                Ok(generation) => report.push(generation),
                Err(err) => {
                    warn!(%series_id, error = %err, "Recurring generation rolled back for series");
                    report.push(SeriesGeneration::failed(series_id, &err.to_string()));
                }
            }
        }

        let total: u32 = report
            .iter()
            .fold(0_u32, |acc, s| acc.saturating_add(s.tournaments_created));
        info!(
            series = report.len(),
            created = total,
            horizon,
            "Recurring horizon refreshed"
        );

        Ok(report)
    })
}

/// Plans, inserts and audits the missing instances of one series.
#[allow(clippy::too_many_arguments)]
fn generate_series(
    conn: &mut SqliteConnection,
    master: &Tournament,
    series_id: SeriesId,
    today: Date,
    horizon: usize,
    now: OffsetDateTime,
    actor: &Actor,
    cause: &Cause,
) -> Result<SeriesGeneration, PersistenceError> {
    let existing: Vec<Date> = future_series_dates(conn, series_id, today)?;
    let withdrawn: Vec<Date> = withdrawn_series_dates(conn, series_id, today)?;
    let planned: Vec<Tournament> =
        plan_recurrence(master, &existing, &withdrawn, today, horizon, now)?;
    let created: Vec<Date> = insert_instances(conn, &planned)?;

    if !created.is_empty() {
        persist_audit_event(
            conn,
            &series_generation_audit_event(
                actor.clone(),
                cause.clone(),
                series_id,
                existing.len(),
                &created,
            ),
        )?;
    }

    debug!(
        %series_id,
        existing = existing.len(),
        withdrawn = withdrawn.len(),
        planned = planned.len(),
        created = created.len(),
        "Generated recurring instances"
    );

    Ok(SeriesGeneration::new(
        series_id,
        planned.len(),
        to_u32(created.len())?,
    ))
}

/// Inserts planned instances, skipping any whose series already has a
/// tournament on that date.
///
/// # Returns
///
/// The dates actually inserted.
fn insert_instances(
    conn: &mut SqliteConnection,
    planned: &[Tournament],
) -> Result<Vec<Date>, PersistenceError> {
    let mut created: Vec<Date> = Vec::with_capacity(planned.len());

    for instance in planned {
        let sequence_number: i64 = next_sequence_number(conn)?;
        let row: TournamentRow = TournamentRow::from_tournament(instance, sequence_number)?;

        let inserted: usize = diesel::insert_or_ignore_into(tournaments::table)
            .values(&row)
            .execute(conn)?;
        if inserted > 0 {
            created.push(instance.start_date);
        }
    }

    Ok(created)
}

/// Moves every expired or ended giveaway, with all its entries, into the
/// archive tables.
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is committed in that case.
pub fn archive_expired_giveaways(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<ArchiveGiveawaysReport, PersistenceError> {
    conn.transaction::<ArchiveGiveawaysReport, PersistenceError, _>(|conn| {
        let rows: Vec<GiveawayRow> = load_giveaway_rows(conn)?;
        let giveaways: Vec<Giveaway> = rows
            .iter()
            .cloned()
            .map(GiveawayRow::into_giveaway)
            .collect::<Result<Vec<Giveaway>, PersistenceError>>()?;

        let reasons: BTreeMap<String, RemovalReason> = select_expired_giveaways(&giveaways, now)
            .into_iter()
            .map(|(id, reason)| (id.to_string(), reason))
            .collect();
        if reasons.is_empty() {
            debug!("No giveaways to archive");
            return Ok(ArchiveGiveawaysReport::default());
        }

        let removed_at: String = timestamp_text(now)?;
        let mut report: ArchiveGiveawaysReport = ArchiveGiveawaysReport::default();

        for row in rows {
            let Some(reason) = reasons.get(&row.giveaway_id).copied() else {
                continue;
            };
            let entries: u32 = archive_giveaway_row(conn, row, reason, &removed_at)?;
            report.archived_giveaways_count = report.archived_giveaways_count.saturating_add(1);
            report.archived_entries_count = report.archived_entries_count.saturating_add(entries);
        }

        let event_id: i64 =
            persist_audit_event(conn, &giveaway_archival_audit_event(actor, cause, &report))?;

        info!(
            event_id,
            archived_giveaways = report.archived_giveaways_count,
            archived_entries = report.archived_entries_count,
            "Archived expired giveaways"
        );

        Ok(report)
    })
}

