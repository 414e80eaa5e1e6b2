// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Giveaway mutations.

use breakshot::{GiveawayTransition, giveaway_entry_audit_event};
use breakshot_audit::{Actor, AuditEvent, Cause};
use breakshot_domain::{
    EntryAgreement, Giveaway, GiveawayEntry, GiveawayId, RemovalReason, validate_entry,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{
    ArchivedEntryRow, ArchivedGiveawayRow, EntryRow, GiveawayRow, NewEntryRow, flag,
    timestamp_text,
};
use crate::diesel_schema::{giveaway_entries, giveaway_entries_archive, giveaways, giveaways_archive};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::giveaways::{count_entries, get_giveaway, load_entry_rows};

/// Persists a giveaway transition and its audit event in one transaction.
///
/// # Returns
///
/// The audit event ID.
///
/// # Errors
///
/// Returns an error if any write fails, or `PersistenceError::GiveawayNotFound`
/// when updating a giveaway that is no longer live.
pub fn persist_giveaway_transition(
    conn: &mut SqliteConnection,
    transition: &GiveawayTransition,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;
        let giveaway: &Giveaway = &transition.giveaway;

        if transition.is_new {
            diesel::insert_into(giveaways::table)
                .values(GiveawayRow::from_giveaway(giveaway)?)
                .execute(conn)?;
        } else {
            let updated: usize = diesel::update(
                giveaways::table.filter(giveaways::giveaway_id.eq(giveaway.id.to_string())),
            )
            .set(giveaways::status.eq(giveaway.status.as_str()))
            .execute(conn)?;
            if updated == 0 {
                return Err(PersistenceError::GiveawayNotFound(giveaway.id.to_string()));
            }
        }

        info!(
            event_id,
            giveaway_id = %giveaway.id,
            status = giveaway.status.as_str(),
            "Persisted giveaway transition"
        );
        Ok(event_id)
    })
}

/// Enters a user into a giveaway.
///
/// The eligibility checks and the insert share one transaction, so two
/// concurrent entries cannot both pass a single-entry or entry-cap check.
///
/// # Errors
///
/// Returns `PersistenceError::EntryRejected` when an eligibility rule fails,
/// `PersistenceError::GiveawayNotFound` when the giveaway is not live, or an
/// error if a write fails.
pub fn enter_giveaway(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
    user_id: &str,
    agreement: EntryAgreement,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<GiveawayEntry, PersistenceError> {
    conn.transaction::<GiveawayEntry, PersistenceError, _>(|conn| {
        let giveaway: Giveaway = get_giveaway(conn, giveaway_id)?;
        let user_entries: u32 = count_entries(conn, giveaway_id, Some(user_id))?;
        let total_entries: u32 = count_entries(conn, giveaway_id, None)?;

        validate_entry(
            &giveaway,
            &agreement,
            user_id,
            user_entries,
            total_entries,
            now,
        )
        .map_err(PersistenceError::EntryRejected)?;

        diesel::insert_into(giveaway_entries::table)
            .values(NewEntryRow {
                giveaway_id: giveaway_id.to_string(),
                user_id: user_id.to_string(),
                entered_at: timestamp_text(now)?,
                is_of_age: flag(agreement.is_of_age),
                accepted_rules: flag(agreement.accepted_rules),
                accepted_privacy: flag(agreement.accepted_privacy),
            })
            .execute(conn)?;
        let entry_id: i64 = conn.get_last_insert_rowid()?;

        let entry: GiveawayEntry = GiveawayEntry {
            entry_id: Some(entry_id),
            giveaway_id,
            user_id: user_id.to_string(),
            entered_at: now,
            agreement,
        };

        let event: AuditEvent = giveaway_entry_audit_event(actor, cause, &entry, total_entries);
        let event_id: i64 = persist_audit_event(conn, &event)?;

        debug!(event_id, entry_id, giveaway_id = %giveaway_id, "Recorded giveaway entry");
        Ok(entry)
    })
}

/// Moves a live giveaway and all its entries into the archive tables.
///
/// Must run inside the caller's transaction.
///
/// # Returns
///
/// The number of entries archived.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn archive_giveaway_row(
    conn: &mut SqliteConnection,
    row: GiveawayRow,
    reason: RemovalReason,
    removed_at: &str,
) -> Result<u32, PersistenceError> {
    let giveaway_id: String = row.giveaway_id.clone();

    diesel::insert_into(giveaways_archive::table)
        .values(ArchivedGiveawayRow::from_live(
            row,
            reason,
            removed_at.to_string(),
        ))
        .execute(conn)?;

    let entries: Vec<EntryRow> = load_entry_rows(conn, &giveaway_id)?;
    let archived_entries: Vec<ArchivedEntryRow> = entries
        .into_iter()
        .map(|entry| ArchivedEntryRow::from_live(entry, reason, removed_at.to_string()))
        .collect();

    let copied: usize = if archived_entries.is_empty() {
        0
    } else {
        diesel::insert_into(giveaway_entries_archive::table)
            .values(&archived_entries)
            .execute(conn)?
    };

    let removed: usize = diesel::delete(
        giveaway_entries::table.filter(giveaway_entries::giveaway_id.eq(&giveaway_id)),
    )
    .execute(conn)?;

    if copied != removed {
        return Err(PersistenceError::ConstraintViolation(format!(
            "giveaway {giveaway_id}: copied {copied} entries but removed {removed}"
        )));
    }

    let deleted: usize =
        diesel::delete(giveaways::table.filter(giveaways::giveaway_id.eq(&giveaway_id)))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::GiveawayNotFound(giveaway_id));
    }

    copied
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("entry count {copied}")))
}
