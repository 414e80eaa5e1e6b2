// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Giveaway and entry queries.

use breakshot_domain::{Giveaway, GiveawayEntry, GiveawayId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::{ArchivedGiveaway, ArchivedGiveawayRow, EntryRow, GiveawayRow};
use crate::diesel_schema::{giveaway_entries, giveaway_entries_archive, giveaways, giveaways_archive};
use crate::error::PersistenceError;

fn to_count(count: i64) -> Result<u32, PersistenceError> {
    count
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("entry count {count}")))
}

/// Retrieves the live row for a giveaway, if there is one.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_giveaway_row(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
) -> Result<Option<GiveawayRow>, PersistenceError> {
    Ok(giveaways::table
        .filter(giveaways::giveaway_id.eq(giveaway_id.to_string()))
        .select(GiveawayRow::as_select())
        .first::<GiveawayRow>(conn)
        .optional()?)
}

/// Retrieves a live giveaway.
///
/// # Errors
///
/// Returns `PersistenceError::GiveawayNotFound` if it is not live.
pub fn get_giveaway(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
) -> Result<Giveaway, PersistenceError> {
    find_giveaway_row(conn, giveaway_id)?
        .ok_or_else(|| PersistenceError::GiveawayNotFound(giveaway_id.to_string()))?
        .into_giveaway()
}

/// Lists live giveaways, soonest ending first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_giveaways(conn: &mut SqliteConnection) -> Result<Vec<Giveaway>, PersistenceError> {
    load_giveaway_rows(conn)?
        .into_iter()
        .map(GiveawayRow::into_giveaway)
        .collect()
}

/// Loads every live giveaway row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_giveaway_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<GiveawayRow>, PersistenceError> {
    Ok(giveaways::table
        .order((giveaways::end_at.asc(), giveaways::giveaway_id.asc()))
        .select(GiveawayRow::as_select())
        .load::<GiveawayRow>(conn)?)
}

/// Loads the entry rows of a live giveaway in entry order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_entry_rows(
    conn: &mut SqliteConnection,
    giveaway_id: &str,
) -> Result<Vec<EntryRow>, PersistenceError> {
    Ok(giveaway_entries::table
        .filter(giveaway_entries::giveaway_id.eq(giveaway_id))
        .order(giveaway_entries::entry_id.asc())
        .select(EntryRow::as_select())
        .load::<EntryRow>(conn)?)
}

/// Lists the entries of a live giveaway.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_entries(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
) -> Result<Vec<GiveawayEntry>, PersistenceError> {
    load_entry_rows(conn, &giveaway_id.to_string())?
        .into_iter()
        .map(EntryRow::into_entry)
        .collect()
}

/// Counts a giveaway's entries, optionally only those of one user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_entries(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
    user_id: Option<&str>,
) -> Result<u32, PersistenceError> {
    let mut query = giveaway_entries::table
        .filter(giveaway_entries::giveaway_id.eq(giveaway_id.to_string()))
        .into_boxed();
    if let Some(user_id) = user_id {
        query = query.filter(giveaway_entries::user_id.eq(user_id));
    }

    to_count(query.count().get_result::<i64>(conn)?)
}

/// Retrieves an archived giveaway with the number of entries archived with it.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn find_archived_giveaway(
    conn: &mut SqliteConnection,
    giveaway_id: GiveawayId,
) -> Result<Option<ArchivedGiveaway>, PersistenceError> {
    let Some(row) = giveaways_archive::table
        .filter(giveaways_archive::giveaway_id.eq(giveaway_id.to_string()))
        .select(ArchivedGiveawayRow::as_select())
        .first::<ArchivedGiveawayRow>(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let entry_count: u32 = to_count(
        giveaway_entries_archive::table
            .filter(giveaway_entries_archive::giveaway_id.eq(giveaway_id.to_string()))
            .count()
            .get_result::<i64>(conn)?,
    )?;

    row.into_archived(entry_count).map(Some)
}
