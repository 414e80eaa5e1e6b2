// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot_domain::Venue;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::VenueRow;
use crate::diesel_schema::venues;
use crate::error::PersistenceError;

/// Retrieves a venue by ID.
///
/// # Errors
///
/// Returns `PersistenceError::VenueNotFound` if it does not exist.
pub fn get_venue(conn: &mut SqliteConnection, venue_id: i64) -> Result<Venue, PersistenceError> {
    venues::table
        .filter(venues::venue_id.eq(venue_id))
        .select(VenueRow::as_select())
        .first::<VenueRow>(conn)
        .optional()?
        .map(Venue::from)
        .ok_or(PersistenceError::VenueNotFound(venue_id))
}

/// Lists venues by city, then name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_venues(conn: &mut SqliteConnection) -> Result<Vec<Venue>, PersistenceError> {
    let rows: Vec<VenueRow> = venues::table
        .order((venues::city.asc(), venues::name.asc()))
        .select(VenueRow::as_select())
        .load::<VenueRow>(conn)?;

    Ok(rows.into_iter().map(Venue::from).collect())
}
