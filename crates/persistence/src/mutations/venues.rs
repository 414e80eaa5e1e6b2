// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot::venue_created_audit_event;
use breakshot_audit::{Actor, AuditEvent, Cause};
use breakshot_domain::Venue;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewVenueRow;
use crate::diesel_schema::venues;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// Stores a new venue and its audit event.
///
/// # Returns
///
/// The stored venue (with its ID) and the audit event ID.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn create_venue(
    conn: &mut SqliteConnection,
    venue: &Venue,
    actor: Actor,
    cause: Cause,
) -> Result<(Venue, i64), PersistenceError> {
    conn.transaction::<(Venue, i64), PersistenceError, _>(|conn| {
        diesel::insert_into(venues::table)
            .values(NewVenueRow {
                name: &venue.name,
                city: &venue.city,
                region: venue.region.as_deref(),
                address: venue.address.as_deref(),
            })
            .execute(conn)?;
        let venue_id: i64 = conn.get_last_insert_rowid()?;

        let stored: Venue = Venue {
            venue_id: Some(venue_id),
            ..venue.clone()
        };
        let event: AuditEvent = venue_created_audit_event(actor, cause, &stored)?;
        let event_id: i64 = persist_audit_event(conn, &event)?;

        info!(venue_id, event_id, name = %stored.name, "Created venue");
        Ok((stored, event_id))
    })
}
