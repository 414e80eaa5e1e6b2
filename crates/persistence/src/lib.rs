// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Breakshot tournament directory.
//!
//! This crate stores tournaments, their history, likes, venues, giveaways
//! and audit events in `SQLite` through Diesel.
//!
//! ## Tables
//!
//! - `tournaments`: live tournaments (`pending`, `approved`, `active`)
//! - `tournaments_history`: `archived` and `deleted` tournaments
//! - `tournament_likes`: likes on live tournaments only
//! - `giveaways` / `giveaway_entries`: live giveaways
//! - `giveaways_archive` / `giveaway_entries_archive`: archived giveaways
//! - `audit_events`: one row per committed change
//!
//! ## Atomicity
//!
//! Every change and its audit event are written in one transaction. The
//! maintenance steps (tournament archival, recurrence generation, giveaway
//! archival) each run in a single transaction of their own.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which gives every call its own
//! shared in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use breakshot::{
    ArchiveGiveawaysReport, GiveawayTransition, SeriesGeneration, TournamentArchival,
    TournamentTransition,
};
use breakshot_audit::{Actor, AuditEvent, Cause, SubjectKind};
use breakshot_domain::{
    EntryAgreement, Giveaway, GiveawayEntry, GiveawayId, RemovalReason, Tournament, TournamentId,
    Venue,
};
use diesel::SqliteConnection;
use time::{Date, OffsetDateTime};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{ArchivedGiveaway, HistoryRecord};
pub use error::PersistenceError;
pub use mutations::PersistedTournament;
pub use queries::tournaments::TournamentFilter;

use backend::PersistenceBackend;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Tournaments
    // ========================================================================

    /// Persists a tournament transition with its audit event.
    ///
    /// # Arguments
    ///
    /// * `transition` - The transition produced by the core
    /// * `now` - Timestamp recorded on history moves and restores
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is committed then.
    pub fn persist_tournament_transition(
        &mut self,
        transition: &TournamentTransition,
        now: OffsetDateTime,
    ) -> Result<PersistedTournament, PersistenceError> {
        mutations::tournaments::persist_tournament_transition(&mut self.conn, transition, now)
    }

    /// Retrieves a live tournament.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TournamentNotFound` if it is not live.
    pub fn get_tournament(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<Tournament, PersistenceError> {
        queries::tournaments::get_tournament(&mut self.conn, tournament_id)
    }

    /// Retrieves a live tournament by sequence number.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no live tournament carries it.
    pub fn get_tournament_by_sequence(
        &mut self,
        sequence_number: i64,
    ) -> Result<Tournament, PersistenceError> {
        queries::tournaments::get_tournament_by_sequence(&mut self.conn, sequence_number)
    }

    /// Finds a tournament in the live table or, failing that, in history.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn find_tournament(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<Option<Tournament>, PersistenceError> {
        queries::tournaments::find_tournament(&mut self.conn, tournament_id)
    }

    /// Retrieves the deleted tournament a restore would bring back.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::HistoryNotFound` if there is none.
    pub fn get_restorable_tournament(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<HistoryRecord, PersistenceError> {
        queries::tournaments::get_restorable_history_row(&mut self.conn, tournament_id)?
            .into_record()
    }

    /// Lists live tournaments matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tournaments(
        &mut self,
        filter: &TournamentFilter,
    ) -> Result<Vec<Tournament>, PersistenceError> {
        queries::tournaments::list_tournaments(&mut self.conn, filter)
    }

    /// Lists history records, newest first, optionally for one reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_history(
        &mut self,
        reason: Option<RemovalReason>,
    ) -> Result<Vec<HistoryRecord>, PersistenceError> {
        queries::tournaments::list_history(&mut self.conn, reason)
    }

    /// Records a like on a live tournament.
    ///
    /// # Returns
    ///
    /// True if the like is new.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TournamentNotFound` unless the tournament is live.
    pub fn like_tournament(
        &mut self,
        tournament_id: TournamentId,
        user_id: &str,
        now: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::tournaments::like_tournament(&mut self.conn, tournament_id, user_id, now)
    }

    /// Removes a like.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn unlike_tournament(
        &mut self,
        tournament_id: TournamentId,
        user_id: &str,
    ) -> Result<bool, PersistenceError> {
        mutations::tournaments::unlike_tournament(&mut self.conn, tournament_id, user_id)
    }

    /// Counts the likes on a live tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_likes(&mut self, tournament_id: TournamentId) -> Result<u32, PersistenceError> {
        queries::tournaments::count_likes(&mut self.conn, tournament_id)
    }

    // ========================================================================
    // Venues
    // ========================================================================

    /// Stores a venue with its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_venue(
        &mut self,
        venue: &Venue,
        actor: Actor,
        cause: Cause,
    ) -> Result<(Venue, i64), PersistenceError> {
        mutations::venues::create_venue(&mut self.conn, venue, actor, cause)
    }

    /// Retrieves a venue.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VenueNotFound` if it does not exist.
    pub fn get_venue(&mut self, venue_id: i64) -> Result<Venue, PersistenceError> {
        queries::venues::get_venue(&mut self.conn, venue_id)
    }

    /// Lists all venues.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_venues(&mut self) -> Result<Vec<Venue>, PersistenceError> {
        queries::venues::list_venues(&mut self.conn)
    }

    // ========================================================================
    // Giveaways
    // ========================================================================

    /// Persists a giveaway transition with its audit event.
    ///
    /// # Returns
    ///
    /// The audit event ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_giveaway_transition(
        &mut self,
        transition: &GiveawayTransition,
    ) -> Result<i64, PersistenceError> {
        mutations::giveaways::persist_giveaway_transition(&mut self.conn, transition)
    }

    /// Retrieves a live giveaway.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::GiveawayNotFound` if it is not live.
    pub fn get_giveaway(&mut self, giveaway_id: GiveawayId) -> Result<Giveaway, PersistenceError> {
        queries::giveaways::get_giveaway(&mut self.conn, giveaway_id)
    }

    /// Lists live giveaways.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_giveaways(&mut self) -> Result<Vec<Giveaway>, PersistenceError> {
        queries::giveaways::list_giveaways(&mut self.conn)
    }

    /// Lists the entries of a live giveaway.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_giveaway_entries(
        &mut self,
        giveaway_id: GiveawayId,
    ) -> Result<Vec<GiveawayEntry>, PersistenceError> {
        queries::giveaways::list_entries(&mut self.conn, giveaway_id)
    }

    /// Retrieves an archived giveaway.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_archived_giveaway(
        &mut self,
        giveaway_id: GiveawayId,
    ) -> Result<Option<ArchivedGiveaway>, PersistenceError> {
        queries::giveaways::find_archived_giveaway(&mut self.conn, giveaway_id)
    }

    /// Enters a user into a giveaway, checking eligibility atomically.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EntryRejected` if the entry is not allowed.
    pub fn enter_giveaway(
        &mut self,
        giveaway_id: GiveawayId,
        user_id: &str,
        agreement: EntryAgreement,
        now: OffsetDateTime,
        actor: Actor,
        cause: Cause,
    ) -> Result<GiveawayEntry, PersistenceError> {
        mutations::giveaways::enter_giveaway(
            &mut self.conn,
            giveaway_id,
            user_id,
            agreement,
            now,
            actor,
            cause,
        )
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Archives every approved or active tournament dated before `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails. Nothing is committed then.
    pub fn archive_expired_tournaments(
        &mut self,
        today: Date,
        now: OffsetDateTime,
        actor: Actor,
        cause: Cause,
    ) -> Result<TournamentArchival, PersistenceError> {
        mutations::maintenance::archive_expired_tournaments(&mut self.conn, today, now, actor, cause)
    }

    /// Tops up every generating series to `horizon` future instances.
    ///
    /// A series that fails is rolled back alone and reported as failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the masters cannot be listed.
    pub fn generate_recurring_horizon(
        &mut self,
        today: Date,
        horizon: usize,
        now: OffsetDateTime,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<SeriesGeneration>, PersistenceError> {
        mutations::maintenance::generate_recurring_horizon(
            &mut self.conn,
            today,
            horizon,
            now,
            actor,
            cause,
        )
    }

    /// Archives every expired or ended giveaway with its entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails. Nothing is committed then.
    pub fn archive_expired_giveaways(
        &mut self,
        now: OffsetDateTime,
        actor: Actor,
        cause: Cause,
    ) -> Result<ArchiveGiveawaysReport, PersistenceError> {
        mutations::maintenance::archive_expired_giveaways(&mut self.conn, now, actor, cause)
    }

    // ========================================================================
    // Audit Events
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves every audit event for a subject, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_events_for_subject(
        &mut self,
        kind: SubjectKind,
        subject_id: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_events_for_subject(&mut self.conn, kind, subject_id)
    }

    /// Retrieves the most recent audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_recent_audit_events(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_recent_audit_events(&mut self.conn, limit)
    }
}
