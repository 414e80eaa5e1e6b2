// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot::CoreError;
use breakshot_domain::DomainError;
use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A uniqueness or check constraint rejected the write.
    ConstraintViolation(String),
    /// The requested event was not found.
    EventNotFound(i64),
    /// No live tournament has this identifier.
    TournamentNotFound(String),
    /// No restorable history row exists for this tournament.
    HistoryNotFound(String),
    /// No live giveaway has this identifier.
    GiveawayNotFound(String),
    /// The requested venue was not found.
    VenueNotFound(i64),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// A giveaway entry failed its eligibility checks.
    EntryRejected(DomainError),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
}

impl PersistenceError {
    /// Returns true if the error reflects broken data rather than an
    /// unreachable store.
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation(_)
                | Self::ReconstructionError(_)
                | Self::SerializationError(_)
                | Self::TournamentNotFound(_)
                | Self::GiveawayNotFound(_)
                | Self::HistoryNotFound(_)
        )
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::TournamentNotFound(id) => write!(f, "Tournament not found: {id}"),
            Self::HistoryNotFound(id) => {
                write!(f, "No restorable history record for tournament {id}")
            }
            Self::GiveawayNotFound(id) => write!(f, "Giveaway not found: {id}"),
            Self::VenueNotFound(id) => write!(f, "Venue not found: {id}"),
            Self::ReconstructionError(msg) => write!(f, "Row reconstruction error: {msg}"),
            Self::EntryRejected(err) => write!(f, "Entry rejected: {err}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}
