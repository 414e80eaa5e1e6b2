// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use breakshot::CoreError;
use breakshot_domain::DomainError;
use breakshot_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTournamentStatus { status } => {
            invalid("status", format!("Unknown tournament status '{status}'"))
        }
        DomainError::InvalidGiveawayStatus { status } => {
            invalid("status", format!("Unknown giveaway status '{status}'"))
        }
        DomainError::InvalidRemovalReason(value) => {
            invalid("removal_reason", format!("Unknown removal reason '{value}'"))
        }
        DomainError::InvalidRecurrenceInterval(value) => invalid(
            "recurrence_interval",
            format!("Unknown interval '{value}'. Use weekly, biweekly or monthly"),
        ),
        DomainError::InvalidTemplateStatus(value) => invalid(
            "template_status",
            format!("Unknown template status '{value}'. Use active, paused or ended"),
        ),
        DomainError::InvalidActorRole(value) => {
            invalid("actor_role", format!("Unknown actor role '{value}'"))
        }
        DomainError::InvalidStatusTransition { from, to, reason } => rule(
            "status_transition",
            format!("Cannot move from {from} to {to}: {reason}"),
        ),
        DomainError::InvalidTournamentField { field, reason }
        | DomainError::InvalidGiveawayField { field, reason }
        | DomainError::InvalidVenueField { field, reason } => invalid(field, reason),
        DomainError::MissingDeletionReason => invalid(
            "reason",
            String::from("A reason is required to delete or deny a tournament"),
        ),
        DomainError::InvalidIdentifier { kind, value } => {
            invalid(kind, format!("'{value}' is not a valid {kind} id"))
        }
        DomainError::InvalidTimezone(name) => {
            invalid("timezone", format!("Unknown timezone '{name}'"))
        }
        DomainError::DateParseError { date_string, error } => invalid(
            "date",
            format!("Failed to parse date '{date_string}': {error}"),
        ),
        DomainError::DateArithmeticOverflow { operation } => invalid(
            "date",
            format!("Date arithmetic overflow while {operation}"),
        ),
        DomainError::GiveawayNotOpen { status } => rule(
            "giveaway_open",
            format!("Giveaway is {status} and does not accept entries"),
        ),
        DomainError::GiveawayEntryWindowClosed => rule(
            "giveaway_entry_window",
            String::from("The giveaway has reached its end time"),
        ),
        DomainError::EntryAgreementMissing { agreement } => invalid(
            agreement,
            format!("Entry requires '{agreement}' to be accepted"),
        ),
        DomainError::DuplicateGiveawayEntry { user_id } => rule(
            "single_entry",
            format!("User '{user_id}' has already entered this giveaway"),
        ),
        DomainError::GiveawayEntriesExhausted { maximum_entries } => rule(
            "maximum_entries",
            format!("The giveaway is full ({maximum_entries} entries)"),
        ),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::MissingCurrentState { command } => ApiError::Internal {
            message: format!("{command} was applied without its current record"),
        },
        CoreError::UnexpectedCurrentState { command } => rule(
            "already_exists",
            format!("{command} cannot be applied to an existing record"),
        ),
        CoreError::NotRecurringMaster(id) => rule(
            "recurring_master",
            format!("Tournament {id} is not a recurring master"),
        ),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records become `ResourceNotFound`; rejected giveaway entries keep
/// their domain meaning. Everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TournamentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Tournament"),
            message: format!("No live tournament with id {id}"),
        },
        PersistenceError::HistoryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Deleted tournament"),
            message: format!("Tournament {id} has no deletion to restore"),
        },
        PersistenceError::GiveawayNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Giveaway"),
            message: format!("No live giveaway with id {id}"),
        },
        PersistenceError::VenueNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Venue"),
            message: format!("Venue {id} does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} does not exist"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: what,
        },
        PersistenceError::EntryRejected(domain_err) => translate_domain_error(domain_err),
        PersistenceError::ConstraintViolation(msg) => rule("storage_constraint", msg),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_rejection_keeps_domain_meaning() {
        let err = translate_persistence_error(PersistenceError::EntryRejected(
            DomainError::GiveawayEntriesExhausted { maximum_entries: 5 },
        ));
        assert!(matches!(
            err,
            ApiError::DomainRuleViolation { ref rule, .. } if rule == "maximum_entries"
        ));
    }

    #[test]
    fn test_missing_history_is_not_found() {
        let err = translate_persistence_error(PersistenceError::HistoryNotFound(String::from(
            "abc",
        )));
        assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_field_errors_name_the_field() {
        let err = translate_domain_error(DomainError::InvalidTournamentField {
            field: "fee_cents",
            reason: String::from("must not be negative, got -5"),
        });
        assert_eq!(
            err,
            ApiError::InvalidInput {
                field: String::from("fee_cents"),
                message: String::from("must not be negative, got -5"),
            }
        );
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = translate_persistence_error(PersistenceError::DatabaseError(String::from(
            "disk I/O error",
        )));
        assert_eq!(err.to_string(), "Internal error: Database error: disk I/O error");
    }
}
