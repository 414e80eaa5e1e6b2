// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The tournament status string is not recognized.
    InvalidTournamentStatus {
        /// The rejected value.
        status: String,
    },
    /// The giveaway status string is not recognized.
    InvalidGiveawayStatus {
        /// The rejected value.
        status: String,
    },
    /// The removal reason string is not recognized.
    InvalidRemovalReason(String),
    /// The recurrence interval string is not recognized.
    InvalidRecurrenceInterval(String),
    /// The template status string is not recognized.
    InvalidTemplateStatus(String),
    /// The actor role string is not recognized.
    InvalidActorRole(String),
    /// A status transition was requested that the lifecycle does not permit.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the pair was rejected.
        reason: String,
    },
    /// A tournament field failed validation.
    InvalidTournamentField {
        /// The field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A giveaway field failed validation.
    InvalidGiveawayField {
        /// The field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A venue field failed validation.
    InvalidVenueField {
        /// The field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Deletion and denial require a non-empty reason.
    MissingDeletionReason,
    /// An identifier could not be parsed.
    InvalidIdentifier {
        /// The kind of identifier.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The giveaway does not accept entries in its current status.
    GiveawayNotOpen {
        /// The giveaway's current status.
        status: String,
    },
    /// The giveaway entry window has closed.
    GiveawayEntryWindowClosed,
    /// A required entry agreement was not given.
    EntryAgreementMissing {
        /// The agreement that was missing.
        agreement: &'static str,
    },
    /// The user has already entered a single-entry giveaway.
    DuplicateGiveawayEntry {
        /// The user who attempted to enter again.
        user_id: String,
    },
    /// The giveaway has reached its maximum number of entries.
    GiveawayEntriesExhausted {
        /// The configured cap.
        maximum_entries: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTournamentStatus { status } => {
                write!(f, "Invalid tournament status: {status}")
            }
            Self::InvalidGiveawayStatus { status } => {
                write!(f, "Invalid giveaway status: {status}")
            }
            Self::InvalidRemovalReason(value) => write!(f, "Invalid removal reason: {value}"),
            Self::InvalidRecurrenceInterval(value) => {
                write!(f, "Invalid recurrence interval: {value}")
            }
            Self::InvalidTemplateStatus(value) => write!(f, "Invalid template status: {value}"),
            Self::InvalidActorRole(value) => write!(f, "Invalid actor role: {value}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidTournamentField { field, reason } => {
                write!(f, "Invalid tournament field '{field}': {reason}")
            }
            Self::InvalidGiveawayField { field, reason } => {
                write!(f, "Invalid giveaway field '{field}': {reason}")
            }
            Self::InvalidVenueField { field, reason } => {
                write!(f, "Invalid venue field '{field}': {reason}")
            }
            Self::MissingDeletionReason => {
                write!(f, "A reason is required when deleting or denying a tournament")
            }
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::GiveawayNotOpen { status } => {
                write!(f, "Giveaway is not accepting entries (status: {status})")
            }
            Self::GiveawayEntryWindowClosed => write!(f, "Giveaway entry window has closed"),
            Self::EntryAgreementMissing { agreement } => {
                write!(f, "Entry requires agreement: {agreement}")
            }
            Self::DuplicateGiveawayEntry { user_id } => {
                write!(f, "User '{user_id}' has already entered this giveaway")
            }
            Self::GiveawayEntriesExhausted { maximum_entries } => {
                write!(
                    f,
                    "Giveaway has reached its maximum of {maximum_entries} entries"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
