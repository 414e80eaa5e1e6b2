// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot_audit::AuditEvent;
use breakshot_domain::{ActorRole, Giveaway, RemovalReason, TemplateStatus, Tournament};
use time::{Date, OffsetDateTime};

/// When and by whom a command is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyContext {
    /// The local calendar date.
    pub today: Date,
    /// The current instant.
    pub now: OffsetDateTime,
    /// The role of the acting party.
    pub role: ActorRole,
}

impl ApplyContext {
    /// Creates a new apply context.
    #[must_use]
    pub const fn new(today: Date, now: OffsetDateTime, role: ActorRole) -> Self {
        Self { today, now, role }
    }
}

/// How persistence must apply a tournament transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentEffect {
    /// Insert a new live row.
    Insert,
    /// Update the live row in place.
    Update,
    /// Move the live row to history, dropping its likes.
    MoveToHistory {
        /// The recorded removal reason.
        reason: RemovalReason,
        /// Free-text reason, present for deletions and denials.
        deletion_reason: Option<String>,
    },
    /// Move a deleted history row back to the live table.
    Restore,
    /// Change a master's template status wherever its row lives.
    UpdateTemplate {
        /// The new template status.
        status: TemplateStatus,
    },
}

/// The result of a successful tournament transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentTransition {
    /// The tournament after the transition.
    pub tournament: Tournament,
    /// How the change must be persisted.
    pub effect: TournamentEffect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful giveaway transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayTransition {
    /// The giveaway after the transition.
    pub giveaway: Giveaway,
    /// True when the giveaway is new and must be inserted.
    pub is_new: bool,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
