// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament status tracking and transition policy.
//!
//! The policy is a pure function of the current status, the target status,
//! the tournament's start date, today's date and the role of the actor.
//! Archival is terminal: an archived tournament lives in history and never
//! changes status again.

use crate::error::DomainError;
use crate::types::ActorRole;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle states of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Submitted by a director, awaiting administrator review.
    Pending,
    /// Approved and publicly listed.
    Approved,
    /// Running today.
    Active,
    /// Moved to history after its date passed.
    Archived,
    /// Soft-deleted by an administrator, with a recorded reason.
    Deleted,
}

/// Every tournament status, in lifecycle order.
pub const ALL_TOURNAMENT_STATUSES: [TournamentStatus; 5] = [
    TournamentStatus::Pending,
    TournamentStatus::Approved,
    TournamentStatus::Active,
    TournamentStatus::Archived,
    TournamentStatus::Deleted,
];

/// Inputs the transition policy needs beyond the status pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionContext {
    /// The calendar date the decision is made on.
    pub today: Date,
    /// The tournament's scheduled date.
    pub start_date: Date,
    /// The role of the actor requesting the change.
    pub actor_role: ActorRole,
}

impl TransitionContext {
    /// Creates a new transition context.
    #[must_use]
    pub const fn new(today: Date, start_date: Date, actor_role: ActorRole) -> Self {
        Self {
            today,
            start_date,
            actor_role,
        }
    }

    fn date_has_passed(&self) -> bool {
        self.start_date < self.today
    }

    fn date_has_arrived(&self) -> bool {
        self.start_date <= self.today
    }
}

impl TournamentStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            _ => Err(DomainError::InvalidTournamentStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if no transition out of this status exists.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns true if a tournament in this status belongs in the live table.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Active)
    }

    /// Returns true if the archival trigger may pick this tournament up once
    /// its date has passed.
    #[must_use]
    pub const fn is_archivable(&self) -> bool {
        matches!(self, Self::Approved | Self::Active)
    }

    /// Returns the statuses reachable from this one under the given context.
    #[must_use]
    pub fn allowed_transitions(&self, ctx: &TransitionContext) -> Vec<Self> {
        ALL_TOURNAMENT_STATUSES
            .into_iter()
            .filter(|target| self.check(*target, ctx).is_ok())
            .collect()
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` naming the rejected
    /// pair if the transition is not allowed.
    pub fn validate_transition(
        &self,
        new_status: Self,
        ctx: &TransitionContext,
    ) -> Result<(), DomainError> {
        self.check(new_status, ctx)
            .map_err(|reason| DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: reason.to_string(),
            })
    }

    fn check(self, new_status: Self, ctx: &TransitionContext) -> Result<(), &'static str> {
        if self.is_terminal() {
            return Err("cannot transition from terminal state");
        }

        let admin = ctx.actor_role == ActorRole::Admin;
        let scheduler = admin || ctx.actor_role == ActorRole::System;

        match (self, new_status) {
            (Self::Pending, Self::Approved | Self::Deleted)
            | (Self::Approved | Self::Active, Self::Deleted)
            | (Self::Deleted, Self::Pending | Self::Approved) => {
                if admin {
                    Ok(())
                } else {
                    Err("requires the admin role")
                }
            }
            (Self::Approved, Self::Active) => match (scheduler, ctx.date_has_arrived()) {
                (false, _) => Err("requires the admin or system role"),
                (true, false) => Err("tournament date has not arrived"),
                (true, true) => Ok(()),
            },
            (Self::Approved | Self::Active, Self::Archived) => {
                match (scheduler, ctx.date_has_passed()) {
                    (false, _) => Err("requires the admin or system role"),
                    (true, false) => Err("tournament date has not passed"),
                    (true, true) => Ok(()),
                }
            }
            _ => Err("transition not permitted by status lifecycle rules"),
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record left its live table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// The scheduled date or entry window passed.
    Expired,
    /// An administrator deleted or denied it.
    AdminDeletion,
    /// An administrator archived or ended it by hand.
    Manual,
}

impl RemovalReason {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::AdminDeletion => "admin_deletion",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for RemovalReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expired" => Ok(Self::Expired),
            "admin_deletion" => Ok(Self::AdminDeletion),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::InvalidRemovalReason(s.to_string())),
        }
    }
}

impl std::fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
