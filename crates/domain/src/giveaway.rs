// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Giveaways, entries and their lifecycle.
//!
//! A giveaway accepts entries while it is `active` and its `end_at` has not
//! been reached. Once it expires or is ended by an administrator it becomes
//! eligible for archival, which moves it and every entry into the archive
//! tables.

use crate::error::DomainError;
use crate::status::RemovalReason;
use crate::types::{ActorRole, GiveawayId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle states of a giveaway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiveawayStatus {
    /// Accepting entries until `end_at`.
    Active,
    /// Closed by an administrator, awaiting archival.
    Ended,
    /// Moved to the archive tables.
    Archived,
}

impl GiveawayStatus {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
            Self::Archived => "archived",
        }
    }

    /// Returns true if no transition out of this status exists.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Validates a giveaway status change.
    ///
    /// - `active -> ended`: admin at any time, system once `end_at` passed
    /// - `active | ended -> archived`: admin or system, once `end_at` passed
    ///   or the giveaway was ended
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` naming the rejected pair.
    pub fn validate_transition(
        &self,
        new_status: Self,
        giveaway_end_at: OffsetDateTime,
        now: OffsetDateTime,
        actor_role: ActorRole,
    ) -> Result<(), DomainError> {
        let expired: bool = giveaway_end_at <= now;
        let scheduler: bool = matches!(actor_role, ActorRole::Admin | ActorRole::System);

        let verdict: Result<(), &'static str> = match (self, new_status) {
            (Self::Archived, _) => Err("cannot transition from terminal state"),
            (Self::Active, Self::Ended) => match (actor_role, expired) {
                (ActorRole::Admin, _) | (ActorRole::System, true) => Ok(()),
                (ActorRole::System, false) => Err("giveaway has not reached its end time"),
                _ => Err("requires the admin role"),
            },
            (Self::Active, Self::Archived) => match (scheduler, expired) {
                (false, _) => Err("requires the admin or system role"),
                (true, false) => Err("giveaway has not reached its end time"),
                (true, true) => Ok(()),
            },
            (Self::Ended, Self::Archived) => {
                if scheduler {
                    Ok(())
                } else {
                    Err("requires the admin or system role")
                }
            }
            _ => Err("transition not permitted by status lifecycle rules"),
        };

        verdict.map_err(|reason| DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl FromStr for GiveawayStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidGiveawayStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for GiveawayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prize giveaway players can enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Giveaway {
    /// Stable identifier.
    pub id: GiveawayId,
    /// Display title.
    pub title: String,
    /// Prize value in cents.
    pub prize_value_cents: i64,
    /// Free-form prize description.
    pub prize_details: Option<String>,
    /// When the entry window closes.
    pub end_at: OffsetDateTime,
    /// Each user may enter at most once.
    pub single_entry: bool,
    /// Cap on the total number of entries.
    pub maximum_entries: Option<u32>,
    /// Minimum entrant age, if restricted.
    pub minimum_age: Option<u32>,
    /// Lifecycle status.
    pub status: GiveawayStatus,
    /// The administrator who created it.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

impl Giveaway {
    /// Returns the removal reason archival would record for this giveaway,
    /// or `None` if it is not yet eligible.
    ///
    /// Expiry takes precedence over a manual end.
    #[must_use]
    pub fn archival_reason(&self, now: OffsetDateTime) -> Option<RemovalReason> {
        match self.status {
            GiveawayStatus::Archived => None,
            _ if self.end_at <= now => Some(RemovalReason::Expired),
            GiveawayStatus::Ended => Some(RemovalReason::Manual),
            GiveawayStatus::Active => None,
        }
    }

    /// Short textual summary used in audit snapshots.
    #[must_use]
    pub fn to_snapshot_string(&self) -> String {
        format!(
            "id={},status={},end_at={}",
            self.id, self.status, self.end_at
        )
    }
}

/// The agreements an entrant must give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct EntryAgreement {
    /// The entrant confirms the minimum age.
    pub is_of_age: bool,
    /// The entrant accepted the official rules.
    pub accepted_rules: bool,
    /// The entrant accepted the privacy policy.
    pub accepted_privacy: bool,
}

/// A single entry into a giveaway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayEntry {
    /// Database identifier; `None` until persisted.
    pub entry_id: Option<i64>,
    /// The giveaway entered.
    pub giveaway_id: GiveawayId,
    /// The entrant.
    pub user_id: String,
    /// When the entry was made.
    pub entered_at: OffsetDateTime,
    /// The agreements given with the entry.
    pub agreement: EntryAgreement,
}

/// Checks whether `user_id` may enter `giveaway` right now.
///
/// Checks run in a fixed order so callers see the first failing rule:
/// status, entry window, agreements, single entry, entry cap.
///
/// # Arguments
///
/// * `giveaway` - The giveaway being entered
/// * `agreement` - The agreements supplied with the entry
/// * `user_id` - The entrant
/// * `user_entry_count` - Entries this user already holds
/// * `total_entry_count` - Entries the giveaway already holds
/// * `now` - The current instant
///
/// # Errors
///
/// Returns the `DomainError` for the first rule that fails.
pub fn validate_entry(
    giveaway: &Giveaway,
    agreement: &EntryAgreement,
    user_id: &str,
    user_entry_count: u32,
    total_entry_count: u32,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if giveaway.status != GiveawayStatus::Active {
        return Err(DomainError::GiveawayNotOpen {
            status: giveaway.status.as_str().to_string(),
        });
    }

    if now >= giveaway.end_at {
        return Err(DomainError::GiveawayEntryWindowClosed);
    }

    if !agreement.is_of_age {
        return Err(DomainError::EntryAgreementMissing {
            agreement: "is_of_age",
        });
    }
    if !agreement.accepted_rules {
        return Err(DomainError::EntryAgreementMissing {
            agreement: "accepted_rules",
        });
    }
    if !agreement.accepted_privacy {
        return Err(DomainError::EntryAgreementMissing {
            agreement: "accepted_privacy",
        });
    }

    if giveaway.single_entry && user_entry_count > 0 {
        return Err(DomainError::DuplicateGiveawayEntry {
            user_id: user_id.to_string(),
        });
    }

    if let Some(maximum_entries) = giveaway.maximum_entries
        && total_entry_count >= maximum_entries
    {
        return Err(DomainError::GiveawayEntriesExhausted { maximum_entries });
    }

    Ok(())
}
