// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::recurrence::{RecurrenceInterval, TemplateStatus};
use crate::status::TournamentStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

/// The role an actor holds when requesting a change.
///
/// Roles apply to whoever is acting (a person or the scheduler), never to
/// the tournaments themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Administrators review, approve, delete and restore.
    Admin,
    /// Directors submit and run tournaments at their venues.
    Director,
    /// Players browse, like and enter giveaways.
    Player,
    /// The maintenance scheduler.
    System,
}

impl ActorRole {
    /// Returns the string form used in requests and audit records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Director => "director",
            Self::Player => "player",
            Self::System => "system",
        }
    }
}

impl FromStr for ActorRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "director" => Ok(Self::Director),
            "player" => Ok(Self::Player),
            "system" => Ok(Self::System),
            _ => Err(DomainError::InvalidActorRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Stable identifier of a tournament, preserved across archival.
    TournamentId,
    "tournament"
);
uuid_id!(
    /// Identifier shared by every instance of one recurring series.
    SeriesId,
    "series"
);
uuid_id!(
    /// Stable identifier of a giveaway.
    GiveawayId,
    "giveaway"
);

/// The recurrence template carried by a recurring master tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceTemplate {
    /// How often instances occur.
    pub interval: RecurrenceInterval,
    /// Whether the template is still producing instances.
    pub status: TemplateStatus,
}

/// A billiards tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    /// Stable identifier.
    pub id: TournamentId,
    /// Human-readable sequence number; `None` until persisted.
    pub sequence_number: Option<i64>,
    /// Display name.
    pub name: String,
    /// Game played, e.g. "9-ball".
    pub game_type: String,
    /// Bracket format, e.g. "double elimination".
    pub format: String,
    /// Scheduled calendar date.
    pub start_date: Date,
    /// Scheduled wall-clock start time, if announced.
    pub start_time: Option<Time>,
    /// Hosting venue, if known.
    pub venue_id: Option<i64>,
    /// Entry fee in cents.
    pub fee_cents: i64,
    /// Equipment notes (cloth, balls, cues).
    pub equipment: Option<String>,
    /// Table size, e.g. "7ft".
    pub table_size: Option<String>,
    /// Player capacity.
    pub max_players: Option<u32>,
    /// Part of a recurring series.
    pub is_recurring: bool,
    /// The template row of its series.
    pub is_recurring_master: bool,
    /// Results are reported to the Fargo rating system.
    pub reports_to_fargo: bool,
    /// Open to all skill levels.
    pub is_open_tournament: bool,
    /// Lifecycle status.
    pub status: TournamentStatus,
    /// Series this tournament belongs to.
    pub recurring_series_id: Option<SeriesId>,
    /// Master template this instance was generated from.
    pub parent_recurring_tournament_id: Option<TournamentId>,
    /// Present only on recurring masters.
    pub recurrence: Option<RecurrenceTemplate>,
    /// The director who submitted it.
    pub director_id: String,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
}

impl Tournament {
    /// Builds a concrete instance of a recurring series on `start_date`,
    /// copying the master's template fields.
    ///
    /// Instances of an approved template are approved; otherwise they wait
    /// for review like any submission.
    #[must_use]
    pub fn instance_of(master: &Self, start_date: Date, created_at: OffsetDateTime) -> Self {
        let status: TournamentStatus = if master.status == TournamentStatus::Pending {
            TournamentStatus::Pending
        } else {
            TournamentStatus::Approved
        };

        Self {
            id: TournamentId::generate(),
            sequence_number: None,
            name: master.name.clone(),
            game_type: master.game_type.clone(),
            format: master.format.clone(),
            start_date,
            start_time: master.start_time,
            venue_id: master.venue_id,
            fee_cents: master.fee_cents,
            equipment: master.equipment.clone(),
            table_size: master.table_size.clone(),
            max_players: master.max_players,
            is_recurring: true,
            is_recurring_master: false,
            reports_to_fargo: master.reports_to_fargo,
            is_open_tournament: master.is_open_tournament,
            status,
            recurring_series_id: master.recurring_series_id,
            parent_recurring_tournament_id: Some(master.id),
            recurrence: None,
            director_id: master.director_id.clone(),
            created_at,
        }
    }

    /// Returns true if this master's template is still producing instances.
    #[must_use]
    pub fn is_generating_template(&self) -> bool {
        self.is_recurring_master
            && self
                .recurrence
                .is_some_and(|template| template.status == TemplateStatus::Active)
    }

    /// Short textual summary used in audit snapshots.
    #[must_use]
    pub fn to_snapshot_string(&self) -> String {
        format!(
            "id={},status={},start_date={},series={}",
            self.id,
            self.status,
            self.start_date,
            self.recurring_series_id
                .map_or_else(|| String::from("none"), |s| s.to_string())
        )
    }
}

/// A pool hall or bar hosting tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Database identifier; `None` until persisted.
    pub venue_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// State, province or region.
    pub region: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

impl Venue {
    /// Creates an unpersisted venue.
    #[must_use]
    pub const fn new(
        name: String,
        city: String,
        region: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            venue_id: None,
            name,
            city,
            region,
            address,
        }
    }
}
