// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use breakshot_domain::{ActorRole, DomainError, GiveawayId, SeriesId, TournamentId};
use std::str::FromStr;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an administrator, a director, a player or the maintenance scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "director", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an actor whose type is the given role.
    #[must_use]
    pub fn with_role(id: String, role: ActorRole) -> Self {
        Self::new(id, role.as_str().to_string())
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, maintenance run ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ApproveTournament`", "`ArchiveExpiredTournaments`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of the affected record at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot of a record that does not exist (before creation, after
    /// archival or deletion).
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("absent"))
    }
}

/// The kind of record an audit event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    /// A single tournament.
    Tournament,
    /// A recurring series as a whole.
    Series,
    /// A giveaway.
    Giveaway,
    /// A venue.
    Venue,
    /// A maintenance run.
    Maintenance,
}

impl SubjectKind {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tournament => "tournament",
            Self::Series => "series",
            Self::Giveaway => "giveaway",
            Self::Venue => "venue",
            Self::Maintenance => "maintenance",
        }
    }
}

impl FromStr for SubjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tournament" => Ok(Self::Tournament),
            "series" => Ok(Self::Series),
            "giveaway" => Ok(Self::Giveaway),
            "venue" => Ok(Self::Venue),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidIdentifier {
                kind: "subject kind",
                value: s.to_string(),
            }),
        }
    }
}

/// The record an audit event is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// What kind of record.
    pub kind: SubjectKind,
    /// The record's identifier in its textual form.
    pub id: String,
}

impl Subject {
    /// Creates a new Subject.
    #[must_use]
    pub const fn new(kind: SubjectKind, id: String) -> Self {
        Self { kind, id }
    }

    /// A tournament subject.
    #[must_use]
    pub fn tournament(id: TournamentId) -> Self {
        Self::new(SubjectKind::Tournament, id.to_string())
    }

    /// A recurring series subject.
    #[must_use]
    pub fn series(id: SeriesId) -> Self {
        Self::new(SubjectKind::Series, id.to_string())
    }

    /// A giveaway subject.
    #[must_use]
    pub fn giveaway(id: GiveawayId) -> Self {
        Self::new(SubjectKind::Giveaway, id.to_string())
    }

    /// A venue subject.
    #[must_use]
    pub fn venue(venue_id: i64) -> Self {
        Self::new(SubjectKind::Venue, venue_id.to_string())
    }

    /// A maintenance run subject.
    #[must_use]
    pub const fn maintenance(run_id: String) -> Self {
        Self::new(SubjectKind::Maintenance, run_id)
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
/// - Which record changed (subject)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The event ID assigned by persistence. `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The record that changed.
    pub subject: Subject,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `subject` - The record that changed
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        subject: Subject,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            subject,
        }
    }

    /// Creates an `AuditEvent` that has already been persisted.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        event_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        subject: Subject,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            actor,
            cause,
            action,
            before,
            after,
            subject,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn create_test_event() -> AuditEvent {
        AuditEvent::new(
            Actor::with_role(String::from("admin-1"), ActorRole::Admin),
            Cause::new(String::from("req-456"), String::from("Listing review")),
            Action::new(String::from("ApproveTournament"), None),
            StateSnapshot::new(String::from("status=pending")),
            StateSnapshot::new(String::from("status=approved")),
            Subject::new(SubjectKind::Tournament, String::from("t-1")),
        )
    }

    #[test]
    fn test_actor_with_role() {
        let actor: Actor = Actor::with_role(String::from("scheduler"), ActorRole::System);

        assert_eq!(actor.id, "scheduler");
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("DeleteTournament"),
            Some(String::from("duplicate listing")),
        );

        assert_eq!(action.name, "DeleteTournament");
        assert_eq!(action.details, Some(String::from("duplicate listing")));
    }

    #[test]
    fn test_new_event_is_unpersisted() {
        let event: AuditEvent = create_test_event();

        assert_eq!(event.event_id, None);
        assert_eq!(event.subject.kind, SubjectKind::Tournament);
        assert_eq!(event.before.data, "status=pending");
        assert_eq!(event.after.data, "status=approved");
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let event: AuditEvent = create_test_event();
        let persisted: AuditEvent = AuditEvent::with_id(
            12,
            event.actor.clone(),
            event.cause.clone(),
            event.action.clone(),
            event.before.clone(),
            event.after.clone(),
            event.subject.clone(),
        );

        assert_eq!(persisted.event_id, Some(12));
        assert_eq!(persisted.actor, event.actor);
        assert_eq!(persisted.subject, event.subject);
    }

    #[test]
    fn test_subject_constructors() {
        let series: SeriesId = SeriesId::generate();
        let subject: Subject = Subject::series(series);

        assert_eq!(subject.kind, SubjectKind::Series);
        assert_eq!(subject.id, series.to_string());
        assert_eq!(Subject::venue(4).id, "4");
        assert_eq!(StateSnapshot::absent().data, "absent");
    }

    #[test]
    fn test_subject_kind_parse() {
        for kind in [
            SubjectKind::Tournament,
            SubjectKind::Series,
            SubjectKind::Giveaway,
            SubjectKind::Venue,
            SubjectKind::Maintenance,
        ] {
            assert_eq!(kind.as_str().parse::<SubjectKind>(), Ok(kind));
        }
        assert!("operator".parse::<SubjectKind>().is_err());
    }
}
