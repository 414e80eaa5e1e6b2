// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maintenance planning and typed maintenance outcomes.
//!
//! Maintenance runs three steps in order: tournament archival, recurrence
//! generation, giveaway archival. The functions here decide *what* each
//! step does; persistence applies the plan inside a single transaction per
//! step.

use crate::error::CoreError;
use breakshot_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use breakshot_domain::{
    ActorRole, Giveaway, GiveawayId, RemovalReason, SeriesId, Tournament, TournamentId,
    TournamentStatus, TransitionContext, plan_series_dates,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Selects the live tournaments the archival trigger must move to history.
///
/// A tournament qualifies when it is `approved` or `active` and the policy
/// lets the scheduler archive it today (its date has passed).
#[must_use]
pub fn select_expired_tournaments(live: &[Tournament], today: Date) -> Vec<TournamentId> {
    live.iter()
        .filter(|t| t.status.is_archivable())
        .filter(|t| {
            let ctx: TransitionContext = TransitionContext::new(today, t.start_date, ActorRole::System);
            t.status
                .validate_transition(TournamentStatus::Archived, &ctx)
                .is_ok()
        })
        .map(|t| t.id)
        .collect()
}

/// Selects the giveaways the archival trigger must move to the archive,
/// with the reason each one records.
#[must_use]
pub fn select_expired_giveaways(
    giveaways: &[Giveaway],
    now: OffsetDateTime,
) -> Vec<(GiveawayId, RemovalReason)> {
    giveaways
        .iter()
        .filter_map(|g| g.archival_reason(now).map(|reason| (g.id, reason)))
        .collect()
}

/// Builds the instances a series still needs to reach `horizon` future
/// instances.
///
/// Returns an empty plan for masters whose template is not active.
///
/// # Arguments
///
/// * `master` - The series master, live or archived
/// * `existing_future` - Dates of the series' live instances on or after `today`
/// * `withdrawn` - Future dates whose instances an admin deleted
/// * `today` - The local calendar date
/// * `horizon` - Required number of future instances
/// * `now` - Creation timestamp for the new instances
///
/// # Errors
///
/// Returns an error if recurrence date arithmetic fails.
pub fn plan_recurrence(
    master: &Tournament,
    existing_future: &[Date],
    withdrawn: &[Date],
    today: Date,
    horizon: usize,
    now: OffsetDateTime,
) -> Result<Vec<Tournament>, CoreError> {
    let template = match master.recurrence {
        Some(template) if master.is_generating_template() => template,
        _ => return Ok(Vec::new()),
    };

    let dates: Vec<Date> = plan_series_dates(
        master.start_date,
        template.interval,
        today,
        existing_future,
        withdrawn,
        horizon,
    )?;

    Ok(dates
        .into_iter()
        .map(|date| Tournament::instance_of(master, date, now))
        .collect())
}

/// Counts from the tournament archival step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TournamentArchival {
    /// Tournaments moved to history.
    pub archived_count: u32,
    /// Likes deleted with them.
    pub likes_removed: u32,
}

/// Result of `archive_expired_tournaments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveTournamentsReport {
    /// Tournaments moved to history.
    pub archived_count: u32,
    /// Likes deleted with them.
    pub likes_removed: u32,
    /// Instances created while refilling the horizon afterwards.
    pub recurring_generated_count: u32,
    /// Set when archival committed but the horizon refill did not.
    pub error_message: Option<String>,
}

/// Per-series result of `generate_recurring_tournaments_horizon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesGeneration {
    /// The series.
    pub series_id: SeriesId,
    /// Instances actually inserted by this run.
    pub tournaments_created: u32,
    /// Human-readable summary.
    pub message: String,
}

impl SeriesGeneration {
    /// Builds the report line for a series.
    #[must_use]
    pub fn new(series_id: SeriesId, planned: usize, tournaments_created: u32) -> Self {
        let message: String = match (planned, tournaments_created) {
            (0, _) => String::from("horizon already filled"),
            (p, c) if u32::try_from(p).is_ok_and(|p| p == c) => {
                format!("created {c} tournaments")
            }
            (p, c) => format!("created {c} of {p} planned tournaments; the rest already existed"),
        };
        Self {
            series_id,
            tournaments_created,
            message,
        }
    }

    /// Builds the report line for a series whose generation was rolled back.
    #[must_use]
    pub fn failed(series_id: SeriesId, error: &str) -> Self {
        Self {
            series_id,
            tournaments_created: 0,
            message: format!("generation failed: {error}"),
        }
    }
}

/// Result of `archive_expired_giveaways`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchiveGiveawaysReport {
    /// Giveaways moved to the archive.
    pub archived_giveaways_count: u32,
    /// Entries moved with them.
    pub archived_entries_count: u32,
}

/// Combined result of a full maintenance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// Tournament archival, with the generator's total.
    pub tournaments: ArchiveTournamentsReport,
    /// Per-series generator results.
    pub series: Vec<SeriesGeneration>,
    /// Giveaway archival.
    pub giveaways: ArchiveGiveawaysReport,
}

/// Why a maintenance step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Storage could not be reached or the transaction could not complete.
    Unavailable,
    /// The caller may not run maintenance.
    Unauthorized,
    /// The data violated an invariant mid-step; everything was rolled back.
    Integrity,
}

impl FailureKind {
    /// Returns the string form used in reports and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Unauthorized => "unauthorized",
            Self::Integrity => "integrity",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed outcome of a maintenance operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "result", rename_all = "snake_case")]
pub enum MaintenanceOutcome<T> {
    /// The step completed.
    Success(T),
    /// The step did not run or was rolled back.
    Failure {
        /// The failure category.
        kind: FailureKind,
        /// Operator-facing description.
        message: String,
    },
}

impl<T> MaintenanceOutcome<T> {
    /// Returns true for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Builds a failure outcome.
    #[must_use]
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }
}

/// Audit event for a tournament archival run that moved at least one row.
#[must_use]
pub fn tournament_archival_audit_event(
    actor: Actor,
    cause: Cause,
    archived: &[TournamentId],
    likes_removed: u32,
) -> AuditEvent {
    let run_id: String = cause.id.clone();
    AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("ArchiveExpiredTournaments"),
            Some(format!(
                "Archived {} tournaments, removed {likes_removed} likes",
                archived.len()
            )),
        ),
        StateSnapshot::new(format!("live_expired={}", archived.len())),
        StateSnapshot::new(format!(
            "history_added=[{}]",
            archived
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(",")
        )),
        Subject::maintenance(run_id),
    )
}

/// Audit event for a series that received new instances.
#[must_use]
pub fn series_generation_audit_event(
    actor: Actor,
    cause: Cause,
    series_id: SeriesId,
    existing_future: usize,
    created: &[Date],
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("GenerateRecurringTournaments"),
            Some(format!("Created {} instances", created.len())),
        ),
        StateSnapshot::new(format!("series={series_id},future_instances={existing_future}")),
        StateSnapshot::new(format!(
            "series={series_id},future_instances={},added=[{}]",
            existing_future + created.len(),
            created
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(",")
        )),
        Subject::series(series_id),
    )
}

/// Audit event for a giveaway archival run that moved at least one row.
#[must_use]
pub fn giveaway_archival_audit_event(
    actor: Actor,
    cause: Cause,
    report: &ArchiveGiveawaysReport,
) -> AuditEvent {
    let run_id: String = cause.id.clone();
    AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("ArchiveExpiredGiveaways"),
            Some(format!(
                "Archived {} giveaways and {} entries",
                report.archived_giveaways_count, report.archived_entries_count
            )),
        ),
        StateSnapshot::new(format!(
            "live_expired={}",
            report.archived_giveaways_count
        )),
        StateSnapshot::new(format!(
            "archived_giveaways={},archived_entries={}",
            report.archived_giveaways_count, report.archived_entries_count
        )),
        Subject::maintenance(run_id),
    )
}
