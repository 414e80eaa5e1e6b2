// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maintenance operations.
//!
//! These never return `Err`. Every outcome, including a refused caller, is a
//! typed `MaintenanceOutcome` so the scheduler and the HTTP layer can report
//! it the same way.

use breakshot::{
    ArchiveGiveawaysReport, ArchiveTournamentsReport, FailureKind, MaintenanceOutcome,
    MaintenanceReport, SeriesGeneration, TournamentArchival,
};
use breakshot_audit::{Actor, Cause};
use breakshot_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::handlers::Clock;

/// Builds the cause recorded for an unattended maintenance run.
#[must_use]
pub fn maintenance_cause(now: OffsetDateTime, description: &str) -> Cause {
    Cause::new(
        format!(
            "maintenance_{}_{}",
            now.unix_timestamp(),
            rand::random::<u64>()
        ),
        description.to_string(),
    )
}

/// A step that failed and rolled back.
struct StepFailure {
    kind: FailureKind,
    message: String,
}

impl StepFailure {
    fn from_persistence(step: &str, err: &PersistenceError) -> Self {
        let kind: FailureKind = if err.is_integrity_violation() {
            FailureKind::Integrity
        } else {
            FailureKind::Unavailable
        };
        error!(step, kind = %kind, error = %err, "Maintenance step rolled back");
        Self {
            kind,
            message: format!("{step} failed: {err}"),
        }
    }

    fn into_outcome<T>(self) -> MaintenanceOutcome<T> {
        MaintenanceOutcome::failure(self.kind, self.message)
    }
}

fn authorize<T>(
    authenticated_actor: &AuthenticatedActor,
    action: &str,
) -> Result<Actor, MaintenanceOutcome<T>> {
    AuthorizationService::authorize_maintenance(authenticated_actor, action)
        .map(|()| authenticated_actor.to_audit_actor())
        .map_err(|e| MaintenanceOutcome::failure(FailureKind::Unauthorized, e.to_string()))
}

fn generate(
    persistence: &mut Persistence,
    clock: &Clock,
    horizon: usize,
    actor: &Actor,
    cause: &Cause,
) -> Result<Vec<SeriesGeneration>, StepFailure> {
    let series: Vec<SeriesGeneration> = persistence
        .generate_recurring_horizon(
            clock.today,
            horizon,
            clock.now,
            actor.clone(),
            cause.clone(),
        )
        .map_err(|e| StepFailure::from_persistence("generate_recurring_tournaments_horizon", &e))?;

    let created: u32 = series.iter().map(|s| s.tournaments_created).sum();
    info!(
        series = series.len(),
        created, horizon, "Recurring horizon refilled"
    );
    Ok(series)
}

/// Archives expired tournaments, then refills the recurring horizon.
///
/// Archival failing is a failure. The refill failing after archival has
/// committed is reported in `error_message` on an otherwise successful
/// outcome.
fn archive_and_refill(
    persistence: &mut Persistence,
    clock: &Clock,
    horizon: usize,
    actor: &Actor,
    cause: &Cause,
) -> Result<(ArchiveTournamentsReport, Vec<SeriesGeneration>), StepFailure> {
    let archival: TournamentArchival = persistence
        .archive_expired_tournaments(clock.today, clock.now, actor.clone(), cause.clone())
        .map_err(|e| StepFailure::from_persistence("archive_expired_tournaments", &e))?;

    info!(
        archived = archival.archived_count,
        likes_removed = archival.likes_removed,
        today = %clock.today,
        "Expired tournaments archived"
    );

    let (series, error_message): (Vec<SeriesGeneration>, Option<String>) =
        match generate(persistence, clock, horizon, actor, cause) {
            Ok(series) => (series, None),
            Err(failure) => {
                warn!(
                    error = %failure.message,
                    "Archival committed but the horizon refill did not"
                );
                (Vec::new(), Some(failure.message))
            }
        };

    let report: ArchiveTournamentsReport = ArchiveTournamentsReport {
        archived_count: archival.archived_count,
        likes_removed: archival.likes_removed,
        recurring_generated_count: series.iter().map(|s| s.tournaments_created).sum(),
        error_message,
    };
    Ok((report, series))
}

/// Moves every approved or active tournament dated before today into
/// history, then refills the recurring horizon.
#[must_use]
pub fn archive_expired_tournaments(
    persistence: &mut Persistence,
    clock: &Clock,
    horizon: usize,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> MaintenanceOutcome<ArchiveTournamentsReport> {
    let actor: Actor = match authorize(authenticated_actor, "archive_expired_tournaments") {
        Ok(actor) => actor,
        Err(refused) => return refused,
    };

    match archive_and_refill(persistence, clock, horizon, &actor, cause) {
        Ok((report, _)) => MaintenanceOutcome::Success(report),
        Err(failure) => failure.into_outcome(),
    }
}

/// Tops up every generating series to `horizon` future instances.
#[must_use]
pub fn generate_recurring_tournaments_horizon(
    persistence: &mut Persistence,
    clock: &Clock,
    horizon: usize,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> MaintenanceOutcome<Vec<SeriesGeneration>> {
    let actor: Actor = match authorize(
        authenticated_actor,
        "generate_recurring_tournaments_horizon",
    ) {
        Ok(actor) => actor,
        Err(refused) => return refused,
    };

    match generate(persistence, clock, horizon, &actor, cause) {
        Ok(series) => MaintenanceOutcome::Success(series),
        Err(failure) => failure.into_outcome(),
    }
}

/// Moves every expired or ended giveaway, with its entries, to the archive.
#[must_use]
pub fn archive_expired_giveaways(
    persistence: &mut Persistence,
    clock: &Clock,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> MaintenanceOutcome<ArchiveGiveawaysReport> {
    let actor: Actor = match authorize(authenticated_actor, "archive_expired_giveaways") {
        Ok(actor) => actor,
        Err(refused) => return refused,
    };

    match archive_giveaways(persistence, clock, actor, cause) {
        Ok(report) => MaintenanceOutcome::Success(report),
        Err(failure) => failure.into_outcome(),
    }
}

fn archive_giveaways(
    persistence: &mut Persistence,
    clock: &Clock,
    actor: Actor,
    cause: &Cause,
) -> Result<ArchiveGiveawaysReport, StepFailure> {
    let report: ArchiveGiveawaysReport = persistence
        .archive_expired_giveaways(clock.now, actor, cause.clone())
        .map_err(|e| StepFailure::from_persistence("archive_expired_giveaways", &e))?;

    info!(
        giveaways = report.archived_giveaways_count,
        entries = report.archived_entries_count,
        "Expired giveaways archived"
    );
    Ok(report)
}

/// Runs every maintenance step in order: tournament archival, horizon
/// refill, giveaway archival.
///
/// Each step commits on its own. A failing archival step stops the run;
/// earlier steps stay committed.
#[must_use]
pub fn run_maintenance(
    persistence: &mut Persistence,
    clock: &Clock,
    horizon: usize,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> MaintenanceOutcome<MaintenanceReport> {
    let actor: Actor = match authorize(authenticated_actor, "run_maintenance") {
        Ok(actor) => actor,
        Err(refused) => return refused,
    };

    let (tournaments, series): (ArchiveTournamentsReport, Vec<SeriesGeneration>) =
        match archive_and_refill(persistence, clock, horizon, &actor, cause) {
            Ok(result) => result,
            Err(failure) => return failure.into_outcome(),
        };

    let giveaways: ArchiveGiveawaysReport =
        match archive_giveaways(persistence, clock, actor, cause) {
            Ok(report) => report,
            Err(failure) => return failure.into_outcome(),
        };

    MaintenanceOutcome::Success(MaintenanceReport {
        tournaments,
        series,
        giveaways,
    })
}
