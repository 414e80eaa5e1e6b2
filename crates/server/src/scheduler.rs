// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process maintenance on a fixed period.

use std::time::Duration;

use breakshot::{FailureKind, MaintenanceOutcome, MaintenanceReport};
use breakshot_api::{AuthenticatedActor, Clock, maintenance_cause};
use breakshot_audit::Cause;
use breakshot_domain::ActorRole;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{error, info};

use crate::routes::AppState;

/// Actor id recorded on scheduled runs.
pub const SCHEDULER_ACTOR_ID: &str = "maintenance";

/// Runs every maintenance step once as the system actor.
pub async fn run_scheduled_maintenance(
    app_state: &AppState,
) -> MaintenanceOutcome<MaintenanceReport> {
    let actor: AuthenticatedActor =
        AuthenticatedActor::new(String::from(SCHEDULER_ACTOR_ID), ActorRole::System);

    let clock: Clock = match app_state.clock() {
        Ok(clock) => clock,
        Err(err) => {
            error!(error = %err, "Cannot read the clock for maintenance");
            return MaintenanceOutcome::failure(FailureKind::Unavailable, err.to_string());
        }
    };
    let cause: Cause = maintenance_cause(clock.now, "Scheduled maintenance");

    let mut persistence = app_state.persistence.lock().await;
    breakshot_api::run_maintenance(
        &mut persistence,
        &clock,
        app_state.horizon,
        &actor,
        &cause,
    )
}

/// Logs a finished run.
pub fn log_outcome(outcome: &MaintenanceOutcome<MaintenanceReport>) {
    match outcome {
        MaintenanceOutcome::Success(report) => {
            info!(
                archived = report.tournaments.archived_count,
                likes_removed = report.tournaments.likes_removed,
                generated = report.tournaments.recurring_generated_count,
                series = report.series.len(),
                giveaways_archived = report.giveaways.archived_giveaways_count,
                entries_archived = report.giveaways.archived_entries_count,
                generation_error = ?report.tournaments.error_message,
                "Maintenance run complete"
            );
        }
        MaintenanceOutcome::Failure { kind, message } => {
            error!(kind = ?kind, error = %message, "Maintenance run failed");
        }
    }
}

/// Periodic maintenance runner.
pub struct MaintenanceScheduler {
    state: AppState,
    interval: Interval,
}

impl MaintenanceScheduler {
    /// Creates a scheduler; the first tick fires immediately.
    #[must_use]
    pub fn new(state: AppState, period: Duration) -> Self {
        let mut interval: Interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self { state, interval }
    }

    /// Runs until the task is dropped.
    pub async fn run(&mut self) {
        info!(
            period_secs = self.interval.period().as_secs(),
            "Starting maintenance scheduler"
        );

        loop {
            self.interval.tick().await;

            let outcome: MaintenanceOutcome<MaintenanceReport> =
                run_scheduled_maintenance(&self.state).await;
            log_outcome(&outcome);
        }
    }
}

/// Spawns the scheduler as a background task.
pub fn spawn_maintenance_scheduler(
    state: AppState,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut scheduler: MaintenanceScheduler = MaintenanceScheduler::new(state, period);
        scheduler.run().await;
    })
}
