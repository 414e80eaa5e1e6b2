// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot::{FailureKind, MaintenanceOutcome};
use time::macros::datetime;

use super::helpers::{
    create_test_admin, create_test_cause, create_test_clock, create_test_persistence,
    create_test_player, create_test_system, create_valid_giveaway, create_valid_submission,
    submit_approved,
};
use crate::{
    ListTournamentsRequest, archive_expired_giveaways, archive_expired_tournaments,
    create_giveaway, end_giveaway, generate_recurring_tournaments_horizon, list_giveaways,
    list_tournament_history, list_tournaments, maintenance_cause, run_maintenance,
};

fn seed_monday_series(persistence: &mut breakshot_persistence::Persistence) {
    let mut master = create_valid_submission("2026-03-09");
    master.recurrence_interval = Some(String::from("weekly"));
    submit_approved(persistence, master);
    submit_approved(persistence, create_valid_submission("2026-03-03"));
}

#[test]
fn test_archive_expired_tournaments_refills_horizon() {
    let mut persistence = create_test_persistence();
    seed_monday_series(&mut persistence);

    let outcome = archive_expired_tournaments(
        &mut persistence,
        &create_test_clock(),
        4,
        &create_test_system(),
        &create_test_cause(),
    );

    let MaintenanceOutcome::Success(report) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(report.archived_count, 2);
    assert_eq!(report.likes_removed, 0);
    assert_eq!(report.recurring_generated_count, 4);
    assert_eq!(report.error_message, None);

    let live = list_tournaments(&mut persistence, &ListTournamentsRequest::default()).unwrap();
    let dates: Vec<&str> = live
        .tournaments
        .iter()
        .map(|t| t.start_date.as_str())
        .collect();
    assert_eq!(
        dates,
        vec!["2026-03-16", "2026-03-23", "2026-03-30", "2026-04-06"]
    );
    assert_eq!(
        list_tournament_history(&mut persistence, Some("expired"))
            .unwrap()
            .records
            .len(),
        2
    );
}

#[test]
fn test_players_cannot_run_maintenance() {
    let mut persistence = create_test_persistence();
    seed_monday_series(&mut persistence);

    let outcome = archive_expired_tournaments(
        &mut persistence,
        &create_test_clock(),
        4,
        &create_test_player(),
        &create_test_cause(),
    );

    assert!(matches!(
        outcome,
        MaintenanceOutcome::Failure {
            kind: FailureKind::Unauthorized,
            ..
        }
    ));
    let live = list_tournaments(&mut persistence, &ListTournamentsRequest::default()).unwrap();
    assert_eq!(live.tournaments.len(), 2);
}

#[test]
fn test_generate_horizon_reports_per_series() {
    let mut persistence = create_test_persistence();
    seed_monday_series(&mut persistence);
    let clock = create_test_clock();

    let first = generate_recurring_tournaments_horizon(
        &mut persistence,
        &clock,
        2,
        &create_test_admin(),
        &create_test_cause(),
    );
    let second = generate_recurring_tournaments_horizon(
        &mut persistence,
        &clock,
        2,
        &create_test_admin(),
        &create_test_cause(),
    );

    let MaintenanceOutcome::Success(first) = first else {
        panic!("expected success");
    };
    let MaintenanceOutcome::Success(second) = second else {
        panic!("expected success");
    };
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].tournaments_created, 2);
    assert_eq!(second[0].tournaments_created, 0);
    assert_eq!(second[0].message, "horizon already filled");
}

#[test]
fn test_archive_ended_giveaway() {
    let mut persistence = create_test_persistence();
    let clock = create_test_clock();
    let admin = create_test_admin();
    let ended = create_giveaway(
        &mut persistence,
        &clock,
        create_valid_giveaway("2026-03-31T23:59:00Z"),
        &admin,
        create_test_cause(),
    )
    .unwrap();
    create_giveaway(
        &mut persistence,
        &clock,
        create_valid_giveaway("2026-04-30T23:59:00Z"),
        &admin,
        create_test_cause(),
    )
    .unwrap();
    end_giveaway(
        &mut persistence,
        &clock,
        &ended.giveaway.giveaway_id,
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let outcome = archive_expired_giveaways(
        &mut persistence,
        &clock,
        &create_test_system(),
        &create_test_cause(),
    );

    let MaintenanceOutcome::Success(report) = outcome else {
        panic!("expected success");
    };
    assert_eq!(report.archived_giveaways_count, 1);
    assert_eq!(report.archived_entries_count, 0);
    assert_eq!(list_giveaways(&mut persistence).unwrap().giveaways.len(), 1);
}

#[test]
fn test_run_maintenance_runs_every_step() {
    let mut persistence = create_test_persistence();
    seed_monday_series(&mut persistence);
    let clock = create_test_clock();
    create_giveaway(
        &mut persistence,
        &clock,
        create_valid_giveaway("2026-03-10T16:00:00Z"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    let later = crate::Clock::new(datetime!(2026-03-10 17:00 UTC), clock.today);
    let outcome = run_maintenance(
        &mut persistence,
        &later,
        4,
        &create_test_system(),
        &maintenance_cause(later.now, "Scheduled maintenance"),
    );

    let MaintenanceOutcome::Success(report) = outcome else {
        panic!("expected success");
    };
    assert_eq!(report.tournaments.archived_count, 2);
    assert_eq!(report.tournaments.recurring_generated_count, 4);
    assert_eq!(report.series.len(), 1);
    assert_eq!(report.giveaways.archived_giveaways_count, 1);
}

#[test]
fn test_outcome_serializes_with_tag() {
    let failure: MaintenanceOutcome<()> =
        MaintenanceOutcome::failure(FailureKind::Unavailable, "database is locked");

    let json: serde_json::Value = serde_json::to_value(&failure).unwrap();

    assert_eq!(json["outcome"], "failure");
    assert_eq!(json["result"]["kind"], "unavailable");
    assert_eq!(json["result"]["message"], "database is locked");
}

#[test]
fn test_maintenance_cause_is_unique() {
    let now = datetime!(2026-03-10 03:00 UTC);

    let first = maintenance_cause(now, "Nightly run");
    let second = maintenance_cause(now, "Nightly run");

    assert!(first.id.starts_with(&format!("maintenance_{}_", now.unix_timestamp())));
    assert_ne!(first.id, second.id);
    assert_eq!(first.description, "Nightly run");
}
