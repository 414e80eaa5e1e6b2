// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, TODAY, create_test_actor, create_test_cause, create_test_giveaway, create_test_master,
    create_test_tournament,
};
use crate::{
    ArchiveGiveawaysReport, FailureKind, MaintenanceOutcome, SeriesGeneration,
    giveaway_archival_audit_event, plan_recurrence, select_expired_giveaways,
    select_expired_tournaments, series_generation_audit_event,
};
use breakshot_domain::{
    DEFAULT_HORIZON, GiveawayStatus, RemovalReason, TemplateStatus, Tournament, TournamentStatus,
};
use time::Weekday;
use time::macros::{date, datetime};

#[test]
fn test_only_past_approved_or_active_are_selected() {
    let past_approved = create_test_tournament(TournamentStatus::Approved, date!(2026 - 03 - 09));
    let past_active = create_test_tournament(TournamentStatus::Active, date!(2026 - 03 - 01));
    let past_pending = create_test_tournament(TournamentStatus::Pending, date!(2026 - 03 - 01));
    let today_approved = create_test_tournament(TournamentStatus::Approved, TODAY);
    let future_approved = create_test_tournament(TournamentStatus::Approved, date!(2026 - 03 - 20));

    let selected = select_expired_tournaments(
        &[
            past_approved.clone(),
            past_active.clone(),
            past_pending,
            today_approved,
            future_approved,
        ],
        TODAY,
    );

    assert_eq!(selected, vec![past_approved.id, past_active.id]);
}

#[test]
fn test_expired_and_ended_giveaways_selected() {
    let expired = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-03-10 14:59 UTC));
    let ended = create_test_giveaway(GiveawayStatus::Ended, datetime!(2026-04-01 00:00 UTC));
    let open = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-03-10 15:01 UTC));

    let selected = select_expired_giveaways(&[expired.clone(), ended.clone(), open], NOW);

    assert_eq!(
        selected,
        vec![
            (expired.id, RemovalReason::Expired),
            (ended.id, RemovalReason::Manual)
        ]
    );
}

#[test]
fn test_plan_recurrence_monday_scenario() {
    // TODAY is a Tuesday.
    assert_eq!(TODAY.weekday(), Weekday::Tuesday);
    let master: Tournament = create_test_master(TournamentStatus::Approved, date!(2026 - 02 - 02));

    let instances = plan_recurrence(
        &master,
        &[date!(2026 - 03 - 16)],
        &[],
        TODAY,
        DEFAULT_HORIZON,
        NOW,
    )
    .unwrap();

    assert_eq!(instances.len(), 3);
    for instance in &instances {
        assert_eq!(instance.start_date.weekday(), Weekday::Monday);
        assert_ne!(instance.start_date, date!(2026 - 03 - 16));
        assert!(instance.start_date > TODAY);
        assert_eq!(instance.recurring_series_id, master.recurring_series_id);
        assert_eq!(instance.parent_recurring_tournament_id, Some(master.id));
        assert_eq!(instance.status, TournamentStatus::Approved);
    }
}

#[test]
fn test_archived_master_keeps_generating() {
    let master: Tournament = create_test_master(TournamentStatus::Archived, date!(2026 - 02 - 02));

    let instances = plan_recurrence(&master, &[], &[], TODAY, 4, NOW).unwrap();

    assert_eq!(instances.len(), 4);
    assert_eq!(instances[0].start_date, date!(2026 - 03 - 16));
}

#[test]
fn test_paused_master_generates_nothing() {
    let mut master: Tournament =
        create_test_master(TournamentStatus::Approved, date!(2026 - 02 - 02));
    if let Some(template) = master.recurrence.as_mut() {
        template.status = TemplateStatus::Paused;
    }

    assert!(plan_recurrence(&master, &[], &[], TODAY, 4, NOW).unwrap().is_empty());
}

#[test]
fn test_series_generation_message() {
    let master: Tournament = create_test_master(TournamentStatus::Approved, TODAY);
    let series = master.recurring_series_id.unwrap();

    assert_eq!(
        SeriesGeneration::new(series, 0, 0).message,
        "horizon already filled"
    );
    assert_eq!(
        SeriesGeneration::new(series, 3, 3).message,
        "created 3 tournaments"
    );
    assert!(
        SeriesGeneration::new(series, 3, 1)
            .message
            .contains("already existed")
    );
}

#[test]
fn test_failed_series_generation_reports_the_error() {
    let master: Tournament = create_test_master(TournamentStatus::Approved, TODAY);
    let series = master.recurring_series_id.unwrap();

    let failed = SeriesGeneration::failed(series, "database is locked");

    assert_eq!(failed.tournaments_created, 0);
    assert_eq!(failed.message, "generation failed: database is locked");
}

#[test]
fn test_plan_recurrence_skips_withdrawn_dates() {
    let master: Tournament = create_test_master(TournamentStatus::Approved, date!(2026 - 02 - 02));

    let instances = plan_recurrence(
        &master,
        &[date!(2026 - 03 - 16), date!(2026 - 03 - 23)],
        &[date!(2026 - 03 - 30)],
        TODAY,
        4,
        NOW,
    )
    .unwrap();

    let dates: Vec<_> = instances.iter().map(|t| t.start_date).collect();
    assert_eq!(dates, vec![date!(2026 - 04 - 06), date!(2026 - 04 - 13)]);
}

#[test]
fn test_maintenance_outcome_serialization() {
    let ok: MaintenanceOutcome<ArchiveGiveawaysReport> =
        MaintenanceOutcome::Success(ArchiveGiveawaysReport {
            archived_giveaways_count: 2,
            archived_entries_count: 9,
        });
    let failed: MaintenanceOutcome<ArchiveGiveawaysReport> =
        MaintenanceOutcome::failure(FailureKind::Unauthorized, "players may not archive");

    assert!(ok.is_success());
    assert!(!failed.is_success());

    let json: serde_json::Value = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["outcome"], "failure");
    assert_eq!(json["result"]["kind"], "unauthorized");

    let json: serde_json::Value = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["outcome"], "success");
    assert_eq!(json["result"]["archived_entries_count"], 9);
}

#[test]
fn test_maintenance_audit_events() {
    let master: Tournament = create_test_master(TournamentStatus::Approved, TODAY);
    let series = master.recurring_series_id.unwrap();

    let event = series_generation_audit_event(
        create_test_actor(),
        create_test_cause(),
        series,
        1,
        &[date!(2026 - 03 - 23), date!(2026 - 03 - 30)],
    );
    assert_eq!(event.action.name, "GenerateRecurringTournaments");
    assert!(event.after.data.contains("future_instances=3"));

    let event = giveaway_archival_audit_event(
        create_test_actor(),
        create_test_cause(),
        &ArchiveGiveawaysReport {
            archived_giveaways_count: 1,
            archived_entries_count: 4,
        },
    );
    assert_eq!(event.subject.id, "req-456");
}
