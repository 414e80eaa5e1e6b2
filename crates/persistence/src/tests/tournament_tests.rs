// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament lifecycle persistence tests.

use crate::tests::{
    NOW, TODAY, apply, create_test_master, create_test_tournament, submit, submit_approved,
};
use crate::{HistoryRecord, Persistence, PersistenceError, TournamentFilter};
use breakshot::TournamentCommand;
use breakshot_audit::SubjectKind;
use breakshot_domain::{ActorRole, RemovalReason, TemplateStatus, Tournament, TournamentStatus};
use time::macros::date;

#[test]
fn test_submit_assigns_sequence_numbers_in_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first = submit(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    let second = submit(
        &mut persistence,
        create_test_tournament("Thursday 9-Ball", date!(2026 - 03 - 19)),
    );

    assert_eq!(first.sequence_number, Some(1));
    assert_eq!(second.sequence_number, Some(2));
    assert_eq!(first.status, TournamentStatus::Pending);

    let stored = persistence.get_tournament_by_sequence(2).unwrap();
    assert_eq!(stored.id, second.id);
    assert_eq!(stored.name, "Thursday 9-Ball");
}

#[test]
fn test_sequence_numbers_not_reused_after_deletion() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let first = submit(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    apply(
        &mut persistence,
        Some(&first),
        TournamentCommand::Delete {
            reason: String::from("duplicate"),
        },
        ActorRole::Admin,
    );

    let second = submit(
        &mut persistence,
        create_test_tournament("Thursday 9-Ball", date!(2026 - 03 - 19)),
    );

    assert_eq!(second.sequence_number, Some(2));
}

#[test]
fn test_stored_tournament_matches_submission() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let submitted = submit(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    let stored: Tournament = persistence.get_tournament(submitted.id).unwrap();

    assert_eq!(stored, submitted);
}

#[test]
fn test_approve_is_persisted_and_audited() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let approved = submit_approved(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    assert_eq!(approved.status, TournamentStatus::Approved);
    assert_eq!(approved.sequence_number, Some(1));

    let stored = persistence.get_tournament(approved.id).unwrap();
    assert_eq!(stored.status, TournamentStatus::Approved);

    let events = persistence
        .get_audit_events_for_subject(SubjectKind::Tournament, &approved.id.to_string())
        .unwrap();
    let actions: Vec<&str> = events.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(actions, vec!["SubmitTournament", "ApproveTournament"]);
}

#[test]
fn test_list_filters_by_status_and_date() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    submit(
        &mut persistence,
        create_test_tournament("Pending", date!(2026 - 03 - 12)),
    );
    submit_approved(
        &mut persistence,
        create_test_tournament("Soon", date!(2026 - 03 - 14)),
    );
    submit_approved(
        &mut persistence,
        create_test_tournament("Later", date!(2026 - 04 - 20)),
    );

    let all = persistence
        .list_tournaments(&TournamentFilter::default())
        .unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Pending", "Soon", "Later"]);

    let approved_in_march = persistence
        .list_tournaments(&TournamentFilter {
            status: Some(TournamentStatus::Approved),
            to: Some(date!(2026 - 03 - 31)),
            ..TournamentFilter::default()
        })
        .unwrap();
    assert_eq!(approved_in_march.len(), 1);
    assert_eq!(approved_in_march[0].name, "Soon");
}

#[test]
fn test_delete_moves_to_history_and_removes_likes() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let approved = submit_approved(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    assert!(persistence.like_tournament(approved.id, "player-1", NOW).unwrap());
    assert!(persistence.like_tournament(approved.id, "player-2", NOW).unwrap());

    let deleted = apply(
        &mut persistence,
        Some(&approved),
        TournamentCommand::Delete {
            reason: String::from("  venue closed  "),
        },
        ActorRole::Admin,
    )
    .tournament;

    assert_eq!(deleted.status, TournamentStatus::Deleted);
    assert_eq!(deleted.sequence_number, Some(1));
    assert!(matches!(
        persistence.get_tournament(approved.id),
        Err(PersistenceError::TournamentNotFound(_))
    ));
    assert_eq!(persistence.count_likes(approved.id).unwrap(), 0);

    let history: Vec<HistoryRecord> = persistence
        .list_history(Some(RemovalReason::AdminDeletion))
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].tournament.id, approved.id);
    assert_eq!(history[0].deletion_reason.as_deref(), Some("venue closed"));
    assert_eq!(history[0].removed_by, "admin-1");
    assert_eq!(history[0].removed_at, NOW);
    assert_eq!(history[0].restored_at, None);

    let found = persistence.find_tournament(approved.id).unwrap().unwrap();
    assert_eq!(found.status, TournamentStatus::Deleted);
}

#[test]
fn test_deny_moves_pending_tournament_to_history() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let pending = submit(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    apply(
        &mut persistence,
        Some(&pending),
        TournamentCommand::Deny {
            reason: String::from("missing venue"),
        },
        ActorRole::Admin,
    );

    let record = persistence.get_restorable_tournament(pending.id).unwrap();
    assert_eq!(record.removal_reason, RemovalReason::AdminDeletion);
    assert_eq!(record.deletion_reason.as_deref(), Some("missing venue"));
    assert!(
        persistence
            .list_tournaments(&TournamentFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_restore_keeps_sequence_number_and_marks_history() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let approved = submit_approved(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    apply(
        &mut persistence,
        Some(&approved),
        TournamentCommand::Delete {
            reason: String::from("posted by mistake"),
        },
        ActorRole::Admin,
    );

    let record = persistence.get_restorable_tournament(approved.id).unwrap();
    let restored = apply(
        &mut persistence,
        Some(&record.tournament),
        TournamentCommand::Restore {
            target: TournamentStatus::Approved,
        },
        ActorRole::Admin,
    )
    .tournament;

    assert_eq!(restored.status, TournamentStatus::Approved);
    assert_eq!(restored.sequence_number, Some(1));
    assert_eq!(
        persistence.get_tournament(approved.id).unwrap().status,
        TournamentStatus::Approved
    );

    let history = persistence.list_history(None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].restored_at, Some(NOW));

    // Nothing left to restore.
    assert!(matches!(
        persistence.get_restorable_tournament(approved.id),
        Err(PersistenceError::HistoryNotFound(_))
    ));
}

#[test]
fn test_restored_master_comes_back_paused() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let master = submit_approved(&mut persistence, create_test_master(date!(2026 - 03 - 16)));
    apply(
        &mut persistence,
        Some(&master),
        TournamentCommand::Delete {
            reason: String::from("league moved nights"),
        },
        ActorRole::Admin,
    );

    let record = persistence.get_restorable_tournament(master.id).unwrap();
    assert_eq!(
        record.tournament.recurrence.map(|r| r.status),
        Some(TemplateStatus::Ended)
    );

    apply(
        &mut persistence,
        Some(&record.tournament),
        TournamentCommand::Restore {
            target: TournamentStatus::Pending,
        },
        ActorRole::Admin,
    );

    let stored = persistence.get_tournament(master.id).unwrap();
    assert_eq!(stored.status, TournamentStatus::Pending);
    assert_eq!(
        stored.recurrence.map(|r| r.status),
        Some(TemplateStatus::Paused)
    );
    assert_eq!(stored.recurring_series_id, master.recurring_series_id);
}

#[test]
fn test_likes_are_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let approved = submit_approved(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );

    assert!(persistence.like_tournament(approved.id, "player-1", NOW).unwrap());
    assert!(!persistence.like_tournament(approved.id, "player-1", NOW).unwrap());
    assert_eq!(persistence.count_likes(approved.id).unwrap(), 1);

    assert!(persistence.unlike_tournament(approved.id, "player-1").unwrap());
    assert!(!persistence.unlike_tournament(approved.id, "player-1").unwrap());
    assert_eq!(persistence.count_likes(approved.id).unwrap(), 0);
}

#[test]
fn test_like_requires_live_tournament() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let approved = submit_approved(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", date!(2026 - 03 - 17)),
    );
    apply(
        &mut persistence,
        Some(&approved),
        TournamentCommand::Delete {
            reason: String::from("cancelled"),
        },
        ActorRole::Admin,
    );

    assert!(matches!(
        persistence.like_tournament(approved.id, "player-1", NOW),
        Err(PersistenceError::TournamentNotFound(_))
    ));
}

#[test]
fn test_manual_archive_records_manual_reason() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let past = submit_approved(
        &mut persistence,
        create_test_tournament("Last Week", date!(2026 - 03 - 03)),
    );
    apply(
        &mut persistence,
        Some(&past),
        TournamentCommand::Archive,
        ActorRole::Admin,
    );

    let history = persistence.list_history(Some(RemovalReason::Manual)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].tournament.status, TournamentStatus::Archived);
    assert_eq!(history[0].deletion_reason, None);
}

#[test]
fn test_template_status_updates_live_master() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let master = submit_approved(&mut persistence, create_test_master(date!(2026 - 03 - 16)));
    let paused = apply(
        &mut persistence,
        Some(&master),
        TournamentCommand::SetTemplateStatus {
            status: TemplateStatus::Paused,
        },
        ActorRole::Admin,
    )
    .tournament;

    assert_eq!(
        paused.recurrence.map(|r| r.status),
        Some(TemplateStatus::Paused)
    );
    assert_eq!(
        persistence
            .get_tournament(master.id)
            .unwrap()
            .recurrence
            .map(|r| r.status),
        Some(TemplateStatus::Paused)
    );
}

#[test]
fn test_sequence_lookup_misses_history() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let pending = submit(
        &mut persistence,
        create_test_tournament("Tuesday 8-Ball", TODAY),
    );
    apply(
        &mut persistence,
        Some(&pending),
        TournamentCommand::Deny {
            reason: String::from("duplicate"),
        },
        ActorRole::Admin,
    );

    assert!(persistence.get_tournament_by_sequence(1).is_err());
}
