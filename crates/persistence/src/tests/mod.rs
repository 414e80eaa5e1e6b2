// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod tournament_tests;

use crate::{PersistedTournament, Persistence};
use breakshot::{
    ApplyContext, GiveawayCommand, TournamentCommand, apply_giveaway, apply_tournament,
};
use breakshot_audit::{Actor, Cause};
use breakshot_domain::{
    ActorRole, EntryAgreement, Giveaway, GiveawayId, GiveawayStatus, RecurrenceInterval,
    RecurrenceTemplate, TemplateStatus, Tournament, TournamentId, TournamentStatus,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// A Tuesday.
pub const TODAY: Date = date!(2026 - 03 - 10);
pub const NOW: OffsetDateTime = datetime!(2026-03-10 15:00 UTC);

pub const AGREED: EntryAgreement = EntryAgreement {
    is_of_age: true,
    accepted_rules: true,
    accepted_privacy: true,
};

pub fn create_test_actor() -> Actor {
    Actor::with_role(String::from("admin-1"), ActorRole::Admin)
}

pub fn create_system_actor() -> Actor {
    Actor::with_role(String::from("maintenance"), ActorRole::System)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn create_test_tournament(name: &str, start_date: Date) -> Tournament {
    Tournament {
        id: TournamentId::generate(),
        sequence_number: None,
        name: name.to_string(),
        game_type: String::from("9-ball"),
        format: String::from("double elimination"),
        start_date,
        start_time: Some(time::macros::time!(19:00)),
        venue_id: None,
        fee_cents: 2000,
        equipment: Some(String::from("Diamond tables")),
        table_size: Some(String::from("7ft")),
        max_players: Some(32),
        is_recurring: false,
        is_recurring_master: false,
        reports_to_fargo: true,
        is_open_tournament: false,
        status: TournamentStatus::Pending,
        recurring_series_id: None,
        parent_recurring_tournament_id: None,
        recurrence: None,
        director_id: String::from("director-1"),
        created_at: NOW,
    }
}

/// A weekly master; the series id is assigned on submission.
pub fn create_test_master(start_date: Date) -> Tournament {
    let mut master: Tournament = create_test_tournament("Monday Night 9-Ball", start_date);
    master.is_recurring = true;
    master.is_recurring_master = true;
    master.recurrence = Some(RecurrenceTemplate {
        interval: RecurrenceInterval::Weekly,
        status: TemplateStatus::Active,
    });
    master
}

/// Applies a tournament command on `TODAY` and persists it.
pub fn apply(
    persistence: &mut Persistence,
    current: Option<&Tournament>,
    command: TournamentCommand,
    role: ActorRole,
) -> PersistedTournament {
    let transition = apply_tournament(
        current,
        command,
        &ApplyContext::new(TODAY, NOW, role),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_tournament_transition(&transition, NOW)
        .unwrap()
}

pub fn submit(persistence: &mut Persistence, tournament: Tournament) -> Tournament {
    apply(
        persistence,
        None,
        TournamentCommand::Submit {
            tournament: Box::new(tournament),
        },
        ActorRole::Director,
    )
    .tournament
}

pub fn submit_approved(persistence: &mut Persistence, tournament: Tournament) -> Tournament {
    let submitted: Tournament = submit(persistence, tournament);
    apply(
        persistence,
        Some(&submitted),
        TournamentCommand::Approve,
        ActorRole::Admin,
    )
    .tournament
}

/// Creates a giveaway as of `created` ending at `end_at`.
pub fn create_test_giveaway(
    persistence: &mut Persistence,
    created: OffsetDateTime,
    end_at: OffsetDateTime,
    single_entry: bool,
    maximum_entries: Option<u32>,
) -> Giveaway {
    let giveaway: Giveaway = Giveaway {
        id: GiveawayId::generate(),
        title: String::from("Custom break cue"),
        prize_value_cents: 35_000,
        prize_details: Some(String::from("Shipped to the winner")),
        end_at,
        single_entry,
        maximum_entries,
        minimum_age: Some(21),
        status: GiveawayStatus::Active,
        created_by: String::from("admin-1"),
        created_at: created,
    };

    let transition = apply_giveaway(
        None,
        GiveawayCommand::Create {
            giveaway: Box::new(giveaway),
        },
        &ApplyContext::new(created.date(), created, ActorRole::Admin),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_giveaway_transition(&transition).unwrap();
    transition.giveaway
}
