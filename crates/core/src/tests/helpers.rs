// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ApplyContext;
use breakshot_audit::{Actor, Cause};
use breakshot_domain::{
    ActorRole, Giveaway, GiveawayId, GiveawayStatus, RecurrenceInterval, RecurrenceTemplate,
    TemplateStatus, Tournament, TournamentId, TournamentStatus,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const TODAY: Date = date!(2026 - 03 - 10);
pub const NOW: OffsetDateTime = datetime!(2026-03-10 15:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::with_role(String::from("admin-123"), ActorRole::Admin)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub const fn ctx(role: ActorRole) -> ApplyContext {
    ApplyContext::new(TODAY, NOW, role)
}

pub fn create_test_tournament(status: TournamentStatus, start_date: Date) -> Tournament {
    Tournament {
        id: TournamentId::generate(),
        sequence_number: Some(1),
        name: String::from("Thursday 8-Ball"),
        game_type: String::from("8-ball"),
        format: String::from("single elimination"),
        start_date,
        start_time: None,
        venue_id: None,
        fee_cents: 1500,
        equipment: None,
        table_size: Some(String::from("9ft")),
        max_players: Some(16),
        is_recurring: false,
        is_recurring_master: false,
        reports_to_fargo: false,
        is_open_tournament: true,
        status,
        recurring_series_id: None,
        parent_recurring_tournament_id: None,
        recurrence: None,
        director_id: String::from("director-1"),
        created_at: datetime!(2026-02-01 00:00 UTC),
    }
}

pub fn create_test_master(status: TournamentStatus, start_date: Date) -> Tournament {
    let mut master: Tournament = create_test_tournament(status, start_date);
    master.is_recurring = true;
    master.is_recurring_master = true;
    master.recurring_series_id = Some(breakshot_domain::SeriesId::generate());
    master.recurrence = Some(RecurrenceTemplate {
        interval: RecurrenceInterval::Weekly,
        status: TemplateStatus::Active,
    });
    master
}

pub fn create_test_giveaway(status: GiveawayStatus, end_at: OffsetDateTime) -> Giveaway {
    Giveaway {
        id: GiveawayId::generate(),
        title: String::from("Break cue"),
        prize_value_cents: 30_000,
        prize_details: None,
        end_at,
        single_entry: true,
        maximum_entries: None,
        minimum_age: Some(18),
        status,
        created_by: String::from("admin-123"),
        created_at: datetime!(2026-03-01 00:00 UTC),
    }
}
