// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use breakshot_audit::Cause;
use breakshot_domain::ActorRole;
use breakshot_persistence::Persistence;
use time::macros::{date, datetime};

use crate::{
    AuthenticatedActor, Clock, CreateGiveawayRequest, SubmitTournamentRequest,
    TournamentWriteResponse, approve_tournament, submit_tournament,
};

/// A Tuesday afternoon.
pub fn create_test_clock() -> Clock {
    Clock::new(datetime!(2026-03-10 15:00 UTC), date!(2026 - 03 - 10))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), ActorRole::Admin)
}

pub fn create_test_director() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("td-7"), ActorRole::Director)
}

pub fn create_test_player() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("player-3"), ActorRole::Player)
}

pub fn create_test_system() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("scheduler"), ActorRole::System)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_valid_submission(start_date: &str) -> SubmitTournamentRequest {
    SubmitTournamentRequest {
        name: String::from("Tuesday 8-Ball"),
        game_type: String::from("8-ball"),
        format: String::from("double elimination"),
        start_date: start_date.to_string(),
        start_time: Some(String::from("19:30")),
        venue_id: None,
        fee_cents: 1500,
        equipment: None,
        table_size: Some(String::from("7ft")),
        max_players: Some(24),
        reports_to_fargo: true,
        is_open_tournament: false,
        recurrence_interval: None,
    }
}

pub fn create_valid_giveaway(end_at: &str) -> CreateGiveawayRequest {
    CreateGiveawayRequest {
        title: String::from("Jump cue"),
        prize_value_cents: 25_000,
        prize_details: Some(String::from("Predator Air 2")),
        end_at: end_at.to_string(),
        single_entry: true,
        maximum_entries: None,
        minimum_age: Some(18),
    }
}

pub fn submit(
    persistence: &mut Persistence,
    request: SubmitTournamentRequest,
) -> TournamentWriteResponse {
    submit_tournament(
        persistence,
        &create_test_clock(),
        request,
        &create_test_director(),
        create_test_cause(),
    )
    .unwrap()
}

pub fn submit_approved(
    persistence: &mut Persistence,
    request: SubmitTournamentRequest,
) -> TournamentWriteResponse {
    let submitted: TournamentWriteResponse = submit(persistence, request);
    approve_tournament(
        persistence,
        &create_test_clock(),
        &submitted.tournament.tournament_id,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap()
}
