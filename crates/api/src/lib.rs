// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Breakshot tournament service.
//!
//! Handlers here are transport-agnostic: they take a `Persistence`, a
//! `Clock` and an authenticated actor, and return API DTOs or `ApiError`.
//! The HTTP server wraps them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod maintenance;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    Clock, MAX_RECENT_AUDIT_EVENTS, activate_tournament, approve_tournament, archive_tournament,
    create_giveaway, create_venue, delete_tournament, deny_tournament, end_giveaway,
    enter_giveaway, get_audit_event, get_audit_events_for_subject, get_giveaway,
    get_recent_audit_events, get_tournament, like_tournament, list_giveaways,
    list_tournament_history, list_tournaments, list_venues, restore_tournament,
    set_template_status, submit_tournament, unlike_tournament,
};
pub use maintenance::{
    archive_expired_giveaways, archive_expired_tournaments,
    generate_recurring_tournaments_horizon, maintenance_cause, run_maintenance,
};
pub use request_response::{
    AuditEventInfo, AuditEventsResponse, CreateGiveawayRequest, CreateVenueRequest,
    CreateVenueResponse, EnterGiveawayRequest, EnterGiveawayResponse, GiveawayInfo,
    GiveawayWriteResponse, HistoryRecordInfo, LikeResponse, ListGiveawaysResponse,
    ListHistoryResponse, ListTournamentsRequest, ListTournamentsResponse, ListVenuesResponse,
    ReasonRequest, RestoreTournamentRequest, SetTemplateStatusRequest, SubmitTournamentRequest,
    TournamentDetailResponse, TournamentInfo, TournamentWriteResponse, VenueInfo,
};
