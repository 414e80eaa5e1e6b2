// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes.
//!
//! Handlers authenticate the stub identity carried in the request body, lock
//! the persistence layer and call into `breakshot_api`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use breakshot::{
    ArchiveGiveawaysReport, ArchiveTournamentsReport, FailureKind, MaintenanceOutcome,
    MaintenanceReport, SeriesGeneration,
};
use breakshot_api::{
    ApiError, AuditEventInfo, AuditEventsResponse, AuthenticatedActor, Clock,
    CreateGiveawayRequest, CreateVenueRequest, CreateVenueResponse, EnterGiveawayRequest,
    EnterGiveawayResponse, GiveawayInfo, GiveawayWriteResponse, LikeResponse,
    ListGiveawaysResponse, ListHistoryResponse, ListTournamentsRequest, ListTournamentsResponse,
    ListVenuesResponse, ReasonRequest, RestoreTournamentRequest, SetTemplateStatusRequest,
    SubmitTournamentRequest, TournamentDetailResponse, TournamentWriteResponse,
    authenticate_stub,
};
use breakshot_audit::Cause;
use breakshot_domain::Tz;
use breakshot_persistence::Persistence;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::ServerConfig;

/// Where handlers read the current instant from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The system clock.
    System,
    /// A pinned instant.
    Fixed(OffsetDateTime),
}

impl TimeSource {
    fn now(self) -> OffsetDateTime {
        match self {
            Self::System => OffsetDateTime::now_utc(),
            Self::Fixed(now) => now,
        }
    }
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
    /// The timezone "today" is computed in.
    pub timezone: Tz,
    /// Future instances kept per recurring series.
    pub horizon: usize,
    /// The clock.
    pub time_source: TimeSource,
}

impl AppState {
    /// Wraps an opened persistence layer.
    #[must_use]
    pub fn new(persistence: Persistence, config: &ServerConfig, time_source: TimeSource) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            timezone: config.timezone,
            horizon: config.horizon,
            time_source,
        }
    }

    /// Reads the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the local date cannot be computed.
    pub fn clock(&self) -> Result<Clock, ApiError> {
        Clock::at(self.time_source.now(), self.timezone)
    }
}

/// A write request: the stub identity and cause, plus the operation's own
/// fields flattened alongside them.
#[derive(Debug, Deserialize)]
struct ActorEnvelope<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    #[serde(flatten)]
    body: T,
}

impl<T> ActorEnvelope<T> {
    fn authenticate(self) -> Result<(AuthenticatedActor, Cause, T), HttpError> {
        let actor: AuthenticatedActor =
            authenticate_stub(&self.actor_id, &self.actor_role).map_err(ApiError::from)?;
        let cause: Cause = Cause::new(self.cause_id, self.cause_description);
        Ok((actor, cause, self.body))
    }
}

/// Body of a request that carries nothing beyond the envelope.
#[derive(Debug, Deserialize)]
struct NoBody {}

/// Query parameters for the history listing.
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    /// `expired`, `admin_deletion` or `manual`.
    reason: Option<String>,
}

/// Query parameters for the recent audit events listing.
#[derive(Debug, Deserialize)]
struct RecentQuery {
    /// How many events.
    limit: Option<i64>,
}

/// API response for the health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Maps a maintenance outcome to a response; the body is the outcome itself.
fn outcome_response<T: Serialize>(outcome: &MaintenanceOutcome<T>) -> Response {
    let status: StatusCode = match outcome {
        MaintenanceOutcome::Success(_) => StatusCode::OK,
        MaintenanceOutcome::Failure { kind, .. } => match kind {
            FailureKind::Unauthorized => StatusCode::FORBIDDEN,
            FailureKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            FailureKind::Integrity => StatusCode::INTERNAL_SERVER_ERROR,
        },
    };
    (status, Json(outcome)).into_response()
}

// ============================================================================
// Tournaments
// ============================================================================

/// Handler for POST `/tournaments` endpoint.
async fn handle_submit_tournament(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<SubmitTournamentRequest>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        start_date = %req.body.start_date,
        "Handling submit_tournament request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse =
        breakshot_api::submit_tournament(&mut persistence, &clock, body, &actor, cause)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        tournament_id = %response.tournament.tournament_id,
        sequence_number = ?response.tournament.sequence_number,
        "Tournament submitted"
    );

    Ok(Json(response))
}

/// Handler for GET `/tournaments` endpoint.
async fn handle_list_tournaments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListTournamentsRequest>,
) -> Result<Json<ListTournamentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListTournamentsResponse =
        breakshot_api::list_tournaments(&mut persistence, &query)?;
    Ok(Json(response))
}

/// Handler for GET `/tournaments/history` endpoint.
async fn handle_list_history(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ListHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListHistoryResponse =
        breakshot_api::list_tournament_history(&mut persistence, query.reason.as_deref())?;
    Ok(Json(response))
}

/// Handler for GET `/tournaments/{id}` endpoint.
///
/// Accepts either the tournament id or its sequence number.
async fn handle_get_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TournamentDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentDetailResponse = breakshot_api::get_tournament(&mut persistence, &key)?;
    Ok(Json(response))
}

/// Which review command a POST targets.
#[derive(Debug, Clone, Copy)]
enum Review {
    Approve,
    Activate,
    Archive,
}

async fn review(
    app_state: &AppState,
    id: &str,
    req: ActorEnvelope<NoBody>,
    review: Review,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        tournament_id = %id,
        review = ?review,
        "Handling tournament review request"
    );

    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse = match review {
        Review::Approve => {
            breakshot_api::approve_tournament(&mut persistence, &clock, id, &actor, cause)?
        }
        Review::Activate => {
            breakshot_api::activate_tournament(&mut persistence, &clock, id, &actor, cause)?
        }
        Review::Archive => {
            breakshot_api::archive_tournament(&mut persistence, &clock, id, &actor, cause)?
        }
    };
    drop(persistence);

    info!(
        event_id = response.event_id,
        status = %response.tournament.status,
        "Tournament review applied"
    );
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/approve` endpoint.
async fn handle_approve_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    review(&app_state, &id, req, Review::Approve).await
}

/// Handler for POST `/tournaments/{id}/activate` endpoint.
async fn handle_activate_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    review(&app_state, &id, req, Review::Activate).await
}

/// Handler for POST `/tournaments/{id}/archive` endpoint.
async fn handle_archive_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    review(&app_state, &id, req, Review::Archive).await
}

/// Handler for POST `/tournaments/{id}/deny` endpoint.
async fn handle_deny_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<ReasonRequest>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        tournament_id = %id,
        "Handling deny_tournament request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse =
        breakshot_api::deny_tournament(&mut persistence, &clock, &id, body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/delete` endpoint.
async fn handle_delete_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<ReasonRequest>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        tournament_id = %id,
        "Handling delete_tournament request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse =
        breakshot_api::delete_tournament(&mut persistence, &clock, &id, body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/restore` endpoint.
async fn handle_restore_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<RestoreTournamentRequest>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        tournament_id = %id,
        target = %req.body.target_status,
        "Handling restore_tournament request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse =
        breakshot_api::restore_tournament(&mut persistence, &clock, &id, &body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/template` endpoint.
async fn handle_set_template_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<SetTemplateStatusRequest>>,
) -> Result<Json<TournamentWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        tournament_id = %id,
        template_status = %req.body.template_status,
        "Handling set_template_status request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TournamentWriteResponse =
        breakshot_api::set_template_status(&mut persistence, &clock, &id, &body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/like` endpoint.
async fn handle_like_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<LikeResponse>, HttpError> {
    let (actor, _, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LikeResponse =
        breakshot_api::like_tournament(&mut persistence, &clock, &id, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/tournaments/{id}/unlike` endpoint.
async fn handle_unlike_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<LikeResponse>, HttpError> {
    let (actor, _, NoBody {}) = req.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LikeResponse = breakshot_api::unlike_tournament(&mut persistence, &id, &actor)?;
    Ok(Json(response))
}

// ============================================================================
// Venues
// ============================================================================

/// Handler for POST `/venues` endpoint.
async fn handle_create_venue(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<CreateVenueRequest>>,
) -> Result<Json<CreateVenueResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling create_venue request"
    );

    let (actor, cause, body) = req.authenticate()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateVenueResponse =
        breakshot_api::create_venue(&mut persistence, body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for GET `/venues` endpoint.
async fn handle_list_venues(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListVenuesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListVenuesResponse = breakshot_api::list_venues(&mut persistence)?;
    Ok(Json(response))
}

// ============================================================================
// Giveaways
// ============================================================================

/// Handler for POST `/giveaways` endpoint.
async fn handle_create_giveaway(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<CreateGiveawayRequest>>,
) -> Result<Json<GiveawayWriteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        title = %req.body.title,
        end_at = %req.body.end_at,
        "Handling create_giveaway request"
    );

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GiveawayWriteResponse =
        breakshot_api::create_giveaway(&mut persistence, &clock, body, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for GET `/giveaways` endpoint.
async fn handle_list_giveaways(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListGiveawaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListGiveawaysResponse = breakshot_api::list_giveaways(&mut persistence)?;
    Ok(Json(response))
}

/// Handler for GET `/giveaways/{id}` endpoint.
async fn handle_get_giveaway(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GiveawayInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GiveawayInfo = breakshot_api::get_giveaway(&mut persistence, &id)?;
    Ok(Json(response))
}

/// Handler for POST `/giveaways/{id}/end` endpoint.
async fn handle_end_giveaway(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Json<GiveawayWriteResponse>, HttpError> {
    info!(actor_id = %req.actor_id, giveaway_id = %id, "Handling end_giveaway request");

    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GiveawayWriteResponse =
        breakshot_api::end_giveaway(&mut persistence, &clock, &id, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for POST `/giveaways/{id}/enter` endpoint.
async fn handle_enter_giveaway(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActorEnvelope<EnterGiveawayRequest>>,
) -> Result<Json<EnterGiveawayResponse>, HttpError> {
    info!(actor_id = %req.actor_id, giveaway_id = %id, "Handling enter_giveaway request");

    let (actor, cause, body) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: EnterGiveawayResponse =
        breakshot_api::enter_giveaway(&mut persistence, &clock, &id, body, &actor, cause)?;
    Ok(Json(response))
}

// ============================================================================
// Maintenance
// ============================================================================

/// Handler for POST `/maintenance/archive_expired_tournaments` endpoint.
async fn handle_archive_expired_tournaments(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Response, HttpError> {
    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome: MaintenanceOutcome<ArchiveTournamentsReport> =
        breakshot_api::archive_expired_tournaments(
            &mut persistence,
            &clock,
            app_state.horizon,
            &actor,
            &cause,
        );
    Ok(outcome_response(&outcome))
}

/// Handler for POST `/maintenance/generate_recurring_tournaments_horizon` endpoint.
async fn handle_generate_horizon(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Response, HttpError> {
    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome: MaintenanceOutcome<Vec<SeriesGeneration>> =
        breakshot_api::generate_recurring_tournaments_horizon(
            &mut persistence,
            &clock,
            app_state.horizon,
            &actor,
            &cause,
        );
    Ok(outcome_response(&outcome))
}

/// Handler for POST `/maintenance/archive_expired_giveaways` endpoint.
async fn handle_archive_expired_giveaways(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Response, HttpError> {
    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome: MaintenanceOutcome<ArchiveGiveawaysReport> =
        breakshot_api::archive_expired_giveaways(&mut persistence, &clock, &actor, &cause);
    Ok(outcome_response(&outcome))
}

/// Handler for POST `/maintenance/run` endpoint.
async fn handle_run_maintenance(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<NoBody>>,
) -> Result<Response, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        cause_id = %req.cause_id,
        "Handling run_maintenance request"
    );

    let (actor, cause, NoBody {}) = req.authenticate()?;
    let clock: Clock = app_state.clock()?;

    let mut persistence = app_state.persistence.lock().await;
    let outcome: MaintenanceOutcome<MaintenanceReport> = breakshot_api::run_maintenance(
        &mut persistence,
        &clock,
        app_state.horizon,
        &actor,
        &cause,
    );
    drop(persistence);

    crate::scheduler::log_outcome(&outcome);
    Ok(outcome_response(&outcome))
}

// ============================================================================
// Audit
// ============================================================================

/// Handler for GET `/audit/event/{event_id}` endpoint.
///
/// Returns a specific audit event by its ID.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    info!(event_id = event_id, "Handling get_audit_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventInfo = breakshot_api::get_audit_event(&mut persistence, event_id)?;
    Ok(Json(response))
}

/// Handler for GET `/audit/subject/{kind}/{id}` endpoint.
async fn handle_get_subject_audit_events(
    AxumState(app_state): AxumState<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<AuditEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventsResponse =
        breakshot_api::get_audit_events_for_subject(&mut persistence, &kind, &id)?;
    Ok(Json(response))
}

/// Handler for GET `/audit/recent` endpoint.
async fn handle_get_recent_audit_events(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<AuditEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventsResponse =
        breakshot_api::get_recent_audit_events(&mut persistence, query.limit.unwrap_or(50))?;
    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/tournaments", post(handle_submit_tournament))
        .route("/tournaments", get(handle_list_tournaments))
        .route("/tournaments/history", get(handle_list_history))
        .route("/tournaments/{id}", get(handle_get_tournament))
        .route("/tournaments/{id}/approve", post(handle_approve_tournament))
        .route("/tournaments/{id}/deny", post(handle_deny_tournament))
        .route("/tournaments/{id}/delete", post(handle_delete_tournament))
        .route("/tournaments/{id}/restore", post(handle_restore_tournament))
        .route("/tournaments/{id}/activate", post(handle_activate_tournament))
        .route("/tournaments/{id}/archive", post(handle_archive_tournament))
        .route("/tournaments/{id}/template", post(handle_set_template_status))
        .route("/tournaments/{id}/like", post(handle_like_tournament))
        .route("/tournaments/{id}/unlike", post(handle_unlike_tournament))
        .route("/venues", post(handle_create_venue))
        .route("/venues", get(handle_list_venues))
        .route("/giveaways", post(handle_create_giveaway))
        .route("/giveaways", get(handle_list_giveaways))
        .route("/giveaways/{id}", get(handle_get_giveaway))
        .route("/giveaways/{id}/end", post(handle_end_giveaway))
        .route("/giveaways/{id}/enter", post(handle_enter_giveaway))
        .route(
            "/maintenance/archive_expired_tournaments",
            post(handle_archive_expired_tournaments),
        )
        .route(
            "/maintenance/generate_recurring_tournaments_horizon",
            post(handle_generate_horizon),
        )
        .route(
            "/maintenance/archive_expired_giveaways",
            post(handle_archive_expired_giveaways),
        )
        .route("/maintenance/run", post(handle_run_maintenance))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .route(
            "/audit/subject/{kind}/{id}",
            get(handle_get_subject_audit_events),
        )
        .route("/audit/recent", get(handle_get_recent_audit_events))
        .with_state(app_state)
}
