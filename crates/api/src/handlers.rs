// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every write authorizes the actor, applies a command through the core and
//! persists the resulting transition together with its audit event.

use std::str::FromStr;

use breakshot::{
    ApplyContext, GiveawayCommand, GiveawayTransition, TournamentCommand, TournamentTransition,
    apply_giveaway, apply_tournament,
};
use breakshot_audit::{AuditEvent, Cause, SubjectKind};
use breakshot_domain::{
    DomainError, EntryAgreement, Giveaway, GiveawayEntry, GiveawayId, GiveawayStatus,
    RecurrenceInterval, RecurrenceTemplate, RemovalReason, TemplateStatus, Tournament,
    TournamentId, TournamentStatus, Tz, Venue, local_date, parse_date, parse_time,
    parse_timestamp, validate_venue_fields,
};
use breakshot_persistence::{Persistence, PersistedTournament, TournamentFilter};
use time::{Date, OffsetDateTime, Time};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, AuditEventsResponse, CreateGiveawayRequest, CreateVenueRequest,
    CreateVenueResponse, EnterGiveawayRequest, EnterGiveawayResponse, GiveawayInfo,
    GiveawayWriteResponse, HistoryRecordInfo, LikeResponse, ListGiveawaysResponse,
    ListHistoryResponse, ListTournamentsRequest, ListTournamentsResponse, ListVenuesResponse,
    ReasonRequest, RestoreTournamentRequest, SetTemplateStatusRequest, SubmitTournamentRequest,
    TournamentDetailResponse, TournamentInfo, TournamentWriteResponse, VenueInfo,
};

/// Upper bound on `get_recent_audit_events`.
pub const MAX_RECENT_AUDIT_EVENTS: i64 = 500;

/// The instant and local date a request is handled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// The current instant.
    pub now: OffsetDateTime,
    /// The calendar date in the service timezone.
    pub today: Date,
}

impl Clock {
    /// Creates a clock from explicit values.
    #[must_use]
    pub const fn new(now: OffsetDateTime, today: Date) -> Self {
        Self { now, today }
    }

    /// Reads the clock for `now` in `timezone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the local date cannot be computed.
    pub fn at(now: OffsetDateTime, timezone: Tz) -> Result<Self, ApiError> {
        let today: Date = local_date(now, timezone).map_err(translate_domain_error)?;
        Ok(Self::new(now, today))
    }

    const fn context(&self, actor: &AuthenticatedActor) -> ApplyContext {
        ApplyContext::new(self.today, self.now, actor.role)
    }
}

fn parse<T: FromStr<Err = DomainError>>(value: &str) -> Result<T, ApiError> {
    value.trim().parse::<T>().map_err(translate_domain_error)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)
}

fn tournament_written(
    persisted: &PersistedTournament,
    message: String,
) -> Result<TournamentWriteResponse, ApiError> {
    Ok(TournamentWriteResponse {
        event_id: persisted.event_id,
        tournament: TournamentInfo::from_tournament(&persisted.tournament)?,
        message,
    })
}

/// Applies a tournament command and persists the transition.
fn apply_and_persist(
    persistence: &mut Persistence,
    clock: &Clock,
    current: Option<&Tournament>,
    command: TournamentCommand,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<PersistedTournament, ApiError> {
    let transition: TournamentTransition = apply_tournament(
        current,
        command,
        &clock.context(authenticated_actor),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_tournament_transition(&transition, clock.now)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Tournaments
// ============================================================================

/// Submits a tournament, or a recurring master, for review.
///
/// The tournament lands in `pending` with a fresh sequence number.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a director or admin
/// - A field is malformed or violates a tournament rule
/// - The referenced venue does not exist
pub fn submit_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    request: SubmitTournamentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_submit_tournament(authenticated_actor)?;

    let start_date: Date = parse_date(&request.start_date).map_err(translate_domain_error)?;
    let start_time: Option<Time> = request
        .start_time
        .as_deref()
        .map(parse_time)
        .transpose()
        .map_err(translate_domain_error)?;
    let recurrence: Option<RecurrenceTemplate> = request
        .recurrence_interval
        .as_deref()
        .map(parse::<RecurrenceInterval>)
        .transpose()?
        .map(|interval| RecurrenceTemplate {
            interval,
            status: TemplateStatus::Active,
        });

    if let Some(venue_id) = request.venue_id {
        persistence
            .get_venue(venue_id)
            .map_err(translate_persistence_error)?;
    }

    let tournament: Tournament = Tournament {
        id: TournamentId::generate(),
        sequence_number: None,
        name: request.name.trim().to_string(),
        game_type: request.game_type.trim().to_string(),
        format: request.format.trim().to_string(),
        start_date,
        start_time,
        venue_id: request.venue_id,
        fee_cents: request.fee_cents,
        equipment: request.equipment,
        table_size: request.table_size,
        max_players: request.max_players,
        is_recurring: recurrence.is_some(),
        is_recurring_master: recurrence.is_some(),
        reports_to_fargo: request.reports_to_fargo,
        is_open_tournament: request.is_open_tournament,
        status: TournamentStatus::Pending,
        recurring_series_id: None,
        parent_recurring_tournament_id: None,
        recurrence,
        director_id: authenticated_actor.id.clone(),
        created_at: clock.now,
    };

    let persisted: PersistedTournament = apply_and_persist(
        persistence,
        clock,
        None,
        TournamentCommand::Submit {
            tournament: Box::new(tournament),
        },
        authenticated_actor,
        cause,
    )?;

    let message: String = format!(
        "Submitted tournament #{} for review",
        persisted.tournament.sequence_number.unwrap_or_default()
    );
    tournament_written(&persisted, message)
}

/// Retrieves a live tournament by id or by sequence number.
///
/// A key made only of digits is treated as a sequence number.
///
/// # Errors
///
/// Returns an error if the key is malformed or no live tournament matches.
pub fn get_tournament(
    persistence: &mut Persistence,
    key: &str,
) -> Result<TournamentDetailResponse, ApiError> {
    let tournament: Tournament = match key.trim().parse::<i64>() {
        Ok(sequence_number) => persistence
            .get_tournament_by_sequence(sequence_number)
            .map_err(translate_persistence_error)?,
        Err(_) => persistence
            .get_tournament(parse::<TournamentId>(key)?)
            .map_err(translate_persistence_error)?,
    };

    let like_count: u32 = persistence
        .count_likes(tournament.id)
        .map_err(translate_persistence_error)?;

    Ok(TournamentDetailResponse {
        tournament: TournamentInfo::from_tournament(&tournament)?,
        like_count,
    })
}

/// Lists live tournaments matching the request's filters, ordered by date.
///
/// # Errors
///
/// Returns an error if a filter value is malformed or the query fails.
pub fn list_tournaments(
    persistence: &mut Persistence,
    request: &ListTournamentsRequest,
) -> Result<ListTournamentsResponse, ApiError> {
    let filter: TournamentFilter = TournamentFilter {
        status: request
            .status
            .as_deref()
            .map(parse::<TournamentStatus>)
            .transpose()?,
        venue_id: request.venue_id,
        from: parse_optional_date(request.from.as_deref())?,
        to: parse_optional_date(request.to.as_deref())?,
        series_id: request.series_id.as_deref().map(parse).transpose()?,
    };

    let tournaments: Vec<TournamentInfo> = persistence
        .list_tournaments(&filter)
        .map_err(translate_persistence_error)?
        .iter()
        .map(TournamentInfo::from_tournament)
        .collect::<Result<_, _>>()?;

    Ok(ListTournamentsResponse { tournaments })
}

/// Lists tournament history, newest first.
///
/// # Errors
///
/// Returns an error if the reason is unknown or the query fails.
pub fn list_tournament_history(
    persistence: &mut Persistence,
    reason: Option<&str>,
) -> Result<ListHistoryResponse, ApiError> {
    let reason: Option<RemovalReason> = reason.map(parse).transpose()?;

    let records: Vec<HistoryRecordInfo> = persistence
        .list_history(reason)
        .map_err(translate_persistence_error)?
        .iter()
        .map(HistoryRecordInfo::from_record)
        .collect::<Result<_, _>>()?;

    Ok(ListHistoryResponse { records })
}

fn review_live_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    command: TournamentCommand,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<PersistedTournament, ApiError> {
    let tournament_id: TournamentId = parse(tournament_id)?;
    let current: Tournament = persistence
        .get_tournament(tournament_id)
        .map_err(translate_persistence_error)?;

    apply_and_persist(
        persistence,
        clock,
        Some(&current),
        command,
        authenticated_actor,
        cause,
    )
}

/// Approves a pending tournament.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the tournament is not
/// live or it is not pending.
pub fn approve_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "approve_tournament")?;

    let persisted: PersistedTournament = review_live_tournament(
        persistence,
        clock,
        tournament_id,
        TournamentCommand::Approve,
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, String::from("Tournament approved"))
}

/// Denies a pending tournament, moving it to history.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the reason is blank or
/// the tournament is not pending.
pub fn deny_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    request: ReasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "deny_tournament")?;

    let persisted: PersistedTournament = review_live_tournament(
        persistence,
        clock,
        tournament_id,
        TournamentCommand::Deny {
            reason: request.reason,
        },
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, String::from("Tournament denied"))
}

/// Deletes a live tournament, moving it to history with its likes removed.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the reason is blank or
/// the tournament is not live.
pub fn delete_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    request: ReasonRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "delete_tournament")?;

    let persisted: PersistedTournament = review_live_tournament(
        persistence,
        clock,
        tournament_id,
        TournamentCommand::Delete {
            reason: request.reason,
        },
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, String::from("Tournament deleted"))
}

/// Restores the most recent deletion of a tournament.
///
/// The restored row keeps its sequence number.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the target status is not
/// `pending` or `approved`, or there is no deletion to restore.
pub fn restore_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    request: &RestoreTournamentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "restore_tournament")?;

    let tournament_id: TournamentId = parse(tournament_id)?;
    let target: TournamentStatus = parse(&request.target_status)?;
    let deleted: Tournament = persistence
        .get_restorable_tournament(tournament_id)
        .map_err(translate_persistence_error)?
        .tournament;

    let persisted: PersistedTournament = apply_and_persist(
        persistence,
        clock,
        Some(&deleted),
        TournamentCommand::Restore { target },
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, format!("Tournament restored as {target}"))
}

/// Marks an approved tournament as running.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the scheduler, or the
/// tournament is not approved.
pub fn activate_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_activate_tournament(authenticated_actor)?;

    let persisted: PersistedTournament = review_live_tournament(
        persistence,
        clock,
        tournament_id,
        TournamentCommand::Activate,
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, String::from("Tournament activated"))
}

/// Archives a past tournament by hand.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the tournament cannot
/// be archived yet.
pub fn archive_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "archive_tournament")?;

    let persisted: PersistedTournament = review_live_tournament(
        persistence,
        clock,
        tournament_id,
        TournamentCommand::Archive,
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, String::from("Tournament archived"))
}

/// Pauses, resumes or ends a recurring master's template.
///
/// Works on a master whether it is live or archived.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the tournament is unknown
/// or not a master, or the template has already ended.
pub fn set_template_status(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    request: &SetTemplateStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TournamentWriteResponse, ApiError> {
    AuthorizationService::authorize_review_tournament(authenticated_actor, "set_template_status")?;

    let tournament_id: TournamentId = parse(tournament_id)?;
    let status: TemplateStatus = parse(&request.template_status)?;
    let Some(master) = persistence
        .find_tournament(tournament_id)
        .map_err(translate_persistence_error)?
    else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Tournament"),
            message: format!("No tournament with id {tournament_id}"),
        });
    };

    let persisted: PersistedTournament = apply_and_persist(
        persistence,
        clock,
        Some(&master),
        TournamentCommand::SetTemplateStatus { status },
        authenticated_actor,
        cause,
    )?;
    tournament_written(&persisted, format!("Template is now {}", status.as_str()))
}

/// Likes a live tournament. Liking twice is a no-op.
///
/// # Errors
///
/// Returns an error if the actor may not participate or the tournament is
/// not live.
pub fn like_tournament(
    persistence: &mut Persistence,
    clock: &Clock,
    tournament_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LikeResponse, ApiError> {
    AuthorizationService::authorize_participate(authenticated_actor, "like_tournament")?;

    let id: TournamentId = parse(tournament_id)?;
    let changed: bool = persistence
        .like_tournament(id, &authenticated_actor.id, clock.now)
        .map_err(translate_persistence_error)?;
    let like_count: u32 = persistence
        .count_likes(id)
        .map_err(translate_persistence_error)?;

    Ok(LikeResponse {
        tournament_id: id.to_string(),
        liked: true,
        changed,
        like_count,
    })
}

/// Removes the actor's like. Unliking twice is a no-op.
///
/// # Errors
///
/// Returns an error if the actor may not participate or the id is malformed.
pub fn unlike_tournament(
    persistence: &mut Persistence,
    tournament_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LikeResponse, ApiError> {
    AuthorizationService::authorize_participate(authenticated_actor, "unlike_tournament")?;

    let id: TournamentId = parse(tournament_id)?;
    let changed: bool = persistence
        .unlike_tournament(id, &authenticated_actor.id)
        .map_err(translate_persistence_error)?;
    let like_count: u32 = persistence
        .count_likes(id)
        .map_err(translate_persistence_error)?;

    Ok(LikeResponse {
        tournament_id: id.to_string(),
        liked: false,
        changed,
        like_count,
    })
}

// ============================================================================
// Venues
// ============================================================================

/// Registers a venue.
///
/// # Errors
///
/// Returns an error if the actor is not a director or admin, or the name
/// or city is blank.
pub fn create_venue(
    persistence: &mut Persistence,
    request: CreateVenueRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateVenueResponse, ApiError> {
    AuthorizationService::authorize_create_venue(authenticated_actor)?;

    let venue: Venue = Venue::new(
        request.name.trim().to_string(),
        request.city.trim().to_string(),
        request.region,
        request.address,
    );
    validate_venue_fields(&venue).map_err(translate_domain_error)?;

    let (venue, event_id): (Venue, i64) = persistence
        .create_venue(&venue, authenticated_actor.to_audit_actor(), cause)
        .map_err(translate_persistence_error)?;

    Ok(CreateVenueResponse {
        event_id,
        venue: VenueInfo::from(venue),
    })
}

/// Lists all venues.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_venues(persistence: &mut Persistence) -> Result<ListVenuesResponse, ApiError> {
    let venues: Vec<VenueInfo> = persistence
        .list_venues()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(VenueInfo::from)
        .collect();
    Ok(ListVenuesResponse { venues })
}

// ============================================================================
// Giveaways
// ============================================================================

fn giveaway_info(
    persistence: &mut Persistence,
    giveaway: &Giveaway,
) -> Result<GiveawayInfo, ApiError> {
    let entries: Vec<GiveawayEntry> = persistence
        .list_giveaway_entries(giveaway.id)
        .map_err(translate_persistence_error)?;
    let entry_count: u32 = u32::try_from(entries.len()).map_err(|_| ApiError::Internal {
        message: format!("Giveaway {} has too many entries to count", giveaway.id),
    })?;
    GiveawayInfo::from_giveaway(giveaway, entry_count)
}

fn persist_giveaway(
    persistence: &mut Persistence,
    clock: &Clock,
    current: Option<&Giveaway>,
    command: GiveawayCommand,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GiveawayWriteResponse, ApiError> {
    let transition: GiveawayTransition = apply_giveaway(
        current,
        command,
        &clock.context(authenticated_actor),
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_giveaway_transition(&transition)
        .map_err(translate_persistence_error)?;

    Ok(GiveawayWriteResponse {
        event_id,
        giveaway: giveaway_info(persistence, &transition.giveaway)?,
    })
}

/// Creates a giveaway. It starts `active`.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or a field is invalid.
pub fn create_giveaway(
    persistence: &mut Persistence,
    clock: &Clock,
    request: CreateGiveawayRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GiveawayWriteResponse, ApiError> {
    AuthorizationService::authorize_manage_giveaway(authenticated_actor, "create_giveaway")?;

    let end_at: OffsetDateTime = parse_timestamp(&request.end_at).map_err(translate_domain_error)?;
    let giveaway: Giveaway = Giveaway {
        id: GiveawayId::generate(),
        title: request.title.trim().to_string(),
        prize_value_cents: request.prize_value_cents,
        prize_details: request.prize_details,
        end_at,
        single_entry: request.single_entry,
        maximum_entries: request.maximum_entries,
        minimum_age: request.minimum_age,
        status: GiveawayStatus::Active,
        created_by: authenticated_actor.id.clone(),
        created_at: clock.now,
    };

    persist_giveaway(
        persistence,
        clock,
        None,
        GiveawayCommand::Create {
            giveaway: Box::new(giveaway),
        },
        authenticated_actor,
        cause,
    )
}

/// Retrieves a live giveaway with its entry count.
///
/// # Errors
///
/// Returns an error if the id is malformed or the giveaway is not live.
pub fn get_giveaway(
    persistence: &mut Persistence,
    giveaway_id: &str,
) -> Result<GiveawayInfo, ApiError> {
    let giveaway: Giveaway = persistence
        .get_giveaway(parse(giveaway_id)?)
        .map_err(translate_persistence_error)?;
    giveaway_info(persistence, &giveaway)
}

/// Lists live giveaways.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_giveaways(persistence: &mut Persistence) -> Result<ListGiveawaysResponse, ApiError> {
    let giveaways: Vec<Giveaway> = persistence
        .list_giveaways()
        .map_err(translate_persistence_error)?;
    let giveaways: Vec<GiveawayInfo> = giveaways
        .iter()
        .map(|giveaway| giveaway_info(persistence, giveaway))
        .collect::<Result<_, _>>()?;
    Ok(ListGiveawaysResponse { giveaways })
}

/// Ends a giveaway before its end time. It is archived on the next run.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the giveaway has
/// already ended.
pub fn end_giveaway(
    persistence: &mut Persistence,
    clock: &Clock,
    giveaway_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GiveawayWriteResponse, ApiError> {
    AuthorizationService::authorize_manage_giveaway(authenticated_actor, "end_giveaway")?;

    let current: Giveaway = persistence
        .get_giveaway(parse(giveaway_id)?)
        .map_err(translate_persistence_error)?;

    persist_giveaway(
        persistence,
        clock,
        Some(&current),
        GiveawayCommand::End,
        authenticated_actor,
        cause,
    )
}

/// Enters the actor into a giveaway.
///
/// # Errors
///
/// Returns an error if the actor may not participate, an agreement is
/// missing, or the giveaway is closed, full or already entered.
pub fn enter_giveaway(
    persistence: &mut Persistence,
    clock: &Clock,
    giveaway_id: &str,
    request: EnterGiveawayRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EnterGiveawayResponse, ApiError> {
    AuthorizationService::authorize_participate(authenticated_actor, "enter_giveaway")?;

    let agreement: EntryAgreement = EntryAgreement {
        is_of_age: request.is_of_age,
        accepted_rules: request.accepted_rules,
        accepted_privacy: request.accepted_privacy,
    };

    let entry: GiveawayEntry = persistence
        .enter_giveaway(
            parse(giveaway_id)?,
            &authenticated_actor.id,
            agreement,
            clock.now,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_persistence_error)?;

    EnterGiveawayResponse::from_entry(&entry)
}

// ============================================================================
// Audit
// ============================================================================

/// Retrieves a single audit event.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    persistence
        .get_audit_event(event_id)
        .map(AuditEventInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves the audit trail of one subject, oldest first.
///
/// # Errors
///
/// Returns an error if the kind is unknown or the query fails.
pub fn get_audit_events_for_subject(
    persistence: &mut Persistence,
    kind: &str,
    subject_id: &str,
) -> Result<AuditEventsResponse, ApiError> {
    let kind: SubjectKind = parse(kind)?;
    let events: Vec<AuditEvent> = persistence
        .get_audit_events_for_subject(kind, subject_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditEventsResponse {
        events: events.into_iter().map(AuditEventInfo::from).collect(),
    })
}

/// Retrieves the most recent audit events, newest first.
///
/// `limit` is clamped to `1..=MAX_RECENT_AUDIT_EVENTS`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_recent_audit_events(
    persistence: &mut Persistence,
    limit: i64,
) -> Result<AuditEventsResponse, ApiError> {
    let events: Vec<AuditEvent> = persistence
        .get_recent_audit_events(limit.clamp(1, MAX_RECENT_AUDIT_EVENTS))
        .map_err(translate_persistence_error)?;
    Ok(AuditEventsResponse {
        events: events.into_iter().map(AuditEventInfo::from).collect(),
    })
}
