// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{GiveawayCommand, TournamentCommand};
use crate::error::CoreError;
use crate::state::{ApplyContext, GiveawayTransition, TournamentEffect, TournamentTransition};
use breakshot_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use breakshot_domain::{
    DomainError, Giveaway, GiveawayEntry, GiveawayStatus, RecurrenceTemplate, RemovalReason,
    SeriesId, TemplateStatus, Tournament, TournamentStatus, TransitionContext, Venue,
    validate_deletion_reason, validate_giveaway_fields, validate_tournament_fields,
};

fn require_current<'a, T>(
    current: Option<&'a T>,
    command: &'static str,
) -> Result<&'a T, CoreError> {
    current.ok_or(CoreError::MissingCurrentState { command })
}

fn transition_to(
    current: &Tournament,
    target: TournamentStatus,
    ctx: &ApplyContext,
) -> Result<Tournament, CoreError> {
    let policy: TransitionContext = TransitionContext::new(ctx.today, current.start_date, ctx.role);
    current.status.validate_transition(target, &policy)?;

    let mut next: Tournament = current.clone();
    next.status = target;
    Ok(next)
}

/// Ends the template of a master that is leaving the live table for good.
fn end_template(tournament: &mut Tournament) {
    if let Some(template) = tournament.recurrence.as_mut() {
        template.status = TemplateStatus::Ended;
    }
}

/// Applies a tournament command, producing the new tournament, the
/// persistence effect and an audit event.
///
/// # Arguments
///
/// * `current` - The tournament as currently stored (live or history), or
///   `None` for a submission
/// * `command` - The command to apply
/// * `ctx` - Today's date, the current instant and the actor's role
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules or the status lifecycle
/// - A record is missing (or present) when the command requires otherwise
/// - A template command targets a tournament that is not a recurring master
#[allow(clippy::too_many_lines)]
pub fn apply_tournament(
    current: Option<&Tournament>,
    command: TournamentCommand,
    ctx: &ApplyContext,
    actor: Actor,
    cause: Cause,
) -> Result<TournamentTransition, CoreError> {
    let action_name: &'static str = command.action_name();

    let (before, tournament, effect, details): (
        StateSnapshot,
        Tournament,
        TournamentEffect,
        Option<String>,
    ) = match command {
        TournamentCommand::Submit { tournament } => {
            if current.is_some() {
                return Err(CoreError::UnexpectedCurrentState {
                    command: action_name,
                });
            }

            let mut submitted: Tournament = *tournament;
            submitted.status = TournamentStatus::Pending;
            submitted.sequence_number = None;
            submitted.created_at = ctx.now;
            if submitted.is_recurring_master {
                submitted.is_recurring = true;
                submitted.parent_recurring_tournament_id = None;
                if submitted.recurring_series_id.is_none() {
                    submitted.recurring_series_id = Some(SeriesId::generate());
                }
            }
            validate_tournament_fields(&submitted)?;

            let details: String = format!(
                "Submitted '{}' for {}",
                submitted.name, submitted.start_date
            );
            (
                StateSnapshot::absent(),
                submitted,
                TournamentEffect::Insert,
                Some(details),
            )
        }
        TournamentCommand::Approve => {
            let current: &Tournament = require_current(current, action_name)?;
            let next: Tournament = transition_to(current, TournamentStatus::Approved, ctx)?;
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::Update,
                None,
            )
        }
        TournamentCommand::Deny { reason } => {
            let current: &Tournament = require_current(current, action_name)?;
            if current.status != TournamentStatus::Pending {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidStatusTransition {
                        from: current.status.as_str().to_string(),
                        to: TournamentStatus::Deleted.as_str().to_string(),
                        reason: String::from("only pending tournaments can be denied"),
                    },
                ));
            }
            let reason: String = validate_deletion_reason(&reason)?;
            let mut next: Tournament = transition_to(current, TournamentStatus::Deleted, ctx)?;
            end_template(&mut next);
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::MoveToHistory {
                    reason: RemovalReason::AdminDeletion,
                    deletion_reason: Some(reason.clone()),
                },
                Some(reason),
            )
        }
        TournamentCommand::Delete { reason } => {
            let current: &Tournament = require_current(current, action_name)?;
            let reason: String = validate_deletion_reason(&reason)?;
            let mut next: Tournament = transition_to(current, TournamentStatus::Deleted, ctx)?;
            end_template(&mut next);
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::MoveToHistory {
                    reason: RemovalReason::AdminDeletion,
                    deletion_reason: Some(reason.clone()),
                },
                Some(reason),
            )
        }
        TournamentCommand::Restore { target } => {
            let current: &Tournament = require_current(current, action_name)?;
            let mut next: Tournament = transition_to(current, target, ctx)?;
            // A restored master comes back paused.
            if let Some(template) = next.recurrence.as_mut() {
                template.status = TemplateStatus::Paused;
            }
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::Restore,
                Some(format!("Restored as {target}")),
            )
        }
        TournamentCommand::Activate => {
            let current: &Tournament = require_current(current, action_name)?;
            let next: Tournament = transition_to(current, TournamentStatus::Active, ctx)?;
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::Update,
                None,
            )
        }
        TournamentCommand::Archive => {
            let current: &Tournament = require_current(current, action_name)?;
            let next: Tournament = transition_to(current, TournamentStatus::Archived, ctx)?;
            (
                StateSnapshot::new(current.to_snapshot_string()),
                next,
                TournamentEffect::MoveToHistory {
                    reason: RemovalReason::Manual,
                    deletion_reason: None,
                },
                None,
            )
        }
        TournamentCommand::SetTemplateStatus { status } => {
            let current: &Tournament = require_current(current, action_name)?;
            let template: RecurrenceTemplate = match (current.is_recurring_master, current.recurrence)
            {
                (true, Some(template)) => template,
                _ => return Err(CoreError::NotRecurringMaster(current.id.to_string())),
            };
            if template.status == TemplateStatus::Ended && status != TemplateStatus::Ended {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidStatusTransition {
                        from: template.status.as_str().to_string(),
                        to: status.as_str().to_string(),
                        reason: String::from("an ended template cannot be resumed"),
                    },
                ));
            }

            let mut next: Tournament = current.clone();
            next.recurrence = Some(RecurrenceTemplate {
                interval: template.interval,
                status,
            });
            (
                StateSnapshot::new(format!(
                    "{},template={}",
                    current.to_snapshot_string(),
                    template.status.as_str()
                )),
                next,
                TournamentEffect::UpdateTemplate { status },
                Some(format!(
                    "Template {} -> {}",
                    template.status.as_str(),
                    status.as_str()
                )),
            )
        }
    };

    let after: StateSnapshot = match &effect {
        TournamentEffect::UpdateTemplate { status } => StateSnapshot::new(format!(
            "{},template={}",
            tournament.to_snapshot_string(),
            status.as_str()
        )),
        _ => StateSnapshot::new(tournament.to_snapshot_string()),
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(action_name.to_string(), details),
        before,
        after,
        Subject::tournament(tournament.id),
    );

    Ok(TournamentTransition {
        tournament,
        effect,
        audit_event,
    })
}

/// Applies a giveaway command, producing the new giveaway and an audit event.
///
/// # Errors
///
/// Returns an error if the command violates the giveaway rules or a record
/// is missing (or present) when the command requires otherwise.
pub fn apply_giveaway(
    current: Option<&Giveaway>,
    command: GiveawayCommand,
    ctx: &ApplyContext,
    actor: Actor,
    cause: Cause,
) -> Result<GiveawayTransition, CoreError> {
    let action_name: &'static str = command.action_name();

    let (before, giveaway, is_new): (StateSnapshot, Giveaway, bool) = match command {
        GiveawayCommand::Create { giveaway } => {
            if current.is_some() {
                return Err(CoreError::UnexpectedCurrentState {
                    command: action_name,
                });
            }
            let mut created: Giveaway = *giveaway;
            created.status = GiveawayStatus::Active;
            created.created_at = ctx.now;
            validate_giveaway_fields(&created)?;
            (StateSnapshot::absent(), created, true)
        }
        GiveawayCommand::End => {
            let current: &Giveaway = require_current(current, action_name)?;
            current.status.validate_transition(
                GiveawayStatus::Ended,
                current.end_at,
                ctx.now,
                ctx.role,
            )?;
            let mut next: Giveaway = current.clone();
            next.status = GiveawayStatus::Ended;
            (StateSnapshot::new(current.to_snapshot_string()), next, false)
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            action_name.to_string(),
            Some(format!("Giveaway '{}'", giveaway.title)),
        ),
        before,
        StateSnapshot::new(giveaway.to_snapshot_string()),
        Subject::giveaway(giveaway.id),
    );

    Ok(GiveawayTransition {
        giveaway,
        is_new,
        audit_event,
    })
}

/// Audit event for an accepted giveaway entry.
///
/// `entries_before` is the giveaway's entry count before this entry.
#[must_use]
pub fn giveaway_entry_audit_event(
    actor: Actor,
    cause: Cause,
    entry: &GiveawayEntry,
    entries_before: u32,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("EnterGiveaway"),
            Some(format!("Entry by '{}'", entry.user_id)),
        ),
        StateSnapshot::new(format!("giveaway={},entries={entries_before}", entry.giveaway_id)),
        StateSnapshot::new(format!(
            "giveaway={},entries={},user={}",
            entry.giveaway_id,
            entries_before.saturating_add(1),
            entry.user_id
        )),
        Subject::giveaway(entry.giveaway_id),
    )
}

/// Audit event for a venue that was just stored.
///
/// # Errors
///
/// Returns `CoreError::MissingCurrentState` if the venue has no identifier yet.
pub fn venue_created_audit_event(
    actor: Actor,
    cause: Cause,
    venue: &Venue,
) -> Result<AuditEvent, CoreError> {
    let venue_id: i64 = venue.venue_id.ok_or(CoreError::MissingCurrentState {
        command: "CreateVenue",
    })?;

    Ok(AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("CreateVenue"),
            Some(format!("Venue '{}' in {}", venue.name, venue.city)),
        ),
        StateSnapshot::absent(),
        StateSnapshot::new(format!(
            "venue_id={venue_id},name={},city={}",
            venue.name, venue.city
        )),
        Subject::venue(venue_id),
    ))
}
