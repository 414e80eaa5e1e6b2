// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use breakshot_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject, SubjectKind};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn row_to_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;
    let kind: SubjectKind = row.subject_kind.parse::<SubjectKind>()?;

    Ok(AuditEvent::with_id(
        row.event_id,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        Subject::new(kind, row.subject_id),
    ))
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no such event exists, or an
/// error if the stored JSON cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    row_to_event(row)
}

/// Retrieves every audit event recorded against a subject, oldest first.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_events_for_subject(
    conn: &mut SqliteConnection,
    kind: SubjectKind,
    subject_id: &str,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::subject_kind.eq(kind.as_str()))
        .filter(audit_events::subject_id.eq(subject_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(row_to_event).collect()
}

/// Retrieves the most recent audit events across all subjects, newest first.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_recent_audit_events(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(row_to_event).collect()
}
