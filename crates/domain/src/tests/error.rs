// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidStatusTransition {
        from: String::from("archived"),
        to: String::from("approved"),
        reason: String::from("cannot transition from terminal state"),
    };
    assert_eq!(
        format!("{err}"),
        "Cannot transition from 'archived' to 'approved': cannot transition from terminal state"
    );

    let err: DomainError = DomainError::InvalidTournamentStatus {
        status: String::from("declined"),
    };
    assert_eq!(format!("{err}"), "Invalid tournament status: declined");

    let err: DomainError = DomainError::InvalidTournamentField {
        field: "name",
        reason: String::from("cannot be empty"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid tournament field 'name': cannot be empty"
    );

    let err: DomainError = DomainError::MissingDeletionReason;
    assert_eq!(
        format!("{err}"),
        "A reason is required when deleting or denying a tournament"
    );

    let err: DomainError = DomainError::GiveawayEntriesExhausted {
        maximum_entries: 100,
    };
    assert_eq!(
        format!("{err}"),
        "Giveaway has reached its maximum of 100 entries"
    );

    let err: DomainError = DomainError::InvalidIdentifier {
        kind: "tournament",
        value: String::from("abc"),
    };
    assert_eq!(format!("{err}"), "Invalid tournament identifier: 'abc'");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::GiveawayEntryWindowClosed);
    assert_eq!(err.to_string(), "Giveaway entry window has closed");
}
