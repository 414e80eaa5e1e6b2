// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{NOW, create_test_actor, create_test_cause, create_test_giveaway, ctx};
use crate::{
    GiveawayCommand, apply_giveaway, giveaway_entry_audit_event, venue_created_audit_event,
};
use breakshot_audit::SubjectKind;
use breakshot_domain::{ActorRole, EntryAgreement, GiveawayEntry, GiveawayStatus, Venue};
use time::macros::datetime;

#[test]
fn test_create_giveaway_starts_active() {
    let giveaway = create_test_giveaway(GiveawayStatus::Ended, datetime!(2026-04-01 00:00 UTC));

    let transition = apply_giveaway(
        None,
        GiveawayCommand::Create {
            giveaway: Box::new(giveaway),
        },
        &ctx(ActorRole::Admin),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(transition.is_new);
    assert_eq!(transition.giveaway.status, GiveawayStatus::Active);
    assert_eq!(transition.giveaway.created_at, NOW);
    assert_eq!(transition.audit_event.subject.kind, SubjectKind::Giveaway);
}

#[test]
fn test_create_giveaway_ending_in_the_past_rejected() {
    let giveaway = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-03-01 00:00 UTC));

    let result = apply_giveaway(
        None,
        GiveawayCommand::Create {
            giveaway: Box::new(giveaway),
        },
        &ctx(ActorRole::Admin),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_err());
}

#[test]
fn test_admin_ends_giveaway_early() {
    let giveaway = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-04-01 00:00 UTC));

    let transition = apply_giveaway(
        Some(&giveaway),
        GiveawayCommand::End,
        &ctx(ActorRole::Admin),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(!transition.is_new);
    assert_eq!(transition.giveaway.status, GiveawayStatus::Ended);
    assert_eq!(transition.audit_event.action.name, "EndGiveaway");
}

#[test]
fn test_player_cannot_end_giveaway() {
    let giveaway = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-04-01 00:00 UTC));

    let result = apply_giveaway(
        Some(&giveaway),
        GiveawayCommand::End,
        &ctx(ActorRole::Player),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_err());
}

#[test]
fn test_entry_audit_event_counts_entries() {
    let giveaway = create_test_giveaway(GiveawayStatus::Active, datetime!(2026-04-01 00:00 UTC));
    let entry: GiveawayEntry = GiveawayEntry {
        entry_id: None,
        giveaway_id: giveaway.id,
        user_id: String::from("player-7"),
        entered_at: NOW,
        agreement: EntryAgreement {
            is_of_age: true,
            accepted_rules: true,
            accepted_privacy: true,
        },
    };

    let event = giveaway_entry_audit_event(create_test_actor(), create_test_cause(), &entry, 2);

    assert_eq!(event.action.name, "EnterGiveaway");
    assert_eq!(event.subject.id, giveaway.id.to_string());
    assert!(event.before.data.ends_with("entries=2"));
    assert!(event.after.data.contains("entries=3"));
}

#[test]
fn test_venue_audit_event_requires_stored_venue() {
    let mut venue: Venue = Venue::new(
        String::from("Corner Pocket"),
        String::from("Austin"),
        Some(String::from("TX")),
        None,
    );

    assert!(venue_created_audit_event(create_test_actor(), create_test_cause(), &venue).is_err());

    venue.venue_id = Some(12);
    let event = venue_created_audit_event(create_test_actor(), create_test_cause(), &venue).unwrap();
    assert_eq!(event.subject.kind, SubjectKind::Venue);
    assert_eq!(event.subject.id, "12");
    assert_eq!(event.before.data, "absent");
}
