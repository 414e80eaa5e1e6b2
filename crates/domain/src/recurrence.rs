// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence date arithmetic for recurring tournament series.
//!
//! ## Invariants
//!
//! - A series never receives two instances on the same date
//! - Planned dates are never before `today`
//! - Monthly series keep the master's day-of-month, clamped to short months
//!   (a series anchored on the 31st lands on Feb 28/29, then back on Mar 31)

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Date, Duration, Month};

/// Number of future instances every active series keeps available.
pub const DEFAULT_HORIZON: usize = 4;

/// Upper bound on interval steps taken while planning one series.
///
/// Reached only by templates whose anchor lies decades in the past.
const MAX_PLANNING_STEPS: usize = 10_000;

/// How often a recurring series repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceInterval {
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Same day every month.
    Monthly,
}

impl RecurrenceInterval {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns the first occurrence strictly after `after`.
    ///
    /// `anchor_day` is the day-of-month monthly series aim for.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` past the end of the
    /// supported calendar.
    pub fn next_after(self, after: Date, anchor_day: u8) -> Result<Date, DomainError> {
        let stepped: Option<Date> = match self {
            Self::Weekly => after.checked_add(Duration::weeks(1)),
            Self::Biweekly => after.checked_add(Duration::weeks(2)),
            Self::Monthly => add_one_month(after, anchor_day),
        };

        stepped.ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("stepping {} from {after}", self.as_str()),
        })
    }
}

impl FromStr for RecurrenceInterval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(DomainError::InvalidRecurrenceInterval(s.to_string())),
        }
    }
}

/// Whether a master keeps producing instances.
///
/// Independent of the master row's own status: an archived master with an
/// active template keeps generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    /// Generating.
    #[default]
    Active,
    /// Temporarily not generating.
    Paused,
    /// Permanently stopped.
    Ended,
}

impl TemplateStatus {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }
}

impl FromStr for TemplateStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "ended" => Ok(Self::Ended),
            _ => Err(DomainError::InvalidTemplateStatus(s.to_string())),
        }
    }
}

fn add_one_month(after: Date, anchor_day: u8) -> Option<Date> {
    let (year, month): (i32, Month) = if after.month() == Month::December {
        (after.year().checked_add(1)?, Month::January)
    } else {
        (after.year(), after.month().next())
    };

    let day: u8 = anchor_day.min(time::util::days_in_month(month, year));
    Date::from_calendar_date(year, month, day).ok()
}

/// Computes the dates a series still needs to reach `horizon` future
/// instances.
///
/// # Arguments
///
/// * `master_date` - The master's own date; the anchor when no future
///   instance exists, and the source of the monthly day-of-month
/// * `interval` - The series interval
/// * `today` - Dates before this are never planned
/// * `existing_future` - Dates of the series' instances on or after `today`
/// * `withdrawn` - Dates an admin deleted from the series; stepped over,
///   never planned again and not counted toward the horizon
/// * `horizon` - How many future instances the series must have
///
/// # Returns
///
/// The missing dates in ascending order. Empty when the series already has
/// `horizon` or more future instances.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows or the anchor is too far in
/// the past to step forward from.
pub fn plan_series_dates(
    master_date: Date,
    interval: RecurrenceInterval,
    today: Date,
    existing_future: &[Date],
    withdrawn: &[Date],
    horizon: usize,
) -> Result<Vec<Date>, DomainError> {
    let existing: BTreeSet<Date> = existing_future
        .iter()
        .copied()
        .filter(|d| *d >= today)
        .collect();

    let deficit: usize = horizon.saturating_sub(existing.len());
    if deficit == 0 {
        return Ok(Vec::new());
    }

    let mut cursor: Date = existing.last().copied().unwrap_or(master_date);
    let mut planned: Vec<Date> = Vec::with_capacity(deficit);
    let mut steps: usize = 0;

    while planned.len() < deficit {
        steps += 1;
        if steps > MAX_PLANNING_STEPS {
            return Err(DomainError::DateArithmeticOverflow {
                operation: format!("planning a {} series from {master_date}", interval.as_str()),
            });
        }

        cursor = interval.next_after(cursor, master_date.day())?;
        if cursor >= today && !existing.contains(&cursor) && !withdrawn.contains(&cursor) {
            planned.push(cursor);
        }
    }

    Ok(planned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::Weekday;
    use time::macros::date;

    #[test]
    fn test_weekly_monday_series_with_one_future_instance() {
        // Tuesday, with next Monday already scheduled.
        let today = date!(2026 - 03 - 10);
        let master = date!(2026 - 02 - 02);
        let existing = [date!(2026 - 03 - 16)];

        let planned = plan_series_dates(
            master,
            RecurrenceInterval::Weekly,
            today,
            &existing,
            &[],
            DEFAULT_HORIZON,
        )
        .unwrap();

        assert_eq!(
            planned,
            vec![
                date!(2026 - 03 - 23),
                date!(2026 - 03 - 30),
                date!(2026 - 04 - 06)
            ]
        );
        assert!(planned.iter().all(|d| d.weekday() == Weekday::Monday));
    }

    #[test]
    fn test_no_future_instances_steps_from_master() {
        let today = date!(2026 - 03 - 10);
        let master = date!(2026 - 01 - 05);

        let planned =
            plan_series_dates(master, RecurrenceInterval::Weekly, today, &[], &[], 4).unwrap();

        assert_eq!(planned.len(), 4);
        assert_eq!(planned[0], date!(2026 - 03 - 16));
        assert!(planned.iter().all(|d| *d >= today));
    }

    #[test]
    fn test_full_horizon_plans_nothing() {
        let today = date!(2026 - 03 - 10);
        let existing = [
            date!(2026 - 03 - 16),
            date!(2026 - 03 - 23),
            date!(2026 - 03 - 30),
            date!(2026 - 04 - 06),
            date!(2026 - 04 - 13),
        ];

        let planned = plan_series_dates(
            date!(2026 - 03 - 16),
            RecurrenceInterval::Weekly,
            today,
            &existing,
            &[],
            4,
        )
        .unwrap();

        assert!(planned.is_empty());
    }

    #[test]
    fn test_past_existing_dates_are_ignored() {
        let today = date!(2026 - 03 - 10);
        let existing = [date!(2026 - 03 - 02), date!(2026 - 03 - 16)];

        let planned = plan_series_dates(
            date!(2026 - 03 - 02),
            RecurrenceInterval::Weekly,
            today,
            &existing,
            &[],
            2,
        )
        .unwrap();

        assert_eq!(planned, vec![date!(2026 - 03 - 23)]);
    }

    #[test]
    fn test_biweekly_spacing() {
        let today = date!(2026 - 03 - 01);
        let planned = plan_series_dates(
            date!(2026 - 03 - 04),
            RecurrenceInterval::Biweekly,
            today,
            &[date!(2026 - 03 - 04)],
            &[],
            3,
        )
        .unwrap();

        assert_eq!(planned, vec![date!(2026 - 03 - 18), date!(2026 - 04 - 01)]);
    }

    #[test]
    fn test_monthly_clamps_and_recovers_anchor_day() {
        let today = date!(2026 - 01 - 01);
        let planned = plan_series_dates(
            date!(2026 - 01 - 31),
            RecurrenceInterval::Monthly,
            today,
            &[date!(2026 - 01 - 31)],
            &[],
            4,
        )
        .unwrap();

        assert_eq!(
            planned,
            vec![
                date!(2026 - 02 - 28),
                date!(2026 - 03 - 31),
                date!(2026 - 04 - 30)
            ]
        );
    }

    #[test]
    fn test_monthly_rolls_over_year() {
        let next = RecurrenceInterval::Monthly
            .next_after(date!(2026 - 12 - 15), 15)
            .unwrap();
        assert_eq!(next, date!(2027 - 01 - 15));
    }

    #[test]
    fn test_planned_dates_never_collide_with_existing() {
        let today = date!(2026 - 03 - 10);
        let existing = [date!(2026 - 03 - 16), date!(2026 - 03 - 30)];

        let planned = plan_series_dates(
            date!(2026 - 03 - 02),
            RecurrenceInterval::Weekly,
            today,
            &existing,
            &[],
            4,
        )
        .unwrap();

        // Stepping starts after the last existing date, so the gap on the
        // 23rd is left alone rather than back-filled.
        assert_eq!(planned, vec![date!(2026 - 04 - 06), date!(2026 - 04 - 13)]);
        for date in &planned {
            assert!(!existing.contains(date));
        }
    }

    #[test]
    fn test_interval_string_round_trip() {
        for interval in [
            RecurrenceInterval::Weekly,
            RecurrenceInterval::Biweekly,
            RecurrenceInterval::Monthly,
        ] {
            assert_eq!(interval.as_str().parse::<RecurrenceInterval>(), Ok(interval));
        }
        assert!("daily".parse::<RecurrenceInterval>().is_err());
    }

    #[test]
    fn test_template_status_parse() {
        assert_eq!("paused".parse::<TemplateStatus>(), Ok(TemplateStatus::Paused));
        assert!("stopped".parse::<TemplateStatus>().is_err());
    }

    #[test]
    fn test_withdrawn_date_is_stepped_over() {
        let today = date!(2026 - 03 - 10);
        let existing = [
            date!(2026 - 03 - 16),
            date!(2026 - 03 - 23),
            date!(2026 - 03 - 30),
        ];
        let withdrawn = [date!(2026 - 04 - 06)];

        let planned = plan_series_dates(
            date!(2026 - 02 - 02),
            RecurrenceInterval::Weekly,
            today,
            &existing,
            &withdrawn,
            4,
        )
        .unwrap();

        assert_eq!(planned, vec![date!(2026 - 04 - 13)]);
    }

    #[test]
    fn test_withdrawn_dates_do_not_fill_the_horizon() {
        let today = date!(2026 - 03 - 10);
        let withdrawn = [date!(2026 - 03 - 16), date!(2026 - 03 - 23)];

        let planned = plan_series_dates(
            date!(2026 - 02 - 02),
            RecurrenceInterval::Weekly,
            today,
            &[],
            &withdrawn,
            2,
        )
        .unwrap();

        assert_eq!(planned, vec![date!(2026 - 03 - 30), date!(2026 - 04 - 06)]);
    }
}
