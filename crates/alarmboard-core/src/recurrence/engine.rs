//! Next-occurrence search.
//!
//! The search walks forward one calendar day at a time from `now`'s date and
//! is bounded by a fixed horizon, so an impossible rule (an empty weekday set,
//! a monthly day no month has within reach) terminates with
//! [`CoreError::Unresolvable`] instead of looping.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::spec::{build_label, RepeatRule, RepeatSpec};
use crate::alarm::AlarmTime;
use crate::error::{CoreError, Result};

/// Default number of days searched past `now`'s date.
pub const SEARCH_HORIZON_DAYS: i64 = 365;

/// Largest horizon a search will walk; longer requests are clamped.
pub const MAX_SEARCH_HORIZON_DAYS: i64 = 366 * 4;

/// Sunday 1970-01-04 as days from 0001-01-01; anchors week numbering for
/// interval rules.
const REFERENCE_SUNDAY_CE: i64 = 719_166;

/// Whole weeks between the reference week and the week containing `date`.
fn week_index(date: NaiveDate) -> i64 {
    let week_start =
        i64::from(date.num_days_from_ce()) - i64::from(date.weekday().num_days_from_sunday());
    (week_start - REFERENCE_SUNDAY_CE).div_euclid(7)
}

/// Whether `date` is a firing day for `spec`. `RepeatRule::None` matches every
/// day; the time-of-day comparison in the search picks today or tomorrow.
pub fn matches_date(spec: &RepeatSpec, date: NaiveDate) -> bool {
    if spec.is_monthly() {
        return spec.monthly_days().contains(&(date.day() as u8));
    }
    match spec.rule {
        RepeatRule::None => true,
        RepeatRule::Weekly { weekdays } => weekdays.contains(date.weekday()),
        RepeatRule::IntervalWeeks { n, weekdays } => {
            weekdays.contains(date.weekday())
                && week_index(date).rem_euclid(i64::from(n.max(1))) == 0
        }
    }
}

/// Soonest `(date, time)` at or after `now` that matches `spec`, searching
/// [`SEARCH_HORIZON_DAYS`] days ahead.
pub fn next_occurrence(spec: &RepeatSpec, time: AlarmTime, now: NaiveDateTime) -> Result<NaiveDateTime> {
    next_occurrence_within(spec, time, now, SEARCH_HORIZON_DAYS)
}

pub fn next_occurrence_within(
    spec: &RepeatSpec,
    time: AlarmTime,
    now: NaiveDateTime,
    horizon_days: i64,
) -> Result<NaiveDateTime> {
    let horizon_days = horizon_days.clamp(0, MAX_SEARCH_HORIZON_DAYS);
    let today = now.date();
    let time_of_day = time.to_naive_time();

    for offset in 0..=horizon_days {
        let Some(date) = today.checked_add_signed(Duration::days(offset)) else {
            break;
        };
        if !matches_date(spec, date) {
            continue;
        }
        let candidate = date.and_time(time_of_day);
        if candidate >= now {
            return Ok(candidate);
        }
    }

    Err(CoreError::Unresolvable { horizon_days })
}

/// Label and next-occurrence pair shown while a recurrence is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePreview {
    pub label: String,
    pub next: Option<NaiveDateTime>,
}

impl RecurrencePreview {
    pub fn compute(spec: &RepeatSpec, time: AlarmTime, now: NaiveDateTime, horizon_days: i64) -> Self {
        Self {
            label: build_label(spec),
            next: next_occurrence_within(spec, time, now, horizon_days).ok(),
        }
    }

    pub fn preview_text(&self) -> String {
        match self.next {
            Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
            None => "unresolvable".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::WeekdaySet;
    use chrono::{NaiveTime, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    fn time(h: u8, m: u8) -> AlarmTime {
        AlarmTime::clamped(h, m)
    }

    #[test]
    fn reference_is_a_sunday() {
        let reference = NaiveDate::from_ymd_opt(1970, 1, 4).unwrap();
        assert_eq!(reference.weekday(), Weekday::Sun);
        assert_eq!(i64::from(reference.num_days_from_ce()), REFERENCE_SUNDAY_CE);
        assert_eq!(week_index(reference), 0);
        assert_eq!(week_index(NaiveDate::from_ymd_opt(1970, 1, 10).unwrap()), 0);
        assert_eq!(week_index(NaiveDate::from_ymd_opt(1970, 1, 11).unwrap()), 1);
        assert_eq!(week_index(NaiveDate::from_ymd_opt(1970, 1, 3).unwrap()), -1);
    }

    #[test]
    fn none_later_today() {
        // 2026-10-16 is a Friday
        let now = at(2026, 10, 16, 6, 0);
        let next = next_occurrence(&RepeatSpec::none(), time(7, 30), now).unwrap();
        assert_eq!(next, at(2026, 10, 16, 7, 30));
    }

    #[test]
    fn none_rolls_to_tomorrow() {
        let now = at(2026, 10, 16, 8, 0);
        let next = next_occurrence(&RepeatSpec::none(), time(7, 30), now).unwrap();
        assert_eq!(next, at(2026, 10, 17, 7, 30));
    }

    #[test]
    fn none_at_exact_time_is_now() {
        let now = at(2026, 10, 16, 7, 30);
        let next = next_occurrence(&RepeatSpec::none(), time(7, 30), now).unwrap();
        assert_eq!(next, now);
    }

    #[test]
    fn weekly_picks_next_selected_weekday() {
        let now = at(2026, 10, 16, 9, 0);
        let spec = RepeatSpec::weekly([Weekday::Mon, Weekday::Wed].into_iter().collect());
        let next = next_occurrence(&spec, time(6, 40), now).unwrap();
        assert_eq!(next, at(2026, 10, 19, 6, 40));
    }

    #[test]
    fn weekly_today_if_time_not_passed() {
        let now = at(2026, 10, 16, 5, 0);
        let spec = RepeatSpec::weekly([Weekday::Fri].into_iter().collect());
        assert_eq!(next_occurrence(&spec, time(6, 0), now).unwrap(), at(2026, 10, 16, 6, 0));
    }

    #[test]
    fn empty_weekdays_are_unresolvable() {
        let now = at(2026, 10, 16, 5, 0);
        for spec in [
            RepeatSpec::weekly(WeekdaySet::EMPTY),
            RepeatSpec::every_weeks(2, WeekdaySet::EMPTY),
        ] {
            let err = next_occurrence(&spec, time(6, 0), now).unwrap_err();
            assert!(matches!(err, CoreError::Unresolvable { horizon_days: 365 }));
        }
    }

    #[test]
    fn interval_skips_off_weeks() {
        let spec = RepeatSpec::every_weeks(2, [Weekday::Mon].into_iter().collect());
        let now = at(2026, 10, 16, 9, 0);
        let first = next_occurrence(&spec, time(7, 0), now).unwrap();
        assert_eq!(first.weekday(), Weekday::Mon);
        assert_eq!(week_index(first.date()).rem_euclid(2), 0);
        let second = next_occurrence(&spec, time(7, 0), first + Duration::seconds(1)).unwrap();
        assert_eq!((second - first).num_days(), 14);
    }

    #[test]
    fn monthly_overrides_weekday_rule() {
        // 2026-11-15 is a Sunday, not a Monday
        let spec = RepeatSpec::weekly([Weekday::Mon].into_iter().collect()).with_monthly_days([15]);
        let now = at(2026, 10, 16, 9, 0);
        let next = next_occurrence(&spec, time(8, 0), now).unwrap();
        assert_eq!(next, at(2026, 11, 15, 8, 0));
        assert_ne!(next.weekday(), Weekday::Mon);
    }

    #[test]
    fn monthly_31_skips_short_months() {
        let spec = RepeatSpec::none().with_monthly_days([31]);
        let now = at(2026, 11, 1, 0, 0);
        assert_eq!(next_occurrence(&spec, time(7, 0), now).unwrap(), at(2026, 12, 31, 7, 0));
    }

    #[test]
    fn zero_horizon_only_checks_today() {
        let spec = RepeatSpec::none();
        let now = at(2026, 10, 16, 8, 0);
        assert!(next_occurrence_within(&spec, time(7, 0), now, 0).is_err());
        assert!(next_occurrence_within(&spec, time(9, 0), now, 0).is_ok());
    }

    #[test]
    fn preview_text_formats() {
        let now = at(2026, 10, 16, 8, 0);
        let ok = RecurrencePreview::compute(&RepeatSpec::none(), time(9, 5), now, 365);
        assert_eq!(ok.label, "no repeat");
        assert_eq!(ok.preview_text(), "2026-10-16 09:05");
        let bad = RecurrencePreview::compute(&RepeatSpec::weekly(WeekdaySet::EMPTY), time(9, 5), now, 365);
        assert_eq!(bad.preview_text(), "unresolvable");
    }

    #[test]
    fn oversized_horizon_is_clamped() {
        let spec = RepeatSpec::weekly(WeekdaySet::EMPTY);
        let err = next_occurrence_within(&spec, time(7, 0), at(2026, 10, 16, 8, 0), i64::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Unresolvable { horizon_days } if horizon_days == MAX_SEARCH_HORIZON_DAYS
        ));
    }
}
