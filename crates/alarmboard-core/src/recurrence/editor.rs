use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::engine::{RecurrencePreview, SEARCH_HORIZON_DAYS};
use super::spec::{RepeatRule, RepeatSpec};
use super::weekday::WeekdaySet;
use crate::alarm::{AlarmTime, Meridiem};
use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatMode {
    None,
    Weekly,
    IntervalWeeks,
}

/// Draft state of the time/repeat editor.
///
/// Weekday, interval and monthly selections survive mode switches so the
/// user can flip between modes without losing input. Only [`RepeatEditor::spec`]
/// decides what is actually committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatEditor {
    time: AlarmTime,
    mode: RepeatMode,
    weekdays: WeekdaySet,
    interval: u32,
    monthly_days: BTreeSet<u8>,
    horizon_days: i64,
}

impl Default for RepeatEditor {
    fn default() -> Self {
        Self {
            time: AlarmTime::default(),
            mode: RepeatMode::None,
            weekdays: WeekdaySet::WORKDAYS,
            interval: 1,
            monthly_days: BTreeSet::new(),
            horizon_days: SEARCH_HORIZON_DAYS,
        }
    }
}

impl RepeatEditor {
    /// Seed from a stored alarm's structured recurrence.
    pub fn from_parts(time: AlarmTime, spec: &RepeatSpec) -> Self {
        let mut editor = Self {
            time,
            monthly_days: spec.monthly_days().clone(),
            ..Self::default()
        };
        match spec.rule {
            RepeatRule::None => editor.mode = RepeatMode::None,
            RepeatRule::Weekly { weekdays } => {
                editor.mode = RepeatMode::Weekly;
                editor.weekdays = weekdays;
            }
            RepeatRule::IntervalWeeks { n, weekdays } => {
                editor.mode = RepeatMode::IntervalWeeks;
                editor.weekdays = weekdays;
                editor.interval = n.max(1);
            }
        }
        editor
    }

    pub fn with_horizon(mut self, horizon_days: i64) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    // ── Time inputs ──────────────────────────────────────────────────

    pub fn set_hour(&mut self, hour: u8) {
        self.time = AlarmTime::clamped(hour, self.time.minute());
    }

    pub fn set_minute(&mut self, minute: u8) {
        self.time = AlarmTime::clamped(self.time.hour(), minute);
    }

    pub fn set_hour_text(&mut self, text: &str) -> Result<()> {
        let hour = AlarmTime::parse_field(text, 23)?;
        self.set_hour(hour);
        Ok(())
    }

    pub fn set_minute_text(&mut self, text: &str) -> Result<()> {
        let minute = AlarmTime::parse_field(text, 59)?;
        self.set_minute(minute);
        Ok(())
    }

    pub fn set_time_12h(&mut self, hour12: u8, minute: u8, meridiem: Meridiem) {
        self.time = AlarmTime::from_12h(hour12, minute, meridiem);
    }

    // ── Repeat inputs ────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: RepeatMode) {
        self.mode = mode;
    }

    pub fn toggle_weekday(&mut self, day: Weekday) {
        self.weekdays.toggle(day);
    }

    pub fn set_weekdays(&mut self, weekdays: WeekdaySet) {
        self.weekdays = weekdays;
    }

    /// Interval in weeks, clamped to at least 1.
    pub fn set_interval(&mut self, n: u32) {
        self.interval = n.max(1);
    }

    /// Empty text means 1.
    pub fn set_interval_text(&mut self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.interval = 1;
            return Ok(());
        }
        let n = trimmed.parse::<u32>().map_err(|_| ValidationError::InvalidValue {
            field: "interval".into(),
            message: format!("'{text}' is not a whole number of weeks"),
        })?;
        self.set_interval(n);
        Ok(())
    }

    /// Returns false for days outside 1..=31.
    pub fn toggle_monthly_day(&mut self, day: u8) -> bool {
        if !(1..=31).contains(&day) {
            return false;
        }
        if !self.monthly_days.remove(&day) {
            self.monthly_days.insert(day);
        }
        true
    }

    pub fn clear_monthly_days(&mut self) {
        self.monthly_days.clear();
    }

    // ── Output ───────────────────────────────────────────────────────

    pub fn time(&self) -> AlarmTime {
        self.time
    }

    pub fn mode(&self) -> RepeatMode {
        self.mode
    }

    pub fn spec(&self) -> RepeatSpec {
        let base = match self.mode {
            RepeatMode::None => RepeatSpec::none(),
            RepeatMode::Weekly => RepeatSpec::weekly(self.weekdays),
            RepeatMode::IntervalWeeks => RepeatSpec::every_weeks(self.interval, self.weekdays),
        };
        base.with_monthly_days(self.monthly_days.iter().copied())
    }

    /// Label and next occurrence for the current draft.
    pub fn preview(&self, now: NaiveDateTime) -> RecurrencePreview {
        RecurrencePreview::compute(&self.spec(), self.time, now, self.horizon_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn selections_survive_mode_switches() {
        let mut editor = RepeatEditor::default();
        editor.set_mode(RepeatMode::IntervalWeeks);
        editor.set_interval(3);
        editor.set_mode(RepeatMode::None);
        assert_eq!(editor.spec(), RepeatSpec::none());
        editor.set_mode(RepeatMode::IntervalWeeks);
        assert_eq!(editor.spec(), RepeatSpec::every_weeks(3, WeekdaySet::WORKDAYS));
    }

    #[test]
    fn text_inputs_validate_and_clamp() {
        let mut editor = RepeatEditor::default();
        editor.set_hour_text("25").unwrap();
        editor.set_minute_text("7").unwrap();
        assert_eq!(editor.time(), AlarmTime::clamped(23, 7));
        assert!(matches!(
            editor.set_hour_text("7a"),
            Err(CoreError::InvalidTimeFormat(_))
        ));
        assert_eq!(editor.time(), AlarmTime::clamped(23, 7));
    }

    #[test]
    fn interval_text() {
        let mut editor = RepeatEditor::default();
        editor.set_interval_text("0").unwrap();
        editor.set_mode(RepeatMode::IntervalWeeks);
        assert_eq!(editor.spec().rule, RepeatRule::IntervalWeeks { n: 1, weekdays: WeekdaySet::WORKDAYS });
        editor.set_interval_text("").unwrap();
        assert!(editor.set_interval_text("two").is_err());
    }

    #[test]
    fn monthly_days_toggle() {
        let mut editor = RepeatEditor::default();
        assert!(editor.toggle_monthly_day(15));
        assert!(!editor.toggle_monthly_day(32));
        assert_eq!(editor.preview(now()).label, "on day 15 of every month");
        editor.toggle_monthly_day(15);
        assert_eq!(editor.preview(now()).label, "no repeat");
    }

    #[test]
    fn from_parts_restores_structured_state() {
        let spec = RepeatSpec::every_weeks(2, [Weekday::Tue].into_iter().collect())
            .with_monthly_days([3]);
        let editor = RepeatEditor::from_parts(AlarmTime::clamped(6, 30), &spec);
        assert_eq!(editor.mode(), RepeatMode::IntervalWeeks);
        assert_eq!(editor.spec(), spec);
    }

    #[test]
    fn preview_tracks_edits() {
        let mut editor = RepeatEditor::default();
        editor.set_mode(RepeatMode::Weekly);
        editor.set_weekdays(WeekdaySet::EMPTY);
        assert_eq!(editor.preview(now()).preview_text(), "unresolvable");
        editor.toggle_weekday(Weekday::Sat);
        editor.set_hour(8);
        editor.set_minute(0);
        assert_eq!(editor.preview(now()).preview_text(), "2026-10-17 08:00");
    }
}
