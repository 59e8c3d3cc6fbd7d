use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::weekday::{short_name, WeekdaySet};
use crate::error::ValidationError;

/// Weekday-based part of a recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum RepeatRule {
    None,
    Weekly { weekdays: WeekdaySet },
    /// Fires on the selected weekdays of every `n`-th week.
    IntervalWeeks { n: u32, weekdays: WeekdaySet },
}

/// Which calendar days an alarm fires on.
///
/// `monthly_days`, when non-empty, overrides `rule` for both the label and
/// the next-occurrence search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRepeatSpec")]
pub struct RepeatSpec {
    pub rule: RepeatRule,
    monthly_days: BTreeSet<u8>,
}

/// Wire form of [`RepeatSpec`]; monthly days are checked on conversion.
#[derive(Deserialize)]
struct RawRepeatSpec {
    rule: RepeatRule,
    #[serde(default)]
    monthly_days: BTreeSet<u8>,
}

impl TryFrom<RawRepeatSpec> for RepeatSpec {
    type Error = ValidationError;

    fn try_from(raw: RawRepeatSpec) -> Result<Self, Self::Error> {
        if let Some(day) = raw.monthly_days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(ValidationError::InvalidValue {
                field: "monthly_days".into(),
                message: format!("{day} is not a day of the month (1-31)"),
            });
        }
        Ok(Self {
            rule: raw.rule,
            monthly_days: raw.monthly_days,
        })
    }
}

impl Default for RepeatSpec {
    fn default() -> Self {
        Self::none()
    }
}

impl RepeatSpec {
    pub fn none() -> Self {
        Self {
            rule: RepeatRule::None,
            monthly_days: BTreeSet::new(),
        }
    }

    pub fn weekly(weekdays: WeekdaySet) -> Self {
        Self {
            rule: RepeatRule::Weekly { weekdays },
            monthly_days: BTreeSet::new(),
        }
    }

    /// `n` is clamped to at least 1.
    pub fn every_weeks(n: u32, weekdays: WeekdaySet) -> Self {
        Self {
            rule: RepeatRule::IntervalWeeks { n: n.max(1), weekdays },
            monthly_days: BTreeSet::new(),
        }
    }

    /// Replace the monthly days; values outside 1..=31 are dropped.
    pub fn with_monthly_days<I: IntoIterator<Item = u8>>(mut self, days: I) -> Self {
        self.monthly_days = days.into_iter().filter(|d| (1..=31).contains(d)).collect();
        self
    }

    /// Days of the month, ascending, all within 1..=31.
    pub fn monthly_days(&self) -> &BTreeSet<u8> {
        &self.monthly_days
    }

    pub fn is_monthly(&self) -> bool {
        !self.monthly_days.is_empty()
    }

    /// Canonical human-readable label. Depends on nothing but `self`.
    pub fn label(&self) -> String {
        build_label(self)
    }
}

pub fn build_label(spec: &RepeatSpec) -> String {
    if spec.is_monthly() {
        let days = spec
            .monthly_days
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if spec.monthly_days.len() == 1 { "day" } else { "days" };
        return format!("on {noun} {days} of every month");
    }

    match spec.rule {
        RepeatRule::None => "no repeat".to_string(),
        RepeatRule::Weekly { weekdays } => with_days(weekdays, "every week".to_string()),
        RepeatRule::IntervalWeeks { n, weekdays } => {
            with_days(weekdays, format!("every {} weeks", n.max(1)))
        }
    }
}

fn with_days(weekdays: WeekdaySet, cadence: String) -> String {
    if weekdays.is_empty() {
        return cadence;
    }
    let names = weekdays.iter().map(short_name).collect::<Vec<_>>().join(", ");
    format!("{names} {cadence}")
}
