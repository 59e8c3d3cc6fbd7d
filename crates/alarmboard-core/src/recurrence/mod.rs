//! Recurrence engine: canonical labels and next-occurrence search.
//!
//! Both operations are pure functions of a [`RepeatSpec`] (plus time of day
//! and `now` for the search), cheap enough to rerun on every edit.

mod editor;
mod engine;
mod spec;
mod weekday;

pub use editor::{RepeatEditor, RepeatMode};
pub use engine::{
    matches_date, next_occurrence, next_occurrence_within, RecurrencePreview, MAX_SEARCH_HORIZON_DAYS,
    SEARCH_HORIZON_DAYS,
};
pub use spec::{build_label, RepeatRule, RepeatSpec};
pub use weekday::{short_name, WeekdaySet, CALENDAR_ORDER};
