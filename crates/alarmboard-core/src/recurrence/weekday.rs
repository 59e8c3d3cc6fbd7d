use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Weekdays in calendar order, Sunday first.
pub const CALENDAR_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Set of weekdays stored as a 7-bit mask (bit 0 = Sunday).
///
/// Iteration always yields calendar order regardless of insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet(0b111_1111);
    /// Monday through Friday.
    pub const WORKDAYS: WeekdaySet = WeekdaySet(0b011_1110);

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !Self::bit(day);
    }

    pub fn toggle(&mut self, day: Weekday) {
        self.0 ^= Self::bit(day);
    }

    pub fn is_empty(self) -> bool {
        self.0 & Self::ALL.0 == 0
    }

    pub fn len(self) -> usize {
        (self.0 & Self::ALL.0).count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        CALENDAR_ORDER.into_iter().filter(move |d| self.contains(*d))
    }

    /// Parse a comma-separated list of weekday names ("mon,wed,fri").
    pub fn parse_list(input: &str) -> Option<Self> {
        let mut set = Self::EMPTY;
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let day: Weekday = part.parse().ok()?;
            set.insert(day);
        }
        Some(set)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Short English name used in labels.
pub fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}
