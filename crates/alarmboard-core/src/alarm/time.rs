use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

/// Wall-clock time of day in 24-hour form. Always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    /// Out-of-range components are clamped (hour to 23, minute to 59).
    pub fn clamped(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// Convert a 12-hour reading. `hour12` is clamped to 1..=12;
    /// 12 AM is midnight and 12 PM is noon.
    pub fn from_12h(hour12: u8, minute: u8, meridiem: Meridiem) -> Self {
        let h = hour12.clamp(1, 12) % 12;
        let hour = match meridiem {
            Meridiem::Am => h,
            Meridiem::Pm => h + 12,
        };
        Self::clamped(hour, minute)
    }

    /// Parse a single numeric field the way the time inputs accept it:
    /// digits only, surrounding whitespace ignored, value clamped to `max`.
    pub fn parse_field(text: &str, max: u8) -> Result<u8, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidTimeFormat(text.to_string()));
        }
        // digit strings too long for u32 are clamped as well
        let value = trimmed.parse::<u32>().unwrap_or(u32::MAX);
        Ok(value.min(u32::from(max)) as u8)
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn to_12h(self) -> (u8, u8, Meridiem) {
        let meridiem = if self.hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let h = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        (h, self.minute, meridiem)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default()
    }
}

impl Default for AlarmTime {
    fn default() -> Self {
        Self { hour: 7, minute: 0 }
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = CoreError;

    /// Accepts `H:MM` / `HH:MM`; numeric overflow is clamped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidTimeFormat(s.to_string()))?;
        let hour = Self::parse_field(h, 23).map_err(|_| CoreError::InvalidTimeFormat(s.to_string()))?;
        let minute = Self::parse_field(m, 59).map_err(|_| CoreError::InvalidTimeFormat(s.to_string()))?;
        Ok(Self::clamped(hour, minute))
    }
}

// Deserialization goes through `clamped` so stored values can never be out of range.
impl<'de> Deserialize<'de> for AlarmTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            hour: u8,
            minute: u8,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::clamped(raw.hour, raw.minute))
    }
}
