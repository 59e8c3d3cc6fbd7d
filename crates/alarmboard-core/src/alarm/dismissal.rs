use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pattern::PatternSequence;

/// How a ringing alarm is silenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DismissalMode {
    #[default]
    Simple,
    Pattern,
    AutoTimeout,
}

impl DismissalMode {
    /// Every mode, in the order the chips are offered.
    pub const ALL: [DismissalMode; 3] = [
        DismissalMode::Simple,
        DismissalMode::Pattern,
        DismissalMode::AutoTimeout,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutUnit {
    Seconds,
    Minutes,
}

/// Auto-off delay. `amount` is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAutoTimeout")]
pub struct AutoTimeout {
    amount: u32,
    unit: TimeoutUnit,
}

#[derive(Deserialize)]
struct RawAutoTimeout {
    amount: u32,
    unit: TimeoutUnit,
}

impl TryFrom<RawAutoTimeout> for AutoTimeout {
    type Error = ValidationError;

    fn try_from(raw: RawAutoTimeout) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.unit)
    }
}

impl AutoTimeout {
    pub fn new(amount: u32, unit: TimeoutUnit) -> Result<Self, ValidationError> {
        if amount == 0 {
            return Err(ValidationError::InvalidValue {
                field: "auto_timeout.amount".into(),
                message: "must be a positive number".into(),
            });
        }
        Ok(Self { amount, unit })
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn unit(&self) -> TimeoutUnit {
        self.unit
    }

    pub fn duration(&self) -> Duration {
        let amount = i64::from(self.amount);
        match self.unit {
            TimeoutUnit::Seconds => Duration::seconds(amount),
            TimeoutUnit::Minutes => Duration::minutes(amount),
        }
    }
}

/// All dismissal configs plus the one that is active.
///
/// Switching `active` never clears the other configs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissalSettings {
    pub active: DismissalMode,
    #[serde(default)]
    pub pattern: Option<PatternSequence>,
    #[serde(default)]
    pub auto_timeout: Option<AutoTimeout>,
}

impl DismissalSettings {
    pub fn select(&mut self, mode: DismissalMode) {
        self.active = mode;
    }

    /// Checks that the active mode has its config.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.active {
            DismissalMode::Simple => Ok(()),
            DismissalMode::Pattern if self.pattern.is_none() => Err(ValidationError::MissingPattern),
            DismissalMode::AutoTimeout if self.auto_timeout.is_none() => {
                Err(ValidationError::MissingAutoTimeout)
            }
            _ => Ok(()),
        }
    }
}
