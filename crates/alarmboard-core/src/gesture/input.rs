use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Input as reported by the device.
///
/// A device reports either the down/up pairs (mouse or touch) or discrete
/// clicks for a given target, not both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawInput {
    MouseDown,
    MouseUp,
    /// Discrete click with no separate down/up.
    Click,
    TouchStart,
    TouchEnd,
    TouchCancel,
}

/// Modality-independent pointer action fed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerAction {
    Press,
    Release,
    Cancel,
}

impl RawInput {
    /// Mouse and touch collapse onto the same press/release stream; a click
    /// is a press and release at the same instant.
    pub fn normalize(self) -> &'static [PointerAction] {
        match self {
            RawInput::MouseDown | RawInput::TouchStart => &[PointerAction::Press],
            RawInput::MouseUp | RawInput::TouchEnd => &[PointerAction::Release],
            RawInput::Click => &[PointerAction::Press, PointerAction::Release],
            RawInput::TouchCancel => &[PointerAction::Cancel],
        }
    }
}

impl FromStr for RawInput {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "press" | "down" | "mousedown" => Ok(RawInput::MouseDown),
            "release" | "up" | "mouseup" => Ok(RawInput::MouseUp),
            "click" => Ok(RawInput::Click),
            "touchstart" => Ok(RawInput::TouchStart),
            "touchend" => Ok(RawInput::TouchEnd),
            "cancel" | "touchcancel" => Ok(RawInput::TouchCancel),
            other => Err(ValidationError::InvalidValue {
                field: "input".into(),
                message: format!("unknown input '{other}'"),
            }),
        }
    }
}

/// One timestamped input, e.g. `press@150`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedInput {
    pub input: RawInput,
    pub at_ms: u64,
}

impl FromStr for TimedInput {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (input, at) = s.split_once('@').ok_or_else(|| ValidationError::InvalidValue {
            field: "input".into(),
            message: format!("expected <input>@<ms>, got '{s}'"),
        })?;
        let at_ms = at.trim().parse::<u64>().map_err(|_| ValidationError::InvalidValue {
            field: "input".into(),
            message: format!("'{at}' is not a millisecond timestamp"),
        })?;
        Ok(Self {
            input: input.parse()?,
            at_ms,
        })
    }
}

/// Parse a whitespace-separated input script (`"press@0 release@60"`).
pub fn parse_script(script: &str) -> Result<Vec<TimedInput>, ValidationError> {
    script.split_whitespace().map(str::parse).collect()
}
