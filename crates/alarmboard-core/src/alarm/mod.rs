//! Alarm entity and its value types.

mod dismissal;
mod time;

pub use dismissal::{AutoTimeout, DismissalMode, DismissalSettings, TimeoutUnit};
pub use time::{AlarmTime, Meridiem};

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::recurrence::{build_label, RepeatEditor, RepeatSpec};

/// Shown when an alarm's title is blank.
pub const PLACEHOLDER_TITLE: &str = "New alarm";

/// Opaque alarm identity, stable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(Uuid);

impl AlarmId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlarmId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for AlarmId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Avatar {
    Emoji(String),
    Image(String),
}

impl Avatar {
    /// Image avatar; the URL must be absolute.
    pub fn image(url: &str) -> Result<Self, ValidationError> {
        let parsed = url::Url::parse(url).map_err(|e| ValidationError::InvalidValue {
            field: "avatar".into(),
            message: e.to_string(),
        })?;
        Ok(Avatar::Image(parsed.into()))
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::Emoji("⏰".into())
    }
}

/// Field values for a new alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmDraft {
    pub title: String,
    pub time: AlarmTime,
    pub repeat: RepeatSpec,
    pub enabled: bool,
    pub dismissal: DismissalSettings,
    pub sound: bool,
    pub vibrate: bool,
    pub avatar: Avatar,
}

impl Default for AlarmDraft {
    fn default() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.into(),
            time: AlarmTime::default(),
            repeat: RepeatSpec::none(),
            enabled: true,
            dismissal: DismissalSettings::default(),
            sound: true,
            vibrate: true,
            avatar: Avatar::default(),
        }
    }
}

/// One alarm card.
///
/// `repeat_label` is derived from `repeat` and only changes through
/// [`Alarm::set_repeat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    id: AlarmId,
    pub title: String,
    pub time: AlarmTime,
    repeat: RepeatSpec,
    repeat_label: String,
    pub enabled: bool,
    pub dismissal: DismissalSettings,
    pub sound: bool,
    pub vibrate: bool,
    pub avatar: Avatar,
}

impl Alarm {
    pub fn from_draft(id: AlarmId, draft: AlarmDraft) -> Self {
        let repeat_label = build_label(&draft.repeat);
        Self {
            id,
            title: draft.title,
            time: draft.time,
            repeat: draft.repeat,
            repeat_label,
            enabled: draft.enabled,
            dismissal: draft.dismissal,
            sound: draft.sound,
            vibrate: draft.vibrate,
            avatar: draft.avatar,
        }
    }

    pub fn id(&self) -> AlarmId {
        self.id
    }

    pub fn repeat(&self) -> &RepeatSpec {
        &self.repeat
    }

    pub fn repeat_label(&self) -> &str {
        &self.repeat_label
    }

    pub fn set_repeat(&mut self, repeat: RepeatSpec) {
        self.repeat_label = build_label(&repeat);
        self.repeat = repeat;
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            PLACEHOLDER_TITLE
        } else {
            &self.title
        }
    }

    /// Editor draft seeded from this alarm's time and recurrence.
    pub fn repeat_editor(&self) -> RepeatEditor {
        RepeatEditor::from_parts(self.time, &self.repeat)
    }
}
