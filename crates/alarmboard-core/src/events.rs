use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::{AlarmId, DismissalMode};
use crate::app::EditorTab;

/// Every applied command produces an Event.
/// The view re-renders from the store snapshot when it sees one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AlarmAdded {
        id: AlarmId,
        at: DateTime<Utc>,
    },
    AlarmRemoved {
        id: AlarmId,
        at: DateTime<Utc>,
    },
    AlarmToggled {
        id: AlarmId,
        enabled: bool,
        at: DateTime<Utc>,
    },
    AlarmPatched {
        id: AlarmId,
        repeat_label: String,
        at: DateTime<Utc>,
    },
    DismissalSelected {
        id: AlarmId,
        mode: DismissalMode,
        at: DateTime<Utc>,
    },
    /// The view should open the editor on `tab`.
    EditorRequested {
        id: AlarmId,
        tab: EditorTab,
        at: DateTime<Utc>,
    },
    /// The view should ask the user to confirm deletion.
    DeleteRequested {
        id: AlarmId,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn alarm(&self) -> AlarmId {
        match self {
            Event::AlarmAdded { id, .. }
            | Event::AlarmRemoved { id, .. }
            | Event::AlarmToggled { id, .. }
            | Event::AlarmPatched { id, .. }
            | Event::DismissalSelected { id, .. }
            | Event::EditorRequested { id, .. }
            | Event::DeleteRequested { id, .. } => *id,
        }
    }
}
