//! Declarative `(target, gesture) -> command` table.
//!
//! The classifier only reports intents; this table is the one place that
//! decides what an intent means on a given element.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::classifier::GestureKind;
use super::router::{Target, TargetKind};
use crate::app::{Command, EditorTab};

/// Command template; filled in with the target's alarm id on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    ToggleEnabled,
    OpenEditor(EditorTab),
    RequestDelete,
    /// Select the dismissal mode carried by the chip.
    SelectDismissal,
    AddAlarm,
}

impl CommandKind {
    /// Concrete command for `target`, or `None` if the target lacks the data
    /// this command needs.
    pub fn instantiate(self, target: Target) -> Option<Command> {
        match (self, target) {
            (CommandKind::AddAlarm, _) => Some(Command::AddAlarm),
            (CommandKind::SelectDismissal, Target::DismissalChip(id, mode)) => {
                Some(Command::SelectDismissal { id, mode })
            }
            (CommandKind::SelectDismissal, _) => None,
            (CommandKind::ToggleEnabled, t) => t.alarm().map(Command::ToggleEnabled),
            (CommandKind::OpenEditor(tab), t) => t.alarm().map(|id| Command::OpenEditor { id, tab }),
            (CommandKind::RequestDelete, t) => t.alarm().map(Command::RequestDelete),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bindings {
    table: HashMap<(TargetKind, GestureKind), CommandKind>,
}

impl Bindings {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single tap toggles a card, double tap opens its editor, long press
    /// asks to delete it. Nested labels and chips open their own flows.
    pub fn standard() -> Self {
        Self::empty()
            .bind(TargetKind::Card, GestureKind::Tap, CommandKind::ToggleEnabled)
            .bind(TargetKind::Card, GestureKind::DoubleTap, CommandKind::OpenEditor(EditorTab::Time))
            .bind(TargetKind::Card, GestureKind::LongPress, CommandKind::RequestDelete)
            .bind(TargetKind::TimeLabel, GestureKind::Tap, CommandKind::OpenEditor(EditorTab::Time))
            .bind(TargetKind::RepeatChip, GestureKind::Tap, CommandKind::OpenEditor(EditorTab::Repeat))
            .bind(TargetKind::DismissalChip, GestureKind::Tap, CommandKind::SelectDismissal)
            .bind(TargetKind::AddButton, GestureKind::Tap, CommandKind::AddAlarm)
    }

    pub fn bind(mut self, target: TargetKind, gesture: GestureKind, command: CommandKind) -> Self {
        self.table.insert((target, gesture), command);
        self
    }

    pub fn unbind(&mut self, target: TargetKind, gesture: GestureKind) -> Option<CommandKind> {
        self.table.remove(&(target, gesture))
    }

    /// Whether any gesture is bound on this kind of target.
    pub fn handles(&self, kind: TargetKind) -> bool {
        self.table.keys().any(|(k, _)| *k == kind)
    }

    /// Innermost target, starting at `hit` and walking outwards, that has
    /// bindings. That target consumes the input.
    pub fn owner(&self, hit: Target) -> Option<Target> {
        let mut current = Some(hit);
        while let Some(target) = current {
            if self.handles(target.kind()) {
                return Some(target);
            }
            current = target.parent();
        }
        None
    }

    pub fn lookup(&self, target: Target, gesture: GestureKind) -> Option<Command> {
        self.table
            .get(&(target.kind(), gesture))
            .and_then(|kind| kind.instantiate(target))
    }
}
