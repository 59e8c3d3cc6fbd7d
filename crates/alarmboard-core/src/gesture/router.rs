//! Per-target gesture routing.
//!
//! Each interactive target gets its own classifier. Input is delivered to a
//! single target and never bubbles to its ancestors, so a tap on a chip
//! nested in a card does not also toggle the card.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::{GestureClassifier, GestureKind, GestureTiming};
use super::input::RawInput;
use crate::alarm::{AlarmId, DismissalMode};

/// Interactive element of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "camelCase")]
pub enum Target {
    Card(AlarmId),
    TimeLabel(AlarmId),
    RepeatChip(AlarmId),
    DismissalChip(AlarmId, DismissalMode),
    AddButton,
}

/// Target without its alarm id; the key of the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    Card,
    TimeLabel,
    RepeatChip,
    DismissalChip,
    AddButton,
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Card(_) => TargetKind::Card,
            Target::TimeLabel(_) => TargetKind::TimeLabel,
            Target::RepeatChip(_) => TargetKind::RepeatChip,
            Target::DismissalChip(..) => TargetKind::DismissalChip,
            Target::AddButton => TargetKind::AddButton,
        }
    }

    pub fn alarm(&self) -> Option<AlarmId> {
        match *self {
            Target::Card(id)
            | Target::TimeLabel(id)
            | Target::RepeatChip(id)
            | Target::DismissalChip(id, _) => Some(id),
            Target::AddButton => None,
        }
    }

    /// Enclosing target, if any.
    pub fn parent(&self) -> Option<Target> {
        match *self {
            Target::TimeLabel(id) | Target::RepeatChip(id) | Target::DismissalChip(id, _) => {
                Some(Target::Card(id))
            }
            Target::Card(_) | Target::AddButton => None,
        }
    }
}

/// A classified gesture on a specific target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    pub target: Target,
    pub kind: GestureKind,
}

#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    timing: GestureTiming,
    classifiers: HashMap<Target, GestureClassifier>,
}

impl GestureRouter {
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            classifiers: HashMap::new(),
        }
    }

    /// Resolve deadlines on every target up to `now`.
    pub fn tick(&mut self, now: u64) -> Vec<Gesture> {
        let mut out: Vec<Gesture> = self
            .classifiers
            .iter_mut()
            .filter_map(|(target, c)| c.advance(now).map(|kind| Gesture { target: *target, kind }))
            .collect();
        // HashMap order is arbitrary; keep output stable
        out.sort_by_key(|g| g.target);
        self.classifiers.retain(|_, c| !c.is_idle());
        out
    }

    /// Deliver `input` to `target` only. Deadlines due on other targets are
    /// resolved first and included in the result.
    pub fn dispatch(&mut self, target: Target, input: RawInput, now: u64) -> Vec<Gesture> {
        let mut out = self.tick(now);
        let timing = self.timing;
        let classifier = self
            .classifiers
            .entry(target)
            .or_insert_with(|| GestureClassifier::new(timing));
        for &action in input.normalize() {
            if let Some(kind) = classifier.handle(action, now) {
                debug!(?target, ?kind, "gesture classified");
                out.push(Gesture { target, kind });
            }
        }
        if classifier.is_idle() {
            self.classifiers.remove(&target);
        }
        out
    }

    /// Cancel pending windows for every target belonging to `alarm`.
    pub fn forget_alarm(&mut self, alarm: AlarmId) {
        self.classifiers.retain(|target, _| target.alarm() != Some(alarm));
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.classifiers.values().filter_map(GestureClassifier::next_deadline).min()
    }

    pub fn pending_targets(&self) -> usize {
        self.classifiers.len()
    }
}
