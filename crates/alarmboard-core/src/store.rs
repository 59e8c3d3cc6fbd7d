//! In-memory alarm store.
//!
//! The store holds an immutable snapshot (`Arc<Vec<Alarm>>`). Every mutation
//! builds the next vector from the previous one and swaps it in, so a reader
//! holding a snapshot never observes a half-applied update.
//!
//! Ordering is most-recent-first: `add` prepends, nothing else reorders.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alarm::{
    Alarm, AlarmDraft, AlarmId, AlarmTime, AutoTimeout, Avatar, DismissalMode,
};
use crate::error::{CoreError, Result};
use crate::pattern::PatternSequence;
use crate::recurrence::RepeatSpec;

/// Number of slots on the board.
pub const DEFAULT_CAPACITY: usize = 8;

/// Subset of alarm fields to merge into an existing alarm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmPatch {
    pub title: Option<String>,
    pub time: Option<AlarmTime>,
    pub repeat: Option<RepeatSpec>,
    pub enabled: Option<bool>,
    pub dismissal_mode: Option<DismissalMode>,
    pub pattern: Option<PatternSequence>,
    pub auto_timeout: Option<AutoTimeout>,
    pub sound: Option<bool>,
    pub vibrate: Option<bool>,
    pub avatar: Option<Avatar>,
}

impl AlarmPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn time(mut self, time: AlarmTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn repeat(mut self, repeat: RepeatSpec) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn dismissal_mode(mut self, mode: DismissalMode) -> Self {
        self.dismissal_mode = Some(mode);
        self
    }

    pub fn pattern(mut self, pattern: PatternSequence) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn auto_timeout(mut self, timeout: AutoTimeout) -> Self {
        self.auto_timeout = Some(timeout);
        self
    }

    pub fn sound(mut self, on: bool) -> Self {
        self.sound = Some(on);
        self
    }

    pub fn vibrate(mut self, on: bool) -> Self {
        self.vibrate = Some(on);
        self
    }

    fn apply_to(&self, alarm: &mut Alarm) {
        if let Some(title) = &self.title {
            alarm.title = title.clone();
        }
        if let Some(time) = self.time {
            alarm.time = time;
        }
        if let Some(repeat) = &self.repeat {
            alarm.set_repeat(repeat.clone());
        }
        if let Some(enabled) = self.enabled {
            alarm.enabled = enabled;
        }
        if let Some(pattern) = &self.pattern {
            alarm.dismissal.pattern = Some(pattern.clone());
        }
        if let Some(timeout) = self.auto_timeout {
            alarm.dismissal.auto_timeout = Some(timeout);
        }
        if let Some(mode) = self.dismissal_mode {
            alarm.dismissal.select(mode);
        }
        if let Some(sound) = self.sound {
            alarm.sound = sound;
        }
        if let Some(vibrate) = self.vibrate {
            alarm.vibrate = vibrate;
        }
        if let Some(avatar) = &self.avatar {
            alarm.avatar = avatar.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlarmStore {
    alarms: Arc<Vec<Alarm>>,
    capacity: Option<usize>,
}

impl Default for AlarmStore {
    fn default() -> Self {
        Self::with_capacity(Some(DEFAULT_CAPACITY))
    }
}

impl AlarmStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            alarms: Arc::new(Vec::new()),
            capacity,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Alarm>> {
        Arc::clone(&self.alarms)
    }

    pub fn get(&self, id: AlarmId) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id() == id)
    }

    pub fn contains(&self, id: AlarmId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len() >= cap)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms.iter()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Prepend a new alarm built from `draft`.
    pub fn add(&mut self, draft: AlarmDraft) -> Result<AlarmId> {
        if let Some(capacity) = self.capacity.filter(|_| self.is_full()) {
            return Err(CoreError::StoreFull { capacity });
        }
        draft.dismissal.validate()?;
        let alarm = Alarm::from_draft(AlarmId::new(), draft);
        let id = alarm.id();
        let mut next = Vec::with_capacity(self.alarms.len() + 1);
        next.push(alarm);
        next.extend(self.alarms.iter().cloned());
        self.alarms = Arc::new(next);
        info!(%id, "alarm added");
        Ok(id)
    }

    pub fn remove(&mut self, id: AlarmId) -> Result<Alarm> {
        let index = self.index_of(id)?;
        let mut next = self.alarms.as_ref().clone();
        let removed = next.remove(index);
        self.alarms = Arc::new(next);
        info!(%id, "alarm removed");
        Ok(removed)
    }

    /// Flip `enabled`; returns the new value.
    pub fn toggle_enabled(&mut self, id: AlarmId) -> Result<bool> {
        let alarm = self.update(id, |alarm| {
            alarm.enabled = !alarm.enabled;
            Ok(())
        })?;
        info!(%id, enabled = alarm.enabled, "alarm toggled");
        Ok(alarm.enabled)
    }

    /// Merge `patch` into the alarm; returns the updated alarm.
    ///
    /// The active dismissal mode must have its config after the merge,
    /// otherwise nothing is stored.
    pub fn patch(&mut self, id: AlarmId, patch: &AlarmPatch) -> Result<Alarm> {
        let alarm = self.update(id, |alarm| {
            patch.apply_to(alarm);
            Ok(alarm.dismissal.validate()?)
        })?;
        info!(%id, "alarm patched");
        Ok(alarm)
    }

    fn index_of(&self, id: AlarmId) -> Result<usize> {
        self.alarms
            .iter()
            .position(|a| a.id() == id)
            .ok_or(CoreError::NotFound(id))
    }

    fn update(&mut self, id: AlarmId, f: impl FnOnce(&mut Alarm) -> Result<()>) -> Result<Alarm> {
        let index = self.index_of(id)?;
        let mut updated = self.alarms[index].clone();
        f(&mut updated)?;
        let next: Vec<Alarm> = self
            .alarms
            .iter()
            .enumerate()
            .map(|(i, a)| if i == index { updated.clone() } else { a.clone() })
            .collect();
        self.alarms = Arc::new(next);
        Ok(updated)
    }
}
