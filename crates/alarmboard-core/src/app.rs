//! Command dispatch between the view and the core.
//!
//! The view reports raw input on the innermost target it hit; [`AlarmApp`]
//! routes it through the classifiers, looks classified gestures up in the
//! binding table and applies the resulting [`Command`]s to the store. Commands
//! that need a UI flow (editor, delete confirmation) come back as events.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alarm::{Alarm, AlarmDraft, AlarmId, DismissalMode};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::gesture::{Bindings, Gesture, GestureRouter, RawInput, Target};
use crate::pattern::PatternSetup;
use crate::recurrence::{RecurrencePreview, RepeatEditor};
use crate::storage::Config;
use crate::store::{AlarmPatch, AlarmStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    Time,
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
pub enum Command {
    AddAlarm,
    ToggleEnabled(AlarmId),
    OpenEditor { id: AlarmId, tab: EditorTab },
    RequestDelete(AlarmId),
    ConfirmDelete(AlarmId),
    SelectDismissal { id: AlarmId, mode: DismissalMode },
    Patch { id: AlarmId, patch: AlarmPatch },
}

#[derive(Debug, Clone)]
pub struct AlarmApp {
    store: AlarmStore,
    router: GestureRouter,
    bindings: Bindings,
    new_alarm: AlarmDraft,
    horizon_days: i64,
}

impl AlarmApp {
    pub fn new(config: &Config) -> Self {
        Self {
            store: AlarmStore::with_capacity(config.store.capacity()),
            router: GestureRouter::new(config.gesture.timing()),
            bindings: Bindings::standard(),
            new_alarm: AlarmDraft::default(),
            horizon_days: config.recurrence.search_horizon_days,
        }
    }

    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn store(&self) -> &AlarmStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Vec<Alarm>> {
        self.store.snapshot()
    }

    /// Add an alarm from explicit field values, bypassing the gesture path.
    pub fn add(&mut self, draft: AlarmDraft) -> Result<AlarmId> {
        self.store.add(draft)
    }

    pub fn apply(&mut self, command: Command) -> Result<Event> {
        let at = Utc::now();
        match command {
            Command::AddAlarm => {
                let id = self.store.add(self.new_alarm.clone())?;
                Ok(Event::AlarmAdded { id, at })
            }
            Command::ToggleEnabled(id) => {
                let enabled = self.store.toggle_enabled(id)?;
                Ok(Event::AlarmToggled { id, enabled, at })
            }
            Command::OpenEditor { id, tab } => {
                self.ensure_exists(id)?;
                Ok(Event::EditorRequested { id, tab, at })
            }
            Command::RequestDelete(id) => {
                self.ensure_exists(id)?;
                Ok(Event::DeleteRequested { id, at })
            }
            Command::ConfirmDelete(id) => {
                self.store.remove(id)?;
                self.router.forget_alarm(id);
                Ok(Event::AlarmRemoved { id, at })
            }
            Command::SelectDismissal { id, mode } => {
                self.store.patch(id, &AlarmPatch::default().dismissal_mode(mode))?;
                Ok(Event::DismissalSelected { id, mode, at })
            }
            Command::Patch { id, patch } => {
                let alarm = self.store.patch(id, &patch)?;
                Ok(Event::AlarmPatched {
                    id,
                    repeat_label: alarm.repeat_label().to_string(),
                    at,
                })
            }
        }
    }

    /// Feed raw input that hit `hit` at `now_ms`.
    ///
    /// Returns one entry per bound gesture. Stale-id failures (a deferred tap
    /// resolving after its alarm was deleted) are dropped here.
    pub fn handle_input(&mut self, hit: Target, input: RawInput, now_ms: u64) -> Vec<Result<Event>> {
        let Some(owner) = self.bindings.owner(hit) else {
            debug!(?hit, "input on unbound target ignored");
            let gestures = self.router.tick(now_ms);
            return self.run_gestures(gestures);
        };
        let gestures = self.router.dispatch(owner, input, now_ms);
        self.run_gestures(gestures)
    }

    /// Resolve pending tap windows and long presses up to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Result<Event>> {
        let gestures = self.router.tick(now_ms);
        self.run_gestures(gestures)
    }

    /// When the caller should next call [`AlarmApp::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.router.next_deadline()
    }

    /// Label and next occurrence for a stored alarm.
    pub fn preview(&self, id: AlarmId, now: NaiveDateTime) -> Result<RecurrencePreview> {
        let alarm = self.store.get(id).ok_or(CoreError::NotFound(id))?;
        Ok(RecurrencePreview::compute(alarm.repeat(), alarm.time, now, self.horizon_days))
    }

    /// Editor draft for a stored alarm, using the configured search horizon.
    pub fn open_editor(&self, id: AlarmId) -> Result<RepeatEditor> {
        let alarm = self.store.get(id).ok_or(CoreError::NotFound(id))?;
        Ok(alarm.repeat_editor().with_horizon(self.horizon_days))
    }

    /// Save the editor's time and recurrence onto the alarm.
    pub fn commit_editor(&mut self, id: AlarmId, editor: &RepeatEditor) -> Result<Event> {
        let patch = AlarmPatch::default().time(editor.time()).repeat(editor.spec());
        self.apply(Command::Patch { id, patch })
    }

    /// Save an accepted pattern and make pattern dismissal active.
    pub fn commit_pattern(&mut self, id: AlarmId, setup: &PatternSetup) -> Result<Event> {
        let pattern = setup
            .accepted()
            .cloned()
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "pattern".into(),
                message: "pattern setup is not complete".into(),
            })?;
        let patch = AlarmPatch::default()
            .pattern(pattern)
            .dismissal_mode(DismissalMode::Pattern);
        self.apply(Command::Patch { id, patch })
    }

    fn ensure_exists(&self, id: AlarmId) -> Result<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(CoreError::NotFound(id))
        }
    }

    fn run_gestures(&mut self, gestures: Vec<Gesture>) -> Vec<Result<Event>> {
        let mut out = Vec::new();
        for gesture in gestures {
            let Some(command) = self.bindings.lookup(gesture.target, gesture.kind) else {
                debug!(?gesture, "no binding for gesture");
                continue;
            };
            match self.apply(command) {
                Err(e) if e.is_silent() => debug!(error = %e, "gesture resolved against a stale alarm"),
                Err(e) => {
                    warn!(error = %e, "gesture command failed");
                    out.push(Err(e));
                }
                ok => out.push(ok),
            }
        }
        out
    }
}

impl Default for AlarmApp {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AutoTimeout, TimeoutUnit};
    use crate::pattern::PatternSequence;
    use crate::recurrence::RepeatMode;
    use chrono::NaiveDate;

    fn app_with_alarm() -> (AlarmApp, AlarmId) {
        let mut app = AlarmApp::default();
        let id = app.add(AlarmDraft::default()).unwrap();
        (app, id)
    }

    fn events(results: Vec<Result<Event>>) -> Vec<Event> {
        results.into_iter().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn card_tap_toggles_after_window() {
        let (mut app, id) = app_with_alarm();
        assert!(app.handle_input(Target::Card(id), RawInput::Click, 0).is_empty());
        let out = events(app.tick(300));
        assert!(matches!(out.as_slice(), [Event::AlarmToggled { enabled: false, .. }]));
        assert!(!app.store().get(id).unwrap().enabled);
    }

    #[test]
    fn card_double_tap_opens_editor_without_toggling() {
        let (mut app, id) = app_with_alarm();
        app.handle_input(Target::Card(id), RawInput::TouchStart, 0);
        app.handle_input(Target::Card(id), RawInput::TouchEnd, 40);
        let out = events(app.handle_input(Target::Card(id), RawInput::TouchStart, 150));
        assert!(matches!(
            out.as_slice(),
            [Event::EditorRequested { tab: EditorTab::Time, .. }]
        ));
        app.handle_input(Target::Card(id), RawInput::TouchEnd, 200);
        assert!(app.tick(2_000).is_empty());
        assert!(app.store().get(id).unwrap().enabled);
    }

    #[test]
    fn long_press_requests_delete_and_confirm_removes() {
        let (mut app, id) = app_with_alarm();
        app.handle_input(Target::Card(id), RawInput::MouseDown, 0);
        let out = events(app.tick(500));
        assert!(matches!(out.as_slice(), [Event::DeleteRequested { .. }]));
        assert!(app.handle_input(Target::Card(id), RawInput::MouseUp, 700).is_empty());
        app.apply(Command::ConfirmDelete(id)).unwrap();
        assert!(app.store().is_empty());
    }

    #[test]
    fn nested_chip_does_not_toggle_card() {
        let (mut app, id) = app_with_alarm();
        app.handle_input(Target::RepeatChip(id), RawInput::Click, 0);
        let out = events(app.tick(1_000));
        assert!(matches!(
            out.as_slice(),
            [Event::EditorRequested { tab: EditorTab::Repeat, .. }]
        ));
        assert!(app.store().get(id).unwrap().enabled);
    }

    #[test]
    fn pending_tap_on_deleted_alarm_is_silent() {
        let (mut app, id) = app_with_alarm();
        app.handle_input(Target::Card(id), RawInput::Click, 0);
        // removed through the store directly so the router still holds the window
        app.store.remove(id).unwrap();
        assert!(app.tick(1_000).is_empty());
    }

    #[test]
    fn add_button_reports_full_board() {
        let mut app = AlarmApp::default();
        for _ in 0..crate::store::DEFAULT_CAPACITY {
            app.add(AlarmDraft::default()).unwrap();
        }
        app.handle_input(Target::AddButton, RawInput::Click, 0);
        let out = app.tick(1_000);
        assert!(matches!(out.as_slice(), [Err(CoreError::StoreFull { .. })]));
    }

    #[test]
    fn dismissal_chip_selects_mode() {
        let (mut app, id) = app_with_alarm();
        app.handle_input(Target::DismissalChip(id, DismissalMode::AutoTimeout), RawInput::Click, 0);
        let out = app.tick(1_000);
        assert!(matches!(
            out.as_slice(),
            [Err(CoreError::Validation(ValidationError::MissingAutoTimeout))]
        ));
        assert_eq!(app.store().get(id).unwrap().dismissal.active, DismissalMode::Simple);

        let timeout = AutoTimeout::new(5, TimeoutUnit::Minutes).unwrap();
        app.apply(Command::Patch { id, patch: AlarmPatch::default().auto_timeout(timeout) })
            .unwrap();
        app.handle_input(Target::DismissalChip(id, DismissalMode::AutoTimeout), RawInput::Click, 2_000);
        events(app.tick(3_000));
        assert_eq!(
            app.store().get(id).unwrap().dismissal.active,
            DismissalMode::AutoTimeout
        );
    }

    #[test]
    fn editor_commit_updates_time_and_label() {
        let (mut app, id) = app_with_alarm();
        let mut editor = app.open_editor(id).unwrap();
        editor.set_mode(RepeatMode::Weekly);
        editor.set_hour(6);
        editor.set_minute(40);
        let event = app.commit_editor(id, &editor).unwrap();
        match event {
            Event::AlarmPatched { repeat_label, .. } => {
                assert_eq!(repeat_label, "Mon, Tue, Wed, Thu, Fri every week")
            }
            other => panic!("unexpected event {other:?}"),
        }
        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(7, 0, 0).unwrap();
        assert_eq!(app.preview(id, now).unwrap().preview_text(), "2026-10-19 06:40");
    }

    #[test]
    fn commit_pattern_requires_accepted_setup() {
        let (mut app, id) = app_with_alarm();
        let mut setup = PatternSetup::default();
        assert!(app.commit_pattern(id, &setup).is_err());
        let seq = PatternSequence::try_from(vec![0, 4, 8]).unwrap();
        setup.submit(seq.clone()).unwrap();
        setup.submit(seq.clone()).unwrap();
        app.commit_pattern(id, &setup).unwrap();
        let alarm = app.store().get(id).unwrap();
        assert_eq!(alarm.dismissal.active, DismissalMode::Pattern);
        assert_eq!(alarm.dismissal.pattern, Some(seq));
    }
}
