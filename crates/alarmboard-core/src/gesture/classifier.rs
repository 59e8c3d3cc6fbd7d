//! Tap / double-tap / long-press classifier for a single target.
//!
//! The classifier is a wall-clock state machine with no internal thread or
//! timer: pending windows are stored as deadlines and resolved whenever the
//! caller passes a later `now` (through any input or [`GestureClassifier::advance`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle --press--> Held --release (tap window open)--> Released --window expires--> Idle (Tap)
//!                  |  \--release (tap window over)--> Idle (Tap)
//!                  |  \--second press in window-----> Consumed (DoubleTap)
//!                  \--long-press deadline-----------> Consumed (LongPress)
//! Released --press in window--> Consumed (DoubleTap)
//! Consumed --release--> Idle
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::input::PointerAction;

/// Default tap/double-tap window.
pub const DEFAULT_TAP_WINDOW_MS: u64 = 280;
/// Default hold time before a press counts as a long press.
pub const DEFAULT_LONG_PRESS_MS: u64 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    Tap,
    DoubleTap,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTiming {
    pub tap_window_ms: u64,
    pub long_press_ms: u64,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            tap_window_ms: DEFAULT_TAP_WINDOW_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// First press is down.
    Held {
        tap_deadline: u64,
        long_deadline: u64,
        /// Tap window closed while still held; the tap is owed on release.
        tap_due: bool,
    },
    /// First press released; waiting for a second press or the window to close.
    Released { tap_deadline: u64 },
    /// Gesture already classified; swallow input until release.
    Consumed,
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    timing: GestureTiming,
    phase: Phase,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureTiming::default())
    }
}

impl GestureClassifier {
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
        }
    }

    pub fn timing(&self) -> GestureTiming {
        self.timing
    }

    /// True when no gesture is in progress and no window is pending.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Earliest instant at which [`GestureClassifier::advance`] could emit.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            Phase::Held { tap_deadline, long_deadline, tap_due } => {
                Some(if tap_due { long_deadline } else { tap_deadline.min(long_deadline) })
            }
            Phase::Released { tap_deadline } => Some(tap_deadline),
            Phase::Idle | Phase::Consumed => None,
        }
    }

    /// Resolve any deadline that has passed by `now`.
    pub fn advance(&mut self, now: u64) -> Option<GestureKind> {
        match self.phase {
            Phase::Held { long_deadline, .. } if now >= long_deadline => {
                self.phase = Phase::Consumed;
                Some(GestureKind::LongPress)
            }
            Phase::Held { tap_deadline, long_deadline, tap_due: false } if now >= tap_deadline => {
                self.phase = Phase::Held {
                    tap_deadline,
                    long_deadline,
                    tap_due: true,
                };
                None
            }
            Phase::Released { tap_deadline } if now >= tap_deadline => {
                self.phase = Phase::Idle;
                Some(GestureKind::Tap)
            }
            _ => None,
        }
    }

    /// Feed one normalized pointer action.
    pub fn handle(&mut self, action: PointerAction, now: u64) -> Option<GestureKind> {
        let due = self.advance(now);
        let emitted = match action {
            PointerAction::Press => self.press(now),
            PointerAction::Release => self.release(),
            PointerAction::Cancel => self.cancel(),
        };
        due.or(emitted)
    }

    /// Drop any in-progress gesture and pending window without emitting.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn arm(&mut self, now: u64) {
        self.phase = Phase::Held {
            tap_deadline: now.saturating_add(self.timing.tap_window_ms),
            long_deadline: now.saturating_add(self.timing.long_press_ms),
            tap_due: false,
        };
    }

    fn press(&mut self, now: u64) -> Option<GestureKind> {
        match self.phase {
            Phase::Idle => {
                self.arm(now);
                None
            }
            // Second press inside the window, with or without a reported release.
            Phase::Released { .. } | Phase::Held { tap_due: false, .. } => {
                self.phase = Phase::Consumed;
                Some(GestureKind::DoubleTap)
            }
            Phase::Held { tap_due: true, .. } | Phase::Consumed => {
                debug!("press without release; restarting classification");
                self.arm(now);
                None
            }
        }
    }

    fn release(&mut self) -> Option<GestureKind> {
        match self.phase {
            Phase::Held { tap_due: true, .. } => {
                self.phase = Phase::Idle;
                Some(GestureKind::Tap)
            }
            Phase::Held { tap_deadline, .. } => {
                self.phase = Phase::Released { tap_deadline };
                None
            }
            Phase::Consumed => {
                self.phase = Phase::Idle;
                None
            }
            Phase::Idle | Phase::Released { .. } => {
                debug!("release without press ignored");
                None
            }
        }
    }

    fn cancel(&mut self) -> Option<GestureKind> {
        if matches!(self.phase, Phase::Held { .. } | Phase::Consumed) {
            self.phase = Phase::Idle;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointerAction::{Cancel, Press, Release};

    /// Feed `(ms, action)` steps and flush at `end`.
    fn run(steps: &[(u64, PointerAction)], end: u64) -> Vec<GestureKind> {
        let mut c = GestureClassifier::default();
        let mut out = Vec::new();
        for &(at, action) in steps {
            out.extend(c.handle(action, at));
        }
        out.extend(c.advance(end));
        out
    }

    #[test]
    fn single_tap_fires_after_window() {
        let mut c = GestureClassifier::default();
        assert_eq!(c.handle(Press, 0), None);
        assert_eq!(c.handle(Release, 60), None);
        assert_eq!(c.advance(279), None);
        assert_eq!(c.advance(280), Some(GestureKind::Tap));
        assert!(c.is_idle());
    }

    #[test]
    fn double_tap_suppresses_tap() {
        let out = run(&[(0, Press), (50, Release), (150, Press), (200, Release)], 2_000);
        assert_eq!(out, vec![GestureKind::DoubleTap]);
    }

    #[test]
    fn second_press_without_reported_release_is_double_tap() {
        let out = run(&[(0, Press), (150, Press)], 2_000);
        assert_eq!(out, vec![GestureKind::DoubleTap]);
    }

    #[test]
    fn long_press_suppresses_release_tap() {
        let mut c = GestureClassifier::default();
        c.handle(Press, 0);
        assert_eq!(c.advance(500), Some(GestureKind::LongPress));
        assert_eq!(c.handle(Release, 900), None);
        assert_eq!(c.advance(5_000), None);
    }

    #[test]
    fn hold_past_tap_window_taps_on_release() {
        let out = run(&[(0, Press), (350, Release)], 2_000);
        assert_eq!(out, vec![GestureKind::Tap]);
    }

    #[test]
    fn release_before_long_press_cancels_it() {
        let out = run(&[(0, Press), (100, Release)], 10_000);
        assert_eq!(out, vec![GestureKind::Tap]);
    }

    #[test]
    fn late_second_press_is_a_new_gesture() {
        let out = run(&[(0, Press), (50, Release), (400, Press), (450, Release)], 2_000);
        assert_eq!(out, vec![GestureKind::Tap, GestureKind::Tap]);
    }

    #[test]
    fn cancel_emits_nothing() {
        let out = run(&[(0, Press), (100, Cancel)], 2_000);
        assert!(out.is_empty());
    }

    #[test]
    fn stray_release_is_ignored() {
        let out = run(&[(0, Release), (10, Release)], 2_000);
        assert!(out.is_empty());
    }

    #[test]
    fn lost_release_restarts_cleanly() {
        // press held past the tap window, then a fresh press without release
        let out = run(&[(0, Press), (300, Press), (340, Release)], 2_000);
        assert_eq!(out, vec![GestureKind::Tap]);
    }

    #[test]
    fn deadlines_track_phase() {
        let mut c = GestureClassifier::default();
        assert_eq!(c.next_deadline(), None);
        c.handle(Press, 1_000);
        assert_eq!(c.next_deadline(), Some(1_280));
        c.advance(1_300);
        assert_eq!(c.next_deadline(), Some(1_450));
        c.handle(Release, 1_310);
        assert_eq!(c.next_deadline(), None);
    }
}
