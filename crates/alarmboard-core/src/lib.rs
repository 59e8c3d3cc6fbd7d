//! # Alarmboard Core Library
//!
//! Core logic for an alarm board: a list of alarm cards driven by tap,
//! double-tap and long-press gestures, with a recurrence editor and a
//! pattern-lock dismissal setup. The view is a thin layer over this crate;
//! the `alarmboard` CLI drives the same operations from a terminal.
//!
//! ## Architecture
//!
//! - **Gestures**: a wall-clock classifier per target. The caller reports
//!   input and calls `tick()` when the next deadline passes
//! - **Recurrence**: canonical labels and a bounded next-occurrence search
//! - **Pattern**: two-phase capture/confirm on a 3x3 pad
//! - **Store**: the ordered alarm list with snapshot reads
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`AlarmApp`]: routes gestures to store commands
//! - [`AlarmStore`]: the alarm list
//! - [`GestureClassifier`]: tap / double-tap / long-press state machine
//! - [`PatternSetup`]: pattern capture flow
//! - [`Config`]: application configuration management

pub mod alarm;
pub mod app;
pub mod error;
pub mod events;
pub mod gesture;
pub mod pattern;
pub mod recurrence;
pub mod storage;
pub mod store;

pub use alarm::{Alarm, AlarmDraft, AlarmId, AlarmTime, DismissalMode, DismissalSettings};
pub use app::{AlarmApp, Command, EditorTab};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use gesture::{Bindings, GestureClassifier, GestureKind, GestureRouter, RawInput, Target};
pub use pattern::{PatternPhase, PatternSequence, PatternSetup};
pub use recurrence::{build_label, next_occurrence, RecurrencePreview, RepeatEditor, RepeatSpec};
pub use storage::Config;
pub use store::{AlarmPatch, AlarmStore};
