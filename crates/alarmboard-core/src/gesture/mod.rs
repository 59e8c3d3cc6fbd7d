//! Gesture classification and routing.
//!
//! - [`GestureClassifier`]: tap / double-tap / long-press for one target
//! - [`GestureRouter`]: one classifier per target, no propagation to ancestors
//! - [`Bindings`]: declarative `(target, gesture) -> command` table

mod bindings;
mod classifier;
mod input;
mod router;

pub use bindings::{Bindings, CommandKind};
pub use classifier::{
    GestureClassifier, GestureKind, GestureTiming, DEFAULT_LONG_PRESS_MS, DEFAULT_TAP_WINDOW_MS,
};
pub use input::{parse_script, PointerAction, RawInput, TimedInput};
pub use router::{Gesture, GestureRouter, Target, TargetKind};
