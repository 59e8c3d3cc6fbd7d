//! Pattern-lock capture and confirmation.
//!
//! The pad is a fixed 3x3 grid. A drag records the distinct nodes it passes
//! through in order; setup requires drawing the same path twice.

mod grid;
mod sequence;
mod setup;

pub use grid::{PatternCapture, PatternGrid, Point};
pub use sequence::{PatternSequence, NODE_COUNT};
pub use setup::{PatternPhase, PatternSetup, MIN_PATTERN_NODES};
