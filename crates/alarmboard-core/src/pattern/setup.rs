//! Two-phase pattern setup: draw a candidate, then draw it again to confirm.
//!
//! ```text
//! Capturing --(>= min nodes)--> Confirming --(identical)--> Success
//!     ^  |                        |   ^
//!     |  +--TooShort (retry)      +---+ TooShort / PatternMismatch (redo confirm)
//!     +------------- restart() ---+
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{PatternCapture, PatternGrid, Point};
use super::sequence::PatternSequence;
use crate::error::{CoreError, Result, ValidationError};

/// Minimum nodes a pattern must span.
pub const MIN_PATTERN_NODES: usize = 2;

/// What the pattern pad should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "sequence", rename_all = "camelCase")]
pub enum PatternPhase {
    Capturing,
    Confirming,
    TooShort,
    PatternMismatch,
    Success(PatternSequence),
}

#[derive(Debug, Clone)]
enum Stage {
    Capture,
    Confirm { candidate: PatternSequence },
    Done(PatternSequence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    TooShort,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct PatternSetup {
    stage: Stage,
    rejection: Option<Rejection>,
    existing: Option<PatternSequence>,
    started: bool,
    min_nodes: usize,
    capture: PatternCapture,
}

impl PatternSetup {
    /// `existing` is the alarm's previously saved pattern, offered through
    /// [`PatternSetup::keep_existing`].
    pub fn new(existing: Option<PatternSequence>, grid: PatternGrid, min_nodes: usize) -> Self {
        Self {
            stage: Stage::Capture,
            rejection: None,
            existing,
            started: false,
            min_nodes: min_nodes.max(MIN_PATTERN_NODES),
            capture: PatternCapture::new(grid),
        }
    }

    pub fn phase(&self) -> PatternPhase {
        match (self.rejection, &self.stage) {
            (_, Stage::Done(seq)) => PatternPhase::Success(seq.clone()),
            (Some(Rejection::TooShort), _) => PatternPhase::TooShort,
            (Some(Rejection::Mismatch), _) => PatternPhase::PatternMismatch,
            (None, Stage::Capture) => PatternPhase::Capturing,
            (None, Stage::Confirm { .. }) => PatternPhase::Confirming,
        }
    }

    pub fn candidate(&self) -> Option<&PatternSequence> {
        match &self.stage {
            Stage::Confirm { candidate } => Some(candidate),
            _ => None,
        }
    }

    /// The accepted pattern once setup has succeeded.
    pub fn accepted(&self) -> Option<&PatternSequence> {
        match &self.stage {
            Stage::Done(seq) => Some(seq),
            _ => None,
        }
    }

    /// Whether "keep existing" is still on offer.
    pub fn can_keep_existing(&self) -> bool {
        self.existing.is_some() && !self.started && !matches!(self.stage, Stage::Done(_))
    }

    /// Reuse the saved pattern without drawing. Only valid before any drag.
    pub fn keep_existing(&mut self) -> Result<PatternSequence> {
        if !self.can_keep_existing() {
            return Err(ValidationError::KeepUnavailable.into());
        }
        let seq = self.existing.clone().ok_or(ValidationError::KeepUnavailable)?;
        self.stage = Stage::Done(seq.clone());
        self.rejection = None;
        Ok(seq)
    }

    // ── Pointer input ────────────────────────────────────────────────

    pub fn pointer_down(&mut self, p: Point) {
        self.started = true;
        self.rejection = None;
        self.capture.begin(p);
    }

    pub fn pointer_move(&mut self, p: Point) -> Option<u8> {
        self.capture.track(p)
    }

    /// Pointer up: submit whatever the drag captured.
    pub fn pointer_up(&mut self) -> Result<PatternPhase> {
        if !self.capture.is_active() {
            return Ok(self.phase());
        }
        let seq = self.capture.end();
        self.submit(seq)
    }

    /// Feed a completed capture into the flow.
    pub fn submit(&mut self, seq: PatternSequence) -> Result<PatternPhase> {
        self.started = true;
        if seq.len() < self.min_nodes {
            if matches!(self.stage, Stage::Done(_)) {
                return Ok(self.phase());
            }
            debug!(nodes = seq.len(), "pattern capture too short");
            self.rejection = Some(Rejection::TooShort);
            return Err(CoreError::TooShort {
                nodes: seq.len(),
                min: self.min_nodes,
            });
        }

        match &self.stage {
            Stage::Capture => {
                self.stage = Stage::Confirm { candidate: seq };
                self.rejection = None;
            }
            Stage::Confirm { candidate } => {
                if *candidate != seq {
                    debug!(%candidate, attempt = %seq, "pattern confirm mismatch");
                    self.rejection = Some(Rejection::Mismatch);
                    return Err(CoreError::PatternMismatch);
                }
                self.stage = Stage::Done(seq);
                self.rejection = None;
            }
            Stage::Done(_) => {}
        }
        Ok(self.phase())
    }

    /// Discard the candidate and start drawing from scratch.
    pub fn restart(&mut self) {
        self.stage = Stage::Capture;
        self.rejection = None;
        self.capture.end();
    }
}

impl Default for PatternSetup {
    fn default() -> Self {
        Self::new(None, PatternGrid::default(), MIN_PATTERN_NODES)
    }
}
