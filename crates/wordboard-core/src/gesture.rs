#![forbid(unsafe_code)]

//! Drag session lifecycle and drag-end classification.
//!
//! # State Machine
//!
//! ```text
//! Idle --start--> Active --end/cancel--> Idle
//! ```
//!
//! A start while `Active` is ignored; the gesture source is expected to run
//! one gesture at a time. End always returns to `Idle`, whatever the
//! classification turns out to be.
//!
//! # Classification
//!
//! Checked in this order:
//!
//! 1. **Tap**: zero pointer movement and elapsed time strictly below
//!    [`GestureConfig::tap_max_duration`].
//! 2. **Abort (no target)**: the gesture ended over nothing.
//! 3. **Abort (same position)**: the gesture ended over the active word.
//! 4. **Protocol violation**: the gesture ended over a whole container.
//! 5. **Reorder** over a specific word.

use web_time::{Duration, Instant};

use crate::container::DropTarget;
use crate::error::{ReorderError, Result};
use crate::event::PointerDelta;
use crate::word::WordId;

/// Thresholds for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Taps must finish strictly faster than this (default: 200ms).
    pub tap_max_duration: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_duration: Duration::from_millis(200),
        }
    }
}

/// Lifecycle state of a [`DragSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Active {
        active: WordId,
        started_at: Instant,
    },
}

/// What remains of a session once it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndedSession {
    pub active: WordId,
    pub elapsed: Duration,
}

/// Tracks the single in-flight gesture.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: SessionState,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session. Returns `false` (and changes nothing) if one is
    /// already active.
    pub fn start(&mut self, active: WordId, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = SessionState::Active {
            active,
            started_at: now,
        };
        true
    }

    /// End the session, returning it to `Idle`. `None` if nothing was active.
    pub fn finish(&mut self, now: Instant) -> Option<EndedSession> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => None,
            SessionState::Active { active, started_at } => Some(EndedSession {
                active,
                elapsed: now.saturating_duration_since(started_at),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    #[must_use]
    pub fn active_id(&self) -> Option<WordId> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Active { active, .. } => Some(active),
        }
    }
}

/// Why a drag-end produced no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Dropped outside every target.
    NoTarget,
    /// Dropped on itself.
    SamePosition,
}

/// How a drag-end should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Toggle the word into the other container.
    Tap,
    Abort(AbortReason),
    /// Move the active word to `over`'s slot within their shared container.
    Reorder { over: WordId },
}

/// Classify a drag-end.
///
/// `elapsed` is `None` when no session was recorded for the gesture; such a
/// gesture is never a tap.
pub fn classify(
    config: &GestureConfig,
    active: WordId,
    over: Option<DropTarget>,
    delta: PointerDelta,
    elapsed: Option<Duration>,
) -> Result<Classification> {
    if delta.is_zero() && elapsed.is_some_and(|e| e < config.tap_max_duration) {
        return Ok(Classification::Tap);
    }

    match over {
        None => Ok(Classification::Abort(AbortReason::NoTarget)),
        Some(DropTarget::Item(over)) if over == active => {
            Ok(Classification::Abort(AbortReason::SamePosition))
        }
        Some(DropTarget::Container(container)) => {
            Err(ReorderError::ContainerAtDragEnd { active, container })
        }
        Some(DropTarget::Item(over)) => Ok(Classification::Reorder { over }),
    }
}
