#![forbid(unsafe_code)]

//! Events delivered by the gesture source.
//!
//! The source (pointer or keyboard sensor plus hit-testing) decides which
//! word is active and what it is over. A well-formed gesture is
//! `Start`, zero or more `Over`, then `End` or `Cancel`.

use serde::{Deserialize, Serialize};

use crate::container::DropTarget;
use crate::word::WordId;

/// Total pointer movement since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerDelta {
    pub x: f64,
    pub y: f64,
}

impl PointerDelta {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when the pointer did not move at all.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// One step of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Start {
        active: WordId,
    },
    Over {
        active: WordId,
        over: Option<DropTarget>,
    },
    End {
        active: WordId,
        over: Option<DropTarget>,
        #[serde(default)]
        delta: PointerDelta,
    },
    /// Gesture interrupted before a drop (Escape, focus loss).
    Cancel {
        active: WordId,
    },
}

impl GestureEvent {
    #[must_use]
    pub fn active(&self) -> WordId {
        match *self {
            Self::Start { active }
            | Self::Over { active, .. }
            | Self::End { active, .. }
            | Self::Cancel { active } => active,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Over { .. } => "over",
            Self::End { .. } => "end",
            Self::Cancel { .. } => "cancel",
        }
    }
}
