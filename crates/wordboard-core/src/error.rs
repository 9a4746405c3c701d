#![forbid(unsafe_code)]

use thiserror::Error;

use crate::container::ContainerRef;
use crate::word::WordId;

pub type Result<T> = std::result::Result<T, ReorderError>;

/// Failures of a gesture handler. The store is never modified when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// Drag-end landed on a whole container; the drag-over phase should
    /// already have moved the word there.
    #[error("drag of word {active} ended over the {container} container instead of an item")]
    ContainerAtDragEnd {
        active: WordId,
        container: ContainerRef,
    },

    #[error(
        "drag-end words are in different containers: {active} in {active_container}, \
         {over} in {over_container}"
    )]
    ContainerMismatch {
        active: WordId,
        active_container: ContainerRef,
        over: WordId,
        over_container: ContainerRef,
    },

    #[error("word {0} is in neither the board nor the hand")]
    UnknownWord(WordId),

    #[error("word {id} appears more than once across board and hand")]
    Duplicate { id: WordId },

    #[error("word count changed from {before} to {after} during a move")]
    WordCountChanged { before: usize, after: usize },

    #[error("word {id} would be dropped from both board and hand")]
    Orphaned { id: WordId },
}

impl ReorderError {
    /// Event-source contract breaches, as opposed to internal invariant
    /// breaches in the reorder arithmetic.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::ContainerAtDragEnd { .. } | Self::ContainerMismatch { .. } | Self::UnknownWord(_)
        )
    }

    #[must_use]
    pub fn is_invariant_breach(&self) -> bool {
        matches!(
            self,
            Self::Duplicate { .. } | Self::WordCountChanged { .. } | Self::Orphaned { .. }
        )
    }
}
