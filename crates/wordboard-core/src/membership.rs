#![forbid(unsafe_code)]

//! Which collection holds a given word.
//!
//! Both lookups are linear scans; collections stay small enough that an index
//! would cost more to maintain than it saves.

use crate::container::ContainerRef;
use crate::error::{ReorderError, Result};
use crate::store::Collections;
use crate::word::WordId;

/// Board if the board holds `id`, otherwise hand.
///
/// Asking about a word that is in neither collection is a caller bug; debug
/// builds panic on it.
#[must_use]
pub fn container_of(id: WordId, snapshot: &Collections) -> ContainerRef {
    if snapshot.board.iter().any(|w| w.id() == id) {
        return ContainerRef::Board;
    }
    debug_assert!(
        snapshot.hand.iter().any(|w| w.id() == id),
        "word {id} is in neither collection"
    );
    ContainerRef::Hand
}

/// Like [`container_of`], but reports unknown words as an error instead of
/// falling back to the hand.
pub fn locate(id: WordId, snapshot: &Collections) -> Result<ContainerRef> {
    ContainerRef::all()
        .into_iter()
        .find(|&c| snapshot.position(c, id).is_some())
        .ok_or(ReorderError::UnknownWord(id))
}
