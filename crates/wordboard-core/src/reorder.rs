#![forbid(unsafe_code)]

//! Reorder arithmetic: computes the next board/hand pair for a gesture step.
//!
//! Nothing here writes to the store. Each planner takes a snapshot and
//! returns a [`Relocation`] carrying the complete next pair, which the caller
//! commits in one piece. Keeping planning separate from committing lets a
//! preview layer call the planners without touching real state.
//!
//! # Drag-over
//!
//! Only cross-container motion is applied during drag-over: the active word
//! leaves its container and enters the target one, at the end for a
//! container target or at the target word's index otherwise. Motion within
//! one container is deferred to drag-end. Membership is resolved from the
//! snapshot on every call, so repeating a drag-over with the same target is
//! a no-op the second time.
//!
//! # Drag-end
//!
//! Both words must already share a container. The active word is removed
//! from its index and reinserted at the target's index (move-and-shift, not
//! swap).
//!
//! # Failure Modes
//!
//! Every plan is checked before it is returned: the id set must be unique
//! and the word count unchanged. A failed check is an error in this module's
//! index arithmetic and is reported as such instead of being repaired.

use crate::container::{ContainerRef, DropTarget};
use crate::error::{ReorderError, Result};
use crate::membership::locate;
use crate::store::Collections;
use crate::word::WordId;

/// A position in one of the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub container: ContainerRef,
    pub index: usize,
}

/// A planned single-word move and the pair it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub word: WordId,
    pub from: Slot,
    pub to: Slot,
    pub next: Collections,
}

/// Move the element at `from` so it ends up at index `to`, shifting the
/// elements in between by one.
///
/// # Panics
///
/// If either index is out of bounds.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Plan the live preview for a drag-over. `Ok(None)` means nothing changes.
pub fn plan_drag_over(
    snapshot: &Collections,
    active: WordId,
    over: Option<DropTarget>,
) -> Result<Option<Relocation>> {
    let Some(over) = over else {
        return Ok(None);
    };

    let active_container = locate(active, snapshot)?;
    let over_container = match over {
        DropTarget::Container(c) => c,
        DropTarget::Item(id) => locate(id, snapshot)?,
    };
    if active_container == over_container {
        return Ok(None);
    }

    let from_index = snapshot
        .position(active_container, active)
        .ok_or(ReorderError::UnknownWord(active))?;
    let to_index = match over {
        DropTarget::Container(_) => snapshot.get(over_container).len(),
        DropTarget::Item(id) => snapshot
            .position(over_container, id)
            .ok_or(ReorderError::UnknownWord(id))?,
    };

    let mut next = snapshot.clone();
    let word = next.get_mut(active_container).remove(from_index);
    next.get_mut(over_container).insert(to_index, word);
    verify_move(snapshot, &next)?;

    Ok(Some(Relocation {
        word: active,
        from: Slot {
            container: active_container,
            index: from_index,
        },
        to: Slot {
            container: over_container,
            index: to_index,
        },
        next,
    }))
}

/// Plan the final in-container reorder for a drag-end that landed on `over`.
///
/// `Ok(None)` when the two words already occupy the same slot.
pub fn plan_drag_end(
    snapshot: &Collections,
    active: WordId,
    over: WordId,
) -> Result<Option<Relocation>> {
    let active_container = locate(active, snapshot)?;
    let over_container = locate(over, snapshot)?;
    if active_container != over_container {
        return Err(ReorderError::ContainerMismatch {
            active,
            active_container,
            over,
            over_container,
        });
    }

    let from_index = snapshot
        .position(active_container, active)
        .ok_or(ReorderError::UnknownWord(active))?;
    let to_index = snapshot
        .position(active_container, over)
        .ok_or(ReorderError::UnknownWord(over))?;
    if from_index == to_index {
        return Ok(None);
    }

    let mut next = snapshot.clone();
    array_move(next.get_mut(active_container), from_index, to_index);
    verify_move(snapshot, &next)?;

    Ok(Some(Relocation {
        word: active,
        from: Slot {
            container: active_container,
            index: from_index,
        },
        to: Slot {
            container: active_container,
            index: to_index,
        },
        next,
    }))
}

/// Plan a tap: send `active` to the end of the other container.
pub fn plan_toggle(snapshot: &Collections, active: WordId) -> Result<Relocation> {
    let from = locate(active, snapshot)?;
    let to = from.other();
    let from_index = snapshot
        .position(from, active)
        .ok_or(ReorderError::UnknownWord(active))?;

    let mut next = snapshot.clone();
    let word = next.get_mut(from).remove(from_index);
    next.get_mut(to).push(word);
    let to_index = next.get(to).len() - 1;
    verify_move(snapshot, &next)?;

    Ok(Relocation {
        word: active,
        from: Slot {
            container: from,
            index: from_index,
        },
        to: Slot {
            container: to,
            index: to_index,
        },
        next,
    })
}

fn verify_move(before: &Collections, after: &Collections) -> Result<()> {
    if before.len() != after.len() {
        return Err(ReorderError::WordCountChanged {
            before: before.len(),
            after: after.len(),
        });
    }
    after.check_unique()
}
