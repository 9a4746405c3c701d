#![forbid(unsafe_code)]

//! The board/hand pair and its single write path.
//!
//! [`CollectionStore::commit`] always replaces both collections together.
//! The candidate pair is validated first: a pair in which some word appears
//! twice, or which drops a word the current pair holds, is refused and the
//! previous state stays in place.
//!
//! # Invariants
//!
//! 1. After every successful commit, the ids across `board` and `hand` form
//!    a set.
//! 2. Words are never removed; a commit may only add new ids (deals).
//! 3. `revision` increases by exactly one per successful commit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::container::ContainerRef;
use crate::error::{ReorderError, Result};
use crate::word::{Word, WordId};

/// An immutable snapshot of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    pub board: Vec<Word>,
    pub hand: Vec<Word>,
}

impl Collections {
    #[must_use]
    pub fn new(board: Vec<Word>, hand: Vec<Word>) -> Self {
        Self { board, hand }
    }

    #[must_use]
    pub fn get(&self, container: ContainerRef) -> &[Word] {
        match container {
            ContainerRef::Board => &self.board,
            ContainerRef::Hand => &self.hand,
        }
    }

    pub(crate) fn get_mut(&mut self, container: ContainerRef) -> &mut Vec<Word> {
        match container {
            ContainerRef::Board => &mut self.board,
            ContainerRef::Hand => &mut self.hand,
        }
    }

    /// Index of `id` within `container`.
    #[must_use]
    pub fn position(&self, container: ContainerRef, id: WordId) -> Option<usize> {
        self.get(container).iter().position(|w| w.id() == id)
    }

    /// Look a word up in either collection.
    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.board.iter().chain(&self.hand).find(|w| w.id() == id)
    }

    /// Total number of words across both collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.board.len() + self.hand.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.is_empty() && self.hand.is_empty()
    }

    /// Board ids followed by hand ids.
    pub fn ids(&self) -> impl Iterator<Item = WordId> + '_ {
        self.board.iter().chain(&self.hand).map(Word::id)
    }

    /// Check that no id appears twice, within or across collections.
    pub fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.len());
        for id in self.ids() {
            if !seen.insert(id) {
                return Err(ReorderError::Duplicate { id });
            }
        }
        Ok(())
    }

    /// Check that every word in `prev` is still present here.
    pub fn check_retains(&self, prev: &Collections) -> Result<()> {
        let kept: HashSet<WordId> = self.ids().collect();
        match prev.ids().find(|id| !kept.contains(id)) {
            Some(id) => Err(ReorderError::Orphaned { id }),
            None => Ok(()),
        }
    }

    /// Board texts joined by single spaces.
    #[must_use]
    pub fn board_sentence(&self) -> String {
        self.board
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Owner of the current [`Collections`].
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    current: Collections,
    revision: u64,
}

impl CollectionStore {
    /// Create a store holding `initial`. Fails if `initial` repeats an id.
    pub fn new(initial: Collections) -> Result<Self> {
        initial.check_unique()?;
        Ok(Self {
            current: initial,
            revision: 0,
        })
    }

    /// The current snapshot.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Collections {
        &self.current
    }

    /// Number of successful commits so far.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace both collections. Returns the new revision.
    ///
    /// Refused when `next` repeats an id or loses one of the current words.
    pub fn commit(&mut self, next: Collections) -> Result<u64> {
        let checked = next
            .check_unique()
            .and_then(|()| next.check_retains(&self.current));
        if let Err(err) = checked {
            tracing::error!(
                target: "wordboard.store",
                revision = self.revision,
                error = %err,
                "refusing commit that breaks the word set"
            );
            return Err(err);
        }
        self.current = next;
        self.revision += 1;
        tracing::trace!(
            target: "wordboard.store",
            revision = self.revision,
            board = self.current.board.len(),
            hand = self.current.hand.len(),
            "collections committed"
        );
        Ok(self.revision)
    }
}
