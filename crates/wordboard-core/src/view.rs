#![forbid(unsafe_code)]

//! Read-only projection handed to the renderer.

use serde::Serialize;

use crate::store::Collections;
use crate::word::{Word, WordId};

/// One rendered entry of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: WordId,
    pub text: String,
    /// Drawn faded: this word is being dragged and shown in the overlay.
    pub suppressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableView {
    pub board: Vec<ItemView>,
    pub hand: Vec<ItemView>,
    /// The word under the pointer while a gesture is active.
    pub overlay: Option<Word>,
    pub revision: u64,
}

impl TableView {
    #[must_use]
    pub fn build(snapshot: &Collections, active: Option<WordId>, revision: u64) -> Self {
        let list = |words: &[Word]| {
            words
                .iter()
                .map(|w| ItemView {
                    id: w.id(),
                    text: w.text().to_owned(),
                    suppressed: Some(w.id()) == active,
                })
                .collect()
        };
        Self {
            board: list(&snapshot.board),
            hand: list(&snapshot.hand),
            overlay: active.and_then(|id| snapshot.word(id)).cloned(),
            revision,
        }
    }
}
