#![forbid(unsafe_code)]

//! Container references and drop targets.
//!
//! Whole collections and individual words are distinct variants of
//! [`DropTarget`], so a word can never be mistaken for a container no matter
//! what its text or id looks like.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::word::WordId;

/// One of the two ordered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerRef {
    Board,
    Hand,
}

impl ContainerRef {
    /// The container a tap sends a word to.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Board => Self::Hand,
            Self::Hand => Self::Board,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Hand => "hand",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Board, Self::Hand]
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pointer is over: a specific word or a whole container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    Item(WordId),
    Container(ContainerRef),
}

impl DropTarget {
    #[must_use]
    pub const fn item(self) -> Option<WordId> {
        match self {
            Self::Item(id) => Some(id),
            Self::Container(_) => None,
        }
    }
}

impl From<WordId> for DropTarget {
    fn from(id: WordId) -> Self {
        Self::Item(id)
    }
}

impl From<ContainerRef> for DropTarget {
    fn from(container: ContainerRef) -> Self {
        Self::Container(container)
    }
}
