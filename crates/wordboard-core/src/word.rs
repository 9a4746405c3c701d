#![forbid(unsafe_code)]

//! Word tokens and identifier issuance.
//!
//! A [`Word`] is an immutable `(id, text)` pair. Identifiers come from a
//! [`WordRegistry`], which hands them out monotonically starting at 1. Zero
//! is never a valid [`WordId`]; "no active word" is spelled `Option<WordId>`.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Stable identifier of a word token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(NonZeroU32);

impl WordId {
    /// Wrap a raw identifier. Returns `None` for the reserved value 0.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// The raw integer value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single token that can sit on the board or in the hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    id: WordId,
    text: String,
}

impl Word {
    #[must_use]
    pub fn new(id: WordId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> WordId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Issues fresh word identifiers.
#[derive(Debug, Clone)]
pub struct WordRegistry {
    next: NonZeroU32,
    issued: usize,
}

impl Default for WordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WordRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: NonZeroU32::MIN,
            issued: 0,
        }
    }

    /// Create a word with the next identifier.
    pub fn issue(&mut self, text: impl Into<String>) -> Word {
        let id = WordId(self.next);
        // Saturates at u32::MAX; a repeated id is then caught by the store's
        // uniqueness check rather than wrapping to the reserved 0.
        self.next = self.next.saturating_add(1);
        self.issued += 1;
        Word::new(id, text)
    }

    /// Create one word per text, in order.
    pub fn issue_all<I, S>(&mut self, texts: I) -> Vec<Word>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts.into_iter().map(|t| self.issue(t)).collect()
    }

    /// Identifier the next call to [`issue`](Self::issue) will return.
    #[must_use]
    pub fn peek_next(&self) -> WordId {
        WordId(self.next)
    }

    /// Total number of words issued so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_id() {
        assert!(WordId::new(0).is_none());
        assert_eq!(WordId::new(7).map(WordId::get), Some(7));
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut reg = WordRegistry::new();
        let a = reg.issue("a");
        let b = reg.issue("b");
        assert_eq!(a.id().get(), 1);
        assert_eq!(b.id().get(), 2);
        assert_eq!(reg.peek_next().get(), 3);
        assert_eq!(reg.issued(), 2);
    }

    #[test]
    fn issue_all_preserves_order() {
        let mut reg = WordRegistry::new();
        let words = reg.issue_all(["日本", "語"]);
        assert_eq!(words[0].text(), "日本");
        assert_eq!(words[1].text(), "語");
        assert!(words[0].id() < words[1].id());
    }

    #[test]
    fn id_serializes_as_plain_integer() {
        let id = WordId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: WordId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<WordId>("0").is_err());
    }
}
