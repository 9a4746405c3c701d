#![forbid(unsafe_code)]

//! Draw pile of word texts not yet dealt.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pile: VecDeque<String>,
}

impl Deck {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pile: texts.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    /// Take up to `n` texts from the top.
    pub fn draw(&mut self, n: usize) -> Vec<String> {
        let n = n.min(self.pile.len());
        self.pile.drain(..n).collect()
    }
}
