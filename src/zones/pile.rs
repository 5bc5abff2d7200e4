//! Supply piles.

use crate::cards::CardHandle;
use crate::error::{GameError, Result};

/// A stack of identical cards within the supply.
///
/// A pile remembers its canonical card so it can still answer "what do
/// you sell?" after the last copy is gone. Removing from an empty pile is
/// the typed failure by which "that card is sold out" reaches the caller.
#[derive(Clone, Debug)]
pub struct Pile {
    card: CardHandle,
    remaining: Vec<CardHandle>,
}

impl Pile {
    /// Create a pile of `count` copies of `card`.
    #[must_use]
    pub fn new(card: CardHandle, count: usize) -> Self {
        let remaining = std::iter::repeat_with(|| card.clone()).take(count).collect();
        Self { card, remaining }
    }

    /// The canonical card of this pile (valid even when empty).
    #[must_use]
    pub fn sample(&self) -> &CardHandle {
        &self.card
    }

    /// The pile's card name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.card.name()
    }

    /// Remove one copy.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyPile`] when no copies remain.
    pub fn remove(&mut self) -> Result<CardHandle> {
        self.remaining
            .pop()
            .ok_or_else(|| GameError::EmptyPile(self.name().to_owned()))
    }

    /// Return one copy to the pile.
    pub fn put_back(&mut self, card: CardHandle) {
        self.remaining.push(card);
    }

    /// Number of copies remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether the pile is sold out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
