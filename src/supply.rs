//! The shared supply.
//!
//! One [`Pile`] per distinct card name. Availability queries always
//! reflect the live pile state: bots enumerate legal buys from
//! [`Supply::available_cards`] and the game-end check counts empty piles
//! here.

use rustc_hash::FxHashMap;

use crate::cards::CardHandle;
use crate::error::{GameError, Result};
use crate::zones::Pile;

/// The pool of purchasable and gainable card piles for one game.
#[derive(Clone, Debug, Default)]
pub struct Supply {
    /// Piles in setup order (display and deterministic iteration).
    piles: Vec<Pile>,
    /// Name -> index into `piles`.
    index: FxHashMap<String, usize>,
}

impl Supply {
    /// Create an empty supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pile of `count` copies of `card`.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidGameSetup`] when a pile with the same name
    /// already exists. At most one pile per card name.
    pub fn add_pile(&mut self, card: CardHandle, count: usize) -> Result<()> {
        if self.index.contains_key(card.name()) {
            return Err(GameError::InvalidGameSetup(format!(
                "duplicate supply pile for {}",
                card.name()
            )));
        }
        self.index.insert(card.name().to_owned(), self.piles.len());
        self.piles.push(Pile::new(card, count));
        Ok(())
    }

    /// Take one card from the pile named `name`.
    ///
    /// # Errors
    ///
    /// [`GameError::PileNotFound`] when no such pile is configured,
    /// [`GameError::EmptyPile`] when the pile is sold out.
    pub fn take(&mut self, name: &str) -> Result<CardHandle> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| GameError::PileNotFound(name.to_owned()))?;
        self.piles[idx].remove()
    }

    /// Return a card to its pile.
    ///
    /// # Errors
    ///
    /// [`GameError::PileNotFound`] when no pile matches the card's name.
    pub fn return_card(&mut self, card: CardHandle) -> Result<()> {
        let idx = *self
            .index
            .get(card.name())
            .ok_or_else(|| GameError::PileNotFound(card.name().to_owned()))?;
        self.piles[idx].put_back(card);
        Ok(())
    }

    /// One representative card per non-empty pile, in setup order.
    ///
    /// Computed from the current pile state, never cached.
    #[must_use]
    pub fn available_cards(&self) -> Vec<CardHandle> {
        self.piles
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.sample().clone())
            .collect()
    }

    /// A handle for the pile named `name`, even if the pile is empty.
    #[must_use]
    pub fn sample(&self, name: &str) -> Option<CardHandle> {
        self.index
            .get(name)
            .map(|&idx| self.piles[idx].sample().clone())
    }

    /// Number of empty piles.
    #[must_use]
    pub fn num_empty_piles(&self) -> usize {
        self.piles.iter().filter(|p| p.is_empty()).count()
    }

    /// Remaining length of the pile named `name`.
    #[must_use]
    pub fn pile_len(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&idx| self.piles[idx].len())
    }

    /// Whether a pile named `name` is configured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    /// Whether the supply has no piles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Iterate the piles in setup order.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }
}
