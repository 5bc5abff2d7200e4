//! Expansion sets and the merged card pool.

use rustc_hash::FxHashMap;

use super::card::CardHandle;

/// A named expansion: the list of cards a game may draw its kingdom from.
#[derive(Clone, Debug, Default)]
pub struct CardSet {
    name: String,
    cards: Vec<CardHandle>,
}

impl CardSet {
    /// Create an empty set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Create a set from existing handles.
    #[must_use]
    pub fn from_cards(name: impl Into<String>, cards: Vec<CardHandle>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    /// Add a card (builder pattern).
    #[must_use]
    pub fn with(mut self, card: CardHandle) -> Self {
        self.cards.push(card);
        self
    }

    /// The set's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All cards in the set.
    #[must_use]
    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    /// Look up a card by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardHandle> {
        self.cards.iter().find(|c| c.name() == name)
    }

    /// Whether a card with `name` exists in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of cards in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate the cards.
    pub fn iter(&self) -> impl Iterator<Item = &CardHandle> {
        self.cards.iter()
    }
}

/// Merged expansions with by-name lookup.
///
/// The pool preserves insertion order so kingdom selection from a seeded
/// RNG is reproducible.
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    by_name: FxHashMap<String, CardHandle>,
    order: Vec<CardHandle>,
}

impl CardPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a set into the pool.
    ///
    /// Names are singletons: a card already present keeps its first
    /// definition and later occurrences are ignored.
    pub fn add_set(&mut self, set: &CardSet) {
        for card in set.iter() {
            if !self.by_name.contains_key(card.name()) {
                self.by_name.insert(card.name().to_owned(), card.clone());
                self.order.push(card.clone());
            }
        }
    }

    /// Look up a card by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardHandle> {
        self.by_name.get(name)
    }

    /// Whether a card with `name` exists in the pool.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Cards in insertion order.
    #[must_use]
    pub fn cards(&self) -> &[CardHandle] {
        &self.order
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
