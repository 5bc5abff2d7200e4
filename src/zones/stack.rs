//! The shared ordered-container type.
//!
//! A `CardStack` models a deck, hand, discard pile, playmat, trash, or a
//! named mat. Order is significant everywhere: index 0 is the bottom and
//! the last index is the top, so `draw` pops from the end.

use crate::cards::CardHandle;
use crate::rng::GameRng;

/// An ordered sequence of card handles.
///
/// Containers hold shared handles, not unique instances: three Coppers in
/// a hand are three handles to the same card value.
#[derive(Clone, Debug, Default)]
pub struct CardStack {
    cards: Vec<CardHandle>,
}

impl CardStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack from existing handles (first element = bottom).
    #[must_use]
    pub fn from_cards(cards: Vec<CardHandle>) -> Self {
        Self { cards }
    }

    /// Add a card on top.
    pub fn add(&mut self, card: CardHandle) {
        self.cards.push(card);
    }

    /// Add a card to the bottom.
    pub fn add_bottom(&mut self, card: CardHandle) {
        self.cards.insert(0, card);
    }

    /// Remove and return the top card.
    ///
    /// Returns `None` on an empty stack; an empty deck is not an error,
    /// the reshuffle decision belongs to the engine-level draw.
    pub fn draw(&mut self) -> Option<CardHandle> {
        self.cards.pop()
    }

    /// Remove and return the first card (bottom-up) matching `name`.
    pub fn take_named(&mut self, name: &str) -> Option<CardHandle> {
        let pos = self.cards.iter().position(|c| c.name() == name)?;
        Some(self.cards.remove(pos))
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<&CardHandle> {
        self.cards.last()
    }

    /// Move every card into `dst`, emptying `self` atomically.
    ///
    /// Cards keep their relative order: the bottom of `self` lands first.
    pub fn move_all_to(&mut self, dst: &mut CardStack) {
        dst.cards.append(&mut self.cards);
    }

    /// Uniformly permute the stack.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// First handle matching `name`, if any.
    #[must_use]
    pub fn find_name(&self, name: &str) -> Option<&CardHandle> {
        self.cards.iter().find(|c| c.name() == name)
    }

    /// Whether any card with `name` is present.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.find_name(name).is_some()
    }

    /// Number of cards with `name`.
    #[must_use]
    pub fn count_name(&self, name: &str) -> usize {
        self.cards.iter().filter(|c| c.name() == name).count()
    }

    /// All handles, bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    /// Iterate the handles, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &CardHandle> {
        self.cards.iter()
    }

    /// Number of cards in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove every card, returning them bottom to top.
    pub fn take_all(&mut self) -> Vec<CardHandle> {
        std::mem::take(&mut self.cards)
    }
}

impl<'a> IntoIterator for &'a CardStack {
    type Item = &'a CardHandle;
    type IntoIter = std::slice::Iter<'a, CardHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn copper() -> CardHandle {
        Card::treasure("Copper", 0, 1).handle()
    }

    fn estate() -> CardHandle {
        Card::victory("Estate", 2, 1).handle()
    }

    #[test]
    fn test_draw_pops_top() {
        let mut stack = CardStack::new();
        stack.add(copper());
        stack.add(estate());

        assert_eq!(stack.draw().unwrap().name(), "Estate");
        assert_eq!(stack.draw().unwrap().name(), "Copper");
        assert!(stack.draw().is_none());
    }

    #[test]
    fn test_empty_draw_is_not_an_error() {
        let mut stack = CardStack::new();
        assert!(stack.draw().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_take_named() {
        let mut stack = CardStack::new();
        stack.add(copper());
        stack.add(estate());
        stack.add(copper());

        let taken = stack.take_named("Estate");
        assert_eq!(taken.unwrap().name(), "Estate");
        assert_eq!(stack.len(), 2);
        assert!(stack.take_named("Estate").is_none());
    }

    #[test]
    fn test_move_all_to_empties_source() {
        let mut src = CardStack::new();
        let mut dst = CardStack::new();
        src.add(copper());
        src.add(estate());
        dst.add(copper());

        src.move_all_to(&mut dst);

        assert!(src.is_empty());
        assert_eq!(dst.len(), 3);
        // Relative order preserved: Copper (old dst), Copper, Estate
        assert_eq!(dst.top().unwrap().name(), "Estate");
    }

    #[test]
    fn test_count_and_contains() {
        let mut stack = CardStack::new();
        stack.add(copper());
        stack.add(copper());
        stack.add(estate());

        assert_eq!(stack.count_name("Copper"), 2);
        assert!(stack.contains_name("Estate"));
        assert!(!stack.contains_name("Gold"));
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut rng = GameRng::new(42);
        let mut stack = CardStack::new();
        for _ in 0..7 {
            stack.add(copper());
        }
        for _ in 0..3 {
            stack.add(estate());
        }

        stack.shuffle(&mut rng);

        assert_eq!(stack.len(), 10);
        assert_eq!(stack.count_name("Copper"), 7);
        assert_eq!(stack.count_name("Estate"), 3);
    }

    #[test]
    fn test_draw_then_return_restores_order() {
        let mut stack = CardStack::new();
        stack.add(copper());
        stack.add(estate());
        stack.add(copper());
        let before: Vec<_> = stack.iter().map(|c| c.name().to_owned()).collect();

        let a = stack.draw().unwrap();
        let b = stack.draw().unwrap();
        stack.add(b);
        stack.add(a);

        let after: Vec<_> = stack.iter().map(|c| c.name().to_owned()).collect();
        assert_eq!(before, after);
    }
}
