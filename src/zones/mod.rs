//! Ordered card containers.
//!
//! Every place a card can sit (deck, hand, discard pile, playmat, the
//! shared trash, named set-aside mats) is a [`CardStack`], one ordered
//! container type playing different roles. Supply piles get their own
//! type, [`Pile`], because removal from an empty pile is a typed failure
//! rather than a quiet `None`.

pub mod pile;
pub mod stack;

pub use pile::Pile;
pub use stack::CardStack;

use serde::{Deserialize, Serialize};

/// A source container a card can be taken from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    Playmat,
    /// A named set-aside mat.
    Mat(String),
}

/// Where a drawn or gained card is delivered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Hand,
    Discard,
    /// On top of the deck (next card drawn).
    DeckTop,
    Playmat,
    /// A named set-aside mat, created on first use.
    Mat(String),
}
