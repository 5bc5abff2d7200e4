//! Bundled card sets.
//!
//! The engine takes any list of cards implementing the card contract;
//! these sets are the ones it ships with. [`basic_supply`] is always in
//! play; the others are expansions a game may draw its kingdom from.
//! They are deliberately small: enough to exercise every engine hook,
//! not a complete card library.

pub mod alchemy;
pub mod base;
pub mod basic;
pub mod seaside;

pub use alchemy::alchemy_set;
pub use base::base_set;
pub use basic::basic_supply;
pub use seaside::seaside_set;
