//! Card model.
//!
//! ## Key Types
//!
//! - [`Card`]: immutable card descriptor + attached behavior
//! - [`CardHandle`]: shared handle (`Arc<Card>`); copies of a card are
//!   the same logical object, compared by name
//! - [`CardKind`]: kind tags; a card carries a set of them
//! - [`Cost`]: coin cost with optional potion component
//! - [`CardSet`]: a named expansion of cards
//! - [`CardPool`]: merged expansions with by-name lookup

pub mod card;
pub mod set;

pub use card::{Card, CardHandle, CardKind, Cost, PlayFn, Score};
pub use set::{CardPool, CardSet};
