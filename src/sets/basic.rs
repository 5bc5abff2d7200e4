//! The basic supply: treasures, victory cards, and the Curse.

use crate::cards::{Card, CardSet};

/// The seven piles present in every game.
#[must_use]
pub fn basic_supply() -> CardSet {
    CardSet::from_cards(
        "Basic",
        vec![
            Card::treasure("Copper", 0, 1).handle(),
            Card::treasure("Silver", 3, 2).handle(),
            Card::treasure("Gold", 6, 3).handle(),
            Card::victory("Estate", 2, 1).handle(),
            Card::victory("Duchy", 5, 3).handle(),
            Card::victory("Province", 8, 6).handle(),
            Card::curse().handle(),
        ],
    )
}
