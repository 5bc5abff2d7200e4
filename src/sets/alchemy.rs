//! Potion-cost cards.
//!
//! The Potion treasure is the secondary currency; the game builder adds
//! its pile automatically whenever a kingdom card carries a potion cost.

use crate::cards::{Card, CardHandle, CardSet};
use crate::error::Result;
use crate::game::Game;
use crate::player::PlayerId;
use crate::zones::Destination;

/// Potion: a treasure worth one potion.
#[must_use]
pub fn potion() -> CardHandle {
    Card::treasure("Potion", 4, 0).yields_potions(1).handle()
}

/// Familiar: +1 Card, +1 Action. Each other player gains a Curse.
/// Costs 3 coins and a potion.
#[must_use]
pub fn familiar() -> CardHandle {
    Card::action("Familiar", 3)
        .potion_cost(1)
        .cards(1)
        .actions(1)
        .attack()
        .effect(familiar_play)
        .handle()
}

fn familiar_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.attack_opponents(player, |g, victim| {
        let Some(curse) = g.supply().sample("Curse") else {
            return Ok(());
        };
        g.try_gain_card(victim, &curse, &Destination::Discard)?;
        Ok(())
    })
}

/// The potion expansion.
#[must_use]
pub fn alchemy_set() -> CardSet {
    CardSet::from_cards("Alchemy", vec![potion(), familiar()])
}
