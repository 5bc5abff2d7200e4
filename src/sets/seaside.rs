//! Duration cards.
//!
//! Each play pins the card to the playmat (cleanup leaves it out) and
//! registers a one-shot turn-start hook carrying the next-turn bonus.
//! The hook fires on the owner's next turn, releases the pin, and
//! unregisters itself; the card is then swept by that turn's cleanup.

use crate::cards::{Card, CardHandle, CardSet};
use crate::error::Result;
use crate::game::Game;
use crate::hooks::HookVerdict;
use crate::player::PlayerId;

/// Fishing Village: +2 Actions, +1 coin. Next turn: +1 Action, +1 coin.
#[must_use]
pub fn fishing_village() -> CardHandle {
    Card::action("Fishing Village", 3)
        .actions(2)
        .coins(1)
        .duration()
        .effect(fishing_village_play)
        .handle()
}

fn fishing_village_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.player_mut(player).pin_duration("Fishing Village");
    game.hooks_mut()
        .register_turn_start("Fishing Village", move |g, whose_turn| {
            if whose_turn != player {
                return Ok(HookVerdict::Keep);
            }
            let p = g.player_mut(player);
            p.state.actions += 1;
            p.state.coins += 1;
            p.unpin_duration("Fishing Village");
            Ok(HookVerdict::Unregister)
        });
    Ok(())
}

/// Caravan: +1 Card, +1 Action. Next turn: +1 Card.
#[must_use]
pub fn caravan() -> CardHandle {
    Card::action("Caravan", 4)
        .cards(1)
        .actions(1)
        .duration()
        .effect(caravan_play)
        .handle()
}

fn caravan_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.player_mut(player).pin_duration("Caravan");
    game.hooks_mut()
        .register_turn_start("Caravan", move |g, whose_turn| {
            if whose_turn != player {
                return Ok(HookVerdict::Keep);
            }
            g.draw_cards(player, 1)?;
            g.player_mut(player).unpin_duration("Caravan");
            Ok(HookVerdict::Unregister)
        });
    Ok(())
}

/// Wharf: +2 Cards, +1 Buy. Next turn: +2 Cards, +1 Buy.
#[must_use]
pub fn wharf() -> CardHandle {
    Card::action("Wharf", 5)
        .cards(2)
        .buys(1)
        .duration()
        .effect(wharf_play)
        .handle()
}

fn wharf_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.player_mut(player).pin_duration("Wharf");
    game.hooks_mut()
        .register_turn_start("Wharf", move |g, whose_turn| {
            if whose_turn != player {
                return Ok(HookVerdict::Keep);
            }
            g.draw_cards(player, 2)?;
            let p = g.player_mut(player);
            p.state.buys += 1;
            p.unpin_duration("Wharf");
            Ok(HookVerdict::Unregister)
        });
    Ok(())
}

/// The duration expansion.
#[must_use]
pub fn seaside_set() -> CardSet {
    CardSet::from_cards(
        "Seaside",
        vec![fishing_village(), caravan(), wharf()],
    )
}
