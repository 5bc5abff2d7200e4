//! The base expansion.
//!
//! Vanilla engines, a trasher, a sifter, gainers, attacks, a reaction,
//! a throne, a cost reducer, and a variable-score victory card: one of
//! each shape of effect the engine supports.

use crate::cards::{Card, CardHandle, CardSet, Cost, Score};
use crate::decider::{BinaryChoice, CardChoice};
use crate::error::Result;
use crate::game::Game;
use crate::hooks::HookVerdict;
use crate::player::PlayerId;
use crate::zones::{Destination, Zone};

/// Cellar: +1 Action. Discard any number of cards, then draw that many.
#[must_use]
pub fn cellar() -> CardHandle {
    Card::action("Cellar", 2).actions(1).effect(cellar_play).handle()
}

fn cellar_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    let hand = game.player(player).hand().cards().to_vec();
    let choice = CardChoice::any_number("Cellar", "Discard any number, then draw that many", hand);
    let picks = game.ask_discard(player, &choice)?;
    for card in &picks {
        game.discard_from_hand(player, card)?;
    }
    game.draw_cards(player, picks.len())?;
    Ok(())
}

/// Chapel: trash up to four cards from your hand.
#[must_use]
pub fn chapel() -> CardHandle {
    Card::action("Chapel", 2).effect(chapel_play).handle()
}

fn chapel_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    let hand = game.player(player).hand().cards().to_vec();
    let choice = CardChoice::up_to("Chapel", "Trash up to four cards", hand, 4);
    for card in game.ask_trash(player, &choice)? {
        game.trash_from(player, &card, &Zone::Hand)?;
    }
    Ok(())
}

/// Moat: +2 Cards. Reveal against attacks to be unaffected.
#[must_use]
pub fn moat() -> CardHandle {
    Card::action("Moat", 2).cards(2).reaction().handle()
}

/// Harbinger: +1 Card, +1 Action. Put a card from your discard pile
/// onto your deck.
#[must_use]
pub fn harbinger() -> CardHandle {
    Card::action("Harbinger", 3)
        .cards(1)
        .actions(1)
        .effect(harbinger_play)
        .handle()
}

fn harbinger_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    let discard = game.player(player).discard_pile().cards().to_vec();
    if discard.is_empty() {
        return Ok(());
    }
    let choice = CardChoice::up_to(
        "Harbinger",
        "Put a card from your discard pile onto your deck",
        discard,
        1,
    );
    for card in game.ask_topdeck(player, &choice)? {
        let p = game.player_mut(player);
        if let Some(moved) = p.discard.take_named(card.name()) {
            p.deck.add(moved);
        }
    }
    Ok(())
}

/// Village: +1 Card, +2 Actions.
#[must_use]
pub fn village() -> CardHandle {
    Card::action("Village", 3).cards(1).actions(2).handle()
}

/// Merchant: +1 Card, +1 Action. The first time you play a Silver this
/// turn, +1 coin.
#[must_use]
pub fn merchant() -> CardHandle {
    Card::action("Merchant", 3)
        .cards(1)
        .actions(1)
        .effect(merchant_play)
        .handle()
}

fn merchant_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.hooks_mut().register_on_play("Merchant", move |g, who, card| {
        if who != player || card.name() != "Silver" {
            return Ok(HookVerdict::Keep);
        }
        // The silver is already on the playmat when on-play fires, so
        // one copy there means this is the first.
        if g.player(player).playmat().count_name("Silver") != 1 {
            return Ok(HookVerdict::Keep);
        }
        g.player_mut(player).state.coins += 1;
        Ok(HookVerdict::Unregister)
    });
    // Expire any unspent bonus at end of turn.
    game.hooks_mut().register_turn_end("Merchant expiry", move |g, who| {
        if who != player {
            return Ok(HookVerdict::Keep);
        }
        g.hooks_mut()
            .unregister(crate::hooks::HookPoint::OnPlay, "Merchant");
        Ok(HookVerdict::Unregister)
    });
    Ok(())
}

/// Workshop: gain a card costing up to 4.
#[must_use]
pub fn workshop() -> CardHandle {
    Card::action("Workshop", 3).effect(workshop_play).handle()
}

fn workshop_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    gain_costing_up_to(game, player, "Workshop", Cost::coins(4))
}

fn gain_costing_up_to(game: &mut Game, player: PlayerId, tag: &str, budget: Cost) -> Result<()> {
    let candidates: Vec<CardHandle> = game
        .supply()
        .available_cards()
        .into_iter()
        .filter(|c| game.card_cost(c).fits_within(budget))
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }
    let choice = CardChoice::exactly(
        tag,
        format!("Gain a card costing up to {budget}"),
        candidates,
        1,
    );
    if let Some(card) = game.ask_gain(player, &choice)? {
        game.gain_card(player, &card, &Destination::Discard)?;
    }
    Ok(())
}

/// Bridge: +1 Buy, +1 coin. Every card costs 1 less this turn.
#[must_use]
pub fn bridge() -> CardHandle {
    Card::action("Bridge", 4).buys(1).coins(1).effect(bridge_play).handle()
}

fn bridge_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.player_mut(player).state.cost_reduction += 1;
    Ok(())
}

/// Militia: +2 coins. Each other player discards down to three cards.
#[must_use]
pub fn militia() -> CardHandle {
    Card::action("Militia", 4).coins(2).attack().effect(militia_play).handle()
}

fn militia_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.attack_opponents(player, |g, victim| {
        let hand = g.player(victim).hand().cards().to_vec();
        if hand.len() <= 3 {
            return Ok(());
        }
        let excess = hand.len() - 3;
        let choice =
            CardChoice::exactly("Militia", "Discard down to three cards in hand", hand, excess);
        for card in g.ask_discard(victim, &choice)? {
            g.discard_from_hand(victim, &card)?;
        }
        Ok(())
    })
}

/// Moneylender: you may trash a Copper from your hand for +3 coins.
#[must_use]
pub fn moneylender() -> CardHandle {
    Card::action("Moneylender", 4).effect(moneylender_play).handle()
}

fn moneylender_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    let Some(copper) = game.player(player).hand().find_name("Copper").cloned() else {
        return Ok(());
    };
    let choice = BinaryChoice::new("Moneylender", "Trash a Copper for +3 coins?");
    if game.ask_binary(player, &choice) {
        game.trash_from(player, &copper, &Zone::Hand)?;
        game.player_mut(player).state.coins += 3;
    }
    Ok(())
}

/// Smithy: +3 Cards.
#[must_use]
pub fn smithy() -> CardHandle {
    Card::action("Smithy", 4).cards(3).handle()
}

/// Throne Room: play an action card from your hand twice.
#[must_use]
pub fn throne_room() -> CardHandle {
    Card::action("Throne Room", 4).effect(throne_room_play).handle()
}

fn throne_room_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    let actions: Vec<CardHandle> = game
        .player(player)
        .hand()
        .iter()
        .filter(|c| c.is_action())
        .cloned()
        .collect();
    if actions.is_empty() {
        return Ok(());
    }
    let choice = CardChoice::optional("Throne Room", "Play an action card twice", actions);
    if let Some(card) = game.ask_multi_play(player, &choice)? {
        game.multi_play(player, &card, 2)?;
    }
    Ok(())
}

/// Gardens: worth 1 point per 10 cards you own.
#[must_use]
pub fn gardens() -> CardHandle {
    Card::victory("Gardens", 4, 0)
        .scored_by(Score::PerCards { per: 10, points: 1 })
        .handle()
}

/// Festival: +2 Actions, +1 Buy, +2 coins.
#[must_use]
pub fn festival() -> CardHandle {
    Card::action("Festival", 5).actions(2).buys(1).coins(2).handle()
}

/// Laboratory: +2 Cards, +1 Action.
#[must_use]
pub fn laboratory() -> CardHandle {
    Card::action("Laboratory", 5).cards(2).actions(1).handle()
}

/// Market: +1 Card, +1 Action, +1 Buy, +1 coin.
#[must_use]
pub fn market() -> CardHandle {
    Card::action("Market", 5).cards(1).actions(1).buys(1).coins(1).handle()
}

/// Council Room: +4 Cards, +1 Buy. Each other player draws a card.
#[must_use]
pub fn council_room() -> CardHandle {
    Card::action("Council Room", 5)
        .cards(4)
        .buys(1)
        .effect(council_room_play)
        .handle()
}

fn council_room_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.each_opponent(player, |g, opponent| {
        g.draw_cards(opponent, 1).map(|_| ())
    })
}

/// Witch: +2 Cards. Each other player gains a Curse.
#[must_use]
pub fn witch() -> CardHandle {
    Card::action("Witch", 5).cards(2).attack().effect(witch_play).handle()
}

fn witch_play(game: &mut Game, player: PlayerId, _plays: u32) -> Result<()> {
    game.attack_opponents(player, |g, victim| {
        let Some(curse) = g.supply().sample("Curse") else {
            return Ok(());
        };
        g.try_gain_card(victim, &curse, &Destination::Discard)?;
        Ok(())
    })
}

/// The base expansion.
#[must_use]
pub fn base_set() -> CardSet {
    CardSet::from_cards(
        "Base",
        vec![
            cellar(),
            chapel(),
            moat(),
            harbinger(),
            village(),
            merchant(),
            workshop(),
            bridge(),
            militia(),
            moneylender(),
            smithy(),
            throne_room(),
            gardens(),
            festival(),
            laboratory(),
            market(),
            council_room(),
            witch(),
        ],
    )
}
