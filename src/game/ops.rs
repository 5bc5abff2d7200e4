//! Generic player operations.
//!
//! The primitive vocabulary every card effect is written against:
//! draw, discard, play, buy, gain, trash, and the turn transitions.
//! Each primitive enforces the container and supply invariants and
//! fires the matching registry hooks, so effect chains (a card playing
//! another card, which gains a card, which triggers more hooks)
//! resolve through ordinary nested calls.

use crate::cards::{CardHandle, CardKind, Cost};
use crate::decider::BinaryChoice;
use crate::error::{GameError, Result};
use crate::hooks::{CardHookFn, HookList, HookRegistry, HookVerdict, PlayerHookFn};
use crate::player::{PlayerId, TurnState};
use crate::zones::{Destination, Zone};

use super::{Game, Phase};

/// Projection to one player-scoped hook category.
type PlayerSlot = for<'a> fn(&'a mut HookRegistry) -> &'a mut HookList<PlayerHookFn>;

/// Projection to one card-scoped hook category.
type CardSlot = for<'a> fn(&'a mut HookRegistry) -> &'a mut HookList<CardHookFn>;

impl Game {
    // === Hook firing ===

    pub(crate) fn fire_player_hooks(&mut self, slot: PlayerSlot, player: PlayerId) -> Result<()> {
        let ids = slot(&mut self.hooks).snapshot_ids();
        for id in ids {
            // Gone or lent to an outer pass: skip.
            let Some(mut handler) = slot(&mut self.hooks).take_handler(id) else {
                continue;
            };
            match handler(self, player) {
                Ok(HookVerdict::Keep) => slot(&mut self.hooks).restore_handler(id, handler),
                Ok(HookVerdict::Unregister) => slot(&mut self.hooks).remove(id),
                Err(err) => {
                    slot(&mut self.hooks).restore_handler(id, handler);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn fire_card_hooks(
        &mut self,
        slot: CardSlot,
        player: PlayerId,
        card: &CardHandle,
    ) -> Result<()> {
        let ids = slot(&mut self.hooks).snapshot_ids();
        for id in ids {
            let Some(mut handler) = slot(&mut self.hooks).take_handler(id) else {
                continue;
            };
            match handler(self, player, card) {
                Ok(HookVerdict::Keep) => slot(&mut self.hooks).restore_handler(id, handler),
                Ok(HookVerdict::Unregister) => slot(&mut self.hooks).remove(id),
                Err(err) => {
                    slot(&mut self.hooks).restore_handler(id, handler);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    // === Drawing ===

    /// Draw up to `n` cards into the hand.
    ///
    /// Returns the number actually drawn. An empty deck reshuffles the
    /// discard pile in (counting a shuffle and firing on-shuffle); when
    /// both are empty, fewer cards are simply delivered.
    pub fn draw_cards(&mut self, player: PlayerId, n: usize) -> Result<usize> {
        self.draw_cards_to(player, n, &Destination::Hand)
    }

    /// Draw up to `n` cards to an arbitrary destination (revealing to a
    /// mat, topdecking, etc.).
    pub fn draw_cards_to(
        &mut self,
        player: PlayerId,
        n: usize,
        dest: &Destination,
    ) -> Result<usize> {
        let mut drawn = 0;
        for _ in 0..n {
            if self.players[player.index()].deck.is_empty() {
                if self.players[player.index()].discard.is_empty() {
                    break;
                }
                {
                    let p = &mut self.players[player.index()];
                    p.reshuffle(&mut self.rng);
                }
                self.fire_player_hooks(|h| &mut h.on_shuffle, player)?;
            }
            let Some(card) = self.players[player.index()].deck.draw() else {
                break;
            };
            self.place(player, card.clone(), dest);
            self.fire_card_hooks(|h| &mut h.on_draw, player, &card)?;
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Put a card into one of a player's containers.
    pub(crate) fn place(&mut self, player: PlayerId, card: CardHandle, dest: &Destination) {
        let p = &mut self.players[player.index()];
        match dest {
            Destination::Hand => p.hand.add(card),
            Destination::Discard => p.discard.add(card),
            Destination::DeckTop => p.deck.add(card),
            Destination::Playmat => p.playmat.add(card),
            Destination::Mat(name) => p.mat_mut(name).add(card),
        }
    }

    // === Discarding ===

    /// Move one matching card from hand to the discard pile.
    ///
    /// A silent no-op when the card is not in hand; callers validate
    /// membership through the decider contract.
    pub fn discard_from_hand(&mut self, player: PlayerId, card: &CardHandle) -> Result<()> {
        let Some(moved) = self.players[player.index()].hand.take_named(card.name()) else {
            return Ok(());
        };
        self.players[player.index()].discard.add(moved.clone());
        self.fire_card_hooks(|h| &mut h.on_discard, player, &moved)
    }

    // === Playing ===

    /// Play a card out of the hand by name.
    ///
    /// With `generic` set, the kind-independent bookkeeping happens too:
    /// the card moves to the playmat and an Action pays one action.
    /// Effects that re-play a card pass `generic = false` so the action
    /// cost is never deducted twice.
    ///
    /// # Errors
    ///
    /// [`GameError::CardNotFound`] when the hand has no such card,
    /// [`GameError::InvalidCardPlay`] when the card has no play path,
    /// [`GameError::InsufficientActions`] when an Action is played
    /// generically with no actions left.
    pub fn play_card(&mut self, player: PlayerId, name: &str, generic: bool) -> Result<()> {
        let card = self.players[player.index()]
            .hand
            .find_name(name)
            .cloned()
            .ok_or_else(|| GameError::CardNotFound(name.to_owned()))?;
        self.exact_play(player, &card, generic)
    }

    /// Play a specific card handle, not required to be in hand (used
    /// when an effect plays a card that was just revealed or discarded).
    pub fn exact_play(&mut self, player: PlayerId, card: &CardHandle, generic: bool) -> Result<()> {
        if !card.is_action() && !card.is_treasure() {
            return Err(GameError::InvalidCardPlay(card.name().to_owned()));
        }
        if generic {
            if card.is_action() {
                let state = &mut self.players[player.index()].state;
                if state.actions < 1 {
                    return Err(GameError::InsufficientActions);
                }
                state.actions -= 1;
            }
            let p = &mut self.players[player.index()];
            if let Some(moved) = p.hand.take_named(card.name()) {
                p.playmat.add(moved);
            }
        }
        self.resolve_play(player, card, 1)
    }

    /// Play an Action card `times` times (Throne-Room semantics): the
    /// card moves to the playmat once, no action is paid, and the
    /// specific half resolves repeatedly with the play count threaded
    /// through to the card's effect.
    pub fn multi_play(&mut self, player: PlayerId, card: &CardHandle, times: u32) -> Result<()> {
        if !card.is_action() {
            return Err(GameError::InvalidCardPlay(card.name().to_owned()));
        }
        {
            let p = &mut self.players[player.index()];
            if let Some(moved) = p.hand.take_named(card.name()) {
                p.playmat.add(moved);
            }
        }
        for play_count in 1..=times {
            self.resolve_play(player, card, play_count)?;
        }
        Ok(())
    }

    /// The specific half of a play: treasure yield, vanilla bonuses, the
    /// card's scripted effect, then the on-play hooks.
    fn resolve_play(&mut self, player: PlayerId, card: &CardHandle, play_count: u32) -> Result<()> {
        if card.is_treasure() {
            let state = &mut self.players[player.index()].state;
            state.coins += card.treasure_coins();
            state.potions += card.treasure_potions();
        }
        if card.is_action() {
            self.players[player.index()].actions_played += 1;
            if card.plus_cards() > 0 {
                self.draw_cards(player, card.plus_cards() as usize)?;
            }
            let state = &mut self.players[player.index()].state;
            state.actions += card.plus_actions();
            state.buys += card.plus_buys();
            state.coins += card.plus_coins();
        }
        if let Some(play_fn) = card.play_fn() {
            play_fn(self, player, play_count)?;
        }
        self.fire_card_hooks(|h| &mut h.on_play, player, card)
    }

    // === Buying and gaining ===

    /// Buy a card: validate buys and money against the reduced cost,
    /// take it from the supply into the discard pile, then fire on-buy
    /// and on-gain.
    pub fn buy_card(&mut self, player: PlayerId, card: &CardHandle) -> Result<()> {
        let cost = self.card_cost(card);
        let state = self.players[player.index()].state;
        if state.buys < 1 {
            return Err(GameError::InsufficientBuys);
        }
        if state.coins < cost.coins || state.potions < cost.potions {
            return Err(GameError::InsufficientMoney {
                needed: cost.coins,
                available: state.coins,
            });
        }

        let gained = self.supply.take(card.name())?;
        let p = &mut self.players[player.index()];
        p.state.buys -= 1;
        p.state.coins -= cost.coins;
        p.state.potions -= cost.potions;
        p.discard.add(gained.clone());
        p.cards_owned += 1;

        self.fire_card_hooks(|h| &mut h.on_buy, player, &gained)?;
        self.fire_card_hooks(|h| &mut h.on_gain, player, &gained)
    }

    /// Gain a card from the supply to `dest` (discard pile by default
    /// convention) and fire on-gain.
    pub fn gain_card(&mut self, player: PlayerId, card: &CardHandle, dest: &Destination) -> Result<()> {
        let gained = self.supply.take(card.name())?;
        self.place(player, gained.clone(), dest);
        self.players[player.index()].cards_owned += 1;
        self.fire_card_hooks(|h| &mut h.on_gain, player, &gained)
    }

    /// Gain a card, treating an empty pile as a quiet skip.
    ///
    /// Returns whether a card was gained. Attack effects that gain a
    /// card for every opponent use this so one sold-out pile does not
    /// abort the attack for the rest.
    pub fn try_gain_card(
        &mut self,
        player: PlayerId,
        card: &CardHandle,
        dest: &Destination,
    ) -> Result<bool> {
        match self.gain_card(player, card, dest) {
            Ok(()) => Ok(true),
            Err(GameError::EmptyPile(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    // === Trashing ===

    /// Move a matching card from `source` into the shared trash.
    ///
    /// # Errors
    ///
    /// [`GameError::CardNotFound`] when `source` has no such card.
    pub fn trash_from(&mut self, player: PlayerId, card: &CardHandle, source: &Zone) -> Result<()> {
        let p = &mut self.players[player.index()];
        let taken = match source {
            Zone::Hand => p.hand.take_named(card.name()),
            Zone::Deck => p.deck.take_named(card.name()),
            Zone::Discard => p.discard.take_named(card.name()),
            Zone::Playmat => p.playmat.take_named(card.name()),
            Zone::Mat(name) => p.mat_mut(name).take_named(card.name()),
        }
        .ok_or_else(|| GameError::CardNotFound(card.name().to_owned()))?;
        p.cards_owned -= 1;
        self.trash.add(taken);
        Ok(())
    }

    // === Turn transitions ===

    /// Begin a turn: reset the turn state, bump the counters, fire the
    /// turn-start hooks (where one-shot "next turn" bonuses resolve and
    /// retire themselves).
    pub fn start_turn(&mut self, player: PlayerId) -> Result<()> {
        self.set_phase(Phase::Action);
        let p = &mut self.players[player.index()];
        p.state = TurnState::fresh();
        p.turns_taken += 1;
        p.actions_played = 0;
        self.fire_player_hooks(|h| &mut h.turn_start, player)
    }

    /// Fire the turn-end hooks. Runs after the buy phase, before
    /// cleanup's sweep, so handlers still see the turn's played cards.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<()> {
        self.fire_player_hooks(|h| &mut h.turn_end, player)
    }

    /// Cleanup: sweep hand and playmat to the discard pile (pinned
    /// duration cards stay out), draw the next hand of five, reset the
    /// turn state.
    pub fn cleanup_phase(&mut self, player: PlayerId) -> Result<()> {
        self.set_phase(Phase::Cleanup);
        self.players[player.index()].sweep_for_cleanup();
        self.draw_cards(player, 5)?;
        self.players[player.index()].state = TurnState::fresh();
        Ok(())
    }

    // === Multi-player helpers ===

    /// Run `attack` against every opponent in turn order. An opponent
    /// holding a Reaction card may reveal it to be unaffected.
    ///
    /// The attack body is responsible for catching the per-opponent
    /// failures it expects (use [`Game::try_gain_card`] for gains).
    pub fn attack_opponents<F>(&mut self, attacker: PlayerId, mut attack: F) -> Result<()>
    where
        F: FnMut(&mut Game, PlayerId) -> Result<()>,
    {
        for opponent in self.opponents(attacker) {
            if self.reveals_reaction(opponent) {
                continue;
            }
            attack(self, opponent)?;
        }
        Ok(())
    }

    /// Run `f` for every opponent in turn order (no attack, no reaction
    /// window, Council-Room-style group effects).
    pub fn each_opponent<F>(&mut self, player: PlayerId, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Game, PlayerId) -> Result<()>,
    {
        for opponent in self.opponents(player) {
            f(self, opponent)?;
        }
        Ok(())
    }

    /// Offer a defender the chance to reveal a Reaction card.
    fn reveals_reaction(&self, defender: PlayerId) -> bool {
        let Some(reaction) = self.players[defender.index()]
            .hand
            .iter()
            .find(|c| c.is(CardKind::Reaction))
        else {
            return false;
        };
        let choice = BinaryChoice::new(
            "reveal-reaction",
            format!("Reveal {} to be unaffected by the attack?", reaction.name()),
        );
        self.ask_binary(defender, &choice)
    }

    /// The money and buys currently available, as a cost budget.
    #[must_use]
    pub fn budget(&self, player: PlayerId) -> Cost {
        let state = self.players[player.index()].state;
        Cost {
            coins: state.coins,
            potions: state.potions,
        }
    }
}
