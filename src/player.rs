//! Player state and player-local operations.
//!
//! A [`Player`] owns every container on their side of the table plus the
//! turn-scoped [`TurnState`] counters. Operations that touch only this
//! player live here; operations that also touch the supply, the shared
//! trash, the RNG, or fire registry hooks (draw, play, buy, gain, trash,
//! turn transitions) are [`crate::game::Game`] methods keyed by
//! [`PlayerId`], since they mutate state the player does not own.

use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardHandle;
use crate::decider::Decider;
use crate::rng::GameRng;
use crate::zones::CardStack;

/// Player identifier. Seats are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `count` players.
    pub fn all(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Turn-scoped counters, reset at the start of every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub actions: i32,
    pub buys: i32,
    pub coins: i32,
    pub potions: i32,
    /// Coins shaved off every card's cost for the rest of the turn
    /// (Bridge-style). Applied by [`crate::game::Game::card_cost`].
    pub cost_reduction: i32,
}

impl TurnState {
    /// The state every turn begins with: one action, one buy, no money.
    #[must_use]
    pub const fn fresh() -> Self {
        Self {
            actions: 1,
            buys: 1,
            coins: 0,
            potions: 0,
            cost_reduction: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::fresh()
    }
}

/// One seat at the table.
pub struct Player {
    id: PlayerId,
    name: String,
    pub(crate) deck: CardStack,
    pub(crate) hand: CardStack,
    pub(crate) discard: CardStack,
    pub(crate) playmat: CardStack,
    mats: FxHashMap<String, CardStack>,
    /// Duration cards excluded from the next cleanup sweep, by name.
    /// Two pins of the same name keep two copies out.
    pinned: Vec<String>,
    /// Turn-scoped counters.
    pub state: TurnState,
    pub(crate) turns_taken: u32,
    pub(crate) shuffles: u32,
    pub(crate) actions_played: u32,
    /// Cards this player owns across all containers. Gains increment it,
    /// trashing to the shared trash decrements it.
    pub(crate) cards_owned: usize,
    decider: Rc<dyn Decider>,
}

impl Player {
    /// Create a player with empty containers.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, decider: Rc<dyn Decider>) -> Self {
        Self {
            id,
            name: name.into(),
            deck: CardStack::new(),
            hand: CardStack::new(),
            discard: CardStack::new(),
            playmat: CardStack::new(),
            mats: FxHashMap::default(),
            pinned: Vec::new(),
            state: TurnState::fresh(),
            turns_taken: 0,
            shuffles: 0,
            actions_played: 0,
            cards_owned: 0,
            decider,
        }
    }

    /// Re-initialize to a fresh game: the given starting deck, everything
    /// else empty, all counters zeroed. The opening shuffle and hand are
    /// the game's job.
    pub fn reset_with_deck(&mut self, starting_deck: Vec<CardHandle>) {
        self.cards_owned = starting_deck.len();
        self.deck = CardStack::from_cards(starting_deck);
        self.hand = CardStack::new();
        self.discard = CardStack::new();
        self.playmat = CardStack::new();
        self.mats.clear();
        self.pinned.clear();
        self.state = TurnState::fresh();
        self.turns_taken = 0;
        self.shuffles = 0;
        self.actions_played = 0;
    }

    // === Identity ===

    /// This player's seat.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// This player's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decider resolving this player's choices.
    #[must_use]
    pub fn decider(&self) -> &Rc<dyn Decider> {
        &self.decider
    }

    // === Containers ===

    /// The draw deck (top = end).
    #[must_use]
    pub fn deck(&self) -> &CardStack {
        &self.deck
    }

    /// The hand.
    #[must_use]
    pub fn hand(&self) -> &CardStack {
        &self.hand
    }

    /// The discard pile.
    #[must_use]
    pub fn discard_pile(&self) -> &CardStack {
        &self.discard
    }

    /// Cards in play this turn (plus lingering duration cards).
    #[must_use]
    pub fn playmat(&self) -> &CardStack {
        &self.playmat
    }

    /// A named set-aside mat, if it exists.
    #[must_use]
    pub fn mat(&self, name: &str) -> Option<&CardStack> {
        self.mats.get(name)
    }

    /// A named set-aside mat, created on first use.
    pub fn mat_mut(&mut self, name: &str) -> &mut CardStack {
        self.mats.entry(name.to_owned()).or_default()
    }

    /// Iterate every card this player owns, across all containers.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardHandle> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.playmat.iter())
            .chain(self.mats.values().flat_map(|m| m.iter()))
    }

    /// Total number of cards owned across all containers.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.hand.len()
            + self.discard.len()
            + self.playmat.len()
            + self.mats.values().map(CardStack::len).sum::<usize>()
    }

    /// Owned-card count per the gain/trash ledger. Equal to
    /// [`Player::total_cards`] in every reachable state.
    #[must_use]
    pub fn cards_owned(&self) -> usize {
        self.cards_owned
    }

    /// Final deck composition: card name -> number of copies owned.
    #[must_use]
    pub fn deck_composition(&self) -> BTreeMap<String, usize> {
        let mut composition = BTreeMap::new();
        for card in self.all_cards() {
            *composition.entry(card.name().to_owned()).or_insert(0) += 1;
        }
        composition
    }

    // === Scoring ===

    /// Current score: the sum over every Victory and Curse card owned in
    /// any container, recomputed from scratch on every call.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.all_cards()
            .filter(|c| c.is_scoring())
            .map(|c| c.victory_points(self))
            .sum()
    }

    // === Counters ===

    /// Turns this player has taken.
    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Times this player's deck has been reshuffled.
    #[must_use]
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Action cards played so far this turn.
    #[must_use]
    pub fn actions_played(&self) -> u32 {
        self.actions_played
    }

    // === Duration bookkeeping ===

    /// Keep one copy of `name` on the playmat through the next cleanup.
    pub fn pin_duration(&mut self, name: impl Into<String>) {
        self.pinned.push(name.into());
    }

    /// Release one pin for `name`. No-op when nothing is pinned.
    pub fn unpin_duration(&mut self, name: &str) {
        if let Some(pos) = self.pinned.iter().position(|n| n == name) {
            self.pinned.remove(pos);
        }
    }

    /// Names currently pinned to the playmat.
    #[must_use]
    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }

    /// Reshuffle: fold the discard pile into the deck and permute.
    pub(crate) fn reshuffle(&mut self, rng: &mut GameRng) {
        self.discard.move_all_to(&mut self.deck);
        self.deck.shuffle(rng);
        self.shuffles += 1;
    }

    /// Cleanup sweep: hand and playmat go to the discard pile, except
    /// playmat cards held out by a duration pin.
    pub(crate) fn sweep_for_cleanup(&mut self) {
        self.hand.move_all_to(&mut self.discard);

        let mut pins: FxHashMap<String, usize> = FxHashMap::default();
        for name in &self.pinned {
            *pins.entry(name.clone()).or_insert(0) += 1;
        }

        let mut kept = Vec::new();
        for card in self.playmat.take_all() {
            match pins.get_mut(card.name()) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    kept.push(card);
                }
                _ => self.discard.add(card),
            }
        }
        self.playmat = CardStack::from_cards(kept);
    }
}
