//! The decision boundary between the engine and the actors playing it.
//!
//! The engine computes the *valid* options for every choice and hands
//! them to a [`Decider`] as a [`CardChoice`] (candidates plus a
//! cardinality bound) or a [`BinaryChoice`]. Whatever comes back is
//! validated: a decider is trusted but verified, and an out-of-bounds
//! selection is an engine-level [`GameError::DeciderContract`] rather
//! than a game-rule failure.
//!
//! Human terminal I/O and bot policy live outside this crate. The
//! implementations here exist to drive games in tests and to document
//! the boundary: [`NullDecider`] declines everything it legally can,
//! [`GreedyDecider`] plays everything and buys the most expensive card
//! offered, and [`ScriptedDecider`] replays a fixed script.

use std::cell::RefCell;
use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::cards::CardHandle;
use crate::error::{GameError, Result};
use crate::player::PlayerId;

/// Read-only snapshot of the acting player's turn, passed with every
/// choice.
#[derive(Clone, Debug)]
pub struct TurnView {
    pub player: PlayerId,
    pub actions: i32,
    pub buys: i32,
    pub coins: i32,
    pub potions: i32,
    /// The player's current hand.
    pub hand: Vec<CardHandle>,
}

/// A card selection request: pick between `min` and `max` cards from
/// `candidates`.
#[derive(Clone, Debug)]
pub struct CardChoice {
    /// Stable identifier for the decision point (usually the card name
    /// that caused it, or the phase).
    pub tag: String,
    /// Human-readable prompt.
    pub prompt: String,
    /// The valid cards, as computed by the engine.
    pub candidates: Vec<CardHandle>,
    pub min: usize,
    pub max: usize,
}

impl CardChoice {
    /// Create a choice, clamping the bounds to what the candidates allow.
    #[must_use]
    pub fn new(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        candidates: Vec<CardHandle>,
        min: usize,
        max: usize,
    ) -> Self {
        let max = max.min(candidates.len());
        let min = min.min(max);
        Self {
            tag: tag.into(),
            prompt: prompt.into(),
            candidates,
            min,
            max,
        }
    }

    /// Zero or one card.
    #[must_use]
    pub fn optional(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        candidates: Vec<CardHandle>,
    ) -> Self {
        Self::new(tag, prompt, candidates, 0, 1)
    }

    /// Exactly `n` cards (clamped to the candidate count).
    #[must_use]
    pub fn exactly(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        candidates: Vec<CardHandle>,
        n: usize,
    ) -> Self {
        Self::new(tag, prompt, candidates, n, n)
    }

    /// Up to `n` cards.
    #[must_use]
    pub fn up_to(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        candidates: Vec<CardHandle>,
        n: usize,
    ) -> Self {
        Self::new(tag, prompt, candidates, 0, n)
    }

    /// Any number of cards.
    #[must_use]
    pub fn any_number(
        tag: impl Into<String>,
        prompt: impl Into<String>,
        candidates: Vec<CardHandle>,
    ) -> Self {
        let n = candidates.len();
        Self::new(tag, prompt, candidates, 0, n)
    }

    /// Whether declining (picking nothing) is legal.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    fn contract(&self, reason: impl Into<String>) -> GameError {
        GameError::DeciderContract {
            tag: self.tag.clone(),
            reason: reason.into(),
        }
    }

    /// Validate a multi-card selection: cardinality within bounds and a
    /// multiset-subset of the candidates.
    pub fn validate(&self, selection: &[CardHandle]) -> Result<()> {
        if selection.len() < self.min || selection.len() > self.max {
            return Err(self.contract(format!(
                "selected {} cards, expected between {} and {}",
                selection.len(),
                self.min,
                self.max
            )));
        }

        let mut available: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &self.candidates {
            *available.entry(card.name()).or_insert(0) += 1;
        }
        for card in selection {
            match available.get_mut(card.name()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => {
                    return Err(
                        self.contract(format!("{} was not offered", card.name()))
                    );
                }
            }
        }
        Ok(())
    }

    /// Validate a zero-or-one selection.
    pub fn validate_single(&self, pick: Option<&CardHandle>) -> Result<()> {
        match pick {
            Some(card) => self.validate(std::slice::from_ref(card)),
            None if self.min == 0 => Ok(()),
            None => Err(self.contract(format!(
                "declined a choice requiring at least {} card(s)",
                self.min
            ))),
        }
    }

    /// The first `min` candidates, the smallest legal selection.
    #[must_use]
    pub fn minimal_selection(&self) -> Vec<CardHandle> {
        self.candidates[..self.min].to_vec()
    }
}

/// A yes/no question.
#[derive(Clone, Debug)]
pub struct BinaryChoice {
    pub tag: String,
    pub prompt: String,
}

impl BinaryChoice {
    /// Create a yes/no question.
    #[must_use]
    pub fn new(tag: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            prompt: prompt.into(),
        }
    }
}

/// An external actor resolving one player's choices.
///
/// Every method receives the valid options the engine computed; defaults
/// return the smallest legal answer so implementations only override the
/// decisions they care about.
pub trait Decider {
    /// Pick an action card to play, or `None` to end the action phase.
    fn action_phase(&self, _view: &TurnView, _choice: &CardChoice) -> Option<CardHandle> {
        None
    }

    /// Pick the treasures to play this turn, in one batch.
    fn treasure_phase(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        choice.candidates.clone()
    }

    /// Pick a card to buy, or `None` to stop buying.
    fn buy_phase(&self, _view: &TurnView, _choice: &CardChoice) -> Option<CardHandle> {
        None
    }

    /// Answer a yes/no question.
    fn binary(&self, _view: &TurnView, _choice: &BinaryChoice) -> bool {
        false
    }

    /// Pick cards to discard.
    fn discard(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        choice.minimal_selection()
    }

    /// Pick cards to trash.
    fn trash(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        choice.minimal_selection()
    }

    /// Pick a card to gain.
    fn gain(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        if choice.min > 0 {
            choice.candidates.first().cloned()
        } else {
            None
        }
    }

    /// Pick cards to put on top of the deck.
    fn topdeck(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        choice.minimal_selection()
    }

    /// Pick a card to play again (Throne-Room-style), or `None` to
    /// decline.
    fn multi_play(&self, _view: &TurnView, _choice: &CardChoice) -> Option<CardHandle> {
        None
    }
}

/// Declines everything it legally can; takes the minimum otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDecider;

impl Decider for NullDecider {
    fn treasure_phase(&self, _view: &TurnView, _choice: &CardChoice) -> Vec<CardHandle> {
        Vec::new()
    }
}

/// Plays the first action offered, all treasures, and buys the most
/// expensive card it can afford. Enough to drive complete games.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyDecider;

impl Decider for GreedyDecider {
    fn action_phase(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        choice.candidates.first().cloned()
    }

    fn buy_phase(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        choice
            .candidates
            .iter()
            .max_by_key(|c| (c.cost().coins, c.cost().potions))
            .cloned()
    }

    fn binary(&self, _view: &TurnView, _choice: &BinaryChoice) -> bool {
        true
    }

    fn multi_play(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        choice.candidates.first().cloned()
    }
}

/// Replays a fixed script; falls back to the default (minimal) answers
/// when its queue for a decision point runs dry.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    action_plays: RefCell<VecDeque<Option<String>>>,
    buys: RefCell<VecDeque<Option<String>>>,
    gains: RefCell<VecDeque<String>>,
    discards: RefCell<VecDeque<Vec<String>>>,
    trashes: RefCell<VecDeque<Vec<String>>>,
    topdecks: RefCell<VecDeque<Vec<String>>>,
    multi_plays: RefCell<VecDeque<Option<String>>>,
    binaries: RefCell<VecDeque<bool>>,
}

impl ScriptedDecider {
    /// Create an empty script (behaves like the trait defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action-phase play (builder pattern).
    #[must_use]
    pub fn will_play(self, name: &str) -> Self {
        self.action_plays
            .borrow_mut()
            .push_back(Some(name.to_owned()));
        self
    }

    /// Queue an action-phase pass (builder pattern).
    #[must_use]
    pub fn will_pass_action(self) -> Self {
        self.action_plays.borrow_mut().push_back(None);
        self
    }

    /// Queue a buy (builder pattern).
    #[must_use]
    pub fn will_buy(self, name: &str) -> Self {
        self.buys.borrow_mut().push_back(Some(name.to_owned()));
        self
    }

    /// Queue a declined buy (builder pattern).
    #[must_use]
    pub fn will_decline_buy(self) -> Self {
        self.buys.borrow_mut().push_back(None);
        self
    }

    /// Queue a gain pick (builder pattern).
    #[must_use]
    pub fn will_gain(self, name: &str) -> Self {
        self.gains.borrow_mut().push_back(name.to_owned());
        self
    }

    /// Queue a discard selection (builder pattern).
    #[must_use]
    pub fn will_discard(self, names: &[&str]) -> Self {
        self.discards
            .borrow_mut()
            .push_back(names.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    /// Queue a trash selection (builder pattern).
    #[must_use]
    pub fn will_trash(self, names: &[&str]) -> Self {
        self.trashes
            .borrow_mut()
            .push_back(names.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    /// Queue a topdeck selection (builder pattern).
    #[must_use]
    pub fn will_topdeck(self, names: &[&str]) -> Self {
        self.topdecks
            .borrow_mut()
            .push_back(names.iter().map(|s| (*s).to_owned()).collect());
        self
    }

    /// Queue a multi-play pick (builder pattern).
    #[must_use]
    pub fn will_multi_play(self, name: &str) -> Self {
        self.multi_plays
            .borrow_mut()
            .push_back(Some(name.to_owned()));
        self
    }

    /// Queue a yes/no answer (builder pattern).
    #[must_use]
    pub fn will_answer(self, answer: bool) -> Self {
        self.binaries.borrow_mut().push_back(answer);
        self
    }

    fn pick_named(choice: &CardChoice, name: &str) -> Option<CardHandle> {
        choice
            .candidates
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    fn pick_all_named(choice: &CardChoice, names: &[String]) -> Vec<CardHandle> {
        let mut remaining: Vec<&CardHandle> = choice.candidates.iter().collect();
        let mut picks = Vec::new();
        for name in names {
            if let Some(pos) = remaining.iter().position(|c| c.name() == name) {
                picks.push(remaining.remove(pos).clone());
            }
        }
        picks
    }
}

impl Decider for ScriptedDecider {
    fn action_phase(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        match self.action_plays.borrow_mut().pop_front() {
            Some(Some(name)) => Self::pick_named(choice, &name),
            _ => None,
        }
    }

    fn buy_phase(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        match self.buys.borrow_mut().pop_front() {
            Some(Some(name)) => Self::pick_named(choice, &name),
            _ => None,
        }
    }

    fn binary(&self, _view: &TurnView, _choice: &BinaryChoice) -> bool {
        self.binaries.borrow_mut().pop_front().unwrap_or(false)
    }

    fn discard(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        match self.discards.borrow_mut().pop_front() {
            Some(names) => Self::pick_all_named(choice, &names),
            None => choice.minimal_selection(),
        }
    }

    fn trash(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        match self.trashes.borrow_mut().pop_front() {
            Some(names) => Self::pick_all_named(choice, &names),
            None => choice.minimal_selection(),
        }
    }

    fn gain(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        match self.gains.borrow_mut().pop_front() {
            Some(name) => Self::pick_named(choice, &name),
            None if choice.min > 0 => choice.candidates.first().cloned(),
            None => None,
        }
    }

    fn topdeck(&self, _view: &TurnView, choice: &CardChoice) -> Vec<CardHandle> {
        match self.topdecks.borrow_mut().pop_front() {
            Some(names) => Self::pick_all_named(choice, &names),
            None => choice.minimal_selection(),
        }
    }

    fn multi_play(&self, _view: &TurnView, choice: &CardChoice) -> Option<CardHandle> {
        match self.multi_plays.borrow_mut().pop_front() {
            Some(Some(name)) => Self::pick_named(choice, &name),
            _ => None,
        }
    }
}
