//! Card descriptors.
//!
//! A [`Card`] holds the unchanging facts about a card: name, cost, kind
//! tags, and its behavior. Behavior splits into data (treasure yield,
//! vanilla action bonuses, a scoring rule) and an optional scripted
//! effect: the card-specific half of play, a plain function over the
//! game so third-party expansions plug in without the engine knowing
//! about individual cards.
//!
//! Cards have no per-copy state. Containers hold [`CardHandle`]s and two
//! handles to "Copper" are the same logical card, so equality is by name.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::Result;
use crate::game::Game;
use crate::player::{Player, PlayerId};

/// Shared handle to a card singleton.
pub type CardHandle = Arc<Card>;

/// The scripted half of a card's play.
///
/// The final argument is the play count: 1 on a normal play, and 1..=n
/// across Throne-Room-style repeated plays, so effects that care how many
/// times they have resolved this invocation can tell.
pub type PlayFn = fn(&mut Game, PlayerId, u32) -> Result<()>;

/// Kind tags. A card carries a set of these (e.g. Action + Attack).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Treasure,
    Victory,
    Action,
    Attack,
    Reaction,
    Curse,
    /// The card's effect spans into its owner's next turn and the card
    /// stays on the playmat through cleanup until the effect resolves.
    Duration,
}

/// A card's printed cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub coins: i32,
    pub potions: i32,
}

impl Cost {
    /// A plain coin cost.
    #[must_use]
    pub const fn coins(coins: i32) -> Self {
        Self { coins, potions: 0 }
    }

    /// A cost with a potion component.
    #[must_use]
    pub const fn with_potions(coins: i32, potions: i32) -> Self {
        Self { coins, potions }
    }

    /// Whether this cost can be paid out of `budget`.
    #[must_use]
    pub fn fits_within(&self, budget: Cost) -> bool {
        self.coins <= budget.coins && self.potions <= budget.potions
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coins)?;
        for _ in 0..self.potions {
            write!(f, "P")?;
        }
        Ok(())
    }
}

/// How a Victory or Curse card scores.
///
/// Scores are recomputed on demand, never cached: deck composition
/// changes between calls.
#[derive(Clone, Copy, Debug)]
pub enum Score {
    /// A fixed number of points.
    Flat(i32),
    /// `points` per `per` cards the player owns, floor division
    /// (Gardens-style).
    PerCards { per: usize, points: i32 },
    /// Arbitrary rule over the owning player.
    Custom(fn(&Player) -> i32),
}

impl Score {
    /// Evaluate this rule for `player`.
    #[must_use]
    pub fn evaluate(&self, player: &Player) -> i32 {
        match self {
            Score::Flat(points) => *points,
            Score::PerCards { per, points } => {
                (player.total_cards() / per) as i32 * points
            }
            Score::Custom(rule) => rule(player),
        }
    }
}

/// An immutable card descriptor.
#[derive(Debug)]
pub struct Card {
    name: String,
    cost: Cost,
    kinds: SmallVec<[CardKind; 4]>,
    /// Coins yielded when played as a treasure.
    coins: i32,
    /// Potions yielded when played as a treasure.
    potions: i32,
    // Vanilla action bonuses.
    plus_cards: i32,
    plus_actions: i32,
    plus_buys: i32,
    plus_coins: i32,
    score: Option<Score>,
    play_fn: Option<PlayFn>,
}

impl Card {
    fn base(name: impl Into<String>, cost: Cost, kind: CardKind) -> Self {
        let mut kinds = SmallVec::new();
        kinds.push(kind);
        Self {
            name: name.into(),
            cost,
            kinds,
            coins: 0,
            potions: 0,
            plus_cards: 0,
            plus_actions: 0,
            plus_buys: 0,
            plus_coins: 0,
            score: None,
            play_fn: None,
        }
    }

    /// A treasure worth `coins` when played.
    #[must_use]
    pub fn treasure(name: impl Into<String>, cost: i32, coins: i32) -> Self {
        let mut card = Self::base(name, Cost::coins(cost), CardKind::Treasure);
        card.coins = coins;
        card
    }

    /// A victory card worth a flat `points`.
    #[must_use]
    pub fn victory(name: impl Into<String>, cost: i32, points: i32) -> Self {
        let mut card = Self::base(name, Cost::coins(cost), CardKind::Victory);
        card.score = Some(Score::Flat(points));
        card
    }

    /// The Curse card: costs nothing, worth -1 point.
    #[must_use]
    pub fn curse() -> Self {
        let mut card = Self::base("Curse", Cost::coins(0), CardKind::Curse);
        card.score = Some(Score::Flat(-1));
        card
    }

    /// An action card; attach bonuses and effects with the builder
    /// methods.
    #[must_use]
    pub fn action(name: impl Into<String>, cost: i32) -> Self {
        Self::base(name, Cost::coins(cost), CardKind::Action)
    }

    // === Builder methods ===

    /// +N cards when played (builder).
    #[must_use]
    pub fn cards(mut self, n: i32) -> Self {
        self.plus_cards = n;
        self
    }

    /// +N actions when played (builder).
    #[must_use]
    pub fn actions(mut self, n: i32) -> Self {
        self.plus_actions = n;
        self
    }

    /// +N buys when played (builder).
    #[must_use]
    pub fn buys(mut self, n: i32) -> Self {
        self.plus_buys = n;
        self
    }

    /// +N coins when played (builder).
    #[must_use]
    pub fn coins(mut self, n: i32) -> Self {
        self.plus_coins = n;
        self
    }

    /// Add a potion component to the cost (builder).
    #[must_use]
    pub fn potion_cost(mut self, potions: i32) -> Self {
        self.cost.potions = potions;
        self
    }

    /// Treasure yields potions when played (builder).
    #[must_use]
    pub fn yields_potions(mut self, potions: i32) -> Self {
        self.potions = potions;
        self
    }

    /// Add a kind tag (builder).
    #[must_use]
    pub fn kind(mut self, kind: CardKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Tag as an attack (builder).
    #[must_use]
    pub fn attack(self) -> Self {
        self.kind(CardKind::Attack)
    }

    /// Tag as a reaction (builder).
    #[must_use]
    pub fn reaction(self) -> Self {
        self.kind(CardKind::Reaction)
    }

    /// Tag as a duration card (builder).
    #[must_use]
    pub fn duration(self) -> Self {
        self.kind(CardKind::Duration)
    }

    /// Attach the scripted half of play (builder).
    #[must_use]
    pub fn effect(mut self, play_fn: PlayFn) -> Self {
        self.play_fn = Some(play_fn);
        self
    }

    /// Attach a scoring rule (builder), for Gardens-style cards.
    #[must_use]
    pub fn scored_by(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    /// Wrap into a shared handle.
    #[must_use]
    pub fn handle(self) -> CardHandle {
        Arc::new(self)
    }

    // === Queries ===

    /// The card's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The printed cost. Dynamic reductions are applied by
    /// [`Game::card_cost`], which every affordability check goes through.
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The kind tag set.
    #[must_use]
    pub fn kinds(&self) -> &[CardKind] {
        &self.kinds
    }

    /// Whether the card carries `kind`.
    #[must_use]
    pub fn is(&self, kind: CardKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether the card can be played in the action phase.
    #[must_use]
    pub fn is_action(&self) -> bool {
        self.is(CardKind::Action)
    }

    /// Whether the card can be played in the treasure phase.
    #[must_use]
    pub fn is_treasure(&self) -> bool {
        self.is(CardKind::Treasure)
    }

    /// Whether the card counts for scoring.
    #[must_use]
    pub fn is_scoring(&self) -> bool {
        self.is(CardKind::Victory) || self.is(CardKind::Curse)
    }

    /// Coins yielded when played as a treasure.
    #[must_use]
    pub fn treasure_coins(&self) -> i32 {
        self.coins
    }

    /// Potions yielded when played as a treasure.
    #[must_use]
    pub fn treasure_potions(&self) -> i32 {
        self.potions
    }

    /// Vanilla +cards bonus.
    #[must_use]
    pub fn plus_cards(&self) -> i32 {
        self.plus_cards
    }

    /// Vanilla +actions bonus.
    #[must_use]
    pub fn plus_actions(&self) -> i32 {
        self.plus_actions
    }

    /// Vanilla +buys bonus.
    #[must_use]
    pub fn plus_buys(&self) -> i32 {
        self.plus_buys
    }

    /// Vanilla +coins bonus.
    #[must_use]
    pub fn plus_coins(&self) -> i32 {
        self.plus_coins
    }

    /// The scripted half of play, if any.
    #[must_use]
    pub fn play_fn(&self) -> Option<PlayFn> {
        self.play_fn
    }

    /// Points this card is worth to `player` right now.
    ///
    /// Zero for cards with no scoring rule.
    #[must_use]
    pub fn victory_points(&self, player: &Player) -> i32 {
        self.score.map_or(0, |score| score.evaluate(player))
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Card {}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_card() {
        let gold = Card::treasure("Gold", 6, 3);

        assert_eq!(gold.name(), "Gold");
        assert_eq!(gold.cost(), Cost::coins(6));
        assert!(gold.is_treasure());
        assert!(!gold.is_action());
        assert_eq!(gold.treasure_coins(), 3);
    }

    #[test]
    fn test_action_builder() {
        let market = Card::action("Market", 5).cards(1).actions(1).buys(1).coins(1);

        assert!(market.is_action());
        assert_eq!(market.plus_cards(), 1);
        assert_eq!(market.plus_actions(), 1);
        assert_eq!(market.plus_buys(), 1);
        assert_eq!(market.plus_coins(), 1);
        assert!(market.play_fn().is_none());
    }

    #[test]
    fn test_multi_kind_card() {
        let witch = Card::action("Witch", 5).cards(2).attack();

        assert!(witch.is_action());
        assert!(witch.is(CardKind::Attack));
        assert!(!witch.is(CardKind::Reaction));
        assert_eq!(witch.kinds().len(), 2);
    }

    #[test]
    fn test_kind_deduplication() {
        let card = Card::action("Moat", 2).reaction().reaction();
        assert_eq!(card.kinds().len(), 2);
    }

    #[test]
    fn test_equality_is_by_name() {
        let a = Card::treasure("Copper", 0, 1);
        let b = Card::treasure("Copper", 0, 1);
        let c = Card::treasure("Silver", 3, 2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cost_fits_within() {
        let budget = Cost::with_potions(4, 1);

        assert!(Cost::coins(4).fits_within(budget));
        assert!(Cost::with_potions(3, 1).fits_within(budget));
        assert!(!Cost::coins(5).fits_within(budget));
        assert!(!Cost::with_potions(4, 2).fits_within(budget));
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(Cost::coins(3).to_string(), "3");
        assert_eq!(Cost::with_potions(3, 1).to_string(), "3P");
    }

    #[test]
    fn test_cost_serde_round_trip() {
        let cost = Cost::with_potions(2, 1);
        let json = serde_json::to_string(&cost).unwrap();
        let back: Cost = serde_json::from_str(&json).unwrap();
        assert_eq!(cost, back);
    }
}
