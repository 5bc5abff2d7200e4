//! Game construction and validation.
//!
//! All setup violations surface at build time, never mid-game: player
//! count bounds, unknown kingdom cards, unknown starting-deck cards.

use std::rc::Rc;

use crate::cards::{CardHandle, CardKind, CardPool, CardSet};
use crate::decider::Decider;
use crate::error::{GameError, Result};
use crate::player::{Player, PlayerId};
use crate::rng::GameRng;
use crate::sets;
use crate::supply::Supply;

use super::Game;

const DEFAULT_KINGDOM_SIZE: usize = 10;
const DEFAULT_TURN_LIMIT: u32 = 1000;
const OPENING_HAND: usize = 5;

/// Builder for a playable [`Game`].
pub struct GameBuilder {
    players: Vec<(String, Rc<dyn Decider>)>,
    expansions: Vec<CardSet>,
    kingdom: Option<Vec<String>>,
    kingdom_size: usize,
    starting_deck: Vec<String>,
    seed: Option<u64>,
    shuffle_seating: bool,
    end_pile: String,
    turn_limit: u32,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    /// Start a builder. The basic supply (Copper through Curse) is
    /// always present; add expansions for kingdom cards.
    #[must_use]
    pub fn new() -> Self {
        let mut starting_deck = vec!["Copper".to_owned(); 7];
        starting_deck.extend(std::iter::repeat_with(|| "Estate".to_owned()).take(3));
        Self {
            players: Vec::new(),
            expansions: Vec::new(),
            kingdom: None,
            kingdom_size: DEFAULT_KINGDOM_SIZE,
            starting_deck,
            seed: None,
            shuffle_seating: false,
            end_pile: "Province".to_owned(),
            turn_limit: DEFAULT_TURN_LIMIT,
        }
    }

    /// Add a player seat (builder pattern). Seats are taken in call
    /// order unless [`GameBuilder::shuffle_seating`] is set.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, decider: Rc<dyn Decider>) -> Self {
        self.players.push((name.into(), decider));
        self
    }

    /// Add an expansion to draw kingdom cards from (builder pattern).
    #[must_use]
    pub fn expansion(mut self, set: CardSet) -> Self {
        self.expansions.push(set);
        self
    }

    /// Pick the kingdom explicitly instead of at random (builder
    /// pattern).
    #[must_use]
    pub fn kingdom<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kingdom = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Number of kingdom piles when the kingdom is chosen at random
    /// (builder pattern).
    #[must_use]
    pub fn kingdom_size(mut self, n: usize) -> Self {
        self.kingdom_size = n;
        self
    }

    /// Replace the default 7 Copper + 3 Estate starting deck (builder
    /// pattern).
    #[must_use]
    pub fn starting_deck(mut self, names: &[&str]) -> Self {
        self.starting_deck = names.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    /// Seed the game RNG for reproducible play (builder pattern).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Randomize seating order once at start (builder pattern).
    #[must_use]
    pub fn shuffle_seating(mut self, shuffle: bool) -> Self {
        self.shuffle_seating = shuffle;
        self
    }

    /// Pile whose depletion ends the game (builder pattern). Defaults to
    /// "Province"; a supply without it falls back to the three-empty-
    /// piles rule alone.
    #[must_use]
    pub fn end_pile(mut self, name: impl Into<String>) -> Self {
        self.end_pile = name.into();
        self
    }

    /// Hard cap on total turns, a guard against deciders that never end
    /// the game (builder pattern).
    #[must_use]
    pub fn turn_limit(mut self, turns: u32) -> Self {
        self.turn_limit = turns;
        self
    }

    /// Validate everything and deal the opening state.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPlayerCount`] outside 1-4 seats;
    /// [`GameError::InvalidGameSetup`] for unknown kingdom or
    /// starting-deck cards.
    pub fn build(self) -> Result<Game> {
        let player_count = self.players.len();
        if !(1..=4).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount(player_count));
        }

        let mut rng = self
            .seed
            .map_or_else(GameRng::from_entropy, GameRng::new);

        // Merge the card pool: basic supply first, then expansions.
        let basic = sets::basic_supply();
        let mut pool = CardPool::new();
        pool.add_set(&basic);
        for set in &self.expansions {
            pool.add_set(set);
        }

        // Pick the kingdom.
        let kingdom = self.select_kingdom(&basic, &pool, &mut rng)?;

        // Build the supply: basic piles plus one pile per kingdom card.
        let mut supply = Supply::new();
        for card in basic.iter() {
            supply.add_pile(card.clone(), pile_size(card, player_count))?;
        }
        let needs_potions = kingdom.iter().any(|c| c.cost().potions > 0);
        for card in &kingdom {
            supply.add_pile(card.clone(), pile_size(card, player_count))?;
        }
        if needs_potions {
            let potion = pool.get("Potion").cloned().ok_or_else(|| {
                GameError::InvalidGameSetup(
                    "kingdom uses potion costs but no Potion card is available".to_owned(),
                )
            })?;
            supply.add_pile(potion, 16)?;
        }

        // Resolve the starting deck.
        let mut starting_cards: Vec<CardHandle> = Vec::with_capacity(self.starting_deck.len());
        for name in &self.starting_deck {
            let card = pool.get(name).cloned().ok_or_else(|| {
                GameError::InvalidGameSetup(format!("starting deck card {name} is unknown"))
            })?;
            starting_cards.push(card);
        }

        // Seat the players.
        let mut players = Vec::with_capacity(player_count);
        for (idx, (name, decider)) in self.players.into_iter().enumerate() {
            let mut player = Player::new(PlayerId::new(idx as u8), name, decider);
            player.reset_with_deck(starting_cards.clone());
            players.push(player);
        }

        let mut seating: Vec<PlayerId> = PlayerId::all(player_count).collect();
        if self.shuffle_seating {
            rng.shuffle(&mut seating);
        }

        let mut game = Game::assemble(
            players,
            supply,
            rng,
            seating,
            self.end_pile,
            self.turn_limit,
        );

        // Opening shuffle and hands. The opening shuffle is part of
        // setup and does not count toward the shuffle counter.
        for id in PlayerId::all(player_count) {
            let p = &mut game.players[id.index()];
            p.deck.shuffle(&mut game.rng);
        }
        for id in PlayerId::all(player_count) {
            game.draw_cards(id, OPENING_HAND)?;
        }

        Ok(game)
    }

    fn select_kingdom(
        &self,
        basic: &CardSet,
        pool: &CardPool,
        rng: &mut GameRng,
    ) -> Result<Vec<CardHandle>> {
        if let Some(names) = &self.kingdom {
            let mut kingdom = Vec::with_capacity(names.len());
            for name in names {
                let card = pool.get(name).cloned().ok_or_else(|| {
                    GameError::InvalidGameSetup(format!(
                        "kingdom card {name} is not in the supplied expansions"
                    ))
                })?;
                if basic.contains(name) {
                    return Err(GameError::InvalidGameSetup(format!(
                        "{name} is a basic card, not a kingdom pile"
                    )));
                }
                kingdom.push(card);
            }
            Ok(kingdom)
        } else {
            // Potion is infrastructure for potion costs, never a
            // kingdom pile of its own.
            let mut candidates: Vec<CardHandle> = pool
                .cards()
                .iter()
                .filter(|c| !basic.contains(c.name()) && c.name() != "Potion")
                .cloned()
                .collect();
            rng.shuffle(&mut candidates);
            candidates.truncate(self.kingdom_size);
            Ok(candidates)
        }
    }
}

/// Default pile size for a card at a given player count.
fn pile_size(card: &CardHandle, players: usize) -> usize {
    if card.is(CardKind::Curse) {
        return (10 * players.saturating_sub(1)).max(10);
    }
    if card.is(CardKind::Victory) {
        return if players >= 3 { 12 } else { 8 };
    }
    match card.name() {
        "Copper" => 60,
        "Silver" => 40,
        "Gold" => 30,
        _ => 10,
    }
}
