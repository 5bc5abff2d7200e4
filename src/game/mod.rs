//! The game: shared state, generic operations, and the turn machine.
//!
//! ## Key Types
//!
//! - [`Game`]: supply, trash, players, effect registry, RNG, turn state
//! - [`GameBuilder`]: construction and validation of a playable game
//! - [`Phase`]: the per-turn state machine
//! - [`GameOutcome`] / [`PlayerSummary`]: the result of [`Game::play`]
//!
//! All cross-cutting mutation (drawing, playing, buying, gaining,
//! trashing, turn transitions) goes through `Game` methods keyed by
//! [`PlayerId`], so container and supply invariants are enforced in one
//! place and every card effect is built from the same primitive
//! vocabulary.

pub mod builder;
pub mod choices;
pub mod ops;
pub mod outcome;
pub mod turn;

pub use builder::GameBuilder;
pub use outcome::{GameOutcome, PlayerSummary};

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Cost};
use crate::error::Result;
use crate::hooks::HookRegistry;
use crate::player::{Player, PlayerId};
use crate::rng::GameRng;
use crate::supply::Supply;
use crate::zones::CardStack;

/// The per-turn phase machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Action,
    Treasure,
    Buy,
    Cleanup,
    GameOver,
}

/// One full game in progress.
///
/// Built by [`GameBuilder`]; driven to completion by [`Game::play`], or
/// stepped manually through the operation methods for tests and custom
/// harnesses.
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) supply: Supply,
    pub(crate) trash: CardStack,
    pub(crate) hooks: HookRegistry,
    pub(crate) rng: GameRng,
    /// Turn order; fixed at build time (optionally shuffled once).
    seating: Vec<PlayerId>,
    /// Index into `seating` of the player whose turn it is.
    active: usize,
    phase: Phase,
    /// Pile whose depletion ends the game (normally "Province").
    end_pile: String,
    /// Safety valve: the game ends after this many total turns.
    turn_limit: u32,
    total_turns: u32,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players.len())
            .field("supply", &self.supply)
            .field("trash", &self.trash)
            .field("seating", &self.seating)
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("end_pile", &self.end_pile)
            .field("turn_limit", &self.turn_limit)
            .field("total_turns", &self.total_turns)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub(crate) fn assemble(
        players: Vec<Player>,
        supply: Supply,
        rng: GameRng,
        seating: Vec<PlayerId>,
        end_pile: String,
        turn_limit: u32,
    ) -> Self {
        Self {
            players,
            supply,
            trash: CardStack::new(),
            hooks: HookRegistry::new(),
            rng,
            seating,
            active: 0,
            phase: Phase::Action,
            end_pile,
            turn_limit,
            total_turns: 0,
        }
    }

    // === Access ===

    /// A player by seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Mutable access to a player.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The shared supply.
    #[must_use]
    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    /// The shared trash.
    #[must_use]
    pub fn trash(&self) -> &CardStack {
        &self.trash
    }

    /// The effect registry.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Mutable access to the effect registry; this is how card effects attach
    /// handlers to future events.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// The game RNG.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.seating[self.active]
    }

    /// The fixed turn order.
    #[must_use]
    pub fn seating(&self) -> &[PlayerId] {
        &self.seating
    }

    /// Completed turns across all players.
    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.total_turns
    }

    /// Every other player, in turn order starting after `id`.
    #[must_use]
    pub fn opponents(&self, id: PlayerId) -> Vec<PlayerId> {
        let pos = self
            .seating
            .iter()
            .position(|&p| p == id)
            .unwrap_or(0);
        (1..self.seating.len())
            .map(|offset| self.seating[(pos + offset) % self.seating.len()])
            .collect()
    }

    // === Costs ===

    /// A card's cost under the active turn-wide reduction, clamped at a
    /// zero floor. Every affordability check goes through here.
    #[must_use]
    pub fn card_cost(&self, card: &Card) -> Cost {
        let reduction = self.player(self.current_player()).state.cost_reduction;
        Cost {
            coins: (card.cost().coins - reduction).max(0),
            potions: card.cost().potions,
        }
    }

    // === Game end ===

    /// Whether the game has ended: the end pile (normally "Province") is
    /// sold out, or at least three piles of any kind are.
    #[must_use]
    pub fn is_over(&self) -> bool {
        if self.supply.pile_len(&self.end_pile) == Some(0) {
            return true;
        }
        self.supply.num_empty_piles() >= 3
    }

    /// Run the game to completion.
    ///
    /// # Errors
    ///
    /// Protocol violations ([`crate::error::GameError::DeciderContract`]
    /// and friends) propagate; game-rule failures are resolved inside
    /// the turn machinery and do not surface here.
    pub fn play(&mut self) -> Result<GameOutcome> {
        while !self.is_over() && self.total_turns < self.turn_limit {
            let player = self.current_player();
            self.take_turn(player)?;
            self.total_turns += 1;
            if self.is_over() {
                break;
            }
            self.active = (self.active + 1) % self.seating.len();
        }
        self.phase = Phase::GameOver;
        Ok(self.outcome())
    }
}
