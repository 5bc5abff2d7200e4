//! # provincial
//!
//! A deck-building card game engine: draw/discard/gain/trash economy, a
//! shared supply of card piles, a four-phase turn machine, and an effect
//! registry that lets individual card effects hook into future events
//! without the engine carrying a case per card.
//!
//! ## Design Principles
//!
//! 1. **Generic primitives, scripted cards**: every card effect is
//!    written against the same small operation vocabulary on [`Game`]
//!    (draw, play, buy, gain, trash, discard), so invariants are
//!    enforced in one place.
//!
//! 2. **Open extension surface**: cards are values; effects attach to
//!    future events through the [`hooks::HookRegistry`] and unregister
//!    themselves when spent. Third-party expansions need no engine
//!    changes.
//!
//! 3. **Typed failures**: sold-out piles, missing cards, and empty
//!    wallets are distinct recoverable errors a card effect catches;
//!    misconfiguration and decider contract violations propagate out of
//!    [`Game::play`].
//!
//! 4. **Deterministic**: the only nondeterminism is the seedable
//!    shuffle RNG; a seed plus a decider script reproduces a game
//!    exactly.
//!
//! ## Modules
//!
//! - `cards`: card descriptors, kinds, costs, expansion sets
//! - `zones`: ordered containers and supply piles
//! - `supply`: the shared pool of piles
//! - `player`: per-player containers, counters, scoring
//! - `hooks`: the effect registry
//! - `game`: the game state, generic operations, turn machine, builder
//! - `decider`: the external decision boundary and reference deciders
//! - `sets`: the bundled card library
//! - `error`: the failure taxonomy
//! - `rng`: seedable randomness

pub mod cards;
pub mod decider;
pub mod error;
pub mod game;
pub mod hooks;
pub mod player;
pub mod rng;
pub mod sets;
pub mod supply;
pub mod zones;

// Re-export commonly used types
pub use crate::cards::{Card, CardHandle, CardKind, CardPool, CardSet, Cost, PlayFn, Score};

pub use crate::zones::{CardStack, Destination, Pile, Zone};

pub use crate::supply::Supply;

pub use crate::player::{Player, PlayerId, TurnState};

pub use crate::hooks::{HookId, HookPoint, HookRegistry, HookResult, HookVerdict};

pub use crate::decider::{
    BinaryChoice, CardChoice, Decider, GreedyDecider, NullDecider, ScriptedDecider, TurnView,
};

pub use crate::game::{Game, GameBuilder, GameOutcome, Phase, PlayerSummary};

pub use crate::error::{GameError, Result};

pub use crate::rng::GameRng;
