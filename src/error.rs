//! Error taxonomy for the engine.
//!
//! Every failure is a typed, recoverable value. Resource exhaustion and
//! lookup failures are meant to be caught by the calling card effect
//! (an attack that gains a Curse per opponent catches [`GameError::EmptyPile`]
//! and moves on); protocol violations indicate a misconfigured game or a
//! misbehaving decider and propagate out of [`crate::game::Game::play`].

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

/// All failure modes of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    // === Resource exhaustion ===
    /// A supply pile was asked for a card it no longer has.
    #[error("the {0} pile is empty")]
    EmptyPile(String),

    /// A purchase was attempted without the coins (or potions) to pay for it.
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientMoney { needed: i32, available: i32 },

    /// A purchase was attempted with no buys remaining.
    #[error("no buys remaining this turn")]
    InsufficientBuys,

    /// An action play was attempted with no actions remaining.
    #[error("no actions remaining this turn")]
    InsufficientActions,

    // === Lookup failures ===
    /// No supply pile exists for the requested card name.
    #[error("no supply pile named {0}")]
    PileNotFound(String),

    /// The requested card was not in the container it was expected in.
    #[error("card {0} not found")]
    CardNotFound(String),

    // === Protocol violations ===
    /// A card with no applicable play path was played.
    #[error("{0} cannot be played")]
    InvalidCardPlay(String),

    /// Game construction was attempted with an unsupported player count.
    #[error("invalid player count {0}: games take 1-4 players")]
    InvalidPlayerCount(usize),

    /// Game construction parameters were inconsistent.
    #[error("invalid game setup: {0}")]
    InvalidGameSetup(String),

    /// A decider returned a selection outside the choice it was given.
    #[error("decider violated the {tag} choice: {reason}")]
    DeciderContract { tag: String, reason: String },

    /// A decider was asked for a card-specific decision it cannot resolve.
    #[error("decider has no handler for the {0} choice")]
    UnsupportedChoice(String),
}

impl GameError {
    /// True for the failures a card effect is expected to catch and
    /// recover from mid-resolution.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::EmptyPile(_)
                | GameError::InsufficientMoney { .. }
                | GameError::InsufficientBuys
                | GameError::InsufficientActions
                | GameError::PileNotFound(_)
                | GameError::CardNotFound(_)
        )
    }
}
