//! Game results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

use super::Game;

/// Per-player result summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub score: i32,
    pub turns_taken: u32,
    pub shuffles: u32,
    /// Final deck composition: card name -> copies owned.
    pub deck: BTreeMap<String, usize>,
}

/// The result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Highest score wins; score ties break to fewest turns taken;
    /// players tied on both are joint winners.
    pub winners: Vec<PlayerId>,
    /// Total turns taken across all players.
    pub turns: u32,
    /// One summary per seat.
    pub players: Vec<PlayerSummary>,
}

impl GameOutcome {
    /// Whether `player` is among the winners.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }

    /// Whether the game ended in a joint win.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

impl Game {
    /// Compute the outcome from the current state.
    ///
    /// The winner rule is a single max-then-filter over all players so it
    /// holds for any number of tied players: best score, then fewest
    /// turns among the best scorers, then everyone still standing wins
    /// jointly.
    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        let standings: Vec<(PlayerId, i32, u32)> = self
            .players
            .iter()
            .map(|p| (p.id(), p.score(), p.turns_taken()))
            .collect();

        let best_score = standings.iter().map(|s| s.1).max().unwrap_or(0);
        let fewest_turns = standings
            .iter()
            .filter(|s| s.1 == best_score)
            .map(|s| s.2)
            .min()
            .unwrap_or(0);
        let winners = standings
            .iter()
            .filter(|s| s.1 == best_score && s.2 == fewest_turns)
            .map(|s| s.0)
            .collect();

        let players = self
            .players
            .iter()
            .map(|p| PlayerSummary {
                name: p.name().to_owned(),
                score: p.score(),
                turns_taken: p.turns_taken(),
                shuffles: p.shuffles(),
                deck: p.deck_composition(),
            })
            .collect();

        GameOutcome {
            winners,
            turns: self.total_turns(),
            players,
        }
    }
}
