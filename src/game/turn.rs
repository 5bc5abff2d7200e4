//! The phase machine: one player's turn from start to cleanup.

use crate::cards::CardHandle;
use crate::decider::CardChoice;
use crate::error::Result;
use crate::player::PlayerId;

use super::{Game, Phase};

impl Game {
    /// Take one complete turn for `player`.
    pub(crate) fn take_turn(&mut self, player: PlayerId) -> Result<()> {
        self.start_turn(player)?;
        self.action_phase(player)?;
        self.treasure_phase(player)?;
        self.buy_phase(player)?;
        self.end_turn(player)?;
        self.cleanup_phase(player)
    }

    /// Action phase: while actions remain and the hand holds an Action
    /// card, offer a play; the decider may pass at any point.
    pub(crate) fn action_phase(&mut self, player: PlayerId) -> Result<()> {
        self.set_phase(Phase::Action);
        loop {
            if self.player(player).state.actions < 1 {
                break;
            }
            let playable: Vec<CardHandle> = self
                .player(player)
                .hand()
                .iter()
                .filter(|c| c.is_action())
                .cloned()
                .collect();
            if playable.is_empty() {
                break;
            }

            let choice =
                CardChoice::optional("action-phase", "Play an action card, or pass", playable);
            let view = self.turn_view(player);
            let pick = self.player(player).decider().clone().action_phase(&view, &choice);
            choice.validate_single(pick.as_ref())?;

            match pick {
                Some(card) => self.play_card(player, card.name(), true)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Treasure phase: the decider picks any subset of hand treasures in
    /// one batch; each resolves as an exact play.
    pub(crate) fn treasure_phase(&mut self, player: PlayerId) -> Result<()> {
        self.set_phase(Phase::Treasure);
        let treasures: Vec<CardHandle> = self
            .player(player)
            .hand()
            .iter()
            .filter(|c| c.is_treasure())
            .cloned()
            .collect();
        if treasures.is_empty() {
            return Ok(());
        }

        let choice = CardChoice::any_number("treasure-phase", "Play treasures", treasures);
        let view = self.turn_view(player);
        let picks = self.player(player).decider().clone().treasure_phase(&view, &choice);
        choice.validate(&picks)?;

        for card in picks {
            self.exact_play(player, &card, true)?;
        }
        Ok(())
    }

    /// Buy phase: while buys remain, offer every supply card affordable
    /// at the current money under the active cost reduction.
    pub(crate) fn buy_phase(&mut self, player: PlayerId) -> Result<()> {
        self.set_phase(Phase::Buy);
        loop {
            if self.player(player).state.buys < 1 {
                break;
            }
            let budget = self.budget(player);
            let affordable: Vec<CardHandle> = self
                .supply
                .available_cards()
                .into_iter()
                .filter(|c| self.card_cost(c).fits_within(budget))
                .collect();
            if affordable.is_empty() {
                break;
            }

            let choice = CardChoice::optional("buy-phase", "Buy a card, or pass", affordable);
            let view = self.turn_view(player);
            let pick = self.player(player).decider().clone().buy_phase(&view, &choice);
            choice.validate_single(pick.as_ref())?;

            match pick {
                Some(card) => self.buy_card(player, &card)?,
                None => break,
            }
        }
        Ok(())
    }
}
