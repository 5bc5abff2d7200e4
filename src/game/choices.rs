//! Decision plumbing between the engine and deciders.
//!
//! Every ask builds the valid options, hands them to the acting
//! player's decider, and validates the answer before anything is
//! applied. This is the trusted-but-verify half of the decider
//! contract.

use std::rc::Rc;

use crate::cards::CardHandle;
use crate::decider::{BinaryChoice, CardChoice, Decider, TurnView};
use crate::error::Result;
use crate::player::PlayerId;

use super::Game;

impl Game {
    /// A read-only snapshot of `player`'s turn for decider calls.
    #[must_use]
    pub fn turn_view(&self, player: PlayerId) -> TurnView {
        let p = self.player(player);
        TurnView {
            player,
            actions: p.state.actions,
            buys: p.state.buys,
            coins: p.state.coins,
            potions: p.state.potions,
            hand: p.hand().cards().to_vec(),
        }
    }

    fn decider_for(&self, player: PlayerId) -> Rc<dyn Decider> {
        Rc::clone(self.player(player).decider())
    }

    /// Ask a yes/no question.
    #[must_use]
    pub fn ask_binary(&self, player: PlayerId, choice: &BinaryChoice) -> bool {
        let view = self.turn_view(player);
        self.decider_for(player).binary(&view, choice)
    }

    /// Ask for a discard selection; the answer is validated against the
    /// choice before being returned.
    pub fn ask_discard(&self, player: PlayerId, choice: &CardChoice) -> Result<Vec<CardHandle>> {
        let view = self.turn_view(player);
        let picks = self.decider_for(player).discard(&view, choice);
        choice.validate(&picks)?;
        Ok(picks)
    }

    /// Ask for a trash selection (validated).
    pub fn ask_trash(&self, player: PlayerId, choice: &CardChoice) -> Result<Vec<CardHandle>> {
        let view = self.turn_view(player);
        let picks = self.decider_for(player).trash(&view, choice);
        choice.validate(&picks)?;
        Ok(picks)
    }

    /// Ask for a gain pick (validated).
    pub fn ask_gain(&self, player: PlayerId, choice: &CardChoice) -> Result<Option<CardHandle>> {
        let view = self.turn_view(player);
        let pick = self.decider_for(player).gain(&view, choice);
        choice.validate_single(pick.as_ref())?;
        Ok(pick)
    }

    /// Ask for a topdeck selection (validated).
    pub fn ask_topdeck(&self, player: PlayerId, choice: &CardChoice) -> Result<Vec<CardHandle>> {
        let view = self.turn_view(player);
        let picks = self.decider_for(player).topdeck(&view, choice);
        choice.validate(&picks)?;
        Ok(picks)
    }

    /// Ask which card to play again (validated).
    pub fn ask_multi_play(
        &self,
        player: PlayerId,
        choice: &CardChoice,
    ) -> Result<Option<CardHandle>> {
        let view = self.turn_view(player);
        let pick = self.decider_for(player).multi_play(&view, choice);
        choice.validate_single(pick.as_ref())?;
        Ok(pick)
    }
}
