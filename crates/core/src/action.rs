// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{error::GameError, poker::Chips};

/// A Player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Check if there is nothing to call otherwise call the current bet.
    CheckOrCall,
    /// Bet or raise by the action amount over the current bet.
    Bet,
    /// Player folds.
    Fold,
    /// Player quits the game.
    Quit,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::CheckOrCall => "CALL",
            PlayerAction::Bet => "BET",
            PlayerAction::Fold => "FOLD",
            PlayerAction::Quit => "QUIT",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decodes an action from the byte code used by byte oriented inputs.
impl TryFrom<u8> for PlayerAction {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PlayerAction::CheckOrCall),
            1 => Ok(PlayerAction::Bet),
            2 => Ok(PlayerAction::Fold),
            3 => Ok(PlayerAction::Quit),
            _ => Err(GameError::InvalidAction(code)),
        }
    }
}

/// An action after it has been applied to the table.
///
/// The action may differ from the requested one, a bet that doesn't cover
/// more than the call amount becomes a call, and the chips are the chips that
/// actually moved to the pot after clamping to the player stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedAction {
    /// The seat of the player who acted.
    pub seat: usize,
    /// The action that was applied.
    pub action: PlayerAction,
    /// The chips moved to the pot.
    pub chips: Chips,
    /// The player has no chips left after this action.
    pub all_in: bool,
}
