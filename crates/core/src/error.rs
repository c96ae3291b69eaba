// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
//!
//! These errors are contract violations between the engine and its callers, a
//! game that hits one of them cannot continue. Running out of chips is not an
//! error, bets are clamped to the player stack.
use thiserror::Error;

use crate::poker::{CardError, DeckError};

/// Game errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// A card built from invalid raw values.
    #[error(transparent)]
    Card(#[from] CardError),
    /// More cards dealt than the deck holds.
    #[error(transparent)]
    Deck(#[from] DeckError),
    /// A raw action code that doesn't map to an action.
    #[error("invalid action code {0}")]
    InvalidAction(u8),
    /// An action was applied when no player is expected to act.
    #[error("no player is expected to act")]
    NoPendingAction,
    /// Too few players to start a game.
    #[error("a game needs at least 2 players, got {0}")]
    NotEnoughPlayers(usize),
    /// More players than the table seats.
    #[error("a table seats at most {max} players, got {0}", max = crate::table::MAX_PLAYERS)]
    TooManyPlayers(usize),
    /// Invalid configuration values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
