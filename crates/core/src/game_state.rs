// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game state snapshots.
//!
//! Strategies and observers never get a reference to the table, they get a copy
//! of the public state as seen from one seat, other players' hole cards are
//! covered until they are revealed at showdown.
use crate::{
    action::PlayerAction,
    poker::{Card, Chips, PlayerCards, Street},
};

/// A player public state.
#[derive(Debug, Clone)]
pub struct PlayerView {
    /// The player seat.
    pub seat: usize,
    /// This player name.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// The chips this player has put in the pot in this hand.
    pub bet: Chips,
    /// The last player action in this hand.
    pub action: Option<PlayerAction>,
    /// This player cards as seen by the viewer.
    pub cards: PlayerCards,
    /// The player has folded this hand.
    pub folded: bool,
    /// The player has the button.
    pub has_button: bool,
}

impl PlayerView {
    /// Checks if the player is in the hand.
    pub fn is_active(&self) -> bool {
        !self.folded && !matches!(self.cards, PlayerCards::None)
    }

    /// Checks if the player is in the hand and has no chips left.
    pub fn is_all_in(&self) -> bool {
        self.is_active() && self.chips == Chips::ZERO
    }
}

/// A copy of the table state as seen from a seat.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) viewer: Option<usize>,
    pub(crate) street: Street,
    pub(crate) players: Vec<PlayerView>,
    pub(crate) board: Vec<Card>,
    pub(crate) current_bet: Chips,
    pub(crate) small_blind: Chips,
    pub(crate) big_blind: Chips,
}

impl GameState {
    /// The seat of the player this state is for, [None] for a public view.
    pub fn viewer(&self) -> Option<usize> {
        self.viewer
    }

    /// The player this state is for.
    pub fn local_player(&self) -> Option<&PlayerView> {
        self.viewer.and_then(|seat| self.players.get(seat))
    }

    /// The current street.
    pub fn street(&self) -> Street {
        self.street
    }

    /// Returns a reference to the players in seat order.
    pub fn players(&self) -> &[PlayerView] {
        &self.players
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The current pot.
    pub fn pot(&self) -> Chips {
        self.players.iter().map(|p| p.bet).sum()
    }

    /// The highest amount a player has put in the pot in this hand.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The chips a player must add to call the current bet, clamped to the
    /// player stack.
    pub fn to_call(&self, seat: usize) -> Chips {
        self.players
            .get(seat)
            .map(|p| (self.current_bet - p.bet).min(p.chips))
            .unwrap_or_default()
    }

    /// The hand small blind.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The hand big blind.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The seat with the button.
    pub fn dealer(&self) -> Option<usize> {
        self.players.iter().position(|p| p.has_button)
    }
}
