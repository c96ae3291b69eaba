// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shortstack computer players.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub use shortstack_core as core;

use shortstack_core::{Card, Chips, GameState, PlayerAction, Ranking, Strategy, rank};

/// Names for computer players.
pub static NICKNAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

/// A player that checks or calls every bet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl Strategy for CallingStation {
    fn decide(&mut self, _state: &GameState) -> (PlayerAction, Chips) {
        (PlayerAction::CheckOrCall, Chips::ZERO)
    }
}

/// A player that compares its hand strength with a random threshold.
///
/// Strong hands bet, average hands call and weak hands fold when facing a bet,
/// the random threshold makes the player less predictable.
#[derive(Debug)]
pub struct NaiveStrategy {
    rng: StdRng,
}

impl NaiveStrategy {
    /// Creates a strategy that takes its randomness from `rng`.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Creates a strategy with a random seed.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl Strategy for NaiveStrategy {
    fn decide(&mut self, state: &GameState) -> (PlayerAction, Chips) {
        let Some(player) = state.local_player() else {
            return (PlayerAction::CheckOrCall, Chips::ZERO);
        };

        let Some(hole) = player.cards.cards() else {
            return (PlayerAction::CheckOrCall, Chips::ZERO);
        };

        let strength = hand_strength(hole, state.board());
        let threshold = self.rng.random::<f64>();
        let to_call = state.to_call(player.seat);

        let decision = if strength > threshold + 0.25 {
            // Bet from one to four big blinds depending on strength.
            let blinds = 1 + (strength * 3.0) as u32;
            (PlayerAction::Bet, state.big_blind() * blinds)
        } else if to_call == Chips::ZERO || strength + 0.25 > threshold {
            (PlayerAction::CheckOrCall, Chips::ZERO)
        } else {
            (PlayerAction::Fold, Chips::ZERO)
        };

        debug!(
            "{} strength {strength:.2} threshold {threshold:.2} {} {}",
            player.name, decision.0, decision.1
        );

        decision
    }
}

/// Estimates the strength of a hand between 0 and 1.
///
/// Before the flop only the two hole cards count: pairs rate above any
/// unpaired hand and high cards rate above low cards. After the flop the hand
/// category decides.
pub fn hand_strength(hole: [Card; 2], board: &[Card]) -> f64 {
    let hand = rank(hole, board);

    if board.is_empty() {
        let [c1, c2] = hole;
        let (hi, lo) = if c1.value() >= c2.value() {
            (c1.value(), c2.value())
        } else {
            (c2.value(), c1.value())
        };

        if hand.ranking() == Ranking::Pair {
            0.5 + f64::from(hi) / 28.0
        } else {
            let suited = if c1.suit() == c2.suit() { 0.05 } else { 0.0 };
            0.45 * f64::from(hi + lo) / 27.0 + suited
        }
    } else {
        f64::from(hand.ranking() as u8) / f64::from(Ranking::RoyalFlush as u8)
    }
}
