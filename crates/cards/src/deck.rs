// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards deck.
use rand::prelude::*;
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// Deck errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// All the cards have been dealt since the last shuffle.
    #[error("deck exhausted, all {} cards have been dealt", Deck::SIZE)]
    Exhausted,
}

/// A cards Deck.
///
/// The deck owns a permutation of the 52 cards and a cursor to the next card
/// to deal, a card is never dealt twice until the deck is shuffled again.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles all cards back into the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.get(self.next).copied().ok_or(DeckError::Exhausted)?;
        self.next += 1;
        Ok(card)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.next == self.cards.len()
    }

    /// Number of cards left in the deck.
    pub fn count(&self) -> usize {
        self.cards.len() - self.next
    }

    /// The cards that can still be dealt.
    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.next..]
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }
}
