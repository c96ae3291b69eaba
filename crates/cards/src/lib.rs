// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shortstack Hold'em cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use shortstack_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td = "TD".parse::<Card>().unwrap();
//! assert!(ah.rank() > td.rank());
//! ```
//!
//! and a [Deck] type that deals cards sequentially until it is shuffled again:
//!
//! ```
//! # use shortstack_cards::Deck;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut deck = Deck::new_and_shuffled(&mut rng);
//! for _ in 0..Deck::SIZE {
//!     deck.deal().unwrap();
//! }
//! assert!(deck.deal().is_err());
//!
//! deck.shuffle(&mut rng);
//! assert_eq!(deck.count(), Deck::SIZE);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod card;
mod deck;

pub use card::{Card, CardError, Rank, Suit};
pub use deck::{Deck, DeckError};
