// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shortstack Hold'em hand ranking engine.
//!
//! Ranks hands of 2 to 7 cards, the hole cards plus any of the board cards dealt
//! so far, into one of the ten poker hand categories with a sub-ranking that
//! breaks ties between hands of the same category.
//!
//! To use the engine rank a player hole cards against the board and compare
//! the resulting [RankedHand] values:
//!
//! ```
//! # use shortstack_eval::*;
//! let cards = |s: &str| s.split(' ').map(|c| c.parse::<Card>().unwrap()).collect::<Vec<_>>();
//! let board = cards("2D 7C 9S KH 3C");
//! let h1 = rank([cards("KD")[0], cards("4S")[0]], &board);
//! let h2 = rank([cards("9D")[0], cards("9C")[0]], &board);
//! assert_eq!(h1.ranking(), Ranking::Pair);
//! assert_eq!(h2.ranking(), Ranking::ThreeOfAKind);
//! assert!(h2 > h1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod eval;
mod hand;

pub use eval::rank;
pub use hand::{RankedHand, Ranking};

// Reexport cards types.
pub use shortstack_cards::{Card, Deck, Rank, Suit};
