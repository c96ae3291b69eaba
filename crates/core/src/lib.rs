// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shortstack Hold'em betting, settlement and game orchestration.
//!
//! The [Game] type runs a Texas Hold'em game between up to six seats, each seat
//! decides through a [Strategy] and all state changes are reported to an
//! [Observer]:
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use shortstack_core::{Chips, Config, Game, GameState, Observer, PlayerAction, Seat, Strategy};
//!
//! struct Calls;
//!
//! impl Strategy for Calls {
//!     fn decide(&mut self, _state: &GameState) -> (PlayerAction, Chips) {
//!         (PlayerAction::CheckOrCall, Chips::ZERO)
//!     }
//! }
//!
//! struct StopAfterOneHand;
//!
//! impl Observer for StopAfterOneHand {
//!     fn round_end(&mut self, _: &GameState, _: &shortstack_core::Outcome) -> bool {
//!         false
//!     }
//! }
//!
//! let config = Config { players: 2, ..Config::default() };
//! let seats = vec![Seat::bot("Alice", Calls), Seat::bot("Bob", Calls)];
//! let rng = StdRng::seed_from_u64(1);
//! let mut game = Game::with_rng(&config, seats, StopAfterOneHand, rng).unwrap();
//! let over = game.run().unwrap();
//! assert_eq!(over.hands, 1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
pub mod error;
pub mod game;
pub mod game_state;
pub mod poker;
pub mod pot;
pub mod table;

pub use action::{AppliedAction, PlayerAction};
pub use error::GameError;
pub use game::{Config, Game, GameEnd, GameOver, HandResult, Observer, Seat, Strategy};
pub use game_state::{GameState, PlayerView};
pub use poker::{
    Card, CardError, Chips, Deck, DeckError, PlayerCards, Rank, RankedHand, Ranking, Street, Suit,
    rank,
};
pub use pot::PotTracker;
pub use table::{MAX_PLAYERS, Outcome, Payoff, RoundState, Table};
