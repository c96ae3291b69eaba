// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game orchestration.
//!
//! A [Game] owns the table and runs hands until one player is left with chips,
//! a player quits or the observer stops the game. Decisions come from one
//! [Strategy] per seat and every state change is reported to an [Observer].
use log::info;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    action::{AppliedAction, PlayerAction},
    error::GameError,
    game_state::GameState,
    poker::{Chips, Street},
    table::{MAX_PLAYERS, Outcome, Player, RoundState, Table},
};

/// Game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of players at the table.
    pub players: usize,
    /// The chips each player starts with.
    pub starting_chips: Chips,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 4,
            starting_chips: Chips::new(1_000),
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
        }
    }
}

impl Config {
    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players < 2 {
            return Err(GameError::NotEnoughPlayers(self.players));
        }

        if self.players > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(self.players));
        }

        if self.small_blind == Chips::ZERO {
            return Err(GameError::InvalidConfig("small blind must be positive".to_string()));
        }

        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(format!(
                "big blind {} is less than the small blind {}",
                self.big_blind, self.small_blind
            )));
        }

        if self.starting_chips < self.big_blind {
            return Err(GameError::InvalidConfig(format!(
                "starting chips {} don't cover the big blind {}",
                self.starting_chips, self.big_blind
            )));
        }

        let total = u32::try_from(self.players)
            .ok()
            .and_then(|players| self.starting_chips.amount().checked_mul(players));
        if total.is_none() {
            return Err(GameError::InvalidConfig(format!(
                "{} players with {} chips each overflow the chips total",
                self.players, self.starting_chips
            )));
        }

        Ok(())
    }
}

/// A player decision function.
pub trait Strategy {
    /// Returns the action for the player at `state.viewer()` and the bet
    /// amount over the current bet for a [PlayerAction::Bet].
    fn decide(&mut self, state: &GameState) -> (PlayerAction, Chips);
}

/// Receives game notifications.
///
/// All methods have a default implementation that ignores the notification.
pub trait Observer {
    /// A player has acted, the action chips are clamped to the player stack.
    fn player_action(&mut self, _state: &GameState, _action: &AppliedAction) {}

    /// A new street starts.
    ///
    /// Called once for [Street::Preflop] after the hole cards are dealt, then
    /// after the board cards for each of the flop, turn and river are dealt.
    /// Streets are skipped once a single player is left in the hand.
    fn street_change(&mut self, _state: &GameState) {}

    /// A hand has been settled, returns false to stop the game.
    fn round_end(&mut self, _state: &GameState, _outcome: &Outcome) -> bool {
        true
    }

    /// The game is over.
    fn game_end(&mut self, _state: &GameState, _over: &GameOver) {}
}

/// A player seat.
pub struct Seat {
    name: String,
    human: bool,
    strategy: Box<dyn Strategy>,
}

impl Seat {
    /// A seat driven by a person.
    pub fn human(name: impl Into<String>, strategy: impl Strategy + 'static) -> Self {
        Self {
            name: name.into(),
            human: true,
            strategy: Box::new(strategy),
        }
    }

    /// A seat driven by the computer.
    pub fn bot(name: impl Into<String>, strategy: impl Strategy + 'static) -> Self {
        Self {
            name: name.into(),
            human: false,
            strategy: Box::new(strategy),
        }
    }

    /// The seat player name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks if this seat is driven by a person.
    pub fn is_human(&self) -> bool {
        self.human
    }
}

/// The result of playing a hand.
#[derive(Debug, Clone)]
pub enum HandResult {
    /// The hand was played to the end.
    Settled(Outcome),
    /// The player at the given seat quit.
    Aborted(usize),
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// A single player has chips left.
    LastPlayerStanding,
    /// The player at the given seat quit.
    Quit(usize),
    /// The observer stopped the game.
    Stopped,
}

/// The result of a game.
#[derive(Debug, Clone)]
pub struct GameOver {
    /// Why the game ended.
    pub end: GameEnd,
    /// The winner seat.
    pub winner: Option<usize>,
    /// The winner name.
    pub winner_name: String,
    /// Number of hands played.
    pub hands: u32,
}

/// A Texas Hold'em game.
pub struct Game<O> {
    table: Table,
    seats: Vec<Seat>,
    observer: O,
    rng: StdRng,
    viewer: Option<usize>,
    hands: u32,
}

impl<O: Observer> Game<O> {
    /// Creates a game with a random seed.
    pub fn new(config: &Config, seats: Vec<Seat>, observer: O) -> Result<Self, GameError> {
        Self::with_rng(config, seats, observer, StdRng::from_os_rng())
    }

    /// Creates a game that takes dealer and shuffles from the given generator.
    pub fn with_rng(
        config: &Config,
        seats: Vec<Seat>,
        observer: O,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        config.validate()?;

        if seats.len() != config.players {
            return Err(GameError::InvalidConfig(format!(
                "{} players configured, got {} seats",
                config.players,
                seats.len()
            )));
        }

        let players = seats
            .iter()
            .map(|s| Player::new(s.name.clone(), config.starting_chips))
            .collect();
        let table = Table::new(players, config.small_blind, config.big_blind)?;
        let viewer = seats.iter().position(Seat::is_human);

        Ok(Self {
            table,
            seats,
            observer,
            rng,
            viewer,
            hands: 0,
        })
    }

    /// The game table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The game observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Number of hands played.
    pub fn hands(&self) -> u32 {
        self.hands
    }

    /// Plays hands until the game is over.
    pub fn run(&mut self) -> Result<GameOver, GameError> {
        let (end, winner) = loop {
            if self.table.players().count_with_chips() < 2 {
                let winner = self.chip_leader(|_| true);
                break (GameEnd::LastPlayerStanding, winner);
            }

            match self.play_hand()? {
                HandResult::Aborted(seat) => {
                    let winner = self
                        .chip_leader(|s| s != seat && !self.seats[s].human)
                        .or_else(|| self.chip_leader(|s| s != seat));
                    break (GameEnd::Quit(seat), winner);
                }
                HandResult::Settled(outcome) => {
                    let state = self.table.snapshot(self.viewer);
                    if !self.observer.round_end(&state, &outcome) {
                        let winner = self.chip_leader(|_| true);
                        break (GameEnd::Stopped, winner);
                    }
                }
            }
        };

        let over = GameOver {
            end,
            winner,
            winner_name: winner
                .map(|seat| self.seats[seat].name.clone())
                .unwrap_or_default(),
            hands: self.hands,
        };

        info!(
            "Game over after {} hands ({:?}), winner {}",
            over.hands, over.end, over.winner_name
        );

        let state = self.table.snapshot(self.viewer);
        self.observer.game_end(&state, &over);

        Ok(over)
    }

    /// Plays a single hand.
    ///
    /// A hand in which a player quits is not settled, the chips in the pot
    /// are left on the table.
    pub fn play_hand(&mut self) -> Result<HandResult, GameError> {
        self.table.start_hand(&mut self.rng);
        self.hands += 1;

        let blinds = self.table.post_blinds()?;
        info!(
            "Hand {} dealer {:?} blinds {}/{}",
            self.hands,
            self.table.players().dealer(),
            blinds.small.1,
            blinds.big.1
        );

        self.table.deal_hole_cards()?;

        for street in Street::ALL {
            if self.table.count_active() < 2 {
                break;
            }

            if street != Street::Preflop {
                self.table.deal_street(street)?;
            }

            self.observer
                .street_change(&self.table.snapshot(self.viewer));

            self.table.start_betting();
            while let RoundState::AwaitingAction(seat) = self.table.round_state() {
                let state = self.table.snapshot(Some(seat));
                let (action, amount) = self.seats[seat].strategy.decide(&state);
                let applied = self.table.act(action, amount)?;

                self.observer
                    .player_action(&self.table.snapshot(self.viewer), &applied);

                if self.table.round_state() == RoundState::GameAborted {
                    info!("{} quit", self.seats[seat].name);
                    return Ok(HandResult::Aborted(seat));
                }
            }
        }

        Ok(HandResult::Settled(self.table.determine_outcome()))
    }

    /// The seat with most chips among the seats accepted by `f`, ties go to
    /// the lower seat.
    fn chip_leader<F>(&self, f: F) -> Option<usize>
    where
        F: Fn(usize) -> bool,
    {
        self.table
            .players()
            .iter()
            .enumerate()
            .filter(|(seat, _)| f(*seat))
            .fold(None::<(usize, Chips)>, |best, (seat, p)| match best {
                Some((_, chips)) if chips >= p.chips => best,
                _ => Some((seat, p.chips)),
            })
            .map(|(seat, _)| seat)
    }
}
