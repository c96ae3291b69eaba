// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use rand::Rng;

use crate::{
    action::PlayerAction,
    poker::{Chips, PlayerCards},
};

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// This player name.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// The chips this player has put in the pot in this hand.
    pub bet: Chips,
    /// The last player action.
    pub action: Option<PlayerAction>,
    /// This player cards that are visible to all other players.
    pub public_cards: PlayerCards,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The player was dealt in this hand.
    pub in_hand: bool,
    /// The player has folded this hand.
    pub folded: bool,
    /// The player has the button.
    pub has_button: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: String, chips: Chips) -> Self {
        Self {
            name,
            chips,
            bet: Chips::ZERO,
            action: None,
            public_cards: PlayerCards::None,
            hole_cards: PlayerCards::None,
            in_hand: false,
            folded: false,
            has_button: false,
        }
    }

    /// Moves chips from the player stack to the pot, returns the chips moved.
    ///
    /// A player that doesn't have enough chips goes all in.
    pub fn bet(&mut self, chips: Chips) -> Chips {
        let chips = chips.min(self.chips);
        self.chips -= chips;
        self.bet += chips;
        chips
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
        self.action = Some(PlayerAction::Fold);
        self.public_cards = PlayerCards::None;
    }

    /// Checks if the player is in the hand.
    pub fn is_active(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// Checks if the player is in the hand and can still make decisions.
    pub fn can_act(&self) -> bool {
        self.is_active() && self.chips > Chips::ZERO
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.in_hand = self.chips > Chips::ZERO;
        self.has_button = false;
        self.bet = Chips::ZERO;
        self.action = None;
        self.folded = false;
        self.public_cards = PlayerCards::None;
        self.hole_cards = PlayerCards::None;
    }
}

/// The table players state.
///
/// Players keep their seat for the whole game, the button moves from seat to
/// seat skipping players who run out of chips.
#[derive(Debug, Default)]
pub struct PlayersState {
    players: Vec<Player>,
    dealer: Option<usize>,
}

impl PlayersState {
    /// Creates the players state with the players in seat order.
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            dealer: None,
        }
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of players in the hand.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Returns the number of players in the hand who can still act.
    pub fn count_can_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Returns the number of player who have chips.
    pub fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.chips > Chips::ZERO)
            .count()
    }

    /// The seat with the button.
    pub fn dealer(&self) -> Option<usize> {
        self.dealer
    }

    /// Returns a player by seat.
    pub fn get(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    /// Returns a mutable player by seat.
    pub fn get_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Finds the first seat after `seat`, going clockwise, for which `f` is true.
    ///
    /// The search wraps around and ends with `seat` itself.
    pub fn next_seat<F>(&self, seat: usize, f: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (seat + offset) % n)
            .find(|&idx| f(&self.players[idx]))
    }

    /// Seats in clockwise order starting left of the dealer.
    pub fn seats_from_dealer(&self) -> impl Iterator<Item = usize> + use<> {
        let n = self.players.len();
        let start = self.dealer.map(|d| d + 1).unwrap_or_default();
        (0..n).map(move |offset| (start + offset) % n)
    }

    /// Set state for a new hand and move the button.
    ///
    /// The first button goes to a random player with chips, then it moves
    /// clockwise to the next player with chips.
    pub fn start_hand<R: Rng>(&mut self, rng: &mut R) {
        for player in &mut self.players {
            player.start_hand();
        }

        let has_chips = |p: &Player| p.chips > Chips::ZERO;
        self.dealer = match self.dealer {
            Some(dealer) => self.next_seat(dealer, has_chips),
            None => {
                let with_chips = (0..self.players.len())
                    .filter(|&idx| has_chips(&self.players[idx]))
                    .collect::<Vec<_>>();
                (!with_chips.is_empty()).then(|| with_chips[rng.random_range(0..with_chips.len())])
            }
        };

        if let Some(dealer) = self.dealer {
            self.players[dealer].has_button = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn players(chips: &[u32]) -> PlayersState {
        let players = chips
            .iter()
            .enumerate()
            .map(|(idx, c)| Player::new(format!("P{idx}"), Chips::new(*c)))
            .collect();
        PlayersState::new(players)
    }

    #[test]
    fn bet_clamps_to_stack() {
        let mut p = Player::new("Alice".to_string(), Chips::new(50));
        assert_eq!(p.bet(Chips::new(20)), Chips::new(20));
        assert_eq!(p.chips, Chips::new(30));
        assert_eq!(p.bet(Chips::new(100)), Chips::new(30));
        assert_eq!(p.chips, Chips::ZERO);
        assert_eq!(p.bet, Chips::new(50));
    }

    #[test]
    fn button_skips_players_without_chips() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = players(&[100, 0, 100, 100]);

        state.start_hand(&mut rng);
        let first = state.dealer().unwrap();
        assert_ne!(first, 1);
        assert!(state.get(first).has_button);
        assert_eq!(state.iter().filter(|p| p.has_button).count(), 1);

        let mut seen = vec![first];
        for _ in 0..5 {
            state.start_hand(&mut rng);
            seen.push(state.dealer().unwrap());
        }

        assert!(!seen.contains(&1));
        for w in seen.windows(2) {
            assert_eq!(state.next_seat(w[0], |p| p.chips > Chips::ZERO), Some(w[1]));
        }
    }

    #[test]
    fn seats_from_dealer_wraps() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = players(&[100, 100, 100]);
        state.start_hand(&mut rng);

        let dealer = state.dealer().unwrap();
        let seats = state.seats_from_dealer().collect::<Vec<_>>();
        assert_eq!(seats.len(), 3);
        assert_eq!(seats[0], (dealer + 1) % 3);
        assert_eq!(seats[2], dealer);
    }
}
