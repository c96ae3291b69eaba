// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table hand state machine.
//!
//! A [Table] runs one hand at a time: blinds, dealing, the betting on each
//! street and the pot settlement. Each betting round is a small state machine,
//! the table waits for an action from one seat at a time until every player
//! who can still act has matched the bet, folded or gone all-in.
use log::debug;
use rand::Rng;

use crate::{
    action::{AppliedAction, PlayerAction},
    error::GameError,
    game_state::{GameState, PlayerView},
    poker::{Card, Chips, Deck, PlayerCards, Street},
};

mod player;
mod settle;

pub use player::{Player, PlayersState};
pub use settle::{Outcome, Payoff};

/// The maximum number of players at a table.
pub const MAX_PLAYERS: usize = 6;

/// The betting round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for the player at the given seat to act.
    AwaitingAction(usize),
    /// No more actions are possible in this round.
    RoundComplete,
    /// A player quit the game.
    GameAborted,
}

/// The blinds posted at the start of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blinds {
    /// Small blind seat and chips.
    pub small: (usize, Chips),
    /// Big blind seat and chips.
    pub big: (usize, Chips),
}

/// The table state for a hand.
#[derive(Debug)]
pub struct Table {
    players: PlayersState,
    deck: Deck,
    board: Vec<Card>,
    street: Street,
    small_blind: Chips,
    big_blind: Chips,
    big_blind_seat: Option<usize>,
    current_bet: Chips,
    round: RoundState,
    to_act: usize,
}

impl Table {
    /// Creates a table with the players in seat order.
    pub fn new(players: Vec<Player>, small_blind: Chips, big_blind: Chips) -> Result<Self, GameError> {
        match players.len() {
            n if n < 2 => return Err(GameError::NotEnoughPlayers(n)),
            n if n > MAX_PLAYERS => return Err(GameError::TooManyPlayers(n)),
            _ => {}
        }

        Ok(Self {
            players: PlayersState::new(players),
            deck: Deck::default(),
            board: Vec::with_capacity(5),
            street: Street::Preflop,
            small_blind,
            big_blind,
            big_blind_seat: None,
            current_bet: Chips::ZERO,
            round: RoundState::RoundComplete,
            to_act: 0,
        })
    }

    /// The table players.
    pub fn players(&self) -> &PlayersState {
        &self.players
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The current street.
    pub fn street(&self) -> Street {
        self.street
    }

    /// The highest amount a player has put in the pot in this hand.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.players.iter().map(|p| p.bet).sum()
    }

    /// The betting round state.
    pub fn round_state(&self) -> RoundState {
        self.round
    }

    /// Number of players still in the hand.
    pub fn count_active(&self) -> usize {
        self.players.count_active()
    }

    /// Set the table for a new hand, the button moves and the deck is shuffled.
    pub fn start_hand<R: Rng>(&mut self, rng: &mut R) {
        self.players.start_hand(rng);
        self.deck.shuffle(rng);
        self.board.clear();
        self.street = Street::Preflop;
        self.big_blind_seat = None;
        self.current_bet = Chips::ZERO;
        self.round = RoundState::RoundComplete;
        self.to_act = 0;
    }

    /// Collects the blinds from the two players after the button.
    ///
    /// A player who can't cover a blind goes all in.
    pub fn post_blinds(&mut self) -> Result<Blinds, GameError> {
        let in_hand = |p: &Player| p.in_hand;
        let sb = self
            .players
            .dealer()
            .and_then(|dealer| self.players.next_seat(dealer, in_hand));
        let bb = sb.and_then(|sb| self.players.next_seat(sb, in_hand));

        let (Some(sb), Some(bb)) = (sb, bb) else {
            return Err(GameError::NotEnoughPlayers(self.players.count_with_chips()));
        };

        if sb == bb {
            return Err(GameError::NotEnoughPlayers(1));
        }

        let sb_chips = self.players.get_mut(sb).bet(self.small_blind);
        let bb_chips = self.players.get_mut(bb).bet(self.big_blind);

        self.big_blind_seat = Some(bb);
        self.current_bet = sb_chips.max(bb_chips);

        debug!(
            "Blinds {} {sb_chips}, {} {bb_chips}",
            self.players.get(sb).name,
            self.players.get(bb).name
        );

        Ok(Blinds {
            small: (sb, sb_chips),
            big: (bb, bb_chips),
        })
    }

    /// Deals two cards to each player in the hand, one card per pass starting
    /// from the left of the button.
    pub fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let seats = self
            .players
            .seats_from_dealer()
            .filter(|&seat| self.players.get(seat).in_hand)
            .collect::<Vec<_>>();

        let mut first = Vec::with_capacity(seats.len());
        for _ in &seats {
            first.push(self.deck.deal()?);
        }

        for (seat, c1) in seats.into_iter().zip(first) {
            let c2 = self.deck.deal()?;
            let player = self.players.get_mut(seat);
            player.hole_cards = PlayerCards::Cards(c1, c2);
            player.public_cards = PlayerCards::Covered;
        }

        Ok(())
    }

    /// Moves to the given street and deals its board cards.
    pub fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        for _ in 0..street.board_cards() {
            self.board.push(self.deck.deal()?);
        }

        assert!(self.board.len() <= 5, "board has {} cards", self.board.len());
        self.street = street;

        debug!("{street} {:?}", self.board);
        Ok(())
    }

    /// Starts the betting round for the current street.
    ///
    /// Preflop the first player to act is the one after the big blind, on later
    /// streets it is the first player after the button. If no decision is
    /// possible, because all players but one are all-in, the round is complete
    /// straight away.
    pub fn start_betting(&mut self) {
        let from = match self.street {
            Street::Preflop => self.big_blind_seat,
            _ => self.players.dealer(),
        };

        self.to_act = self.players.count_can_act();
        self.round = match from {
            Some(from) if !self.is_betting_closed() => self
                .players
                .next_seat(from, Player::can_act)
                .map(RoundState::AwaitingAction)
                .unwrap_or(RoundState::RoundComplete),
            _ => RoundState::RoundComplete,
        };
    }

    /// Applies an action from the player who is expected to act.
    ///
    /// Call and bet amounts are clamped to the player stack, a bet that after
    /// clamping doesn't raise the current bet becomes a call. A bet restarts
    /// the action, all other players who can act must act again.
    pub fn act(&mut self, action: PlayerAction, amount: Chips) -> Result<AppliedAction, GameError> {
        let RoundState::AwaitingAction(seat) = self.round else {
            return Err(GameError::NoPendingAction);
        };

        let player = self.players.get_mut(seat);
        let owed = self.current_bet - player.bet;

        let (action, chips) = match action {
            PlayerAction::Quit => {
                self.round = RoundState::GameAborted;
                return Ok(AppliedAction {
                    seat,
                    action,
                    chips: Chips::ZERO,
                    all_in: false,
                });
            }
            PlayerAction::Fold => {
                player.fold();
                (PlayerAction::Fold, Chips::ZERO)
            }
            PlayerAction::CheckOrCall => (PlayerAction::CheckOrCall, player.bet(owed)),
            PlayerAction::Bet => {
                let total = (owed + amount.min(player.chips)).min(player.chips);
                if total > owed {
                    (PlayerAction::Bet, player.bet(total))
                } else {
                    (PlayerAction::CheckOrCall, player.bet(owed))
                }
            }
        };

        player.action = Some(action);
        let all_in = player.is_active() && player.chips == Chips::ZERO;
        let name = player.name.clone();
        let bet = player.bet;

        if action == PlayerAction::Bet {
            self.current_bet = bet;
            self.to_act = self
                .players
                .iter()
                .enumerate()
                .filter(|(idx, p)| *idx != seat && p.can_act())
                .count();
        } else {
            self.to_act = self.to_act.saturating_sub(1);
        }

        debug!("{name} {action} {chips} (all in: {all_in}, to act: {})", self.to_act);

        self.round = if self.is_betting_closed() {
            RoundState::RoundComplete
        } else {
            self.players
                .next_seat(seat, Player::can_act)
                .map(RoundState::AwaitingAction)
                .unwrap_or(RoundState::RoundComplete)
        };

        Ok(AppliedAction {
            seat,
            action,
            chips,
            all_in,
        })
    }

    /// Checks if no more decisions are needed in this round.
    fn is_betting_closed(&self) -> bool {
        if self.players.count_active() < 2 || self.to_act == 0 {
            return true;
        }

        let mut can_act = self.players.iter().filter(|p| p.can_act());
        match (can_act.next(), can_act.next()) {
            (None, _) => true,
            // A single player with chips left has nothing to decide unless
            // there is a bet to call.
            (Some(p), None) => p.bet >= self.current_bet,
            _ => false,
        }
    }

    /// Returns a copy of the table state as seen from the `viewer` seat.
    ///
    /// The viewer sees its own hole cards, the other players cards are visible
    /// only once revealed.
    pub fn snapshot(&self, viewer: Option<usize>) -> GameState {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerView {
                seat,
                name: p.name.clone(),
                chips: p.chips,
                bet: p.bet,
                action: p.action,
                cards: if viewer == Some(seat) && p.in_hand {
                    p.hole_cards
                } else {
                    p.public_cards
                },
                folded: p.folded,
                has_button: p.has_button,
            })
            .collect();

        GameState {
            viewer,
            street: self.street,
            players,
            board: self.board.clone(),
            current_bet: self.current_bet,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn new_table(chips: &[u32]) -> Table {
        let players = chips
            .iter()
            .enumerate()
            .map(|(idx, c)| Player::new(format!("P{idx}"), Chips::new(*c)))
            .collect();
        Table::new(players, Chips::new(10), Chips::new(20)).unwrap()
    }

    /// Starts a hand with the button on seat 0.
    fn start_hand(table: &mut Table) {
        let mut rng = StdRng::seed_from_u64(17);
        let n = table.players.count();
        loop {
            table.start_hand(&mut rng);
            if table.players.dealer() == Some(n - 1) {
                break;
            }
        }

        // Next hand moves the button to seat 0.
        table.start_hand(&mut rng);
        assert_eq!(table.players.dealer(), Some(0));
        table.post_blinds().unwrap();
        table.deal_hole_cards().unwrap();
        table.start_betting();
    }

    fn act(table: &mut Table, seat: usize, action: PlayerAction, amount: u32) -> AppliedAction {
        assert_eq!(table.round_state(), RoundState::AwaitingAction(seat));
        table.act(action, Chips::new(amount)).unwrap()
    }

    #[test]
    fn table_size() {
        let players = |n| (0..n).map(|i| Player::new(format!("P{i}"), Chips::new(100))).collect();
        assert!(matches!(
            Table::new(players(1), Chips::new(1), Chips::new(2)),
            Err(GameError::NotEnoughPlayers(1))
        ));
        assert!(matches!(
            Table::new(players(7), Chips::new(1), Chips::new(2)),
            Err(GameError::TooManyPlayers(7))
        ));
        assert!(Table::new(players(6), Chips::new(1), Chips::new(2)).is_ok());
    }

    #[test]
    fn blinds_and_deal() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        assert_eq!(table.players.get(1).bet, Chips::new(10));
        assert_eq!(table.players.get(2).bet, Chips::new(20));
        assert_eq!(table.current_bet(), Chips::new(20));
        assert_eq!(table.pot(), Chips::new(30));

        // Preflop action starts after the big blind.
        assert_eq!(table.round_state(), RoundState::AwaitingAction(0));

        let mut dealt = table
            .players
            .iter()
            .flat_map(|p| p.hole_cards.cards().unwrap())
            .collect::<Vec<_>>();
        dealt.sort_by_key(|c| (c.rank(), c.suit().index()));
        dealt.dedup();
        assert_eq!(dealt.len(), 6);
        assert_eq!(table.deck.count(), Deck::SIZE - 6);
    }

    #[test]
    fn everybody_folds_to_big_blind() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::Fold, 0);
        act(&mut table, 1, PlayerAction::Fold, 0);
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.count_active(), 1);
    }

    #[test]
    fn big_blind_has_the_option() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::CheckOrCall, 0);
        act(&mut table, 1, PlayerAction::CheckOrCall, 0);

        // Everybody called, the big blind can still raise.
        let applied = act(&mut table, 2, PlayerAction::CheckOrCall, 0);
        assert_eq!(applied.chips, Chips::ZERO);
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.pot(), Chips::new(60));
    }

    #[test]
    fn raise_restarts_action() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::CheckOrCall, 0);
        act(&mut table, 1, PlayerAction::CheckOrCall, 0);

        let applied = act(&mut table, 2, PlayerAction::Bet, 40);
        assert_eq!(applied.action, PlayerAction::Bet);
        assert_eq!(applied.chips, Chips::new(40));
        assert_eq!(table.current_bet(), Chips::new(60));

        let applied = act(&mut table, 0, PlayerAction::CheckOrCall, 0);
        assert_eq!(applied.chips, Chips::new(40));
        act(&mut table, 1, PlayerAction::CheckOrCall, 0);
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.pot(), Chips::new(180));

        // Post flop the first player after the button acts first.
        table.deal_street(Street::Flop).unwrap();
        table.start_betting();
        assert_eq!(table.board().len(), 3);
        assert_eq!(table.round_state(), RoundState::AwaitingAction(1));
    }

    #[test]
    fn short_call_goes_all_in() {
        let mut table = new_table(&[1000, 1000, 50]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::Bet, 180);
        assert_eq!(table.current_bet(), Chips::new(200));

        act(&mut table, 1, PlayerAction::Fold, 0);

        // Seat 2 has 30 chips left after the big blind.
        let applied = act(&mut table, 2, PlayerAction::CheckOrCall, 0);
        assert_eq!(applied.action, PlayerAction::CheckOrCall);
        assert_eq!(applied.chips, Chips::new(30));
        assert!(applied.all_in);
        assert_eq!(table.round_state(), RoundState::RoundComplete);

        // No decisions are left on later streets.
        table.deal_street(Street::Flop).unwrap();
        table.start_betting();
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.count_active(), 2);
    }

    #[test]
    fn bet_over_stack_is_clamped() {
        let mut table = new_table(&[100, 1000, 1000]);
        start_hand(&mut table);

        let applied = act(&mut table, 0, PlayerAction::Bet, 5000);
        assert_eq!(applied.action, PlayerAction::Bet);
        assert_eq!(applied.chips, Chips::new(100));
        assert!(applied.all_in);
        assert_eq!(table.current_bet(), Chips::new(100));

        act(&mut table, 1, PlayerAction::CheckOrCall, 0);
        act(&mut table, 2, PlayerAction::CheckOrCall, 0);
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.pot(), Chips::new(300));
    }

    #[test]
    fn short_bet_becomes_call() {
        let mut table = new_table(&[1000, 1000, 50]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::Bet, 80);
        act(&mut table, 1, PlayerAction::Fold, 0);

        // Seat 2 can't cover the call, the raise is a short call instead.
        let applied = act(&mut table, 2, PlayerAction::Bet, 500);
        assert_eq!(applied.action, PlayerAction::CheckOrCall);
        assert_eq!(applied.chips, Chips::new(30));
        assert_eq!(table.current_bet(), Chips::new(100));
        assert_eq!(table.round_state(), RoundState::RoundComplete);
    }

    #[test]
    fn zero_bet_is_a_call() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        let applied = act(&mut table, 0, PlayerAction::Bet, 0);
        assert_eq!(applied.action, PlayerAction::CheckOrCall);
        assert_eq!(applied.chips, Chips::new(20));
        assert_eq!(table.round_state(), RoundState::AwaitingAction(1));
    }

    #[test]
    fn remaining_player_must_face_all_in_raise() {
        let mut table = new_table(&[1000, 1000, 100]);
        start_hand(&mut table);

        act(&mut table, 0, PlayerAction::CheckOrCall, 0);
        act(&mut table, 1, PlayerAction::CheckOrCall, 0);

        // Big blind shoves, the first player folds, the second must still decide.
        act(&mut table, 2, PlayerAction::Bet, 80);
        act(&mut table, 0, PlayerAction::Fold, 0);
        assert_eq!(table.round_state(), RoundState::AwaitingAction(1));

        act(&mut table, 1, PlayerAction::CheckOrCall, 0);
        assert_eq!(table.round_state(), RoundState::RoundComplete);
        assert_eq!(table.pot(), Chips::new(220));
    }

    #[test]
    fn quit_aborts_the_round() {
        let mut table = new_table(&[1000, 1000]);
        start_hand(&mut table);

        let seat = match table.round_state() {
            RoundState::AwaitingAction(seat) => seat,
            state => panic!("unexpected state {state:?}"),
        };

        let applied = act(&mut table, seat, PlayerAction::Quit, 0);
        assert_eq!(applied.action, PlayerAction::Quit);
        assert_eq!(table.round_state(), RoundState::GameAborted);
        assert!(matches!(
            table.act(PlayerAction::CheckOrCall, Chips::ZERO),
            Err(GameError::NoPendingAction)
        ));
    }

    #[test]
    fn snapshot_covers_other_players_cards() {
        let mut table = new_table(&[1000, 1000, 1000]);
        start_hand(&mut table);

        let state = table.snapshot(Some(1));
        assert_eq!(state.viewer(), Some(1));
        assert!(matches!(state.players()[1].cards, PlayerCards::Cards(..)));
        assert_eq!(state.players()[0].cards, PlayerCards::Covered);
        assert_eq!(state.players()[2].cards, PlayerCards::Covered);
        assert_eq!(state.pot(), Chips::new(30));
        assert_eq!(state.to_call(1), Chips::new(10));
        assert_eq!(state.dealer(), Some(0));

        let state = table.snapshot(None);
        assert!(state.players().iter().all(|p| p.cards == PlayerCards::Covered));
    }
}
