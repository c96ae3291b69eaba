// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand settlement.
use ahash::AHashMap;
use log::info;

use super::Table;
use crate::{
    poker::{Chips, PlayerCards, RankedHand, Ranking, rank},
    pot::PotTracker,
};

/// Chips paid to a player at the end of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payoff {
    /// The player seat.
    pub seat: usize,
    /// The chips won.
    pub chips: Chips,
}

/// The result of a hand.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// More than one player shares the best hand.
    pub draw: bool,
    /// The winner name or "Draw".
    pub winner: String,
    /// The winning hand category, [Ranking::Unranked] if the pot was won by folds.
    pub ranking: Ranking,
    /// The best hand at showdown.
    pub winning_hand: Option<RankedHand>,
    /// Seats that show their cards.
    pub revealing: Vec<usize>,
    /// The chips paid to each winner in seat order.
    pub payoffs: Vec<Payoff>,
    /// The pot total.
    pub pot: Chips,
}

impl Outcome {
    /// The chips won by a seat.
    pub fn winnings(&self, seat: usize) -> Chips {
        self.payoffs
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.chips)
            .sum()
    }
}

impl Table {
    /// Settles the hand and pays the winners.
    ///
    /// If a single player is left in the hand it takes the whole pot without
    /// showing its cards, otherwise all the players in the hand show their
    /// cards and the pot is split layer by layer: each layer goes to the best
    /// hands among the players who contributed to it.
    pub fn determine_outcome(&mut self) -> Outcome {
        let mut pot = self.players.iter().map(|p| p.bet).collect::<PotTracker>();
        let total = pot.total();

        let active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(seat, _)| seat)
            .collect::<Vec<_>>();

        let mut payoffs = AHashMap::<usize, Chips>::default();

        let outcome = if let [seat] = active[..] {
            payoffs.insert(seat, pot.take_all());

            Outcome {
                draw: false,
                winner: self.players.get(seat).name.clone(),
                ranking: Ranking::Unranked,
                winning_hand: None,
                revealing: Vec::new(),
                payoffs: Vec::new(),
                pot: total,
            }
        } else {
            let mut hands = active
                .iter()
                .filter_map(|&seat| {
                    let hole = self.players.get(seat).hole_cards.cards()?;
                    Some(rank(hole, &self.board).with_owner(seat))
                })
                .collect::<Vec<_>>();
            hands.sort_by(|a, b| b.cmp(a));

            while !pot.is_empty() {
                let contenders = hands
                    .iter()
                    .filter(|h| h.owner().is_some_and(|seat| pot.share(seat) > Chips::ZERO))
                    .collect::<Vec<_>>();

                let Some(best) = contenders.first() else {
                    // Chips left by folded players above every live share.
                    let winners = self.best_seats(&hands);
                    let layer = pot.take_all();
                    self.split_layer(layer, &winners, &mut payoffs);
                    break;
                };

                let winners = contenders
                    .iter()
                    .filter(|h| *h == best)
                    .filter_map(|h| h.owner())
                    .collect::<Vec<_>>();

                let Some(smallest) = winners.iter().copied().min_by_key(|&seat| pot.share(seat)) else {
                    break;
                };

                let layer = pot.chip_share(smallest);
                self.split_layer(layer, &winners, &mut payoffs);
            }

            let best_seats = self.best_seats(&hands);
            let draw = best_seats.len() > 1;
            let winner = match best_seats[..] {
                [seat] => self.players.get(seat).name.clone(),
                _ => "Draw".to_string(),
            };

            let winning_hand = hands.first().cloned();
            Outcome {
                draw,
                winner,
                ranking: winning_hand
                    .as_ref()
                    .map(RankedHand::ranking)
                    .unwrap_or(Ranking::Unranked),
                winning_hand,
                revealing: active,
                payoffs: Vec::new(),
                pot: total,
            }
        };

        for &seat in &outcome.revealing {
            let player = self.players.get_mut(seat);
            player.public_cards = player.hole_cards;
        }

        let mut paid = payoffs
            .into_iter()
            .filter(|(_, chips)| *chips > Chips::ZERO)
            .map(|(seat, chips)| Payoff { seat, chips })
            .collect::<Vec<_>>();
        paid.sort_by_key(|p| p.seat);

        for payoff in &paid {
            self.players.get_mut(payoff.seat).chips += payoff.chips;
        }

        for player in self.players.iter_mut() {
            player.bet = Chips::ZERO;
        }

        info!(
            "Hand won by {} with {} pot {}",
            outcome.winner, outcome.ranking, outcome.pot
        );

        Outcome {
            payoffs: paid,
            ..outcome
        }
    }

    /// Seats holding a hand equal to the best one.
    fn best_seats(&self, hands: &[RankedHand]) -> Vec<usize> {
        match hands.first() {
            Some(best) => hands
                .iter()
                .filter(|h| *h == best)
                .filter_map(RankedHand::owner)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Splits a pot layer among the winners.
    ///
    /// Chips that don't divide evenly go one at a time to the winners closest
    /// to the left of the button.
    fn split_layer(&self, layer: Chips, winners: &[usize], payoffs: &mut AHashMap<usize, Chips>) {
        if winners.is_empty() || layer == Chips::ZERO {
            return;
        }

        let n = winners.len() as u32;
        let share = layer / n;
        let mut odd = (layer % n).amount();

        for seat in self.players.seats_from_dealer() {
            if !winners.contains(&seat) {
                continue;
            }

            let mut chips = share;
            if odd > 0 {
                chips += Chips::new(1);
                odd -= 1;
            }

            *payoffs.entry(seat).or_default() += chips;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{poker::Card, table::Player};
    use rand::{SeedableRng, rngs::StdRng};

    struct Seat {
        stack: u32,
        bet: u32,
        hole: &'static str,
        folded: bool,
    }

    fn seat(stack: u32, bet: u32, hole: &'static str) -> Seat {
        Seat {
            stack,
            bet,
            hole,
            folded: false,
        }
    }

    fn folded(stack: u32, bet: u32, hole: &'static str) -> Seat {
        Seat {
            stack,
            bet,
            hole,
            folded: true,
        }
    }

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    /// Builds a table at showdown, `stack` is the chips left after betting.
    fn showdown(seats: &[Seat], board: &str) -> Table {
        let players = seats
            .iter()
            .enumerate()
            .map(|(idx, s)| Player::new(format!("P{idx}"), Chips::new(s.stack + s.bet)))
            .collect();
        let mut table = Table::new(players, Chips::new(10), Chips::new(20)).unwrap();
        table.start_hand(&mut StdRng::seed_from_u64(3));

        for (idx, s) in seats.iter().enumerate() {
            let player = table.players.get_mut(idx);
            player.bet(Chips::new(s.bet));

            let hole = cards(s.hole);
            player.hole_cards = PlayerCards::Cards(hole[0], hole[1]);
            player.public_cards = PlayerCards::Covered;
            if s.folded {
                player.fold();
            }
        }

        table.board = cards(board);
        table
    }

    fn stacks(table: &Table) -> Vec<u32> {
        table.players().iter().map(|p| p.chips.amount()).collect()
    }

    #[test]
    fn fold_to_big_blind() {
        let mut table = showdown(&[folded(990, 0, "2D 3H"), folded(990, 10, "5C 6C"), seat(980, 20, "AS KD")], "");

        let outcome = table.determine_outcome();
        assert!(!outcome.draw);
        assert_eq!(outcome.winner, "P2");
        assert_eq!(outcome.ranking, Ranking::Unranked);
        assert!(outcome.winning_hand.is_none());
        assert!(outcome.revealing.is_empty());
        assert_eq!(outcome.pot, Chips::new(30));
        assert_eq!(outcome.payoffs, vec![Payoff { seat: 2, chips: Chips::new(30) }]);
        assert_eq!(stacks(&table), vec![990, 990, 1010]);
        assert_eq!(table.players().get(2).public_cards, PlayerCards::Covered);
        assert_eq!(table.pot(), Chips::ZERO);
    }

    #[test]
    fn best_hand_wins() {
        let mut table = showdown(
            &[seat(900, 100, "AH AD"), seat(900, 100, "KH KD"), folded(950, 50, "5C 6C")],
            "2C 7S 9D JH 4S",
        );

        let outcome = table.determine_outcome();
        assert!(!outcome.draw);
        assert_eq!(outcome.winner, "P0");
        assert_eq!(outcome.ranking, Ranking::Pair);
        assert_eq!(outcome.revealing, vec![0, 1]);
        assert_eq!(outcome.winnings(0), Chips::new(250));
        assert_eq!(stacks(&table), vec![1150, 900, 950]);
        assert!(matches!(table.players().get(1).public_cards, PlayerCards::Cards(..)));
        assert_eq!(table.players().get(2).public_cards, PlayerCards::None);
    }

    #[test]
    fn split_pot_with_quads_on_board() {
        let mut table = showdown(
            &[seat(800, 200, "2C 3D"), seat(800, 200, "4H 5S")],
            "9S 9H 9D 9C AS",
        );

        let outcome = table.determine_outcome();
        assert!(outcome.draw);
        assert_eq!(outcome.winner, "Draw");
        assert_eq!(outcome.ranking, Ranking::FourOfAKind);
        assert_eq!(outcome.winnings(0), Chips::new(200));
        assert_eq!(outcome.winnings(1), Chips::new(200));
        assert_eq!(stacks(&table), vec![1000, 1000]);
    }

    #[test]
    fn short_stack_wins_main_pot() {
        // P0 is all in for 100, P1 and P2 built a side pot of 300 each.
        let mut table = showdown(
            &[seat(0, 100, "AH AD"), seat(600, 400, "KH KD"), seat(600, 400, "QH QD")],
            "2C 7S 9D JH 4S",
        );

        let outcome = table.determine_outcome();
        assert_eq!(outcome.winner, "P0");
        assert_eq!(outcome.pot, Chips::new(900));
        assert_eq!(outcome.winnings(0), Chips::new(300));
        assert_eq!(outcome.winnings(1), Chips::new(600));
        assert_eq!(outcome.winnings(2), Chips::ZERO);
        assert_eq!(stacks(&table), vec![300, 1200, 600]);
    }

    #[test]
    fn side_pot_split_between_tied_hands() {
        let mut table = showdown(
            &[
                seat(0, 50, "2H 3D"),
                seat(0, 200, "AH KD"),
                seat(100, 200, "AD KH"),
                folded(500, 120, "5C 6C"),
            ],
            "AC KC 7S 8D 2S",
        );

        let outcome = table.determine_outcome();
        let paid = outcome.payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, outcome.pot);
        assert_eq!(outcome.pot, Chips::new(570));
        assert!(outcome.draw);

        // Main pot 200 and side pot 370 are split between P1 and P2.
        assert_eq!(outcome.winnings(0), Chips::ZERO);
        assert_eq!(outcome.winnings(1), Chips::new(285));
        assert_eq!(outcome.winnings(2), Chips::new(285));
    }

    #[test]
    fn odd_chip_goes_left_of_the_button() {
        let mut table = showdown(
            &[seat(0, 25, "2C 3D"), seat(0, 25, "4H 5S"), folded(0, 25, "2D 3H")],
            "9S 9H 9D 9C AS",
        );

        let first = table
            .players()
            .seats_from_dealer()
            .find(|&seat| seat != 2)
            .unwrap();

        let outcome = table.determine_outcome();
        assert_eq!(outcome.pot, Chips::new(75));
        assert_eq!(outcome.winnings(first), Chips::new(38));
        assert_eq!(outcome.winnings(1 - first), Chips::new(37));
    }

    #[test]
    fn layer_extraction_pays_the_whole_pot() {
        let mut table = showdown(
            &[
                seat(0, 10, "AH AD"),
                seat(0, 20, "KH KD"),
                seat(0, 30, "QH QD"),
                seat(0, 40, "JH JD"),
                seat(0, 50, "TH TD"),
                seat(10, 60, "8H 4D"),
            ],
            "2C 3S 6D 7H 9S",
        );

        let outcome = table.determine_outcome();
        assert_eq!(outcome.pot, Chips::new(210));
        assert_eq!(outcome.winnings(0), Chips::new(60));
        assert_eq!(outcome.winnings(1), Chips::new(50));
        assert_eq!(outcome.winnings(2), Chips::new(40));
        assert_eq!(outcome.winnings(3), Chips::new(30));
        assert_eq!(outcome.winnings(4), Chips::new(20));
        assert_eq!(outcome.winnings(5), Chips::new(10));

        let paid = outcome.payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, Chips::new(210));
        assert_eq!(stacks(&table).iter().sum::<u32>(), 220);
    }
}
