// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best 5 of N hand ranking.
//!
//! The engine builds a value histogram and a suit histogram of the cards, and
//! checks the categories from the strongest to the weakest, the first match
//! wins. Straights are found by scanning the distinct ranks from the highest to
//! the lowest, an ace is added a second time at the low end of the scan so that
//! it can complete the wheel (A-2-3-4-5).
use shortstack_cards::{Card, Rank, Suit};

use crate::hand::{RankedHand, Ranking};

/// The maximum number of cards in a hand, hole cards plus a full board.
const MAX_CARDS: usize = 7;

/// The maximum number of board cards.
const MAX_BOARD: usize = 5;

/// Ranks a player hand given the hole cards and the board cards dealt so far.
///
/// Panics if the board has more than 5 cards.
pub fn rank(hole: [Card; 2], board: &[Card]) -> RankedHand {
    assert!(board.len() <= MAX_BOARD, "board has {} cards", board.len());

    let mut cards = Vec::with_capacity(MAX_CARDS);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    RankedHand::eval(&cards)
}

impl RankedHand {
    /// Ranks a hand of 2 to 7 cards.
    ///
    /// Panics if there are less than 2 or more than 7 cards.
    pub fn eval(cards: &[Card]) -> RankedHand {
        assert!(
            (2..=MAX_CARDS).contains(&cards.len()),
            "cannot rank {} cards",
            cards.len()
        );

        let hand = HandCards::new(cards);

        if let Some(flush) = hand.flush() {
            if let Some(straight) = find_straight(&straight_candidates(&flush)) {
                let high = straight[0];
                return if high.rank() == Rank::Ace {
                    RankedHand::new(Ranking::RoyalFlush, Vec::new())
                } else {
                    RankedHand::new(Ranking::StraightFlush, vec![high])
                };
            }
        }

        let (set, set_count) = hand.largest_set();

        if set_count == 4 {
            let mut sub = vec![set];
            sub.extend(hand.kickers(&[set.rank()], 1));
            return RankedHand::new(Ranking::FourOfAKind, sub);
        }

        if set_count == 3 {
            if let Some(pair) = hand.full_house_pair(set.rank()) {
                return RankedHand::new(Ranking::FullHouse, vec![set, pair]);
            }
        }

        if let Some(flush) = hand.flush() {
            return RankedHand::new(Ranking::Flush, flush[..5].to_vec());
        }

        let candidates = straight_candidates(&hand.cards);
        if let Some(straight) = find_straight(&candidates) {
            return RankedHand::new(Ranking::Straight, straight);
        }

        if set_count == 3 {
            let mut sub = vec![set];
            sub.extend(hand.kickers(&[set.rank()], 2));
            return RankedHand::new(Ranking::ThreeOfAKind, sub);
        }

        let pairs = hand.pairs();
        match pairs.as_slice() {
            [high, low, ..] => {
                let mut sub = vec![*high, *low];
                sub.extend(hand.kickers(&[high.rank(), low.rank()], 1));
                RankedHand::new(Ranking::TwoPair, sub)
            }
            [pair] => {
                let mut sub = vec![*pair];
                sub.extend(hand.kickers(&[pair.rank()], 3));
                RankedHand::new(Ranking::Pair, sub)
            }
            [] => {
                let high_cards = candidates
                    .iter()
                    .filter(|c| !c.is_low_ace())
                    .map(|c| c.card)
                    .take(5)
                    .collect();
                RankedHand::new(Ranking::HighCard, high_cards)
            }
        }
    }
}

/// The cards of a hand with their value and suit histograms.
struct HandCards {
    /// The cards sorted by descending rank.
    cards: Vec<Card>,
    /// Number of cards for each rank value, with a representative card.
    values: [(u8, Option<Card>); 15],
    /// Number of cards for each suit.
    suits: [u8; Suit::COUNT],
}

impl HandCards {
    fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by(|c1, c2| c2.rank().cmp(&c1.rank()));

        let mut values = [(0, None); 15];
        let mut suits = [0; Suit::COUNT];

        for card in &sorted {
            let entry = &mut values[card.value() as usize];
            entry.0 += 1;
            entry.1.get_or_insert(*card);
            suits[card.suit().index()] += 1;
        }

        Self {
            cards: sorted,
            values,
            suits,
        }
    }

    /// Returns all the cards of the flush suit sorted by descending rank.
    ///
    /// A 7 cards hand can only have one suit with 5 or more cards, the cards are
    /// always taken from the hand so that a 6 or 7 cards flush yields the top 5.
    fn flush(&self) -> Option<Vec<Card>> {
        let suit = Suit::suits().find(|s| self.suits[s.index()] >= 5)?;
        Some(
            self.cards
                .iter()
                .filter(|c| c.suit() == suit)
                .copied()
                .collect(),
        )
    }

    /// The rank with most cards, ties go to the higher rank.
    fn largest_set(&self) -> (Card, u8) {
        self.values
            .iter()
            .rev()
            .filter_map(|(count, card)| card.map(|c| (c, *count)))
            .fold(None, |best: Option<(Card, u8)>, (card, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((card, count)),
            })
            .expect("hand has at least 2 cards")
    }

    /// All the ranks with exactly two cards, highest first.
    fn pairs(&self) -> Vec<Card> {
        self.values
            .iter()
            .rev()
            .filter(|(count, _)| *count == 2)
            .filter_map(|(_, card)| *card)
            .collect()
    }

    /// The best rank, other than the trips rank, that can fill a full house.
    fn full_house_pair(&self, trips: Rank) -> Option<Card> {
        self.values
            .iter()
            .rev()
            .filter(|(count, _)| *count >= 2)
            .filter_map(|(_, card)| *card)
            .find(|c| c.rank() != trips)
    }

    /// The `n` highest cards whose rank is not in `exclude`.
    fn kickers(&self, exclude: &[Rank], n: usize) -> impl Iterator<Item = Card> {
        self.cards
            .iter()
            .filter(move |c| !exclude.contains(&c.rank()))
            .copied()
            .take(n)
    }
}

/// An entry in the straight scan.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// The value this card plays as, 1 for an ace playing low.
    value: u8,
    card: Card,
}

impl Candidate {
    fn is_low_ace(&self) -> bool {
        self.value == 1
    }
}

/// Builds the list of distinct ranks in descending order.
///
/// If an ace is present a copy of it with value 1 is appended at the end of the
/// list so that the scan can find the wheel. Callers that need the distinct
/// high cards must skip it with [Candidate::is_low_ace].
fn straight_candidates(sorted: &[Card]) -> Vec<Candidate> {
    let mut candidates = Vec::<Candidate>::with_capacity(MAX_CARDS + 1);

    for card in sorted {
        if candidates.last().is_none_or(|c| c.card.rank() != card.rank()) {
            candidates.push(Candidate {
                value: card.value(),
                card: *card,
            });
        }
    }

    if let Some(ace) = candidates.first().filter(|c| c.card.rank() == Rank::Ace) {
        let low_ace = Candidate {
            value: 1,
            card: ace.card,
        };
        candidates.push(low_ace);
    }

    candidates
}

/// Finds the highest straight, returns its five cards from high to low.
fn find_straight(candidates: &[Candidate]) -> Option<Vec<Card>> {
    let mut start = 0;
    let mut run = 0;

    for idx in 1..candidates.len() {
        if candidates[idx - 1].value == candidates[idx].value + 1 {
            run += 1;
            if run == 4 {
                return Some(candidates[start..=idx].iter().map(|c| c.card).collect());
            }
        } else {
            start = idx;
            run = 0;
        }
    }

    None
}
