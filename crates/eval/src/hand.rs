// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Ranked hand types.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use shortstack_cards::{Card, Rank};

/// A poker hand category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ranking {
    /// The hand has not been ranked, or has been folded unrevealed.
    Unranked,
    /// High card.
    HighCard,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl Ranking {
    /// The category name.
    pub fn label(&self) -> &'static str {
        match self {
            Ranking::Unranked => "Unranked",
            Ranking::HighCard => "High Card",
            Ranking::Pair => "Pair",
            Ranking::TwoPair => "Two Pair",
            Ranking::ThreeOfAKind => "Three of a Kind",
            Ranking::Straight => "Straight",
            Ranking::Flush => "Flush",
            Ranking::FullHouse => "Full House",
            Ranking::FourOfAKind => "Four of a Kind",
            Ranking::StraightFlush => "Straight Flush",
            Ranking::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hand category with the cards that break ties within the category.
///
/// Two hands compare by ranking first and then by the rank of the sub-ranking
/// cards, the first differing card decides. Suits never take part in the
/// comparison and neither does the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHand {
    ranking: Ranking,
    sub_ranking: Vec<Card>,
    owner: Option<usize>,
}

impl RankedHand {
    /// A hand that has not been ranked.
    pub const UNRANKED: RankedHand = RankedHand {
        ranking: Ranking::Unranked,
        sub_ranking: Vec::new(),
        owner: None,
    };

    pub(crate) fn new(ranking: Ranking, sub_ranking: Vec<Card>) -> Self {
        debug_assert!(sub_ranking.len() <= 5);
        Self {
            ranking,
            sub_ranking,
            owner: None,
        }
    }

    /// Tags this hand with the seat of the player who holds it.
    pub fn with_owner(mut self, seat: usize) -> Self {
        self.owner = Some(seat);
        self
    }

    /// The hand category.
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// The cards that break ties between hands of the same category.
    pub fn sub_ranking(&self) -> &[Card] {
        &self.sub_ranking
    }

    /// The seat of the player holding this hand.
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    /// A human readable description like "Two Pair, Jacks and Fours".
    pub fn description(&self) -> String {
        let rank = |idx: usize| self.sub_ranking.get(idx).map(Card::rank);

        match (self.ranking, rank(0), rank(1)) {
            (Ranking::StraightFlush | Ranking::Straight | Ranking::Flush, Some(r), _) => {
                format!("{}, {} high", self.ranking, r.name())
            }
            (Ranking::FourOfAKind | Ranking::ThreeOfAKind, Some(r), _) => {
                format!("{}, {}", self.ranking, plural(r))
            }
            (Ranking::FullHouse, Some(r1), Some(r2)) => {
                format!("Full House, {} full of {}", plural(r1), plural(r2))
            }
            (Ranking::TwoPair, Some(r1), Some(r2)) => {
                format!("Two Pair, {} and {}", plural(r1), plural(r2))
            }
            (Ranking::Pair, Some(r), _) => format!("Pair of {}", plural(r)),
            (Ranking::HighCard, Some(r), _) => format!("High Card, {}", r.name()),
            (ranking, _, _) => ranking.to_string(),
        }
    }
}

fn plural(rank: Rank) -> String {
    match rank {
        Rank::Six => "Sixes".to_string(),
        r => format!("{}s", r.name()),
    }
}

impl PartialEq for RankedHand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedHand {}

impl PartialOrd for RankedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ranking.cmp(&other.ranking).then_with(|| {
            self.sub_ranking
                .iter()
                .map(Card::rank)
                .cmp(other.sub_ranking.iter().map(Card::rank))
        })
    }
}

impl fmt::Display for RankedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())?;

        if !self.sub_ranking.is_empty() {
            f.write_str(" [")?;
            for (idx, card) in self.sub_ranking.iter().enumerate() {
                if idx > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{card}")?;
            }
            f.write_str("]")?;
        }

        Ok(())
    }
}
