// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot chip shares.
//!
//! The pot is not a single amount but the chips each player put in during the
//! hand. When a player goes all-in for less than the others, the chips above
//! the all-in amount form a side pot that only the players who matched them
//! can win. [PotTracker::chip_share] peels one of these layers at a time.
use crate::poker::Chips;

/// Per player chips contributed to the pot in the current hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotTracker {
    shares: Vec<Chips>,
}

impl PotTracker {
    /// Creates a tracker for the given number of seats.
    pub fn new(seats: usize) -> Self {
        Self {
            shares: vec![Chips::ZERO; seats],
        }
    }

    /// Adds chips to a player share.
    pub fn add(&mut self, seat: usize, chips: Chips) {
        self.shares[seat] += chips;
    }

    /// The chips a player has in the pot.
    pub fn share(&self, seat: usize) -> Chips {
        self.shares.get(seat).copied().unwrap_or_default()
    }

    /// The pot total.
    pub fn total(&self) -> Chips {
        self.shares.iter().copied().sum()
    }

    /// Checks if all chips have been taken out of the pot.
    pub fn is_empty(&self) -> bool {
        self.shares.iter().all(|s| *s == Chips::ZERO)
    }

    /// Removes the layer of the pot that the player at `seat` can win.
    ///
    /// Each share, including the player's own, gives up to the player share and
    /// keeps the rest. Returns the chips taken out, after this call the player
    /// share is zero. Extracting layers in ascending share order unwinds the
    /// main pot and every side pot.
    pub fn chip_share(&mut self, seat: usize) -> Chips {
        let layer = self.share(seat);
        let mut chips = Chips::ZERO;

        for share in &mut self.shares {
            let taken = (*share).min(layer);
            *share -= taken;
            chips += taken;
        }

        chips
    }

    /// Takes all the chips left in the pot.
    pub fn take_all(&mut self) -> Chips {
        let chips = self.total();
        self.shares.iter_mut().for_each(|s| *s = Chips::ZERO);
        chips
    }
}

impl FromIterator<Chips> for PotTracker {
    fn from_iter<T: IntoIterator<Item = Chips>>(iter: T) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}
