// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Matchup outcomes.
use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use headsup_eval::{HandRank, HandValue};

use crate::{Error, Result};

/// The showdown counts of a matchup from the first hand point of view.
///
/// Outcomes of disjoint sets of boards can be added together in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Boards won by the first hand.
    pub wins: u64,
    /// Boards won by the second hand.
    pub losses: u64,
    /// Boards where the pot is split.
    pub ties: u64,
}

impl Outcome {
    /// Records the showdown of the first hand value against the second.
    #[inline]
    pub fn record(&mut self, first: HandValue, second: HandValue) {
        if first > second {
            self.wins += 1;
        } else if first < second {
            self.losses += 1;
        } else {
            self.ties += 1;
        }
    }

    /// The number of boards.
    pub fn total(&self) -> u64 {
        self.wins + self.losses + self.ties
    }

    /// The first hand equity in percent, ties count as half a win.
    pub fn equity(&self) -> Result<f64> {
        let total = self.total();
        if total == 0 {
            return Err(Error::EmptyEnumeration);
        }

        Ok((100.0 * self.wins as f64 + 50.0 * self.ties as f64) / total as f64)
    }

    /// The percentage of boards for the given count.
    pub fn percent(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            total => 100.0 * count as f64 / total as f64,
        }
    }

    /// The outcome from the second hand point of view.
    pub fn flip(&self) -> Outcome {
        Outcome {
            wins: self.losses,
            losses: self.wins,
            ties: self.ties,
        }
    }
}

impl Add for Outcome {
    type Output = Outcome;

    fn add(mut self, rhs: Outcome) -> Outcome {
        self += rhs;
        self
    }
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.ties += rhs.ties;
    }
}

impl Sum for Outcome {
    fn sum<I: Iterator<Item = Outcome>>(iter: I) -> Self {
        iter.fold(Outcome::default(), Add::add)
    }
}

/// The number of boards a player made each hand category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandTotals([u64; HandRank::COUNT]);

impl HandTotals {
    /// Counts the category of a hand value.
    #[inline]
    pub fn record(&mut self, value: HandValue) {
        self.0[value.rank() as usize] += 1;
    }

    /// The number of boards with the given category.
    pub fn count(&self, rank: HandRank) -> u64 {
        self.0[rank as usize]
    }

    /// The number of recorded boards.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Iterates categories and counts from the lowest category.
    pub fn iter(&self) -> impl Iterator<Item = (HandRank, u64)> + '_ {
        HandRank::ranks().map(|rank| (rank, self.count(rank)))
    }
}

impl AddAssign for HandTotals {
    fn add_assign(&mut self, rhs: HandTotals) {
        self.0.iter_mut().zip(rhs.0).for_each(|(l, r)| *l += r);
    }
}
