// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Starting hands indexing.
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

use headsup_cards::Deck;

use crate::{Error, Result, hand::Hand};

/// The number of distinct starting hands.
pub const NUM_HANDS: usize = 1326;

/// Starting hands by index and index by pair of cards.
struct HandsTable {
    hands: Vec<Hand>,
    indices: [[u16; Deck::SIZE]; Deck::SIZE],
}

static HANDS: LazyLock<HandsTable> = LazyLock::new(|| {
    let mut hands = Vec::with_capacity(NUM_HANDS);
    let mut indices = [[u16::MAX; Deck::SIZE]; Deck::SIZE];

    // Ascending by lowest card and then by highest card.
    let deck = Deck::default();
    for (pos, &low) in deck.cards().iter().enumerate() {
        for &high in &deck.cards()[pos + 1..] {
            indices[low.index()][high.index()] = hands.len() as u16;
            hands.push(Hand::from_ordered(low, high));
        }
    }

    HandsTable { hands, indices }
});

/// A starting hand index in `0..1326`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HandIndex(u16);

impl HandIndex {
    /// Creates an index, fails with [Error::IndexOutOfRange] if index >= 1326.
    pub fn new(index: usize) -> Result<HandIndex> {
        if index < NUM_HANDS {
            Ok(HandIndex(index as u16))
        } else {
            Err(Error::IndexOutOfRange(index))
        }
    }

    /// The index of a hand.
    pub fn of(hand: Hand) -> HandIndex {
        HandIndex(HANDS.indices[hand.low().index()][hand.high().index()])
    }

    /// The hand at this index.
    pub fn hand(self) -> Hand {
        HANDS.hands[self.0 as usize]
    }

    /// The index value.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The hand code in index order, e.g. "2c3c".
    pub fn code(self) -> String {
        let hand = self.hand();
        format!("{}{}", hand.low(), hand.high())
    }

    /// Iterates all indices in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = HandIndex> + ExactSizeIterator {
        (0..NUM_HANDS as u16).map(HandIndex)
    }
}

impl TryFrom<usize> for HandIndex {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        HandIndex::new(index)
    }
}

impl TryFrom<u16> for HandIndex {
    type Error = Error;

    fn try_from(index: u16) -> Result<Self> {
        HandIndex::new(index as usize)
    }
}

impl From<HandIndex> for u16 {
    fn from(idx: HandIndex) -> u16 {
        idx.0
    }
}

impl From<Hand> for HandIndex {
    fn from(hand: Hand) -> Self {
        HandIndex::of(hand)
    }
}

impl fmt::Display for HandIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
