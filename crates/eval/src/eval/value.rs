// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand value computation.
use serde::{Deserialize, Serialize};
use std::fmt;

use headsup_cards::{Card, CardSet, Suit};

/// Ranks mask for the wheel (A, 2, 3, 4, 5).
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Bits used by a category value, the category is stored above them.
const CATEGORY_SHIFT: u32 = 26;

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
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
}

impl HandRank {
    /// The number of hand categories.
    pub const COUNT: usize = 9;

    /// Returns all hand ranks from the lowest to the highest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pairs",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        // Use pad so that callers can align names.
        f.pad(name)
    }
}

/// The value of a 5, 6, or 7 cards hand.
///
/// The value is encoded as:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxcccc|ccmmmmmm|mmmmmmmk|kkkkkkkk|
///   +--------+--------+--------+--------+
///   c = hand category (HandRank)
///   m = ranks mask of the cards that make the category (pairs, sets, ...)
///   k = ranks mask of the kickers, or the high card for straights
/// ```
///
/// so that comparing two values compares the hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the number of cards is not 5 <= n <= 7.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "5 <= cards={} <= 7",
            cards.len()
        );

        let set = cards.iter().copied().collect::<CardSet>();
        debug_assert_eq!(set.len(), cards.len(), "Duplicated cards {cards:?}");
        Self::eval_set(set)
    }

    /// Evaluates the hand made by the cards in a set.
    ///
    /// The set should contain 5 to 7 cards, smaller sets are evaluated as
    /// if the missing cards were blanks.
    pub fn eval_set(cards: CardSet) -> HandValue {
        let c = cards.suit_ranks(Suit::Clubs);
        let d = cards.suit_ranks(Suit::Diamonds);
        let h = cards.suit_ranks(Suit::Hearts);
        let s = cards.suit_ranks(Suit::Spades);

        // A flush excludes quads and full houses with at most 7 cards.
        if let Some(flush) = [c, d, h, s].into_iter().find(|r| r.count_ones() >= 5) {
            return match straight_high(flush) {
                Some(high) => Self::new(HandRank::StraightFlush, high),
                None => Self::new(HandRank::Flush, keep_n(flush, 5)),
            };
        }

        let ranks = c | d | h | s;
        let quads = c & d & h & s;
        let three_plus = (c & d & h) | (c & d & s) | (c & h & s) | (d & h & s);
        let two_plus = (c & d) | (c & h) | (c & s) | (d & h) | (d & s) | (h & s);
        let trips = three_plus & !quads;
        let pairs = two_plus & !three_plus;

        if quads != 0 {
            let kicker = keep_highest(ranks ^ quads);
            Self::new(HandRank::FourOfAKind, (quads << 13) | kicker)
        } else if trips.count_ones() == 2 {
            // The lower set plays as the pair.
            let set = keep_highest(trips);
            Self::new(HandRank::FullHouse, (set << 13) | (trips ^ set))
        } else if trips != 0 && pairs != 0 {
            Self::new(HandRank::FullHouse, (trips << 13) | keep_highest(pairs))
        } else if let Some(high) = straight_high(ranks) {
            Self::new(HandRank::Straight, high)
        } else if trips != 0 {
            let kickers = keep_n(ranks ^ trips, 2);
            Self::new(HandRank::ThreeOfAKind, (trips << 13) | kickers)
        } else if pairs.count_ones() >= 2 {
            let two = keep_n(pairs, 2);
            let kicker = keep_highest(ranks ^ two);
            Self::new(HandRank::TwoPair, (two << 13) | kicker)
        } else if pairs != 0 {
            let kickers = keep_n(ranks ^ pairs, 3);
            Self::new(HandRank::OnePair, (pairs << 13) | kickers)
        } else {
            Self::new(HandRank::HighCard, keep_n(ranks, 5))
        }
    }

    /// Returns the hand category.
    pub fn rank(&self) -> HandRank {
        match self.0 >> CATEGORY_SHIFT {
            0 => HandRank::HighCard,
            1 => HandRank::OnePair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => unreachable!("Invalid hand value 0x{:x}", self.0),
        }
    }

    #[inline]
    fn new(rank: HandRank, value: u32) -> Self {
        Self(((rank as u32) << CATEGORY_SHIFT) | value)
    }
}

/// Returns the rank of the highest card of a straight in the ranks mask.
///
/// The wheel is the lowest straight with a five high card.
#[inline]
fn straight_high(ranks: u32) -> Option<u32> {
    let run = ranks & (ranks << 1) & (ranks << 2) & (ranks << 3) & (ranks << 4);
    if run != 0 {
        Some(31 - run.leading_zeros())
    } else if ranks & WHEEL == WHEEL {
        Some(3)
    } else {
        None
    }
}

/// Keeps the most significant bit.
#[inline]
fn keep_highest(ranks: u32) -> u32 {
    if ranks == 0 {
        0
    } else {
        1 << (31 - ranks.leading_zeros())
    }
}

/// Keeps the n most significant bits.
#[inline]
fn keep_n(mut ranks: u32, n: u32) -> u32 {
    while ranks.count_ones() > n {
        ranks &= ranks - 1;
    }

    ranks
}
