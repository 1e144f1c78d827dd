// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hole cards and board types.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

use headsup_cards::{Card, CardSet};

use crate::{Error, Result};

/// Collects cards into a set failing with [Error::CardConflict] if a card is
/// repeated.
pub fn distinct_cards<I>(cards: I) -> Result<CardSet>
where
    I: IntoIterator<Item = Card>,
{
    let mut set = CardSet::EMPTY;
    for card in cards {
        if !set.insert(card) {
            return Err(Error::CardConflict(card));
        }
    }

    Ok(set)
}

/// A player hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Card; 2]", into = "[Card; 2]")]
pub struct Hand {
    low: Card,
    high: Card,
}

impl Hand {
    /// Creates a hand from two different cards.
    pub fn new(c1: Card, c2: Card) -> Result<Hand> {
        match c1.cmp(&c2) {
            Ordering::Less => Ok(Self::from_ordered(c1, c2)),
            Ordering::Greater => Ok(Self::from_ordered(c2, c1)),
            Ordering::Equal => Err(Error::CardConflict(c1)),
        }
    }

    /// Creates a hand from two cards with `low < high`.
    pub(crate) const fn from_ordered(low: Card, high: Card) -> Hand {
        Hand { low, high }
    }

    /// The card with the lowest index.
    pub fn low(&self) -> Card {
        self.low
    }

    /// The card with the highest index.
    pub fn high(&self) -> Card {
        self.high
    }

    /// The hand cards, lowest index first.
    pub fn cards(&self) -> [Card; 2] {
        [self.low, self.high]
    }

    /// The hand cards as a set.
    #[inline]
    pub fn set(&self) -> CardSet {
        CardSet::from_bits(self.low.mask() | self.high.mask())
    }

    /// Checks if this hand and the other hand can be dealt together.
    pub fn is_disjoint(&self, other: &Hand) -> bool {
        self.set().is_disjoint(other.set())
    }
}

impl TryFrom<[Card; 2]> for Hand {
    type Error = Error;

    fn try_from([c1, c2]: [Card; 2]) -> Result<Self> {
        Hand::new(c1, c2)
    }
}

impl From<Hand> for [Card; 2] {
    fn from(hand: Hand) -> Self {
        hand.cards()
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Card::parse_many(s)?.as_slice() {
            &[c1, c2] => Hand::new(c1, c2),
            cards => Err(Error::InvalidHand(cards.len())),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show the highest card first.
        write!(f, "{}{}", self.high, self.low)
    }
}

/// The community cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardSet", into = "CardSet")]
pub struct Board(CardSet);

impl Board {
    /// The number of cards of a complete board.
    pub const SIZE: usize = 5;

    /// Creates a board from a set of 0, 3, 4, or 5 cards.
    pub fn new(cards: CardSet) -> Result<Board> {
        match cards.len() {
            0 | 3 | 4 | 5 => Ok(Board(cards)),
            n => Err(Error::InvalidBoard(n)),
        }
    }

    /// Creates a board from a list of cards.
    pub fn from_cards(cards: &[Card]) -> Result<Board> {
        Board::new(distinct_cards(cards.iter().copied())?)
    }

    /// The board cards.
    pub fn cards(&self) -> CardSet {
        self.0
    }

    /// The number of cards on the board.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if this is a preflop board.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of cards that are still to come.
    pub fn missing(&self) -> usize {
        Self::SIZE - self.len()
    }
}

impl TryFrom<CardSet> for Board {
    type Error = Error;

    fn try_from(cards: CardSet) -> Result<Self> {
        Board::new(cards)
    }
}

impl From<Board> for CardSet {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_cards(&Card::parse_many(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_new() {
        let ah = "Ah".parse::<Card>().unwrap();
        let kd = "Kd".parse::<Card>().unwrap();

        let hand = Hand::new(ah, kd).unwrap();
        assert_eq!(hand, Hand::new(kd, ah).unwrap());
        assert_eq!(hand.low(), kd);
        assert_eq!(hand.high(), ah);
        assert_eq!(hand.set().len(), 2);
        assert_eq!(hand.to_string(), "AhKd");

        assert_eq!(Hand::new(ah, ah), Err(Error::CardConflict(ah)));
    }

    #[test]
    fn hand_from_str() {
        let hand = "2c Ah".parse::<Hand>().unwrap();
        assert_eq!(hand.to_string(), "Ah2c");
        assert!(hand.is_disjoint(&"AsKs".parse().unwrap()));
        assert!(!hand.is_disjoint(&"AhKs".parse().unwrap()));

        assert_eq!("Ah".parse::<Hand>(), Err(Error::InvalidHand(1)));
        assert_eq!("AhKhQh".parse::<Hand>(), Err(Error::InvalidHand(3)));
        assert!(matches!(
            "AhXx".parse::<Hand>(),
            Err(Error::InvalidCard(e)) if e.token() == "Xx"
        ));
    }

    #[test]
    fn board_sizes() {
        for (cards, missing) in [("", 5), ("2c3c4c", 2), ("2c3c4c5c", 1), ("2c3c4c5c6c", 0)] {
            let board = cards.parse::<Board>().unwrap();
            assert_eq!(board.missing(), missing);
            assert_eq!(board.to_string(), cards);
        }

        assert_eq!("2c".parse::<Board>(), Err(Error::InvalidBoard(1)));
        assert_eq!("2c3c".parse::<Board>(), Err(Error::InvalidBoard(2)));
        assert_eq!("2c3c4c5c6c7c".parse::<Board>(), Err(Error::InvalidBoard(6)));

        let two_clubs = "2c".parse().unwrap();
        assert_eq!(
            "2c3c2c".parse::<Board>(),
            Err(Error::CardConflict(two_clubs))
        );
    }

    #[test]
    fn deserialize_checks_cards() {
        let hand = "AhKd".parse::<Hand>().unwrap();
        let json = serde_json::to_string(&hand).unwrap();
        assert_eq!(serde_json::from_str::<Hand>(&json).unwrap(), hand);

        // Cards in any order, the same card twice is a conflict.
        assert_eq!(serde_json::from_str::<Hand>("[38, 24]").unwrap(), hand);
        let err = serde_json::from_str::<Hand>("[51, 51]").unwrap_err();
        assert!(err.to_string().contains("dealt more than once"), "{err}");
        assert!(serde_json::from_str::<Hand>("[38, 60]").is_err());
        assert!(serde_json::from_str::<Hand>("[38]").is_err());

        let flop = "2c3c4c".parse::<Board>().unwrap();
        let json = serde_json::to_string(&flop).unwrap();
        assert_eq!(json, "7");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), flop);

        let err = serde_json::from_str::<Board>("3").unwrap_err();
        assert!(err.to_string().contains("invalid board with 2 cards"), "{err}");
    }
}
