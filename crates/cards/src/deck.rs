// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::CardSet;

/// Error returned when a token doesn't denote one of the 52 cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

impl ParseCardError {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token that failed to parse.
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// A Poker card.
///
/// A card is stored as its position in a 52 cards deck ordered by suit and
/// then by rank:
///
/// ```text
///   index = suit * 13 + rank
///   rank  = deuce=0,trey=1,four=2,...,ace=12
///   suit  = clubs=0,diamonds=1,hearts=2,spades=3
/// ```
///
/// The index is also the card bit in a [CardSet], so that the 13 bits of a
/// suit are contiguous and can be extracted with a shift.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Creates a card from its rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(suit as u8 * 13 + rank as u8)
    }

    /// Creates a card from its deck index, returns None if index >= 52.
    pub const fn from_index(index: usize) -> Option<Card> {
        if index < Deck::SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// This card index in the deck (0..52).
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// This card bit in a 52 bits mask.
    #[inline]
    pub const fn mask(&self) -> u64 {
        1 << self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        SUITS[(self.0 / 13) as usize]
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_index(self.0 % 13)
    }

    /// Parses a string of concatenated card tokens like `"AhKd"`.
    ///
    /// Tokens can also be separated by whitespace (`"Ah Kd 2c"`).
    pub fn parse_many(s: &str) -> Result<Vec<Card>, ParseCardError> {
        s.split_whitespace()
            .flat_map(|word| {
                let chars = word.chars().collect::<Vec<_>>();
                chars
                    .chunks(2)
                    .map(|token| token.iter().collect::<String>())
                    .collect::<Vec<_>>()
            })
            .map(|token| token.parse())
            .collect()
    }
}

impl TryFrom<u8> for Card {
    type Error = ParseCardError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Card::from_index(index as usize).ok_or_else(|| ParseCardError::new(index.to_string()))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => {
                let rank = Rank::try_from(r).map_err(|_| ParseCardError::new(s))?;
                let suit = Suit::try_from(u).map_err(|_| ParseCardError::new(s))?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(ParseCardError::new(s)),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card rank, from the lowest to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Rank {
    Deuce = 0,
    Trey,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

const RANKS: [Rank; 13] = {
    use Rank::*;
    [
        Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
    ]
};

const RANK_CHARS: [u8; 13] = *b"23456789TJQKA";

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        RANKS.into_iter()
    }

    fn from_index(index: u8) -> Rank {
        RANKS[index as usize]
    }

    fn to_char(self) -> char {
        RANK_CHARS[self as usize] as char
    }
}

impl TryFrom<char> for Rank {
    type Error = ParseCardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&r| r as char == upper)
            .map(|pos| RANKS[pos])
            .ok_or_else(|| ParseCardError::new(c))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit, in deck order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Suit {
    Clubs = 0,
    Diamonds,
    Hearts,
    Spades,
}

const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

const SUIT_CHARS: [u8; 4] = *b"cdhs";

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        SUITS.into_iter()
    }

    fn to_char(self) -> char {
        SUIT_CHARS[self as usize] as char
    }
}

impl TryFrom<char> for Suit {
    type Error = ParseCardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let lower = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&s| s as char == lower)
            .map(|pos| SUITS[pos])
            .ok_or_else(|| ParseCardError::new(c))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Creates a deck with all the cards that are not in the `dead` set.
    ///
    /// Cards are in ascending index order.
    pub fn without(dead: CardSet) -> Self {
        Self {
            cards: dead.complement().iter().collect(),
        }
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// The cards in this deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
