// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A set of cards stored as a 52 bits mask.
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign, Sub},
    str::FromStr,
};

use crate::{Card, ParseCardError, Suit};

/// Mask with the bits of all 52 cards set.
const UNIVERSE: u64 = (1 << 52) - 1;

/// A set of cards.
///
/// Each card is a bit in a 52 bits mask (see [Card::index]), set operations
/// are bitwise operations and a set can never contain the same card twice.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// The set with all 52 cards.
    pub const FULL: CardSet = CardSet(UNIVERSE);

    /// Creates a set from a bit mask, bits above the 52nd are ignored.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & UNIVERSE)
    }

    /// Adds a card to the set, returns false if the card was already there.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        let absent = !self.contains(card);
        self.0 |= card.mask();
        absent
    }

    /// Removes a card from the set.
    #[inline]
    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.mask();
    }

    /// Checks if the set contains the given card.
    #[inline]
    pub const fn contains(&self, card: Card) -> bool {
        self.0 & card.mask() != 0
    }

    /// The number of cards in the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The cards that are in this set or in the other.
    #[inline]
    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    /// The cards that are both in this set and in the other.
    #[inline]
    pub const fn intersection(self, other: CardSet) -> CardSet {
        CardSet(self.0 & other.0)
    }

    /// The cards in this set that are not in the other.
    #[inline]
    pub const fn difference(self, other: CardSet) -> CardSet {
        CardSet(self.0 & !other.0)
    }

    /// The cards of the deck that are not in this set.
    #[inline]
    pub const fn complement(self) -> CardSet {
        CardSet(!self.0 & UNIVERSE)
    }

    /// Checks if this set and the other have no cards in common.
    #[inline]
    pub const fn is_disjoint(self, other: CardSet) -> bool {
        self.0 & other.0 == 0
    }

    /// The card with the lowest index in this set.
    pub fn first(self) -> Option<Card> {
        self.iter().next()
    }

    /// The 13 bits ranks mask of the cards of the given suit.
    #[inline]
    pub const fn suit_ranks(self, suit: Suit) -> u32 {
        ((self.0 >> (suit as u32 * 13)) & 0x1fff) as u32
    }

    /// Iterates the cards in ascending index order.
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

/// Iterator over the cards of a [CardSet].
#[derive(Debug, Clone)]
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }

        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Card::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Card> for CardSet {
    fn from(card: Card) -> Self {
        CardSet(card.mask())
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Card> for CardSet {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.0 |= card.mask();
        }
    }
}

impl BitOr for CardSet {
    type Output = CardSet;

    fn bitor(self, rhs: CardSet) -> CardSet {
        self.union(rhs)
    }
}

impl BitOrAssign for CardSet {
    fn bitor_assign(&mut self, rhs: CardSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CardSet {
    type Output = CardSet;

    fn bitand(self, rhs: CardSet) -> CardSet {
        self.intersection(rhs)
    }
}

impl Sub for CardSet {
    type Output = CardSet;

    fn sub(self, rhs: CardSet) -> CardSet {
        self.difference(rhs)
    }
}

impl TryFrom<u64> for CardSet {
    type Error = ParseCardError;

    /// Fails if a bit above the 52nd is set.
    fn try_from(bits: u64) -> Result<Self, Self::Error> {
        if bits & !UNIVERSE == 0 {
            Ok(CardSet(bits))
        } else {
            Err(ParseCardError::new(format!("{bits:#x}")))
        }
    }
}

impl From<CardSet> for u64 {
    fn from(cards: CardSet) -> u64 {
        cards.0
    }
}

impl FromStr for CardSet {
    type Err = ParseCardError;

    /// Parses card tokens like `"AhKd"`, duplicated tokens collapse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Card::parse_many(s)?.into_iter().collect())
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.iter() {
            write!(f, "{card}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardSet({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, Rank};

    fn set(s: &str) -> CardSet {
        s.parse().unwrap()
    }

    #[test]
    fn insert_contains() {
        let mut cards = CardSet::default();
        assert!(cards.is_empty());

        let ah = Card::new(Rank::Ace, Suit::Hearts);
        assert!(cards.insert(ah));
        assert!(!cards.insert(ah));
        assert!(cards.contains(ah));
        assert_eq!(cards.len(), 1);

        cards.remove(ah);
        assert!(cards.is_empty());
    }

    #[test]
    fn set_operations() {
        let a = set("AhKhQh");
        let b = set("QhJh");

        assert_eq!(a | b, set("AhKhQhJh"));
        assert_eq!(a & b, set("Qh"));
        assert_eq!(a - b, set("AhKh"));
        assert!(!a.is_disjoint(b));
        assert!((a - b).is_disjoint(b));

        let rest = a.complement();
        assert_eq!(rest.len(), Deck::SIZE - 3);
        assert!(rest.is_disjoint(a));
        assert_eq!(rest | a, CardSet::FULL);
        assert_eq!(CardSet::FULL.complement(), CardSet::EMPTY);
        assert_eq!(CardSet::from_bits(u64::MAX), CardSet::FULL);
    }

    #[test]
    fn iter_ascending() {
        let cards = CardSet::FULL.iter().collect::<Vec<_>>();
        assert_eq!(cards, Deck::default().cards());

        let cards = set("As2c Td");
        assert_eq!(cards.iter().len(), 3);
        assert_eq!(cards.first(), "2c".parse().ok());
        assert_eq!(cards.to_string(), "2cTdAs");
        assert_eq!(format!("{cards:?}"), "CardSet(2cTdAs)");
    }

    #[test]
    fn suit_ranks() {
        let cards = set("2cAcKdAs5s");
        assert_eq!(cards.suit_ranks(Suit::Clubs), 1 | 1 << 12);
        assert_eq!(cards.suit_ranks(Suit::Diamonds), 1 << 11);
        assert_eq!(cards.suit_ranks(Suit::Hearts), 0);
        assert_eq!(cards.suit_ranks(Suit::Spades), 1 << 3 | 1 << 12);
    }

    #[test]
    fn serde_checks_mask() {
        let cards = set("2cAs");
        let json = serde_json::to_string(&cards).unwrap();
        assert_eq!(json, (1u64 | 1 << 51).to_string());
        assert_eq!(serde_json::from_str::<CardSet>(&json).unwrap(), cards);

        assert!(serde_json::from_str::<CardSet>(&(1u64 << 52).to_string()).is_err());
        assert!(CardSet::try_from(u64::MAX).is_err());
        assert_eq!(CardSet::try_from((1u64 << 52) - 1), Ok(CardSet::FULL));
    }

    #[test]
    fn parse_error() {
        let err = "AhXx".parse::<CardSet>().unwrap_err();
        assert_eq!(err.token(), "Xx");
        assert_eq!(set("AhAh").len(), 1);
    }
}
