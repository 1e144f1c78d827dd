// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use headsup_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = "Kd".parse::<Card>().unwrap();
//! assert_eq!(ah.to_string(), "Ah");
//! assert_eq!(kd.rank(), Rank::King);
//! ```
//!
//! a [CardSet] type that stores a set of cards in a 52 bits mask:
//!
//! ```
//! # use headsup_cards::{Card, CardSet};
//! let hand = "AhKh".parse::<CardSet>().unwrap();
//! let board = "QhJhTh".parse::<CardSet>().unwrap();
//! assert!(hand.is_disjoint(board));
//! assert_eq!((hand | board).len(), 5);
//! assert_eq!((hand | board).complement().len(), 47);
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and listing the cards that are
//! still live once some cards are known:
//!
//! ```
//! # use headsup_cards::{CardSet, Deck};
//! let dead = "AhKh".parse::<CardSet>().unwrap();
//! let deck = Deck::without(dead);
//! assert_eq!(deck.count(), 50);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};

mod set;
pub use set::{CardSet, Iter};
