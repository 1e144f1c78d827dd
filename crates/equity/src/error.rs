// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity errors.
use thiserror::Error;

use headsup_cards::{Card, ParseCardError};

/// Equity computation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A token doesn't denote one of the 52 cards.
    #[error(transparent)]
    InvalidCard(#[from] ParseCardError),
    /// A card is dealt more than once.
    #[error("card {0} is dealt more than once")]
    CardConflict(Card),
    /// Not enough live cards to complete a board.
    #[error("cannot draw {need} cards from {live} live cards")]
    ExhaustedDeck {
        /// The number of cards requested.
        need: usize,
        /// The number of live cards.
        live: usize,
    },
    /// There are no boards to compute an equity from.
    #[error("no boards to compute equity")]
    EmptyEnumeration,
    /// A hand index is outside 0..1326.
    #[error("hand index {0} is out of range")]
    IndexOutOfRange(usize),
    /// A board that is not empty, a flop, a turn, or a river.
    #[error("invalid board with {0} cards, expected 0, 3, 4, or 5 cards")]
    InvalidBoard(usize),
    /// A hand without exactly two cards.
    #[error("invalid hand with {0} cards, expected 2 cards")]
    InvalidHand(usize),
}

/// Equity computation result.
pub type Result<T> = std::result::Result<T, Error>;
