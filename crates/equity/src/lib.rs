// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup Poker exhaustive hand vs hand equity.
//!
//! Equities are computed by enumerating all the boards that can be dealt
//! once the hole cards and the known board are removed from the deck, and by
//! comparing the two hands on each board:
//!
//! ```
//! # use headsup_equity::*;
//! # use headsup_cards::CardSet;
//! let aces = "AhAd".parse::<Hand>().unwrap();
//! let kings = "KsKc".parse::<Hand>().unwrap();
//! let flop = "7h8d2c".parse::<Board>().unwrap();
//!
//! let outcome = score(aces, kings, flop, CardSet::EMPTY).unwrap();
//! assert_eq!(outcome.total(), 990);
//! assert!(outcome.equity().unwrap() > 85.0);
//! ```
//!
//! The [MatrixBuilder] computes the equities of all the 1326 starting hands
//! against each other into an [EquityMatrix] that can be saved with the
//! [export] functions:
//!
//! ```
//! # use headsup_equity::*;
//! let config = BuildConfig {
//!     rows: 0..2,
//!     cols: 1324..1326,
//!     board: "7h8d9c".parse().unwrap(),
//!     ..BuildConfig::default()
//! };
//!
//! let mut matrix = EquityMatrix::new();
//! let report = MatrixBuilder::new(config).unwrap().build(&mut matrix);
//! assert_eq!(report.computed, 4);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod boards;
pub use boards::{Boards, enumerate, nck};

mod builder;
pub use builder::{BuildConfig, BuildReport, CancelToken, CellFailure, MatrixBuilder};

mod error;
pub use error::{Error, Result};

pub mod export;

mod hand;
pub use hand::{Board, Hand, distinct_cards};

mod index;
pub use index::{HandIndex, NUM_HANDS};

mod matchup;
pub use matchup::{Matchup, score};

mod matrix;
pub use matrix::{Cell, EquityMatrix};

mod outcome;
pub use outcome::{HandTotals, Outcome};
