// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! It provides a [HandValue::eval_set] method that computes a hand value
//! directly from a [CardSet](headsup_cards::CardSet), useful for computing
//! odds over millions of boards, and a [HandValue::eval] method for a slice of
//! cards.
//!
//! Hand values are totally ordered, a greater value is a better hand and
//! equal values split the pot.

mod value;
pub use value::{HandRank, HandValue};
