// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Board completions enumeration.
//!
//! The [Boards] iterator goes through all the k-subsets of the live cards
//! using Algorithm L from TAOCP 4a, and uses the combinatorial number system
//! to start from any position so that the boards can be split into disjoint
//! ranges for parallel tasks.
use headsup_cards::{Card, CardSet, Deck};

use crate::{Error, Result};

/// Creates table for nck(n, k) for n <= 52 and k <= 52.
const fn make_nck() -> [[u64; 53]; 53] {
    let mut t = [[0u64; 53]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; 53]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= Deck::SIZE, "n={n} must be 0 <= n <= 52");

    if k > n { 0 } else { NCKS[n][k] as usize }
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
fn nth_ksubset(mut n: usize, k: usize) -> Vec<usize> {
    let mut out = vec![0; k];
    for i in (1..=k).rev() {
        // Largest c such that nck(c, i) <= n.
        let mut c = i - 1;
        while nck(c + 1, i) <= n {
            c += 1;
        }

        out[i - 1] = c;
        n -= nck(c, i);
    }

    out
}

/// Returns an iterator over all the `need` cards boards that can be drawn
/// from the cards that are not in `dead`.
///
/// Fails with [Error::ExhaustedDeck] if there are less than `need` live cards.
pub fn enumerate(dead: CardSet, need: usize) -> Result<Boards> {
    let deck = Deck::without(dead);
    if need > deck.count() {
        return Err(Error::ExhaustedDeck {
            need,
            live: deck.count(),
        });
    }

    let total = nck(deck.count(), need);
    Ok(Boards::with_range(deck.into_iter().collect(), need, 0, total))
}

/// An iterator over a range of k-cards boards.
///
/// Boards are visited in colexicographic order of the live cards positions,
/// the iterator can be cloned to restart from the current position.
#[derive(Debug, Clone)]
pub struct Boards {
    /// The live cards.
    cards: Vec<Card>,
    /// Algorithm L state, c[1..=k] are the cards positions followed by two
    /// sentinels c[k+1] = n and c[k+2] = 0.
    c: Vec<usize>,
    /// The board size.
    k: usize,
    /// The position of the next board.
    pos: usize,
    /// One past the last board position.
    end: usize,
}

impl Boards {
    fn with_range(cards: Vec<Card>, k: usize, start: usize, end: usize) -> Self {
        let mut c = vec![0usize; k + 3];
        if start < end {
            for (i, pos) in nth_ksubset(start, k).into_iter().enumerate() {
                c[i + 1] = pos;
            }
        }

        c[k + 1] = cards.len();

        Self {
            cards,
            c,
            k,
            pos: start,
            end,
        }
    }

    /// The positions range of the boards that are still to be visited.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.pos..self.end
    }

    /// Splits the remaining boards into at most `shards` disjoint ranges.
    ///
    /// The ranges are contiguous and in order, chaining them visits the same
    /// boards as this iterator.
    ///
    /// Panics if shards is 0.
    pub fn split(self, shards: usize) -> Vec<Boards> {
        assert!(shards > 0, "shards must be greater than 0");

        let remaining = self.end - self.pos;
        let per_shard = remaining.div_ceil(shards).max(1);

        (self.pos..self.end)
            .step_by(per_shard)
            .map(|start| {
                let end = (start + per_shard).min(self.end);
                Boards::with_range(self.cards.clone(), self.k, start, end)
            })
            .collect()
    }

    /// Moves the Algorithm L state to the next k-subset.
    #[inline]
    fn advance(&mut self) {
        let c = &mut self.c;
        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        c[j] += 1;
    }
}

impl Iterator for Boards {
    type Item = CardSet;

    #[inline]
    fn next(&mut self) -> Option<CardSet> {
        if self.pos >= self.end {
            return None;
        }

        let board = self.c[1..=self.k]
            .iter()
            .map(|&pos| self.cards[pos])
            .collect::<CardSet>();

        self.pos += 1;
        if self.pos < self.end {
            self.advance();
        }

        Some(board)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.pos;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<CardSet> {
        let start = self.pos.saturating_add(n).min(self.end);
        let cards = std::mem::take(&mut self.cards);
        *self = Boards::with_range(cards, self.k, start, self.end);
        self.next()
    }
}

impl ExactSizeIterator for Boards {}
