// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand vs hand equity matrix.
use std::ops::Range;

use crate::index::{HandIndex, NUM_HANDS};

/// A matrix cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Cell {
    /// Not computed yet.
    #[default]
    Pending,
    /// The row hand equity against the column hand.
    Equity(f32),
    /// The hands share a card or collide with the board.
    Overlap,
    /// The matchup scoring failed.
    Failed,
}

impl Cell {
    /// The cell equity if computed.
    pub fn equity(&self) -> Option<f32> {
        match self {
            Cell::Equity(e) => Some(*e),
            _ => None,
        }
    }

    /// Checks if this cell doesn't need to be computed again.
    pub fn is_done(&self) -> bool {
        matches!(self, Cell::Equity(_) | Cell::Overlap)
    }
}

/// The equities of all the row hands against all the column hands.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityMatrix {
    cells: Vec<Cell>,
}

impl Default for EquityMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl EquityMatrix {
    /// The number of rows and columns.
    pub const SIZE: usize = NUM_HANDS;

    /// Creates a matrix with all cells pending.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Pending; Self::SIZE * Self::SIZE],
        }
    }

    /// Returns the cell for the row and column hands.
    pub fn get(&self, row: HandIndex, col: HandIndex) -> Cell {
        self.cells[row.index() * Self::SIZE + col.index()]
    }

    /// Sets the cell for the row and column hands.
    pub fn set(&mut self, row: HandIndex, col: HandIndex, cell: Cell) {
        self.cells[row.index() * Self::SIZE + col.index()] = cell;
    }

    /// The cells of a row.
    pub fn row(&self, row: HandIndex) -> &[Cell] {
        let start = row.index() * Self::SIZE;
        &self.cells[start..start + Self::SIZE]
    }

    /// Iterates all the rows in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> {
        self.cells.chunks_exact(Self::SIZE)
    }

    /// The mutable cells of a range of rows, one row after the other.
    pub(crate) fn rows_mut(&mut self, rows: Range<usize>) -> &mut [Cell] {
        &mut self.cells[rows.start * Self::SIZE..rows.end * Self::SIZE]
    }

    /// Counts the cells matching a predicate.
    pub fn count<F>(&self, f: F) -> usize
    where
        F: Fn(&Cell) -> bool,
    {
        self.cells.iter().filter(|c| f(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> HandIndex {
        HandIndex::new(i).unwrap()
    }

    #[test]
    fn new_matrix_is_pending() {
        let m = EquityMatrix::default();
        assert_eq!(m.rows().len(), NUM_HANDS);
        assert!(m.rows().all(|r| r.len() == NUM_HANDS));
        assert_eq!(m.count(|c| *c == Cell::Pending), NUM_HANDS * NUM_HANDS);
    }

    #[test]
    fn get_and_set() {
        let mut m = EquityMatrix::new();
        m.set(idx(3), idx(1000), Cell::Equity(42.5));
        m.set(idx(1000), idx(3), Cell::Overlap);

        assert_eq!(m.get(idx(3), idx(1000)).equity(), Some(42.5));
        assert_eq!(m.get(idx(1000), idx(3)), Cell::Overlap);
        assert_eq!(m.row(idx(3))[1000], Cell::Equity(42.5));
        assert_eq!(m.count(Cell::is_done), 2);

        let rows = m.rows_mut(3..5);
        assert_eq!(rows.len(), 2 * NUM_HANDS);
        rows[NUM_HANDS] = Cell::Failed;
        assert_eq!(m.get(idx(4), idx(0)), Cell::Failed);
        assert!(!Cell::Failed.is_done());
        assert!(!Cell::Pending.is_done());
    }
}
