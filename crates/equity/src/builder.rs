// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity matrix builder.
use log::{info, warn};
use parking_lot::Mutex;
use std::{
    num::NonZeroUsize,
    ops::Range,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
};

use headsup_cards::CardSet;

use crate::{
    Error, Result,
    hand::{Board, Hand},
    index::{HandIndex, NUM_HANDS},
    matchup,
    matrix::{Cell, EquityMatrix},
};

/// A token to stop a running build.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the build to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Checks if the build should stop.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Matrix build config.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// The rows hand indices.
    pub rows: Range<usize>,
    /// The columns hand indices.
    pub cols: Range<usize>,
    /// The fixed board for all matchups.
    pub board: Board,
    /// The number of worker tasks.
    pub tasks: usize,
    /// Fill the cells below the diagonal from their transpose.
    pub mirror: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            rows: 0..NUM_HANDS,
            cols: 0..NUM_HANDS,
            board: Board::default(),
            tasks: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            mirror: false,
        }
    }
}

/// A cell that failed scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    /// The row hand index.
    pub row: HandIndex,
    /// The column hand index.
    pub col: HandIndex,
    /// The scoring error.
    pub error: Error,
}

/// The summary of a build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Cells scored in this build.
    pub computed: usize,
    /// Cells that were already done.
    pub skipped: usize,
    /// Cells marked as overlapping.
    pub overlap: usize,
    /// Cells filled from their transpose.
    pub mirrored: usize,
    /// Cells that failed.
    pub failures: Vec<CellFailure>,
    /// The build was cancelled before completion.
    pub cancelled: bool,
}

/// Per task counters.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    computed: usize,
    skipped: usize,
    overlap: usize,
}

/// Computes the first hand equity against the second on a board.
type Scorer = fn(Hand, Hand, Board) -> Result<f64>;

fn exhaustive_equity(first: Hand, second: Hand, board: Board) -> Result<f64> {
    matchup::score(first, second, board, CardSet::EMPTY)?.equity()
}

/// Fills an [EquityMatrix] with the equities of a range of matchups.
#[derive(Debug)]
pub struct MatrixBuilder {
    config: BuildConfig,
    cancel: CancelToken,
    scorer: Scorer,
}

impl MatrixBuilder {
    /// Creates a builder, fails with [Error::IndexOutOfRange] if the rows or
    /// columns are not a range in 0..1326.
    pub fn new(config: BuildConfig) -> Result<Self> {
        for range in [&config.rows, &config.cols] {
            if range.end > NUM_HANDS {
                return Err(Error::IndexOutOfRange(range.end));
            }

            if range.start > range.end {
                return Err(Error::IndexOutOfRange(range.start));
            }
        }

        Ok(Self {
            config,
            cancel: CancelToken::new(),
            scorer: exhaustive_equity,
        })
    }

    #[cfg(test)]
    fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Uses the given cancel token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The token that cancels this builder.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Computes all the cells in range that are not done.
    pub fn build(&self, matrix: &mut EquityMatrix) -> BuildReport {
        let BuildConfig {
            rows,
            cols,
            board,
            tasks,
            mirror,
        } = &self.config;

        info!(
            "Building rows {rows:?} cols {cols:?} board [{board}] with {tasks} tasks mirror {mirror}"
        );

        // Interleave rows so that tasks get similar work when mirroring.
        let num_tasks = (*tasks).clamp(1, rows.len().max(1));
        let mut assigned = (0..num_tasks).map(|_| Vec::new()).collect::<Vec<_>>();
        let row_indices = HandIndex::all().skip(rows.start).take(rows.len());
        for (n, (row, cells)) in row_indices
            .zip(matrix.rows_mut(rows.clone()).chunks_mut(EquityMatrix::SIZE))
            .enumerate()
        {
            assigned[n % num_tasks].push((row, cells));
        }

        let failures = Mutex::new(Vec::new());
        let rows_done = AtomicUsize::new(0);
        let mut tallies = vec![Tally::default(); num_tasks];

        thread::scope(|s| {
            for (task_rows, tally) in assigned.into_iter().zip(tallies.iter_mut()) {
                let failures = &failures;
                let rows_done = &rows_done;

                s.spawn(move || {
                    for (row, cells) in task_rows {
                        if !self.build_row(row, cells, tally, failures) {
                            break;
                        }

                        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                        info!("Row {row} {} done {done}/{}", row.hand(), self.config.rows.len());
                    }
                });
            }
        });

        let mut report = tallies.into_iter().fold(BuildReport::default(), |mut r, t| {
            r.computed += t.computed;
            r.skipped += t.skipped;
            r.overlap += t.overlap;
            r
        });

        report.failures = failures.into_inner();
        report.failures.sort_by_key(|f| (f.row, f.col));

        if *mirror {
            report.mirrored = self.mirror(matrix);
        }

        report.cancelled = self.cancel.is_cancelled();

        info!(
            "Build {}: computed {} skipped {} overlap {} mirrored {} failed {}",
            if report.cancelled { "cancelled" } else { "done" },
            report.computed,
            report.skipped,
            report.overlap,
            report.mirrored,
            report.failures.len()
        );

        report
    }

    /// Computes a row cells, returns false if the build was cancelled.
    fn build_row(
        &self,
        row: HandIndex,
        cells: &mut [Cell],
        tally: &mut Tally,
        failures: &Mutex<Vec<CellFailure>>,
    ) -> bool {
        let BuildConfig { cols, board, .. } = &self.config;
        let hand = row.hand();

        for col in HandIndex::all().skip(cols.start).take(cols.len()) {
            if self.cancel.is_cancelled() {
                return false;
            }

            let cell = &mut cells[col.index()];
            if cell.is_done() {
                tally.skipped += 1;
                continue;
            }

            if self.is_mirrored(row, col) {
                continue;
            }

            let other = col.hand();
            if row == col || overlaps(hand, other, *board) {
                *cell = Cell::Overlap;
                tally.overlap += 1;
                continue;
            }

            match (self.scorer)(hand, other, *board) {
                Ok(equity) => {
                    *cell = Cell::Equity(equity as f32);
                    tally.computed += 1;
                }
                Err(error) => {
                    warn!("Cell {row},{col} {hand} vs {other} failed: {error}");
                    *cell = Cell::Failed;
                    failures.lock().push(CellFailure { row, col, error });
                }
            }
        }

        true
    }

    /// Checks if a cell is filled from its transpose.
    fn is_mirrored(&self, row: HandIndex, col: HandIndex) -> bool {
        let BuildConfig {
            rows, cols, mirror, ..
        } = &self.config;

        *mirror
            && col < row
            && rows.contains(&col.index())
            && cols.contains(&row.index())
    }

    /// Fills the mirrored cells from their computed transpose.
    fn mirror(&self, matrix: &mut EquityMatrix) -> usize {
        let BuildConfig { rows, cols, .. } = &self.config;
        let mut mirrored = 0;

        for row in HandIndex::all().skip(rows.start).take(rows.len()) {
            for col in HandIndex::all().skip(cols.start).take(cols.len()) {
                if !self.is_mirrored(row, col) || matrix.get(row, col).is_done() {
                    continue;
                }

                let cell = match matrix.get(col, row) {
                    Cell::Equity(e) => Cell::Equity(100.0 - e),
                    Cell::Overlap => Cell::Overlap,
                    _ => continue,
                };

                matrix.set(row, col, cell);
                mirrored += 1;
            }
        }

        mirrored
    }
}

/// Checks if two hands cannot be dealt together with the board.
fn overlaps(first: Hand, second: Hand, board: Board) -> bool {
    !first.is_disjoint(&second) || !board.cards().is_disjoint(first.set() | second.set())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn idx(i: usize) -> HandIndex {
        HandIndex::new(i).unwrap()
    }

    fn builder(rows: Range<usize>, cols: Range<usize>, cards: &str, mirror: bool) -> MatrixBuilder {
        MatrixBuilder::new(BuildConfig {
            rows,
            cols,
            board: board(cards),
            tasks: 3,
            mirror,
        })
        .unwrap()
    }

    #[test]
    fn build_range() {
        // 2c3c 2c4c 2c5c vs JsQs JsKs JsAs QsKs QsAs KsAs
        let b = builder(0..3, 1320..1326, "8d8h9c", false);
        let mut m = EquityMatrix::new();

        let report = b.build(&mut m);
        assert_eq!(report.computed, 18);
        assert_eq!(report.overlap, 0);
        assert!(report.failures.is_empty());
        assert!(!report.cancelled);

        for i in 0..3 {
            for j in 1320..1326 {
                let expected = matchup::score(
                    idx(i).hand(),
                    idx(j).hand(),
                    board("8d8h9c"),
                    CardSet::EMPTY,
                )
                .unwrap()
                .equity()
                .unwrap();

                assert_eq!(m.get(idx(i), idx(j)), Cell::Equity(expected as f32));
            }
        }

        // Cells out of range are untouched.
        assert_eq!(m.count(Cell::is_done), 18);
        assert_eq!(m.get(idx(3), idx(1320)), Cell::Pending);
    }

    #[test]
    fn build_is_resumable() {
        let b = builder(0..3, 1320..1326, "8d8h9c", false);
        let mut m = EquityMatrix::new();
        m.set(idx(1), idx(1322), Cell::Equity(12.0));

        let report = b.build(&mut m);
        assert_eq!(report.computed, 17);
        assert_eq!(report.skipped, 1);
        assert_eq!(m.get(idx(1), idx(1322)), Cell::Equity(12.0));

        let copy = m.clone();
        let report = b.build(&mut m);
        assert_eq!(report.computed, 0);
        assert_eq!(report.skipped, 18);
        assert_eq!(m, copy);
    }

    #[test]
    fn overlaps_and_diagonal() {
        // All hands share the 2c.
        let mut m = EquityMatrix::new();
        let report = builder(0..3, 0..3, "8d8h9c", false).build(&mut m);
        assert_eq!(report.overlap, 9);
        assert_eq!(report.computed, 0);
        assert_eq!(m.get(idx(1), idx(1)), Cell::Overlap);

        // The 3c on the board collides with 2c3c.
        let mut m = EquityMatrix::new();
        let report = builder(0..3, 1320..1326, "3c8h9d", false).build(&mut m);
        assert_eq!(report.overlap, 6);
        assert_eq!(report.computed, 12);
        assert!(m.row(idx(0))[1320..].iter().all(|c| *c == Cell::Overlap));
    }

    #[test]
    fn failed_cells_are_retried() {
        // Fails all the matchups against KsAs.
        fn failing(first: Hand, second: Hand, board: Board) -> Result<f64> {
            if HandIndex::of(second).index() == NUM_HANDS - 1 {
                Err(Error::EmptyEnumeration)
            } else {
                exhaustive_equity(first, second, board)
            }
        }

        let mut m = EquityMatrix::new();
        let report = builder(0..3, 1320..1326, "8d8h9c", false)
            .with_scorer(failing)
            .build(&mut m);

        assert_eq!(report.computed, 15);
        assert!(!report.cancelled);
        assert_eq!(report.failures.len(), 3);
        assert_eq!(
            report.failures[0],
            CellFailure {
                row: idx(0),
                col: idx(NUM_HANDS - 1),
                error: Error::EmptyEnumeration,
            }
        );
        assert!(
            (0..3).all(|row| m.get(idx(row), idx(NUM_HANDS - 1)) == Cell::Failed)
        );

        // Failed cells reload as pending and the next build computes them.
        let mut buf = Vec::new();
        export::write_csv(&m, &mut buf).unwrap();
        let mut m = export::read_csv(buf.as_slice()).unwrap();
        assert_eq!(m.get(idx(1), idx(NUM_HANDS - 1)), Cell::Pending);

        let report = builder(0..3, 1320..1326, "8d8h9c", false).build(&mut m);
        assert_eq!(report.computed, 3);
        assert_eq!(report.skipped, 15);
        assert!(report.failures.is_empty());
        assert_eq!(m.count(Cell::is_done), 18);
    }

    #[test]
    fn mirror_fills_transpose() {
        // JsQs JsKs JsAs QsKs QsAs KsAs
        let mut m = EquityMatrix::new();
        let report = builder(1320..1326, 1320..1326, "2c3d4h", true).build(&mut m);
        assert_eq!(report.computed, 3);
        assert_eq!(report.overlap, 18);
        assert_eq!(report.mirrored, 15);
        assert_eq!(m.count(Cell::is_done), 36);

        let mut full = EquityMatrix::new();
        builder(1320..1326, 1320..1326, "2c3d4h", false).build(&mut full);

        for i in 1320..1326 {
            for j in 1320..1326 {
                let (i, j) = (idx(i), idx(j));
                match (m.get(i, j), full.get(i, j)) {
                    (Cell::Equity(a), Cell::Equity(b)) => {
                        assert!((a - b).abs() < 1e-3, "{i},{j} {a} != {b}");
                        let sum = a + m.get(j, i).equity().unwrap();
                        assert!((sum - 100.0).abs() < 1e-3);
                    }
                    (a, b) => assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn cancelled_build() {
        let cancel = CancelToken::new();
        let b = builder(0..3, 1320..1326, "8d8h9c", false).with_cancel(cancel.clone());
        cancel.cancel();
        assert!(b.cancel_token().is_cancelled());

        let mut m = EquityMatrix::new();
        let report = b.build(&mut m);
        assert!(report.cancelled);
        assert_eq!(report.computed, 0);
        assert_eq!(m, EquityMatrix::new());
    }

    #[test]
    fn invalid_ranges() {
        let config = BuildConfig {
            rows: 0..NUM_HANDS + 1,
            ..BuildConfig::default()
        };
        assert_eq!(
            MatrixBuilder::new(config).unwrap_err(),
            Error::IndexOutOfRange(NUM_HANDS + 1)
        );

        #[allow(clippy::reversed_empty_ranges)]
        let config = BuildConfig {
            cols: 10..5,
            ..BuildConfig::default()
        };
        assert_eq!(
            MatrixBuilder::new(config).unwrap_err(),
            Error::IndexOutOfRange(10)
        );

        let config = BuildConfig::default();
        assert!(config.tasks > 0);
        assert_eq!(config.rows, 0..NUM_HANDS);
        assert!(MatrixBuilder::new(config).is_ok());
    }

    #[test]
    fn empty_range() {
        let mut m = EquityMatrix::new();
        let report = builder(5..5, 0..NUM_HANDS, "", false).build(&mut m);
        assert_eq!(report, BuildReport::default());
    }
}
