// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity matrix CSV and index files.
//!
//! The CSV file has one line per row hand with one field per column hand,
//! equities are written with two decimals, overlapping hands with `-`, and
//! cells that have not been computed are left empty. The board of the
//! matrix is saved next to the CSV file so that a resumed build can check it.
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    hand::Board,
    index::HandIndex,
    matrix::{Cell, EquityMatrix},
};

const OVERLAP: &str = "-";

/// Writes the matrix as CSV.
pub fn write_csv<W: Write>(matrix: &EquityMatrix, mut w: W) -> Result<()> {
    let mut line = String::with_capacity(EquityMatrix::SIZE * 7);

    for row in matrix.rows() {
        line.clear();

        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                line.push(',');
            }

            match cell {
                Cell::Equity(e) => line.push_str(&format!("{e:.2}")),
                Cell::Overlap => line.push_str(OVERLAP),
                Cell::Pending | Cell::Failed => {}
            }
        }

        writeln!(w, "{line}")?;
    }

    w.flush()?;
    Ok(())
}

/// Reads a matrix from CSV, empty fields are loaded as pending cells.
pub fn read_csv<R: BufRead>(r: R) -> Result<EquityMatrix> {
    let mut matrix = EquityMatrix::new();
    let mut rows = 0;

    for (n, line) in r.lines().enumerate() {
        let line_no = n + 1;
        let line = line.with_context(|| format!("line {line_no}"))?;

        let row = HandIndex::new(n).map_err(|_| {
            anyhow!("line {line_no}: too many rows, expected {}", EquityMatrix::SIZE)
        })?;

        let mut cols = 0;
        for (col, (field, col_idx)) in line.split(',').zip(HandIndex::all()).enumerate() {
            let cell = match field.trim() {
                "" => Cell::Pending,
                OVERLAP => Cell::Overlap,
                value => {
                    let e = value.parse::<f32>().map_err(|e| {
                        anyhow!("line {line_no} field {}: invalid equity {value:?} {e}", col + 1)
                    })?;

                    if !(0.0..=100.0).contains(&e) {
                        bail!("line {line_no} field {}: equity {e} out of range", col + 1);
                    }

                    Cell::Equity(e)
                }
            };

            matrix.set(row, col_idx, cell);
            cols += 1;
        }

        let fields = line.split(',').count();
        if cols != EquityMatrix::SIZE || fields != EquityMatrix::SIZE {
            bail!(
                "line {line_no}: found {fields} fields, expected {}",
                EquityMatrix::SIZE
            );
        }

        rows += 1;
    }

    if rows != EquityMatrix::SIZE {
        bail!("found {rows} rows, expected {}", EquityMatrix::SIZE);
    }

    Ok(matrix)
}

/// Writes the index file, one `<index> <code>` line per hand.
pub fn write_index<W: Write>(mut w: W) -> Result<()> {
    for idx in HandIndex::all() {
        writeln!(w, "{idx} {}", idx.code())?;
    }

    w.flush()?;
    Ok(())
}

/// Saves the matrix to a CSV file.
pub fn save_csv(matrix: &EquityMatrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(matrix, BufWriter::new(file)).with_context(|| format!("write {}", path.display()))
}

/// Loads a matrix from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<EquityMatrix> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_csv(BufReader::new(file)).with_context(|| format!("read {}", path.display()))
}

/// The board file of a CSV file, e.g. `hvh.board` for `hvh.csv`.
pub fn board_path(csv: impl AsRef<Path>) -> PathBuf {
    csv.as_ref().with_extension("board")
}

/// Saves the board of the matrix in the CSV file.
pub fn save_board(board: Board, csv: impl AsRef<Path>) -> Result<()> {
    let path = board_path(csv);
    fs::write(&path, format!("{board}\n")).with_context(|| format!("write {}", path.display()))
}

/// Loads the board of the matrix in the CSV file, `None` if it was not saved.
pub fn load_board(csv: impl AsRef<Path>) -> Result<Option<Board>> {
    let path = board_path(csv);
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let board = text
        .trim()
        .parse::<Board>()
        .with_context(|| format!("parse {}", path.display()))?;

    Ok(Some(board))
}

/// Saves the index file.
pub fn save_index(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_index(BufWriter::new(file)).with_context(|| format!("write {}", path.display()))
}
