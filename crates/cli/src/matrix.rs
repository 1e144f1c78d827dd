// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity matrix command.
use anyhow::{Result, bail};
use clap::Args;
use log::{info, warn};
use std::{
    ops::Range,
    path::{Path, PathBuf},
};
use tokio::{signal, task};

use headsup_equity::{Board, BuildConfig, EquityMatrix, MatrixBuilder, NUM_HANDS, export};

/// Matrix arguments.
#[derive(Debug, Args)]
pub struct MatrixArgs {
    /// The rows hand indices, e.g. 0..100.
    #[clap(long, default_value = "0..1326", value_parser = parse_range)]
    pub rows: Range<usize>,
    /// The columns hand indices, e.g. 0..100.
    #[clap(long, default_value = "0..1326", value_parser = parse_range)]
    pub cols: Range<usize>,
    /// A fixed board for all the matchups, e.g. "Th7h2c".
    #[clap(long, short, default_value = "")]
    pub board: String,
    /// Number of worker tasks, defaults to the available cores.
    #[clap(long, short)]
    pub tasks: Option<usize>,
    /// Fill the cells below the diagonal from their transpose.
    #[clap(long)]
    pub mirror: bool,
    /// Continue from the cells already in the output file, the board must
    /// match the one saved with it.
    #[clap(long)]
    pub resume: bool,
    /// The CSV output file.
    #[clap(long, short, default_value = "hvh.csv")]
    pub output: PathBuf,
    /// Also write the hands index file.
    #[clap(long)]
    pub index: Option<PathBuf>,
}

/// Parses a `start..end` hand indices range.
fn parse_range(s: &str) -> Result<Range<usize>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("invalid range {s:?}, expected start..end"))?;

    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid range bound {v:?}: {e}"))
    };

    let range = parse(start)?..parse(end)?;
    if range.start > range.end || range.end > NUM_HANDS {
        return Err(format!("range {s} must be within 0..{NUM_HANDS}"));
    }

    Ok(range)
}

/// Loads the matrix to resume, fails if it was built on another board.
fn load_resume(output: &Path, board: Board) -> Result<EquityMatrix> {
    match export::load_board(output)? {
        Some(saved) if saved != board => bail!(
            "{} was built on board [{saved}], cannot resume on board [{board}]",
            output.display()
        ),
        Some(_) => {}
        None => warn!(
            "No board saved for {}, assuming board [{board}]",
            output.display()
        ),
    }

    export::load_csv(output)
}

/// Builds the matrix until done or Ctrl-C and writes the results.
pub async fn run(args: MatrixArgs) -> Result<()> {
    let board = args.board.parse::<Board>()?;
    let mut config = BuildConfig {
        rows: args.rows,
        cols: args.cols,
        board,
        mirror: args.mirror,
        ..BuildConfig::default()
    };

    if let Some(tasks) = args.tasks {
        config.tasks = tasks;
    }

    let builder = MatrixBuilder::new(config)?;

    let mut matrix = if args.resume && args.output.exists() {
        info!("Resuming from {}", args.output.display());
        load_resume(&args.output, board)?
    } else {
        if args.resume {
            warn!("No {} to resume from", args.output.display());
        }

        EquityMatrix::new()
    };

    let cancel = builder.cancel_token();
    let mut build = task::spawn_blocking(move || {
        let report = builder.build(&mut matrix);
        (matrix, report)
    });

    let (matrix, report) = tokio::select! {
        res = &mut build => res?,
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal...");
            cancel.cancel();
            build.await?
        }
    };

    export::save_csv(&matrix, &args.output)?;
    export::save_board(board, &args.output)?;
    info!(
        "Saved {} matrix to {}",
        if report.cancelled { "partial" } else { "complete" },
        args.output.display()
    );

    if !report.failures.is_empty() {
        warn!("{} cells failed, rerun with --resume to retry", report.failures.len());
    }

    if let Some(path) = args.index {
        export::save_index(&path)?;
        info!("Saved index to {}", path.display());
    }

    Ok(())
}
