// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup Poker equity CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use log::{error, info};
use std::{path::PathBuf, process};

use headsup_equity::export;

mod hvh;
mod matrix;

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Computes the equity of two hands on all the boards.
    Hvh(hvh::HvhArgs),
    /// Computes the equity matrix of all the starting hands.
    Matrix(matrix::MatrixArgs),
    /// Writes the starting hands index file.
    Index {
        /// The index output file.
        #[clap(long, short, default_value = "index.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let res = match cli.command {
        Command::Hvh(args) => hvh_command(&args),
        Command::Matrix(args) => matrix::run(args).await,
        Command::Index { output } => export::save_index(&output).map(|_| {
            info!("Saved index to {}", output.display());
        }),
    };

    if let Err(e) = res {
        error!("{e:#}");
        process::exit(1);
    }
}

fn hvh_command(args: &hvh::HvhArgs) -> Result<()> {
    let matchup = match args.matchup() {
        Ok(matchup) => matchup,
        Err(e) => {
            // Bad cards, show usage.
            let mut cmd = Cli::command();
            if let Some(hvh) = cmd.find_subcommand_mut("hvh") {
                eprintln!("{}", hvh.render_usage());
            }

            return Err(e);
        }
    };

    hvh::run(args, &matchup)
}
