// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand vs hand command.
use anyhow::{Result, bail};
use clap::Args;
use log::info;
use std::io::{self, Write};

use headsup_cards::{Card, CardSet};
use headsup_equity::{Board, Hand, HandTotals, Matchup, Outcome};
use headsup_eval::HandRank;

/// Hand vs hand arguments.
#[derive(Debug, Args)]
pub struct HvhArgs {
    /// Extra dead cards, e.g. "2c7d".
    #[clap(long, short, default_value = "")]
    pub dead: String,
    /// Print the hand categories made by each player.
    #[clap(long)]
    pub totals: bool,
    /// Number of parallel tasks.
    #[clap(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=1024))]
    pub tasks: u16,
    /// The two players hole cards followed by 0, 3, 4, or 5 board cards.
    #[clap(required = true, value_name = "CARD")]
    pub cards: Vec<String>,
}

impl HvhArgs {
    /// Parses the cards into a matchup.
    pub fn matchup(&self) -> Result<Matchup> {
        let cards = Card::parse_many(&self.cards.join(" "))?;
        if cards.len() < 4 {
            bail!("expected two cards for each player, found {} cards", cards.len());
        }

        let first = Hand::new(cards[0], cards[1])?;
        let second = Hand::new(cards[2], cards[3])?;
        let board = Board::from_cards(&cards[4..])?;
        let dead = self.dead.parse::<CardSet>()?;

        Ok(Matchup::new(first, second, board, dead)?)
    }
}

/// Scores the matchup and prints the results.
pub fn run(args: &HvhArgs, matchup: &Matchup) -> Result<()> {
    let [first, second] = matchup.hands();
    info!(
        "Scoring {first} vs {second} board [{}] dead [{}]",
        matchup.board(),
        matchup.dead()
    );

    let mut stdout = io::stdout().lock();
    if args.totals {
        let (outcome, totals) = if args.tasks > 1 {
            matchup.par_score_with_totals(args.tasks as usize)?
        } else {
            matchup.score_with_totals()?
        };

        write_outcome(&mut stdout, matchup, &outcome)?;
        writeln!(stdout)?;
        write_totals(&mut stdout, matchup, &totals)?;
    } else {
        let outcome = if args.tasks > 1 {
            matchup.par_score(args.tasks as usize)?
        } else {
            matchup.score()?
        };

        write_outcome(&mut stdout, matchup, &outcome)?;
    }

    Ok(())
}

/// Writes the wins, losses, ties, and equity of each player.
pub fn write_outcome<W: Write>(w: &mut W, matchup: &Matchup, outcome: &Outcome) -> Result<()> {
    writeln!(w, "{} boards", outcome.total())?;
    writeln!(
        w,
        "  {:<6} {:>9} {:>7} {:>9} {:>7} {:>9} {:>7} {:>7}",
        "cards", "win", "%win", "loss", "%loss", "tie", "%tie", "equity"
    )?;

    for (hand, outcome) in matchup.hands().into_iter().zip([*outcome, outcome.flip()]) {
        writeln!(
            w,
            "  {:<6} {:>9} {:>7.2} {:>9} {:>7.2} {:>9} {:>7.2} {:>7.2}",
            hand.to_string(),
            outcome.wins,
            outcome.percent(outcome.wins),
            outcome.losses,
            outcome.percent(outcome.losses),
            outcome.ties,
            outcome.percent(outcome.ties),
            outcome.equity()?,
        )?;
    }

    Ok(())
}

/// Writes the hand categories counts of each player.
pub fn write_totals<W: Write>(w: &mut W, matchup: &Matchup, totals: &[HandTotals; 2]) -> Result<()> {
    let [first, second] = matchup.hands();
    writeln!(w, "  {:<16} {:>9} {:>9}", "hand", first.to_string(), second.to_string())?;

    for rank in HandRank::ranks() {
        writeln!(
            w,
            "  {rank:<16} {:>9} {:>9}",
            totals[0].count(rank),
            totals[1].count(rank)
        )?;
    }

    Ok(())
}
