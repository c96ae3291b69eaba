// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Shortstack terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use shortstack_bot::{NICKNAMES, NaiveStrategy};
use shortstack_core::{Chips, Config, Game, Seat};

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players including you.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=6))]
    players: u8,
    /// The chips each player starts with.
    #[clap(long, short, default_value_t = 1_000)]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Seed for a repeatable game.
    #[clap(long)]
    seed: Option<u64>,
    /// Delay after each computer player action in milliseconds.
    #[clap(long, default_value_t = 500)]
    delay_ms: u64,
    /// The log level (error, warn, info, debug, trace).
    #[clap(long, default_value = "warn")]
    log_level: log::LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(cli.log_level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    if let Err(err) = run(&cli) {
        error!("Game error: {err:#}");
        return Err(err);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config {
        players: cli.players as usize,
        starting_chips: Chips::new(cli.chips),
        small_blind: Chips::new(cli.small_blind),
        big_blind: Chips::new(cli.big_blind),
    };
    config.validate()?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut seats = vec![Seat::human("You", terminal::TerminalInput::stdin())];
    for name in NICKNAMES.iter().take(config.players - 1) {
        let strategy = NaiveStrategy::new(StdRng::from_rng(&mut rng));
        seats.push(Seat::bot(*name, strategy));
    }

    info!("Starting game {config:?}");

    let observer = terminal::TerminalObserver::stdout(Duration::from_millis(cli.delay_ms));
    let mut game = Game::with_rng(&config, seats, observer, rng)?;
    let over = game.run()?;

    info!("{} won after {} hands", over.winner_name, over.hands);
    Ok(())
}
