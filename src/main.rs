#[macro_use]
extern crate prettytable;

use std::io;

use anyhow::{anyhow, ensure};
use mockable::DefaultClock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod calculator;
mod cli;
mod guessing;
mod interface;
mod model;
mod prompt;
mod quiz;
mod session;

use cli::{Command::*, CommandLineArgs};

/// Logs go to stderr so they never mix with the exercises' output.
/// `PRIMER_LOG` overrides the level picked from the flags.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("PRIMER_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("Failed to initialize logging: {}", error))?;

    Ok(())
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> anyhow::Result<()> {
    // Get the command-line arguments.
    let CommandLineArgs {
        action,
        verbose,
        quiet,
    } = CommandLineArgs::from_args();

    init_tracing(quiet, verbose)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    // Perform the action.
    match action {
        Todo => session::run(&mut input, &mut output, &DefaultClock)
            .map(|tasks| debug!(remaining = tasks.len(), "to-do session finished")),
        Calc => calculator::run(&mut input, &mut output),
        Guess { max, seed } => {
            ensure!(max >= 1, "--max must be at least 1.");
            let mut game = guessing::Game::new(&mut rng_from(seed), max);
            guessing::run(&mut input, &mut output, &mut game, max)
        }
        Quiz { seed } => {
            let questions = quiz::shuffled(&quiz::QUESTIONS, &mut rng_from(seed));
            quiz::run(&mut input, &mut output, &questions).map(|_| ())
        }
    }?;
    Ok(())
}
