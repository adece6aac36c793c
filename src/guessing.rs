use std::cmp::Ordering;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::debug;

use crate::prompt::ask;

/// What the game answers to a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The secret is bigger than the guess.
    Higher,
    /// The secret is smaller than the guess.
    Lower,
    Correct { attempts: u32 },
}

/// A running number-guessing game.
#[derive(Debug)]
pub struct Game {
    secret: u32,
    attempts: u32,
}

impl Game {
    /// Draw a secret uniformly from `1..=max`.
    pub fn new(rng: &mut impl Rng, max: u32) -> Self {
        Game::with_secret(rng.gen_range(1..=max.max(1)))
    }

    pub fn with_secret(secret: u32) -> Self {
        Game { secret, attempts: 0 }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn guess(&mut self, guess: u32) -> Verdict {
        self.attempts += 1;
        let verdict = match guess.cmp(&self.secret) {
            Ordering::Less => Verdict::Higher,
            Ordering::Greater => Verdict::Lower,
            Ordering::Equal => Verdict::Correct {
                attempts: self.attempts,
            },
        };
        debug!(guess, attempt = self.attempts, ?verdict, "guess");
        verdict
    }
}

/// Play one game until the secret is found or input ends.
pub fn run(
    input: &mut impl BufRead,
    out: &mut impl Write,
    game: &mut Game,
    max: u32,
) -> Result<()> {
    writeln!(out, "Guess the number from 1 to {}!", max).context("Failed to write banner.")?;

    while let Some(line) = ask(input, out, "Enter a number: ")? {
        let guess = match parse_guess(&line) {
            Some(guess) => guess,
            None => {
                writeln!(out, "Please enter a number.").context("Failed to write input error.")?;
                continue;
            }
        };

        let hint = match game.guess(guess) {
            Verdict::Higher => "My number is higher.",
            Verdict::Lower => "My number is lower.",
            Verdict::Correct { attempts } => {
                writeln!(out, "Correct! You got it in {} attempts.", attempts)
                    .context("Failed to write verdict.")?;
                return Ok(());
            }
        };
        writeln!(out, "{}", hint).context("Failed to write verdict.")?;
    }

    debug!(attempts = game.attempts(), "game abandoned");
    Ok(())
}

// Only plain digits count as a number; signs and spaces inside do not.
fn parse_guess(line: &str) -> Option<u32> {
    let digits = line.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
