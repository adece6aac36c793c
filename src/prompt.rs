use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Print `message` without a newline and read one line of input.
/// Returns `None` at end of input. The trailing line break is removed.
pub fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{}", message).context("Failed to write prompt.")?;
    out.flush().context("Failed to flush prompt.")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input.")?;
    if read == 0 {
        return Ok(None);
    }

    let trimmed_len = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
