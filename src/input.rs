//! Interactive interval entry.

use crate::session::Interval;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter the display interval in seconds (e.g., 2.0): ";

/// Prompt on `output` and read one interval from `input`.
///
/// An empty line or end of input keeps `default`; anything else goes
/// through [`Interval::parse_lossy`].
pub fn read_interval<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: Interval,
) -> Interval {
    if write!(output, "{}", PROMPT).and_then(|_| output.flush()).is_err() {
        log::warn!("Could not write interval prompt");
    }

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) if line.trim().is_empty() => default,
        Ok(_) => Interval::parse_lossy(&line),
        Err(e) => {
            log::warn!("Failed to read interval: {}, using {:.3}s", e, default.as_secs_f64());
            default
        }
    }
}
