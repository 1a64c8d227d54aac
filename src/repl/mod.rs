//! REPL Module
//!
//! The read-eval-print loop: reads lines, dispatches them to the session and
//! prints what comes back.

mod commands;
mod input;

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub use commands::{help_message, CommandSpec, Outcome, Session, COMMANDS};
pub use input::{clean_input, first_word};

/// Prompt printed before every line
pub const PROMPT: &str = "Pokedex > ";

/// Runs the loop until `exit` or end of input.
///
/// Command errors are printed and the loop carries on; only I/O errors on
/// `input` or `output` end it early.
pub async fn run<R, I, W>(session: &mut Session<R>, input: I, output: &mut W) -> std::io::Result<()>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };

        let words = clean_input(&line);
        debug!(command = first_word(&words), "dispatch");

        match session.execute(&words).await {
            Ok(Outcome::Continue(text)) => writeln!(output, "{}", text)?,
            Ok(Outcome::Exit(text)) => {
                writeln!(output, "{}", text)?;
                break;
            }
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }

    Ok(())
}
