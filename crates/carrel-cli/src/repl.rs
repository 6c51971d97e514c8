//! Read-eval loop.
//!
//! Reads one command per line, executes it against a [`Runtime`] and writes
//! the result. Errors are printed and the loop continues, including lines
//! that are not valid UTF-8; only I/O failure on the console itself ends it
//! early. End of input behaves like `quit`.

use std::io::{self, BufRead, Write};

use carrel_core::{Command, Environment, Identity, Outcome, Persistence, Runtime, Storage};
use thiserror::Error;
use tracing::debug;

use crate::{
    commands::{Input, parse_line},
    render,
};

/// Console failure.
#[derive(Error, Debug)]
pub enum ReplError {
    /// Reading input or writing output failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Loop options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplConfig {
    /// Print a prompt before each line (interactive terminals).
    pub prompt: bool,
}

/// Run until `quit` or end of input.
///
/// The library is saved on the way out either way.
pub fn run<S, E>(
    runtime: &mut Runtime<S, E>,
    mut input: impl BufRead,
    out: &mut impl Write,
    config: ReplConfig,
) -> Result<(), ReplError>
where
    S: Storage,
    E: Environment,
{
    let mut buf = Vec::new();

    loop {
        if config.prompt {
            write_prompt(out, runtime.library().session().identity())?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            execute(runtime, Command::Quit, out)?;
            return Ok(());
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            debug!(bytes = buf.len(), "skipping line that is not UTF-8");
            writeln!(out, "Error: input line is not valid UTF-8")?;
            continue;
        };
        let line = line.trim_end_matches(['\n', '\r']);

        let command = match parse_line(line) {
            Ok(Input::Nothing) => continue,
            Ok(Input::Help) => {
                render::write_help(out)?;
                continue;
            },
            Ok(Input::Command(command)) => command,
            Err(error) => {
                writeln!(out, "Error: {error}")?;
                continue;
            },
        };

        if execute(runtime, command, out)? {
            return Ok(());
        }
    }
}

/// Execute one command and report it. Returns true when the loop should stop.
fn execute<S, E>(
    runtime: &mut Runtime<S, E>,
    command: Command,
    out: &mut impl Write,
) -> Result<bool, ReplError>
where
    S: Storage,
    E: Environment,
{
    match runtime.execute(command) {
        Ok(outcome) => report(&outcome, out),
        Err(error) => {
            writeln!(out, "Error: {error}")?;
            Ok(false)
        },
    }
}

fn report(outcome: &Outcome, out: &mut impl Write) -> Result<bool, ReplError> {
    for response in &outcome.responses {
        render::write_response(out, response)?;
    }
    if let Persistence::Failed(error) = &outcome.persistence {
        if outcome.quit {
            writeln!(out, "Warning: final save failed: {error}")?;
        } else {
            writeln!(out, "Warning: change applied but not saved: {error}")?;
        }
    }
    if outcome.quit {
        writeln!(out, "Goodbye.")?;
    }
    Ok(outcome.quit)
}

fn write_prompt(out: &mut impl Write, identity: Option<Identity>) -> io::Result<()> {
    match identity {
        Some(identity) => write!(out, "carrel ({identity})> ")?,
        None => write!(out, "carrel> ")?,
    }
    out.flush()
}
