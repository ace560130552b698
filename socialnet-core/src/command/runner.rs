//! Dispatching commands to the engine and running whole scripts

use super::output::{CommandOutput, OutputFormat};
use super::parser::Command;
use crate::core_social::SocialGraphEngine;
use crate::metrics::{self, Timer, COMMANDS_EXECUTED, COMMANDS_REJECTED, SCRIPT_DURATION_MS};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

/// Apply one command to the engine
pub fn execute(engine: &mut SocialGraphEngine, command: &Command) -> CommandOutput {
    match command {
        Command::AddUser { name } => {
            engine.create_user(name);
            CommandOutput::Silent
        }
        Command::AddFriend { a, b } => {
            engine.add_friend(a, b);
            CommandOutput::Silent
        }
        Command::ListFriends { name } => CommandOutput::Names(engine.list_friends(name)),
        Command::SuggestFriends { name, count } => {
            let n = usize::try_from(*count).unwrap_or(0);
            CommandOutput::Names(engine.suggest_friends(name, n))
        }
        Command::DegreesOfSeparation { a, b } => {
            CommandOutput::Degrees(engine.degrees_of_separation(a, b))
        }
        Command::AddPost { name, content } => {
            engine.add_post(name, content);
            CommandOutput::Silent
        }
        Command::OutputPosts { name, limit } => {
            CommandOutput::Posts(engine.output_posts(name, *limit))
        }
    }
}

/// Line counts from a script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Lines parsed and dispatched
    pub executed: usize,
    /// Lines that failed to parse
    pub rejected: usize,
    /// Blank lines
    pub skipped: usize,
}

/// Execute every line of `reader` against `engine`, writing results to `writer`.
///
/// Malformed lines are logged and skipped; only I/O failures abort the run.
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub fn run_script<R: BufRead, W: Write>(
    engine: &mut SocialGraphEngine,
    mut reader: R,
    writer: &mut W,
    format: OutputFormat,
) -> io::Result<ScriptSummary> {
    let timer = Timer::new(SCRIPT_DURATION_MS);
    let mut summary = ScriptSummary::default();

    let mut buf = Vec::new();
    let mut index = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        index += 1;

        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        if let Cow::Owned(_) = line {
            warn!(line = index, "replaced invalid UTF-8");
        }
        match Command::parse(&line) {
            Ok(None) => summary.skipped += 1,
            Ok(Some(command)) => {
                debug!(line = index, command = command.keyword(), "executing");
                let output = execute(engine, &command);
                output.write_to(writer, command.keyword(), format)?;
                summary.executed += 1;
                metrics::record_counter(COMMANDS_EXECUTED, 1);
            }
            Err(err) => {
                warn!(line = index, error = %err, "rejecting command");
                summary.rejected += 1;
                metrics::record_counter(COMMANDS_REJECTED, 1);
            }
        }
    }

    writer.flush()?;
    timer.stop();
    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        skipped = summary.skipped,
        "script finished"
    );
    Ok(summary)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
