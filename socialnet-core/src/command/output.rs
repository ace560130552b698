//! Command results and how they are written out

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::io::{self, Write};

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Mutations and no-ops print nothing
    Silent,
    /// Display names, one per line
    Names(Vec<String>),
    /// Post contents, one per line
    Posts(Vec<String>),
    /// Degrees of separation; `None` prints as `-1`
    Degrees(Option<usize>),
}

impl CommandOutput {
    /// Lines written in plain mode
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            CommandOutput::Silent => Vec::new(),
            CommandOutput::Names(lines) | CommandOutput::Posts(lines) => lines.clone(),
            CommandOutput::Degrees(degrees) => vec![degrees_value(*degrees).to_string()],
        }
    }

    /// JSON form of the result, or `None` for silent commands
    pub fn json_result(&self) -> Option<Value> {
        match self {
            CommandOutput::Silent => None,
            CommandOutput::Names(lines) | CommandOutput::Posts(lines) => Some(json!(lines)),
            CommandOutput::Degrees(degrees) => Some(json!(degrees_value(*degrees))),
        }
    }

    /// Write this result in the requested format
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        keyword: &str,
        format: OutputFormat,
    ) -> io::Result<()> {
        match format {
            OutputFormat::Plain => {
                for line in self.plain_lines() {
                    writeln!(writer, "{}", line)?;
                }
            }
            OutputFormat::Json => {
                if let Some(result) = self.json_result() {
                    let record = json!({ "command": keyword, "result": result });
                    writeln!(writer, "{}", record)?;
                }
            }
        }
        Ok(())
    }
}

fn degrees_value(degrees: Option<usize>) -> i64 {
    degrees.map_or(-1, |d| i64::try_from(d).unwrap_or(i64::MAX))
}

/// Rendering mode for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One value per line
    #[default]
    Plain,
    /// One JSON object per result
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Some(OutputFormat::Plain),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
