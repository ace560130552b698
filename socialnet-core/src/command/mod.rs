//! Line-oriented command adapter
//!
//! Turns textual commands such as `ADD_FRIEND alice bob` into calls on
//! [`SocialGraphEngine`](crate::core_social::SocialGraphEngine) and renders
//! the results as plain lines or JSON records.

pub mod output;
pub mod parser;
pub mod runner;

pub use output::{CommandOutput, OutputFormat};
pub use parser::{Command, CommandError};
pub use runner::{execute, run_script, ScriptSummary};
