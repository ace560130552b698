//! SocialNet core: an in-memory social graph with per-user post timelines.

pub mod command;
pub mod config;
pub mod core_social;
pub mod logging;
pub mod metrics;

pub use command::{run_script, Command, CommandOutput, OutputFormat, ScriptSummary};
pub use config::Config;
pub use core_social::{PostLimit, SocialGraphEngine, Timestamp, UserId};
pub use logging::{init_logging, LogConfig, LogLevel};
