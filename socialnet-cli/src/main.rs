use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use socialnet_core::config::Config;
use socialnet_core::logging::{init_logging, LogConfig};
use socialnet_core::{metrics, run_script, OutputFormat, SocialGraphEngine};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "socialnet")]
#[command(author, version, about = "Run social network command scripts", long_about = None)]
struct Args {
    /// Command script to run; reads stdin when omitted
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// How command results are written to stdout
    #[arg(short, long, value_enum)]
    format: Option<Format>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Plain,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => OutputFormat::Plain,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env()?;

    // Flags win over file and environment
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(LogConfig::from_settings(&config.logging)?)?;
    metrics::init_metrics();

    info!(format = %config.output.format, "SocialNet started");
    debug!(?config, "effective configuration");

    let mut engine = SocialGraphEngine::from_config(&config.engine);
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            run_script(&mut engine, BufReader::new(file), &mut writer, config.output.format)?
        }
        None => run_script(&mut engine, io::stdin().lock(), &mut writer, config.output.format)?,
    };

    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        users = engine.user_count(),
        "SocialNet finished"
    );

    Ok(())
}
