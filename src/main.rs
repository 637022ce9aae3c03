// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::debug;
use std::io::IsTerminal;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory};
use clap_complete::{generate, Shell};

use speedsrt::app_config::{self, Config, SpeedFactor, resolve_speed};
use speedsrt::app_controller::Controller;
use speedsrt::errors::AppError;
use speedsrt::file_utils::FileManager;
use speedsrt::logging::ConsoleLogger;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

// @parses: Speed option, rejecting values outside 0.1..=10.0
fn parse_speed_arg(value: &str) -> Result<f64, String> {
    value
        .parse::<SpeedFactor>()
        .map(SpeedFactor::value)
        .map_err(|e| e.to_string())
}

/// speedsrt - adjust the speed of SubRip (SRT) subtitles
#[derive(Parser, Debug)]
#[command(name = "speedsrt")]
#[command(version)]
#[command(about = "Adjust the speed of SubRip (SRT) subtitles")]
#[command(long_about = "Reads SubRip (SRT) subtitles from SRC, divides every start and end time by the
speed factor, and writes the result to DST or prints it when DST is omitted.

A speed of 2.0 is for media played twice as fast (subtitles appear sooner),
0.5 for media played at half speed.

EXAMPLES:
    speedsrt input.srt -s 2.0                   # Print subtitles for double speed
    speedsrt input.srt output.srt -s 0.5        # Write half-speed subtitles to a file
    speedsrt input.srt output.srt               # Prompt for the speed factor
    speedsrt --completions bash > speedsrt.bash # Generate bash completions")]
struct CommandLineOptions {
    /// Source SubRip (SRT) file
    #[arg(value_name = "SRC", required_unless_present = "completions")]
    src: Option<PathBuf>,

    /// Destination file; the result is printed when omitted
    #[arg(value_name = "DST")]
    dst: Option<PathBuf>,

    /// Speed factor between 0.1 and 10.0; prompted for when omitted
    #[arg(short, long, value_parser = parse_speed_arg)]
    speed: Option<f64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Reject entries that end before they start
    #[arg(long)]
    strict: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    // No arguments at all behaves like --help
    if std::env::args_os().len() <= 1 {
        CommandLineOptions::command().print_help()?;
        return Ok(());
    }

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "speedsrt", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration, then let command line options override it
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    if cli.strict {
        config.strict_timing = true;
    }

    ConsoleLogger::init(config.log_level.to_level_filter())?;
    debug!("Configuration: {:?}", config);

    let src = cli.src.ok_or_else(|| anyhow!("SRC is required"))?;
    if !FileManager::file_exists(&src) {
        return Err(AppError::InputNotFound {
            path: src,
            reason: "no such file".to_string(),
        }
        .into());
    }

    let stdin = std::io::stdin();
    let speed = resolve_speed(
        cli.speed,
        &config,
        stdin.is_terminal(),
        stdin.lock(),
        std::io::stderr(),
    )?;

    let controller = Controller::with_config(config);
    controller.run(&src, cli.dst.as_deref(), speed, std::io::stdout().lock())?;

    Ok(())
}
