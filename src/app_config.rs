use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use crate::errors::{AppError, SpeedError};

// @module: Application configuration
// Loads configuration settings and resolves the speed factor
// from the command line, the config file or an interactive prompt.

/// Smallest accepted speed factor
pub const MIN_SPEED: f64 = 0.1;

/// Largest accepted speed factor
pub const MAX_SPEED: f64 = 10.0;

/// Speed used when the prompt is answered with an empty line
pub const DEFAULT_SPEED: f64 = 1.0;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Speed factor used when none is given on the command line
    #[serde(default)]
    pub speed: Option<f64>,

    /// Reject entries whose end precedes their start
    #[serde(default)]
    pub strict_timing: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// A speed factor known to lie within [`MIN_SPEED`, `MAX_SPEED`]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    /// Validate a raw factor against the accepted range
    pub fn new(value: f64) -> Result<Self, SpeedError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SpeedError::NotPositive(value));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&value) {
            return Err(SpeedError::OutOfRange {
                value,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }
        Ok(SpeedFactor(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        SpeedFactor(DEFAULT_SPEED)
    }
}

impl std::fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SpeedFactor {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| SpeedError::NotANumber(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl Config {
    /// Load a JSON configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::Config(format!("Failed to open config file {}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e)))?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Resolve the speed factor for a run.
///
/// Order: command line, then config file, then an interactive prompt. The
/// prompt is only used when `interactive` is true; otherwise a missing speed
/// is an error rather than a blocking read. A config speed is only range
/// checked when it is the one being used.
pub fn resolve_speed<R: BufRead, W: Write>(
    cli_speed: Option<f64>,
    config: &Config,
    interactive: bool,
    input: R,
    output: W,
) -> Result<SpeedFactor, AppError> {
    if let Some(speed) = cli_speed {
        return Ok(SpeedFactor::new(speed)?);
    }
    if let Some(speed) = config.speed {
        return Ok(SpeedFactor::new(speed)?);
    }
    if !interactive {
        return Err(AppError::Config(
            "missing required option '--speed' (no terminal to prompt on)".to_string(),
        ));
    }
    prompt_for_speed(input, output)
}

/// Ask for the speed factor until a valid answer is given.
///
/// An empty answer accepts [`DEFAULT_SPEED`]. End of input aborts.
pub fn prompt_for_speed<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<SpeedFactor, AppError> {
    let prompt_error = |e: std::io::Error| AppError::Config(format!("Failed to prompt for speed: {}", e));

    loop {
        write!(output, "Speed [{:.1}]: ", DEFAULT_SPEED).map_err(prompt_error)?;
        output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(prompt_error)? == 0 {
            return Err(AppError::Config("missing required option '--speed'".to_string()));
        }

        if line.trim().is_empty() {
            return Ok(SpeedFactor::default());
        }
        match line.parse::<SpeedFactor>() {
            Ok(speed) => return Ok(speed),
            Err(e) => writeln!(output, "Error: {}", e).map_err(prompt_error)?,
        }
    }
}
