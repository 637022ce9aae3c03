/*!
 * Error types for the speedsrt application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing or checking SRT content
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// The first line of a block is not an integer
    #[error("Malformed index in block {block} (line {line}): expected an integer, found {found:?}")]
    MalformedIndex {
        /// 1-based block ordinal
        block: usize,
        /// 1-based source line
        line: usize,
        /// Offending line content
        found: String,
    },

    /// The timing line is missing or does not match `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    #[error("Malformed timing in block {block} (line {line}): {reason}")]
    MalformedTiming {
        /// 1-based block ordinal
        block: usize,
        /// 1-based source line
        line: usize,
        /// What was expected
        reason: String,
    },

    /// End time precedes start time (strict mode only)
    #[error("Entry {seq_num} ends before it starts ({start_ms} ms --> {end_ms} ms)")]
    InvertedTiming {
        seq_num: usize,
        start_ms: u64,
        end_ms: u64,
    },
}

/// Errors related to the speed factor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeedError {
    /// Zero, negative, NaN or infinite factor
    #[error("Speed factor must be a positive number, got {0}")]
    NotPositive(f64),

    /// Factor outside the range accepted on the command line
    #[error("Speed factor {value} is outside the valid range {min} to {max}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// Text that is not a number
    #[error("Invalid speed factor {0:?}: expected a decimal number")]
    NotANumber(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Source file missing, unreadable or not UTF-8
    #[error("Cannot read input file {}: {}", .path.display(), .reason)]
    InputNotFound { path: PathBuf, reason: String },

    /// Destination could not be written
    #[error("Cannot write output {}: {}", .path.display(), .reason)]
    OutputWrite { path: PathBuf, reason: String },

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from speed validation
    #[error("Speed error: {0}")]
    Speed(#[from] SpeedError),

    /// Configuration file or option problem
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
