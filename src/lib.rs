/*!
 * # speedsrt - SubRip speed adjuster
 *
 * A Rust library for rescaling the timing of SubRip (SRT) subtitles by a
 * constant speed factor, e.g. after the video was sped up or slowed down.
 *
 * ## Features
 *
 * - Self-contained SRT parser (lazy or eager) and serializer
 * - Preserves cue text, blank lines inside cues and proprietary timing-line metadata
 * - Speed factor validation (0.1 to 10.0) and optional strict timing checks
 * - Atomic file output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: SRT parsing, serialization and the entry model
 * - `retime`: division of entry timings by the speed factor
 * - `app_config`: Configuration management and speed resolution
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `logging`: Console logger installed by the binary
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod logging;
pub mod retime;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::{Config, SpeedFactor};
pub use app_controller::Controller;
pub use errors::{AppError, SpeedError, SubtitleError};
pub use subtitle_processor::{SrtParser, SubtitleCollection, SubtitleEntry};
