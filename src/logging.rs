/*!
 * Console diagnostics sink.
 *
 * Library code only talks to the `log` facade. The binary decides whether and
 * how records are shown by installing a [`ConsoleLogger`]; nothing is
 * configured as a side effect of using the library.
 */

use std::io::{IsTerminal, Write};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

// @struct: Logger writing timestamped lines to stderr
pub struct ConsoleLogger {
    level: LevelFilter,
    colored: bool,
}

impl ConsoleLogger {
    // @creates: New logger with specified level
    pub fn new(level: LevelFilter, colored: bool) -> Self {
        ConsoleLogger { level, colored }
    }

    // @initializes: Global logger, colored when stderr is a terminal
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(ConsoleLogger::new(level, std::io::stderr().is_terminal()));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    /// Render one log line, without the trailing newline
    pub fn format_line(&self, level: Level, message: &str) -> String {
        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        if self.colored {
            format!("{}{} {:<5} {}\x1B[0m", Self::color_for_level(level), now, level, message)
        } else {
            format!("{} {:<5} {}", now, level, message)
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format_line(record.level(), &record.args().to_string());
            let _ = writeln!(std::io::stderr(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
