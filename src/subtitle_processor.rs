use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{debug, warn};
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;

// @module: SubRip parsing, serialization and in-memory model

// @const: SRT timestamp regex (HH:MM:SS,mmm, hours may widen)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):([0-5]\d):([0-5]\d),(\d{3})$").unwrap()
});

// @const: Separator between start and end timestamps
const TIMING_SEPARATOR: &str = "-->";

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number as written in the source
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined with '\n'
    pub text: String,

    // @field: Vendor metadata trailing the timing line, kept verbatim
    pub proprietary: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry without proprietary metadata
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
            proprietary: String::new(),
        }
    }

    /// Attach proprietary timing-line metadata
    pub fn with_proprietary(mut self, proprietary: impl Into<String>) -> Self {
        self.proprietary = proprietary.into();
        self
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let caps = TIMESTAMP_REGEX
            .captures(timestamp)
            .ok_or_else(|| anyhow!("expected HH:MM:SS,mmm, found {:?}", timestamp))?;

        let hours: u64 = caps[1].parse().context("Failed to parse hours")?;
        let minutes: u64 = caps[2].parse().context("Failed to parse minutes")?;
        let seconds: u64 = caps[3].parse().context("Failed to parse seconds")?;
        let millis: u64 = caps[4].parse().context("Failed to parse milliseconds")?;

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(|| anyhow!("timestamp out of range: {:?}", timestamp))
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Whether the entry ends at or after its start
    pub fn has_ordered_timing(&self) -> bool {
        self.end_time_ms >= self.start_time_ms
    }
}

/// Serializes one SRT block, including the separating blank line
impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        if self.proprietary.is_empty() {
            writeln!(f, "{} {} {}", self.format_start_time(), TIMING_SEPARATOR, self.format_end_time())?;
        } else {
            writeln!(
                f,
                "{} {} {} {}",
                self.format_start_time(),
                TIMING_SEPARATOR,
                self.format_end_time(),
                self.proprietary
            )?;
        }
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Lazy, single-pass SRT parser.
///
/// Yields entries in file order and stops after the first error. Blank lines
/// inside a cue's text are kept unless the following line starts a new block,
/// which takes a timing line right after it: a lone number after a blank line
/// is cue text.
pub struct SrtParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    block: usize,
    failed: bool,
}

impl<'a> SrtParser<'a> {
    /// Create a parser over a whole SRT document
    pub fn new(content: &'a str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        SrtParser {
            lines: split_lines(content),
            pos: 0,
            block: 0,
            failed: false,
        }
    }

    // @checks: Line at idx opens a new block. Any line followed by a `-->`
    // line does; a bare integer also does when the next line is a timing line
    // with a mistyped arrow, so that block still fails to parse.
    fn starts_block(&self, idx: usize) -> bool {
        let Some(next) = self.lines.get(idx + 1).map(|line| line.trim()) else {
            return false;
        };
        if next.contains(TIMING_SEPARATOR) {
            return true;
        }
        parse_index(self.lines[idx]).is_some()
            && next.starts_with(|c: char| c.is_ascii_digit())
            && next.contains("->")
    }

    fn parse_block(&mut self) -> Result<SubtitleEntry, SubtitleError> {
        let block = self.block;
        let index_line = self.pos;
        let raw_index = self.lines[index_line];
        let seq_num = parse_index(raw_index).ok_or_else(|| SubtitleError::MalformedIndex {
            block,
            line: index_line + 1,
            found: raw_index.trim().to_string(),
        })?;

        let timing_line = index_line + 1;
        let timing = match self.lines.get(timing_line) {
            Some(line) if !is_blank(line) => *line,
            _ => {
                return Err(SubtitleError::MalformedTiming {
                    block,
                    line: timing_line + 1,
                    reason: "missing timing line after index".to_string(),
                });
            }
        };
        let (start_time_ms, end_time_ms, proprietary) =
            parse_timing_line(timing).map_err(|reason| SubtitleError::MalformedTiming {
                block,
                line: timing_line + 1,
                reason,
            })?;

        let content_start = timing_line + 1;
        let mut content_end = content_start;
        let mut cursor = content_start;
        while cursor < self.lines.len() {
            if !is_blank(self.lines[cursor]) {
                cursor += 1;
                content_end = cursor;
                continue;
            }
            match (cursor..self.lines.len()).find(|&i| !is_blank(self.lines[i])) {
                None => cursor = self.lines.len(),
                Some(next) if self.starts_block(next) => {
                    cursor = next;
                    break;
                }
                Some(next) => {
                    cursor = next + 1;
                    content_end = cursor;
                }
            }
        }
        self.pos = cursor;

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: self.lines[content_start..content_end].join("\n"),
            proprietary,
        })
    }
}

impl Iterator for SrtParser<'_> {
    type Item = Result<SubtitleEntry, SubtitleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        while self.pos < self.lines.len() && is_blank(self.lines[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= self.lines.len() {
            return None;
        }

        self.block += 1;
        let result = self.parse_block();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

// @splits: Lines on "\n", "\r\n" or a lone "\r"
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = content.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&content[start..]);
    }
    lines
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn parse_index(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

// @parses: "<start> --> <end>[ <proprietary>]"
fn parse_timing_line(line: &str) -> std::result::Result<(u64, u64, String), String> {
    let (left, right) = line.split_once(TIMING_SEPARATOR).ok_or_else(|| {
        format!("expected '<start> --> <end>', found {:?}", line.trim())
    })?;

    let right = right.trim_start();
    let (end_text, rest) = match right.find(char::is_whitespace) {
        Some(split) => (&right[..split], right[split..].trim()),
        None => (right, ""),
    };

    let start = SubtitleEntry::parse_timestamp(left.trim())
        .map_err(|e| format!("invalid start timestamp: {}", e))?;
    let end = SubtitleEntry::parse_timestamp(end_text)
        .map_err(|e| format!("invalid end timestamp: {}", e))?;

    Ok((start, end, rest.to_string()))
}

/// Collection of subtitle entries with metadata
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries, in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Parse SRT content read from `source_file`
    pub fn from_srt_str(source_file: PathBuf, content: &str) -> Result<Self, SubtitleError> {
        let entries = Self::parse_srt_string(content)?;
        debug!("Parsed {} subtitle entries from {:?}", entries.len(), source_file);
        Ok(SubtitleCollection { source_file, entries })
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        Ok(Self::from_srt_str(path.to_path_buf(), &content)?)
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        SrtParser::new(content).collect()
    }

    /// Serialize all entries back to SRT text
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            // Writing into a String cannot fail
            let _ = write!(output, "{}", entry);
        }
        output
    }

    /// Check that no entry ends before it starts.
    ///
    /// In strict mode the first offending entry is an error; otherwise the
    /// entries pass through untouched and only a warning is logged.
    pub fn check_timing_order(&self, strict: bool) -> Result<(), SubtitleError> {
        let mut inverted = self.entries.iter().filter(|e| !e.has_ordered_timing());

        if strict {
            if let Some(entry) = inverted.next() {
                return Err(SubtitleError::InvertedTiming {
                    seq_num: entry.seq_num,
                    start_ms: entry.start_time_ms,
                    end_ms: entry.end_time_ms,
                });
            }
            return Ok(());
        }

        let count = inverted.count();
        if count > 0 {
            warn!("Found {} subtitle entries that end before they start", count);
        }
        Ok(())
    }
}
