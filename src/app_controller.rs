use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::app_config::{Config, SpeedFactor};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::retime;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle retiming

/// Main application controller: read, parse, rescale, serialize, write
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Parse, rescale and re-serialize an SRT document held in memory.
    ///
    /// Nothing is produced unless the whole document parses.
    pub fn retime_document(&self, source_file: &Path, content: &str, speed: SpeedFactor) -> Result<String, AppError> {
        let mut collection = SubtitleCollection::from_srt_str(source_file.to_path_buf(), content)?;
        collection.check_timing_order(self.config.strict_timing)?;

        retime::scale_timings(&mut collection.entries, speed.value())?;

        Ok(collection.to_srt_string())
    }

    /// Run one retiming job.
    ///
    /// When `dst` is `None` the document goes to `stdout`.
    pub fn run<W: Write>(&self, src: &Path, dst: Option<&Path>, speed: SpeedFactor, stdout: W) -> Result<(), AppError> {
        info!("Parameter: src = {:?}", src);
        info!("Parameter: dst = {:?}", dst);
        info!("Parameter: speed = {}", speed);

        let content = FileManager::read_to_string(src)?;
        let document = self.retime_document(src, &content, speed)?;

        match dst {
            Some(path) => {
                FileManager::write_atomically(path, &document)?;
                debug!("Saved retimed subtitles to {:?}", path);
            }
            None => Self::write_to_stream(stdout, &document)?,
        }
        Ok(())
    }

    fn write_to_stream<W: Write>(mut stream: W, document: &str) -> Result<(), AppError> {
        stream
            .write_all(document.as_bytes())
            .and_then(|_| stream.flush())
            .map_err(|e| AppError::OutputWrite {
                path: PathBuf::from("<stdout>"),
                reason: e.to_string(),
            })
    }
}
