use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use log::debug;
use tempfile::NamedTempFile;
use crate::errors::AppError;

// @module: File utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a UTF-8 file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        let path = path.as_ref();
        let input_error = |reason: String| AppError::InputNotFound {
            path: path.to_path_buf(),
            reason,
        };

        if path.is_dir() {
            return Err(input_error("is a directory".to_string()));
        }

        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => input_error("no such file".to_string()),
            ErrorKind::InvalidData => input_error("file is not valid UTF-8".to_string()),
            _ => input_error(e.to_string()),
        })
    }

    /// Write a string to a file through a temporary sibling, then rename it into place.
    ///
    /// The parent directory must already exist. On failure the destination is
    /// left as it was.
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
        let path = path.as_ref();
        let output_error = |reason: String| AppError::OutputWrite {
            path: path.to_path_buf(),
            reason,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(output_error(format!(
                "parent directory {} does not exist",
                parent.display()
            )));
        }
        if path.is_dir() {
            return Err(output_error("is a directory".to_string()));
        }

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| output_error(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| output_error(e.to_string()))?;
        temp.persist(path).map_err(|e| output_error(e.error.to_string()))?;

        debug!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }
}
