/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use speedsrt::errors::AppError;
use speedsrt::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test reading a missing file reports the input error
#[test]
fn test_read_to_string_withMissingFile_shouldReturnInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    match FileManager::read_to_string(&missing) {
        Err(AppError::InputNotFound { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

/// Test reading a file that is not UTF-8
#[test]
fn test_read_to_string_withInvalidUtf8_shouldReturnInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    fs::write(&path, [0x31, 0x0a, 0xe9, 0xff])?;

    match FileManager::read_to_string(&path) {
        Err(AppError::InputNotFound { reason, .. }) => assert!(reason.contains("UTF-8")),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

/// Test atomic writes overwrite silently
#[test]
fn test_write_atomically_withExistingFile_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "out.srt", "previous content")?;

    FileManager::write_atomically(&path, "fresh")?;

    assert_eq!(FileManager::read_to_string(&path)?, "fresh");
    Ok(())
}

/// Test writing into a directory that does not exist
#[test]
fn test_write_atomically_withMissingParent_shouldReturnOutputWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("no_such_dir").join("out.srt");

    assert!(matches!(FileManager::write_atomically(&path, "x"), Err(AppError::OutputWrite { .. })));
    assert!(!path.exists());
    Ok(())
}
