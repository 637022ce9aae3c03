/*!
 * Tests that drive the speedsrt binary
 */

use std::fs;
use std::process::{Command, Output, Stdio};
use anyhow::Result;
use crate::common;

fn speedsrt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_speedsrt"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute speedsrt")
}

#[test]
fn test_cli_withNoArguments_shouldPrintHelp() {
    let output = speedsrt(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("--speed"));
}

#[test]
fn test_cli_withHelpFlag_shouldSucceed() {
    for flag in ["-h", "--help"] {
        let output = speedsrt(&[flag]);
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("SRC"));
    }
}

#[test]
fn test_cli_withSpeed_shouldPrintRetimedDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_file(temp_dir.path(), "in.srt", "1\n00:00:10,000 --> 00:00:12,000\nHello\n\n")?;

    let output = speedsrt(&[src.to_str().unwrap(), "-s", "2.0", "--log-level", "error"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "1\n00:00:05,000 --> 00:00:06,000\nHello\n\n");
    Ok(())
}

#[test]
fn test_cli_withDestination_shouldWriteFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_subtitle(temp_dir.path(), "in.srt")?;
    let dst = temp_dir.path().join("out.srt");

    let output = speedsrt(&[src.to_str().unwrap(), dst.to_str().unwrap(), "--speed", "0.5"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(fs::read_to_string(&dst)?.starts_with("1\n00:00:02,000 --> 00:00:08,000\n"));
    Ok(())
}

#[test]
fn test_cli_withOutOfRangeSpeed_shouldFailNamingRange() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_subtitle(temp_dir.path(), "in.srt")?;

    let output = speedsrt(&[src.to_str().unwrap(), "-s", "12"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("0.1 to 10"));
    Ok(())
}

#[test]
fn test_cli_withoutSpeedOrTerminal_shouldFailWithMissingOption() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_subtitle(temp_dir.path(), "in.srt")?;

    let output = speedsrt(&[src.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--speed"));
    Ok(())
}

#[test]
fn test_cli_withMissingSource_shouldFail() {
    let output = speedsrt(&["/definitely/not/here.srt", "-s", "2"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_withConfigSpeed_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_file(temp_dir.path(), "in.srt", "1\n00:00:10,000 --> 00:00:12,000\nHello\n")?;
    let conf = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "speed": 4.0 }"#)?;

    let output = speedsrt(&[src.to_str().unwrap(), "-c", conf.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "1\n00:00:02,500 --> 00:00:03,000\nHello\n\n");
    Ok(())
}

#[test]
fn test_cli_withSpeedAndOutOfRangeConfigSpeed_shouldUseCliSpeed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let src = common::create_test_file(temp_dir.path(), "in.srt", "1\n00:00:10,000 --> 00:00:12,000\nHello\n")?;
    let conf = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "speed": 50 }"#)?;

    let output = speedsrt(&[src.to_str().unwrap(), "-c", conf.to_str().unwrap(), "-s", "2"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "1\n00:00:05,000 --> 00:00:06,000\nHello\n\n");
    Ok(())
}
