/*!
 * Tests for speed factor retiming
 */

use speedsrt::errors::SpeedError;
use speedsrt::retime::{scale_ms, scale_timings};
use speedsrt::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::common;

const HELLO: &str = "1\n00:00:10,000 --> 00:00:12,000\nHello\n\n";

fn retime(content: &str, speed: f64) -> String {
    let mut collection = SubtitleCollection::from_srt_str("test.srt".into(), content).unwrap();
    scale_timings(&mut collection.entries, speed).unwrap();
    collection.to_srt_string()
}

/// Test doubling the speed halves the timestamps
#[test]
fn test_scale_timings_withDoubleSpeed_shouldHalveTimestamps() {
    assert_eq!(retime(HELLO, 2.0), "1\n00:00:05,000 --> 00:00:06,000\nHello\n\n");
}

/// Test halving the speed doubles the timestamps
#[test]
fn test_scale_timings_withHalfSpeed_shouldDoubleTimestamps() {
    assert_eq!(retime(HELLO, 0.5), "1\n00:00:20,000 --> 00:00:24,000\nHello\n\n");
}

/// Test speed 1.0 leaves the document as it was
#[test]
fn test_scale_timings_withUnitSpeed_shouldReproduceDocument() {
    let expected = common::SAMPLE_SRT.to_string() + "\n";
    assert_eq!(retime(common::SAMPLE_SRT, 1.0), expected);
}

/// Test zero and negative factors are refused
#[test]
fn test_scale_timings_withZeroOrNegativeSpeed_shouldFail() {
    let mut entries = vec![SubtitleEntry::new(1, 10_000, 12_000, "Hello".to_string())];

    assert_eq!(scale_timings(&mut entries, 0.0), Err(SpeedError::NotPositive(0.0)));
    assert_eq!(scale_timings(&mut entries, -1.0), Err(SpeedError::NotPositive(-1.0)));
    assert_eq!(entries[0].start_time_ms, 10_000);
    assert_eq!(entries[0].end_time_ms, 12_000);
}

/// Test proprietary text and content survive retiming
#[test]
fn test_scale_timings_withProprietary_shouldOnlyTouchTimes() {
    let content = "3\n01:00:00,000 --> 01:00:03,000 X1:1\nLine\n\nMore\n";
    assert_eq!(retime(content, 4.0), "3\n00:15:00,000 --> 00:15:00,750 X1:1\nLine\n\nMore\n\n");
}

/// Test millisecond truncation
#[test]
fn test_scale_ms_withInexactQuotient_shouldTruncate() {
    assert_eq!(scale_ms(2_000, 3.0), 666);
    assert_eq!(scale_ms(0, 7.5), 0);
    assert_eq!(scale_ms(1_000, 0.1), 10_000);
}

/// Test empty input stays empty
#[test]
fn test_scale_timings_withNoEntries_shouldProduceEmptyDocument() {
    assert_eq!(retime("", 2.0), "");
}
