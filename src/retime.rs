/*!
 * Speed-factor retiming of subtitle entries.
 *
 * Every timestamp is divided by the speed factor. A factor above 1.0 means the
 * media plays faster, so cues move earlier; below 1.0 they move later.
 */

use log::debug;

use crate::errors::SpeedError;
use crate::subtitle_processor::SubtitleEntry;

/// Divide a millisecond offset by `speed`.
///
/// The quotient is rounded to the nearest microsecond, then truncated to the
/// millisecond the SRT format can express.
pub fn scale_ms(ms: u64, speed: f64) -> u64 {
    let micros = (ms as f64 * 1000.0 / speed).round();
    (micros as u64) / 1000
}

/// Rescale every entry's start and end time in place.
///
/// Entries are neither reordered nor re-validated. Fails without touching any
/// entry when `speed` is zero, negative or not finite.
pub fn scale_timings(entries: &mut [SubtitleEntry], speed: f64) -> Result<(), SpeedError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(SpeedError::NotPositive(speed));
    }

    for entry in entries.iter_mut() {
        entry.start_time_ms = scale_ms(entry.start_time_ms, speed);
        entry.end_time_ms = scale_ms(entry.end_time_ms, speed);
    }

    debug!("Rescaled {} entries by factor {}", entries.len(), speed);
    Ok(())
}
