//! Bucketed history aggregator for the rolling 24-hour chart.
//!
//! The chart wants a stable x-axis, so every call emits the full grid of
//! `HH:MM` slots for one day (48 at the default half-hour width) in
//! ascending label order, whether or not any readings landed in them.
//! Slot identity is hour plus minute floored to the bucket width and does
//! not encode the date; the caller restricts input to the trailing 24
//! hours, so at most one calendar day's worth of readings maps into each
//! slot. Readings exactly 24 hours apart would share a slot, a known
//! simplification of the rolling chart.

use chrono::Timelike;

use super::round1;
use crate::models::{SensorReading, TimeBucket};

// ---

/// The chart window, in hours.
pub const HISTORY_WINDOW_HOURS: i64 = 24;

/// Default bucket width, in minutes. Must divide 60 so slot labels line
/// up with the hour.
pub const BUCKET_WIDTH_MIN: u32 = 30;

/// Partition the given readings into fixed-width time buckets.
///
/// Returns exactly `24h / bucket_width_min` buckets, uniquely labeled,
/// ascending. Buckets with no readings report `None` means — absent, not
/// zero. An empty input produces the full all-empty grid.
pub fn bucketed_history(readings: &[SensorReading], bucket_width_min: u32) -> Vec<TimeBucket> {
    // ---
    debug_assert!(bucket_width_min > 0 && 60 % bucket_width_min == 0);

    let slots = (24 * 60 / bucket_width_min) as usize;
    let mut temp_sums = vec![0.0f32; slots];
    let mut humid_sums = vec![0.0f32; slots];
    let mut counts = vec![0u32; slots];

    for r in readings {
        let minute_of_day = r.created_at.hour() * 60 + r.created_at.minute();
        let slot = (minute_of_day / bucket_width_min) as usize;
        temp_sums[slot] += r.temperature;
        humid_sums[slot] += r.humidity;
        counts[slot] += 1;
    }

    (0..slots)
        .map(|slot| {
            // ---
            let start = slot as u32 * bucket_width_min;
            let time_slot = format!("{:02}:{:02}", start / 60, start % 60);

            let (temp, humid) = if counts[slot] == 0 {
                (None, None)
            } else {
                let n = counts[slot] as f32;
                (
                    Some(round1(temp_sums[slot] / n)),
                    Some(round1(humid_sums[slot] / n)),
                )
            };

            TimeBucket {
                time_slot,
                temp,
                humid,
            }
        })
        .collect()
}
