//! Smoothing aggregator: short rolling average over the newest readings.
//!
//! The ingestion handler inserts the incoming reading, fetches the last
//! [`SMOOTHING_WINDOW`] rows by insertion (id) order, and hands them here.
//! Averaging by insertion order rather than `created_at` keeps the result
//! well-defined when readings arrive out of timestamp order.

use super::round1;
use crate::models::{RollingAverage, SensorReading};

// ---

/// How many of the most recent readings feed the rolling average.
pub const SMOOTHING_WINDOW: usize = 10;

/// Mean of each metric over the supplied readings.
///
/// The slice is whatever "most recent" prefix the caller fetched; with
/// fewer than [`SMOOTHING_WINDOW`] readings the mean covers what exists.
/// Temperature and humidity round to one decimal, gas to a whole number.
/// An empty slice yields zeros rather than NaN; the ingestion path never
/// produces one since the just-inserted reading is always present.
pub fn rolling_average(readings: &[SensorReading]) -> RollingAverage {
    // ---
    if readings.is_empty() {
        return RollingAverage {
            avg_temp: 0.0,
            avg_humid: 0.0,
            avg_mq2: 0.0,
        };
    }

    let n = readings.len() as f32;
    let mut temp_sum = 0.0f32;
    let mut humid_sum = 0.0f32;
    let mut mq2_sum = 0i64;

    for r in readings {
        temp_sum += r.temperature;
        humid_sum += r.humidity;
        mq2_sum += i64::from(r.mq2_value);
    }

    RollingAverage {
        avg_temp: round1(temp_sum / n),
        avg_humid: round1(humid_sum / n),
        avg_mq2: (mq2_sum as f32 / n).round(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(id: i64, temp: f32, humid: f32, mq2: i32) -> SensorReading {
        // ---
        SensorReading {
            id,
            temperature: temp,
            humidity: humid,
            mq2_value: mq2,
            created_at: Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap(),
        }
    }

    #[test]
    fn averages_exactly_the_given_window() {
        // ---
        // Simulates the store's "last 10 by id desc" result: the window
        // holds ids 3..=12 even though ids 1 and 2 exist elsewhere.
        let window: Vec<_> = (3..=12).rev().map(|i| reading(i, 20.0, 50.0, 100)).collect();
        assert_eq!(window.len(), SMOOTHING_WINDOW);

        let avg = rolling_average(&window);
        assert_eq!(avg.avg_temp, 20.0);
        assert_eq!(avg.avg_humid, 50.0);
        assert_eq!(avg.avg_mq2, 100.0);
    }

    #[test]
    fn uses_insertion_order_not_timestamps() {
        // ---
        // A reading with an old timestamp but a new id still counts; one
        // with a fresh timestamp but outside the id window would simply
        // not be in the slice. The function itself never looks at
        // created_at.
        let mut window = vec![reading(11, 30.0, 60.0, 200), reading(10, 10.0, 40.0, 100)];
        window[0].created_at = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();

        let avg = rolling_average(&window);
        assert_eq!(avg.avg_temp, 20.0);
        assert_eq!(avg.avg_humid, 50.0);
        assert_eq!(avg.avg_mq2, 150.0);
    }

    #[test]
    fn partial_window_averages_what_exists() {
        // ---
        let window = vec![
            reading(3, 24.0, 58.0, 110),
            reading(2, 22.0, 54.0, 90),
            reading(1, 20.0, 50.0, 100),
        ];

        let avg = rolling_average(&window);
        assert_eq!(avg.avg_temp, 22.0);
        assert_eq!(avg.avg_humid, 54.0);
        assert_eq!(avg.avg_mq2, 100.0);
    }

    #[test]
    fn rounds_to_chart_precision() {
        // ---
        let window = vec![
            reading(2, 21.12, 50.26, 101),
            reading(1, 21.21, 50.31, 102),
        ];

        let avg = rolling_average(&window);
        // temp mean 21.165 -> 21.2, humid mean 50.285 -> 50.3, mq2 101.5 -> 102
        assert_eq!(avg.avg_temp, 21.2);
        assert_eq!(avg.avg_humid, 50.3);
        assert_eq!(avg.avg_mq2, 102.0);
    }

    #[test]
    fn empty_slice_yields_zeros_not_nan() {
        // ---
        let avg = rolling_average(&[]);
        assert_eq!(avg.avg_temp, 0.0);
        assert_eq!(avg.avg_humid, 0.0);
        assert_eq!(avg.avg_mq2, 0.0);
    }
}
