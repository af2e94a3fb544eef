//! Staleness monitor: flags a sensor that has stopped reporting.
//!
//! Deliberately a pure function of `(last observed timestamp, now)` so the
//! boundary behavior is unit-testable with an injected clock. The caller
//! fetches the latest reading once per poll cycle rather than holding it
//! as long-lived state, so the verdict cannot drift after restarts.

use chrono::{DateTime, Duration, Utc};

use crate::models::LivenessState;

// ---

/// Elapsed seconds after which a silent sensor counts as stale.
pub const STALE_AFTER_SECS: i64 = 5 * 60;

/// `true` iff more than `threshold` has elapsed since the last reading.
/// No reading ever recorded is fail-safe stale.
pub fn is_stale(
    last_observed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold: Duration,
) -> bool {
    // ---
    match last_observed_at {
        None => true,
        Some(last) => now - last > threshold,
    }
}

/// Liveness verdict at the default threshold, for the status endpoint.
pub fn liveness(last_observed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LivenessState {
    // ---
    LivenessState {
        stale: is_stale(last_observed_at, now, Duration::seconds(STALE_AFTER_SECS)),
        last_observed_at,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn boundary_behavior_around_the_threshold() {
        // ---
        let now = Utc.with_ymd_and_hms(2025, 3, 26, 12, 0, 0).unwrap();
        let threshold = Duration::seconds(STALE_AFTER_SECS);

        // One second past the threshold: stale.
        let just_over = now - threshold - Duration::seconds(1);
        assert!(is_stale(Some(just_over), now, threshold));

        // One second inside the threshold: fresh.
        let just_under = now - threshold + Duration::seconds(1);
        assert!(!is_stale(Some(just_under), now, threshold));

        // Exactly at the threshold: not yet stale (strictly greater-than).
        assert!(!is_stale(Some(now - threshold), now, threshold));
    }

    #[test]
    fn missing_reading_is_fail_safe_stale() {
        // ---
        let now = Utc.with_ymd_and_hms(2025, 3, 26, 12, 0, 0).unwrap();
        assert!(is_stale(None, now, Duration::seconds(STALE_AFTER_SECS)));

        let state = liveness(None, now);
        assert!(state.stale);
        assert_eq!(state.last_observed_at, None);
    }

    #[test]
    fn fresh_reading_reports_alive() {
        // ---
        let now = Utc.with_ymd_and_hms(2025, 3, 26, 12, 0, 0).unwrap();
        let last = now - Duration::seconds(30);

        let state = liveness(Some(last), now);
        assert!(!state.stale);
        assert_eq!(state.last_observed_at, Some(last));
    }
}
