// --- File: crates/slotwise_scheduling/src/time.rs ---
//! Minute arithmetic shared by the availability engine.
//!
//! The engine does all of its slot math on minutes-since-midnight within a
//! single day, so the helpers here are the whole of its time model.

use chrono::{NaiveTime, Timelike};

/// Minutes since midnight for a time of day. Seconds are ignored.
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// The time of day at `minutes` past midnight, or `None` when the value
/// falls outside a single day.
pub fn time_from_minutes(minutes: i64) -> Option<NaiveTime> {
    if !(0..24 * 60).contains(&minutes) {
        return None;
    }
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
}

/// Round `minutes` up to the next multiple of `step` at or after it.
/// The grid is anchored at midnight.
pub fn round_up_to_step(minutes: i64, step: i64) -> i64 {
    debug_assert!(step > 0);
    // Equivalent to `minutes.div_ceil(step) * step` for `step > 0`; spelled
    // out because signed `div_ceil` is unavailable on this toolchain.
    (minutes.div_euclid(step) + i64::from(minutes.rem_euclid(step) != 0)) * step
}

/// Half-open interval overlap: `[a, b)` and `[c, d)` overlap iff
/// `a < d && c < b`. Back-to-back intervals do not overlap.
pub fn intervals_overlap(a: i64, b: i64, c: i64, d: i64) -> bool {
    a < d && c < b
}
