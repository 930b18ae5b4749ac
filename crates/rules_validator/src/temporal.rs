//! Temporal window checks.
//!
//! Every check compares a timestamp against the evaluation instant widened by
//! a tolerance, so values captured moments before validation still pass.
//! Window bounds are inclusive. A bound that falls outside the representable
//! range is treated as open on that side.

use chrono::{DateTime, Duration, Utc};

/// `ts` lies within `tolerance` of `now`, on either side.
pub fn is_present(ts: DateTime<Utc>, now: DateTime<Utc>, tolerance: Duration) -> bool {
    is_past(ts, now, tolerance) && is_future(ts, now, tolerance)
}

/// `ts` is not later than `now + tolerance`.
pub fn is_past(ts: DateTime<Utc>, now: DateTime<Utc>, tolerance: Duration) -> bool {
    now.checked_add_signed(tolerance)
        .is_none_or(|latest| ts <= latest)
}

/// `ts` is not earlier than `now - tolerance`.
pub fn is_future(ts: DateTime<Utc>, now: DateTime<Utc>, tolerance: Duration) -> bool {
    now.checked_sub_signed(tolerance)
        .is_none_or(|earliest| ts >= earliest)
}
