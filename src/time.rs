//! Conversion between the logger's device time and calendar timestamps.
//!
//! The logger stores time as microseconds of a Julian-day style second count.
//! The epoch was never documented, so the conversion is an affine map around a
//! single reverse-engineered anchor: a known calendar instant and the device
//! value recorded for it. Only whole seconds survive a round trip.
//!
//! ```
//! use klimalogg_rs::time::{from_calendar, to_calendar};
//! use chrono::NaiveDate;
//!
//! let t = NaiveDate::from_ymd_opt(2019, 9, 13)
//!     .unwrap()
//!     .and_hms_opt(14, 0, 0)
//!     .unwrap();
//! assert_eq!(from_calendar(&t), 212_435_186_400);
//! assert_eq!(to_calendar(212_435_186_400).unwrap(), t);
//! ```

use chrono::{DateTime, NaiveDateTime};

use crate::{KlimaLoggError, Result};

/// Device seconds recorded at the anchor instant.
pub const ANCHOR_DEVICE_SECONDS: i64 = 212_435_186_400;

/// The anchor instant, 2019-09-13T14:00:00 (naive), as Unix seconds.
pub const ANCHOR_UNIX_SECONDS: i64 = 1_568_383_200;

/// Earliest representable instant, 0001-01-01T00:00:00, as Unix seconds.
const MIN_UNIX_SECONDS: i64 = -62_135_596_800;

/// Latest representable whole second, 9999-12-31T23:59:59, as Unix seconds.
const MAX_UNIX_SECONDS: i64 = 253_402_300_799;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Convert device seconds to a calendar timestamp.
///
/// Fails with [`KlimaLoggError::IllegalTimestamp`] when the result falls
/// outside years 1 through 9999. A raw value of zero, the usual low-battery
/// garbage, lands around 4713 BC and is rejected here.
pub fn to_calendar(device_seconds: i64) -> Result<NaiveDateTime> {
    from_device_parts(device_seconds, 0)
}

/// Convert a calendar timestamp to device seconds.
///
/// Sub-second precision is not supported by the format; it is truncated after
/// the anchor offset is added.
pub fn from_calendar(t: &NaiveDateTime) -> i64 {
    // `timestamp()` floors, which equals truncation for the positive sums any
    // in-range instant produces.
    ANCHOR_DEVICE_SECONDS + (t.and_utc().timestamp() - ANCHOR_UNIX_SECONDS)
}

/// Convert the raw 64-bit timestamp field (device microseconds) to a calendar
/// timestamp, keeping any sub-second remainder.
pub fn device_micros_to_calendar(device_micros: i64) -> Result<NaiveDateTime> {
    from_device_parts(
        device_micros.div_euclid(MICROS_PER_SECOND),
        device_micros.rem_euclid(MICROS_PER_SECOND),
    )
}

/// Convert a calendar timestamp to the raw 64-bit timestamp field.
///
/// Fails with [`KlimaLoggError::TimestampOverflow`] for instants outside years
/// 1 through 9999, which would otherwise be written as a value that decodes
/// as illegal.
pub fn calendar_to_device_micros(t: &NaiveDateTime) -> Result<i64> {
    if !(MIN_UNIX_SECONDS..=MAX_UNIX_SECONDS).contains(&t.and_utc().timestamp()) {
        return Err(KlimaLoggError::TimestampOverflow(*t));
    }
    from_calendar(t)
        .checked_mul(MICROS_PER_SECOND)
        .ok_or(KlimaLoggError::TimestampOverflow(*t))
}

fn from_device_parts(device_seconds: i64, micros: i64) -> Result<NaiveDateTime> {
    let illegal = || KlimaLoggError::IllegalTimestamp { device_seconds };

    let unix_seconds = device_seconds
        .checked_sub(ANCHOR_DEVICE_SECONDS)
        .and_then(|delta| delta.checked_add(ANCHOR_UNIX_SECONDS))
        .ok_or_else(illegal)?;

    if !(MIN_UNIX_SECONDS..=MAX_UNIX_SECONDS).contains(&unix_seconds) {
        return Err(illegal());
    }

    // micros is in 0..1_000_000 so the nanosecond count fits in u32
    DateTime::from_timestamp(unix_seconds, (micros * 1_000) as u32)
        .map(|dt| dt.naive_utc())
        .ok_or_else(illegal)
}
