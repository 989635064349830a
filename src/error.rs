//! Error types for KlimaLogg history decoding and encoding.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KlimaLoggError {
    #[error("chunk too short: expected {expected} bytes, got {actual}")]
    ChunkTooShort { expected: usize, actual: usize },

    /// The device time value does not map to a representable calendar instant.
    /// The decode path resolves this through [`IllegalTimestampPolicy`](crate::IllegalTimestampPolicy).
    #[error("illegal timestamp: device value {device_seconds} s is outside the calendar range")]
    IllegalTimestamp { device_seconds: i64 },

    #[error(
        "incorrect number of channels: expected {expected} but got {actual} for timestamp {}",
        display_timestamp(.timestamp)
    )]
    ChannelCount {
        expected: usize,
        actual: usize,
        timestamp: Option<NaiveDateTime>,
    },

    #[error("timestamp {0} does not fit the device time field")]
    TimestampOverflow(NaiveDateTime),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_timestamp(timestamp: &Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(t) => t.to_string(),
        None => "<none>".into(),
    }
}

pub type Result<T> = std::result::Result<T, KlimaLoggError>;
