//! Shared types and layout constants: [`IllegalTimestampPolicy`] and the
//! fixed 84-byte chunk geometry.

use std::fmt;

/// Size of one history record on disk.
pub const CHUNK_SIZE: usize = 84;

/// Channels per record: the internal sensor followed by external channels 1-8.
pub const CHANNEL_COUNT: usize = 9;

/// Byte offset of the first channel pair (after the 8-byte timestamp).
pub const CHANNEL_OFFSET: usize = 8;

/// Bytes per channel: f32 temperature followed by f32 humidity.
pub const CHANNEL_STRIDE: usize = 8;

/// Byte offset of the 4 trailing reserved bytes.
pub const RESERVED_OFFSET: usize = CHANNEL_OFFSET + CHANNEL_COUNT * CHANNEL_STRIDE;

/// Raw timestamp written for records without a timestamp.
pub const NONE_TIMESTAMP: i64 = 0;

/// Bytes the logger writes for a missing temperature (~81.1 °C).
pub const NONE_TEMPERATURE: [u8; 4] = [0x33, 0x33, 0xa2, 0x42];

/// Bytes the logger writes for a missing humidity (110.0 %).
pub const NONE_HUMIDITY: [u8; 4] = [0x00, 0x00, 0xdc, 0x42];

/// Decoded temperatures above this value are treated as "no sensor".
///
/// Reverse engineered from files written by the logger. Not verified across
/// hardware revisions, keep as is.
pub const TEMPERATURE_LIMIT: f32 = 80.0;

/// Decoded humidities above this value are treated as "no sensor".
pub const HUMIDITY_LIMIT: f32 = 101.0;

/// What to do with a chunk whose timestamp does not map to a calendar instant.
///
/// This happens when the logger's battery runs low: the timestamp is written
/// as zero (or garbage) while the channel payload may still be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IllegalTimestampPolicy {
    /// Drop the chunk and continue with the next one.
    #[default]
    Skip,
    /// Keep the chunk, decode its channels and set the timestamp to `None`.
    Null,
}

impl fmt::Display for IllegalTimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_adds_up() {
        assert_eq!(RESERVED_OFFSET, 80);
        assert_eq!(RESERVED_OFFSET + 4, CHUNK_SIZE);
    }

    #[test]
    fn test_sentinels_are_above_limits() {
        assert!(f32::from_le_bytes(NONE_TEMPERATURE) > TEMPERATURE_LIMIT);
        assert!(f32::from_le_bytes(NONE_HUMIDITY) > HUMIDITY_LIMIT);
        assert_eq!(f32::from_le_bytes(NONE_HUMIDITY), 110.0);
    }

    #[test]
    fn test_default_policy_skips() {
        assert_eq!(IllegalTimestampPolicy::default(), IllegalTimestampPolicy::Skip);
        assert_eq!(format!("{}", IllegalTimestampPolicy::Null), "null");
    }
}
