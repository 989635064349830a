//! Decode single history chunks into [`Record`]s.
//!
//! The main entry point is [`decode_chunk()`], which parses one 84-byte chunk.
//! For whole files, see [`RecordReader`](crate::RecordReader).

use byteorder::{ByteOrder, LittleEndian};

use crate::record::{ChannelReading, Record};
use crate::time;
use crate::types::{
    CHANNEL_COUNT, CHANNEL_OFFSET, CHANNEL_STRIDE, CHUNK_SIZE, HUMIDITY_LIMIT,
    IllegalTimestampPolicy, TEMPERATURE_LIMIT,
};
use crate::{KlimaLoggError, Result};

/// Decode a single 84-byte chunk.
///
/// Returns `Ok(None)` when the stored timestamp is illegal and `policy` is
/// [`IllegalTimestampPolicy::Skip`]. With [`IllegalTimestampPolicy::Null`] the
/// channels are still decoded and the timestamp is `None`. Bytes past the
/// first 84 are ignored.
pub fn decode_chunk(data: &[u8], policy: IllegalTimestampPolicy) -> Result<Option<Record>> {
    if data.len() < CHUNK_SIZE {
        return Err(KlimaLoggError::ChunkTooShort {
            expected: CHUNK_SIZE,
            actual: data.len(),
        });
    }

    let raw = LittleEndian::read_i64(&data[0..8]);
    let timestamp = match time::device_micros_to_calendar(raw) {
        Ok(t) => Some(t),
        Err(KlimaLoggError::IllegalTimestamp { .. }) => match policy {
            IllegalTimestampPolicy::Skip => return Ok(None),
            IllegalTimestampPolicy::Null => None,
        },
        Err(e) => return Err(e),
    };

    let channels = (0..CHANNEL_COUNT)
        .map(|i| decode_channel(&data[CHANNEL_OFFSET + i * CHANNEL_STRIDE..]))
        .collect();

    Ok(Some(Record {
        timestamp,
        channels,
    }))
}

/// Read the raw timestamp field of a chunk without interpreting it.
pub(crate) fn raw_timestamp(data: &[u8]) -> Option<i64> {
    data.get(0..8).map(LittleEndian::read_i64)
}

fn decode_channel(data: &[u8]) -> ChannelReading {
    let temperature = LittleEndian::read_f32(&data[0..4]);
    let humidity = LittleEndian::read_f32(&data[4..8]);

    // The logger writes out-of-range values for disconnected sensors. NaN
    // compares false and passes through.
    let temperature = if temperature > TEMPERATURE_LIMIT {
        None
    } else {
        Some(temperature)
    };
    let humidity = if humidity > HUMIDITY_LIMIT {
        None
    } else {
        Some(humidity)
    };

    ChannelReading {
        temperature,
        humidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NONE_HUMIDITY, NONE_TEMPERATURE};
    use chrono::NaiveDateTime;
    use std::path::Path;

    fn load_vectors(filename: &str) -> serde_json::Value {
        let vectors_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_vectors");
        let path = vectors_dir.join(filename);
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        serde_json::from_str(&content).unwrap()
    }

    fn decode_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn expected_reading(v: &serde_json::Value) -> Option<f32> {
        v.as_f64().map(|x| x as f32)
    }

    fn chunk_with_channel0(temperature: f32, humidity: f32) -> Vec<u8> {
        let mut chunk = vec![0u8; CHUNK_SIZE];
        let raw = time::ANCHOR_DEVICE_SECONDS * 1_000_000;
        chunk[0..8].copy_from_slice(&raw.to_le_bytes());
        chunk[8..12].copy_from_slice(&temperature.to_le_bytes());
        chunk[12..16].copy_from_slice(&humidity.to_le_bytes());
        chunk
    }

    #[test]
    fn test_chunk_vectors() {
        let vectors = load_vectors("chunk_vectors.json");
        let arr = vectors.as_array().unwrap();

        for v in arr {
            let name = v["name"].as_str().unwrap();
            let raw = decode_hex(v["chunk_hex"].as_str().unwrap());
            assert_eq!(raw.len(), CHUNK_SIZE, "{name}: vector length");

            let record = decode_chunk(&raw, IllegalTimestampPolicy::Null)
                .unwrap_or_else(|e| panic!("decode failed for {name}: {e}"))
                .unwrap_or_else(|| panic!("{name}: record was skipped"));

            let expected_ts = v["timestamp"]
                .as_str()
                .map(|s| s.parse::<NaiveDateTime>().unwrap());
            assert_eq!(record.timestamp, expected_ts, "{name}: timestamp");

            let expected_channels = v["channels"].as_array().unwrap();
            assert_eq!(record.channels.len(), expected_channels.len(), "{name}: count");
            for (i, (got, want)) in record.channels.iter().zip(expected_channels).enumerate() {
                assert_eq!(got.temperature, expected_reading(&want[0]), "{name}: ch{i} temp");
                assert_eq!(got.humidity, expected_reading(&want[1]), "{name}: ch{i} hum");
            }
        }
    }

    #[test]
    fn test_skip_policy_drops_illegal_vectors() {
        let vectors = load_vectors("chunk_vectors.json");
        for v in vectors.as_array().unwrap() {
            let name = v["name"].as_str().unwrap();
            let raw = decode_hex(v["chunk_hex"].as_str().unwrap());
            let record = decode_chunk(&raw, IllegalTimestampPolicy::Skip).unwrap();
            assert_eq!(record.is_some(), !v["timestamp"].is_null(), "{name}");
        }
    }

    #[test]
    fn test_zero_timestamp_low_battery() {
        let mut chunk = chunk_with_channel0(90.0, 50.0);
        chunk[0..8].copy_from_slice(&[0; 8]);

        assert!(
            decode_chunk(&chunk, IllegalTimestampPolicy::Skip)
                .unwrap()
                .is_none()
        );

        let record = decode_chunk(&chunk, IllegalTimestampPolicy::Null)
            .unwrap()
            .unwrap();
        assert_eq!(record.timestamp, None);
        assert_eq!(record.channels[0].temperature, None);
        assert_eq!(record.channels[0].humidity, Some(50.0));
    }

    #[test]
    fn test_thresholds() {
        let at = decode_chunk(&chunk_with_channel0(80.0, 101.0), IllegalTimestampPolicy::Skip)
            .unwrap()
            .unwrap();
        assert_eq!(at.channels[0], ChannelReading::connected(80.0, 101.0));

        let above = decode_chunk(&chunk_with_channel0(80.01, 101.01), IllegalTimestampPolicy::Skip)
            .unwrap()
            .unwrap();
        assert!(above.channels[0].is_empty());

        let cold = decode_chunk(&chunk_with_channel0(-39.9, 0.0), IllegalTimestampPolicy::Skip)
            .unwrap()
            .unwrap();
        assert_eq!(cold.channels[0], ChannelReading::connected(-39.9, 0.0));
    }

    #[test]
    fn test_sentinels_decode_as_none() {
        let mut chunk = chunk_with_channel0(0.0, 0.0);
        chunk[8..12].copy_from_slice(&NONE_TEMPERATURE);
        chunk[12..16].copy_from_slice(&NONE_HUMIDITY);
        let record = decode_chunk(&chunk, IllegalTimestampPolicy::Skip)
            .unwrap()
            .unwrap();
        assert!(record.channels[0].is_empty());
    }

    #[test]
    fn test_nan_passes_through() {
        let record = decode_chunk(&chunk_with_channel0(f32::NAN, 50.0), IllegalTimestampPolicy::Skip)
            .unwrap()
            .unwrap();
        assert!(record.channels[0].temperature.unwrap().is_nan());
    }

    #[test]
    fn test_chunk_too_short() {
        let err = decode_chunk(&[0u8; 40], IllegalTimestampPolicy::Null).unwrap_err();
        assert!(matches!(
            err,
            KlimaLoggError::ChunkTooShort {
                expected: 84,
                actual: 40
            }
        ));
    }

    #[test]
    fn test_raw_timestamp() {
        let chunk = chunk_with_channel0(20.0, 50.0);
        assert_eq!(
            raw_timestamp(&chunk),
            Some(time::ANCHOR_DEVICE_SECONDS * 1_000_000)
        );
        assert_eq!(raw_timestamp(&[0u8; 4]), None);
    }
}
