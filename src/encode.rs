//! Encode [`Record`]s into history file bytes.
//!
//! [`encode_chunk()`] serializes a single record into its 84-byte chunk.
//! [`encode()`] writes a whole sequence of records to any [`Write`] sink.

use std::borrow::Borrow;
use std::io::Write;

use byteorder::{ByteOrder, LittleEndian};

use crate::record::{ChannelReading, Record};
use crate::time;
use crate::types::{
    CHANNEL_COUNT, CHANNEL_OFFSET, CHANNEL_STRIDE, CHUNK_SIZE, NONE_HUMIDITY, NONE_TEMPERATURE,
    NONE_TIMESTAMP,
};
use crate::{KlimaLoggError, Result};

/// Encode a [`Record`] into one 84-byte chunk.
///
/// Missing readings are written as the logger's own sentinel bytes, and a
/// missing timestamp as zero. Fails with [`KlimaLoggError::ChannelCount`]
/// unless the record holds exactly nine channels.
pub fn encode_chunk(record: &Record) -> Result<[u8; CHUNK_SIZE]> {
    if record.channels.len() != CHANNEL_COUNT {
        return Err(KlimaLoggError::ChannelCount {
            expected: CHANNEL_COUNT,
            actual: record.channels.len(),
            timestamp: record.timestamp,
        });
    }

    let mut buf = [0u8; CHUNK_SIZE];

    // Timestamp (bytes 0-7)
    let raw = match &record.timestamp {
        Some(t) => time::calendar_to_device_micros(t)?,
        None => NONE_TIMESTAMP,
    };
    LittleEndian::write_i64(&mut buf[0..8], raw);

    // Channels (bytes 8-79)
    for (i, reading) in record.channels.iter().enumerate() {
        let offset = CHANNEL_OFFSET + i * CHANNEL_STRIDE;
        write_channel(&mut buf[offset..offset + CHANNEL_STRIDE], reading);
    }

    // Reserved (bytes 80-83) stay zero
    Ok(buf)
}

/// Encode records to `dest`, one chunk per record, in input order.
///
/// Returns the number of records written. Encoding stops at the first failing
/// record; chunks written before it remain in `dest`.
pub fn encode<W, I>(mut dest: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let mut count = 0;
    for record in records {
        let chunk = encode_chunk(record.borrow())?;
        dest.write_all(&chunk)?;
        count += 1;
    }
    dest.flush()?;
    log::debug!("encoded {count} records");
    Ok(count)
}

fn write_channel(buf: &mut [u8], reading: &ChannelReading) {
    match reading.temperature {
        Some(t) => LittleEndian::write_f32(&mut buf[0..4], t),
        None => buf[0..4].copy_from_slice(&NONE_TEMPERATURE),
    }
    match reading.humidity {
        Some(h) => LittleEndian::write_f32(&mut buf[4..8], h),
        None => buf[4..8].copy_from_slice(&NONE_HUMIDITY),
    }
}
