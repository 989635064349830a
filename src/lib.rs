//! Pure Rust decoder and encoder for KlimaLogg Pro history files.
//!
//! A history file is a flat sequence of fixed 84-byte records: a 64-bit
//! timestamp followed by temperature and humidity of nine channels (the
//! internal sensor and external channels 1-8). The logger writes corrupted
//! records when its battery runs low; those carry a zero timestamp and are
//! either skipped or surfaced with a `None` timestamp, see
//! [`IllegalTimestampPolicy`]. Re-encoding reproduces the logger's own
//! sentinel bytes for missing readings, so repaired files stay compatible.
//!
//! # Decoding a stream
//!
//! ```
//! use klimalogg_rs::{decode, encode, ChannelReading, IllegalTimestampPolicy, Record};
//! use chrono::NaiveDate;
//!
//! let t = NaiveDate::from_ymd_opt(2019, 9, 13).unwrap().and_hms_opt(14, 0, 0).unwrap();
//! let record = Record::new(Some(t)).with_channel(0, ChannelReading::connected(21.5, 45.0));
//!
//! let mut bytes = Vec::new();
//! encode(&mut bytes, [&record]).unwrap();
//! assert_eq!(bytes.len(), 84);
//!
//! let records: Vec<_> = decode(bytes.as_slice(), IllegalTimestampPolicy::Skip)
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(records, vec![record]);
//! ```
//!
//! # Repairing a file
//!
//! ```no_run
//! use klimalogg_rs::{read_file, write_file, IllegalTimestampPolicy};
//!
//! let reader = read_file("0_history.dat", IllegalTimestampPolicy::Skip)?;
//! let records = reader.collect::<Result<Vec<_>, _>>()?;
//! write_file("0_history_fixed.dat", &records)?;
//! # Ok::<(), klimalogg_rs::KlimaLoggError>(())
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod file;
pub mod reader;
pub mod record;
pub mod time;
pub mod types;

pub use error::{KlimaLoggError, Result};
pub use file::{read_file, write_file};
pub use reader::{RecordReader, decode};
pub use record::{ChannelReading, Record};
pub use time::{from_calendar, to_calendar};
pub use types::{CHANNEL_COUNT, CHUNK_SIZE, IllegalTimestampPolicy};

pub use decode::decode_chunk;
pub use encode::{encode, encode_chunk};
