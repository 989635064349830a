//! Iterator-based reader for history files.
//!
//! Use [`RecordReader`] (or [`decode()`]) to iterate over the fixed 84-byte
//! chunks of any [`Read`] source.

use std::io::{ErrorKind, Read};

use crate::Result;
use crate::decode::{decode_chunk, raw_timestamp};
use crate::record::Record;
use crate::types::{CHUNK_SIZE, IllegalTimestampPolicy};

/// Lazy, forward-only iterator over the records of a history file.
///
/// Each call to `next()` reads the next 84 bytes and decodes them. Chunks
/// with an illegal timestamp are handled according to the configured
/// [`IllegalTimestampPolicy`]. Iteration stops at end of input; a partial
/// trailing chunk is dropped. After an I/O error the error is yielded once
/// and iteration stops.
///
/// # Example
///
/// ```
/// use klimalogg_rs::{encode, IllegalTimestampPolicy, Record, RecordReader};
///
/// let mut data = Vec::new();
/// encode(&mut data, [Record::new(None)]).unwrap();
///
/// let skipped: Vec<_> = RecordReader::new(data.as_slice())
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert!(skipped.is_empty());
///
/// let kept: Vec<_> = RecordReader::new(data.as_slice())
///     .with_policy(IllegalTimestampPolicy::Null)
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(kept.len(), 1);
/// ```
#[derive(Debug)]
pub struct RecordReader<R> {
    source: R,
    policy: IllegalTimestampPolicy,
    chunk_index: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// Create a new reader over `source` that skips illegal chunks.
    pub fn new(source: R) -> Self {
        Self {
            source,
            policy: IllegalTimestampPolicy::default(),
            chunk_index: 0,
            done: false,
        }
    }

    /// Set how chunks with an illegal timestamp are handled.
    pub fn with_policy(mut self, policy: IllegalTimestampPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> IllegalTimestampPolicy {
        self.policy
    }

    /// Number of chunks consumed so far, skipped ones included.
    pub fn chunks_read(&self) -> u64 {
        self.chunk_index
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Fill `buf` from the source, retrying short reads. Returns the number
    /// of bytes read, which is less than `buf.len()` only at end of input.
    fn fill_chunk(&mut self, buf: &mut [u8; CHUNK_SIZE]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; CHUNK_SIZE];

        while !self.done {
            let filled = match self.fill_chunk(&mut buf) {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };

            if filled < CHUNK_SIZE {
                if filled > 0 {
                    log::debug!(
                        "dropping {filled} trailing bytes after chunk {}",
                        self.chunk_index
                    );
                }
                self.done = true;
                break;
            }

            let index = self.chunk_index;
            self.chunk_index += 1;

            match decode_chunk(&buf, self.policy) {
                Ok(Some(record)) => {
                    log::trace!("chunk {index}: {record}");
                    return Some(Ok(record));
                }
                Ok(None) => {
                    log::debug!(
                        "skipping chunk {index}: illegal timestamp {:#018x}",
                        raw_timestamp(&buf).unwrap_or_default()
                    );
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

impl<R: Read> std::iter::FusedIterator for RecordReader<R> {}

/// Decode a history stream lazily.
///
/// Equivalent to `RecordReader::new(source).with_policy(policy)`.
pub fn decode<R: Read>(source: R, policy: IllegalTimestampPolicy) -> RecordReader<R> {
    RecordReader::new(source).with_policy(policy)
}
