//! Path-based helpers around [`decode()`](crate::decode()) and
//! [`encode()`](crate::encode()).
//!
//! Each helper owns its file handle, so the file is closed on every exit
//! path, errors included.

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::Result;
use crate::encode::encode;
use crate::reader::RecordReader;
use crate::record::Record;
use crate::types::IllegalTimestampPolicy;

/// Open a history file for lazy decoding.
///
/// The file stays open until the returned reader is dropped.
pub fn read_file<P: AsRef<Path>>(
    path: P,
    policy: IllegalTimestampPolicy,
) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path.as_ref())?;
    log::debug!("reading {} ({policy} illegal timestamps)", path.as_ref().display());
    Ok(RecordReader::new(BufReader::new(file)).with_policy(policy))
}

/// Write records to a history file, creating or truncating it.
///
/// Returns the number of records written. If a record fails to encode, the
/// file is left holding the chunks written before it.
pub fn write_file<P, I>(path: P, records: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let file = File::create(path.as_ref())?;
    log::debug!("writing {}", path.as_ref().display());
    encode(BufWriter::new(file), records)
}
