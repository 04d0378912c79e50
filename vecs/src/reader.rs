//! Streaming record reader
//!
//! Reads up to a requested number of records from any byte stream. Running
//! out of data exactly at a record boundary is a normal way to finish, and an
//! incomplete payload is silently dropped. A header cut short, a negative
//! header or any error the stream reports stops the read, and the records
//! collected so far are returned together with the diagnostic.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, instrument, trace, warn};
use vecs_core::constants::HEADER_SIZE;
use vecs_core::validation::payload_len;
use vecs_core::{DynamicRecords, Record, VecElement, VecFormat, VecsError};

use crate::error::ReadError;

/// Records read so far plus the reason reading stopped early, if any
#[derive(Debug)]
pub struct ReadOutcome<P> {
    /// Decoded records
    pub records: P,
    /// Set when reading stopped for a reason other than end of data
    pub diagnostic: Option<ReadError>,
}

impl<P> ReadOutcome<P> {
    fn complete(records: P) -> Self {
        Self {
            records,
            diagnostic: None,
        }
    }

    /// True when reading ended at the count limit or end of data
    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }

    /// Transform the records, keeping the diagnostic
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> ReadOutcome<Q> {
        ReadOutcome {
            records: f(self.records),
            diagnostic: self.diagnostic,
        }
    }

    /// Discard partial results when reading did not finish cleanly
    pub fn into_result(self) -> crate::Result<P> {
        match self.diagnostic {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Read up to `max_count` records of element type `T`
#[instrument(level = "debug", skip(source))]
pub fn read_records<T: VecElement, R: Read>(
    source: &mut R,
    max_count: usize,
) -> ReadOutcome<Vec<Record<T>>> {
    let mut records = Vec::new();

    for index in 0..max_count {
        match read_record::<T, R>(source, index) {
            Ok(Some(record)) => {
                trace!(index, dim = record.dim, "decoded record");
                records.push(record);
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, records = records.len(), "stopping read early");
                return ReadOutcome {
                    records,
                    diagnostic: Some(err),
                };
            }
        }
    }

    debug!(records = records.len(), "read finished");
    ReadOutcome::complete(records)
}

/// Read up to `max_count` records with the element type chosen by `format`
pub fn read_records_dynamic<R: Read>(
    source: &mut R,
    max_count: usize,
    format: VecFormat,
) -> ReadOutcome<DynamicRecords> {
    match format {
        VecFormat::FloatVectors => read_records::<f32, R>(source, max_count).map(DynamicRecords::F32),
        VecFormat::IntVectors => read_records::<i32, R>(source, max_count).map(DynamicRecords::I32),
    }
}

/// Read one record; `Ok(None)` means the data ran out
fn read_record<T: VecElement, R: Read>(
    source: &mut R,
    index: usize,
) -> Result<Option<Record<T>>, ReadError> {
    let mut header = Vec::with_capacity(HEADER_SIZE);
    source
        .by_ref()
        .take(HEADER_SIZE as u64)
        .read_to_end(&mut header)
        .map_err(|source| ReadError::Io { index, source })?;

    match header.len() {
        0 => {
            trace!(index, "end of data at header");
            return Ok(None);
        }
        HEADER_SIZE => {}
        available => return Err(ReadError::TruncatedHeader { index, available }),
    }
    let dim = LittleEndian::read_i32(&header);

    let len = match payload_len(dim) {
        Ok(len) => len,
        Err(VecsError::NegativeDimension) => {
            return Err(ReadError::NegativeLength { index, value: dim })
        }
        // Larger than the address space, so the data cannot hold it
        Err(_) => return Ok(None),
    };

    // Grows with the bytes actually present rather than trusting the header
    let mut payload = Vec::new();
    source
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut payload)
        .map_err(|source| ReadError::Io { index, source })?;

    if payload.len() < len {
        debug!(index, dim, available = payload.len(), "incomplete record dropped");
        return Ok(None);
    }

    Ok(Some(Record::from_payload(&payload)))
}
