//! Structural scanner for a bounded prefix of a vector file
//!
//! The scanner walks a fully loaded buffer record by record and reports where
//! each record starts, its raw header bytes and its decoded values. A header
//! that fails the dimension policy is treated as misalignment: the cursor
//! moves forward by a single byte and the header is tried again. This can
//! consume the whole buffer one byte at a time, but it always terminates.
//!
//! ```text
//! offset  0      4                 4 + dim*4
//!         [ dim ][ dim * element  ][ dim ][ ...
//! ```

use alloc::vec::Vec;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::format::constants::{DEFAULT_DISPLAY_RECORDS, ELEMENT_SIZE, HEADER_SIZE};
use crate::format::VecFormat;
use crate::traits::VecElement;
use crate::validation::{record_end, DimensionPolicy};

/// Scanner configuration
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Which header values count as plausible dimensions
    pub policy: DimensionPolicy,
    /// Retry a rejected header as big-endian before resynchronizing
    pub byte_order_fallback: bool,
    /// Stop once more than this many records were found
    pub max_records: Option<usize>,
}

impl ScanConfig {
    /// Default configuration for a file format
    ///
    /// `.fvecs` uses the SIFT window with big-endian fallback, `.ivecs`
    /// accepts any non-negative count and never reinterprets byte order.
    pub const fn for_format(format: VecFormat) -> Self {
        Self {
            policy: format.default_policy(),
            byte_order_fallback: format.default_byte_order_fallback(),
            max_records: Some(DEFAULT_DISPLAY_RECORDS),
        }
    }

    /// Set the dimension policy
    pub fn with_policy(mut self, policy: DimensionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable the big-endian header fallback
    pub fn with_byte_order_fallback(mut self, enabled: bool) -> Self {
        self.byte_order_fallback = enabled;
        self
    }

    /// Set the record limit, `None` scans the whole buffer
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    /// Decode a header, returning the accepted dimension and byte order
    pub fn resolve_header(&self, header: &[u8; HEADER_SIZE]) -> Option<(usize, HeaderOrder)> {
        let little = LittleEndian::read_i32(header);
        if self.policy.accepts(little) {
            return usize::try_from(little).ok().map(|dim| (dim, HeaderOrder::Little));
        }

        if self.byte_order_fallback {
            let big = BigEndian::read_i32(header);
            if self.policy.accepts(big) {
                return usize::try_from(big).ok().map(|dim| (dim, HeaderOrder::Big));
            }
        }

        None
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::for_format(VecFormat::FloatVectors)
    }
}

/// Byte order a header was accepted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderOrder {
    Little,
    Big,
}

/// A header offset the scanner rejected and skipped one byte past
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resync {
    /// Offset of the rejected header
    pub offset: usize,
    /// Header decoded little-endian
    pub little_endian: i32,
    /// Header decoded big-endian, when the fallback was tried
    pub big_endian: Option<i32>,
}

impl Resync {
    /// The last value tried for this header
    pub fn found(&self) -> i32 {
        self.big_endian.unwrap_or(self.little_endian)
    }
}

/// One complete record located by the scanner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannedRecord<T> {
    /// Accepted dimension
    pub dim: usize,
    /// Byte offset of the header
    pub offset: usize,
    /// Raw header bytes as found in the buffer
    pub header: [u8; HEADER_SIZE],
    /// Byte order the header was accepted in
    pub header_order: HeaderOrder,
    /// Decoded payload, always little-endian
    pub values: Vec<T>,
}

impl<T> ScannedRecord<T> {
    /// Offset one past the end of the payload
    pub fn end_offset(&self) -> usize {
        self.offset + HEADER_SIZE + self.values.len() * ELEMENT_SIZE
    }
}

/// Result of scanning a buffer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanReport<T> {
    /// Complete records in buffer order, at most `max_records`
    pub records: Vec<ScannedRecord<T>>,
    /// Every header that was rejected, in buffer order
    pub resyncs: Vec<Resync>,
    /// The record limit was hit while the buffer still held records
    pub more_available: bool,
    /// Cursor position where scanning stopped
    pub end_offset: usize,
}

impl<T> ScanReport<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            resyncs: Vec::new(),
            more_available: false,
            end_offset: 0,
        }
    }
}

/// Scan a buffer for records of element type `T`
pub fn scan<T: VecElement>(buffer: &[u8], config: &ScanConfig) -> ScanReport<T> {
    let mut report = ScanReport::new();
    let mut offset = 0;

    while offset + HEADER_SIZE <= buffer.len() {
        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&buffer[offset..offset + HEADER_SIZE]);

        let Some((dim, header_order)) = config.resolve_header(&header) else {
            report.resyncs.push(Resync {
                offset,
                little_endian: LittleEndian::read_i32(&header),
                big_endian: config
                    .byte_order_fallback
                    .then(|| BigEndian::read_i32(&header)),
            });
            offset += 1;
            continue;
        };

        let start = offset;
        offset += HEADER_SIZE;

        // Incomplete trailing record
        let Some(end) = record_end(offset, dim).filter(|&end| end <= buffer.len()) else {
            break;
        };

        let values = T::decode_slice(&buffer[offset..end]);
        offset = end;

        report.records.push(ScannedRecord {
            dim,
            offset: start,
            header,
            header_order,
            values,
        });

        if let Some(limit) = config.max_records {
            if report.records.len() > limit {
                report.records.pop();
                report.more_available = true;
                break;
            }
        }
    }

    report.end_offset = offset;
    report
}

/// Scan results of either element type
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicScan {
    F32(ScanReport<f32>),
    I32(ScanReport<i32>),
}

impl DynamicScan {
    /// Format the buffer was scanned as
    pub fn format(&self) -> VecFormat {
        match self {
            DynamicScan::F32(_) => VecFormat::FloatVectors,
            DynamicScan::I32(_) => VecFormat::IntVectors,
        }
    }

    /// Number of complete records kept
    pub fn record_count(&self) -> usize {
        match self {
            DynamicScan::F32(report) => report.records.len(),
            DynamicScan::I32(report) => report.records.len(),
        }
    }

    /// Rejected headers
    pub fn resyncs(&self) -> &[Resync] {
        match self {
            DynamicScan::F32(report) => &report.resyncs,
            DynamicScan::I32(report) => &report.resyncs,
        }
    }

    pub fn more_available(&self) -> bool {
        match self {
            DynamicScan::F32(report) => report.more_available,
            DynamicScan::I32(report) => report.more_available,
        }
    }

    pub fn end_offset(&self) -> usize {
        match self {
            DynamicScan::F32(report) => report.end_offset,
            DynamicScan::I32(report) => report.end_offset,
        }
    }
}

/// Scan a buffer with the element type chosen by `format`
pub fn scan_dynamic(buffer: &[u8], format: VecFormat, config: &ScanConfig) -> DynamicScan {
    match format {
        VecFormat::FloatVectors => DynamicScan::F32(scan(buffer, config)),
        VecFormat::IntVectors => DynamicScan::I32(scan(buffer, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DimensionWindow;
    use alloc::vec;

    fn push_record<T: VecElement>(buf: &mut Vec<u8>, values: &[T]) {
        buf.extend_from_slice(&(values.len() as i32).to_le_bytes());
        for &value in values {
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    fn sift_like(count: usize, dim: usize) -> Vec<u8> {
        let mut buf = Vec::new();
        for i in 0..count {
            let values: Vec<f32> = (0..dim).map(|j| (i * dim + j) as f32).collect();
            push_record(&mut buf, &values);
        }
        buf
    }

    #[test]
    fn test_scan_well_formed_floats() {
        let buf = sift_like(2, 128);
        let report = scan::<f32>(&buf, &ScanConfig::default());

        assert_eq!(report.records.len(), 2);
        assert!(report.resyncs.is_empty());
        assert!(!report.more_available);
        assert_eq!(report.end_offset, buf.len());

        let second = &report.records[1];
        assert_eq!(second.dim, 128);
        assert_eq!(second.offset, 516);
        assert_eq!(second.header, [0x80, 0, 0, 0]);
        assert_eq!(second.header_order, HeaderOrder::Little);
        assert_eq!(second.values[0], 128.0);
        assert_eq!(second.values[127], 255.0);
        assert_eq!(second.end_offset(), 1032);
    }

    #[test]
    fn test_display_limit() {
        let buf = sift_like(5, 100);
        let report = scan::<f32>(&buf, &ScanConfig::default());

        assert_eq!(report.records.len(), 3);
        assert!(report.more_available);
        // The fourth record was decoded before the limit tripped
        assert_eq!(report.end_offset, 4 * 404);

        let unlimited = scan::<f32>(&buf, &ScanConfig::default().with_max_records(None));
        assert_eq!(unlimited.records.len(), 5);
        assert!(!unlimited.more_available);

        let exact = scan::<f32>(&sift_like(3, 100), &ScanConfig::default());
        assert_eq!(exact.records.len(), 3);
        assert!(!exact.more_available);
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let mut buf = sift_like(2, 90);
        let full_len = buf.len();
        buf.extend_from_slice(&90i32.to_le_bytes());
        buf.extend_from_slice(&[0u8; 40]);

        let report = scan::<f32>(&buf, &ScanConfig::default());
        assert_eq!(report.records.len(), 2);
        assert!(report.resyncs.is_empty());
        assert_eq!(report.end_offset, full_len + HEADER_SIZE);
    }

    #[test]
    fn test_resync_one_byte_per_attempt() {
        // Three bytes of garbage, then a valid record
        let mut buf = vec![0xde, 0xad, 0x01];
        push_record(&mut buf, &[0.5f32; 100]);

        let report = scan::<f32>(&buf, &ScanConfig::default());
        assert_eq!(report.resyncs.len(), 3);
        let offsets: Vec<usize> = report.resyncs.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert!(report.resyncs.iter().all(|r| r.big_endian.is_some()));

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].offset, 3);
        assert_eq!(report.records[0].dim, 100);
    }

    #[test]
    fn test_resync_exhausts_buffer() {
        let buf = vec![0xffu8; 37];
        let report = scan::<f32>(&buf, &ScanConfig::default());

        assert!(report.records.is_empty());
        assert_eq!(report.resyncs.len(), 37 - HEADER_SIZE + 1);
        assert_eq!(report.end_offset, 37 - HEADER_SIZE + 1);
    }

    #[test]
    fn test_big_endian_header_fallback() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&96i32.to_be_bytes());
        for j in 0..96 {
            buf.extend_from_slice(&(j as f32).to_le_bytes());
        }

        let report = scan::<f32>(&buf, &ScanConfig::default());
        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.dim, 96);
        assert_eq!(record.header, [0, 0, 0, 96]);
        assert_eq!(record.header_order, HeaderOrder::Big);
        // Payload stays little-endian
        assert_eq!(record.values[1], 1.0);

        let strict = scan::<f32>(&buf, &ScanConfig::default().with_byte_order_fallback(false));
        assert!(strict.records.iter().all(|r| r.header_order == HeaderOrder::Little));
        assert!(strict.resyncs[0].big_endian.is_none());
    }

    #[test]
    fn test_ivecs_accepts_any_non_negative_count() {
        let mut buf = Vec::new();
        push_record(&mut buf, &[1i32, 2, 3]);
        push_record::<i32>(&mut buf, &[]);
        push_record(&mut buf, &[9i32]);

        let config = ScanConfig::for_format(VecFormat::IntVectors).with_max_records(None);
        let report = scan::<i32>(&buf, &config);
        assert!(report.resyncs.is_empty());
        let dims: Vec<usize> = report.records.iter().map(|r| r.dim).collect();
        assert_eq!(dims, vec![3, 0, 1]);
        assert_eq!(report.records[2].values, vec![9]);
    }

    #[test]
    fn test_ivecs_negative_count_resyncs() {
        let mut buf = (-1i32).to_le_bytes().to_vec();
        buf.extend_from_slice(&[0u8; 4]);

        let report = scan::<i32>(&buf, &ScanConfig::for_format(VecFormat::IntVectors));
        assert_eq!(report.resyncs.len(), 1);
        assert_eq!(report.resyncs[0].offset, 0);
        assert_eq!(report.resyncs[0].big_endian, None);
        // ff ff ff 00 at offset 1 is a plausible count that does not fit
        assert!(report.records.is_empty());
        assert_eq!(report.end_offset, 1 + HEADER_SIZE);
    }

    #[test]
    fn test_custom_window() {
        let mut buf = Vec::new();
        push_record(&mut buf, &[1.0f32, 2.0]);
        push_record(&mut buf, &[3.0f32, 4.0]);

        let default = scan::<f32>(&buf, &ScanConfig::default());
        assert!(default.records.is_empty());

        let window = DimensionWindow::sift().with_expected(2).with_range(1, 4);
        let config = ScanConfig::default().with_policy(DimensionPolicy::Window(window));
        let report = scan::<f32>(&buf, &config);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].values, vec![3.0, 4.0]);
    }

    #[test]
    fn test_empty_and_short_buffers() {
        let empty = scan::<f32>(&[], &ScanConfig::default());
        assert!(empty.records.is_empty());
        assert_eq!(empty.end_offset, 0);

        let short = scan::<i32>(&[1, 0, 0], &ScanConfig::for_format(VecFormat::IntVectors));
        assert!(short.records.is_empty());
        assert!(short.resyncs.is_empty());
    }

    #[test]
    fn test_scan_dynamic() {
        let buf = sift_like(1, 128);
        let scanned = scan_dynamic(&buf, VecFormat::FloatVectors, &ScanConfig::default());
        assert_eq!(scanned.format(), VecFormat::FloatVectors);
        assert_eq!(scanned.record_count(), 1);
        assert!(!scanned.more_available());
        assert_eq!(scanned.end_offset(), buf.len());
    }
}
