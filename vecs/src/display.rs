//! Text rendering for records and structural scans
//!
//! Both views are `Display` adapters, so callers can print them directly or
//! collect them into a `String`.

use std::fmt;

use vecs_core::{
    DynamicRecords, DynamicScan, Fixed, HeaderOrder, Record, ScanReport, ScannedRecord, Summary,
    VecElement,
};

use crate::file_io::LayoutReport;

/// Records up to this dimension are printed in full
pub const FULL_LIST_MAX_DIM: usize = 20;

/// Leading elements printed for longer records
pub const HEAD_VALUES: usize = 3;

/// Values listed in the byte layout box before eliding
pub const LAYOUT_VALUES: usize = 5;

const VIEW_DECIMALS: usize = 4;
const LAYOUT_DECIMALS: usize = 2;

const BOX_TOP: &str = "  ┌───────────────────────────────┐";
const BOX_RULE: &str = "  ├───────────────────────────────┤";
const BOX_GAP: &str = "  │           ...               │";
const BOX_BOTTOM: &str = "  └───────────────────────────────┘";

/// Space separated lowercase hex pairs, e.g. `80 00 00 00`
pub fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| hex::encode([*byte]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the reader view of decoded records
pub fn render_records(records: &DynamicRecords) -> String {
    RecordsView(records).to_string()
}

/// Render the byte layout of a scanned prefix
pub fn render_layout(report: &LayoutReport) -> String {
    LayoutView(report).to_string()
}

/// Reader view: values and statistics per record
pub struct RecordsView<'a>(pub &'a DynamicRecords);

impl fmt::Display for RecordsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DynamicRecords::F32(records) => write_records(f, records),
            DynamicRecords::I32(records) => write_records(f, records),
        }
    }
}

fn write_records<T: VecElement>(f: &mut fmt::Formatter<'_>, records: &[Record<T>]) -> fmt::Result {
    for (i, record) in records.iter().enumerate() {
        writeln!(f, "Vector {i} (dim={}):", record.dim)?;
        write_values(f, &record.values)?;
        writeln!(f)?;
    }
    Ok(())
}

fn write_values<T: VecElement>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    if values.len() <= FULL_LIST_MAX_DIM {
        let list: Vec<String> = values
            .iter()
            .map(|&v| Fixed(v, VIEW_DECIMALS).to_string())
            .collect();
        return writeln!(f, "  [{}]", list.join(", "));
    }

    let head: Vec<String> = values[..HEAD_VALUES]
        .iter()
        .map(|&v| Fixed(v, VIEW_DECIMALS).to_string())
        .collect();
    let last = values[values.len() - 1];
    writeln!(
        f,
        "  [{}, ..., {}]",
        head.join(", "),
        Fixed(last, VIEW_DECIMALS)
    )?;

    if let Some(summary) = Summary::of(values) {
        writeln!(
            f,
            "  Min: {}, Max: {}, Mean: {:.4}",
            Fixed(summary.min, VIEW_DECIMALS),
            Fixed(summary.max, VIEW_DECIMALS),
            summary.mean
        )?;
    }
    Ok(())
}

/// Scanner view: file facts and the byte layout of the first records
pub struct LayoutView<'a>(pub &'a LayoutReport);

impl fmt::Display for LayoutView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "File: {}", report.path.display())?;
        writeln!(f, "Size: {} bytes", report.file_size)?;
        writeln!(f, "Type: {}", report.format().description())?;
        writeln!(f)?;
        writeln!(f, "Binary Structure Visualization:")?;
        writeln!(f, "================================")?;

        match &report.scan {
            DynamicScan::F32(scan) => write_scan(f, scan, report.prefix_len),
            DynamicScan::I32(scan) => write_scan(f, scan, report.prefix_len),
        }
    }
}

fn write_scan<T: VecElement>(
    f: &mut fmt::Formatter<'_>,
    scan: &ScanReport<T>,
    prefix_len: usize,
) -> fmt::Result {
    writeln!(
        f,
        "Found {} complete vectors in the preview ({} bytes scanned)",
        scan.records.len(),
        prefix_len
    )?;
    if !scan.resyncs.is_empty() {
        writeln!(
            f,
            "Resynchronized past {} implausible header offset(s)",
            scan.resyncs.len()
        )?;
    }

    for (i, record) in scan.records.iter().enumerate() {
        writeln!(f)?;
        write_scanned(f, i, record)?;
    }

    if scan.more_available {
        writeln!(f)?;
        writeln!(f, "... (more vectors available) ...")?;
    }
    Ok(())
}

fn write_scanned<T: VecElement>(
    f: &mut fmt::Formatter<'_>,
    index: usize,
    record: &ScannedRecord<T>,
) -> fmt::Result {
    let header_hex = hex::encode(record.header);
    let order = match record.header_order {
        HeaderOrder::Little => "",
        HeaderOrder::Big => " [big-endian]",
    };

    writeln!(f, "Vector {index}:")?;
    writeln!(f, "  Offset: {} bytes", record.offset)?;
    writeln!(f, "  Dimension: {}", record.dim)?;
    writeln!(
        f,
        "  Dimension Header: {header_hex} (hex) = {} (int){order}",
        record.dim
    )?;

    writeln!(f, "  Layout:")?;
    writeln!(f, "{BOX_TOP}")?;
    writeln!(f, "  │ {} │ Dimension/Count", spaced_hex(&record.header))?;
    writeln!(f, "{BOX_RULE}")?;

    let shown = record.values.len().min(LAYOUT_VALUES);
    for (j, &value) in record.values[..shown].iter().enumerate() {
        write_value_row(f, j, value)?;
    }
    if record.values.len() > shown {
        writeln!(f, "{BOX_GAP}")?;
        let last = record.values.len() - 1;
        write_value_row(f, last, record.values[last])?;
    }
    writeln!(f, "{BOX_BOTTOM}")?;

    writeln!(
        f,
        "  Summary: Vector with {} {} values",
        record.dim,
        T::FORMAT.element_kind()
    )?;
    if let Some(summary) = Summary::of(&record.values) {
        writeln!(
            f,
            "  Range: Min={}, Max={}, Mean={:.2}",
            Fixed(summary.min, LAYOUT_DECIMALS),
            Fixed(summary.max, LAYOUT_DECIMALS),
            summary.mean
        )?;
    }
    Ok(())
}

fn write_value_row<T: VecElement>(f: &mut fmt::Formatter<'_>, j: usize, value: T) -> fmt::Result {
    writeln!(
        f,
        "  │ {} │ Value[{j}]: {value:?}",
        spaced_hex(&value.to_le_bytes())
    )
}
