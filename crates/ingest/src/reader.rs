use std::path::Path;

use log::{debug, info};
use rex_core::OrderRecord;

use crate::error::IngestError;
use crate::parser::parse_line;

/// A line that could not be turned into a record
#[derive(Debug)]
pub struct Rejection {
    /// 1-based line number
    pub line: usize,
    pub error: IngestError,
}

/// Outcome of a bulk load
///
/// `accepted + rejected` always equals the number of lines read.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Accepted records in input order
    pub records: Vec<OrderRecord>,
    pub accepted: usize,
    pub rejected: usize,
    pub rejections: Vec<Rejection>,
}

impl IngestReport {
    /// Total number of lines read
    pub fn lines_read(&self) -> usize {
        self.accepted + self.rejected
    }

    pub fn into_records(self) -> Vec<OrderRecord> {
        self.records
    }
}

/// Parse every line of `text`, skipping and counting the bad ones
pub fn load_str(text: &str) -> IngestReport {
    let mut report = IngestReport::default();

    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(record) => {
                report.records.push(record);
                report.accepted += 1;
            }
            Err(error) => {
                debug!("Skipping line {}: {}", index + 1, error);
                report.rejected += 1;
                report.rejections.push(Rejection {
                    line: index + 1,
                    error,
                });
            }
        }
    }

    report
}

/// Read and parse a whole file
///
/// Only failing to read the file is an error; bad lines are reported.
pub fn load_file(path: impl AsRef<Path>) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let report = load_str(&text);
    info!(
        "Loaded {}: {} records accepted, {} lines rejected",
        path.display(),
        report.accepted,
        report.rejected
    );
    Ok(report)
}
