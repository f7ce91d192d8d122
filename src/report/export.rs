//! CSV report file

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SweepError};
use crate::types::{LookupResult, LookupStatus};

/// Column names, in file order
pub const REPORT_HEADER: [&str; 4] = ["domain", "status", "rdap_source", "raw_response"];

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub domain: String,
    pub status: LookupStatus,
    pub rdap_source: String,
    /// Compact single-line JSON
    pub raw_response: String,
}

impl From<&LookupResult> for ReportRow {
    fn from(result: &LookupResult) -> Self {
        Self {
            domain: result.domain.clone(),
            status: result.status,
            rdap_source: result.rdap_source.clone(),
            // Compact serialization of a Value never contains raw newlines.
            raw_response: result.raw_response.to_string(),
        }
    }
}

/// Write rows (header first) to any writer
pub fn write_rows<W: Write>(writer: W, results: &[LookupResult]) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    for result in results {
        csv_writer.serialize(ReportRow::from(result))?;
    }
    if results.is_empty() {
        csv_writer.write_record(REPORT_HEADER)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SweepError::csv(e.to_string(), None))?;
    Ok(results.len())
}

/// Make sure the report file can be created, before any lookup runs.
///
/// Creates missing parent directories and the (empty) file itself.
pub fn prepare_output(path: &Path) -> Result<()> {
    let unusable = |e: std::io::Error| {
        SweepError::config(format!("cannot write report to {}: {}", path.display(), e))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(unusable)?;
    }
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(unusable)?;
    Ok(())
}

/// Write the report file, creating parent directories as needed
pub fn write_report(path: &Path, results: &[LookupResult]) -> Result<usize> {
    let path_str = path.to_string_lossy().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            SweepError::csv(e.to_string(), Some(parent.to_string_lossy().to_string()))
        })?;
    }

    let file = std::fs::File::create(path)
        .map_err(|e| SweepError::csv(e.to_string(), Some(path_str.clone())))?;
    let rows = write_rows(std::io::BufWriter::new(file), results).map_err(|e| match e {
        SweepError::Csv { message, .. } => SweepError::csv(message, Some(path_str.clone())),
        other => other,
    })?;

    tracing::info!(path = %path_str, rows = rows, "Report written");
    Ok(rows)
}

/// Read a report file back into rows
pub fn read_report(path: &Path) -> Result<Vec<ReportRow>> {
    let path_str = path.to_string_lossy().to_string();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| SweepError::csv(e.to_string(), Some(path_str.clone())))?;

    let headers = reader.headers()?.clone();
    if headers.iter().ne(REPORT_HEADER.iter().copied()) {
        return Err(SweepError::csv(
            format!("unexpected header: {}", headers.iter().collect::<Vec<_>>().join(",")),
            Some(path_str),
        ));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| SweepError::csv(e.to_string(), Some(path_str.clone()))))
        .collect()
}
