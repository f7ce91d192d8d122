//! Result reporting: CSV export and console summary

pub mod console;
pub mod export;

pub use console::{render_result_line, render_summary};
pub use export::{prepare_output, read_report, write_report, write_rows, ReportRow, REPORT_HEADER};
