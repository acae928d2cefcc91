//! edutracker-report — Class performance report generation.

pub mod csv;
pub mod snapshot;

pub use csv::{to_csv, write_csv_report, CSV_MIME, REPORT_FILE_NAME};
pub use snapshot::{ClassSnapshot, SNAPSHOT_FILE_NAME};
