//! Class performance CSV export.
//!
//! One header row and one row per student. Fields are written as-is: a name
//! containing a comma will shift that row's columns.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use edutracker_core::analytics::{Status, StudentAggregate};

/// Suggested download name for the report.
pub const REPORT_FILE_NAME: &str = "class_performance_report.csv";

/// Content type of the report payload.
pub const CSV_MIME: &str = "text/csv";

const HEADER: &str = "Student Name,Overall Average (%),Status";

/// Render student aggregates as CSV text, each row newline-terminated.
pub fn to_csv(students: &[StudentAggregate]) -> String {
    let mut csv = String::with_capacity(HEADER.len() + 1 + students.len() * 40);
    csv.push_str(HEADER);
    csv.push('\n');
    for s in students {
        csv.push_str(&format!(
            "{},{},{}\n",
            s.name,
            s.average,
            Status::for_average(s.average)
        ));
    }
    csv
}

/// Write the CSV report into `dir` as [`REPORT_FILE_NAME`], returning its path.
pub fn write_csv_report(dir: &Path, students: &[StudentAggregate]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create report directory {}", dir.display()))?;
    let path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, to_csv(students).as_bytes())
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!(rows = students.len(), "wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row() {
        let csv = to_csv(&[StudentAggregate::new(5, "Kavya Singh", 96.6)]);
        assert_eq!(
            csv,
            "Student Name,Overall Average (%),Status\nKavya Singh,96.6,On Track\n"
        );
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(to_csv(&[]), "Student Name,Overall Average (%),Status\n");
    }

    #[test]
    fn status_boundary_and_whole_numbers() {
        let csv = to_csv(&[
            StudentAggregate::new(1, "Edge Case", 70.0),
            StudentAggregate::new(2, "Arjun Reddy", 54.0),
        ]);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows, vec!["Edge Case,70,On Track", "Arjun Reddy,54,Needs Support"]);
    }

    #[test]
    fn commas_in_names_are_not_escaped() {
        let csv = to_csv(&[StudentAggregate::new(1, "Singh, Kavya", 80.0)]);
        assert!(csv.contains("\nSingh, Kavya,80,On Track\n"));
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let path = write_csv_report(&out, &[StudentAggregate::new(1, "A", 90.5)]).unwrap();
        assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.ends_with("A,90.5,On Track\n"));
    }
}
