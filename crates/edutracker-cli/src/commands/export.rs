//! The `edutracker export` command.

use std::path::PathBuf;

use anyhow::Result;

use edutracker_core::model::Role;
use edutracker_report::snapshot::SNAPSHOT_FILE_NAME;
use edutracker_report::{write_csv_report, ClassSnapshot};

use super::Workspace;

pub fn execute(config_path: Option<PathBuf>, output: Option<PathBuf>, format: String) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    ws.require(Role::Teacher)?;

    let dir = output.unwrap_or_else(|| ws.config.report_dir.clone());
    let snapshot = ClassSnapshot::capture(&ws.store);

    let (csv, json) = match format.as_str() {
        "csv" => (true, false),
        "json" => (false, true),
        "all" => (true, true),
        other => anyhow::bail!("unknown format: {other} (expected csv, json, or all)"),
    };

    if csv {
        let path = write_csv_report(&dir, &snapshot.students)?;
        println!("Wrote {}", path.display());
    }
    if json {
        let path = dir.join(SNAPSHOT_FILE_NAME);
        snapshot.save_json(&path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
