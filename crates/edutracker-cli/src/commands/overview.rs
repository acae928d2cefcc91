//! The `edutracker overview` command.

use std::path::PathBuf;

use anyhow::Result;

use edutracker_core::analytics::{student_aggregates, summarize_class};
use edutracker_core::model::Role;
use edutracker_core::roster::{RosterQuery, SortDirection, SortKey};

use super::{roster_table, Workspace};

pub fn execute(
    config_path: Option<PathBuf>,
    search: String,
    key: SortKey,
    direction: SortDirection,
) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    let teacher = ws.require(Role::Teacher)?;

    let students = student_aggregates(&ws.store);
    let overview = summarize_class(&students);

    println!("Educator Portal: logged in as {}", teacher.name);
    println!("Class Average:     {}%", overview.class_average);
    println!("Students at Risk:  {}", overview.at_risk_count);
    println!("Total Students:    {}", overview.student_count);

    let query = RosterQuery {
        term: search,
        key,
        direction,
    };
    let shown = query.apply(&students);
    if shown.is_empty() {
        println!("\nNo students match \"{}\".", query.term);
    } else {
        println!("\n{}", roster_table(&shown));
    }

    Ok(())
}
