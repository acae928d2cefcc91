//! The `edutracker assessments` and `add-assessment` commands.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

use edutracker_core::model::{Assessment, NewAssessment, Role};
use edutracker_core::EntityStore;

use super::Workspace;

fn assessment_table(assessments: &[Assessment]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Subject", "Date", "Max Score"]);
    for a in assessments {
        table.add_row(vec![
            Cell::new(a.id),
            Cell::new(&a.title),
            Cell::new(&a.subject),
            Cell::new(a.date),
            Cell::new(a.max_score),
        ]);
    }
    table
}

pub fn list(config_path: Option<PathBuf>) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    ws.signed_in()?;
    println!("{}", assessment_table(ws.store.list_assessments()));
    Ok(())
}

pub fn add(
    config_path: Option<PathBuf>,
    title: String,
    subject: String,
    max_score: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    ws.require(Role::Teacher)?;

    let created = ws.store.create_assessment(NewAssessment {
        title,
        subject,
        max_score,
        date,
    })?;

    println!(
        "Created assessment {} \"{}\" ({} pts, {}).",
        created.id, created.title, created.max_score, created.date
    );
    println!("The gradebook is held in memory; this record lasts for this run only.");
    println!("\n{}", assessment_table(ws.store.list_assessments()));
    Ok(())
}
