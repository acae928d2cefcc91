//! The `edutracker grade` command.

use std::path::PathBuf;

use anyhow::Result;

use edutracker_core::analytics::{student_aggregates, student_progress, summarize_class};
use edutracker_core::model::{Id, NewResult, Role};
use edutracker_core::EntityStore;

use super::Workspace;

pub fn execute(
    config_path: Option<PathBuf>,
    student_id: Id,
    assessment_id: Id,
    score: f64,
    feedback: Option<String>,
) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    ws.require(Role::Teacher)?;

    if ws.store.find_user(student_id).is_none() {
        tracing::warn!(student_id, "recording a result for an unknown student");
    }
    if ws.store.find_assessment(assessment_id).is_none() {
        tracing::warn!(assessment_id, "recording a result for an unknown assessment");
    }

    let result = ws.store.create_result(NewResult {
        student_id,
        assessment_id,
        score,
        feedback,
    })?;
    println!(
        "Recorded result {}: student {} scored {} on assessment {} (\"{}\").",
        result.id, result.student_id, result.score, result.assessment_id, result.feedback
    );

    if let Some(progress) = student_progress(&ws.store, student_id) {
        println!(
            "{} now averages {}% ({}).",
            progress.student.name, progress.average, progress.status
        );
    }
    let overview = summarize_class(&student_aggregates(&ws.store));
    println!(
        "Class average {}%, {} student(s) at risk.",
        overview.class_average, overview.at_risk_count
    );
    Ok(())
}
