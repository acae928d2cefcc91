//! The `edutracker student` command.

use std::path::PathBuf;

use anyhow::Result;

use edutracker_core::analytics::{student_progress, StudentProgress};
use edutracker_core::model::Id;

use super::{grades_table, Workspace};

pub fn execute(config_path: Option<PathBuf>, id: Option<Id>, json: bool) -> Result<()> {
    let mut ws = Workspace::open(config_path)?;
    let user = ws.signed_in()?;

    let student_id = match id {
        Some(requested) if user.is_teacher() || requested == user.id => requested,
        Some(_) => anyhow::bail!("students can only view their own progress"),
        None if user.is_student() => user.id,
        None => anyhow::bail!("pass --id to choose a student"),
    };

    let Some(progress) = student_progress(&ws.store, student_id) else {
        anyhow::bail!("no student with id {student_id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        print_progress(&progress);
    }
    Ok(())
}

fn print_progress(progress: &StudentProgress) {
    println!("Student Portal: {}", progress.student.name);
    println!("Overall Average:        {}%", progress.overall_average);
    println!("Status:                 {}", progress.status);
    println!("Assessments Completed:  {}", progress.completed);
    if let Some(weakest) = &progress.weakest_subject {
        println!("Focus Area:             {weakest}");
    }

    if progress.grades.is_empty() {
        println!("\nNo grades recorded yet.");
        return;
    }

    println!("\nSubject Mastery:");
    for m in &progress.mastery {
        println!("  {:<14} {:>3} / {}", m.subject, m.score, m.full_mark);
    }

    println!("\nProgress Over Time:");
    for point in progress.trend() {
        println!("  {}  {:<24} {:>3}%", point.date, point.title, point.percentage);
    }

    println!("\n{}", grades_table(&progress.grades));
}
