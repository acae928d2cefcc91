//! Class snapshot types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use edutracker_core::analytics::{student_aggregates, summarize_class, ClassAggregate, StudentAggregate};
use edutracker_core::EntityStore;

/// Suggested download name for the JSON snapshot.
pub const SNAPSHOT_FILE_NAME: &str = "class_performance_report.json";

/// Point-in-time export of the class overview and roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    pub overview: ClassAggregate,
    /// Students in roster order.
    pub students: Vec<StudentAggregate>,
}

impl ClassSnapshot {
    /// Compute a snapshot from the current store contents.
    pub fn capture<S: EntityStore + ?Sized>(store: &S) -> Self {
        let students = student_aggregates(store);
        Self::from_students(students)
    }

    /// Build a snapshot over an already filtered or sorted roster.
    pub fn from_students(students: Vec<StudentAggregate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            overview: summarize_class(&students),
            students,
        }
    }

    /// Save the snapshot as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: ClassSnapshot =
            serde_json::from_str(&content).context("failed to parse snapshot JSON")?;
        Ok(snapshot)
    }
}
