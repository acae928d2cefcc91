//! The entity store: canonical collections of users, assessments, and results.
//!
//! Collections are append-only. Reads return the collections in insertion
//! order; writes are visible to every later read in the same process.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::error::ValidationError;
use crate::model::{
    Assessment, AssessmentResult, Dataset, Id, NewAssessment, NewResult, User, DEFAULT_FEEDBACK,
};

/// Read and append access to the gradebook collections.
///
/// The analytics, roster and identity layers only ever see a store through
/// this trait, so tests can hand them an isolated fixture.
pub trait EntityStore {
    fn list_users(&self) -> &[User];

    fn list_assessments(&self) -> &[Assessment];

    fn list_results(&self) -> &[AssessmentResult];

    /// Validate and append a new assessment, returning the stored record.
    fn create_assessment(&mut self, spec: NewAssessment) -> Result<Assessment, ValidationError>;

    /// Append a new result, returning the stored record.
    ///
    /// The student and assessment ids are not checked against the other
    /// collections.
    fn create_result(&mut self, spec: NewResult) -> Result<AssessmentResult, ValidationError>;

    fn find_user(&self, id: Id) -> Option<&User> {
        self.list_users().iter().find(|u| u.id == id)
    }

    fn find_assessment(&self, id: Id) -> Option<&Assessment> {
        self.list_assessments().iter().find(|a| a.id == id)
    }

    /// Every user with the student role, in insertion order.
    fn students(&self) -> Vec<&User> {
        self.list_users().iter().filter(|u| u.is_student()).collect()
    }
}

/// Monotonic id source for one collection.
///
/// `next` is `None` once the largest id has been handed out or loaded.
#[derive(Debug, Clone)]
struct IdSequence {
    collection: &'static str,
    next: Option<Id>,
}

impl IdSequence {
    /// Start one above the largest id already present.
    fn after<I: IntoIterator<Item = Id>>(collection: &'static str, existing: I) -> Self {
        let next = match existing.into_iter().max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { collection, next }
    }

    fn allocate(&mut self) -> Result<Id, ValidationError> {
        let id = self.next.ok_or(ValidationError::IdsExhausted(self.collection))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// In-memory, process-lifetime entity store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    users: Vec<User>,
    assessments: Vec<Assessment>,
    results: Vec<AssessmentResult>,
    assessment_ids: IdSequence,
    result_ids: IdSequence,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl MemoryStore {
    /// Create a store holding the given collections.
    pub fn new(dataset: Dataset) -> Self {
        let assessment_ids = IdSequence::after("assessment", dataset.assessments.iter().map(|a| a.id));
        let result_ids = IdSequence::after("result", dataset.results.iter().map(|r| r.id));
        Self {
            users: dataset.users,
            assessments: dataset.assessments,
            results: dataset.results,
            assessment_ids,
            result_ids,
        }
    }

    /// Create a store holding the built-in classroom fixture.
    pub fn seeded() -> Self {
        Self::new(crate::seed::dataset())
    }

    /// Parse a JSON dataset of the form `{ "users": [..], "assessments": [..], "results": [..] }`.
    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: Dataset =
            serde_json::from_str(content).context("failed to parse dataset JSON")?;
        Ok(Self::new(dataset))
    }

    /// Load a JSON dataset from a file.
    pub fn load_fixture(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture: {}", path.display()))?;
        let store = Self::from_json(&content)
            .with_context(|| format!("invalid fixture: {}", path.display()))?;
        tracing::debug!(
            users = store.users.len(),
            assessments = store.assessments.len(),
            results = store.results.len(),
            "loaded fixture {}",
            path.display()
        );
        Ok(store)
    }

    /// Snapshot of all collections.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            users: self.users.clone(),
            assessments: self.assessments.clone(),
            results: self.results.clone(),
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl EntityStore for MemoryStore {
    fn list_users(&self) -> &[User] {
        &self.users
    }

    fn list_assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    fn list_results(&self) -> &[AssessmentResult] {
        &self.results
    }

    fn create_assessment(&mut self, spec: NewAssessment) -> Result<Assessment, ValidationError> {
        let title = required(&spec.title, "title")?;
        let subject = required(&spec.subject, "subject")?;
        if !spec.max_score.is_finite() || spec.max_score <= 0.0 {
            return Err(ValidationError::NonPositiveMaxScore(spec.max_score));
        }

        let assessment = Assessment {
            id: self.assessment_ids.allocate()?,
            title,
            subject,
            date: spec.date.unwrap_or_else(|| Local::now().date_naive()),
            max_score: spec.max_score,
        };
        tracing::debug!(id = assessment.id, title = %assessment.title, "created assessment");
        self.assessments.push(assessment.clone());
        Ok(assessment)
    }

    fn create_result(&mut self, spec: NewResult) -> Result<AssessmentResult, ValidationError> {
        if !spec.score.is_finite() {
            return Err(ValidationError::InvalidScore(spec.score));
        }

        let feedback = spec
            .feedback
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string());

        let result = AssessmentResult {
            id: self.result_ids.allocate()?,
            student_id: spec.student_id,
            assessment_id: spec.assessment_id,
            score: spec.score,
            feedback,
        };
        tracing::debug!(
            id = result.id,
            student_id = result.student_id,
            assessment_id = result.assessment_id,
            "recorded result"
        );
        self.results.push(result.clone());
        Ok(result)
    }
}
