//! Core data model types for edutracker.
//!
//! These are the stored entities: who is in the class, what was assessed,
//! and what each student scored. Everything derived from them lives in
//! [`crate::analytics`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier shared by all three collections.
pub type Id = u64;

/// Feedback stored on a result when the teacher leaves none.
pub const DEFAULT_FEEDBACK: &str = "Reviewed offline.";

/// A person who can sign in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// Login key.
    pub email: String,
    /// Credential secret, compared in the clear.
    ///
    /// Left out of the serialized form when empty so that identities written
    /// to session storage do not carry it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// What the user may see.
    pub role: Role,
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Copy of this user without the credential secret.
    pub fn without_secret(&self) -> User {
        User {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A gradable unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Unique identifier.
    pub id: Id,
    /// Human-readable title.
    pub title: String,
    /// Free-text grouping key used for mastery profiles.
    #[serde(default)]
    pub subject: String,
    /// Calendar date, used for chronological ordering.
    pub date: NaiveDate,
    /// Points available. Non-positive values are treated as 100 when
    /// computing percentages.
    #[serde(default)]
    pub max_score: f64,
}

/// One student's score on one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    /// Unique identifier.
    pub id: Id,
    /// The student this score belongs to. Not guaranteed to resolve.
    pub student_id: Id,
    /// The assessment this score is for. Not guaranteed to resolve.
    pub assessment_id: Id,
    /// Raw points scored; may exceed the assessment's max score.
    pub score: f64,
    /// Teacher's remark.
    #[serde(default = "default_feedback")]
    pub feedback: String,
}

fn default_feedback() -> String {
    DEFAULT_FEEDBACK.to_string()
}

/// Input for creating an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssessment {
    pub title: String,
    pub subject: String,
    pub max_score: f64,
    /// Defaults to today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Input for recording a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResult {
    pub student_id: Id,
    pub assessment_id: Id,
    pub score: f64,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// A complete set of collections, as loaded from a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub results: Vec<AssessmentResult>,
}
