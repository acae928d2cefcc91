//! Search and sort over student aggregates.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::StudentAggregate;

/// Column to sort the roster by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Average,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Average => write!(f, "average"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "average" | "avg" => Ok(SortKey::Average),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Students whose name contains `term`, ignoring case. An empty term keeps everyone.
pub fn filter_by_name(students: &[StudentAggregate], term: &str) -> Vec<StudentAggregate> {
    let needle = term.to_lowercase();
    students
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort: students with equal keys keep their input order in either direction.
pub fn sort_by(
    students: &[StudentAggregate],
    key: SortKey,
    direction: SortDirection,
) -> Vec<StudentAggregate> {
    let mut sorted = students.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Average => a.average.partial_cmp(&b.average).unwrap_or(Ordering::Equal),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// A search term plus sort order, as driven by the roster table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl RosterQuery {
    pub fn apply(&self, students: &[StudentAggregate]) -> Vec<StudentAggregate> {
        sort_by(&filter_by_name(students, &self.term), self.key, self.direction)
    }
}
