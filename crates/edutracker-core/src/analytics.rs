//! Grade analytics: percentages, averages, mastery profiles, and risk.
//!
//! Every function here is a pure derivation over an [`EntityStore`]
//! snapshot. Nothing is cached; identical store contents always produce
//! identical aggregates. Missing data never fails a derivation: an
//! unresolvable assessment becomes a placeholder and an empty grade set
//! averages to zero.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Assessment, AssessmentResult, Id, User};
use crate::store::EntityStore;

/// Averages strictly below this are classified as needing support.
pub const RISK_THRESHOLD: f64 = 70.0;

/// Denominator used when an assessment's max score is missing or non-positive.
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Upper bound reported on mastery entries for chart scaling.
pub const FULL_MARK: u32 = 100;

/// Subject used for unresolved assessments and blank subjects.
pub const GENERAL_SUBJECT: &str = "General";

const UNKNOWN_TITLE: &str = "Unknown Assessment";

/// Round half up to an integer: `floor(x + 0.5)`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round half up to one decimal place: `floor(10x + 0.5) / 10`.
pub fn round_one_decimal(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

/// The max score if it is positive, otherwise [`DEFAULT_MAX_SCORE`].
pub fn effective_max_score(max_score: f64) -> f64 {
    if max_score > 0.0 {
        max_score
    } else {
        DEFAULT_MAX_SCORE
    }
}

/// `round(score / effective_max * 100)`. Not capped: over-full marks
/// produce percentages above 100.
pub fn percentage(score: f64, max_score: f64) -> i64 {
    round_half_up(score / effective_max_score(max_score) * 100.0) as i64
}

/// Stand-in for an assessment that a result points at but the store lacks.
pub fn placeholder_assessment(id: Id) -> Assessment {
    Assessment {
        id,
        title: UNKNOWN_TITLE.to_string(),
        subject: GENERAL_SUBJECT.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
        max_score: DEFAULT_MAX_SCORE,
    }
}

// ---------------------------------------------------------------------------
// Derived records
// ---------------------------------------------------------------------------

/// A result joined with its assessment, plus the computed percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub result_id: Id,
    pub student_id: Id,
    pub assessment_id: Id,
    pub title: String,
    pub subject: String,
    pub date: NaiveDate,
    /// Effective max score (never non-positive).
    pub max_score: f64,
    pub score: f64,
    pub feedback: String,
    pub percentage: i64,
}

impl GradeRecord {
    fn join(result: &AssessmentResult, assessment: &Assessment) -> Self {
        let max_score = effective_max_score(assessment.max_score);
        Self {
            result_id: result.id,
            student_id: result.student_id,
            assessment_id: result.assessment_id,
            title: assessment.title.clone(),
            subject: assessment.subject.clone(),
            date: assessment.date,
            max_score,
            score: result.score,
            feedback: result.feedback.clone(),
            percentage: percentage(result.score, max_score),
        }
    }
}

/// Risk classification of an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    OnTrack,
    NeedsSupport,
}

impl Status {
    /// `OnTrack` at or above [`RISK_THRESHOLD`], `NeedsSupport` below it.
    pub fn for_average(average: f64) -> Self {
        if average < RISK_THRESHOLD {
            Status::NeedsSupport
        } else {
            Status::OnTrack
        }
    }

    pub fn is_at_risk(self) -> bool {
        self == Status::NeedsSupport
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::OnTrack => write!(f, "On Track"),
            Status::NeedsSupport => write!(f, "Needs Support"),
        }
    }
}

/// One student's identity and overall average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAggregate {
    pub id: Id,
    pub name: String,
    /// Mean percentage, rounded to one decimal place.
    pub average: f64,
    pub status: Status,
}

impl StudentAggregate {
    pub fn new(id: Id, name: impl Into<String>, average: f64) -> Self {
        Self {
            id,
            name: name.into(),
            average,
            status: Status::for_average(average),
        }
    }
}

/// One student's mean percentage within a single subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAggregate {
    pub subject: String,
    /// Integer-rounded mean percentage.
    pub score: i64,
    pub full_mark: u32,
}

/// Class-wide summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAggregate {
    /// Mean of the student averages, rounded to one decimal place.
    pub class_average: f64,
    /// Students whose average is strictly below [`RISK_THRESHOLD`].
    pub at_risk_count: usize,
    pub student_count: usize,
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// A student's results joined to their assessments, in recorded order.
///
/// This is the teacher's drill-down view of a student's history.
pub fn assessment_history<S: EntityStore + ?Sized>(store: &S, student_id: Id) -> Vec<GradeRecord> {
    store
        .list_results()
        .iter()
        .filter(|r| r.student_id == student_id)
        .map(|r| match store.find_assessment(r.assessment_id) {
            Some(assessment) => GradeRecord::join(r, assessment),
            None => {
                tracing::warn!(
                    result_id = r.id,
                    assessment_id = r.assessment_id,
                    "result references a missing assessment, using placeholder"
                );
                GradeRecord::join(r, &placeholder_assessment(r.assessment_id))
            }
        })
        .collect()
}

/// A student's grade records, most recent first.
///
/// Records sharing a date keep their recorded order.
pub fn grades_for_student<S: EntityStore + ?Sized>(store: &S, student_id: Id) -> Vec<GradeRecord> {
    let mut records = assessment_history(store, student_id);
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Arithmetic mean of the records' percentages; 0 when there are none.
pub fn student_average(records: &[GradeRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i64 = records.iter().map(|r| r.percentage).sum();
    total as f64 / records.len() as f64
}

/// Per-subject mean percentage, one entry per subject in first-seen order.
pub fn subject_mastery(records: &[GradeRecord]) -> Vec<SubjectAggregate> {
    let mut groups: Vec<(String, i64, usize)> = Vec::new();

    for record in records {
        let subject = if record.subject.trim().is_empty() {
            GENERAL_SUBJECT
        } else {
            record.subject.as_str()
        };
        match groups.iter_mut().find(|(s, _, _)| s == subject) {
            Some((_, total, count)) => {
                *total += record.percentage;
                *count += 1;
            }
            None => groups.push((subject.to_string(), record.percentage, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(subject, total, count)| SubjectAggregate {
            subject,
            score: round_half_up(total as f64 / count as f64) as i64,
            full_mark: FULL_MARK,
        })
        .collect()
}

/// The subject with the lowest score. Ties go to the first one encountered.
pub fn weakest_subject(mastery: &[SubjectAggregate]) -> Option<&str> {
    let mut weakest: Option<&SubjectAggregate> = None;
    for entry in mastery {
        if weakest.map_or(true, |w| entry.score < w.score) {
            weakest = Some(entry);
        }
    }
    weakest.map(|w| w.subject.as_str())
}

/// Overall aggregate for one user.
pub fn student_aggregate<S: EntityStore + ?Sized>(store: &S, student: &User) -> StudentAggregate {
    let records = assessment_history(store, student.id);
    StudentAggregate::new(
        student.id,
        student.name.clone(),
        round_one_decimal(student_average(&records)),
    )
}

/// Aggregates for every student, in roster order.
pub fn student_aggregates<S: EntityStore + ?Sized>(store: &S) -> Vec<StudentAggregate> {
    store
        .students()
        .into_iter()
        .map(|student| student_aggregate(store, student))
        .collect()
}

/// Class average and risk count over already-computed student aggregates.
pub fn summarize_class(students: &[StudentAggregate]) -> ClassAggregate {
    let at_risk_count = students
        .iter()
        .filter(|s| s.average < RISK_THRESHOLD)
        .count();
    let class_average = if students.is_empty() {
        0.0
    } else {
        let total: f64 = students.iter().map(|s| s.average).sum();
        round_one_decimal(total / students.len() as f64)
    };

    ClassAggregate {
        class_average,
        at_risk_count,
        student_count: students.len(),
    }
}

/// Class average and risk count over every student in the store.
pub fn class_overview<S: EntityStore + ?Sized>(store: &S) -> ClassAggregate {
    summarize_class(&student_aggregates(store))
}

// ---------------------------------------------------------------------------
// Student portal projection
// ---------------------------------------------------------------------------

/// A point on a student's progress-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub title: String,
    pub date: NaiveDate,
    pub percentage: i64,
}

/// Everything a student's own dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProgress {
    pub student: User,
    /// Most recent first.
    pub grades: Vec<GradeRecord>,
    /// Mean percentage rounded to one decimal place.
    pub average: f64,
    /// Mean percentage rounded to a whole number, for headline display.
    pub overall_average: i64,
    pub completed: usize,
    pub status: Status,
    pub mastery: Vec<SubjectAggregate>,
    pub weakest_subject: Option<String>,
}

impl StudentProgress {
    /// Grades in chronological order, for a line chart.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.grades
            .iter()
            .rev()
            .map(|g| TrendPoint {
                title: g.title.clone(),
                date: g.date,
                percentage: g.percentage,
            })
            .collect()
    }
}

/// Build the dashboard projection for a student, or `None` if the id does
/// not name a student.
pub fn student_progress<S: EntityStore + ?Sized>(store: &S, student_id: Id) -> Option<StudentProgress> {
    let Some(student) = store.find_user(student_id).filter(|u| u.is_student()) else {
        tracing::warn!(student_id, "progress requested for unknown student");
        return None;
    };

    let grades = grades_for_student(store, student_id);
    let mean = student_average(&grades);
    let average = round_one_decimal(mean);
    let mastery = subject_mastery(&grades);
    let weakest = weakest_subject(&mastery).map(str::to_string);

    Some(StudentProgress {
        student: student.without_secret(),
        completed: grades.len(),
        average,
        overall_average: round_half_up(mean) as i64,
        status: Status::for_average(average),
        mastery,
        weakest_subject: weakest,
        grades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, NewResult, Role};
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn student(id: Id, name: &str) -> User {
        User {
            id,
            name: name.into(),
            email: format!("{id}@school.com"),
            password: "pw".into(),
            role: Role::Student,
        }
    }

    fn assessment(id: Id, subject: &str, date: NaiveDate, max_score: f64) -> Assessment {
        Assessment {
            id,
            title: format!("Assessment {id}"),
            subject: subject.into(),
            date,
            max_score,
        }
    }

    fn result(id: Id, student_id: Id, assessment_id: Id, score: f64) -> AssessmentResult {
        AssessmentResult {
            id,
            student_id,
            assessment_id,
            score,
            feedback: "ok".into(),
        }
    }

    fn record(subject: &str, percentage: i64) -> GradeRecord {
        GradeRecord {
            result_id: 1,
            student_id: 1,
            assessment_id: 1,
            title: "t".into(),
            subject: subject.into(),
            date: date(2026, 1, 1),
            max_score: 100.0,
            score: percentage as f64,
            feedback: String::new(),
            percentage,
        }
    }

    fn mastery(entries: &[(&str, i64)]) -> Vec<SubjectAggregate> {
        entries
            .iter()
            .map(|&(subject, score)| SubjectAggregate {
                subject: subject.into(),
                score,
                full_mark: FULL_MARK,
            })
            .collect()
    }

    #[test]
    fn non_positive_max_score_uses_default_denominator() {
        assert_eq!(effective_max_score(0.0), 100.0);
        assert_eq!(effective_max_score(-20.0), 100.0);
        assert_eq!(percentage(45.0, 0.0), 45);
        assert_eq!(percentage(45.0, -1.0), 45);
        assert_eq!(percentage(48.0, 50.0), 96);
    }

    #[test]
    fn percentage_is_not_capped() {
        assert_eq!(percentage(60.0, 50.0), 120);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1.0, 8.0), 13); // 12.5
        assert_eq!(percentage(-1.0, 8.0), -12); // -12.5
        assert_eq!(round_one_decimal(66.25), 66.3);
    }

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(student_average(&[]), 0.0);
    }

    #[test]
    fn missing_assessment_degrades_to_placeholder() {
        let store = MemoryStore::new(Dataset {
            users: vec![student(2, "Ghost")],
            assessments: vec![],
            results: vec![result(1, 2, 404, 30.0)],
        });

        let grades = grades_for_student(&store, 2);
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].title, "Unknown Assessment");
        assert_eq!(grades[0].subject, "General");
        assert_eq!(grades[0].max_score, 100.0);
        assert_eq!(grades[0].date, date(2026, 1, 1));
        assert_eq!(grades[0].percentage, 30);
    }

    #[test]
    fn grades_sorted_most_recent_first_with_stable_ties() {
        let store = MemoryStore::new(Dataset {
            users: vec![student(2, "A")],
            assessments: vec![
                assessment(1, "X", date(2026, 1, 1), 100.0),
                assessment(2, "Y", date(2026, 3, 1), 100.0),
                assessment(3, "Z", date(2026, 3, 1), 100.0),
            ],
            results: vec![
                result(10, 2, 1, 10.0),
                result(11, 2, 2, 20.0),
                result(12, 2, 3, 30.0),
            ],
        });

        let ids: Vec<Id> = grades_for_student(&store, 2)
            .iter()
            .map(|g| g.result_id)
            .collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn history_keeps_recorded_order() {
        let store = MemoryStore::seeded();
        let ids: Vec<Id> = assessment_history(&store, 2)
            .iter()
            .map(|g| g.result_id)
            .collect();
        assert_eq!(ids, vec![1001, 1002, 1003, 1004, 1005]);
    }

    #[test]
    fn mastery_groups_in_first_seen_order() {
        let records = vec![
            record("Design", 80),
            record("Math", 61),
            record("Design", 91),
            record("", 50),
        ];
        let m = subject_mastery(&records);
        assert_eq!(
            m,
            vec![
                SubjectAggregate {
                    subject: "Design".into(),
                    score: 86, // 85.5 rounds up
                    full_mark: 100
                },
                SubjectAggregate {
                    subject: "Math".into(),
                    score: 61,
                    full_mark: 100
                },
                SubjectAggregate {
                    subject: "General".into(),
                    score: 50,
                    full_mark: 100
                },
            ]
        );
    }

    #[test]
    fn weakest_subject_tie_goes_to_first() {
        let m = mastery(&[("A", 60), ("B", 60), ("C", 70)]);
        assert_eq!(weakest_subject(&m), Some("A"));
    }

    #[test]
    fn weakest_subject_of_nothing_is_none() {
        assert_eq!(weakest_subject(&[]), None);
    }

    #[test]
    fn weakest_subject_picks_strict_minimum() {
        let m = mastery(&[("A", 90), ("B", 72), ("C", 71)]);
        assert_eq!(weakest_subject(&m), Some("C"));
    }

    #[test]
    fn exactly_seventy_is_not_at_risk() {
        let students = vec![
            StudentAggregate::new(1, "Edge", 70.0),
            StudentAggregate::new(2, "Below", 69.9),
            StudentAggregate::new(3, "Above", 88.0),
        ];
        let overview = summarize_class(&students);
        assert_eq!(overview.at_risk_count, 1);
        assert_eq!(students[0].status, Status::OnTrack);
        assert_eq!(students[1].status, Status::NeedsSupport);
        assert_eq!(overview.class_average, 76.0);
    }

    #[test]
    fn empty_class_overview() {
        let overview = class_overview(&MemoryStore::default());
        assert_eq!(overview.class_average, 0.0);
        assert_eq!(overview.at_risk_count, 0);
        assert_eq!(overview.student_count, 0);
    }

    #[test]
    fn seeded_class_overview() {
        let store = MemoryStore::seeded();
        let students = student_aggregates(&store);
        assert_eq!(students.len(), 10);

        let kavya = students.iter().find(|s| s.name == "Kavya Singh").unwrap();
        assert_eq!(kavya.average, 96.6);
        let arjun = students.iter().find(|s| s.name == "Arjun Reddy").unwrap();
        assert_eq!(arjun.average, 54.0);
        assert!(arjun.status.is_at_risk());

        let overview = class_overview(&store);
        assert_eq!(overview.class_average, 77.8);
        assert_eq!(overview.at_risk_count, 3);
        assert_eq!(overview.student_count, 10);
    }

    #[test]
    fn student_without_results_averages_zero() {
        let store = MemoryStore::new(Dataset {
            users: vec![student(5, "New Kid")],
            ..Dataset::default()
        });
        let aggregates = student_aggregates(&store);
        assert_eq!(aggregates[0].average, 0.0);
        assert_eq!(class_overview(&store).at_risk_count, 1);
    }

    #[test]
    fn aggregates_are_deterministic() {
        let store = MemoryStore::seeded();
        assert_eq!(student_aggregates(&store), student_aggregates(&store));
        assert_eq!(class_overview(&store), class_overview(&store));
    }

    #[test]
    fn new_results_are_reflected_immediately() {
        let mut store = MemoryStore::seeded();
        store
            .create_result(NewResult {
                student_id: 10,
                assessment_id: 101,
                score: 100.0,
                feedback: None,
            })
            .unwrap();
        let sid = student_aggregates(&store)
            .into_iter()
            .find(|s| s.id == 10)
            .unwrap();
        // (45 + 30 + 50 + 40 + 55 + 100) / 6
        assert_eq!(sid.average, 53.3);
    }

    #[test]
    fn seeded_student_progress() {
        let store = MemoryStore::seeded();
        let progress = student_progress(&store, 9).unwrap();

        assert_eq!(progress.student.name, "Anjali Menon");
        assert!(progress.student.password.is_empty());
        assert_eq!(progress.completed, 5);
        assert_eq!(progress.average, 66.2);
        assert_eq!(progress.overall_average, 66);
        assert_eq!(progress.status, Status::NeedsSupport);
        assert_eq!(progress.grades[0].title, "UI/UX Case Study");
        assert_eq!(progress.mastery.len(), 5);
        assert_eq!(progress.mastery[0].subject, "Design");
        assert_eq!(progress.weakest_subject.as_deref(), Some("Algorithms"));

        let trend = progress.trend();
        assert_eq!(trend.first().map(|p| p.title.as_str()), Some("Web Dev Basics"));
        assert_eq!(trend.last().map(|p| p.percentage), Some(70));
    }

    #[test]
    fn unknown_student_has_no_progress() {
        let store = MemoryStore::seeded();
        assert!(student_progress(&store, 4242).is_none());
        assert!(grades_for_student(&store, 4242).is_empty());
    }

    #[test]
    fn teacher_has_no_student_progress() {
        let store = MemoryStore::seeded();
        assert!(store.find_user(1).is_some_and(|u| u.is_teacher()));
        assert!(student_progress(&store, 1).is_none());
    }

    #[test]
    fn status_display() {
        assert_eq!(Status::OnTrack.to_string(), "On Track");
        assert_eq!(Status::NeedsSupport.to_string(), "Needs Support");
    }
}
