//! Built-in classroom fixture.
//!
//! One teacher, ten students, five assessments and fifty results. Loaded by
//! [`MemoryStore::seeded`](crate::store::MemoryStore::seeded) at start-up.

use chrono::NaiveDate;

use crate::model::{Assessment, AssessmentResult, Dataset, Id, Role, User};

const USERS: &[(Id, &str, &str, Role)] = &[
    (1, "Rajesh Kumar", "teacher@school.com", Role::Teacher),
    (2, "Aaditya Patel", "aaditya@school.com", Role::Student),
    (3, "Diya Sharma", "diya@school.com", Role::Student),
    (4, "Rohan Desai", "rohan@school.com", Role::Student),
    (5, "Kavya Singh", "kavya@school.com", Role::Student),
    (6, "Arjun Reddy", "arjun@school.com", Role::Student),
    (7, "Neha Gupta", "neha@school.com", Role::Student),
    (8, "Vikram Iyer", "vikram@school.com", Role::Student),
    (9, "Anjali Menon", "anjali@school.com", Role::Student),
    (10, "Siddharth Joshi", "siddharth@school.com", Role::Student),
    (11, "Priya Verma", "priya@school.com", Role::Student),
];

// (id, title, (year, month, day), max score, subject)
const ASSESSMENTS: &[(Id, &str, (i32, u32, u32), f64, &str)] = &[
    (101, "Web Dev Basics", (2026, 1, 10), 100.0, "Frontend"),
    (102, "Data Structures Quiz", (2026, 1, 25), 50.0, "Algorithms"),
    (103, "Database Schema Design", (2026, 2, 5), 100.0, "Backend"),
    (104, "Midterm Exam", (2026, 2, 15), 100.0, "Mathematics"),
    (105, "UI/UX Case Study", (2026, 2, 20), 100.0, "Design"),
];

// (id, student, assessment, score, feedback)
const RESULTS: &[(Id, Id, Id, f64, &str)] = &[
    (1001, 2, 101, 92.0, "Great attention to detail."),
    (1002, 2, 102, 48.0, "Excellent logic."),
    (1003, 2, 103, 88.0, "Good ER diagram."),
    (1004, 2, 104, 95.0, "Perfect score on calculus."),
    (1005, 2, 105, 90.0, "Clean UI mockups."),

    (1006, 3, 101, 85.0, "CSS needs minor tweaks."),
    (1007, 3, 102, 42.0, "Review sorting algorithms."),
    (1008, 3, 103, 89.0, "Solid SQL queries."),
    (1009, 3, 104, 82.0, "Good effort."),
    (1010, 3, 105, 88.0, "Nice color palette choice."),

    (1011, 4, 101, 75.0, "Ensure elements are responsive."),
    (1012, 4, 102, 35.0, "Struggled with graphs."),
    (1013, 4, 103, 78.0, "Normalization needs work."),
    (1014, 4, 104, 72.0, "Review chapter 4."),
    (1015, 4, 105, 80.0, "Good user flow."),

    (1016, 5, 101, 98.0, "Flawless execution."),
    (1017, 5, 102, 50.0, "Perfect!"),
    (1018, 5, 103, 95.0, "Highly optimized database."),
    (1019, 5, 104, 96.0, "Outstanding."),
    (1020, 5, 105, 94.0, "Very professional presentation."),

    (1021, 6, 101, 60.0, "Incomplete assignment."),
    (1022, 6, 102, 20.0, "Please attend office hours."),
    (1023, 6, 103, 55.0, "Missing key tables."),
    (1024, 6, 104, 50.0, "Needs significant review."),
    (1025, 6, 105, 65.0, "Rushed work."),

    (1026, 7, 101, 80.0, "Good layout."),
    (1027, 7, 102, 38.0, "Watch out for off-by-one errors."),
    (1028, 7, 103, 75.0, "Decent understanding."),
    (1029, 7, 104, 85.0, "Solid math skills."),
    (1030, 7, 105, 78.0, "Wireframes are a bit messy."),

    (1031, 8, 101, 88.0, "Great JavaScript logic."),
    (1032, 8, 102, 45.0, "Good tree traversals."),
    (1033, 8, 103, 92.0, "Excellent use of indexes."),
    (1034, 8, 104, 89.0, "Very close to perfect."),
    (1035, 8, 105, 91.0, "Strong design principles."),

    (1036, 9, 101, 68.0, "Layout broke on mobile."),
    (1037, 9, 102, 28.0, "Review Big O notation."),
    (1038, 9, 103, 72.0, "Okay, but could be better."),
    (1039, 9, 104, 65.0, "Please double check your formulas."),
    (1040, 9, 105, 70.0, "Missed accessibility requirements."),

    (1041, 10, 101, 45.0, "Did not follow instructions."),
    (1042, 10, 102, 15.0, "See me after class."),
    (1043, 10, 103, 50.0, "Fundamental concepts missing."),
    (1044, 10, 104, 40.0, "Failed."),
    (1045, 10, 105, 55.0, "Needs a lot more detail."),

    (1046, 11, 101, 95.0, "Beautiful UI!"),
    (1047, 11, 102, 49.0, "One tiny syntax error, otherwise perfect."),
    (1048, 11, 103, 98.0, "Flawless schema."),
    (1049, 11, 104, 92.0, "Great analytical skills."),
    (1050, 11, 105, 96.0, "Highly intuitive UX."),
];

/// Shared secret for every seeded account.
const SEED_PASSWORD: &str = "123";

/// The fixture as owned collections.
pub fn dataset() -> Dataset {
    let users = USERS
        .iter()
        .map(|&(id, name, email, role)| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: SEED_PASSWORD.to_string(),
            role,
        })
        .collect();

    let assessments = ASSESSMENTS
        .iter()
        .filter_map(|&(id, title, (y, m, d), max_score, subject)| {
            Some(Assessment {
                id,
                title: title.to_string(),
                subject: subject.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                max_score,
            })
        })
        .collect();

    let results = RESULTS
        .iter()
        .map(|&(id, student_id, assessment_id, score, feedback)| AssessmentResult {
            id,
            student_id,
            assessment_id,
            score,
            feedback: feedback.to_string(),
        })
        .collect();

    Dataset {
        users,
        assessments,
        results,
    }
}
