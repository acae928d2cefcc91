use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::NaiveDate;
use edutracker_core::analytics::{
    class_overview, grades_for_student, student_aggregates, subject_mastery,
};
use edutracker_core::model::{Assessment, AssessmentResult, Dataset, Role, User};
use edutracker_core::roster::{sort_by, SortDirection, SortKey};
use edutracker_core::MemoryStore;

/// A class of `students` students, each graded on `assessments` assessments.
fn make_store(students: u64, assessments: u64) -> MemoryStore {
    let users = (1..=students)
        .map(|id| User {
            id,
            name: format!("Student {id:04}"),
            email: format!("s{id}@school.com"),
            password: "pw".into(),
            role: Role::Student,
        })
        .collect();

    let subjects = ["Frontend", "Algorithms", "Backend", "Mathematics", "Design"];
    let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
    let assessment_list = (1..=assessments)
        .map(|id| Assessment {
            id,
            title: format!("Assessment {id}"),
            subject: subjects[(id as usize) % subjects.len()].to_string(),
            date: base + chrono::Days::new(id),
            max_score: if id % 3 == 0 { 50.0 } else { 100.0 },
        })
        .collect();

    let mut results = Vec::new();
    let mut next_id = 1;
    for student in 1..=students {
        for assessment in 1..=assessments {
            results.push(AssessmentResult {
                id: next_id,
                student_id: student,
                assessment_id: assessment,
                score: ((student * 7 + assessment * 13) % 50 + 30) as f64,
                feedback: String::new(),
            });
            next_id += 1;
        }
    }

    MemoryStore::new(Dataset {
        users,
        assessments: assessment_list,
        results,
    })
}

fn bench_class_overview(c: &mut Criterion) {
    let mut group = c.benchmark_group("class_overview");

    let small = make_store(10, 5);
    group.bench_function("10 students x 5 assessments", |b| {
        b.iter(|| class_overview(black_box(&small)))
    });

    let large = make_store(200, 40);
    group.bench_function("200 students x 40 assessments", |b| {
        b.iter(|| class_overview(black_box(&large)))
    });

    group.finish();
}

fn bench_student_view(c: &mut Criterion) {
    let store = make_store(200, 40);

    c.bench_function("grades_and_mastery", |b| {
        b.iter(|| {
            let grades = grades_for_student(black_box(&store), black_box(100));
            subject_mastery(&grades)
        })
    });
}

fn bench_roster_sort(c: &mut Criterion) {
    let store = make_store(200, 10);
    let students = student_aggregates(&store);

    c.bench_function("sort_by_average_desc", |b| {
        b.iter(|| sort_by(black_box(&students), SortKey::Average, SortDirection::Desc))
    });
}

criterion_group!(
    benches,
    bench_class_overview,
    bench_student_view,
    bench_roster_sort
);
criterion_main!(benches);
