use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use timetable_ga::scheduler::{run_scheduler, GaParams};
use timetable_ga::types::{
    CurriculumEdge, Faculty, FacultyId, Room, RoomId, RoomType, Section, SectionId,
    SchedulingInput, Subject, SubjectId, SubjectKind,
};

fn small_input() -> SchedulingInput {
    let sections: Vec<Section> = (0..4)
        .map(|i| Section {
            id: SectionId(format!("sec-{i}")),
            name: format!("Section {i}"),
            student_count: 30,
        })
        .collect();
    let subjects = vec![
        Subject {
            id: SubjectId("math".into()),
            required_periods_per_week: 4,
            kind: SubjectKind::Theory,
            block_size: 1,
        },
        Subject {
            id: SubjectId("chem-lab".into()),
            required_periods_per_week: 4,
            kind: SubjectKind::Lab,
            block_size: 2,
        },
    ];
    let faculty: Vec<Faculty> = (0..4)
        .map(|i| Faculty {
            id: FacultyId(format!("f-{i}")),
            max_weekly_load: 20,
        })
        .collect();
    let rooms = vec![
        Room {
            id: RoomId("r1".into()),
            room_type: RoomType::Lecture,
            capacity: 40,
        },
        Room {
            id: RoomId("r2".into()),
            room_type: RoomType::Lecture,
            capacity: 40,
        },
        Room {
            id: RoomId("lab1".into()),
            room_type: RoomType::Lab,
            capacity: 24,
        },
    ];
    let curriculum: Vec<CurriculumEdge> = sections
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            vec![
                CurriculumEdge {
                    section_id: s.id.clone(),
                    subject_id: SubjectId("math".into()),
                    faculty_id: FacultyId(format!("f-{}", i % 4)),
                },
                CurriculumEdge {
                    section_id: s.id.clone(),
                    subject_id: SubjectId("chem-lab".into()),
                    faculty_id: FacultyId(format!("f-{}", (i + 1) % 4)),
                },
            ]
        })
        .collect();

    let periods_per_day = 8;
    let day_count = 5;
    let slot_order: Vec<_> = (1..=(periods_per_day * day_count)).collect();
    let usable_slots: HashSet<_> = slot_order.iter().copied().collect();

    SchedulingInput {
        sections,
        subjects,
        curriculum,
        rooms,
        faculty,
        faculty_unavailability: HashMap::new(),
        usable_slots,
        lunch_slots: HashSet::new(),
        periods_per_day,
        day_count,
        slot_order,
    }
}

fn bench_run_scheduler(c: &mut Criterion) {
    let input = small_input();
    c.bench_function("run_scheduler_small_30_generations", |b| {
        b.iter(|| {
            let params = GaParams {
                population_size: 40,
                generations: 30,
                seed: Some(7),
                ..GaParams::default()
            };
            let result =
                run_scheduler(black_box(&input), &params, Arc::new(AtomicBool::new(false)), None)
                    .unwrap();
            black_box(result.fitness)
        })
    });
}

criterion_group!(benches, bench_run_scheduler);
criterion_main!(benches);
