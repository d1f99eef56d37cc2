use super::HardBreakdown;
use crate::types::{FacultyId, Gene, RoomId, RoomType, SchedulingInput, SectionId, SlotId, SubjectId, SubjectKind};
use std::collections::{HashMap, HashSet};

const HARD_RULE_KINDS: &[&str] = &[
    "missing_reference",
    "faculty_unavailable",
    "slot_not_usable",
    "room_type_mismatch",
    "room_capacity",
    "lab_block_size_wrong",
    "lab_crosses_day",
    "teacher_overlap",
    "room_overlap",
    "section_overlap",
    "subject_daily_repeat",
    "subject_weekly_quota",
];

/// §4.4: hard constraint breakdown. Every gene is checked against every
/// rule; nothing short-circuits so the returned map is a complete
/// diagnostic even when the chromosome is ultimately disqualified.
pub fn check_hard_constraints(genes: &[Gene], input: &SchedulingInput) -> HardBreakdown {
    let mut v: HardBreakdown = HARD_RULE_KINDS.iter().map(|k| (k.to_string(), 0)).collect();
    let slot_index = input.slot_index();

    let mut teacher_at_slot: HashSet<(FacultyId, SlotId)> = HashSet::new();
    let mut room_at_slot: HashSet<(RoomId, SlotId)> = HashSet::new();
    let mut section_at_slot: HashSet<(SectionId, SlotId)> = HashSet::new();
    let mut subject_day_hits: HashMap<(SectionId, SubjectId), Vec<usize>> = HashMap::new();

    for gene in genes {
        let subject = input.subject_by_id(&gene.subject_id);
        let section = input.section_by_id(&gene.section_id);
        let room = input.room_by_id(&gene.room_id);
        let faculty = input.faculty_by_id(&gene.faculty_id);

        if subject.is_none() || section.is_none() || room.is_none() || faculty.is_none() {
            *v.get_mut("missing_reference").unwrap() += 1;
        }

        // Each rule below only needs the references it names, so a gene
        // missing one reference still gets checked against every rule that
        // doesn't depend on it — a bad room_id must not hide a real
        // faculty double-booking, for example.
        let occupied: Vec<SlotId> = gene.occupied_slots().collect();

        if faculty.is_some() {
            if let Some(unavailable) = input.faculty_unavailability.get(&gene.faculty_id) {
                let hits = occupied.iter().filter(|s| unavailable.contains(s)).count() as u32;
                *v.get_mut("faculty_unavailable").unwrap() += hits;
            }
        }

        let not_usable = occupied
            .iter()
            .filter(|s| !input.usable_slots.contains(s))
            .count() as u32;
        *v.get_mut("slot_not_usable").unwrap() += not_usable;

        let wants_lab = subject.map(|s| s.kind == SubjectKind::Lab).unwrap_or(false);

        if let (Some(room), Some(_)) = (room, subject) {
            let room_ok = room.room_type
                == if wants_lab {
                    RoomType::Lab
                } else {
                    RoomType::Lecture
                };
            if !room_ok {
                *v.get_mut("room_type_mismatch").unwrap() += 1;
            }
        }

        if let (Some(room), Some(section)) = (room, section) {
            if room.capacity < section.student_count {
                *v.get_mut("room_capacity").unwrap() += 1;
            }
        }

        if let Some(subject) = subject {
            if wants_lab {
                if gene.block_size != subject.block_size {
                    *v.get_mut("lab_block_size_wrong").unwrap() += 1;
                }
                let days: HashSet<Option<usize>> =
                    occupied.iter().map(|s| slot_index.day_of(*s)).collect();
                if days.len() > 1 {
                    *v.get_mut("lab_crosses_day").unwrap() += 1;
                }
            }
        }

        for &s in &occupied {
            if faculty.is_some() && !teacher_at_slot.insert((gene.faculty_id.clone(), s)) {
                *v.get_mut("teacher_overlap").unwrap() += 1;
            }
            if room.is_some() && !room_at_slot.insert((gene.room_id.clone(), s)) {
                *v.get_mut("room_overlap").unwrap() += 1;
            }
            if section.is_some() && !section_at_slot.insert((gene.section_id.clone(), s)) {
                *v.get_mut("section_overlap").unwrap() += 1;
            }
        }

        if subject.is_some() {
            if let Some(day) = slot_index.day_of(gene.start_slot) {
                subject_day_hits
                    .entry((gene.section_id.clone(), gene.subject_id.clone()))
                    .or_default()
                    .push(day);
            }
        }
    }

    let mut daily_repeat = 0u32;
    for days in subject_day_hits.values() {
        let unique: HashSet<usize> = days.iter().copied().collect();
        if unique.len() < days.len() {
            daily_repeat += (days.len() - unique.len()) as u32;
        }
    }
    *v.get_mut("subject_daily_repeat").unwrap() += daily_repeat;
    *v.get_mut("subject_weekly_quota").unwrap() += weekly_quota_deficit(genes, input);

    v
}

fn weekly_quota_deficit(genes: &[Gene], input: &SchedulingInput) -> u32 {
    let mut required: HashMap<(SectionId, SubjectId), u32> = HashMap::new();
    for edge in &input.curriculum {
        let Some(subject) = input.subject_by_id(&edge.subject_id) else {
            continue;
        };
        required.insert(
            (edge.section_id.clone(), edge.subject_id.clone()),
            subject.required_periods_per_week,
        );
    }

    let mut have: HashMap<(SectionId, SubjectId), u32> = HashMap::new();
    for gene in genes {
        *have
            .entry((gene.section_id.clone(), gene.subject_id.clone()))
            .or_insert(0) += gene.block_size;
    }

    let mut keys: HashSet<(SectionId, SubjectId)> = required.keys().cloned().collect();
    keys.extend(have.keys().cloned());

    keys.iter()
        .map(|k| {
            let need = required.get(k).copied().unwrap_or(0);
            let got = have.get(k).copied().unwrap_or(0);
            need.abs_diff(got)
        })
        .sum()
}
