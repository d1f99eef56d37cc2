use crate::error::SchedulerError;
use crate::types::{FacultyId, RoomId, SchedulingInput, SectionId, SubjectId};
use std::collections::HashSet;

/// Cross-reference validation run once before a GA starts: duplicate IDs,
/// curriculum edges pointing at records that don't exist, curriculum
/// edges duplicated for the same section×subject pair, and subjects whose
/// blockSize/requiredPeriodsPerWeek combination is invalid for their kind.
pub fn validate_input(input: &SchedulingInput) -> crate::error::Result<()> {
    if input.sections.is_empty() {
        return Err(SchedulerError::EmptyInput("no sections".to_string()).into());
    }
    if input.subjects.is_empty() {
        return Err(SchedulerError::EmptyInput("no subjects".to_string()).into());
    }
    if input.rooms.is_empty() {
        return Err(SchedulerError::NoRoomOfAnyKind.into());
    }
    if input.curriculum.is_empty() {
        return Err(SchedulerError::EmptyInput("no curriculum edges".to_string()).into());
    }
    if input.usable_slots.is_empty() {
        return Err(SchedulerError::NoUsableSlots.into());
    }

    check_duplicates("section", input.sections.iter().map(|s| &s.id))?;
    check_duplicates("subject", input.subjects.iter().map(|s| &s.id))?;
    check_duplicates("room", input.rooms.iter().map(|r| &r.id))?;
    check_duplicates("faculty", input.faculty.iter().map(|f| &f.id))?;

    let section_ids: HashSet<&SectionId> = input.sections.iter().map(|s| &s.id).collect();
    let subject_ids: HashSet<&SubjectId> = input.subjects.iter().map(|s| &s.id).collect();
    let faculty_ids: HashSet<&FacultyId> = input.faculty.iter().map(|f| &f.id).collect();
    let room_ids: HashSet<&RoomId> = input.rooms.iter().map(|r| &r.id).collect();
    let _ = &room_ids; // rooms are validated per-gene at runtime, not per curriculum edge

    let mut seen_edges: HashSet<(&SectionId, &SubjectId)> = HashSet::new();
    for edge in &input.curriculum {
        if !section_ids.contains(&edge.section_id) {
            return Err(SchedulerError::UnknownReference {
                section_id: edge.section_id.0.clone(),
                what: "section".to_string(),
                id: edge.section_id.0.clone(),
            }
            .into());
        }
        if !subject_ids.contains(&edge.subject_id) {
            return Err(SchedulerError::UnknownReference {
                section_id: edge.section_id.0.clone(),
                what: "subject".to_string(),
                id: edge.subject_id.0.clone(),
            }
            .into());
        }
        if !faculty_ids.contains(&edge.faculty_id) {
            return Err(SchedulerError::UnknownReference {
                section_id: edge.section_id.0.clone(),
                what: "faculty".to_string(),
                id: edge.faculty_id.0.clone(),
            }
            .into());
        }
        if !seen_edges.insert((&edge.section_id, &edge.subject_id)) {
            return Err(SchedulerError::DuplicateCurriculumEdge {
                section_id: edge.section_id.0.clone(),
                subject_id: edge.subject_id.0.clone(),
            }
            .into());
        }
    }

    for subject in &input.subjects {
        if !subject.has_valid_block_config() {
            return Err(SchedulerError::InvalidLabConfig {
                subject_id: subject.id.0.clone(),
                kind: subject.kind.to_string(),
                block_size: subject.block_size,
                required: subject.required_periods_per_week,
            }
            .into());
        }
    }

    Ok(())
}

fn check_duplicates<'a, T: Eq + std::hash::Hash + std::fmt::Display + 'a>(
    id_type: &str,
    ids: impl Iterator<Item = &'a T>,
) -> crate::error::Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SchedulerError::DuplicateId {
                id_type: id_type.to_string(),
                id: id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurriculumEdge, Faculty, Room, RoomType, Section, Subject, SubjectKind};
    use std::collections::HashMap;

    fn valid_input() -> SchedulingInput {
        SchedulingInput {
            sections: vec![Section {
                id: SectionId("sec-1".into()),
                name: "Sec 1".into(),
                student_count: 20,
            }],
            subjects: vec![Subject {
                id: SubjectId("math".into()),
                required_periods_per_week: 2,
                kind: SubjectKind::Theory,
                block_size: 1,
            }],
            curriculum: vec![CurriculumEdge {
                section_id: SectionId("sec-1".into()),
                subject_id: SubjectId("math".into()),
                faculty_id: FacultyId("f1".into()),
            }],
            rooms: vec![Room {
                id: RoomId("r1".into()),
                room_type: RoomType::Lecture,
                capacity: 30,
            }],
            faculty: vec![Faculty {
                id: FacultyId("f1".into()),
                max_weekly_load: 10,
            }],
            faculty_unavailability: HashMap::new(),
            usable_slots: (1..=5).collect(),
            lunch_slots: HashSet::new(),
            periods_per_day: 5,
            day_count: 1,
            slot_order: (1..=5).collect(),
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_input(&valid_input()).is_ok());
    }

    #[test]
    fn rejects_curriculum_edge_with_unknown_subject() {
        let mut input = valid_input();
        input.curriculum[0].subject_id = SubjectId("missing".into());
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("unknown subject"));
    }

    #[test]
    fn rejects_duplicate_curriculum_edge() {
        let mut input = valid_input();
        input.curriculum.push(input.curriculum[0].clone());
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("more than one curriculum edge"));
    }

    #[test]
    fn rejects_duplicate_section_ids() {
        let mut input = valid_input();
        input.sections.push(input.sections[0].clone());
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("Duplicate ID"));
    }

    #[test]
    fn rejects_empty_curriculum() {
        let mut input = valid_input();
        input.curriculum.clear();
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("curriculum"));
    }

    #[test]
    fn rejects_invalid_lab_block_config() {
        let mut input = valid_input();
        input.subjects[0].kind = SubjectKind::Lab;
        input.subjects[0].block_size = 2;
        input.subjects[0].required_periods_per_week = 3;
        let err = validate_input(&input).unwrap_err();
        assert!(err.to_string().contains("blockSize"));
    }
}
