use super::{Faculty, FacultyId, Room, Section, SectionId, SlotId, SlotIndex, Subject, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// `(sectionId, subjectId, facultyId)` — a section×subject appears on at
/// most one edge; the named faculty teaches every session of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumEdge {
    pub section_id: SectionId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
}

/// Everything the GA needs for one run, loaded once and treated as
/// immutable for the run's whole lifetime.
#[derive(Debug, Clone)]
pub struct SchedulingInput {
    pub sections: Vec<Section>,
    pub subjects: Vec<Subject>,
    pub curriculum: Vec<CurriculumEdge>,
    pub rooms: Vec<Room>,
    pub faculty: Vec<Faculty>,
    pub faculty_unavailability: HashMap<FacultyId, HashSet<SlotId>>,
    pub usable_slots: HashSet<SlotId>,
    pub lunch_slots: HashSet<SlotId>,
    pub periods_per_day: u32,
    pub day_count: u32,
    pub slot_order: Vec<SlotId>,
}

impl SchedulingInput {
    pub fn slot_index(&self) -> SlotIndex {
        SlotIndex::build(&self.slot_order, self.periods_per_day)
    }

    pub fn section_by_id(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn subject_by_id(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    pub fn room_by_id(&self, id: &super::RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn faculty_by_id(&self, id: &FacultyId) -> Option<&Faculty> {
        self.faculty.iter().find(|f| &f.id == id)
    }
}
