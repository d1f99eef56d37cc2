use crate::types::{FacultyId, Gene, RoomId, SectionId, SlotId, SubjectId};
use serde::{Deserialize, Serialize};

/// §4.8: one scheduled session, the row shape emitted for a chromosome.
/// One row per gene (one row per session) — per-period expansion is left
/// to callers that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub section_id: SectionId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
    pub room_id: RoomId,
    pub start_slot: SlotId,
    pub duration: u32,
}

impl From<&Gene> for ScheduleRow {
    fn from(gene: &Gene) -> Self {
        Self {
            section_id: gene.section_id.clone(),
            subject_id: gene.subject_id.clone(),
            faculty_id: gene.faculty_id.clone(),
            room_id: gene.room_id.clone(),
            start_slot: gene.start_slot,
            duration: gene.block_size,
        }
    }
}

pub fn encode(genes: &[Gene]) -> Vec<ScheduleRow> {
    genes.iter().map(ScheduleRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_one_row_per_gene() {
        let genes = vec![
            Gene {
                section_id: SectionId("sec-1".into()),
                subject_id: SubjectId("math".into()),
                faculty_id: FacultyId("f1".into()),
                room_id: RoomId("r1".into()),
                start_slot: 3,
                block_size: 2,
            },
            Gene {
                section_id: SectionId("sec-1".into()),
                subject_id: SubjectId("chem".into()),
                faculty_id: FacultyId("f2".into()),
                room_id: RoomId("lab1".into()),
                start_slot: 9,
                block_size: 1,
            },
        ];
        let rows = encode(&genes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration, 2);
        assert_eq!(rows[1].start_slot, 9);
    }
}
