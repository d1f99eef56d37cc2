use super::{FacultyId, RoomId, SectionId, SlotId, SubjectId};
use serde::{Deserialize, Serialize};

/// A single scheduled session: one section meeting one subject with one
/// faculty member in one room, starting at `start_slot`.
///
/// Immutable by convention: mutation operators build a new `Gene` rather
/// than updating one in place, so a rejected mutation is just "don't keep
/// the new value" instead of an explicit undo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub section_id: SectionId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
    pub room_id: RoomId,
    pub start_slot: SlotId,
    pub block_size: u32,
}

impl Gene {
    /// The slots this session occupies: `{start_slot, ..., start_slot + block_size - 1}`.
    pub fn occupied_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.block_size).map(move |k| self.start_slot + k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(start: SlotId, block_size: u32) -> Gene {
        Gene {
            section_id: SectionId("s1".into()),
            subject_id: SubjectId("math".into()),
            faculty_id: FacultyId("f1".into()),
            room_id: RoomId("r1".into()),
            start_slot: start,
            block_size,
        }
    }

    #[test]
    fn occupied_slots_is_contiguous() {
        let g = gene(10, 3);
        assert_eq!(g.occupied_slots().collect::<Vec<_>>(), vec![10, 11, 12]);
    }

    #[test]
    fn theory_gene_occupies_one_slot() {
        let g = gene(4, 1);
        assert_eq!(g.occupied_slots().collect::<Vec<_>>(), vec![4]);
    }
}
