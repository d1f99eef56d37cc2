use super::demand::DemandEntry;
use super::placement::{pick_room, PlacementCache};
use crate::types::{Chromosome, Gene, RoomType, SchedulingInput, SectionId, SlotId, SubjectKind};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Builds one chromosome by greedy, conflict-avoiding placement with a
/// last-resort fallback. Maintains three occupancy sets (per section, per
/// faculty, per room) and a subject-day set that forbids scheduling the
/// same subject twice a day for the same section — the hard rule evolution
/// must otherwise repair.
pub fn build_chromosome<R: Rng + ?Sized>(
    input: &SchedulingInput,
    demand: &BTreeMap<SectionId, Vec<DemandEntry>>,
    cache: &mut PlacementCache,
    rng: &mut R,
) -> Chromosome {
    let mut chromosome = Chromosome::new();

    let mut used_section: HashMap<SectionId, HashSet<SlotId>> = HashMap::new();
    let mut used_faculty: HashMap<crate::types::FacultyId, HashSet<SlotId>> = HashMap::new();
    let mut used_room: HashMap<crate::types::RoomId, HashSet<SlotId>> = HashMap::new();
    let mut subject_days: HashMap<(SectionId, crate::types::SubjectId), HashSet<usize>> =
        HashMap::new();

    let slot_index = input.slot_index();

    for (section_id, entries) in demand {
        let section = match input.section_by_id(section_id) {
            Some(s) => s,
            None => continue,
        };

        for entry in entries {
            let subject = match input.subject_by_id(&entry.subject_id) {
                Some(s) => s,
                None => continue,
            };
            let is_lab = subject.kind == SubjectKind::Lab;
            let room_type = if is_lab { RoomType::Lab } else { RoomType::Lecture };

            let mut starts = cache.valid_block_starts(input, entry.block_size).to_vec();
            starts.shuffle(rng);

            let mut placed = false;
            for &start in &starts {
                let day = match slot_index.day_of(start) {
                    Some(d) => d,
                    None => continue,
                };
                let key = (section_id.clone(), entry.subject_id.clone());
                if subject_days.get(&key).is_some_and(|days| days.contains(&day)) {
                    continue;
                }

                let occupied: Vec<SlotId> = (0..entry.block_size).map(|k| start + k).collect();

                let room_candidates = room_candidates_in_preference_order(
                    input,
                    cache,
                    room_type,
                    section.student_count,
                );

                for room_id in &room_candidates {
                    let section_free = occupied
                        .iter()
                        .all(|s| !used_section.get(section_id).is_some_and(|set| set.contains(s)));
                    let faculty_free = occupied.iter().all(|s| {
                        !used_faculty
                            .get(&entry.faculty_id)
                            .is_some_and(|set| set.contains(s))
                    });
                    let room_free = occupied
                        .iter()
                        .all(|s| !used_room.get(room_id).is_some_and(|set| set.contains(s)));

                    if section_free && faculty_free && room_free {
                        let gene = Gene {
                            section_id: section_id.clone(),
                            subject_id: entry.subject_id.clone(),
                            faculty_id: entry.faculty_id.clone(),
                            room_id: room_id.clone(),
                            start_slot: start,
                            block_size: entry.block_size,
                        };
                        record_usage(
                            &gene,
                            &occupied,
                            day,
                            &mut used_section,
                            &mut used_faculty,
                            &mut used_room,
                            &mut subject_days,
                        );
                        chromosome.genes_for_mut(section_id).push(gene);
                        placed = true;
                        break;
                    }
                }
                if placed {
                    break;
                }
            }

            if !placed {
                // Fallback: rare, and expected to be repaired by evolution.
                let start = starts
                    .choose(rng)
                    .copied()
                    .unwrap_or_else(|| input.usable_slots.iter().min().copied().unwrap_or(0));
                let room_id = pick_room(input, cache, room_type, section.student_count, rng);
                if let Some(room_id) = room_id {
                    let day = slot_index.day_of(start).unwrap_or(0);
                    let occupied: Vec<SlotId> = (0..entry.block_size).map(|k| start + k).collect();
                    let gene = Gene {
                        section_id: section_id.clone(),
                        subject_id: entry.subject_id.clone(),
                        faculty_id: entry.faculty_id.clone(),
                        room_id,
                        start_slot: start,
                        block_size: entry.block_size,
                    };
                    record_usage(
                        &gene,
                        &occupied,
                        day,
                        &mut used_section,
                        &mut used_faculty,
                        &mut used_room,
                        &mut subject_days,
                    );
                    chromosome.genes_for_mut(section_id).push(gene);
                }
            }
        }
    }

    chromosome
}

fn room_candidates_in_preference_order(
    input: &SchedulingInput,
    cache: &PlacementCache,
    room_type: RoomType,
    min_capacity: u32,
) -> Vec<crate::types::RoomId> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for id in cache.rooms_of_capacity(input, room_type, min_capacity) {
        if seen.insert(id.clone()) {
            candidates.push(id.clone());
        }
    }
    for room in &input.rooms {
        if room.capacity >= min_capacity && seen.insert(room.id.clone()) {
            candidates.push(room.id.clone());
        }
    }
    for id in cache.all_rooms() {
        if seen.insert(id.clone()) {
            candidates.push(id.clone());
        }
    }
    candidates
}

#[allow(clippy::too_many_arguments)]
fn record_usage(
    gene: &Gene,
    occupied: &[SlotId],
    day: usize,
    used_section: &mut HashMap<SectionId, HashSet<SlotId>>,
    used_faculty: &mut HashMap<crate::types::FacultyId, HashSet<SlotId>>,
    used_room: &mut HashMap<crate::types::RoomId, HashSet<SlotId>>,
    subject_days: &mut HashMap<(SectionId, crate::types::SubjectId), HashSet<usize>>,
) {
    used_section
        .entry(gene.section_id.clone())
        .or_default()
        .extend(occupied.iter().copied());
    used_faculty
        .entry(gene.faculty_id.clone())
        .or_default()
        .extend(occupied.iter().copied());
    used_room
        .entry(gene.room_id.clone())
        .or_default()
        .extend(occupied.iter().copied());
    subject_days
        .entry((gene.section_id.clone(), gene.subject_id.clone()))
        .or_default()
        .insert(day);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::demand::expand_demand;
    use crate::types::{CurriculumEdge, Faculty, FacultyId, Room, RoomId, Section, Subject, SubjectId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn s1_lab_input() -> SchedulingInput {
        SchedulingInput {
            sections: vec![Section {
                id: SectionId("sec-1".into()),
                name: "Sec 1".into(),
                student_count: 20,
            }],
            subjects: vec![Subject {
                id: SubjectId("chem".into()),
                required_periods_per_week: 4,
                kind: SubjectKind::Lab,
                block_size: 2,
            }],
            curriculum: vec![CurriculumEdge {
                section_id: SectionId("sec-1".into()),
                subject_id: SubjectId("chem".into()),
                faculty_id: FacultyId("f1".into()),
            }],
            rooms: vec![Room {
                id: RoomId("lab1".into()),
                room_type: RoomType::Lab,
                capacity: 25,
            }],
            faculty: vec![Faculty {
                id: FacultyId("f1".into()),
                max_weekly_load: 20,
            }],
            faculty_unavailability: HashMap::new(),
            usable_slots: (1..=8).collect(),
            lunch_slots: HashSet::new(),
            periods_per_day: 4,
            day_count: 2,
            slot_order: (1..=8).collect(),
        }
    }

    #[test]
    fn builds_feasible_chromosome_for_simple_lab_case() {
        let input = s1_lab_input();
        let demand = expand_demand(&input).unwrap();
        let mut cache = PlacementCache::build(&input);
        let mut rng = StdRng::seed_from_u64(42);

        let chromosome = build_chromosome(&input, &demand, &mut cache, &mut rng);
        let genes = chromosome.genes_for(&SectionId("sec-1".into()));
        assert_eq!(genes.len(), 2);
        assert!(genes.iter().all(|g| g.block_size == 2));

        // No two lab genes should land on the same day (subject-day rule).
        let slot_index = input.slot_index();
        let days: HashSet<usize> = genes
            .iter()
            .map(|g| slot_index.day_of(g.start_slot).unwrap())
            .collect();
        assert_eq!(days.len(), genes.len());
    }
}
