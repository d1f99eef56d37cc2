use super::SoftBreakdown;
use crate::types::{FacultyId, Gene, SchedulingInput, SectionId, SlotId, SubjectId, SubjectKind};
use std::collections::HashMap;

/// §4.5 default weights, overridable via the caller's `weights` map.
pub fn default_soft_weights() -> HashMap<String, i64> {
    [
        ("section_gaps", 90),
        ("teacher_gaps", 70),
        ("repeat_same_day", 90),
        ("avoid_first_last", 30),
        ("over_daily_load", 80),
        ("faculty_daily_load", 50),
        ("too_many_labs", 60),
        ("lunch_missing", 200),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// §4.5: soft penalty breakdown and weighted total, computed only when the
/// chromosome is already hard-feasible (see [`super::evaluate`]).
pub fn score_soft_constraints(
    genes: &[Gene],
    input: &SchedulingInput,
    weights: &HashMap<String, i64>,
) -> (i64, SoftBreakdown) {
    let slot_index = input.slot_index();
    let mut p: SoftBreakdown = SoftBreakdown::new();

    // 1) section gaps: consecutive occupied slots on the same day
    let mut by_section_slots: HashMap<SectionId, Vec<SlotId>> = HashMap::new();
    for gene in genes {
        by_section_slots
            .entry(gene.section_id.clone())
            .or_default()
            .extend(gene.occupied_slots());
    }
    *p.entry("section_gaps".to_string()).or_insert(0) += sum_same_day_gaps(&by_section_slots, &slot_index);

    // 2) faculty gaps
    let mut by_faculty_slots: HashMap<FacultyId, Vec<SlotId>> = HashMap::new();
    for gene in genes {
        by_faculty_slots
            .entry(gene.faculty_id.clone())
            .or_default()
            .extend(gene.occupied_slots());
    }
    *p.entry("teacher_gaps".to_string()).or_insert(0) += sum_same_day_gaps(&by_faculty_slots, &slot_index);

    // 3) same subject repeated on the same day for a section
    let mut day_subject_hits: HashMap<(SectionId, usize, SubjectId), u32> = HashMap::new();
    for gene in genes {
        if let Some(day) = slot_index.day_of(gene.start_slot) {
            *day_subject_hits
                .entry((gene.section_id.clone(), day, gene.subject_id.clone()))
                .or_insert(0) += 1;
        }
    }
    let repeat_same_day: u32 = day_subject_hits
        .values()
        .filter(|&&cnt| cnt > 1)
        .map(|&cnt| cnt - 1)
        .sum();
    *p.entry("repeat_same_day".to_string()).or_insert(0) += repeat_same_day;

    // 4) first/last period of the day
    let pday = input.periods_per_day as usize;
    let day_bounds: Vec<(SlotId, SlotId)> = input
        .slot_order
        .chunks(pday)
        .filter(|chunk| chunk.len() == pday)
        .map(|chunk| (chunk[0], chunk[chunk.len() - 1]))
        .collect();
    let mut avoid_first_last = 0u32;
    for gene in genes {
        if let Some(day) = slot_index.day_of(gene.start_slot) {
            if let Some(&(first, last)) = day_bounds.get(day) {
                for s in gene.occupied_slots() {
                    if s == first {
                        avoid_first_last += 1;
                    }
                    if s == last {
                        avoid_first_last += 1;
                    }
                }
            }
        }
    }
    *p.entry("avoid_first_last".to_string()).or_insert(0) += avoid_first_last;

    // 5) over daily load per section
    let mut section_day_load: HashMap<(SectionId, usize), u32> = HashMap::new();
    for gene in genes {
        for s in gene.occupied_slots() {
            if let Some(day) = slot_index.day_of(s) {
                *section_day_load.entry((gene.section_id.clone(), day)).or_insert(0) += 1;
            }
        }
    }
    let over_daily_load: u32 = section_day_load.values().map(|&cnt| cnt.saturating_sub(5)).sum();
    *p.entry("over_daily_load".to_string()).or_insert(0) += over_daily_load;

    // 6) faculty daily load cap
    let mut faculty_day_load: HashMap<(FacultyId, usize), u32> = HashMap::new();
    for gene in genes {
        for s in gene.occupied_slots() {
            if let Some(day) = slot_index.day_of(s) {
                *faculty_day_load.entry((gene.faculty_id.clone(), day)).or_insert(0) += 1;
            }
        }
    }
    let faculty_daily_load: u32 = faculty_day_load.values().map(|&cnt| cnt.saturating_sub(6)).sum();
    *p.entry("faculty_daily_load".to_string()).or_insert(0) += faculty_daily_load;

    // 7) too many labs in a day, per section
    let mut section_day_labs: HashMap<(SectionId, usize), u32> = HashMap::new();
    for gene in genes {
        let is_lab = input
            .subject_by_id(&gene.subject_id)
            .map(|s| s.kind == SubjectKind::Lab)
            .unwrap_or(false);
        if is_lab {
            if let Some(day) = slot_index.day_of(gene.start_slot) {
                *section_day_labs.entry((gene.section_id.clone(), day)).or_insert(0) += 1;
            }
        }
    }
    let too_many_labs: u32 = section_day_labs.values().map(|&cnt| cnt.saturating_sub(1)).sum();
    *p.entry("too_many_labs".to_string()).or_insert(0) += too_many_labs;

    // 8) lunch slot unavailable for a section
    let mut occupied_by_section: HashMap<SectionId, std::collections::HashSet<SlotId>> = HashMap::new();
    for gene in genes {
        occupied_by_section
            .entry(gene.section_id.clone())
            .or_default()
            .extend(gene.occupied_slots());
    }
    let mut lunch_missing = 0u32;
    for section in &input.sections {
        let occupied = occupied_by_section.get(&section.id);
        let has_free_lunch_slot = input
            .lunch_slots
            .iter()
            .any(|s| !occupied.is_some_and(|set| set.contains(s)));
        if !input.lunch_slots.is_empty() && !has_free_lunch_slot {
            lunch_missing += 1;
        }
    }
    *p.entry("lunch_missing".to_string()).or_insert(0) += lunch_missing;

    let mut weighted_total: i64 = 0;
    let defaults = default_soft_weights();
    for (key, count) in &p {
        let weight = weights.get(key).or_else(|| defaults.get(key)).copied().unwrap_or(0);
        weighted_total += weight * (*count as i64);
    }

    (weighted_total, p)
}

fn sum_same_day_gaps<K: Eq + std::hash::Hash>(
    by_key_slots: &HashMap<K, Vec<SlotId>>,
    slot_index: &crate::types::SlotIndex,
) -> u32 {
    let mut total = 0u32;
    for slots in by_key_slots.values() {
        if slots.is_empty() {
            continue;
        }
        let mut sorted = slots.clone();
        sorted.sort_unstable();
        let mut prev_day = slot_index.day_of(sorted[0]);
        let mut prev_s = sorted[0];
        for &s in &sorted[1..] {
            let day = slot_index.day_of(s);
            if day == prev_day && day.is_some() && s > prev_s + 1 {
                total += s - prev_s - 1;
            }
            prev_day = day;
            prev_s = s;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurriculumEdge, Faculty, Room, RoomId, RoomType, Section, Subject, SubjectId};

    fn input_two_days() -> SchedulingInput {
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
            usable_slots: (1..=6).collect(),
            lunch_slots: [3, 4].into_iter().collect(),
            periods_per_day: 6,
            day_count: 1,
            slot_order: (1..=6).collect(),
        }
    }

    fn gene(start: u32) -> Gene {
        Gene {
            section_id: SectionId("sec-1".into()),
            subject_id: SubjectId("math".into()),
            faculty_id: FacultyId("f1".into()),
            room_id: RoomId("r1".into()),
            start_slot: start,
            block_size: 1,
        }
    }

    #[test]
    fn counts_section_gap_between_nonadjacent_slots() {
        let input = input_two_days();
        let genes = vec![gene(1), gene(5)];
        let weights = default_soft_weights();
        let (_total, breakdown) = score_soft_constraints(&genes, &input, &weights);
        assert_eq!(breakdown["section_gaps"], 3);
    }

    #[test]
    fn detects_lunch_missing_when_all_lunch_slots_occupied() {
        let input = input_two_days();
        let genes = vec![gene(3), gene(4)];
        let weights = default_soft_weights();
        let (_total, breakdown) = score_soft_constraints(&genes, &input, &weights);
        assert_eq!(breakdown["lunch_missing"], 1);
    }

    #[test]
    fn no_lunch_penalty_when_a_lunch_slot_is_free() {
        let input = input_two_days();
        let genes = vec![gene(1), gene(2)];
        let weights = default_soft_weights();
        let (_total, breakdown) = score_soft_constraints(&genes, &input, &weights);
        assert_eq!(breakdown["lunch_missing"], 0);
    }

    #[test]
    fn weighted_total_matches_default_weights() {
        let input = input_two_days();
        let genes = vec![gene(1), gene(5)];
        let weights = default_soft_weights();
        let (total, breakdown) = score_soft_constraints(&genes, &input, &weights);
        let expected: i64 = breakdown
            .iter()
            .map(|(k, v)| weights.get(k).copied().unwrap_or(0) * (*v as i64))
            .sum();
        assert_eq!(total, expected);
    }
}
