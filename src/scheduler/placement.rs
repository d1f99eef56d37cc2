use crate::types::{RoomId, RoomType, SchedulingInput, SlotId};
use rand::Rng;
use std::collections::HashMap;

/// Caches the expensive-to-recompute, input-derived facts the Initializer
/// and mutation operator need on every call: legal block starts per block
/// size, and rooms grouped by type. Computed once at GA start and shared
/// read-only across worker threads.
#[derive(Debug)]
pub struct PlacementCache {
    valid_starts: HashMap<u32, Vec<SlotId>>,
    rooms_by_type: HashMap<RoomType, Vec<RoomId>>,
    all_rooms: Vec<RoomId>,
}

impl PlacementCache {
    pub fn build(input: &SchedulingInput) -> Self {
        let mut rooms_by_type: HashMap<RoomType, Vec<RoomId>> = HashMap::new();
        for room in &input.rooms {
            rooms_by_type
                .entry(room.room_type)
                .or_default()
                .push(room.id.clone());
        }

        Self {
            valid_starts: HashMap::new(),
            rooms_by_type,
            all_rooms: input.rooms.iter().map(|r| r.id.clone()).collect(),
        }
    }

    /// All `s` such that `{s, .., s + block_size - 1}` fits inside one day
    /// of usable slots. Cached per distinct block size within a run.
    pub fn valid_block_starts(&mut self, input: &SchedulingInput, block_size: u32) -> &[SlotId] {
        self.valid_starts
            .entry(block_size)
            .or_insert_with(|| compute_valid_block_starts(input, block_size))
    }

    pub fn rooms_of_capacity<'a>(
        &'a self,
        input: &'a SchedulingInput,
        room_type: RoomType,
        min_capacity: u32,
    ) -> impl Iterator<Item = &'a RoomId> + 'a {
        self.rooms_by_type
            .get(&room_type)
            .into_iter()
            .flatten()
            .filter(move |id| {
                input
                    .room_by_id(id)
                    .map(|r| r.capacity >= min_capacity)
                    .unwrap_or(false)
            })
    }

    pub fn all_rooms(&self) -> &[RoomId] {
        &self.all_rooms
    }

    pub fn rooms_of_type(&self, room_type: RoomType) -> &[RoomId] {
        self.rooms_by_type
            .get(&room_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn compute_valid_block_starts(input: &SchedulingInput, block_size: u32) -> Vec<SlotId> {
    let periods_per_day = input.periods_per_day as usize;
    if periods_per_day == 0 {
        return Vec::new();
    }

    let mut starts = Vec::new();
    for day_slots in input.slot_order.chunks(periods_per_day) {
        if day_slots.len() < periods_per_day {
            continue;
        }
        for window in day_slots.windows(block_size as usize) {
            if window.iter().all(|s| input.usable_slots.contains(s)) {
                starts.push(window[0]);
            }
        }
    }
    starts
}

/// §4.2: choose a room uniformly from the first non-empty pool, in order:
/// (1) type+capacity match, (2) capacity only, (3) type only, (4) any room.
pub fn pick_room<R: Rng + ?Sized>(
    input: &SchedulingInput,
    cache: &PlacementCache,
    room_type: RoomType,
    min_capacity: u32,
    rng: &mut R,
) -> Option<RoomId> {
    let by_type_and_cap: Vec<&RoomId> = cache.rooms_of_capacity(input, room_type, min_capacity).collect();
    if !by_type_and_cap.is_empty() {
        return Some(by_type_and_cap[rng.random_range(0..by_type_and_cap.len())].clone());
    }

    let by_cap: Vec<&RoomId> = input
        .rooms
        .iter()
        .filter(|r| r.capacity >= min_capacity)
        .map(|r| &r.id)
        .collect();
    if !by_cap.is_empty() {
        return Some(by_cap[rng.random_range(0..by_cap.len())].clone());
    }

    let by_type = cache.rooms_of_type(room_type);
    if !by_type.is_empty() {
        return Some(by_type[rng.random_range(0..by_type.len())].clone());
    }

    let all = cache.all_rooms();
    if all.is_empty() {
        return None;
    }
    Some(all[rng.random_range(0..all.len())].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Room, Section, SectionId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap as Map, HashSet};

    fn input_2days_4slots() -> SchedulingInput {
        SchedulingInput {
            sections: vec![Section {
                id: SectionId("s1".into()),
                name: "S1".into(),
                student_count: 20,
            }],
            subjects: vec![],
            curriculum: vec![],
            rooms: vec![
                Room {
                    id: RoomId("lab1".into()),
                    room_type: RoomType::Lab,
                    capacity: 25,
                },
                Room {
                    id: RoomId("lec1".into()),
                    room_type: RoomType::Lecture,
                    capacity: 40,
                },
            ],
            faculty: vec![],
            faculty_unavailability: Map::new(),
            usable_slots: (1..=8).collect(),
            lunch_slots: HashSet::new(),
            periods_per_day: 4,
            day_count: 2,
            slot_order: (1..=8).collect(),
        }
    }

    #[test]
    fn block_of_two_never_crosses_day_boundary() {
        let input = input_2days_4slots();
        let mut cache = PlacementCache::build(&input);
        let starts = cache.valid_block_starts(&input, 2).to_vec();

        for &s in &starts {
            let idx = input.slot_order.iter().position(|&x| x == s).unwrap();
            let day = idx / 4;
            let end_idx = input.slot_order.iter().position(|&x| x == s + 1).unwrap();
            assert_eq!(end_idx / 4, day, "block starting at {s} crosses a day boundary");
        }
        // starts 4 and 8 would overflow into slot 5/9: 4 is last-of-day-1 so a
        // block of 2 starting there would need slot 5 (day 2) - must be excluded.
        assert!(!starts.contains(&4));
        assert!(!starts.contains(&8));
    }

    #[test]
    fn pick_room_prefers_type_and_capacity() {
        let input = input_2days_4slots();
        let cache = PlacementCache::build(&input);
        let mut rng = StdRng::seed_from_u64(1);
        let room = pick_room(&input, &cache, RoomType::Lab, 20, &mut rng).unwrap();
        assert_eq!(room, RoomId("lab1".into()));
    }

    #[test]
    fn pick_room_falls_back_to_any_room() {
        let input = input_2days_4slots();
        let cache = PlacementCache::build(&input);
        let mut rng = StdRng::seed_from_u64(1);
        // No room of Lab type has capacity 1000; no room at all has that
        // capacity either, so it should fall back to type-only, then any.
        let room = pick_room(&input, &cache, RoomType::Lab, 1000, &mut rng);
        assert!(room.is_some());
    }
}
