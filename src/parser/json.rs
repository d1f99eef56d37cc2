use crate::error::{Result, SchedulerError};
use crate::types::{
    CurriculumEdge, Faculty, FacultyId, Room, ScheduleConfig, SchedulingInput, Section, SlotId,
    Subject,
};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Load a complete `SchedulingInput` from a directory of JSON record files
/// plus a `config.toml` describing the time-slot catalog.
pub fn load_input_from_dir(dir: &Path) -> Result<SchedulingInput> {
    let sections: Vec<Section> = load_json_file(&dir.join("sections.json"))?;
    let subjects: Vec<Subject> = load_json_file(&dir.join("subjects.json"))?;
    let rooms: Vec<Room> = load_json_file(&dir.join("rooms.json"))?;
    let faculty: Vec<Faculty> = load_json_file(&dir.join("faculty.json"))?;
    let curriculum: Vec<CurriculumEdge> = load_json_file(&dir.join("curriculum.json"))?;
    let faculty_unavailability = load_faculty_unavailability(&dir.join("faculty_unavailability.json"))?;
    let config = load_schedule_config_or_default(&dir.join("config.toml"));

    Ok(build_scheduling_input(
        sections,
        subjects,
        curriculum,
        rooms,
        faculty,
        faculty_unavailability,
        &config,
    ))
}

/// Assemble the derived slot catalog (`slotOrder`, `usableSlots`,
/// `lunchSlots`) from a `ScheduleConfig` and fold it together with the
/// loaded records into one `SchedulingInput`.
pub fn build_scheduling_input(
    sections: Vec<Section>,
    subjects: Vec<Subject>,
    curriculum: Vec<CurriculumEdge>,
    rooms: Vec<Room>,
    faculty: Vec<Faculty>,
    faculty_unavailability: HashMap<FacultyId, HashSet<SlotId>>,
    config: &ScheduleConfig,
) -> SchedulingInput {
    let periods_per_day = config.periods_per_day;
    let day_count = config.day_count;
    let slot_order: Vec<SlotId> = (1..=(periods_per_day * day_count)).collect();

    let holiday_days: HashSet<u32> = config.holiday_days.iter().copied().collect();
    let lunch_positions: HashSet<u32> = config.lunch_periods.iter().copied().collect();

    let mut usable_slots = HashSet::new();
    let mut lunch_slots = HashSet::new();

    for day in 0..day_count {
        if holiday_days.contains(&day) {
            continue;
        }
        let day_start = (day * periods_per_day) as usize;
        for pos in 0..periods_per_day {
            let Some(&slot) = slot_order.get(day_start + pos as usize) else {
                continue;
            };
            usable_slots.insert(slot);
            if lunch_positions.contains(&pos) {
                lunch_slots.insert(slot);
            }
        }
    }

    SchedulingInput {
        sections,
        subjects,
        curriculum,
        rooms,
        faculty,
        faculty_unavailability,
        usable_slots,
        lunch_slots,
        periods_per_day,
        day_count,
        slot_order,
    }
}

fn load_faculty_unavailability(path: &Path) -> Result<HashMap<FacultyId, HashSet<SlotId>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    load_json_file(path)
}

pub fn load_schedule_config_or_default(path: &Path) -> ScheduleConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => ScheduleConfig::default(),
        }
    } else {
        ScheduleConfig::default()
    }
}

/// Generic JSON file loader, shared by every record type.
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoomType, SubjectKind};

    #[test]
    fn builds_lunch_slots_from_config_positions() {
        let config = ScheduleConfig {
            periods_per_day: 6,
            day_count: 2,
            lunch_periods: vec![2, 3],
            holiday_days: vec![],
        };
        let input = build_scheduling_input(
            vec![],
            vec![],
            vec![],
            vec![Room {
                id: crate::types::RoomId("r1".into()),
                room_type: RoomType::Lecture,
                capacity: 10,
            }],
            vec![],
            HashMap::new(),
            &config,
        );
        // day 0: slots 1..6, lunch positions 2,3 -> slots 3,4
        // day 1: slots 7..12, lunch positions 2,3 -> slots 9,10
        assert_eq!(input.lunch_slots, [3, 4, 9, 10].into_iter().collect());
        assert_eq!(input.usable_slots.len(), 12);
    }

    #[test]
    fn holiday_days_are_excluded_from_usable_slots() {
        let config = ScheduleConfig {
            periods_per_day: 4,
            day_count: 2,
            lunch_periods: vec![],
            holiday_days: vec![1],
        };
        let input = build_scheduling_input(
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            HashMap::new(),
            &config,
        );
        assert_eq!(input.usable_slots.len(), 4);
        assert!(input.usable_slots.iter().all(|&s| s <= 4));
    }

    #[test]
    fn subject_kind_serde_round_trips_through_uppercase() {
        let json = r#"{"id":"math","requiredPeriodsPerWeek":3,"kind":"THEORY"}"#;
        let subject: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(subject.kind, SubjectKind::Theory);
        assert_eq!(subject.block_size, 1);
    }
}
