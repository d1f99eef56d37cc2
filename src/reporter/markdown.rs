use crate::scheduler::{encode, RunResult};
use crate::types::SchedulingInput;
use std::collections::HashMap;

const WEEKDAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn day_label(day: usize) -> String {
    WEEKDAY_NAMES
        .get(day)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Day {}", day + 1))
}

/// A Markdown report of one run: summary table, violation breakdowns (if
/// any), and one section-by-section table of scheduled rows.
pub fn generate_markdown_report(result: &RunResult, input: &SchedulingInput) -> String {
    let slot_index = input.slot_index();
    let rows = encode(&result.genes);

    let mut lines = vec![
        "# Timetable Report".to_string(),
        String::new(),
        format!("Generations executed: {}", result.generations_executed),
        format!("Fitness: {}", result.fitness),
        String::new(),
    ];

    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Sections | {} |", input.sections.len()));
    lines.push(format!("| Scheduled sessions | {} |", rows.len()));
    let hard_total: u32 = result.hard_breakdown.values().sum();
    lines.push(format!("| Hard violations | {} |", hard_total));
    lines.push(format!("| Cancelled early | {} |", result.cancelled));
    lines.push(String::new());

    if hard_total > 0 {
        lines.push("## Hard Violations\n".to_string());
        lines.push("| Rule | Count |".to_string());
        lines.push("|------|-------|".to_string());
        let mut kinds: Vec<_> = result
            .hard_breakdown
            .iter()
            .filter(|(_, &count)| count > 0)
            .collect();
        kinds.sort_by_key(|(k, _)| k.to_string());
        for (kind, count) in kinds {
            lines.push(format!("| {} | {} |", kind, count));
        }
        lines.push(String::new());
    } else {
        lines.push("## Soft Penalty Breakdown\n".to_string());
        lines.push("| Rule | Count |".to_string());
        lines.push("|------|-------|".to_string());
        let mut kinds: Vec<_> = result.soft_breakdown.iter().collect();
        kinds.sort_by_key(|(k, _)| k.to_string());
        for (kind, count) in kinds {
            lines.push(format!("| {} | {} |", kind, count));
        }
        lines.push(String::new());
    }

    let mut by_section: HashMap<&str, Vec<&crate::scheduler::ScheduleRow>> = HashMap::new();
    for row in &rows {
        by_section.entry(row.section_id.0.as_str()).or_default().push(row);
    }

    lines.push("## Sections\n".to_string());
    let mut section_ids: Vec<_> = by_section.keys().copied().collect();
    section_ids.sort();

    for section_id in section_ids {
        let name = input
            .sections
            .iter()
            .find(|s| s.id.0 == section_id)
            .map(|s| s.name.as_str())
            .unwrap_or(section_id);

        lines.push(format!("### {} ({})\n", name, section_id));
        lines.push("| Day | Period | Subject | Faculty | Room | Duration |".to_string());
        lines.push("|-----|--------|---------|---------|------|----------|".to_string());

        let mut section_rows = by_section[section_id].clone();
        section_rows.sort_by_key(|r| r.start_slot);

        for row in section_rows {
            let day = slot_index
                .day_of(row.start_slot)
                .map(day_label)
                .unwrap_or_else(|| "?".to_string());
            let period = slot_index
                .period_of(row.start_slot)
                .map(|p| (p + 1).to_string())
                .unwrap_or_else(|| "?".to_string());

            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                day, period, row.subject_id, row.faculty_id, row.room_id, row.duration
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
