use crate::scheduler::{encode, RunResult};
use crate::types::SchedulingInput;
use colored::Colorize;
use std::collections::HashMap;

/// A colorized terminal-friendly text report, mirroring the markdown report's
/// content but without tables.
pub fn generate_text_report(result: &RunResult, input: &SchedulingInput) -> String {
    let rows = encode(&result.genes);
    let hard_total: u32 = result.hard_breakdown.values().sum();

    let mut lines = Vec::new();
    lines.push("═".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generations executed: {}", result.generations_executed));
    lines.push(format!("Fitness:              {}", result.fitness));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if hard_total == 0 {
        lines.push("HARD CONSTRAINTS: SATISFIED".green().to_string());
    } else {
        lines.push("HARD CONSTRAINTS: VIOLATED".red().to_string());
        let mut kinds: Vec<_> = result
            .hard_breakdown
            .iter()
            .filter(|(_, &count)| count > 0)
            .collect();
        kinds.sort_by_key(|(k, _)| k.to_string());
        for (kind, count) in kinds {
            lines.push(format!("  ! {}: {}", kind, count));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    let mut by_section: HashMap<&str, Vec<&crate::scheduler::ScheduleRow>> = HashMap::new();
    for row in &rows {
        by_section.entry(row.section_id.0.as_str()).or_default().push(row);
    }

    lines.push("SECTIONS".to_string());
    lines.push("─".repeat(40));

    let mut section_ids: Vec<_> = by_section.keys().copied().collect();
    section_ids.sort();

    for section_id in section_ids {
        let name = input
            .sections
            .iter()
            .find(|s| s.id.0 == section_id)
            .map(|s| s.name.as_str())
            .unwrap_or(section_id);
        let mut section_rows = by_section[section_id].clone();
        section_rows.sort_by_key(|r| r.start_slot);

        lines.push(format!("\n{} ({} sessions)", name.bold(), section_rows.len()));
        for row in section_rows {
            lines.push(format!(
                "  slot {} | {} | {} | {} | {}p",
                row.start_slot, row.subject_id, row.faculty_id, row.room_id, row.duration
            ));
        }
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout, used by the `run` subcommand after
/// the run completes.
pub fn print_summary(result: &RunResult) {
    let hard_total: u32 = result.hard_breakdown.values().sum();
    println!();
    if hard_total == 0 {
        println!("{}", "✓ Feasible timetable found".green().bold());
    } else {
        println!("{}", "✗ Timetable still has hard violations".red().bold());
    }
    println!();
    println!("  Generations: {}", result.generations_executed);
    println!("  Fitness:     {}", result.fitness);
    println!("  Hard total:  {}", hard_total);
    println!("  Cancelled:   {}", result.cancelled);
    println!();
}
