mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::scheduler::{encode, RunResult};
use crate::types::{FacultyId, SchedulingInput, SectionId};
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all requested reports and write them to `output_dir`.
pub fn generate_reports(
    result: &RunResult,
    input: &SchedulingInput,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(result)?;
                fs::write(output_dir.join("schedule.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(result, input);
                fs::write(output_dir.join("schedule.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(result, input);
                fs::write(output_dir.join("schedule.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// A single section's weekly sessions, sorted by start slot. `None` if the
/// section id isn't in the input at all.
pub fn section_extract(
    result: &RunResult,
    input: &SchedulingInput,
    section_id: &SectionId,
) -> Option<String> {
    let section = input.section_by_id(section_id)?;
    let mut rows: Vec<_> = encode(&result.genes)
        .into_iter()
        .filter(|r| &r.section_id == section_id)
        .collect();
    rows.sort_by_key(|r| r.start_slot);

    let mut lines = vec![format!("# Schedule for {} ({})", section.name, section.id)];
    if rows.is_empty() {
        lines.push("No sessions scheduled.".to_string());
    } else {
        for row in rows {
            lines.push(format!(
                "- slot {} ({}p): {} with {} in {}",
                row.start_slot, row.duration, row.subject_id, row.faculty_id, row.room_id
            ));
        }
    }
    Some(lines.join("\n"))
}

/// A single faculty member's weekly teaching load, sorted by start slot.
/// `None` if the faculty id isn't in the input at all.
pub fn faculty_extract(
    result: &RunResult,
    input: &SchedulingInput,
    faculty_id: &FacultyId,
) -> Option<String> {
    let faculty = input.faculty_by_id(faculty_id)?;
    let mut rows: Vec<_> = encode(&result.genes)
        .into_iter()
        .filter(|r| &r.faculty_id == faculty_id)
        .collect();
    rows.sort_by_key(|r| r.start_slot);

    let mut lines = vec![format!("# Teaching load for {}", faculty.id)];
    if rows.is_empty() {
        lines.push("No sessions assigned.".to_string());
    } else {
        lines.push(format!("Sessions: {}\n", rows.len()));
        for row in rows {
            lines.push(format!(
                "- slot {} ({}p): {} for {} in {}",
                row.start_slot, row.duration, row.subject_id, row.section_id, row.room_id
            ));
        }
    }
    Some(lines.join("\n"))
}
