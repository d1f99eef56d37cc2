use crate::error::SchedulerError;
use crate::types::{FacultyId, SchedulingInput, SectionId, SubjectKind};
use std::collections::BTreeMap;

/// One session that must be placed: a subject taught by a faculty member,
/// at the given block size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandEntry {
    pub subject_id: crate::types::SubjectId,
    pub faculty_id: FacultyId,
    pub block_size: u32,
}

/// Derive, from curriculum edges and per-subject period counts, the
/// multiset of sessions each section must be scheduled for.
///
/// Theory subjects emit `required_periods_per_week` entries of block size
/// 1; lab subjects emit `required_periods_per_week / block_size` entries
/// of block size `block_size`. Fails with `InvalidLabConfig` if a lab
/// subject's period count does not divide evenly by its block size.
pub fn expand_demand(
    input: &SchedulingInput,
) -> anyhow::Result<BTreeMap<SectionId, Vec<DemandEntry>>> {
    let mut demand: BTreeMap<SectionId, Vec<DemandEntry>> = input
        .sections
        .iter()
        .map(|s| (s.id.clone(), Vec::new()))
        .collect();

    for edge in &input.curriculum {
        let subject = input.subject_by_id(&edge.subject_id).ok_or_else(|| {
            SchedulerError::UnknownReference {
                section_id: edge.section_id.0.clone(),
                what: "subject".to_string(),
                id: edge.subject_id.0.clone(),
            }
        })?;

        if !subject.has_valid_block_config() {
            return Err(SchedulerError::InvalidLabConfig {
                subject_id: subject.id.0.clone(),
                kind: subject.kind.to_string(),
                block_size: subject.block_size,
                required: subject.required_periods_per_week,
            }
            .into());
        }

        let block_size = match subject.kind {
            SubjectKind::Theory => 1,
            SubjectKind::Lab => subject.block_size,
        };
        let count = subject.required_periods_per_week / block_size;

        let entries = demand.entry(edge.section_id.clone()).or_default();
        for _ in 0..count {
            entries.push(DemandEntry {
                subject_id: edge.subject_id.clone(),
                faculty_id: edge.faculty_id.clone(),
                block_size,
            });
        }
    }

    Ok(demand)
}
