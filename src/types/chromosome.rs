use super::{Gene, SectionId};
use std::collections::BTreeMap;

/// A complete candidate timetable: every section's ordered list of genes.
///
/// Per-section invariant (maintained by the Initializer and preserved by
/// crossover/mutation): the multiset of `(subject_id, block_size)` equals
/// the demand produced by the Demand Expander for that section. A
/// `BTreeMap` keeps iteration order deterministic across runs with the
/// same seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chromosome {
    pub sections: BTreeMap<SectionId, Vec<Gene>>,
}

impl Chromosome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genes_for(&self, section_id: &SectionId) -> &[Gene] {
        self.sections
            .get(section_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn genes_for_mut(&mut self, section_id: &SectionId) -> &mut Vec<Gene> {
        self.sections.entry(section_id.clone()).or_default()
    }

    /// All genes across all sections, in section-id order.
    pub fn flatten(&self) -> Vec<Gene> {
        self.sections.values().flatten().cloned().collect()
    }

    pub fn gene_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }
}
