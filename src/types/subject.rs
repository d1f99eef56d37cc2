use super::SubjectId;
use serde::{Deserialize, Serialize};

/// Whether a subject meets in single periods or contiguous blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubjectKind {
    Theory,
    Lab,
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectKind::Theory => write!(f, "THEORY"),
            SubjectKind::Lab => write!(f, "LAB"),
        }
    }
}

/// A subject taught to sections, with its weekly period demand
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub required_periods_per_week: u32,
    pub kind: SubjectKind,
    #[serde(default = "default_block_size")]
    pub block_size: u32,
}

fn default_block_size() -> u32 {
    1
}

impl Subject {
    /// `true` if blockSize/requiredPeriodsPerWeek obey §3's invariant for this subject's kind.
    pub fn has_valid_block_config(&self) -> bool {
        match self.kind {
            SubjectKind::Theory => self.block_size == 1,
            SubjectKind::Lab => {
                self.block_size >= 2
                    && self.required_periods_per_week % self.block_size == 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theory_requires_block_size_one() {
        let s = Subject {
            id: SubjectId("math".into()),
            required_periods_per_week: 5,
            kind: SubjectKind::Theory,
            block_size: 1,
        };
        assert!(s.has_valid_block_config());

        let bad = Subject {
            block_size: 2,
            ..s
        };
        assert!(!bad.has_valid_block_config());
    }

    #[test]
    fn lab_requires_divisible_periods() {
        let s = Subject {
            id: SubjectId("chem-lab".into()),
            required_periods_per_week: 4,
            kind: SubjectKind::Lab,
            block_size: 2,
        };
        assert!(s.has_valid_block_config());

        let bad = Subject {
            required_periods_per_week: 3,
            ..s
        };
        assert!(!bad.has_valid_block_config());
    }
}
