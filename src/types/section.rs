use super::SectionId;
use serde::{Deserialize, Serialize};

/// A class of students to be scheduled as a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub student_count: u32,
}
