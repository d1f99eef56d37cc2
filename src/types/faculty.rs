use super::FacultyId;
use serde::{Deserialize, Serialize};

/// A faculty member who can be assigned teaching sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: FacultyId,
    pub max_weekly_load: u32,
}
