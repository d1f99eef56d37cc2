use super::RoomId;
use serde::{Deserialize, Serialize};

/// Room type, matched against subject kind in §4.4's `room_type_mismatch` rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Lecture,
    Lab,
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomType::Lecture => write!(f, "LECTURE"),
            RoomType::Lab => write!(f, "LAB"),
        }
    }
}

/// A physical room available for scheduling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
}
