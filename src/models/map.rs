//! Playtest lifecycle state shared across the search core.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a map's playtest, mirrored by the database enum
/// `playtest_status` on `core.maps.playtesting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "playtest_status")]
pub enum PlaytestStatus {
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    Approved,
    Rejected,
}

impl PlaytestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaytestStatus::InProgress => "In Progress",
            PlaytestStatus::Approved => "Approved",
            PlaytestStatus::Rejected => "Rejected",
        }
    }
}
