use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slot labels given to every new teacher profile. Not editable in scope.
pub const DEFAULT_SLOTS: [&str; 6] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

/// Scheduling-facing shadow of a teacher [`User`](crate::models::users::User).
/// Shares the user's id; the two records are created and deleted together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub subject: String,
    pub available_slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

pub fn default_slots() -> Vec<String> {
    DEFAULT_SLOTS.iter().map(|slot| slot.to_string()).collect()
}
