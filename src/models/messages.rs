use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A one-way note from a student to a teacher. Immutable once written.
/// `appointment_id` exists in the stored shape but no operation fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub student_name: String,
    pub teacher_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
