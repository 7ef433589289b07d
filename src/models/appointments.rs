use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const APPOINT_STATUS_PENDING: &str = "pending";
pub const APPOINT_STATUS_APPROVED: &str = "approved";
pub const APPOINT_STATUS_CANCELLED: &str = "cancelled";

/// A booking request. Student and teacher names are copied in at creation
/// time and never refreshed, so historical records keep the names as they
/// were when the slot was booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub student_name: String,
    pub teacher_name: String,
    pub date: String,
    pub time: String,
    pub purpose: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
