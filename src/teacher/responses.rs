use serde::Serialize;

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub date: String,
    pub time: String,
    pub purpose: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct MessageItem {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub content: String,
    pub sent_at: String,
}

#[derive(Default, Serialize)]
pub struct TeacherListResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
    pub messages: Vec<MessageItem>,
}

crate::impl_err_response! {
    TeacherListResponse,
}
