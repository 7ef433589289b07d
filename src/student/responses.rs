use serde::Serialize;

#[derive(Default, Serialize)]
pub struct TeacherItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub subject: String,
    pub available_slots: Vec<String>,
}

#[derive(Default, Serialize)]
pub struct SearchTeacherResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub teachers: Vec<TeacherItem>,
}

#[derive(Default, Serialize)]
pub struct BookAppointResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub appointment_id: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub id: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub date: String,
    pub time: String,
    pub purpose: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct StudentListResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
    pub teachers: Vec<TeacherItem>,
}

crate::impl_err_response! {
    SearchTeacherResponse,
    BookAppointResponse,
    StudentListResponse,
}
