use serde::Serialize;

#[derive(Default, Serialize)]
pub struct PendingStudentItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub registered_at: String,
}

#[derive(Default, Serialize)]
pub struct TeacherItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub subject: String,
}

#[derive(Default, Serialize)]
pub struct AdminListResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub students: Vec<PendingStudentItem>,
    pub teachers: Vec<TeacherItem>,
}

crate::impl_err_response! {
    AdminListResponse,
}
