use serde::Deserialize;

#[derive(Deserialize)]
pub struct ApproveStudentRequest {
    pub login_token: String,
    pub student_id: String,
}

#[derive(Deserialize)]
pub struct RejectStudentRequest {
    pub login_token: String,
    pub student_id: String,
}

#[derive(Deserialize)]
pub struct RemoveTeacherRequest {
    pub login_token: String,
    pub teacher_id: String,
}

#[derive(Deserialize)]
pub struct ListRequest {
    pub login_token: String,
}
