use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchTeacherRequest {
    pub login_token: String,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Deserialize)]
pub struct BookAppointRequest {
    pub login_token: String,
    pub teacher_id: String,
    pub date: String,
    pub time: String,
    pub purpose: String,
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub login_token: String,
    pub teacher_id: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ListRequest {
    pub login_token: String,
}
