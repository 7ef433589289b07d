use serde::Deserialize;

#[derive(Deserialize)]
pub struct SetAppointStatusRequest {
    pub login_token: String,
    pub appointment_id: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct ListRequest {
    pub login_token: String,
}
