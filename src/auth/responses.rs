use serde::Serialize;

#[derive(Default, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub user_id: String,
    pub pending_approval: bool,
}

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub kind: String,
    pub err: String,
    pub login_token: String,
    pub user_id: String,
    pub name: String,
    pub role: String,
}

crate::impl_err_response! {
    RegisterResponse,
    LoginResponse,
}
