mod requests;
mod responses;

use actix_web::{post, web, HttpResponse, Responder};

use crate::domain::{Domain, Registration};
use crate::error::DomainError;
use crate::protocol::SimpleResponse;

use self::requests::*;
use self::responses::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(logout);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, RegisterResponse),
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
}

async fn register_impl(
    domain: web::Data<Domain>,
    info: web::Json<RegisterRequest>,
) -> Result<RegisterResponse, DomainError> {
    let info = info.into_inner();

    let user = domain
        .register(Registration {
            email: info.email,
            password: info.password,
            name: info.name,
            role: info.role,
            department: info.department,
            subject: info.subject,
        })
        .await?;

    Ok(RegisterResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        user_id: user.id,
        // Students wait for an administrator before they can log in.
        pending_approval: !user.is_approved,
    })
}

async fn login_impl(
    domain: web::Data<Domain>,
    info: web::Json<LoginRequest>,
) -> Result<LoginResponse, DomainError> {
    let info = info.into_inner();

    let user = domain.authenticate(&info.email, &info.password).await?;
    let login_token = domain.open_session(&user).await?;

    Ok(LoginResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        login_token,
        user_id: user.id,
        name: user.name,
        role: user.role.as_str().to_string(),
    })
}

async fn logout_impl(
    domain: web::Data<Domain>,
    info: web::Json<LogoutRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();

    domain.close_session(&info.login_token).await?;
    Ok(SimpleResponse::ok())
}
