mod requests;
mod responses;

use actix_web::{post, web, HttpResponse, Responder};

use crate::domain::Domain;
use crate::error::DomainError;
use crate::protocol::SimpleResponse;

use self::requests::*;
use self::responses::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(set_appoint_status).service(list);
}

crate::post_funcs! {
    (set_appoint_status, "/set_appoint_status", SetAppointStatusRequest, SimpleResponse),
    (list, "/list", ListRequest, TeacherListResponse),
}

async fn set_appoint_status_impl(
    domain: web::Data<Domain>,
    info: web::Json<SetAppointStatusRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();
    let teacher = domain.session_user(&info.login_token).await?;

    domain
        .set_appointment_status(&teacher, &info.appointment_id, &info.status)
        .await?;
    Ok(SimpleResponse::ok())
}

async fn list_impl(
    domain: web::Data<Domain>,
    info: web::Json<ListRequest>,
) -> Result<TeacherListResponse, DomainError> {
    let info = info.into_inner();
    let teacher = domain.session_user(&info.login_token).await?;

    let view = domain.list_for_role(&teacher).await?;

    let appointments = view
        .appointments
        .into_iter()
        .map(|data| AppointmentItem {
            id: data.id,
            student_id: data.student_id,
            student_name: data.student_name,
            date: data.date,
            time: data.time,
            purpose: data.purpose,
            status: data.status,
        })
        .collect();
    let messages = view
        .messages
        .into_iter()
        .map(|data| MessageItem {
            id: data.id,
            student_id: data.student_id,
            student_name: data.student_name,
            content: data.content,
            sent_at: data.created_at.to_rfc3339(),
        })
        .collect();

    Ok(TeacherListResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        appointments,
        messages,
    })
}
