mod requests;
mod responses;

use actix_web::{post, web, HttpResponse, Responder};

use crate::domain::Domain;
use crate::error::DomainError;
use crate::protocol::SimpleResponse;

use self::requests::*;
use self::responses::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_teacher)
        .service(book_appoint)
        .service(send_message)
        .service(list);
}

crate::post_funcs! {
    (search_teacher, "/search_teacher", SearchTeacherRequest, SearchTeacherResponse),
    (book_appoint, "/book_appoint", BookAppointRequest, BookAppointResponse),
    (send_message, "/send_message", SendMessageRequest, SimpleResponse),
    (list, "/list", ListRequest, StudentListResponse),
}

async fn search_teacher_impl(
    domain: web::Data<Domain>,
    info: web::Json<SearchTeacherRequest>,
) -> Result<SearchTeacherResponse, DomainError> {
    let info = info.into_inner();
    domain.session_user(&info.login_token).await?;

    let query = info.query.unwrap_or_default();
    let teachers = domain
        .search_teachers(&query)
        .await?
        .into_iter()
        .map(|data| TeacherItem {
            id: data.id,
            name: data.name,
            email: data.email,
            department: data.department,
            subject: data.subject,
            available_slots: data.available_slots,
        })
        .collect();

    Ok(SearchTeacherResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        teachers,
    })
}

async fn book_appoint_impl(
    domain: web::Data<Domain>,
    info: web::Json<BookAppointRequest>,
) -> Result<BookAppointResponse, DomainError> {
    let info = info.into_inner();
    let student = domain.session_user(&info.login_token).await?;

    let appointment = domain
        .book_appointment(
            &student,
            &info.teacher_id,
            &info.date,
            &info.time,
            &info.purpose,
        )
        .await?;

    Ok(BookAppointResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        appointment_id: appointment.id,
        status: appointment.status,
    })
}

async fn send_message_impl(
    domain: web::Data<Domain>,
    info: web::Json<SendMessageRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();
    let student = domain.session_user(&info.login_token).await?;

    domain
        .send_message(&student, &info.teacher_id, &info.content)
        .await?;
    Ok(SimpleResponse::ok())
}

async fn list_impl(
    domain: web::Data<Domain>,
    info: web::Json<ListRequest>,
) -> Result<StudentListResponse, DomainError> {
    let info = info.into_inner();
    let student = domain.session_user(&info.login_token).await?;

    let view = domain.list_for_role(&student).await?;

    let appointments = view
        .appointments
        .into_iter()
        .map(|data| AppointmentItem {
            id: data.id,
            teacher_id: data.teacher_id,
            teacher_name: data.teacher_name,
            date: data.date,
            time: data.time,
            purpose: data.purpose,
            status: data.status,
        })
        .collect();
    let teachers = view
        .teachers
        .into_iter()
        .map(|data| TeacherItem {
            id: data.id,
            name: data.name,
            email: data.email,
            department: data.department,
            subject: data.subject,
            available_slots: data.available_slots,
        })
        .collect();

    Ok(StudentListResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        appointments,
        teachers,
    })
}
