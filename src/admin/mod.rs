mod requests;
mod responses;

use actix_web::{post, web, HttpResponse, Responder};

use crate::domain::Domain;
use crate::error::DomainError;
use crate::protocol::SimpleResponse;

use self::requests::*;
use self::responses::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(approve_student)
        .service(reject_student)
        .service(remove_teacher)
        .service(list);
}

crate::post_funcs! {
    (approve_student, "/approve_student", ApproveStudentRequest, SimpleResponse),
    (reject_student, "/reject_student", RejectStudentRequest, SimpleResponse),
    (remove_teacher, "/remove_teacher", RemoveTeacherRequest, SimpleResponse),
    (list, "/list", ListRequest, AdminListResponse),
}

async fn approve_student_impl(
    domain: web::Data<Domain>,
    info: web::Json<ApproveStudentRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();
    let admin = domain.session_user(&info.login_token).await?;

    domain.approve_student(&admin, &info.student_id).await?;
    Ok(SimpleResponse::ok())
}

async fn reject_student_impl(
    domain: web::Data<Domain>,
    info: web::Json<RejectStudentRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();
    let admin = domain.session_user(&info.login_token).await?;

    domain.reject_student(&admin, &info.student_id).await?;
    Ok(SimpleResponse::ok())
}

async fn remove_teacher_impl(
    domain: web::Data<Domain>,
    info: web::Json<RemoveTeacherRequest>,
) -> Result<SimpleResponse, DomainError> {
    let info = info.into_inner();
    let admin = domain.session_user(&info.login_token).await?;

    domain.remove_teacher(&admin, &info.teacher_id).await?;
    Ok(SimpleResponse::ok())
}

async fn list_impl(
    domain: web::Data<Domain>,
    info: web::Json<ListRequest>,
) -> Result<AdminListResponse, DomainError> {
    let info = info.into_inner();
    let admin = domain.session_user(&info.login_token).await?;

    let view = domain.list_for_role(&admin).await?;

    let students = view
        .students
        .into_iter()
        .map(|data| PendingStudentItem {
            id: data.id,
            name: data.name,
            email: data.email,
            registered_at: data.created_at.to_rfc3339(),
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
        })
        .collect();

    Ok(AdminListResponse {
        success: true,
        kind: "".to_string(),
        err: "".to_string(),
        students,
        teachers,
    })
}
