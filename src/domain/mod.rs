pub mod session;

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::appointments::{
    Appointment, APPOINT_STATUS_APPROVED, APPOINT_STATUS_CANCELLED, APPOINT_STATUS_PENDING,
};
use crate::models::messages::Message;
use crate::models::teachers::{default_slots, TeacherProfile};
use crate::models::users::{Role, User};
use crate::stores::principal::{PrincipalError, PrincipalStore};
use crate::stores::records::RecordStore;
use crate::stores::{
    fetch_appointment, fetch_teacher, fetch_user, get_doc, put_doc, query_docs, APPOINTMENTS,
    MESSAGES, TEACHERS, USERS,
};
use crate::utils::{assert_filled, contains_ci};

/// Arguments to [`Domain::register`].
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub department: Option<String>,
    pub subject: Option<String>,
}

/// What a role is allowed to see. Fields that do not apply to the role stay
/// empty.
#[derive(Debug, Default)]
pub struct RoleView {
    pub appointments: Vec<Appointment>,
    pub messages: Vec<Message>,
    pub teachers: Vec<TeacherProfile>,
    pub students: Vec<User>,
}

/// Validates and runs every state transition and scopes all reads to the
/// acting role. Holds the two external capabilities and nothing else; each
/// operation is an independent request/response unit with no in-process
/// shared mutable state.
#[derive(Clone)]
pub struct Domain {
    principals: Arc<dyn PrincipalStore>,
    records: Arc<dyn RecordStore>,
}

impl Domain {
    pub fn new(principals: Arc<dyn PrincipalStore>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            principals,
            records,
        }
    }

    /// Creates a principal, its user record and, for teachers, the shadow
    /// teacher profile. The writes are sequential and non-transactional: a
    /// failure after the first success surfaces as
    /// [`DomainError::PartialFailure`] naming both halves.
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        let Registration {
            email,
            password,
            name,
            role,
            department,
            subject,
        } = registration;

        assert_filled(&email, "email")?;
        assert_filled(&password, "password")?;
        assert_filled(&name, "name")?;
        if role == Role::Teacher {
            let filled = |field: &Option<String>| {
                field.as_deref().map_or(false, |value| !value.trim().is_empty())
            };
            if !filled(&department) || !filled(&subject) {
                return Err(DomainError::Validation(
                    "Department and subject are required for teacher accounts".to_string(),
                ));
            }
        }

        let principal_id = self
            .principals
            .create_principal(&email, &password)
            .await
            .map_err(principal_error)?;

        let user = User {
            id: principal_id,
            email,
            name,
            role,
            department,
            subject,
            created_at: Utc::now(),
            // Teachers and admins are usable right away.
            is_approved: role != Role::Student,
        };
        if let Err(source) = put_doc(self.records.as_ref(), USERS, &user.id, &user).await {
            log::error!(
                "registration of {}: principal {} created, users/{} write failed: {}",
                user.email,
                user.id,
                user.id,
                source
            );
            return Err(DomainError::PartialFailure {
                completed: format!("principal {}", user.id),
                failed: format!("users/{}", user.id),
                source,
            });
        }

        if user.role == Role::Teacher {
            let profile = TeacherProfile {
                id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                department: user.department.clone().unwrap_or_default(),
                subject: user.subject.clone().unwrap_or_default(),
                available_slots: default_slots(),
                created_at: user.created_at,
            };
            if let Err(source) =
                put_doc(self.records.as_ref(), TEACHERS, &profile.id, &profile).await
            {
                log::error!(
                    "registration of {}: users/{} written, teachers/{} write failed: {}",
                    user.email,
                    user.id,
                    profile.id,
                    source
                );
                return Err(DomainError::PartialFailure {
                    completed: format!("users/{}", user.id),
                    failed: format!("teachers/{}", profile.id),
                    source,
                });
            }
        }

        log::info!(
            "registered {} {} ({})",
            user.role.as_str(),
            user.id,
            user.email
        );
        Ok(user)
    }

    /// Checks credentials against the principal store and loads the matching
    /// user record. Unapproved students are blocked here, not warned later.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let principal_id = self
            .principals
            .authenticate(email, password)
            .await
            .map_err(|err| DomainError::Authentication(err.to_string()))?;

        let user: User = get_doc(self.records.as_ref(), USERS, &principal_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User profile not found".to_string()))?;

        if user.role == Role::Student && !user.is_approved {
            return Err(DomainError::PendingApproval);
        }

        log::info!("login {} ({})", user.id, user.role.as_str());
        Ok(user)
    }

    /// Flips a student's approval flag. Idempotent: approving an approved
    /// student is fine.
    pub async fn approve_student(
        &self,
        actor: &User,
        student_id: &str,
    ) -> Result<(), DomainError> {
        assert_admin(actor)?;

        let mut student = fetch_user(self.records.as_ref(), student_id).await?;
        if student.role != Role::Student {
            return Err(DomainError::Validation(format!(
                "{} is not a student account",
                student_id
            )));
        }
        student.is_approved = true;
        put_doc(self.records.as_ref(), USERS, &student.id, &student).await?;

        log::info!("student {} approved by {}", student_id, actor.id);
        Ok(())
    }

    /// Deletes the student's user record. Irreversible; a missing record is
    /// a no-op.
    pub async fn reject_student(&self, actor: &User, student_id: &str) -> Result<(), DomainError> {
        assert_admin(actor)?;

        self.records.delete(USERS, student_id).await?;
        log::info!("student {} rejected by {}", student_id, actor.id);
        Ok(())
    }

    /// Deletes the teacher profile and its user record. The second delete
    /// runs even if the first fails, and a half-applied removal is surfaced
    /// for reconciliation. Appointments and messages that reference the
    /// teacher are left in place.
    pub async fn remove_teacher(&self, actor: &User, teacher_id: &str) -> Result<(), DomainError> {
        assert_admin(actor)?;
        fetch_teacher(self.records.as_ref(), teacher_id).await?;

        let profile = self.records.delete(TEACHERS, teacher_id).await;
        let user = self.records.delete(USERS, teacher_id).await;
        match (profile, user) {
            (Ok(()), Ok(())) => {
                log::info!("teacher {} removed by {}", teacher_id, actor.id);
                Ok(())
            }
            (Err(source), Ok(())) => {
                log::error!(
                    "teacher removal: users/{} deleted, teachers/{} delete failed: {}",
                    teacher_id,
                    teacher_id,
                    source
                );
                Err(DomainError::PartialFailure {
                    completed: format!("users/{}", teacher_id),
                    failed: format!("teachers/{}", teacher_id),
                    source,
                })
            }
            (Ok(()), Err(source)) => {
                log::error!(
                    "teacher removal: teachers/{} deleted, users/{} delete failed: {}",
                    teacher_id,
                    teacher_id,
                    source
                );
                Err(DomainError::PartialFailure {
                    completed: format!("teachers/{}", teacher_id),
                    failed: format!("users/{}", teacher_id),
                    source,
                })
            }
            (Err(source), Err(_)) => Err(DomainError::Store(source)),
        }
    }

    /// Case-insensitive substring search over name, department and subject.
    /// An empty query matches every profile.
    pub async fn search_teachers(&self, query: &str) -> Result<Vec<TeacherProfile>, DomainError> {
        let teachers: Vec<TeacherProfile> =
            query_docs(self.records.as_ref(), TEACHERS, &[]).await?;
        if query.is_empty() {
            return Ok(teachers);
        }
        Ok(teachers
            .into_iter()
            .filter(|teacher| {
                contains_ci(&teacher.name, query)
                    || contains_ci(&teacher.department, query)
                    || contains_ci(&teacher.subject, query)
            })
            .collect())
    }

    /// Books a pending appointment with the acting user as the student.
    /// Slot membership and double-booking are not checked: several students
    /// may hold the same date and time.
    pub async fn book_appointment(
        &self,
        student: &User,
        teacher_id: &str,
        date: &str,
        time: &str,
        purpose: &str,
    ) -> Result<Appointment, DomainError> {
        assert_filled(date, "date")?;
        assert_filled(time, "time")?;
        assert_filled(purpose, "purpose")?;

        let teacher = fetch_teacher(self.records.as_ref(), teacher_id).await?;

        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            teacher_id: teacher.id,
            student_name: student.name.clone(),
            teacher_name: teacher.name,
            date: date.to_string(),
            time: time.to_string(),
            purpose: purpose.to_string(),
            status: APPOINT_STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        };
        put_doc(
            self.records.as_ref(),
            APPOINTMENTS,
            &appointment.id,
            &appointment,
        )
        .await?;

        log::info!(
            "appointment {} booked: student {} with teacher {}",
            appointment.id,
            student.id,
            appointment.teacher_id
        );
        Ok(appointment)
    }

    /// Approves or cancels an appointment. Only the appointed teacher may
    /// decide; an already decided appointment is simply overwritten.
    pub async fn set_appointment_status(
        &self,
        actor: &User,
        appointment_id: &str,
        new_status: &str,
    ) -> Result<Appointment, DomainError> {
        match new_status {
            APPOINT_STATUS_APPROVED | APPOINT_STATUS_CANCELLED => {}
            _ => {
                return Err(DomainError::Validation(format!(
                    "Invalid appointment status: {}",
                    new_status
                )));
            }
        }

        let mut appointment = fetch_appointment(self.records.as_ref(), appointment_id).await?;
        if appointment.teacher_id != actor.id {
            return Err(DomainError::Authorization(
                "Only the appointed teacher may change this appointment".to_string(),
            ));
        }

        appointment.status = new_status.to_string();
        put_doc(
            self.records.as_ref(),
            APPOINTMENTS,
            &appointment.id,
            &appointment,
        )
        .await?;

        log::info!(
            "appointment {} set to {} by {}",
            appointment_id,
            new_status,
            actor.id
        );
        Ok(appointment)
    }

    /// Writes an immutable message from the acting user to a teacher.
    pub async fn send_message(
        &self,
        student: &User,
        teacher_id: &str,
        content: &str,
    ) -> Result<Message, DomainError> {
        assert_filled(content, "content")?;

        let teacher = fetch_teacher(self.records.as_ref(), teacher_id).await?;

        let message = Message {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            teacher_id: teacher.id,
            student_name: student.name.clone(),
            teacher_name: teacher.name,
            content: content.to_string(),
            appointment_id: None,
            created_at: Utc::now(),
        };
        put_doc(self.records.as_ref(), MESSAGES, &message.id, &message).await?;

        log::info!(
            "message {} sent: student {} to teacher {}",
            message.id,
            student.id,
            message.teacher_id
        );
        Ok(message)
    }

    /// The role-scoped read. Filters are built from the authenticated user
    /// here, so a caller cannot request another principal's records.
    pub async fn list_for_role(&self, user: &User) -> Result<RoleView, DomainError> {
        let records = self.records.as_ref();
        let mut view = RoleView::default();
        match user.role {
            Role::Admin => {
                view.students = query_docs(
                    records,
                    USERS,
                    &[("role", json!("student")), ("isApproved", json!(false))],
                )
                .await?;
                view.teachers = query_docs(records, TEACHERS, &[]).await?;
            }
            Role::Teacher => {
                view.appointments =
                    query_docs(records, APPOINTMENTS, &[("teacherId", json!(user.id))]).await?;
                view.messages =
                    query_docs(records, MESSAGES, &[("teacherId", json!(user.id))]).await?;
            }
            Role::Student => {
                view.teachers = query_docs(records, TEACHERS, &[]).await?;
                view.appointments =
                    query_docs(records, APPOINTMENTS, &[("studentId", json!(user.id))]).await?;
            }
        }
        Ok(view)
    }

    /// Ends the provider-held session.
    pub async fn end_session(&self) {
        self.principals.end_session().await;
    }
}

fn assert_admin(actor: &User) -> Result<(), DomainError> {
    if actor.role != Role::Admin {
        return Err(DomainError::Authorization(
            "Administrator privileges required".to_string(),
        ));
    }
    Ok(())
}

fn principal_error(err: PrincipalError) -> DomainError {
    match err {
        // A taken email is caller-correctable input, not a credential failure.
        PrincipalError::EmailInUse => DomainError::Validation(err.to_string()),
        other => DomainError::Authentication(other.to_string()),
    }
}
