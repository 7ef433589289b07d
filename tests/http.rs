use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use booking_server::domain::{Domain, Registration};
use booking_server::models::users::Role;
use booking_server::stores::principal::LocalPrincipalStore;
use booking_server::stores::records::MemoryRecordStore;
use booking_server::{admin, auth, student, teacher};

fn domain() -> Domain {
    Domain::new(
        Arc::new(LocalPrincipalStore::default()),
        Arc::new(MemoryRecordStore::default()),
    )
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let body: Value = test::call_and_read_body_json($app, req).await;
        body
    }};
}

#[actix_web::test]
async fn full_booking_round_trip_over_http() {
    let domain = domain();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(domain.clone()))
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/student").configure(student::config))
            .service(web::scope("/teacher").configure(teacher::config))
            .service(web::scope("/admin").configure(admin::config)),
    )
    .await;

    // Teacher accounts are usable right away.
    let body = post_json!(
        &app,
        "/auth/register",
        &json!({
            "email": "t@x.edu",
            "password": "secret",
            "name": "Ada",
            "role": "teacher",
            "department": "CS",
            "subject": "Algorithms"
        })
    );
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pending_approval"], json!(false));

    let body = post_json!(
        &app,
        "/auth/login",
        &json!({"email": "t@x.edu", "password": "secret"})
    );
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["role"], json!("teacher"));
    let teacher_token = body["login_token"].as_str().unwrap().to_string();

    // Students are parked until an admin approves them.
    let body = post_json!(
        &app,
        "/auth/register",
        &json!({
            "email": "s@x.edu",
            "password": "secret",
            "name": "Sam",
            "role": "student"
        })
    );
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pending_approval"], json!(true));
    let student_id = body["user_id"].as_str().unwrap().to_string();

    let body = post_json!(
        &app,
        "/auth/login",
        &json!({"email": "s@x.edu", "password": "secret"})
    );
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("pending_approval"));

    // The admin account comes from outside the registration form.
    domain
        .register(Registration {
            email: "a@x.edu".to_string(),
            password: "secret".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
            department: None,
            subject: None,
        })
        .await
        .unwrap();
    let body = post_json!(
        &app,
        "/auth/login",
        &json!({"email": "a@x.edu", "password": "secret"})
    );
    let admin_token = body["login_token"].as_str().unwrap().to_string();

    let body = post_json!(&app, "/admin/list", &json!({"login_token": admin_token}));
    assert_eq!(body["students"].as_array().unwrap().len(), 1);
    assert_eq!(body["teachers"].as_array().unwrap().len(), 1);

    let body = post_json!(
        &app,
        "/admin/approve_student",
        &json!({"login_token": admin_token, "student_id": student_id})
    );
    assert_eq!(body["success"], json!(true));

    let body = post_json!(
        &app,
        "/auth/login",
        &json!({"email": "s@x.edu", "password": "secret"})
    );
    assert_eq!(body["success"], json!(true));
    let student_token = body["login_token"].as_str().unwrap().to_string();

    let body = post_json!(
        &app,
        "/student/search_teacher",
        &json!({"login_token": student_token, "query": "algo"})
    );
    let teachers = body["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    let teacher_id = teachers[0]["id"].as_str().unwrap().to_string();
    assert_eq!(
        teachers[0]["available_slots"],
        json!(["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"])
    );

    let body = post_json!(
        &app,
        "/student/book_appoint",
        &json!({
            "login_token": student_token,
            "teacher_id": teacher_id,
            "date": "2024-05-01",
            "time": "09:00",
            "purpose": "advising"
        })
    );
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["status"], json!("pending"));
    let appointment_id = body["appointment_id"].as_str().unwrap().to_string();

    let body = post_json!(
        &app,
        "/teacher/list",
        &json!({"login_token": teacher_token})
    );
    let appointments = body["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["student_name"], json!("Sam"));

    let body = post_json!(
        &app,
        "/teacher/set_appoint_status",
        &json!({
            "login_token": teacher_token,
            "appointment_id": appointment_id,
            "status": "approved"
        })
    );
    assert_eq!(body["success"], json!(true));

    let body = post_json!(&app, "/student/list", &json!({"login_token": student_token}));
    assert_eq!(body["appointments"][0]["status"], json!("approved"));

    // Logout invalidates the token.
    let body = post_json!(
        &app,
        "/auth/logout",
        &json!({"login_token": student_token})
    );
    assert_eq!(body["success"], json!(true));
    let body = post_json!(&app, "/student/list", &json!({"login_token": student_token}));
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("authentication"));
}

#[actix_web::test]
async fn failures_carry_kind_and_message() {
    let domain = domain();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(domain.clone()))
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/student").configure(student::config)),
    )
    .await;

    // Teacher registration without a subject never reaches the stores.
    let body = post_json!(
        &app,
        "/auth/register",
        &json!({
            "email": "t@x.edu",
            "password": "secret",
            "name": "Ada",
            "role": "teacher",
            "department": "CS"
        })
    );
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("validation"));
    assert_eq!(
        body["err"],
        json!("Department and subject are required for teacher accounts")
    );

    let body = post_json!(
        &app,
        "/auth/login",
        &json!({"email": "t@x.edu", "password": "secret"})
    );
    assert_eq!(body["kind"], json!("authentication"));
    assert_eq!(body["err"], json!("Invalid email or password"));

    let body = post_json!(
        &app,
        "/student/list",
        &json!({"login_token": "bogus"})
    );
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("authentication"));
}
