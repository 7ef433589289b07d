use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;

use booking_server::domain::session::SessionTracker;
use booking_server::domain::{Domain, Registration};
use booking_server::models::users::Role;
use booking_server::stores::principal::LocalPrincipalStore;
use booking_server::stores::records::MemoryRecordStore;
use booking_server::{admin, auth, student, teacher};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let principals = Arc::new(LocalPrincipalStore::default());
    let records = Arc::new(MemoryRecordStore::default());
    let domain = Domain::new(principals.clone(), records);

    let tracker = SessionTracker::attach(principals.as_ref());
    if let Some(principal) = tracker.restore(&domain).await? {
        log::info!("restored session for {}", principal.user.email);
    }

    bootstrap_admin(&domain).await?;

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("listening on {}", bind);

    let data = web::Data::new(domain);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/student").configure(student::config))
            .service(web::scope("/teacher").configure(teacher::config))
            .service(web::scope("/admin").configure(admin::config))
    })
    .bind(&bind)
    .with_context(|| format!("failed to bind {}", bind))?
    .run()
    .await?;

    Ok(())
}

/// Registers the administrator account named by ADMIN_EMAIL/ADMIN_PASSWORD,
/// if set. The registration form only offers student and teacher roles, so
/// the admin has to come from somewhere.
async fn bootstrap_admin(domain: &Domain) -> anyhow::Result<()> {
    let email = match std::env::var("ADMIN_EMAIL") {
        Ok(email) => email,
        Err(_) => return Ok(()),
    };
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD not set")?;
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    domain
        .register(Registration {
            email: email.clone(),
            password,
            name,
            role: Role::Admin,
            department: None,
            subject: None,
        })
        .await
        .map_err(|err| anyhow::anyhow!("admin bootstrap failed: {}", err))?;

    log::info!("bootstrap admin account {} created", email);
    Ok(())
}
