use std::sync::Arc;

use blake2::{Blake2b512, Digest};
use chrono::Utc;
use parking_lot::RwLock;

use crate::error::DomainError;
use crate::models::sessions::SessionData;
use crate::models::users::User;
use crate::stores::principal::PrincipalStore;
use crate::stores::{get_doc, put_doc, SESSIONS, USERS};

use super::Domain;

const MAX_LOGIN_TIME_SECS: i64 = 3600;

/// An authenticated identity paired with its user record.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: String,
    pub user: User,
}

/// Translates the principal store's session-change notifications into a
/// typed current principal, once, at the edge of the domain layer. Nothing
/// else reads ambient session state.
pub struct SessionTracker {
    current: Arc<RwLock<Option<String>>>,
}

impl SessionTracker {
    pub fn attach(principals: &dyn PrincipalStore) -> Self {
        let current = Arc::new(RwLock::new(None));
        let writer = Arc::clone(&current);
        principals.on_session_change(Box::new(move |principal_id| {
            *writer.write() = principal_id.map(str::to_string);
        }));
        Self { current }
    }

    pub fn principal_id(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Resolves the tracked session, if any, to a typed [`Principal`].
    pub async fn restore(&self, domain: &Domain) -> Result<Option<Principal>, DomainError> {
        let principal_id = match self.principal_id() {
            Some(id) => id,
            None => return Ok(None),
        };
        let user: Option<User> = get_doc(domain.records.as_ref(), USERS, &principal_id).await?;
        Ok(user.map(|user| Principal {
            id: principal_id,
            user,
        }))
    }
}

impl Domain {
    /// Issues a login token for an authenticated user.
    pub async fn open_session(&self, user: &User) -> Result<String, DomainError> {
        let token = format!("{:x}", Blake2b512::digest(user.email.as_bytes()));
        let session = SessionData {
            token: token.clone(),
            user_id: user.id.clone(),
            login_time: Utc::now(),
        };
        put_doc(self.records.as_ref(), SESSIONS, &token, &session).await?;
        Ok(token)
    }

    /// Resolves a login token to its user. Tokens expire after an hour.
    pub async fn session_user(&self, token: &str) -> Result<User, DomainError> {
        let session: SessionData = get_doc(self.records.as_ref(), SESSIONS, token)
            .await?
            .ok_or_else(|| DomainError::Authentication("Not logged in".to_string()))?;

        let age = Utc::now().signed_duration_since(session.login_time);
        if age.num_seconds() > MAX_LOGIN_TIME_SECS {
            return Err(DomainError::Authentication("Login expired".to_string()));
        }

        get_doc(self.records.as_ref(), USERS, &session.user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User profile not found".to_string()))
    }

    /// Drops the login token and ends the provider-held session.
    pub async fn close_session(&self, token: &str) -> Result<(), DomainError> {
        self.records.delete(SESSIONS, token).await?;
        self.principals.end_session().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::Registration;
    use crate::models::users::Role;
    use crate::stores::principal::LocalPrincipalStore;
    use crate::stores::records::MemoryRecordStore;

    fn domain() -> Domain {
        Domain::new(
            Arc::new(LocalPrincipalStore::default()),
            Arc::new(MemoryRecordStore::default()),
        )
    }

    async fn register_admin(domain: &Domain, email: &str) -> User {
        domain
            .register(Registration {
                email: email.to_string(),
                password: "secret".to_string(),
                name: "Admin".to_string(),
                role: Role::Admin,
                department: None,
                subject: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn token_round_trip() {
        let domain = domain();
        let admin = register_admin(&domain, "a@x.edu").await;

        let token = domain.open_session(&admin).await.unwrap();
        let resolved = domain.session_user(&token).await.unwrap();
        assert_eq!(resolved.id, admin.id);

        domain.close_session(&token).await.unwrap();
        let err = domain.session_user(&token).await.unwrap_err();
        assert_eq!(err.kind(), "authentication");
    }

    #[tokio::test]
    async fn stale_tokens_expire() {
        let domain = domain();
        let admin = register_admin(&domain, "a@x.edu").await;

        let token = domain.open_session(&admin).await.unwrap();
        let stale = SessionData {
            token: token.clone(),
            user_id: admin.id.clone(),
            login_time: Utc::now() - Duration::seconds(MAX_LOGIN_TIME_SECS + 1),
        };
        put_doc(domain.records.as_ref(), SESSIONS, &token, &stale)
            .await
            .unwrap();

        let err = domain.session_user(&token).await.unwrap_err();
        assert_eq!(err.to_string(), "Login expired");
    }

    #[tokio::test]
    async fn tracker_follows_provider_session() {
        let principals = Arc::new(LocalPrincipalStore::default());
        let domain = Domain::new(
            principals.clone(),
            Arc::new(MemoryRecordStore::default()),
        );
        let tracker = SessionTracker::attach(principals.as_ref());
        assert!(tracker.restore(&domain).await.unwrap().is_none());

        let admin = register_admin(&domain, "a@x.edu").await;
        let principal = tracker.restore(&domain).await.unwrap().unwrap();
        assert_eq!(principal.id, admin.id);
        assert_eq!(principal.user.email, "a@x.edu");

        domain.end_session().await;
        assert!(tracker.restore(&domain).await.unwrap().is_none());
    }
}
