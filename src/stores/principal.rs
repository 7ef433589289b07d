use std::collections::HashMap;

use async_trait::async_trait;
use blake2::{Blake2b512, Digest};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

/// Provider-side failures. The display text is the provider's message and is
/// passed to callers verbatim.
#[derive(Debug, Error)]
pub enum PrincipalError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address is already in use")]
    EmailInUse,

    #[error("identity provider error: {0}")]
    Backend(String),
}

pub type SessionCallback = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// Opaque managed identity: credential checks plus the provider-held session.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, PrincipalError>;

    async fn create_principal(&self, email: &str, password: &str)
        -> Result<String, PrincipalError>;

    async fn end_session(&self);

    /// Registers `callback`, fires it once with the current session, then
    /// again on every session change.
    fn on_session_change(&self, callback: SessionCallback);
}

struct Credential {
    principal_id: String,
    password_digest: String,
}

/// In-process stand-in for the managed identity provider. One ambient
/// session; creating a principal signs it in, like a successful login does.
#[derive(Default)]
pub struct LocalPrincipalStore {
    credentials: RwLock<HashMap<String, Credential>>,
    session: RwLock<Option<String>>,
    listeners: Mutex<Vec<SessionCallback>>,
}

fn digest(password: &str) -> String {
    format!("{:x}", Blake2b512::digest(password.as_bytes()))
}

impl LocalPrincipalStore {
    fn set_session(&self, principal_id: Option<String>) {
        *self.session.write() = principal_id.clone();
        for listener in self.listeners.lock().iter() {
            listener(principal_id.as_deref());
        }
    }
}

#[async_trait]
impl PrincipalStore for LocalPrincipalStore {
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, PrincipalError> {
        let principal_id = {
            let credentials = self.credentials.read();
            let credential = credentials
                .get(email)
                .ok_or(PrincipalError::InvalidCredentials)?;
            if credential.password_digest != digest(password) {
                return Err(PrincipalError::InvalidCredentials);
            }
            credential.principal_id.clone()
        };

        self.set_session(Some(principal_id.clone()));
        Ok(principal_id)
    }

    async fn create_principal(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, PrincipalError> {
        let principal_id = {
            let mut credentials = self.credentials.write();
            if credentials.contains_key(email) {
                return Err(PrincipalError::EmailInUse);
            }
            let principal_id = Uuid::new_v4().to_string();
            credentials.insert(
                email.to_string(),
                Credential {
                    principal_id: principal_id.clone(),
                    password_digest: digest(password),
                },
            );
            principal_id
        };

        self.set_session(Some(principal_id.clone()));
        Ok(principal_id)
    }

    async fn end_session(&self) {
        self.set_session(None);
    }

    fn on_session_change(&self, callback: SessionCallback) {
        callback(self.session.read().as_deref());
        self.listeners.lock().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = LocalPrincipalStore::default();
        store.create_principal("a@x.edu", "secret").await.unwrap();

        let err = store.authenticate("a@x.edu", "wrong").await.unwrap_err();
        assert!(matches!(err, PrincipalError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = LocalPrincipalStore::default();
        store.create_principal("a@x.edu", "secret").await.unwrap();

        let err = store.create_principal("a@x.edu", "other").await.unwrap_err();
        assert!(matches!(err, PrincipalError::EmailInUse));
    }

    #[tokio::test]
    async fn listeners_follow_the_session() {
        let store = LocalPrincipalStore::default();
        let id = store.create_principal("a@x.edu", "secret").await.unwrap();

        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.on_session_change(Box::new(move |principal_id| {
            sink.write().push(principal_id.map(str::to_string));
        }));

        store.end_session().await;
        store.authenticate("a@x.edu", "secret").await.unwrap();

        let seen = seen.read();
        assert_eq!(*seen, vec![Some(id.clone()), None, Some(id)]);
    }
}
