use thiserror::Error;

use crate::stores::records::StoreError;

/// Failures surfaced by the domain layer.
///
/// Every variant maps to a stable `kind()` string that is sent to the
/// presentation layer next to the human-readable message. Errors are never
/// recovered or retried on the caller's behalf.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or malformed input; the caller can correct it and retry.
    #[error("{0}")]
    Validation(String),

    /// Credentials rejected by the identity provider, or no usable session.
    #[error("{0}")]
    Authentication(String),

    /// The authenticated user lacks permission for the requested mutation.
    #[error("{0}")]
    Authorization(String),

    /// Valid credentials on an account an administrator has not approved yet.
    #[error("Your registration is pending approval. Please contact the administrator.")]
    PendingApproval,

    #[error("{0}")]
    NotFound(String),

    /// A multi-step effect committed its first write and failed a later one.
    /// Both halves are named so an operator can reconcile the records.
    #[error("partial write: `{completed}` committed, `{failed}` failed: {source}")]
    PartialFailure {
        completed: String,
        failed: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::Authentication(_) => "authentication",
            DomainError::Authorization(_) => "authorization",
            DomainError::PendingApproval => "pending_approval",
            DomainError::NotFound(_) => "not_found",
            DomainError::PartialFailure { .. } => "partial_failure",
            DomainError::Store(_) => "store",
        }
    }
}
