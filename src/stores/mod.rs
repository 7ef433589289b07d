pub mod principal;
pub mod records;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DomainError;
use crate::models::appointments::Appointment;
use crate::models::teachers::TeacherProfile;
use crate::models::users::User;

use self::records::{Filter, RecordStore, StoreError};

pub const USERS: &str = "users";
pub const TEACHERS: &str = "teachers";
pub const APPOINTMENTS: &str = "appointments";
pub const MESSAGES: &str = "messages";
pub const SESSIONS: &str = "sessions";

// Typed access to the collections. All domain reads and writes go through
// these helpers, so filters can only be built from values the domain layer
// chooses, never from raw caller input.

pub async fn put_doc<T: Serialize>(
    records: &dyn RecordStore,
    collection: &'static str,
    id: &str,
    document: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(document).map_err(|source| StoreError::Document {
        collection: collection.to_string(),
        source,
    })?;
    records.put(collection, id, value).await
}

pub async fn get_doc<T: DeserializeOwned>(
    records: &dyn RecordStore,
    collection: &'static str,
    id: &str,
) -> Result<Option<T>, StoreError> {
    match records.get(collection, id).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Document {
                collection: collection.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

pub async fn query_docs<T: DeserializeOwned>(
    records: &dyn RecordStore,
    collection: &'static str,
    filters: &[Filter<'_>],
) -> Result<Vec<T>, StoreError> {
    records
        .query(collection, filters)
        .await?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Document {
                collection: collection.to_string(),
                source,
            })
        })
        .collect()
}

pub async fn fetch_user(records: &dyn RecordStore, id: &str) -> Result<User, DomainError> {
    get_doc(records, USERS, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No such user: {}", id)))
}

pub async fn fetch_teacher(
    records: &dyn RecordStore,
    id: &str,
) -> Result<TeacherProfile, DomainError> {
    get_doc(records, TEACHERS, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No such teacher: {}", id)))
}

pub async fn fetch_appointment(
    records: &dyn RecordStore,
    id: &str,
) -> Result<Appointment, DomainError> {
    get_doc(records, APPOINTMENTS, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No such appointment: {}", id)))
}
