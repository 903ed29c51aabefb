pub mod fallback;
pub mod rest;
pub mod sqlite;

pub use fallback::*;
pub use rest::*;
pub use sqlite::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{AdminCredential, AdminUser, CatalogEntity, NewAdminUser, SettingEntry};

/// Errors raised by either data store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The data API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A uniqueness rule rejected the write. Retrying elsewhere cannot help.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Whether the secondary store should be tried after this failure.
    pub fn should_fall_back(&self) -> bool {
        !matches!(self, RepositoryError::Conflict(_))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            _ => RepositoryError::Database(err),
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Persistence for one soft-deletable catalog resource.
#[async_trait]
pub trait CatalogRepository<E: CatalogEntity>: Send + Sync {
    /// Active records in the resource's list order.
    async fn list_active(&self) -> RepoResult<Vec<E>>;
    /// Looks a record up by id regardless of its active flag.
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<E>>;
    async fn insert(&self, record: &E) -> RepoResult<E>;
    /// Overwrites the editable fields. `None` when the id is unknown.
    async fn update(
        &self,
        id: &str,
        draft: &E::Draft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<E>>;
    /// Clears the active flag. `false` when the id is unknown.
    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Stored rows for the given keys. Keys without a row are simply absent.
    async fn load_settings(&self, keys: &[&str]) -> RepoResult<Vec<SettingEntry>>;
    /// Creates or overwrites every entry as one unit of work.
    async fn upsert_settings(&self, entries: &[SettingEntry]) -> RepoResult<()>;
}

#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn list_users(&self) -> RepoResult<Vec<AdminUser>>;
    async fn find_credential(&self, email: &str) -> RepoResult<Option<AdminCredential>>;
    async fn insert_user(&self, user: &NewAdminUser) -> RepoResult<AdminUser>;
    /// `false` when the id is unknown.
    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<bool>;
    /// Physically removes the account. `false` when the id is unknown.
    async fn delete_user(&self, id: &str) -> RepoResult<bool>;
}
