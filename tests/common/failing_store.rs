use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storefront_cms::models::{
    AdminCredential, AdminUser, CatalogEntity, NewAdminUser, SettingEntry,
};
use storefront_cms::repositories::{
    AdminUserRepository, CatalogRepository, RepoResult, RepositoryError, SettingsRepository,
};

/// A primary store whose every call fails.
pub struct FailingStore;

fn unavailable<T>() -> RepoResult<T> {
    Err(RepositoryError::Unavailable("primary offline".to_string()))
}

#[async_trait]
impl<E: CatalogEntity> CatalogRepository<E> for FailingStore {
    async fn list_active(&self) -> RepoResult<Vec<E>> {
        unavailable()
    }

    async fn find_by_id(&self, _id: &str) -> RepoResult<Option<E>> {
        unavailable()
    }

    async fn insert(&self, _record: &E) -> RepoResult<E> {
        unavailable()
    }

    async fn update(
        &self,
        _id: &str,
        _draft: &E::Draft,
        _updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<E>> {
        unavailable()
    }

    async fn deactivate(&self, _id: &str, _updated_at: DateTime<Utc>) -> RepoResult<bool> {
        unavailable()
    }
}

#[async_trait]
impl SettingsRepository for FailingStore {
    async fn load_settings(&self, _keys: &[&str]) -> RepoResult<Vec<SettingEntry>> {
        unavailable()
    }

    async fn upsert_settings(&self, _entries: &[SettingEntry]) -> RepoResult<()> {
        unavailable()
    }
}

#[async_trait]
impl AdminUserRepository for FailingStore {
    async fn list_users(&self) -> RepoResult<Vec<AdminUser>> {
        unavailable()
    }

    async fn find_credential(&self, _email: &str) -> RepoResult<Option<AdminCredential>> {
        unavailable()
    }

    async fn insert_user(&self, _user: &NewAdminUser) -> RepoResult<AdminUser> {
        unavailable()
    }

    async fn update_password(
        &self,
        _id: &str,
        _password_hash: &str,
        _updated_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        unavailable()
    }

    async fn delete_user(&self, _id: &str) -> RepoResult<bool> {
        unavailable()
    }
}
