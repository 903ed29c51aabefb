use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{AdminCredential, AdminUser, CatalogEntity, NewAdminUser, SettingEntry};
use crate::repositories::{
    AdminUserRepository, CatalogRepository, RepoResult, SettingsRepository,
};

type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = RepoResult<T>> + Send + 'a>>;

/// Runs each operation on the primary store and, when that fails, once more on the
/// secondary store. The two stores are never called concurrently.
pub struct FallbackRepository<R: ?Sized> {
    primary: Arc<R>,
    secondary: Option<Arc<R>>,
    resource: &'static str,
}

impl<R: ?Sized + Send + Sync> FallbackRepository<R> {
    pub fn new(primary: Arc<R>, secondary: Option<Arc<R>>, resource: &'static str) -> Self {
        Self {
            primary,
            secondary,
            resource,
        }
    }

    async fn run<'a, T, F>(&'a self, operation: &'static str, call: F) -> RepoResult<T>
    where
        T: Send,
        F: Fn(&'a R) -> RepoFuture<'a, T> + Send + Sync,
    {
        let primary_err = match call(self.primary.as_ref()).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let secondary = match &self.secondary {
            Some(secondary) if primary_err.should_fall_back() => secondary,
            _ => return Err(primary_err),
        };

        tracing::warn!(
            resource = self.resource,
            operation,
            error = %primary_err,
            "Primary store failed, retrying on secondary"
        );

        call(secondary.as_ref()).await.map_err(|err| {
            tracing::error!(
                resource = self.resource,
                operation,
                primary_error = %primary_err,
                error = %err,
                "Secondary store failed"
            );
            err
        })
    }
}

#[async_trait]
impl<E: CatalogEntity> CatalogRepository<E> for FallbackRepository<dyn CatalogRepository<E>> {
    async fn list_active(&self) -> RepoResult<Vec<E>> {
        self.run("list", |repo| repo.list_active()).await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<E>> {
        self.run("get", |repo| repo.find_by_id(id)).await
    }

    async fn insert(&self, record: &E) -> RepoResult<E> {
        self.run("create", |repo| repo.insert(record)).await
    }

    async fn update(
        &self,
        id: &str,
        draft: &E::Draft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<E>> {
        self.run("update", |repo| repo.update(id, draft, updated_at))
            .await
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        self.run("delete", |repo| repo.deactivate(id, updated_at))
            .await
    }
}

#[async_trait]
impl SettingsRepository for FallbackRepository<dyn SettingsRepository> {
    async fn load_settings(&self, keys: &[&str]) -> RepoResult<Vec<SettingEntry>> {
        self.run("load", |repo| repo.load_settings(keys)).await
    }

    async fn upsert_settings(&self, entries: &[SettingEntry]) -> RepoResult<()> {
        self.run("upsert", |repo| repo.upsert_settings(entries)).await
    }
}

#[async_trait]
impl AdminUserRepository for FallbackRepository<dyn AdminUserRepository> {
    async fn list_users(&self) -> RepoResult<Vec<AdminUser>> {
        self.run("list", |repo| repo.list_users()).await
    }

    async fn find_credential(&self, email: &str) -> RepoResult<Option<AdminCredential>> {
        self.run("find_credential", |repo| repo.find_credential(email))
            .await
    }

    async fn insert_user(&self, user: &NewAdminUser) -> RepoResult<AdminUser> {
        self.run("create", |repo| repo.insert_user(user)).await
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        self.run("update_password", |repo| {
            repo.update_password(id, password_hash, updated_at)
        })
        .await
    }

    async fn delete_user(&self, id: &str) -> RepoResult<bool> {
        self.run("delete", |repo| repo.delete_user(id)).await
    }
}
