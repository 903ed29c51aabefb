//! Secondary store speaking PostgREST conventions over HTTP.
//!
//! Payloads use the snake_case storage rows from [`crate::mapper::columns`]; every
//! result is mapped back to the application records before it leaves this module.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::de::IgnoredAny;
use url::Url;

use crate::config::SupabaseConfig;
use crate::mapper::columns::{
    ActivationPatch, AdminCredentialRow, AdminUserRow, ColumnMapping, NewAdminUserRow,
    PasswordPatch, SettingRow,
};
use crate::models::{AdminCredential, AdminUser, NewAdminUser, SettingEntry};
use crate::repositories::{
    AdminUserRepository, CatalogRepository, RepoResult, RepositoryError, SettingsRepository,
};

const REST_PATH: &str = "rest/v1";
const SETTINGS_TABLE: &str = "site_settings";
const USERS_TABLE: &str = "users";
const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=minimal";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RestStore {
    inner: Arc<RestStoreInner>,
}

struct RestStoreInner {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Builds a client that sends the service credential on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, RepositoryError> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.service_key)
                .map_err(|e| RepositoryError::Unavailable(format!("Invalid service key: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.service_key))
                .map_err(|e| RepositoryError::Unavailable(format!("Invalid service key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestStoreInner {
                client,
                base_url: config.url.trim_end_matches('/').to_string(),
            }),
        })
    }

    fn endpoint(&self, table: &str, params: &[(&str, String)]) -> RepoResult<Url> {
        let raw = format!("{}/{}/{}", self.inner.base_url, REST_PATH, table);
        Url::parse_with_params(&raw, params)
            .map_err(|e| RepositoryError::Unavailable(format!("Invalid data API URL: {e}")))
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> RepoResult<Vec<T>> {
        let url = self.endpoint(table, params)?;
        let response = self.inner.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn post_rows<T, B>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> RepoResult<Vec<T>>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(table, params)?;
        let response = self
            .inner
            .client
            .post(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn patch_rows<T, B>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> RepoResult<Vec<T>>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(table, params)?;
        let response = self
            .inner
            .client
            .patch(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> RepoResult<Vec<T>> {
        let url = self.endpoint(table, params)?;
        let response = self
            .inner
            .client
            .delete(url)
            .header("Prefer", RETURN_REPRESENTATION)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> RepoResult<T> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| RepositoryError::Decode(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    async fn parse_error(&self, response: reqwest::Response) -> RepositoryError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // PostgREST reports unique violations as 409.
        if status == 409 {
            return RepositoryError::Conflict(message);
        }

        RepositoryError::Api { status, message }
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

fn first_row<T>(rows: Vec<T>, operation: &str) -> RepoResult<T> {
    rows.into_iter().next().ok_or_else(|| {
        RepositoryError::Decode(format!("{} returned no representation", operation))
    })
}

#[async_trait]
impl<E: ColumnMapping> CatalogRepository<E> for RestStore {
    async fn list_active(&self) -> RepoResult<Vec<E>> {
        let rows: Vec<E::Row> = self
            .get_rows(
                E::TABLE,
                &[
                    ("select", "*".to_string()),
                    ("is_active", eq("true")),
                    ("order", E::LIST_ORDER.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(E::from_row).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<E>> {
        let rows: Vec<E::Row> = self
            .get_rows(E::TABLE, &[("select", "*".to_string()), ("id", eq(id))])
            .await?;
        Ok(rows.into_iter().next().map(E::from_row))
    }

    async fn insert(&self, record: &E) -> RepoResult<E> {
        let rows: Vec<E::Row> = self
            .post_rows(E::TABLE, &[("select", "*".to_string())], &record.to_row())
            .await?;
        first_row(rows, "insert").map(E::from_row)
    }

    async fn update(
        &self,
        id: &str,
        draft: &E::Draft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<E>> {
        let rows: Vec<E::Row> = self
            .patch_rows(
                E::TABLE,
                &[("select", "*".to_string()), ("id", eq(id))],
                &E::to_patch(draft, updated_at),
            )
            .await?;
        Ok(rows.into_iter().next().map(E::from_row))
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        let patch = ActivationPatch {
            is_active: false,
            updated_at,
        };
        let rows: Vec<IgnoredAny> = self
            .patch_rows(E::TABLE, &[("select", "id".to_string()), ("id", eq(id))], &patch)
            .await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl SettingsRepository for RestStore {
    async fn load_settings(&self, keys: &[&str]) -> RepoResult<Vec<SettingEntry>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<SettingRow> = self
            .get_rows(
                SETTINGS_TABLE,
                &[
                    ("select", "key,value".to_string()),
                    ("key", format!("in.({})", keys.join(","))),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(SettingEntry::from).collect())
    }

    async fn upsert_settings(&self, entries: &[SettingEntry]) -> RepoResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let rows: Vec<SettingRow> = entries.iter().map(SettingRow::from).collect();
        let url = self.endpoint(SETTINGS_TABLE, &[("on_conflict", "key".to_string())])?;
        let response = self
            .inner
            .client
            .post(url)
            .header("Prefer", MERGE_DUPLICATES)
            .json(&rows)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }
}

#[async_trait]
impl AdminUserRepository for RestStore {
    async fn list_users(&self) -> RepoResult<Vec<AdminUser>> {
        let rows: Vec<AdminUserRow> = self
            .get_rows(
                USERS_TABLE,
                &[
                    ("select", "id,email,created_at".to_string()),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(AdminUser::from).collect())
    }

    async fn find_credential(&self, email: &str) -> RepoResult<Option<AdminCredential>> {
        let rows: Vec<AdminCredentialRow> = self
            .get_rows(
                USERS_TABLE,
                &[
                    ("select", "id,email,password_hash".to_string()),
                    ("email", eq(email)),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(AdminCredential::from))
    }

    async fn insert_user(&self, user: &NewAdminUser) -> RepoResult<AdminUser> {
        let rows: Vec<AdminUserRow> = self
            .post_rows(
                USERS_TABLE,
                &[("select", "id,email,created_at".to_string())],
                &NewAdminUserRow::from(user),
            )
            .await?;
        first_row(rows, "insert").map(AdminUser::from)
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let patch = PasswordPatch {
            password_hash: password_hash.to_string(),
            updated_at,
        };
        let rows: Vec<IgnoredAny> = self
            .patch_rows(USERS_TABLE, &[("select", "id".to_string()), ("id", eq(id))], &patch)
            .await?;
        Ok(!rows.is_empty())
    }

    async fn delete_user(&self, id: &str) -> RepoResult<bool> {
        let rows: Vec<IgnoredAny> = self
            .delete_rows(USERS_TABLE, &[("select", "id".to_string()), ("id", eq(id))])
            .await?;
        Ok(!rows.is_empty())
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
