use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};

use crate::models::{
    AboutSection, AboutSectionDraft, AdminCredential, AdminUser, NewAdminUser, ProcessStep,
    ProcessStepDraft, Product, ProductDraft, SettingEntry, Testimonial, TestimonialDraft,
};
use crate::repositories::{
    AdminUserRepository, CatalogRepository, RepoResult, SettingsRepository,
};

/// Table layout shared by the generic read and soft-delete queries.
trait SqliteTable: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static str;
    const LIST_ORDER: &'static str;
}

impl SqliteTable for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static str = "id, title, category, price_inr, price_gbp, short, description, \
         materials, images, is_active, created_at, updated_at";
    const LIST_ORDER: &'static str = "created_at DESC, rowid DESC";
}

impl SqliteTable for AboutSection {
    const TABLE: &'static str = "about_sections";
    const COLUMNS: &'static str =
        r#"id, title, content, "order", is_active, created_at, updated_at"#;
    const LIST_ORDER: &'static str = r#""order" ASC, created_at ASC"#;
}

impl SqliteTable for ProcessStep {
    const TABLE: &'static str = "process_steps";
    const COLUMNS: &'static str =
        r#"id, title, description, image_url, "order", is_active, created_at, updated_at"#;
    const LIST_ORDER: &'static str = r#""order" ASC, created_at ASC"#;
}

impl SqliteTable for Testimonial {
    const TABLE: &'static str = "testimonials";
    const COLUMNS: &'static str =
        r#"id, content, author, "order", is_active, created_at, updated_at"#;
    const LIST_ORDER: &'static str = r#""order" ASC, created_at ASC"#;
}

/// The primary store: every resource in one SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_active<T: SqliteTable>(&self) -> RepoResult<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE is_active = 1 ORDER BY {}",
            T::COLUMNS,
            T::TABLE,
            T::LIST_ORDER
        );
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn fetch_by_id<T: SqliteTable>(&self, id: &str) -> RepoResult<Option<T>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", T::COLUMNS, T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn soft_delete<T: SqliteTable>(
        &self,
        id: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET is_active = 0, updated_at = ? WHERE id = ?",
            T::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CatalogRepository<Product> for SqliteStore {
    async fn list_active(&self) -> RepoResult<Vec<Product>> {
        self.fetch_active().await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        self.fetch_by_id(id).await
    }

    async fn insert(&self, record: &Product) -> RepoResult<Product> {
        let sql = format!(
            "INSERT INTO products (id, title, category, price_inr, price_gbp, short, description, \
             materials, images, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            Product::COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&record.id)
            .bind(&record.title)
            .bind(&record.category)
            .bind(&record.price_inr)
            .bind(&record.price_gbp)
            .bind(&record.short)
            .bind(&record.description)
            .bind(Json(&record.materials))
            .bind(Json(&record.images))
            .bind(record.is_active)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    async fn update(
        &self,
        id: &str,
        draft: &ProductDraft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Product>> {
        let sql = format!(
            "UPDATE products SET title = ?, category = ?, price_inr = ?, price_gbp = ?, \
             short = ?, description = ?, materials = ?, images = ?, updated_at = ? \
             WHERE id = ? RETURNING {}",
            Product::COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&draft.title)
            .bind(&draft.category)
            .bind(&draft.price_inr)
            .bind(&draft.price_gbp)
            .bind(&draft.short)
            .bind(&draft.description)
            .bind(Json(&draft.materials))
            .bind(Json(&draft.images))
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        self.soft_delete::<Product>(id, updated_at).await
    }
}

#[async_trait]
impl CatalogRepository<AboutSection> for SqliteStore {
    async fn list_active(&self) -> RepoResult<Vec<AboutSection>> {
        self.fetch_active().await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<AboutSection>> {
        self.fetch_by_id(id).await
    }

    async fn insert(&self, record: &AboutSection) -> RepoResult<AboutSection> {
        let sql = format!(
            r#"INSERT INTO about_sections (id, title, content, "order", is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}"#,
            AboutSection::COLUMNS
        );
        let section = sqlx::query_as::<_, AboutSection>(&sql)
            .bind(&record.id)
            .bind(&record.title)
            .bind(&record.content)
            .bind(record.order)
            .bind(record.is_active)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(section)
    }

    async fn update(
        &self,
        id: &str,
        draft: &AboutSectionDraft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<AboutSection>> {
        let sql = format!(
            r#"UPDATE about_sections SET title = ?, content = ?, "order" = ?, updated_at = ?
               WHERE id = ? RETURNING {}"#,
            AboutSection::COLUMNS
        );
        let section = sqlx::query_as::<_, AboutSection>(&sql)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.order)
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(section)
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        self.soft_delete::<AboutSection>(id, updated_at).await
    }
}

#[async_trait]
impl CatalogRepository<ProcessStep> for SqliteStore {
    async fn list_active(&self) -> RepoResult<Vec<ProcessStep>> {
        self.fetch_active().await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProcessStep>> {
        self.fetch_by_id(id).await
    }

    async fn insert(&self, record: &ProcessStep) -> RepoResult<ProcessStep> {
        let sql = format!(
            r#"INSERT INTO process_steps (id, title, description, image_url, "order", is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}"#,
            ProcessStep::COLUMNS
        );
        let step = sqlx::query_as::<_, ProcessStep>(&sql)
            .bind(&record.id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(record.order)
            .bind(record.is_active)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(step)
    }

    async fn update(
        &self,
        id: &str,
        draft: &ProcessStepDraft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<ProcessStep>> {
        let sql = format!(
            r#"UPDATE process_steps SET title = ?, description = ?, image_url = ?, "order" = ?, updated_at = ?
               WHERE id = ? RETURNING {}"#,
            ProcessStep::COLUMNS
        );
        let step = sqlx::query_as::<_, ProcessStep>(&sql)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(draft.order)
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(step)
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        self.soft_delete::<ProcessStep>(id, updated_at).await
    }
}

#[async_trait]
impl CatalogRepository<Testimonial> for SqliteStore {
    async fn list_active(&self) -> RepoResult<Vec<Testimonial>> {
        self.fetch_active().await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Testimonial>> {
        self.fetch_by_id(id).await
    }

    async fn insert(&self, record: &Testimonial) -> RepoResult<Testimonial> {
        let sql = format!(
            r#"INSERT INTO testimonials (id, content, author, "order", is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}"#,
            Testimonial::COLUMNS
        );
        let testimonial = sqlx::query_as::<_, Testimonial>(&sql)
            .bind(&record.id)
            .bind(&record.content)
            .bind(&record.author)
            .bind(record.order)
            .bind(record.is_active)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(testimonial)
    }

    async fn update(
        &self,
        id: &str,
        draft: &TestimonialDraft,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Testimonial>> {
        // A missing flag keeps whatever is stored.
        let sql = format!(
            r#"UPDATE testimonials SET content = ?, author = ?, "order" = ?,
               is_active = COALESCE(?, is_active), updated_at = ?
               WHERE id = ? RETURNING {}"#,
            Testimonial::COLUMNS
        );
        let testimonial = sqlx::query_as::<_, Testimonial>(&sql)
            .bind(&draft.content)
            .bind(&draft.author)
            .bind(draft.order)
            .bind(draft.is_active)
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(testimonial)
    }

    async fn deactivate(&self, id: &str, updated_at: DateTime<Utc>) -> RepoResult<bool> {
        self.soft_delete::<Testimonial>(id, updated_at).await
    }
}

#[async_trait]
impl SettingsRepository for SqliteStore {
    async fn load_settings(&self, keys: &[&str]) -> RepoResult<Vec<SettingEntry>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; keys.len()].join(", ");
        let sql = format!(
            "SELECT key, value FROM site_settings WHERE key IN ({})",
            placeholders
        );
        let mut query = sqlx::query_as::<_, SettingEntry>(&sql);
        for key in keys {
            query = query.bind(*key);
        }
        let entries = query.fetch_all(&self.pool).await?;
        Ok(entries)
    }

    async fn upsert_settings(&self, entries: &[SettingEntry]) -> RepoResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO site_settings (key, value, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl AdminUserRepository for SqliteStore {
    async fn list_users(&self) -> RepoResult<Vec<AdminUser>> {
        let users = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, created_at FROM admin_users ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_credential(&self, email: &str) -> RepoResult<Option<AdminCredential>> {
        let credential = sqlx::query_as::<_, AdminCredential>(
            "SELECT id, email, password_hash FROM admin_users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credential)
    }

    async fn insert_user(&self, user: &NewAdminUser) -> RepoResult<AdminUser> {
        let created = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, email, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id, email, created_at",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let result =
            sqlx::query("UPDATE admin_users SET password_hash = ?, updated_at = ? WHERE id = ?")
                .bind(password_hash)
                .bind(updated_at)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
