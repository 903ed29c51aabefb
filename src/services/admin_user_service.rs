use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::config::Environment;
use crate::models::{normalize_email, AdminUser, NewAdminUser, ServiceError};
use crate::repositories::{AdminUserRepository, RepositoryError};

pub struct AdminUserService {
    repository: Arc<dyn AdminUserRepository>,
    environment: Environment,
}

impl AdminUserService {
    pub fn new(repository: Arc<dyn AdminUserRepository>, environment: Environment) -> Self {
        Self {
            repository,
            environment,
        }
    }

    fn failure(&self, message: &str, err: RepositoryError) -> ServiceError {
        ServiceError::from_repository(message, err, self.environment)
    }

    fn hash(password: &str) -> Result<String, ServiceError> {
        hash_password(password)
            .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
    }

    /// Newest accounts first. Password hashes are never part of the result.
    pub async fn list(&self) -> Result<Vec<AdminUser>, ServiceError> {
        self.repository
            .list_users()
            .await
            .map_err(|err| self.failure("Failed to fetch users", err))
    }

    pub async fn create(&self, email: &str, password: &str) -> Result<AdminUser, ServiceError> {
        let email = normalize_email(email);

        // Business logic: one account per email
        let existing = self
            .repository
            .find_credential(&email)
            .await
            .map_err(|err| self.failure("Failed to create user", err))?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "User with email {} already exists",
                email
            )));
        }

        let new_user = NewAdminUser {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash: Self::hash(password)?,
            created_at: Utc::now(),
        };

        let created = self
            .repository
            .insert_user(&new_user)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => ServiceError::ValidationError(format!(
                    "User with email {} already exists",
                    new_user.email
                )),
                other => self.failure("Failed to create user", other),
            })?;

        tracing::info!(user_id = %created.id, email = %created.email, "Created admin user");
        Ok(created)
    }

    /// Hard delete.
    pub async fn delete(&self, id: &str) -> Result<String, ServiceError> {
        let deleted = self
            .repository
            .delete_user(id)
            .await
            .map_err(|err| self.failure("Failed to delete user", err))?;

        if !deleted {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        tracing::info!(user_id = %id, "Deleted admin user");
        Ok("User deleted".to_string())
    }

    /// Creates the account, or resets its password when the email is already registered.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), ServiceError> {
        let email = normalize_email(email);
        let existing = self
            .repository
            .find_credential(&email)
            .await
            .map_err(|err| self.failure("Failed to seed admin user", err))?;

        match existing {
            Some(credential) => {
                let password_hash = Self::hash(password)?;
                self.repository
                    .update_password(&credential.id, &password_hash, Utc::now())
                    .await
                    .map_err(|err| self.failure("Failed to seed admin user", err))?;
                tracing::info!(email = %email, "Reset seeded admin password");
            }
            None => {
                self.create(&email, password).await?;
            }
        }

        Ok(())
    }
}
