use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Environment;
use crate::models::{CatalogEntity, ServiceError};
use crate::repositories::{CatalogRepository, RepositoryError};

/// CRUD orchestration for one catalog resource.
pub struct CatalogService<E: CatalogEntity> {
    repository: Arc<dyn CatalogRepository<E>>,
    environment: Environment,
}

impl<E: CatalogEntity> CatalogService<E> {
    pub fn new(repository: Arc<dyn CatalogRepository<E>>, environment: Environment) -> Self {
        Self {
            repository,
            environment,
        }
    }

    fn singular() -> String {
        E::LABEL.to_lowercase()
    }

    fn not_found() -> ServiceError {
        ServiceError::NotFound(format!("{} not found", E::LABEL))
    }

    fn failure(&self, message: String, err: RepositoryError) -> ServiceError {
        ServiceError::from_repository(message, err, self.environment)
    }

    pub async fn list(&self) -> Result<Vec<E>, ServiceError> {
        self.repository
            .list_active()
            .await
            .map_err(|err| self.failure(format!("Failed to fetch {}", E::PLURAL), err))
    }

    pub async fn get(&self, id: &str) -> Result<E, ServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| self.failure(format!("Failed to fetch {}", Self::singular()), err))?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E, ServiceError> {
        let record = E::from_draft(Uuid::new_v4().to_string(), draft, Utc::now());

        let created = self
            .repository
            .insert(&record)
            .await
            .map_err(|err| self.failure(format!("Failed to create {}", Self::singular()), err))?;

        tracing::info!(resource = E::PLURAL, id = created.id(), "Created record");
        Ok(created)
    }

    pub async fn update(&self, id: &str, draft: E::Draft) -> Result<E, ServiceError> {
        let updated = self
            .repository
            .update(id, &draft, Utc::now())
            .await
            .map_err(|err| self.failure(format!("Failed to update {}", Self::singular()), err))?
            .ok_or_else(Self::not_found)?;

        tracing::info!(resource = E::PLURAL, id, "Updated record");
        Ok(updated)
    }

    /// Soft delete: the record stays retrievable by id with `isActive = false`.
    pub async fn delete(&self, id: &str) -> Result<String, ServiceError> {
        let deactivated = self
            .repository
            .deactivate(id, Utc::now())
            .await
            .map_err(|err| self.failure(format!("Failed to delete {}", Self::singular()), err))?;

        if !deactivated {
            return Err(Self::not_found());
        }

        tracing::info!(resource = E::PLURAL, id, "Deactivated record");
        Ok(format!("{} deleted", E::LABEL))
    }
}
