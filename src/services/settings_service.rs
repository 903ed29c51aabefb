use crate::config::Environment;
use crate::models::{ServiceError, SettingEntry, SettingsUpdateRequest, SiteSettings};
use crate::repositories::SettingsRepository;
use std::sync::Arc;

pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
    environment: Environment,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepository>, environment: Environment) -> Self {
        Self {
            repository,
            environment,
        }
    }

    /// Stored values overlaid on the defaults. Read fresh on every call.
    pub async fn get(&self) -> Result<SiteSettings, ServiceError> {
        let entries = self
            .repository
            .load_settings(&SettingEntry::SUPPORTED_KEYS)
            .await
            .map_err(|err| {
                ServiceError::from_repository("Failed to fetch settings", err, self.environment)
            })?;

        Ok(SiteSettings::from_entries(&entries))
    }

    /// Upserts only the keys present in the request, then returns the re-read settings.
    pub async fn update(&self, request: SettingsUpdateRequest) -> Result<SiteSettings, ServiceError> {
        let entries = request.into_entries()?;

        if !entries.is_empty() {
            self.repository
                .upsert_settings(&entries)
                .await
                .map_err(|err| {
                    ServiceError::from_repository("Failed to update settings", err, self.environment)
                })?;

            let keys: Vec<&str> = entries.iter().map(|entry| entry.key.as_str()).collect();
            tracing::info!(keys = ?keys, "Updated site settings");
        }

        self.get().await
    }
}
