use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{ConfigPresetRepository, RepositoryError};
use crate::domain::{
    ConfigPreset, ConfigPresetError, LastUsedConfig, SavedConfigs, validate_config,
    validate_preset,
};

/// Saved form presets and the last submitted form values.
pub struct ConfigPresetService {
    repository: Arc<dyn ConfigPresetRepository>,
    write_lock: Mutex<()>,
}

impl ConfigPresetService {
    pub fn new(repository: Arc<dyn ConfigPresetRepository>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<SavedConfigs, ConfigPresetServiceError> {
        Ok(self.repository.load().await?)
    }

    pub async fn save(
        &self,
        name: &str,
        config: Value,
    ) -> Result<ConfigPreset, ConfigPresetServiceError> {
        let name = validate_preset(name, &config)?;

        let _guard = self.write_lock.lock().await;
        let mut saved = self.repository.load().await?;
        let preset = saved.upsert(name, config, Utc::now());
        self.repository.store(&saved).await?;

        tracing::info!(preset_id = %preset.id, name = %preset.name, "Config preset saved");
        Ok(preset)
    }

    pub async fn save_last_used(
        &self,
        config: Value,
    ) -> Result<LastUsedConfig, ConfigPresetServiceError> {
        validate_config(&config)?;

        let _guard = self.write_lock.lock().await;
        let mut saved = self.repository.load().await?;
        let last_used = saved.set_last_used(config, Utc::now());
        self.repository.store(&saved).await?;

        tracing::debug!("Last used config saved");
        Ok(last_used)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ConfigPresetServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut saved = self.repository.load().await?;
        if !saved.remove(id) {
            return Err(ConfigPresetServiceError::NotFound(id));
        }
        self.repository.store(&saved).await?;

        tracing::info!(preset_id = %id, "Config preset deleted");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigPresetServiceError {
    #[error("invalid preset: {0}")]
    Invalid(#[from] ConfigPresetError),
    #[error("config preset not found: {0}")]
    NotFound(Uuid),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
