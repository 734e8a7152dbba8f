use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{ConfigPresetRepository, RepositoryError};
use crate::domain::SavedConfigs;

/// Keeps every preset in one pretty-printed JSON file. Writes go to a
/// sibling temp file first and are renamed over the original.
pub struct JsonFileConfigPresetRepository {
    path: PathBuf,
}

impl JsonFileConfigPresetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ConfigPresetRepository for JsonFileConfigPresetRepository {
    async fn load(&self) -> Result<SavedConfigs, RepositoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SavedConfigs::default()),
            Err(e) => return Err(io_failure("read", &self.path, e)),
        };

        serde_json::from_slice(&raw).map_err(|e| {
            RepositoryError::CorruptRow(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn store(&self, configs: &SavedConfigs) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_failure("create directory for", &self.path, e))?;
        }

        let body = serde_json::to_vec_pretty(configs)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, body)
            .await
            .map_err(|e| io_failure("write", &temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_failure("replace", &self.path, e))
    }
}

fn io_failure(action: &str, path: &std::path::Path, e: io::Error) -> RepositoryError {
    RepositoryError::QueryFailed(format!("failed to {} {}: {}", action, path.display(), e))
}
