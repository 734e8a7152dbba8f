use async_trait::async_trait;

use crate::domain::SavedConfigs;

use super::RepositoryError;

/// Whole-document store for saved form presets. Callers serialize
/// read-modify-write cycles.
#[async_trait]
pub trait ConfigPresetRepository: Send + Sync {
    /// An empty document when nothing was stored yet.
    async fn load(&self) -> Result<SavedConfigs, RepositoryError>;

    async fn store(&self, configs: &SavedConfigs) -> Result<(), RepositoryError>;
}
