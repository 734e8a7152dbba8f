use std::path::PathBuf;

use async_trait::async_trait;

/// Looks up recorded ambient and noise-colour tracks by identifier.
#[async_trait]
pub trait AmbientCatalog: Send + Sync {
    /// Returns the track path when the id is known and the file exists.
    async fn resolve(&self, id: &str) -> Option<PathBuf>;

    fn ids(&self) -> Vec<String>;
}
