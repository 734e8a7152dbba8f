use async_trait::async_trait;

use crate::domain::{AudioFile, Task, TaskId, TaskStatus};

use super::RepositoryError;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Overwrites the stored record with `task`. Fails with `NotFound` when
    /// the task was never created.
    async fn update(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Most recent tasks first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Task>, RepositoryError>;

    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepositoryError>;

    async fn append_audio_file(&self, file: &AudioFile) -> Result<(), RepositoryError>;

    async fn list_audio_files(&self, task_id: TaskId) -> Result<Vec<AudioFile>, RepositoryError>;

    async fn clear_all(&self) -> Result<(), RepositoryError>;
}
