use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::domain::TaskId;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceEntry {
    pub task_id: TaskId,
    pub modified: SystemTime,
}

/// Per-task scratch directories plus the shared output directory.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Creates (if needed) and returns the scratch directory for a task.
    async fn prepare(&self, task_id: TaskId) -> Result<PathBuf, WorkspaceError>;

    fn workspace_path(&self, task_id: TaskId) -> PathBuf;

    /// Moves `source` into the task's workspace and returns its new path, so
    /// the file is removed together with the workspace.
    async fn adopt(&self, task_id: TaskId, source: &Path) -> Result<PathBuf, WorkspaceError>;

    async fn remove(&self, task_id: TaskId) -> Result<(), WorkspaceError>;

    async fn list(&self) -> Result<Vec<WorkspaceEntry>, WorkspaceError>;

    /// Creates the output directory and returns the path for `file_name` in it.
    async fn output_path(&self, file_name: &str) -> Result<PathBuf, WorkspaceError>;

    fn output_dir(&self) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
