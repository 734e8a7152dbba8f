use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{WorkspaceEntry, WorkspaceError, WorkspaceStore};
use crate::domain::TaskId;

const ADOPTED_PREFIX: &str = "upload_";

/// Task scratch space lives in `<temp_dir>/<task_id>/`; finished mixes go
/// to `output_dir`.
pub struct LocalWorkspaceStore {
    temp_dir: PathBuf,
    output_dir: PathBuf,
}

impl LocalWorkspaceStore {
    pub fn new(temp_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            temp_dir,
            output_dir,
        }
    }
}

#[async_trait]
impl WorkspaceStore for LocalWorkspaceStore {
    async fn prepare(&self, task_id: TaskId) -> Result<PathBuf, WorkspaceError> {
        let path = self.workspace_path(task_id);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| io_error(&path, source))?;
        Ok(path)
    }

    fn workspace_path(&self, task_id: TaskId) -> PathBuf {
        self.temp_dir.join(task_id.to_string())
    }

    /// Renames when possible and falls back to copy-then-delete across
    /// filesystems.
    async fn adopt(&self, task_id: TaskId, source: &Path) -> Result<PathBuf, WorkspaceError> {
        let workspace = self.prepare(task_id).await?;
        let file_name = source
            .file_name()
            .map(|name| format!("{ADOPTED_PREFIX}{}", name.to_string_lossy()))
            .unwrap_or_else(|| ADOPTED_PREFIX.trim_end_matches('_').to_string());
        let target = workspace.join(file_name);

        if tokio::fs::rename(source, &target).await.is_err() {
            tokio::fs::copy(source, &target)
                .await
                .map_err(|e| io_error(source, e))?;
            tokio::fs::remove_file(source)
                .await
                .map_err(|e| io_error(source, e))?;
        }
        Ok(target)
    }

    async fn remove(&self, task_id: TaskId) -> Result<(), WorkspaceError> {
        let path = self.workspace_path(task_id);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    /// Directories whose name is not a task id are ignored.
    async fn list(&self) -> Result<Vec<WorkspaceEntry>, WorkspaceError> {
        let mut entries = match tokio::fs::read_dir(&self.temp_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&self.temp_dir, source)),
        };

        let mut workspaces = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| io_error(&self.temp_dir, source))?
        {
            let Some(task_id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<TaskId>().ok())
            else {
                continue;
            };
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_dir() => metadata,
                Ok(_) => continue,
                Err(source) => return Err(io_error(&entry.path(), source)),
            };
            let modified = metadata
                .modified()
                .map_err(|source| io_error(&entry.path(), source))?;
            workspaces.push(WorkspaceEntry { task_id, modified });
        }

        Ok(workspaces)
    }

    async fn output_path(&self, file_name: &str) -> Result<PathBuf, WorkspaceError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| io_error(&self.output_dir, source))?;
        Ok(self.output_dir.join(file_name))
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone()
    }
}

fn io_error(path: &Path, source: io::Error) -> WorkspaceError {
    WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
