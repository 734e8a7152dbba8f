use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, TaskRepository};
use crate::domain::{AudioFile, Task, TaskId, TaskStatus};

#[derive(Default)]
struct Ledger {
    tasks: HashMap<TaskId, Task>,
    audio_files: Vec<AudioFile>,
}

/// Process-local task ledger, used when no database is configured.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    ledger: RwLock<Ledger>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        if ledger.tasks.contains_key(&task.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "task {} already exists",
                task.id
            )));
        }
        ledger.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.ledger.read().await.tasks.get(&id).cloned())
    }

    async fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        match ledger.tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("task {}", task.id))),
        }
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Task>, RepositoryError> {
        let ledger = self.ledger.read().await;
        let mut tasks: Vec<Task> = ledger.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks.truncate(limit);
        Ok(tasks)
    }

    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepositoryError> {
        let ledger = self.ledger.read().await;
        let mut tasks: Vec<Task> = ledger
            .tasks
            .values()
            .filter(|task| task.status == status)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn append_audio_file(&self, file: &AudioFile) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        if !ledger.tasks.contains_key(&file.task_id) {
            return Err(RepositoryError::NotFound(format!("task {}", file.task_id)));
        }
        ledger.audio_files.push(file.clone());
        Ok(())
    }

    async fn list_audio_files(&self, task_id: TaskId) -> Result<Vec<AudioFile>, RepositoryError> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .audio_files
            .iter()
            .filter(|file| file.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn clear_all(&self) -> Result<(), RepositoryError> {
        let mut ledger = self.ledger.write().await;
        ledger.tasks.clear();
        ledger.audio_files.clear();
        Ok(())
    }
}
