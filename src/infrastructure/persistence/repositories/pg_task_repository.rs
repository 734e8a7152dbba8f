use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, TaskRepository};
use crate::domain::{AudioFile, AudioKind, PipelineStep, Task, TaskId, TaskStatus};

const TASK_COLUMNS: &str = "id, user_input, status, current_step, progress, message, outline, \
     content, error_message, output_file, created_at, updated_at";

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn create(&self, task: &Task) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, user_input, status, current_step, progress, message, outline,
                               content, error_message, output_file, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(&task.user_input)
        .bind(task.status.as_str())
        .bind(task.current_step.as_str())
        .bind(i16::from(task.progress))
        .bind(&task.message)
        .bind(&task.outline)
        .bind(&task.content)
        .bind(&task.error_message)
        .bind(&task.output_file)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(task_from_row).transpose()
    }

    #[instrument(skip(self, task), fields(task_id = %task.id, status = %task.status))]
    async fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = $2, current_step = $3, progress = $4, message = $5, outline = $6,
                content = $7, error_message = $8, output_file = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(task.status.as_str())
        .bind(task.current_step.as_str())
        .bind(i16::from(task.progress))
        .bind(&task.message)
        .bind(&task.outline)
        .bind(&task.content)
        .bind(&task.error_message)
        .bind(&task.output_file)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("task {}", task.id)));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: usize) -> Result<Vec<Task>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(task_from_row).collect()
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(task_from_row).collect()
    }

    #[instrument(skip(self, file), fields(task_id = %file.task_id, kind = %file.kind))]
    async fn append_audio_file(&self, file: &AudioFile) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO audio_files (id, task_id, kind, path, duration_secs, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(file.id)
        .bind(file.task_id.as_uuid())
        .bind(file.kind.as_str())
        .bind(&file.path)
        .bind(file.duration_secs)
        .bind(file.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(task_id = %task_id))]
    async fn list_audio_files(&self, task_id: TaskId) -> Result<Vec<AudioFile>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, task_id, kind, path, duration_secs, created_at
            FROM audio_files
            WHERE task_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(audio_file_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn clear_all(&self) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        sqlx::query("DELETE FROM audio_files")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query("DELETE FROM tasks")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn task_from_row(row: &PgRow) -> Result<Task, RepositoryError> {
    let status: String = column(row, "status")?;
    let current_step: String = column(row, "current_step")?;
    let progress: i16 = column(row, "progress")?;

    Ok(Task {
        id: TaskId::from_uuid(column::<Uuid>(row, "id")?),
        user_input: column(row, "user_input")?,
        status: status.parse::<TaskStatus>().map_err(RepositoryError::CorruptRow)?,
        current_step: current_step
            .parse::<PipelineStep>()
            .map_err(RepositoryError::CorruptRow)?,
        progress: u8::try_from(progress)
            .map_err(|_| RepositoryError::CorruptRow(format!("progress {progress}")))?,
        message: column(row, "message")?,
        outline: column(row, "outline")?,
        content: column(row, "content")?,
        error_message: column(row, "error_message")?,
        output_file: column(row, "output_file")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

fn audio_file_from_row(row: &PgRow) -> Result<AudioFile, RepositoryError> {
    let kind: String = column(row, "kind")?;

    Ok(AudioFile {
        id: column(row, "id")?,
        task_id: TaskId::from_uuid(column::<Uuid>(row, "task_id")?),
        kind: kind.parse::<AudioKind>().map_err(RepositoryError::CorruptRow)?,
        path: column(row, "path")?,
        duration_secs: column(row, "duration_secs")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::CorruptRow(format!("{name}: {e}")))
}

fn map_sqlx_error(error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_unique_violation() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(error.to_string())
        }
        _ => RepositoryError::QueryFailed(error.to_string()),
    }
}
