use chrono::{Duration, Utc};

use sub_music::application::ports::{RepositoryError, TaskRepository};
use sub_music::domain::{AudioFile, AudioKind, PipelineStep, Task, TaskId, TaskStatus};

use crate::helpers::TestPostgres;

fn task_created(minutes_ago: i64, input: &str) -> Task {
    let mut task = Task::new(input.to_string());
    task.created_at = Utc::now() - Duration::minutes(minutes_ago);
    task
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_new_task_when_creating_and_retrieving_then_every_column_round_trips() {
    let test_pg = TestPostgres::new().await;
    let task = Task::new("improve focus".to_string());

    test_pg.task_repository.create(&task).await.unwrap();

    let retrieved = test_pg
        .task_repository
        .get_by_id(task.id)
        .await
        .unwrap()
        .expect("Task not found");
    assert_eq!(retrieved.id, task.id);
    assert_eq!(retrieved.user_input, "improve focus");
    assert_eq!(retrieved.status, TaskStatus::Pending);
    assert_eq!(retrieved.current_step, PipelineStep::Outline);
    assert_eq!(retrieved.progress, 0);
    assert!(retrieved.error_message.is_none());
    assert_eq!(
        retrieved.created_at.timestamp_micros(),
        task.created_at.timestamp_micros()
    );
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_duplicate_task_when_creating_then_returns_constraint_violation() {
    let test_pg = TestPostgres::new().await;
    let task = Task::new("focus".to_string());
    test_pg.task_repository.create(&task).await.unwrap();

    let result = test_pg.task_repository.create(&task).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_progressed_task_when_updating_then_latest_state_is_stored() {
    let test_pg = TestPostgres::new().await;
    let mut task = Task::new("focus".to_string());
    test_pg.task_repository.create(&task).await.unwrap();

    task.start().unwrap();
    task.record_content("1. Breathe".to_string(), "Breathe in.".to_string())
        .unwrap();
    task.advance(PipelineStep::Mixing, 80, "Mixing tracks").unwrap();
    test_pg.task_repository.update(&task).await.unwrap();

    let retrieved = test_pg.task_repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(retrieved.status, TaskStatus::Processing);
    assert_eq!(retrieved.current_step, PipelineStep::Mixing);
    assert_eq!(retrieved.progress, 80);
    assert_eq!(retrieved.message.as_deref(), Some("Mixing tracks"));
    assert_eq!(retrieved.outline.as_deref(), Some("1. Breathe"));
    assert_eq!(retrieved.content.as_deref(), Some("Breathe in."));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_unknown_task_when_updating_then_returns_not_found() {
    let test_pg = TestPostgres::new().await;

    let result = test_pg
        .task_repository
        .update(&Task::new("ghost".to_string()))
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_tasks_when_listing_recent_then_newest_first_and_limited() {
    let test_pg = TestPostgres::new().await;
    for (minutes_ago, input) in [(30, "oldest"), (10, "middle"), (1, "newest")] {
        test_pg
            .task_repository
            .create(&task_created(minutes_ago, input))
            .await
            .unwrap();
    }

    let tasks = test_pg.task_repository.list_recent(2).await.unwrap();

    let inputs: Vec<&str> = tasks.iter().map(|task| task.user_input.as_str()).collect();
    assert_eq!(inputs, vec!["newest", "middle"]);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_mixed_statuses_when_listing_by_status_then_only_matching_tasks_returned() {
    let test_pg = TestPostgres::new().await;
    let pending = task_created(2, "pending");
    let mut failed = task_created(1, "failed");
    failed.fail(PipelineStep::Outline, "rejected".to_string()).unwrap();
    test_pg.task_repository.create(&pending).await.unwrap();
    test_pg.task_repository.create(&failed).await.unwrap();

    let tasks = test_pg
        .task_repository
        .list_by_status(TaskStatus::Failed)
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, failed.id);
    assert_eq!(tasks[0].error_message.as_deref(), Some("rejected"));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_artifacts_when_appending_then_lists_them_in_insertion_order() {
    let test_pg = TestPostgres::new().await;
    let task = Task::new("focus".to_string());
    test_pg.task_repository.create(&task).await.unwrap();
    let base = Utc::now();
    for (offset, kind) in [AudioKind::Voice, AudioKind::Binaural, AudioKind::Final]
        .into_iter()
        .enumerate()
    {
        let mut file = AudioFile::new(task.id, kind, format!("{kind}.wav"), 30.0);
        file.created_at = base + Duration::seconds(offset as i64);
        test_pg.task_repository.append_audio_file(&file).await.unwrap();
    }

    let files = test_pg.task_repository.list_audio_files(task.id).await.unwrap();

    let kinds: Vec<AudioKind> = files.iter().map(|file| file.kind).collect();
    assert_eq!(kinds, vec![AudioKind::Voice, AudioKind::Binaural, AudioKind::Final]);
    assert_eq!(files[0].path, "voice.wav");
    assert_eq!(files[0].duration_secs, 30.0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_unknown_task_when_appending_audio_file_then_returns_constraint_violation() {
    let test_pg = TestPostgres::new().await;
    let file = AudioFile::new(TaskId::new(), AudioKind::Voice, "voice.wav".to_string(), 1.0);

    let result = test_pg.task_repository.append_audio_file(&file).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_tasks_and_artifacts_when_clearing_then_both_tables_are_empty() {
    let test_pg = TestPostgres::new().await;
    let task = Task::new("focus".to_string());
    test_pg.task_repository.create(&task).await.unwrap();
    test_pg
        .task_repository
        .append_audio_file(&AudioFile::new(task.id, AudioKind::Final, "mix.mp3".to_string(), 30.0))
        .await
        .unwrap();

    test_pg.task_repository.clear_all().await.unwrap();

    assert!(test_pg.task_repository.list_recent(10).await.unwrap().is_empty());
    assert!(test_pg.task_repository.list_audio_files(task.id).await.unwrap().is_empty());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audio_files")
        .fetch_one(&test_pg.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_row_with_unknown_status_when_fetching_then_returns_corrupt_row() {
    let test_pg = TestPostgres::new().await;
    let task = Task::new("focus".to_string());
    test_pg.task_repository.create(&task).await.unwrap();
    sqlx::query("UPDATE tasks SET status = 'archived' WHERE id = $1")
        .bind(task.id.as_uuid())
        .execute(&test_pg.pool)
        .await
        .unwrap();

    let result = test_pg.task_repository.get_by_id(task.id).await;

    assert!(matches!(result, Err(RepositoryError::CorruptRow(_))));
}
