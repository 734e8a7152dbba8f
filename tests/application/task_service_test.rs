use std::sync::Arc;
use std::time::Duration;

use sub_music::application::ports::{TaskRepository, WorkspaceStore};
use sub_music::application::services::{
    INTERRUPTED_MESSAGE, MAX_LIST_LIMIT, TaskMessage, TaskService, TaskServiceError, task_queue,
};
use sub_music::domain::{
    AudioFile, AudioKind, PipelineStep, Task, TaskEvent, TaskId, TaskOptions, TaskOptionsError,
    TaskStatus,
};
use sub_music::infrastructure::persistence::InMemoryTaskRepository;
use sub_music::infrastructure::storage::LocalWorkspaceStore;
use tokio::sync::mpsc;

use crate::helpers::CollectingPublisher;

struct ServiceHarness {
    _dir: tempfile::TempDir,
    repository: Arc<InMemoryTaskRepository>,
    workspaces: Arc<LocalWorkspaceStore>,
    publisher: Arc<CollectingPublisher>,
    service: TaskService,
    receiver: mpsc::Receiver<TaskMessage>,
}

fn service_with(capacity: usize, retention: Duration) -> ServiceHarness {
    let dir = tempfile::tempdir().unwrap();
    let repository = Arc::new(InMemoryTaskRepository::new());
    let workspaces = Arc::new(LocalWorkspaceStore::new(
        dir.path().join("temp"),
        dir.path().join("output"),
    ));
    let publisher = Arc::new(CollectingPublisher::default());
    let (sender, receiver) = task_queue(capacity);
    let service = TaskService::new(
        repository.clone(),
        workspaces.clone(),
        publisher.clone(),
        sender,
        retention,
    );
    ServiceHarness {
        _dir: dir,
        repository,
        workspaces,
        publisher,
        service,
        receiver,
    }
}

#[tokio::test]
async fn given_valid_options_when_creating_task_then_persists_pending_task_and_queues_it() {
    let mut harness = service_with(4, Duration::from_secs(3600));

    let task = harness
        .service
        .create_task(TaskOptions::new("improve focus"))
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Pending);
    let stored = harness.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.user_input, "improve focus");
    let queued = harness.receiver.try_recv().unwrap();
    assert_eq!(queued.task_id, task.id);
    assert!(matches!(
        harness.publisher.events().first(),
        Some(TaskEvent::TaskUpdated { task: published }) if published.id == task.id
    ));
}

#[tokio::test]
async fn given_invalid_options_when_creating_task_then_rejects_without_persisting() {
    let harness = service_with(4, Duration::from_secs(3600));

    let result = harness.service.create_task(TaskOptions::new("  ")).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::InvalidOptions(TaskOptionsError::EmptyInput))
    ));
    assert!(harness.repository.list_recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_full_queue_when_creating_task_then_returns_queue_full_and_fails_task() {
    let harness = service_with(1, Duration::from_secs(3600));
    harness
        .service
        .create_task(TaskOptions::new("first"))
        .await
        .unwrap();

    let result = harness.service.create_task(TaskOptions::new("second")).await;

    assert!(matches!(result, Err(TaskServiceError::QueueFull)));
    let tasks = harness.repository.list_recent(10).await.unwrap();
    let rejected = tasks
        .iter()
        .find(|task| task.user_input == "second")
        .unwrap();
    assert_eq!(rejected.status, TaskStatus::Failed);
    assert_eq!(rejected.current_step, PipelineStep::Outline);
    assert!(harness.publisher.events().iter().any(|event| matches!(
        event,
        TaskEvent::Failed { task_id, .. } if *task_id == rejected.id
    )));
}

#[tokio::test]
async fn given_stopped_worker_when_creating_task_then_returns_worker_unavailable() {
    let harness = service_with(4, Duration::from_secs(3600));
    drop(harness.receiver);

    let result = harness.service.create_task(TaskOptions::new("focus")).await;

    assert!(matches!(result, Err(TaskServiceError::WorkerUnavailable)));
}

#[tokio::test]
async fn given_task_with_artifacts_when_getting_task_then_returns_details() {
    let harness = service_with(4, Duration::from_secs(3600));
    let task = Task::new("focus".to_string());
    harness.repository.create(&task).await.unwrap();
    harness
        .repository
        .append_audio_file(&AudioFile::new(
            task.id,
            AudioKind::Voice,
            "voice.mp3".to_string(),
            12.0,
        ))
        .await
        .unwrap();

    let details = harness.service.get_task(task.id).await.unwrap().unwrap();

    assert_eq!(details.task.id, task.id);
    assert_eq!(details.audio_files.len(), 1);
    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["id"], task.id.to_string());
    assert_eq!(json["audio_files"][0]["kind"], "voice");
}

#[tokio::test]
async fn given_unknown_id_when_getting_task_then_returns_none() {
    let harness = service_with(4, Duration::from_secs(3600));

    let details = harness.service.get_task(TaskId::new()).await.unwrap();

    assert!(details.is_none());
}

#[tokio::test]
async fn given_many_tasks_when_listing_then_limit_is_clamped() {
    let harness = service_with(4, Duration::from_secs(3600));
    for i in 0..(MAX_LIST_LIMIT + 5) {
        harness
            .repository
            .create(&Task::new(format!("task {i}")))
            .await
            .unwrap();
    }

    let capped = harness.service.list_tasks(500).await.unwrap();
    let at_least_one = harness.service.list_tasks(0).await.unwrap();

    assert_eq!(capped.len(), MAX_LIST_LIMIT);
    assert_eq!(at_least_one.len(), 1);
}

#[tokio::test]
async fn given_zero_retention_when_sweeping_then_removes_only_finished_or_orphaned_workspaces() {
    let harness = service_with(4, Duration::ZERO);
    let mut finished = Task::new("finished".to_string());
    finished.start().unwrap();
    finished.complete("out.mp3".to_string()).unwrap();
    let mut running = Task::new("running".to_string());
    running.start().unwrap();
    harness.repository.create(&finished).await.unwrap();
    harness.repository.create(&running).await.unwrap();
    let orphan = TaskId::new();
    for id in [finished.id, running.id, orphan] {
        harness.workspaces.prepare(id).await.unwrap();
    }

    let removed = harness.service.sweep_stale_workspaces().await;

    assert_eq!(removed, 2);
    assert!(!harness.workspaces.workspace_path(finished.id).exists());
    assert!(!harness.workspaces.workspace_path(orphan).exists());
    assert!(harness.workspaces.workspace_path(running.id).exists());
}

#[tokio::test]
async fn given_long_retention_when_sweeping_then_keeps_fresh_workspaces() {
    let harness = service_with(4, Duration::from_secs(3600));
    harness.workspaces.prepare(TaskId::new()).await.unwrap();

    let removed = harness.service.sweep_stale_workspaces().await;

    assert_eq!(removed, 0);
    assert_eq!(harness.workspaces.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_tasks_and_workspaces_when_clearing_then_removes_everything() {
    let harness = service_with(4, Duration::from_secs(3600));
    let task = Task::new("focus".to_string());
    harness.repository.create(&task).await.unwrap();
    harness.workspaces.prepare(task.id).await.unwrap();

    harness.service.clear_all_tasks().await.unwrap();

    assert!(harness.repository.list_recent(10).await.unwrap().is_empty());
    assert!(harness.workspaces.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_tasks_left_unfinished_when_recovering_then_fails_only_active_tasks() {
    let harness = service_with(4, Duration::from_secs(3600));
    let pending = Task::new("pending".to_string());
    let mut processing = Task::new("processing".to_string());
    processing.start().unwrap();
    processing.advance(PipelineStep::Tts, 40, "Synthesizing").unwrap();
    let mut completed = Task::new("completed".to_string());
    completed.start().unwrap();
    completed.complete("out.mp3".to_string()).unwrap();
    for task in [&pending, &processing, &completed] {
        harness.repository.create(task).await.unwrap();
    }

    let failed = harness.service.fail_interrupted_tasks().await.unwrap();

    assert_eq!(failed, 2);
    let pending = harness.repository.get_by_id(pending.id).await.unwrap().unwrap();
    assert_eq!(pending.status, TaskStatus::Failed);
    assert_eq!(pending.current_step, PipelineStep::Outline);
    assert_eq!(pending.error_message.as_deref(), Some(INTERRUPTED_MESSAGE));
    let processing = harness.repository.get_by_id(processing.id).await.unwrap().unwrap();
    assert_eq!(processing.status, TaskStatus::Failed);
    assert_eq!(processing.current_step, PipelineStep::Tts);
    let completed = harness.repository.get_by_id(completed.id).await.unwrap().unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);
}

#[tokio::test]
async fn given_no_unfinished_tasks_when_recovering_then_changes_nothing() {
    let harness = service_with(4, Duration::from_secs(3600));

    assert_eq!(harness.service.fail_interrupted_tasks().await.unwrap(), 0);
}
