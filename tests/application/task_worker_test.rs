use std::time::Duration;

use sub_music::application::ports::TaskRepository;
use sub_music::application::services::{TaskService, TaskWorker, task_queue};
use sub_music::domain::{TaskOptions, TaskStatus};

use crate::helpers::{FakeSpeech, PipelineHarness, RecordingToolkit, fixed_content, wait_for};

#[tokio::test]
async fn given_running_worker_when_tasks_are_created_then_each_completes() {
    let harness = PipelineHarness::new(RecordingToolkit::new(), fixed_content(), FakeSpeech::Working);
    let (sender, receiver) = task_queue(8);
    let service = TaskService::new(
        harness.repository.clone(),
        harness.workspaces.clone(),
        harness.publisher.clone(),
        sender,
        Duration::from_secs(3600),
    );
    let worker = TaskWorker::new(receiver, harness.pipeline.clone(), 2);
    let worker_handle = tokio::spawn(worker.run());

    let first = service.create_task(TaskOptions::new("focus")).await.unwrap();
    let second = service.create_task(TaskOptions::new("sleep")).await.unwrap();

    let ids = [first.id, second.id];
    let repository = harness.repository.clone();
    let finished = wait_for(|| {
        let repository = repository.clone();
        async move {
            let mut done = true;
            for id in ids {
                let task = repository.get_by_id(id).await.unwrap().unwrap();
                done &= task.status == TaskStatus::Completed;
            }
            done
        }
    })
    .await;

    assert!(finished, "tasks did not complete in time");
    worker_handle.abort();
}

#[tokio::test]
async fn given_dropped_sender_when_worker_runs_then_it_stops() {
    let harness = PipelineHarness::new(RecordingToolkit::new(), fixed_content(), FakeSpeech::Working);
    let (sender, receiver) = task_queue(1);
    let worker = TaskWorker::new(receiver, harness.pipeline.clone(), 1);
    drop(sender);

    let stopped = tokio::time::timeout(Duration::from_secs(1), worker.run()).await;

    assert!(stopped.is_ok());
}
