use sub_music::application::ports::TaskEventPublisher;
use sub_music::domain::{TaskEvent, TaskId};
use sub_music::infrastructure::events::BroadcastEventPublisher;

#[tokio::test]
async fn given_subscriber_when_publishing_then_receives_event() {
    let publisher = BroadcastEventPublisher::new(8);
    let mut receiver = publisher.subscribe();
    let event = TaskEvent::Completed {
        task_id: TaskId::new(),
        output_file: "out.mp3".to_string(),
    };

    publisher.publish(event.clone());

    assert_eq!(receiver.recv().await.unwrap(), event);
}

#[test]
fn given_no_subscribers_when_publishing_then_does_not_panic() {
    let publisher = BroadcastEventPublisher::new(8);

    publisher.publish(TaskEvent::Completed {
        task_id: TaskId::new(),
        output_file: "out.mp3".to_string(),
    });
}
