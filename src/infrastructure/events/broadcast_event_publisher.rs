use tokio::sync::broadcast;

use crate::application::ports::TaskEventPublisher;
use crate::domain::TaskEvent;

/// In-process fan-out to every live event stream. Slow subscribers lag and
/// lose the oldest events rather than blocking the pipeline.
#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<TaskEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.sender.subscribe()
    }
}

impl TaskEventPublisher for BroadcastEventPublisher {
    fn publish(&self, event: TaskEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }
}
