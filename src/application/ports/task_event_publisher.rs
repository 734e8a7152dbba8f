use crate::domain::TaskEvent;

/// Fan-out of pipeline events to whatever transport is listening.
///
/// Publishing never fails the pipeline; having no listener is normal.
pub trait TaskEventPublisher: Send + Sync {
    fn publish(&self, event: TaskEvent);
}
