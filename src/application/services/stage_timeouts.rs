use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimeouts {
    pub content: Duration,
    pub speech: Duration,
    pub binaural: Duration,
    pub mixing: Duration,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            content: Duration::from_secs(120),
            speech: Duration::from_secs(180),
            binaural: Duration::from_secs(60),
            mixing: Duration::from_secs(600),
        }
    }
}
