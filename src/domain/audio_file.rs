use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    Voice,
    Binaural,
    Background,
    Ambient,
    Final,
}

impl AudioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioKind::Voice => "voice",
            AudioKind::Binaural => "binaural",
            AudioKind::Background => "background",
            AudioKind::Ambient => "ambient",
            AudioKind::Final => "final",
        }
    }
}

impl FromStr for AudioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voice" => Ok(AudioKind::Voice),
            "binaural" => Ok(AudioKind::Binaural),
            "background" => Ok(AudioKind::Background),
            "ambient" => Ok(AudioKind::Ambient),
            "final" => Ok(AudioKind::Final),
            _ => Err(format!("Invalid audio kind: {}", s)),
        }
    }
}

impl fmt::Display for AudioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An artifact produced while processing a task. Records are append-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioFile {
    pub id: Uuid,
    pub task_id: TaskId,
    pub kind: AudioKind,
    pub path: String,
    pub duration_secs: f64,
    pub created_at: DateTime<Utc>,
}

impl AudioFile {
    pub fn new(task_id: TaskId, kind: AudioKind, path: String, duration_secs: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            kind,
            path,
            duration_secs,
            created_at: Utc::now(),
        }
    }
}
