use std::path::PathBuf;

use super::{BinauralPreset, VolumeMix, VolumeMixError};

pub const DEFAULT_DURATION_SECS: u32 = 30;
pub const MIN_DURATION_SECS: u32 = 1;
pub const MAX_DURATION_SECS: u32 = 600;
pub const DEFAULT_AMBIENT: &str = "rain";
pub const NO_AMBIENT: &str = "none";
pub const MIN_TEMPO: f64 = 0.25;
pub const MAX_TEMPO: f64 = 16.0;
const MAX_OUTPUT_NAME_LEN: usize = 64;

/// Every option a task accepts, with defaults applied at construction and
/// checked once by [`TaskOptions::validate`] before the task is created.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOptions {
    pub user_input: String,
    pub duration_secs: u32,
    pub binaural: BinauralPreset,
    pub ambient: Vec<String>,
    pub background_music: Option<PathBuf>,
    pub tempo: f64,
    pub volumes: VolumeMix,
    pub output_name: Option<String>,
}

impl TaskOptions {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            duration_secs: DEFAULT_DURATION_SECS,
            binaural: BinauralPreset::default(),
            ambient: vec![DEFAULT_AMBIENT.to_string()],
            background_music: None,
            tempo: 1.0,
            volumes: VolumeMix::default(),
            output_name: None,
        }
    }

    pub fn validate(&self) -> Result<(), TaskOptionsError> {
        if self.user_input.trim().is_empty() {
            return Err(TaskOptionsError::EmptyInput);
        }
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&self.duration_secs) {
            return Err(TaskOptionsError::DurationOutOfRange(self.duration_secs));
        }
        if !self.tempo.is_finite() || !(MIN_TEMPO..=MAX_TEMPO).contains(&self.tempo) {
            return Err(TaskOptionsError::TempoOutOfRange(self.tempo));
        }
        if self.ambient.iter().any(|id| id.trim().is_empty()) {
            return Err(TaskOptionsError::BlankAmbientId);
        }
        if let Some(name) = &self.output_name {
            let valid = !name.is_empty()
                && name.len() <= MAX_OUTPUT_NAME_LEN
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(TaskOptionsError::InvalidOutputName(name.clone()));
            }
        }
        self.volumes.validate()?;
        Ok(())
    }

    /// Ambient ids with the `none` sentinel and duplicates removed.
    pub fn ambient_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in &self.ambient {
            let id = id.trim().to_lowercase();
            if id != NO_AMBIENT && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskOptionsError {
    #[error("user input is required")]
    EmptyInput,
    #[error("duration must be between {MIN_DURATION_SECS} and {MAX_DURATION_SECS} seconds, got {0}")]
    DurationOutOfRange(u32),
    #[error("tempo must be between {MIN_TEMPO} and {MAX_TEMPO}, got {0}")]
    TempoOutOfRange(f64),
    #[error("ambient track ids must not be blank")]
    BlankAmbientId,
    #[error("invalid output name: {0}")]
    InvalidOutputName(String),
    #[error(transparent)]
    Volume(#[from] VolumeMixError),
}
