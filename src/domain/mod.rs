mod audio_file;
mod binaural_preset;
mod config_preset;
mod generated_content;
mod normalization_plan;
mod pipeline_step;
mod task;
mod task_event;
mod task_id;
mod task_options;
mod task_status;
mod tempo_plan;
mod upload_key;
mod volume_mix;

pub use audio_file::{AudioFile, AudioKind};
pub use binaural_preset::{BinauralPreset, BinauralTones, CARRIER_HZ};
pub use config_preset::{
    ConfigPreset, ConfigPresetError, LastUsedConfig, MAX_PRESET_NAME_CHARS, SavedConfigs,
    validate_config, validate_preset,
};
pub use generated_content::GeneratedContent;
pub use normalization_plan::{NormalizationError, NormalizationPlan};
pub use pipeline_step::PipelineStep;
pub use task::{Task, TaskStateError};
pub use task_event::{StepStatus, TaskEvent};
pub use task_id::TaskId;
pub use task_options::{
    DEFAULT_AMBIENT, DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MAX_TEMPO, MIN_DURATION_SECS,
    MIN_TEMPO, NO_AMBIENT, TaskOptions, TaskOptionsError,
};
pub use task_status::TaskStatus;
pub use tempo_plan::{MAX_STAGE_RATIO, MIN_STAGE_RATIO, TempoPlan, TempoPlanError};
pub use upload_key::UploadKey;
pub use volume_mix::{VolumeMix, VolumeMixError};
