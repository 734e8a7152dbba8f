mod binaural_generator;
mod config_preset_service;
mod duration_normalizer;
mod pipeline_error;
mod stage_timeouts;
mod synthesis_engine;
mod synthesis_error;
mod task_pipeline;
mod task_service;
mod task_worker;
mod tempo_adjuster;
mod track_mixer;

pub use binaural_generator::{BinauralGenerator, BinauralMethod, BinauralRender};
pub use config_preset_service::{ConfigPresetService, ConfigPresetServiceError};
pub use duration_normalizer::DurationNormalizer;
pub use pipeline_error::PipelineError;
pub use stage_timeouts::StageTimeouts;
pub use synthesis_engine::{
    AudioSynthesisEngine, FALLBACK_AMBIENT, SynthesisOutput, SynthesisRequest,
};
pub use synthesis_error::{BinauralError, SynthesisError, TrackPreparationError};
pub use task_pipeline::{TaskPipeline, output_file_name};
pub use task_service::{
    INTERRUPTED_MESSAGE, MAX_LIST_LIMIT, TaskDetails, TaskService, TaskServiceError,
};
pub use task_worker::{TaskMessage, TaskWorker, task_queue};
pub use tempo_adjuster::TempoAdjuster;
pub use track_mixer::{PreparedTrack, TrackMixer, gain_for};
