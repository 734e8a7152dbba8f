mod ambient_catalog;
mod audio_toolkit;
mod config_preset_repository;
mod content_generator;
mod repository_error;
mod speech_synthesizer;
mod task_event_publisher;
mod task_repository;
mod upload_store;
mod workspace_store;

pub use ambient_catalog::AmbientCatalog;
pub use audio_toolkit::{AudioToolError, AudioToolkit, MixInput};
pub use config_preset_repository::ConfigPresetRepository;
pub use content_generator::{ContentGenerationError, ContentGenerator};
pub use repository_error::RepositoryError;
pub use speech_synthesizer::{SpeechSynthesisError, SpeechSynthesizer};
pub use task_event_publisher::TaskEventPublisher;
pub use task_repository::TaskRepository;
pub use upload_store::{UploadStore, UploadStoreError};
pub use workspace_store::{WorkspaceEntry, WorkspaceError, WorkspaceStore};
