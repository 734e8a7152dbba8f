mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::{ENVIRONMENT_VAR, load_environment, load_settings};
pub use settings::{
    AudioSettings, ContentSettings, DatabaseSettings, LogFormat, LoggingSettings, ServerSettings,
    Settings, SpeechSettings, StorageSettings, TimeoutSettings, WorkerSettings,
};
