use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::application::services::StageTimeouts;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub audio: AudioSettings,
    pub worker: WorkerSettings,
    pub timeouts: TimeoutSettings,
    pub content: ContentSettings,
    pub speech: SpeechSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Rejects combinations that can never behave as configured.
    pub fn validate(&self) -> Result<(), String> {
        let retry_budget = self.content.retry_budget();
        let stage_limit = Duration::from_secs(self.timeouts.content_secs);
        if retry_budget > stage_limit {
            return Err(format!(
                "content retries need up to {}s ({} attempts of {}s plus backoff) but timeouts.content_secs is {}s",
                retry_budget.as_secs(),
                self.content.max_attempts,
                self.content.request_timeout_secs,
                self.timeouts.content_secs,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Without a `url` tasks are kept in memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub temp_dir: PathBuf,
    pub output_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub config_file: PathBuf,
    pub workspace_retention_secs: u64,
}

impl StorageSettings {
    pub fn workspace_retention(&self) -> Duration {
        Duration::from_secs(self.workspace_retention_secs)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("data/temp"),
            output_dir: PathBuf::from("data/output"),
            upload_dir: PathBuf::from("data/uploads"),
            assets_dir: PathBuf::from("assets"),
            config_file: PathBuf::from("data/user-configs.json"),
            workspace_retention_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub bitrate_kbps: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            bitrate_kbps: 320,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    pub concurrency: usize,
    pub queue_capacity: usize,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            concurrency: 2,
            queue_capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub content_secs: u64,
    pub speech_secs: u64,
    pub binaural_secs: u64,
    pub mixing_secs: u64,
}

impl TimeoutSettings {
    pub fn stage_timeouts(&self) -> StageTimeouts {
        StageTimeouts {
            content: Duration::from_secs(self.content_secs),
            speech: Duration::from_secs(self.speech_secs),
            binaural: Duration::from_secs(self.binaural_secs),
            mixing: Duration::from_secs(self.mixing_secs),
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            content_secs: 120,
            speech_secs: 180,
            binaural_secs: 60,
            mixing_secs: 600,
        }
    }
}

/// Workflow backend for outline and script generation. Left unset, the
/// deterministic placeholder generator is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub user: String,
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
    pub retry_step_secs: u64,
}

impl ContentSettings {
    pub fn retry_step(&self) -> Duration {
        Duration::from_secs(self.retry_step_secs)
    }

    /// Longest a generation can take when every attempt times out: each
    /// attempt's request timeout plus the linear backoff between attempts.
    pub fn retry_budget(&self) -> Duration {
        let attempts = u64::from(self.max_attempts.max(1));
        let requests = self.request_timeout_secs.saturating_mul(attempts);
        let backoff = self
            .retry_step_secs
            .saturating_mul(attempts * (attempts - 1) / 2);
        Duration::from_secs(requests.saturating_add(backoff))
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user: "sub-music".to_string(),
            max_attempts: 3,
            request_timeout_secs: 35,
            retry_step_secs: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub voice: String,
    pub request_timeout_secs: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    pub filter: Option<String>,
}
