use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::BinauralTones;

/// One layer of a downmix.
#[derive(Debug, Clone, PartialEq)]
pub struct MixInput {
    pub path: PathBuf,
    pub gain: f64,
}

/// Audio primitives backed by an external transcoder.
///
/// Every method writes a complete file to `output`; callers own the paths.
#[async_trait]
pub trait AudioToolkit: Send + Sync {
    async fn measure_duration(&self, input: &Path) -> Result<f64, AudioToolError>;

    async fn truncate(
        &self,
        input: &Path,
        seconds: f64,
        output: &Path,
    ) -> Result<(), AudioToolError>;

    /// Concatenates `repetitions` copies of `input` and trims the result to
    /// exactly `seconds`.
    async fn loop_concat(
        &self,
        input: &Path,
        repetitions: u32,
        seconds: f64,
        output: &Path,
    ) -> Result<(), AudioToolError>;

    /// Applies each ratio as its own time-stretch stage, in order.
    async fn change_tempo(
        &self,
        input: &Path,
        stages: &[f64],
        output: &Path,
    ) -> Result<(), AudioToolError>;

    async fn dual_tone(
        &self,
        tones: BinauralTones,
        seconds: f64,
        gain: f64,
        output: &Path,
    ) -> Result<(), AudioToolError>;

    async fn modulated_tone(
        &self,
        carrier_hz: f64,
        beat_hz: f64,
        seconds: f64,
        gain: f64,
        output: &Path,
    ) -> Result<(), AudioToolError>;

    async fn silence(&self, seconds: f64, output: &Path) -> Result<(), AudioToolError>;

    async fn mix(
        &self,
        inputs: &[MixInput],
        bitrate_kbps: u32,
        output: &Path,
    ) -> Result<(), AudioToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioToolError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: String,
        stderr: String,
    },
    #[error("unreadable duration output: {0}")]
    UnreadableDuration(String),
    #[error("no inputs to mix")]
    NoInputs,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
