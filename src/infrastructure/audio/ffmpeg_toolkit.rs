use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioToolError, AudioToolkit, MixInput};
use crate::domain::BinauralTones;

use super::ffmpeg_args;

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";
const MAX_STDERR_CHARS: usize = 2000;

/// Runs `ffmpeg`/`ffprobe` as child processes. Children are killed when the
/// awaiting future is dropped, so stage timeouts do not leak processes.
pub struct FfmpegToolkit {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegToolkit {
    pub fn new(ffmpeg: PathBuf, ffprobe: PathBuf) -> Self {
        Self { ffmpeg, ffprobe }
    }

    async fn run(
        &self,
        tool: &'static str,
        program: &Path,
        args: Vec<String>,
    ) -> Result<Vec<u8>, AudioToolError> {
        tracing::debug!(tool, args = %args.join(" "), "Spawning audio tool");

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| AudioToolError::Spawn { tool, source })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
        tracing::warn!(tool, status = %output.status, stderr = %stderr, "Audio tool failed");
        Err(AudioToolError::Failed {
            tool,
            status: output.status.to_string(),
            stderr,
        })
    }

    async fn ffmpeg(&self, args: Vec<String>, output: &Path) -> Result<(), AudioToolError> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.run(FFMPEG, &self.ffmpeg, args).await.map(|_| ())
    }
}

#[async_trait]
impl AudioToolkit for FfmpegToolkit {
    async fn measure_duration(&self, input: &Path) -> Result<f64, AudioToolError> {
        let stdout = self
            .run(FFPROBE, &self.ffprobe, ffmpeg_args::duration_query_args(input))
            .await?;
        let text = String::from_utf8_lossy(&stdout);
        ffmpeg_args::parse_duration_output(&text)
            .ok_or_else(|| AudioToolError::UnreadableDuration(text.trim().to_string()))
    }

    async fn truncate(
        &self,
        input: &Path,
        seconds: f64,
        output: &Path,
    ) -> Result<(), AudioToolError> {
        self.ffmpeg(ffmpeg_args::truncate_args(input, seconds, output), output)
            .await
    }

    async fn loop_concat(
        &self,
        input: &Path,
        repetitions: u32,
        seconds: f64,
        output: &Path,
    ) -> Result<(), AudioToolError> {
        self.ffmpeg(
            ffmpeg_args::loop_concat_args(input, repetitions, seconds, output),
            output,
        )
        .await
    }

    async fn change_tempo(
        &self,
        input: &Path,
        stages: &[f64],
        output: &Path,
    ) -> Result<(), AudioToolError> {
        self.ffmpeg(ffmpeg_args::tempo_args(input, stages, output), output)
            .await
    }

    async fn dual_tone(
        &self,
        tones: BinauralTones,
        seconds: f64,
        gain: f64,
        output: &Path,
    ) -> Result<(), AudioToolError> {
        self.ffmpeg(
            ffmpeg_args::dual_tone_args(tones, seconds, gain, output),
            output,
        )
        .await
    }

    async fn modulated_tone(
        &self,
        carrier_hz: f64,
        beat_hz: f64,
        seconds: f64,
        gain: f64,
        output: &Path,
    ) -> Result<(), AudioToolError> {
        self.ffmpeg(
            ffmpeg_args::modulated_tone_args(carrier_hz, beat_hz, seconds, gain, output),
            output,
        )
        .await
    }

    async fn silence(&self, seconds: f64, output: &Path) -> Result<(), AudioToolError> {
        self.ffmpeg(ffmpeg_args::silence_args(seconds, output), output)
            .await
    }

    async fn mix(
        &self,
        inputs: &[MixInput],
        bitrate_kbps: u32,
        output: &Path,
    ) -> Result<(), AudioToolError> {
        if inputs.is_empty() {
            return Err(AudioToolError::NoInputs);
        }
        self.ffmpeg(ffmpeg_args::mix_args(inputs, bitrate_kbps, output), output)
            .await
    }
}
