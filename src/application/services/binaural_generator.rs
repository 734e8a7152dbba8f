use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{AudioToolError, AudioToolkit};
use crate::domain::BinauralPreset;

use super::BinauralError;

const BINAURAL_GAIN: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinauralMethod {
    /// Two pure tones, one per ear.
    Stereo,
    /// One carrier tone with tremolo at the beat frequency.
    Modulated,
    Silent,
}

impl fmt::Display for BinauralMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinauralMethod::Stereo => "stereo",
            BinauralMethod::Modulated => "modulated",
            BinauralMethod::Silent => "silent",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinauralRender {
    pub path: PathBuf,
    pub method: BinauralMethod,
}

/// Renders a binaural beat, degrading to a modulated tone and then to
/// silence when a method fails. The result always has the requested length.
pub struct BinauralGenerator {
    toolkit: Arc<dyn AudioToolkit>,
}

impl BinauralGenerator {
    pub fn new(toolkit: Arc<dyn AudioToolkit>) -> Self {
        Self { toolkit }
    }

    pub async fn render(
        &self,
        preset: BinauralPreset,
        seconds: f64,
        output: &Path,
    ) -> Result<BinauralRender, BinauralError> {
        let tones = preset.tones();

        match self
            .toolkit
            .dual_tone(tones, seconds, BINAURAL_GAIN, output)
            .await
        {
            Ok(()) => return Ok(rendered(output, BinauralMethod::Stereo)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    preset = %preset,
                    "Stereo binaural synthesis failed, trying modulated tone"
                );
            }
        }

        match self
            .toolkit
            .modulated_tone(tones.carrier_hz(), tones.beat_hz(), seconds, BINAURAL_GAIN, output)
            .await
        {
            Ok(()) => return Ok(rendered(output, BinauralMethod::Modulated)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    preset = %preset,
                    "Modulated binaural synthesis failed, falling back to silence"
                );
            }
        }

        self.render_silent(seconds, output).await
    }

    pub async fn render_silent(
        &self,
        seconds: f64,
        output: &Path,
    ) -> Result<BinauralRender, BinauralError> {
        self.toolkit
            .silence(seconds, output)
            .await
            .map(|()| rendered(output, BinauralMethod::Silent))
            .map_err(|e: AudioToolError| BinauralError::Exhausted(e))
    }
}

fn rendered(output: &Path, method: BinauralMethod) -> BinauralRender {
    BinauralRender {
        path: output.to_path_buf(),
        method,
    }
}
