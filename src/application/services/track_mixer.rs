use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{AudioToolkit, MixInput};
use crate::domain::{AudioKind, VolumeMix};

use super::SynthesisError;

/// A track normalized to the target duration and ready for the downmix.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTrack {
    pub kind: AudioKind,
    pub path: PathBuf,
}

pub struct TrackMixer {
    toolkit: Arc<dyn AudioToolkit>,
    bitrate_kbps: u32,
}

impl TrackMixer {
    pub fn new(toolkit: Arc<dyn AudioToolkit>, bitrate_kbps: u32) -> Self {
        Self {
            toolkit,
            bitrate_kbps,
        }
    }

    pub async fn mix(
        &self,
        tracks: &[PreparedTrack],
        volumes: &VolumeMix,
        output: &Path,
    ) -> Result<(), SynthesisError> {
        if tracks.is_empty() {
            return Err(SynthesisError::NoTracksAvailable);
        }

        let inputs: Vec<MixInput> = tracks
            .iter()
            .map(|track| MixInput {
                path: track.path.clone(),
                gain: gain_for(track.kind, volumes),
            })
            .collect();

        tracing::info!(
            tracks = inputs.len(),
            output = %output.display(),
            "Mixing tracks"
        );

        self.toolkit
            .mix(&inputs, self.bitrate_kbps, output)
            .await
            .map_err(SynthesisError::Mix)
    }
}

pub fn gain_for(kind: AudioKind, volumes: &VolumeMix) -> f64 {
    match kind {
        AudioKind::Voice => volumes.voice,
        AudioKind::Binaural => volumes.binaural,
        AudioKind::Background => volumes.background,
        AudioKind::Ambient | AudioKind::Final => volumes.environment,
    }
}
