use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{AmbientCatalog, AudioToolError, AudioToolkit};
use crate::domain::{AudioKind, BinauralPreset, DEFAULT_DURATION_SECS, VolumeMix};

use super::{
    BinauralGenerator, BinauralRender, DurationNormalizer, PreparedTrack, SynthesisError,
    TempoAdjuster, TrackMixer,
};

/// Ambient id substituted when a requested id is unknown to the catalog.
pub const FALLBACK_AMBIENT: &str = "light-rain";

#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub workspace: PathBuf,
    pub output: PathBuf,
    pub target_secs: f64,
    pub voice: Option<PathBuf>,
    pub binaural: Option<PathBuf>,
    pub binaural_preset: BinauralPreset,
    pub background_music: Option<PathBuf>,
    pub ambient_ids: Vec<String>,
    pub tempo: f64,
    pub volumes: VolumeMix,
}

#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub output: PathBuf,
    pub target_secs: f64,
    /// Tracks that made it into the mix, in mix order.
    pub tracks: Vec<PreparedTrack>,
}

pub struct AudioSynthesisEngine {
    toolkit: Arc<dyn AudioToolkit>,
    ambient: Arc<dyn AmbientCatalog>,
    normalizer: DurationNormalizer,
    tempo: TempoAdjuster,
    binaural: BinauralGenerator,
    mixer: TrackMixer,
}

impl AudioSynthesisEngine {
    pub fn new(
        toolkit: Arc<dyn AudioToolkit>,
        ambient: Arc<dyn AmbientCatalog>,
        bitrate_kbps: u32,
    ) -> Self {
        Self {
            normalizer: DurationNormalizer::new(Arc::clone(&toolkit)),
            tempo: TempoAdjuster::new(Arc::clone(&toolkit)),
            binaural: BinauralGenerator::new(Arc::clone(&toolkit)),
            mixer: TrackMixer::new(Arc::clone(&toolkit), bitrate_kbps),
            toolkit,
            ambient,
        }
    }

    /// Background music length wins, then the requested duration, then the
    /// default.
    pub async fn resolve_target_duration(
        &self,
        background_music: Option<&Path>,
        requested_secs: Option<f64>,
    ) -> f64 {
        if let Some(path) = background_music {
            if file_exists(path).await {
                match self.toolkit.measure_duration(path).await {
                    Ok(secs) if secs.is_finite() && secs > 0.0 => return secs,
                    Ok(secs) => {
                        tracing::warn!(secs, path = %path.display(), "Background music has no usable duration");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, path = %path.display(), "Failed to measure background music");
                    }
                }
            }
        }

        requested_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(f64::from(DEFAULT_DURATION_SECS))
    }

    pub async fn measure_duration(&self, path: &Path) -> Result<f64, AudioToolError> {
        self.toolkit.measure_duration(path).await
    }

    /// Renders the binaural layer through the fallback chain. `None` means
    /// every method failed and the layer should be left out.
    pub async fn render_binaural(
        &self,
        preset: BinauralPreset,
        seconds: f64,
        workspace: &Path,
    ) -> Option<BinauralRender> {
        let output = workspace.join(binaural_file_name(preset));
        match self.binaural.render(preset, seconds, &output).await {
            Ok(render) => {
                tracing::info!(method = %render.method, preset = %preset, "Binaural track rendered");
                Some(render)
            }
            Err(e) => {
                tracing::error!(error = %e, preset = %preset, "Binaural layer omitted");
                None
            }
        }
    }

    pub async fn render_silent_binaural(
        &self,
        preset: BinauralPreset,
        seconds: f64,
        workspace: &Path,
    ) -> Option<BinauralRender> {
        let output = workspace.join(binaural_file_name(preset));
        match self.binaural.render_silent(seconds, &output).await {
            Ok(render) => Some(render),
            Err(e) => {
                tracing::error!(error = %e, "Silent binaural substitute failed");
                None
            }
        }
    }

    /// Silent stand-in for a voice track the speech backend could not deliver.
    pub async fn placeholder_voice(
        &self,
        workspace: &Path,
        seconds: f64,
    ) -> Result<PathBuf, AudioToolError> {
        let output = workspace.join("voice_placeholder.wav");
        self.toolkit.silence(seconds, &output).await?;
        Ok(output)
    }

    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutput, SynthesisError> {
        let target_secs = request.target_secs;
        let mut tracks = Vec::new();

        if let Some(voice) = self.prepare_voice(&request).await? {
            tracks.push(voice);
        }
        if let Some(binaural) = self.prepare_binaural(&request).await {
            tracks.push(binaural);
        }
        if let Some(background) = self.prepare_background(&request).await {
            tracks.push(background);
        }
        tracks.extend(self.prepare_ambient(&request).await);

        tracing::info!(
            target_secs,
            tracks = tracks.len(),
            "Prepared tracks for mixing"
        );

        self.mixer
            .mix(&tracks, &request.volumes, &request.output)
            .await?;

        Ok(SynthesisOutput {
            output: request.output,
            target_secs,
            tracks,
        })
    }

    async fn prepare_voice(
        &self,
        request: &SynthesisRequest,
    ) -> Result<Option<PreparedTrack>, SynthesisError> {
        let Some(voice) = request.voice.as_deref() else {
            return Ok(None);
        };
        if !file_exists(voice).await {
            tracing::warn!(path = %voice.display(), "Voice track missing, mixing without it");
            return Ok(None);
        }

        let tempo_output = request.workspace.join("voice_tempo.wav");
        let adjusted = self
            .tempo
            .adjust(voice, request.tempo, &tempo_output)
            .await
            .map_err(SynthesisError::Voice)?;

        let output = request.workspace.join("voice_prepared.wav");
        self.normalizer
            .normalize(&adjusted, request.target_secs, &output)
            .await
            .map_err(SynthesisError::Voice)?;

        Ok(Some(PreparedTrack {
            kind: AudioKind::Voice,
            path: output,
        }))
    }

    async fn prepare_binaural(&self, request: &SynthesisRequest) -> Option<PreparedTrack> {
        if let Some(path) = request.binaural.as_deref() {
            if file_exists(path).await {
                return Some(PreparedTrack {
                    kind: AudioKind::Binaural,
                    path: path.to_path_buf(),
                });
            }
            tracing::warn!(path = %path.display(), "Binaural track missing, rendering again");
        }

        self.render_binaural(request.binaural_preset, request.target_secs, &request.workspace)
            .await
            .map(|render| PreparedTrack {
                kind: AudioKind::Binaural,
                path: render.path,
            })
    }

    async fn prepare_background(&self, request: &SynthesisRequest) -> Option<PreparedTrack> {
        let source = request.background_music.as_deref()?;
        if !file_exists(source).await {
            tracing::warn!(path = %source.display(), "Background music missing, skipping");
            return None;
        }

        let output = request.workspace.join("background_prepared.wav");
        match self
            .normalizer
            .normalize(source, request.target_secs, &output)
            .await
        {
            Ok(_) => Some(PreparedTrack {
                kind: AudioKind::Background,
                path: output,
            }),
            Err(e) => {
                tracing::warn!(error = %e, path = %source.display(), "Background music skipped");
                None
            }
        }
    }

    async fn prepare_ambient(&self, request: &SynthesisRequest) -> Vec<PreparedTrack> {
        let mut tracks = Vec::new();

        for (index, id) in request.ambient_ids.iter().enumerate() {
            let Some(source) = self.resolve_ambient(id).await else {
                tracing::warn!(ambient = %id, "Ambient track unavailable, skipping");
                continue;
            };

            let output = request
                .workspace
                .join(format!("ambient_{index}_{}.wav", file_stem_safe(id)));
            match self
                .normalizer
                .normalize(&source, request.target_secs, &output)
                .await
            {
                Ok(_) => tracks.push(PreparedTrack {
                    kind: AudioKind::Ambient,
                    path: output,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, ambient = %id, "Ambient track skipped");
                }
            }
        }

        tracks
    }

    async fn resolve_ambient(&self, id: &str) -> Option<PathBuf> {
        if let Some(path) = self.ambient.resolve(id).await {
            return Some(path);
        }
        if self.ambient.ids().iter().any(|known| known == id) {
            return None;
        }
        tracing::debug!(ambient = %id, fallback = FALLBACK_AMBIENT, "Unknown ambient id");
        self.ambient.resolve(FALLBACK_AMBIENT).await
    }
}

fn binaural_file_name(preset: BinauralPreset) -> String {
    format!("binaural_{preset}.wav")
}

fn file_stem_safe(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
