use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::time::timeout;

use crate::application::ports::{
    ContentGenerator, SpeechSynthesizer, TaskEventPublisher, TaskRepository, WorkspaceStore,
};
use crate::domain::{
    AudioFile, AudioKind, BinauralPreset, GeneratedContent, PipelineStep, StepStatus, Task,
    TaskEvent, TaskId, TaskStateError,
};

use super::{AudioSynthesisEngine, PipelineError, StageTimeouts, SynthesisRequest, TaskMessage};

const OUTPUT_EXTENSION: &str = "mp3";

/// Drives one task from content generation to the exported mix.
///
/// Every task mutation is persisted before the matching events are
/// published. The speech and binaural branches run concurrently and only
/// record artifacts and step events; step and progress are persisted by the
/// caller once both have finished.
pub struct TaskPipeline {
    repository: Arc<dyn TaskRepository>,
    publisher: Arc<dyn TaskEventPublisher>,
    workspaces: Arc<dyn WorkspaceStore>,
    content: Arc<dyn ContentGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    engine: Arc<AudioSynthesisEngine>,
    timeouts: StageTimeouts,
}

impl TaskPipeline {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        publisher: Arc<dyn TaskEventPublisher>,
        workspaces: Arc<dyn WorkspaceStore>,
        content: Arc<dyn ContentGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        engine: Arc<AudioSynthesisEngine>,
        timeouts: StageTimeouts,
    ) -> Self {
        Self {
            repository,
            publisher,
            workspaces,
            content,
            speech,
            engine,
            timeouts,
        }
    }

    pub async fn run(&self, msg: TaskMessage) {
        let task_id = msg.task_id;
        match self.execute(&msg).await {
            Ok(output_file) => {
                tracing::info!(output_file = %output_file, "Task completed");
            }
            Err(e) => {
                let step = e.step();
                tracing::error!(error = %e, step = %step, "Task failed");
                self.fail(task_id, step, e.to_string()).await;
            }
        }
    }

    /// Flips the task to Failed at `step`. Used for pipeline errors and for
    /// runs that died without reporting one.
    pub async fn fail(&self, task_id: TaskId, step: PipelineStep, message: String) {
        let persisted = self
            .mutate(task_id, step, |task| task.fail(step, message.clone()))
            .await;
        if let Err(e) = persisted {
            tracing::error!(error = %e, "Failed to persist task failure");
            return;
        }
        self.publisher
            .publish(TaskEvent::step_failed(task_id, step, message.clone()));
        self.publisher.publish(TaskEvent::Failed {
            task_id,
            step,
            message,
        });
    }

    pub async fn current_step(&self, task_id: TaskId) -> PipelineStep {
        match self.repository.get_by_id(task_id).await {
            Ok(Some(task)) => task.current_step,
            _ => PipelineStep::Outline,
        }
    }

    async fn execute(&self, msg: &TaskMessage) -> Result<String, PipelineError> {
        let task_id = msg.task_id;
        let options = &msg.options;

        let workspace =
            self.workspaces
                .prepare(task_id)
                .await
                .map_err(|source| PipelineError::Workspace {
                    step: PipelineStep::Outline,
                    source,
                })?;

        let background_music = match &options.background_music {
            Some(upload) => Some(self.adopt_upload(task_id, upload).await),
            None => None,
        };

        self.mutate(task_id, PipelineStep::Outline, |task| task.start())
            .await?;
        self.advance(task_id, PipelineStep::Outline, 10, "Generating outline and content")
            .await?;
        self.publish_step(task_id, PipelineStep::Outline, StepStatus::Processing);

        let GeneratedContent { outline, content } =
            self.generate_content(&options.user_input).await;
        let task = self
            .mutate(task_id, PipelineStep::Expand, |task| {
                task.record_content(outline.clone(), content.clone())?;
                task.advance(PipelineStep::Expand, 30, "Content ready")
            })
            .await?;
        self.publish_progress(&task);
        self.publisher
            .publish(TaskEvent::step_with_content(task_id, PipelineStep::Outline, outline));
        self.publisher.publish(TaskEvent::step_with_content(
            task_id,
            PipelineStep::Expand,
            content.clone(),
        ));

        let target_secs = self
            .engine
            .resolve_target_duration(
                background_music.as_deref(),
                Some(f64::from(options.duration_secs)),
            )
            .await;

        self.advance(task_id, PipelineStep::Tts, 40, "Synthesizing voice and binaural beat")
            .await?;
        self.publish_step(task_id, PipelineStep::Tts, StepStatus::Processing);
        self.publish_step(task_id, PipelineStep::Binaural, StepStatus::Processing);

        let (voice, binaural) = tokio::join!(
            self.speech_branch(task_id, &content, &workspace, target_secs),
            self.binaural_branch(task_id, options.binaural, target_secs, &workspace),
        );
        let voice = voice?;
        let binaural = binaural?;

        self.advance(task_id, PipelineStep::Binaural, 60, "Voice and binaural tracks ready")
            .await?;

        self.publish_step(task_id, PipelineStep::Background, StepStatus::Processing);
        self.publish_step(task_id, PipelineStep::Background, StepStatus::Completed);

        self.advance(task_id, PipelineStep::Mixing, 80, "Mixing tracks")
            .await?;
        self.publish_step(task_id, PipelineStep::Mixing, StepStatus::Processing);

        let file_name = output_file_name(task_id, options.output_name.as_deref());
        let output =
            self.workspaces
                .output_path(&file_name)
                .await
                .map_err(|source| PipelineError::Workspace {
                    step: PipelineStep::Mixing,
                    source,
                })?;

        let request = SynthesisRequest {
            workspace: workspace.clone(),
            output,
            target_secs,
            voice: Some(voice),
            binaural,
            binaural_preset: options.binaural,
            background_music,
            ambient_ids: options.ambient_ids(),
            tempo: options.tempo,
            volumes: options.volumes,
        };

        let synthesized = timeout(self.timeouts.mixing, self.engine.synthesize(request))
            .await
            .map_err(|_| PipelineError::TimedOut {
                step: PipelineStep::Mixing,
                limit: self.timeouts.mixing,
            })?
            .map_err(PipelineError::Synthesis)?;

        for track in &synthesized.tracks {
            if matches!(track.kind, AudioKind::Background | AudioKind::Ambient) {
                self.record_artifact(
                    task_id,
                    PipelineStep::Mixing,
                    track.kind,
                    &track.path,
                    synthesized.target_secs,
                )
                .await?;
            }
        }
        let output_file = path_string(&synthesized.output);
        self.record_artifact(
            task_id,
            PipelineStep::Mixing,
            AudioKind::Final,
            &synthesized.output,
            synthesized.target_secs,
        )
        .await?;
        self.publisher.publish(TaskEvent::step_with_file(
            task_id,
            PipelineStep::Mixing,
            output_file.clone(),
        ));

        self.advance(task_id, PipelineStep::Export, 100, "Export complete")
            .await?;
        self.mutate(task_id, PipelineStep::Export, |task| {
            task.complete(output_file.clone())
        })
        .await?;
        self.publisher.publish(TaskEvent::Completed {
            task_id,
            output_file: output_file.clone(),
        });

        Ok(output_file)
    }

    /// Keeps the uploaded background with the task's other scratch files.
    /// A failed move leaves the upload where it was.
    async fn adopt_upload(&self, task_id: TaskId, upload: &Path) -> PathBuf {
        match self.workspaces.adopt(task_id, upload).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to move upload into workspace");
                upload.to_path_buf()
            }
        }
    }

    async fn generate_content(&self, user_input: &str) -> GeneratedContent {
        match timeout(self.timeouts.content, self.content.generate(user_input)).await {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Content generation failed, using placeholder text");
                GeneratedContent::placeholder(user_input)
            }
            Err(_) => {
                tracing::warn!(
                    limit_secs = self.timeouts.content.as_secs(),
                    "Content generation timed out, using placeholder text"
                );
                GeneratedContent::placeholder(user_input)
            }
        }
    }

    async fn speech_branch(
        &self,
        task_id: TaskId,
        text: &str,
        workspace: &Path,
        target_secs: f64,
    ) -> Result<PathBuf, PipelineError> {
        let synthesized = timeout(
            self.timeouts.speech,
            self.speech.synthesize(text, task_id, workspace),
        )
        .await;

        let voice = match synthesized {
            Ok(Ok(path)) => path,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Speech synthesis failed, using placeholder voice");
                self.placeholder_voice(workspace, target_secs).await?
            }
            Err(_) => {
                tracing::warn!(
                    limit_secs = self.timeouts.speech.as_secs(),
                    "Speech synthesis timed out, using placeholder voice"
                );
                self.placeholder_voice(workspace, target_secs).await?
            }
        };

        let duration_secs = self.engine.measure_duration(&voice).await.unwrap_or(0.0);
        self.record_artifact(task_id, PipelineStep::Tts, AudioKind::Voice, &voice, duration_secs)
            .await?;
        self.publisher.publish(TaskEvent::step_with_file(
            task_id,
            PipelineStep::Tts,
            path_string(&voice),
        ));

        Ok(voice)
    }

    async fn placeholder_voice(
        &self,
        workspace: &Path,
        target_secs: f64,
    ) -> Result<PathBuf, PipelineError> {
        self.engine
            .placeholder_voice(workspace, target_secs)
            .await
            .map_err(PipelineError::PlaceholderVoice)
    }

    async fn binaural_branch(
        &self,
        task_id: TaskId,
        preset: BinauralPreset,
        target_secs: f64,
        workspace: &Path,
    ) -> Result<Option<PathBuf>, PipelineError> {
        let rendered = match timeout(
            self.timeouts.binaural,
            self.engine.render_binaural(preset, target_secs, workspace),
        )
        .await
        {
            Ok(rendered) => rendered,
            Err(_) => {
                tracing::warn!(
                    limit_secs = self.timeouts.binaural.as_secs(),
                    "Binaural rendering timed out, substituting silence"
                );
                self.engine
                    .render_silent_binaural(preset, target_secs, workspace)
                    .await
            }
        };

        let Some(render) = rendered else {
            self.publisher.publish(TaskEvent::step_failed(
                task_id,
                PipelineStep::Binaural,
                "binaural layer unavailable".to_string(),
            ));
            return Ok(None);
        };

        self.record_artifact(
            task_id,
            PipelineStep::Binaural,
            AudioKind::Binaural,
            &render.path,
            target_secs,
        )
        .await?;
        self.publisher.publish(TaskEvent::step_with_file(
            task_id,
            PipelineStep::Binaural,
            path_string(&render.path),
        ));

        Ok(Some(render.path))
    }

    async fn record_artifact(
        &self,
        task_id: TaskId,
        step: PipelineStep,
        kind: AudioKind,
        path: &Path,
        duration_secs: f64,
    ) -> Result<(), PipelineError> {
        let file = AudioFile::new(task_id, kind, path_string(path), duration_secs);
        self.repository
            .append_audio_file(&file)
            .await
            .map_err(|source| PipelineError::Repository { step, source })
    }

    async fn advance(
        &self,
        task_id: TaskId,
        step: PipelineStep,
        progress: u8,
        message: &str,
    ) -> Result<Task, PipelineError> {
        let task = self
            .mutate(task_id, step, |task| task.advance(step, progress, message))
            .await?;
        self.publish_progress(&task);
        Ok(task)
    }

    /// The single update routine: load, apply, persist, then broadcast the
    /// full task.
    async fn mutate<F>(
        &self,
        task_id: TaskId,
        step: PipelineStep,
        apply: F,
    ) -> Result<Task, PipelineError>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskStateError>,
    {
        let mut task = self
            .repository
            .get_by_id(task_id)
            .await
            .map_err(|source| PipelineError::Repository { step, source })?
            .ok_or(PipelineError::TaskNotFound { step, task_id })?;

        apply(&mut task).map_err(|source| PipelineError::State { step, source })?;

        self.repository
            .update(&task)
            .await
            .map_err(|source| PipelineError::Repository { step, source })?;

        tracing::debug!(
            step = %task.current_step,
            progress = task.progress,
            status = %task.status,
            "Task state persisted"
        );
        self.publisher.publish(TaskEvent::TaskUpdated {
            task: Box::new(task.clone()),
        });
        Ok(task)
    }

    fn publish_progress(&self, task: &Task) {
        self.publisher.publish(TaskEvent::Progress {
            task_id: task.id,
            status: task.status,
            step: task.current_step,
            progress: task.progress,
            message: task.message.clone().unwrap_or_default(),
        });
    }

    fn publish_step(&self, task_id: TaskId, step: PipelineStep, status: StepStatus) {
        self.publisher.publish(TaskEvent::step(task_id, step, status));
    }
}

/// Output names always carry the task id, so tasks sharing a requested name
/// never overwrite each other's mix.
pub fn output_file_name(task_id: TaskId, output_name: Option<&str>) -> String {
    match output_name {
        Some(stem) => format!("{stem}_{task_id}.{OUTPUT_EXTENSION}"),
        None => format!("task_{task_id}.{OUTPUT_EXTENSION}"),
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
