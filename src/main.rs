use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use sub_music::application::ports::{
    AmbientCatalog, AudioToolkit, ContentGenerator, SpeechSynthesizer, TaskEventPublisher,
    TaskRepository, UploadStore, WorkspaceStore,
};
use sub_music::application::services::{
    AudioSynthesisEngine, ConfigPresetService, TaskPipeline, TaskService, TaskWorker, task_queue,
};
use sub_music::infrastructure::audio::{FfmpegToolkit, FsAmbientCatalog};
use sub_music::infrastructure::content::{PlaceholderContentGenerator, WorkflowContentGenerator};
use sub_music::infrastructure::events::BroadcastEventPublisher;
use sub_music::infrastructure::observability::{TracingConfig, init_tracing};
use sub_music::infrastructure::persistence::{
    InMemoryTaskRepository, JsonFileConfigPresetRepository, PgTaskRepository, create_pool,
    run_migrations,
};
use sub_music::infrastructure::speech::{DisabledSpeechSynthesizer, OpenAiSpeechSynthesizer};
use sub_music::infrastructure::storage::{LocalUploadStore, LocalWorkspaceStore};
use sub_music::presentation::config::{Settings, load_environment, load_settings};
use sub_music::presentation::{AppState, create_router};

const EVENT_BUFFER: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = load_environment().context("Failed to parse APP_ENVIRONMENT")?;
    let settings = load_settings(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let repository = build_repository(&settings).await?;
    let content = build_content_generator(&settings)?;
    let speech = build_speech_synthesizer(&settings)?;

    let toolkit: Arc<dyn AudioToolkit> = Arc::new(FfmpegToolkit::new(
        settings.audio.ffmpeg_path.clone(),
        settings.audio.ffprobe_path.clone(),
    ));
    let ambient: Arc<dyn AmbientCatalog> =
        Arc::new(FsAmbientCatalog::new(settings.storage.assets_dir.clone()));
    let engine = Arc::new(AudioSynthesisEngine::new(
        toolkit,
        ambient,
        settings.audio.bitrate_kbps,
    ));

    let events = BroadcastEventPublisher::new(EVENT_BUFFER);
    let publisher: Arc<dyn TaskEventPublisher> = Arc::new(events.clone());
    let workspaces: Arc<dyn WorkspaceStore> = Arc::new(LocalWorkspaceStore::new(
        settings.storage.temp_dir.clone(),
        settings.storage.output_dir.clone(),
    ));
    let uploads: Arc<dyn UploadStore> = Arc::new(
        LocalUploadStore::new(
            settings.storage.upload_dir.clone(),
            settings.server.max_upload_bytes,
        )
        .context("Failed to prepare upload directory")?,
    );

    let (sender, receiver) = task_queue(settings.worker.queue_capacity);
    let pipeline = Arc::new(TaskPipeline::new(
        Arc::clone(&repository),
        Arc::clone(&publisher),
        Arc::clone(&workspaces),
        content,
        speech,
        engine,
        settings.timeouts.stage_timeouts(),
    ));
    let task_service = Arc::new(TaskService::new(
        repository,
        Arc::clone(&workspaces),
        publisher,
        sender,
        settings.storage.workspace_retention(),
    ));
    let interrupted = task_service
        .fail_interrupted_tasks()
        .await
        .context("Failed to recover interrupted tasks")?;
    if interrupted > 0 {
        tracing::warn!(interrupted, "Marked tasks from a previous run as failed");
    }

    let worker = TaskWorker::new(receiver, pipeline, settings.worker.concurrency);
    tokio::spawn(worker.run());

    let config_presets = Arc::new(ConfigPresetService::new(Arc::new(
        JsonFileConfigPresetRepository::new(settings.storage.config_file.clone()),
    )));

    let state = AppState {
        task_service,
        config_presets,
        events,
        uploads,
        workspaces,
        assets_dir: settings.storage.assets_dir.clone(),
        max_upload_bytes: settings.server.max_upload_bytes,
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn build_repository(settings: &Settings) -> anyhow::Result<Arc<dyn TaskRepository>> {
    let Some(url) = settings.database.url.as_deref() else {
        tracing::info!("No database configured, keeping tasks in memory");
        return Ok(Arc::new(InMemoryTaskRepository::new()));
    };

    let pool = create_pool(url, settings.database.max_connections).await?;
    if settings.database.run_migrations {
        run_migrations(&pool).await?;
    }
    Ok(Arc::new(PgTaskRepository::new(pool)))
}

fn build_content_generator(settings: &Settings) -> anyhow::Result<Arc<dyn ContentGenerator>> {
    let content = &settings.content;
    match (&content.base_url, &content.api_key) {
        (Some(base_url), Some(api_key)) => {
            tracing::info!(base_url = %base_url, "Using workflow content generator");
            Ok(Arc::new(WorkflowContentGenerator::new(
                base_url.clone(),
                api_key.clone(),
                content.user.clone(),
                content.max_attempts,
                Duration::from_secs(content.request_timeout_secs),
            )?
            .with_retry_step(content.retry_step())))
        }
        _ => {
            tracing::warn!("Content workflow not configured, using placeholder text");
            Ok(Arc::new(PlaceholderContentGenerator))
        }
    }
}

fn build_speech_synthesizer(settings: &Settings) -> anyhow::Result<Arc<dyn SpeechSynthesizer>> {
    let speech = &settings.speech;
    match (&speech.base_url, &speech.api_key) {
        (Some(base_url), Some(api_key)) => {
            tracing::info!(base_url = %base_url, model = %speech.model, "Using speech synthesizer");
            Ok(Arc::new(OpenAiSpeechSynthesizer::new(
                base_url.clone(),
                api_key.clone(),
                speech.model.clone(),
                speech.voice.clone(),
                Duration::from_secs(speech.request_timeout_secs),
            )?))
        }
        _ => {
            tracing::warn!("Speech backend not configured, voice tracks will be silent");
            Ok(Arc::new(DisabledSpeechSynthesizer))
        }
    }
}
