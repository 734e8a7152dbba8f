use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{UploadStore, WorkspaceStore};
use crate::application::services::{ConfigPresetService, TaskService};
use crate::infrastructure::events::BroadcastEventPublisher;

#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub config_presets: Arc<ConfigPresetService>,
    pub events: BroadcastEventPublisher,
    pub uploads: Arc<dyn UploadStore>,
    pub workspaces: Arc<dyn WorkspaceStore>,
    pub assets_dir: PathBuf,
    pub max_upload_bytes: u64,
}
