mod audio;
mod configs;
mod error;
mod events;
mod health;
mod tasks;

pub use audio::{
    WORKSPACE_SEPARATOR, content_type_for, download_handler, is_plain_file_name,
    preview_audio_handler,
};
pub use configs::{
    delete_config_handler, list_configs_handler, save_config_handler,
    save_last_used_config_handler,
};
pub use error::ErrorResponse;
pub use events::events_handler;
pub use health::health_handler;
pub use tasks::{clear_tasks_handler, create_task_handler, get_task_handler, list_tasks_handler};
