mod in_memory_task_repository;
mod json_file_config_preset_repository;
mod pg_task_repository;

pub use in_memory_task_repository::InMemoryTaskRepository;
pub use json_file_config_preset_repository::JsonFileConfigPresetRepository;
pub use pg_task_repository::PgTaskRepository;
