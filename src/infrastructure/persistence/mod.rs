mod pg_pool;
mod repositories;

pub use repositories::InMemoryTaskRepository;
pub use repositories::JsonFileConfigPresetRepository;
pub use repositories::PgTaskRepository;

pub use pg_pool::{create_pool, run_migrations};
