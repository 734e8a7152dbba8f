use config::{Config, ConfigError, Environment as EnvironmentSource, File};

use super::{Environment, Settings};

pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

/// Reads `APP_ENVIRONMENT` (default `local`) after loading `.env`.
pub fn load_environment() -> Result<Environment, ConfigError> {
    dotenvy::dotenv().ok();

    std::env::var(ENVIRONMENT_VAR)
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)
}

/// Layers `appsettings.{environment}.toml` (optional) under `APP__`
/// environment variables, e.g. `APP__SERVER__PORT=8080`, then validates the
/// result.
pub fn load_settings(environment: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
        )
        .add_source(
            EnvironmentSource::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Settings>()
        .and_then(|settings| {
            settings.validate().map_err(ConfigError::Message)?;
            Ok(settings)
        })
}
