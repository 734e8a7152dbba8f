use crate::presentation::config::{Environment, LogFormat, LoggingSettings};

pub const DEFAULT_LOG_FILTER: &str = "info,sub_music=debug,tower_http=debug";

pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            json_format: logging.format == LogFormat::Json,
            filter: logging
                .filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            json_format: false,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
