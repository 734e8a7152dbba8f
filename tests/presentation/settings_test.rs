use std::time::Duration;

use sub_music::application::services::StageTimeouts;
use sub_music::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};
use sub_music::presentation::config::{Environment, LogFormat, LoggingSettings, Settings};

#[test]
fn given_empty_config_when_deserializing_then_every_section_has_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();

    assert_eq!(settings.server.port, 3000);
    assert!(settings.database.url.is_none());
    assert_eq!(settings.worker.concurrency, 2);
    assert_eq!(settings.audio.bitrate_kbps, 320);
    assert_eq!(settings.storage.workspace_retention(), Duration::from_secs(3600));
    assert_eq!(settings.timeouts.stage_timeouts(), StageTimeouts::default());
    assert_eq!(settings.logging.format, LogFormat::Pretty);
}

#[test]
fn given_partial_section_when_deserializing_then_keeps_other_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{ "worker": { "concurrency": 8 }, "logging": { "format": "json" } }"#)
            .unwrap();

    assert_eq!(settings.worker.concurrency, 8);
    assert_eq!(settings.worker.queue_capacity, 64);
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn given_environment_names_when_converting_then_accepts_known_values() {
    assert_eq!(
        Environment::try_from("PROD".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_logging_settings_when_building_tracing_config_then_applies_format_and_filter() {
    let json = TracingConfig::from_settings(
        Environment::Prod,
        &LoggingSettings {
            format: LogFormat::Json,
            filter: Some("warn".to_string()),
        },
    );
    let pretty = TracingConfig::from_settings(Environment::Local, &LoggingSettings::default());

    assert!(json.json_format);
    assert_eq!(json.filter, "warn");
    assert!(!pretty.json_format);
    assert_eq!(pretty.filter, DEFAULT_LOG_FILTER);
}

#[test]
fn given_default_settings_when_validating_then_content_retries_fit_stage_timeout() {
    let settings = Settings::default();

    assert_eq!(settings.content.retry_budget(), Duration::from_secs(3 * 35 + 2 + 4));
    assert!(settings.validate().is_ok());
}

#[test]
fn given_retries_longer_than_stage_timeout_when_validating_then_rejects_settings() {
    let settings: Settings = serde_json::from_str(
        r#"{ "content": { "max_attempts": 3, "request_timeout_secs": 100 }, "timeouts": { "content_secs": 120 } }"#,
    )
    .unwrap();

    let error = settings.validate().unwrap_err();

    assert!(error.contains("timeouts.content_secs"), "{error}");
}

#[test]
fn given_single_attempt_when_computing_retry_budget_then_has_no_backoff() {
    let mut settings = Settings::default();
    settings.content.max_attempts = 1;

    assert_eq!(settings.content.retry_budget(), Duration::from_secs(35));
}
