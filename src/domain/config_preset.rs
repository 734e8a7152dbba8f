use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const MAX_PRESET_NAME_CHARS: usize = 100;

/// A named set of form values saved for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPreset {
    pub id: Uuid,
    pub name: String,
    pub config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastUsedConfig {
    pub config: Value,
    pub updated_at: DateTime<Utc>,
}

/// Every saved preset plus the form values most recently submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedConfigs {
    pub configs: Vec<ConfigPreset>,
    pub last_used: Option<LastUsedConfig>,
}

impl SavedConfigs {
    /// Saving under an existing name replaces its values and keeps its id
    /// and creation time.
    pub fn upsert(&mut self, name: String, config: Value, now: DateTime<Utc>) -> ConfigPreset {
        if let Some(existing) = self.configs.iter_mut().find(|preset| preset.name == name) {
            existing.config = config;
            existing.updated_at = now;
            return existing.clone();
        }

        let preset = ConfigPreset {
            id: Uuid::new_v4(),
            name,
            config,
            created_at: now,
            updated_at: now,
        };
        self.configs.push(preset.clone());
        preset
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.configs.len();
        self.configs.retain(|preset| preset.id != id);
        self.configs.len() != before
    }

    pub fn set_last_used(&mut self, config: Value, now: DateTime<Utc>) -> LastUsedConfig {
        let last_used = LastUsedConfig {
            config,
            updated_at: now,
        };
        self.last_used = Some(last_used.clone());
        last_used
    }
}

/// Trims the name and checks that `config` is a JSON object.
pub fn validate_preset(name: &str, config: &Value) -> Result<String, ConfigPresetError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigPresetError::EmptyName);
    }
    if name.chars().count() > MAX_PRESET_NAME_CHARS {
        return Err(ConfigPresetError::NameTooLong {
            max: MAX_PRESET_NAME_CHARS,
        });
    }
    validate_config(config)?;
    Ok(name.to_string())
}

pub fn validate_config(config: &Value) -> Result<(), ConfigPresetError> {
    if config.is_object() {
        Ok(())
    } else {
        Err(ConfigPresetError::NotAnObject)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigPresetError {
    #[error("preset name must not be empty")]
    EmptyName,
    #[error("preset name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("config must be a JSON object")]
    NotAnObject,
}
