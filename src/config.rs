// ABOUTME: Environment-only configuration for the rally setup calculator shell
// ABOUTME: Data directory, optional modifier-table override and save directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rally_tuning::ModifierTables;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the reference TSV tables
    pub data_dir: PathBuf,
    /// JSON file replacing the built-in modifier tables
    pub modifier_tables: Option<PathBuf>,
    /// Directory for persisted setups
    pub save_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DATA_DIR),
            modifier_tables: None,
            save_dir: default_save_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(env_var_or(env_config::DATA_DIR, defaults::DATA_DIR)),
            modifier_tables: env::var(env_config::MODIFIER_TABLES)
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            save_dir: env::var(env_config::SAVE_DIR)
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map_or_else(default_save_dir, PathBuf::from),
        }
    }

    /// Modifier tables: the override file when configured, otherwise the built-ins
    ///
    /// # Errors
    ///
    /// Returns an error if the override file cannot be read or fails validation
    pub fn load_modifier_tables(&self) -> AppResult<ModifierTables> {
        let Some(path) = &self.modifier_tables else {
            return Ok(ModifierTables::default());
        };
        let tables = load_tables_file(path)?;
        info!(
            path = %path.display(),
            operations = tables.operation_count(),
            "loaded modifier tables"
        );
        Ok(tables)
    }

    /// Path of a saved setup named `name` inside the save directory
    #[must_use]
    pub fn save_path(&self, name: &str) -> PathBuf {
        let file = if Path::new(name).extension().is_some() {
            name.to_owned()
        } else {
            format!("{name}.json")
        };
        self.save_dir.join(file)
    }
}

fn load_tables_file(path: &Path) -> AppResult<ModifierTables> {
    let json = fs::read_to_string(path).map_err(|e| AppError::storage(path.display(), e))?;
    ModifierTables::from_json(&json).map_err(AppError::from)
}

fn default_save_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from("saved_setups"),
        |dir| dir.join(defaults::SAVE_SUBDIR),
    )
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        env::remove_var(env_config::DATA_DIR);
        env::remove_var(env_config::MODIFIER_TABLES);
        env::remove_var(env_config::SAVE_DIR);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.modifier_tables.is_none());
        assert_eq!(config.load_modifier_tables().unwrap(), ModifierTables::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(env_config::DATA_DIR, "/srv/rally");
        env::set_var(env_config::SAVE_DIR, "/tmp/setups");
        let config = AppConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from("/srv/rally"));
        assert_eq!(config.save_path("lancia"), PathBuf::from("/tmp/setups/lancia.json"));
        assert_eq!(config.save_path("x.json"), PathBuf::from("/tmp/setups/x.json"));
        clear_env();
    }

    #[test]
    fn test_modifier_table_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = serde_json::json!({
            "surface": {
                "gravel": {
                    "label": "Loose",
                    "operations": { "arb_front": { "op": "scale", "factor": 0.5 } }
                }
            }
        });
        write!(file, "{body}").unwrap();
        let config = AppConfig {
            modifier_tables: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let tables = config.load_modifier_tables().unwrap();
        assert_eq!(tables.operation_count(), 1);
    }

    #[test]
    fn test_invalid_override_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"weather\": {{\"hail\": {{}}}}}}").unwrap();
        let config = AppConfig {
            modifier_tables: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let error = config.load_modifier_tables().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid);

        let missing = AppConfig {
            modifier_tables: Some(PathBuf::from("/definitely/not/here.json")),
            ..AppConfig::default()
        };
        assert_eq!(missing.load_modifier_tables().unwrap_err().code, ErrorCode::StorageError);
    }
}
