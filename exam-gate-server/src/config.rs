use exam_gate::config::Settings;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::Level;

use crate::ExamGateServerError;

/// Server configuration with all fields ready to use. Built once at start-up
/// and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub settings: Settings,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, ExamGateServerError> {
        let config_string = std::fs::read_to_string(&config_path)
            .map_err(|e| ExamGateServerError::FileIo(e, config_path.as_ref().to_path_buf()))?;
        let config_file = ConfigFile::from_str(&config_string)?;
        Ok(Self::from_config_file(config_file))
    }

    pub fn from_config_file(config: ConfigFile) -> Self {
        Self {
            settings: config.settings,
            logging: config.logging,
        }
    }
}

impl FromStr for Config {
    type Err = ExamGateServerError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_config_file(ConfigFile::from_str(config_string)?))
    }
}

/// Server configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: Settings,
    pub logging: LoggingConfig,
}

impl FromStr for ConfigFile {
    type Err = ExamGateServerError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub stdout_log_level: Level,
    pub log_files: Option<LoggingFileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct LoggingFileConfig {
    pub exam_gate_logs_file_name: PathBuf,
    pub all_logs_file_name: PathBuf,
}
