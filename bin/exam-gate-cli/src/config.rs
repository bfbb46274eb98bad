//! Config for the exam-gate operator binary.

use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Config {
    pub server: PathBuf,
    pub token_store: PathBuf,
}

impl Config {
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, CliError> {
        let config_string = std::fs::read_to_string(&config_path)
            .map_err(|e| CliError::FileIo(e, config_path.as_ref().to_path_buf()))?;
        Self::from_str(&config_string)
    }
}

impl FromStr for Config {
    type Err = CliError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}
