use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read config file {1}. Error: {0}.")]
    ConfigFileReadFailure(std::io::Error, PathBuf),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
