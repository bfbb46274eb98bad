use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read file {1}. Error: {0}.")]
    FileIo(std::io::Error, PathBuf),
    #[error("Invalid log file path: {0}")]
    InvalidLogFilePath(PathBuf),

    // Wrapped errors
    #[error(transparent)]
    ExamGate(#[from] exam_gate::ExamGateError),
    #[error(transparent)]
    Server(#[from] exam_gate_server::ExamGateServerError),
    #[error(transparent)]
    TokenStore(#[from] exam_gate_token_store_hashmap::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
