use thiserror::Error;

use crate::crypto::CryptoError;

#[derive(Debug, Error)]
pub enum ExamGateError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    // Input errors
    #[error("Invalid user id")]
    InvalidUserId,
    #[error("Invalid session token")]
    InvalidSessionToken,

    // Wrapped errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
