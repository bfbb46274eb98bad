//! Application-specific cryptographic types and operations.
//!
//! The exam client proves where it was launched from by sending
//! `SHA-256(request_url || config_key)`, hex encoded. Both sides compute the
//! same digest here; no other hashing scheme is used in exam-gate.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Display;
use thiserror::Error;

use crate::types::course::ConfigKey;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Random number generator failed")]
    RandomNumberGeneratorFailed,
}

/// Lowercase hex encoding of a config-key hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigKeyHash(String);

impl ConfigKeyHash {
    /// Compute the hash an exam client launched with `key` sends when
    /// requesting `request_url`. The URL and key are concatenated with no
    /// separator and hashed as UTF-8 bytes.
    pub fn compute(request_url: &str, key: &ConfigKey) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(request_url.as_bytes());
        hasher.update(key.expose().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-sensitive comparison against the raw header value.
    pub fn matches(&self, received: &str) -> bool {
        self.0 == received
    }
}

impl Display for ConfigKeyHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConfigKeyHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
