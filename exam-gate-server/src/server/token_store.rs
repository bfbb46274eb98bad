use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenStoreError {
    #[error("Token store is unavailable.")]
    Unavailable,
    #[error("An error occurred within the store. See store logs.")]
    InternalCacheError,
}

/// Shared key-value cache holding, per user, the one session token currently
/// considered authoritative.
///
/// Implementations must make a single `read` or `write` atomic per key. No
/// compare-and-swap is required or assumed: concurrent writers race and the
/// last write wins.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, TokenStoreError>;

    /// Store `value` under `key`, replacing whatever was there.
    async fn write(&self, key: &str, value: String) -> Result<(), TokenStoreError>;
}
