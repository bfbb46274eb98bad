//! Test-only helpers shared by the unit tests in this crate.

use async_trait::async_trait;
use exam_gate::config::Settings;
use rand::{rngs::StdRng, SeedableRng};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};
use tokio::sync::Mutex;
use tracing::Level;

use crate::{
    config::LoggingConfig,
    server::{
        token_store::{TokenStore, TokenStoreError},
        Context,
    },
    Config,
};

pub(crate) const SEED: u64 = 1234;

/// In-memory store with switches to make reads or writes fail.
#[derive(Default)]
pub(crate) struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl MemoryTokenStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: &str) {
        let _ = self
            .values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TokenStoreError::Unavailable);
        }
        Ok(self.get(key).await)
    }

    async fn write(&self, key: &str, value: String) -> Result<(), TokenStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TokenStoreError::Unavailable);
        }
        let _ = self.writes.fetch_add(1, Ordering::SeqCst);
        let _ = self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

pub(crate) fn test_config(settings: Settings) -> Config {
    Config {
        settings,
        logging: LoggingConfig {
            stdout_log_level: Level::INFO,
            log_files: None,
        },
    }
}

/// Context with a deterministic rng.
pub(crate) fn test_context(settings: Settings, store: Arc<MemoryTokenStore>) -> Context {
    Context {
        config: Arc::new(test_config(settings)),
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(SEED))),
        token_store: store,
    }
}

pub(crate) fn single_session_settings() -> Settings {
    Settings {
        single_session: true,
        ..Default::default()
    }
}

pub(crate) fn exam_client_settings() -> Settings {
    Settings {
        enforce_exam_client: true,
        ..Default::default()
    }
}
