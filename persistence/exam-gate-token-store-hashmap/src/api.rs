use crate::config::Config;
use async_trait::async_trait;
use exam_gate_server::server::token_store::{TokenStore, TokenStoreError};
use std::{
    collections::{hash_map::Entry, HashMap},
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use zeroize::Zeroize;

/// Store holding authorized session tokens, keyed by the single-session key
/// of each user. Records are tagged with the time they were written and read
/// as absent once `record_expiration` has elapsed.
///
/// Each read and write takes the lock once, so operations are atomic per key
/// but there is no compare-and-swap: the last writer wins.
pub struct HashmapTokenStore {
    /// Map from store keys to (timestamp, token).
    records: RwLock<HashMap<String, (Instant, String)>>,
    record_expiration: Option<Duration>,
}

impl Drop for HashmapTokenStore {
    fn drop(&mut self) {
        for value in self.records.get_mut().values_mut() {
            value.1.zeroize();
        }
    }
}

impl HashmapTokenStore {
    pub fn new(config: Config) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            record_expiration: config.record_expiration,
        }
    }

    fn is_expired(&self, written: Instant) -> bool {
        self.record_expiration
            .map_or(false, |expiration| written.elapsed() >= expiration)
    }
}

#[async_trait]
impl TokenStore for HashmapTokenStore {
    /// Get the token stored under `key`, if one exists and has not expired.
    /// Expired records are removed.
    #[instrument(skip_all)]
    async fn read(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        {
            let records = self.records.read().await;
            match records.get(key) {
                None => return Ok(None),
                Some((written, token)) if !self.is_expired(*written) => {
                    return Ok(Some(token.clone()))
                }
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a writer may have refreshed the
        // record in between.
        let mut records = self.records.write().await;
        match records.entry(key.to_string()) {
            Entry::Occupied(entry) if self.is_expired(entry.get().0) => {
                debug!("Authorized token record expired.");
                let (_, mut token) = entry.remove();
                token.zeroize();
                Ok(None)
            }
            Entry::Occupied(entry) => Ok(Some(entry.get().1.clone())),
            Entry::Vacant(_) => Ok(None),
        }
    }

    /// Store `value` under `key`. The previous record is overwritten.
    #[instrument(skip_all)]
    async fn write(&self, key: &str, value: String) -> Result<(), TokenStoreError> {
        let existing = self
            .records
            .write()
            .await
            .insert(key.to_string(), (Instant::now(), value));

        if let Some((_, mut previous)) = existing {
            info!("Previous authorized token overwritten.");
            previous.zeroize();
        }
        Ok(())
    }
}
