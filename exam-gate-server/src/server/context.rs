use std::sync::Arc;

use exam_gate::config::Settings;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::Config;

use super::token_store::TokenStore;

/// Process-wide resources handed to hooks and operations. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    pub config: Arc<Config>,
    pub rng: Arc<Mutex<StdRng>>,
    /// Holds the authoritative session token per user.
    pub token_store: Arc<dyn TokenStore>,
}

impl Context {
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }
}
