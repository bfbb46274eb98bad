pub mod context;
pub mod pipeline;
pub mod request;
pub mod token_store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use context::Context;
pub use pipeline::{Hook, HookName, HookOutcome, Interruption, Pipeline, PipelineOutcome};
pub use request::{RequestContext, Route};

use exam_gate::types::session::SessionToken;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::{
    config::Config,
    error::ExamGateServerError,
    hooks::{QuizAccessHook, SingleSessionHook},
    operations::{self, media_player::MediaPlayerEnv},
};

use self::token_store::TokenStore;

/// Entry point for a host embedding exam-gate. Owns the immutable
/// configuration and the shared token store; everything request-specific is
/// passed in through a [`RequestContext`].
pub struct ExamGateServer {
    config: Arc<Config>,
    rng: Arc<Mutex<StdRng>>,
    token_store: Arc<dyn TokenStore>,
}

impl ExamGateServer {
    pub fn new(config: Config, token_store: Arc<dyn TokenStore>) -> Self {
        let rng = StdRng::from_entropy();

        info!("exam-gate settings: {:?}", config.settings);

        Self {
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(rng)),
            token_store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn context(&self) -> Context {
        Context {
            config: self.config.clone(),
            rng: self.rng.clone(),
            token_store: self.token_store.clone(),
        }
    }

    /// The default before-hook pipeline: single-session arbitration first,
    /// then exam client validation for quiz routes.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new(self.context());
        pipeline.register(SingleSessionHook);
        pipeline.register(QuizAccessHook);
        pipeline
    }

    /// Call after the host has authenticated a user. Installs a fresh
    /// authoritative session token when single-session is active.
    #[instrument(skip_all, err(Debug), fields(request_id = %request.request_id))]
    pub async fn login_succeeded(
        &self,
        request: &mut RequestContext,
    ) -> Result<Option<SessionToken>, ExamGateServerError> {
        operations::login::login_succeeded(&self.context(), request).await
    }

    /// Defense-in-depth check run when the host generates a quiz submission.
    #[instrument(skip_all, err(Debug), fields(request_id = %request.request_id))]
    pub async fn generate_submission(
        &self,
        request: &RequestContext,
        preview: bool,
    ) -> Result<(), ExamGateServerError> {
        operations::generate_submission::generate_submission(&self.context(), request, preview)
    }

    /// Media player flags for the host to inject, if any restriction is on.
    pub fn media_player_env(&self) -> Option<MediaPlayerEnv> {
        operations::media_player::media_player_env(&self.config.settings)
    }
}
