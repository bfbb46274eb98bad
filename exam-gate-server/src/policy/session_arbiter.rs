//! Single active session per user.
//!
//! Each session carries its own token in session-local storage; the shared
//! token store holds the one token currently authoritative for the user. A
//! login always installs a fresh token, which forces every older session out
//! on its next request.
//!
//! Store failures fail open: an unreadable record is treated as absent and
//! the request is allowed.

use exam_gate::{
    infrastructure::logging,
    types::{
        decision::{SessionConflict, SessionDecision},
        session::{SessionData, SessionToken},
        user::UserId,
    },
};
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::{
    server::{token_store::TokenStore, Context},
    ExamGateServerError,
};

pub struct SessionArbiter<'a> {
    enabled: bool,
    token_store: &'a dyn TokenStore,
    rng: &'a Mutex<StdRng>,
}

impl<'a> SessionArbiter<'a> {
    pub fn new(context: &'a Context) -> Self {
        Self {
            enabled: context.settings().single_session_active(),
            token_store: context.token_store.as_ref(),
            rng: context.rng.as_ref(),
        }
    }

    /// Decide whether the session making this request is still the
    /// authoritative one for `user`.
    ///
    /// | session token | stored token | result                                  |
    /// |---------------|--------------|-----------------------------------------|
    /// | present       | equal        | allow                                   |
    /// | present       | different    | force logout, store untouched           |
    /// | present       | absent       | store session token, allow              |
    /// | absent        | any          | mint token into session and store, allow |
    #[instrument(skip_all, fields(user_id, outcome))]
    pub async fn evaluate(&self, user: Option<&UserId>, session: &mut SessionData) -> SessionDecision {
        if !self.enabled {
            return SessionDecision::Allow;
        }
        let user = match user {
            Some(user) => user,
            None => return SessionDecision::Allow,
        };
        logging::record_field("user_id", &user.as_str());

        let key = user.single_session_key();

        let current_token = match session.session_token() {
            Some(token) => token,
            None => {
                // A session without a token takes over, silently superseding
                // whichever session held the record before.
                logging::record_field("outcome", &"TakeOver");
                self.install_new_token(user, &key, session).await;
                return SessionDecision::Allow;
            }
        };

        match self.read_authorized_token(&key).await {
            Some(authorized) if authorized == current_token.as_str() => {
                logging::record_field("outcome", &"Allow");
                SessionDecision::Allow
            }
            Some(_) => {
                logging::record_field("outcome", &"ForceLogout");
                warn!("Session token superseded by a newer login. Forcing logout.");
                SessionDecision::ForceLogout(SessionConflict {
                    user_id: user.clone(),
                })
            }
            None => {
                logging::record_field("outcome", &"Adopt");
                info!("No authorized token recorded. Adopting this session's token.");
                let _ = self.write_authorized_token(&key, &current_token).await;
                SessionDecision::Allow
            }
        }
    }

    /// Called by the login flow. Always mints a fresh token, stores it in the
    /// new session and overwrites the user's authorized token.
    #[instrument(skip_all, err(Debug), fields(user_id = %user))]
    pub async fn on_login_success(
        &self,
        user: &UserId,
        session: &mut SessionData,
    ) -> Result<SessionToken, ExamGateServerError> {
        let token = self.mint_token().await?;
        session.set_session_token(&token);

        info!("Recording new session token.");
        let _ = self
            .write_authorized_token(&user.single_session_key(), &token)
            .await;

        Ok(token)
    }

    /// The session only keeps the new token once the store holds it, so a
    /// failed write leaves the next request to try again.
    async fn install_new_token(&self, user: &UserId, key: &str, session: &mut SessionData) {
        let token = match self.mint_token().await {
            Ok(token) => token,
            Err(e) => {
                error!("Could not mint session token for user {}: {:?}", user, e);
                return;
            }
        };

        if self.write_authorized_token(key, &token).await {
            session.set_session_token(&token);
        }
    }

    async fn mint_token(&self) -> Result<SessionToken, ExamGateServerError> {
        let mut rng = self.rng.lock().await;
        Ok(SessionToken::new(&mut *rng)?)
    }

    /// Read failures and blank records count as absent.
    async fn read_authorized_token(&self, key: &str) -> Option<String> {
        match self.token_store.read(key).await {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(e) => {
                warn!("Token store read failed, treating record as absent: {}", e);
                None
            }
        }
    }

    /// Returns whether the write succeeded. Failures are logged, never
    /// propagated.
    async fn write_authorized_token(&self, key: &str, token: &SessionToken) -> bool {
        match self.token_store.write(key, token.to_string()).await {
            Ok(()) => true,
            Err(e) => {
                error!("Token store write failed: {}", e);
                false
            }
        }
    }
}
