//! Session tokens and the session-local storage they live in.

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, str::FromStr};
use uuid::Uuid;

use crate::{constants::SESSION_TOKEN_FIELD, crypto::CryptoError, ExamGateError};

/// Random 128-bit identifier minted once per login (or once per session that
/// arrives without one). Rendered as a hyphenated UUID string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(rng: &mut (impl CryptoRng + RngCore)) -> Result<Self, ExamGateError> {
        let mut bytes = [0_u8; 16];
        rng.try_fill(&mut bytes)
            .map_err(|_| CryptoError::RandomNumberGeneratorFailed)?;
        Ok(Self(Uuid::from_bytes(bytes).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionToken {
    type Err = ExamGateError;

    /// Tokens read back from a session or the token store are taken as-is; a
    /// blank string is never a token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ExamGateError::InvalidSessionToken);
        }
        Ok(Self(s.to_string()))
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

/// Session-local storage supplied by the host for the current browser
/// session. Lives only as long as that session does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    values: HashMap<String, String>,
    terminated: bool,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token this session was issued, if any. Blank values count as
    /// absent.
    pub fn session_token(&self) -> Option<SessionToken> {
        self.values
            .get(SESSION_TOKEN_FIELD)
            .and_then(|value| SessionToken::from_str(value).ok())
    }

    pub fn set_session_token(&mut self, token: &SessionToken) {
        let _ = self
            .values
            .insert(SESSION_TOKEN_FIELD.to_string(), token.as_str().to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let _ = self.values.insert(field.into(), value.into());
    }

    /// Drop everything stored in the session and flag it for the host to log
    /// the user out.
    pub fn terminate(&mut self) {
        self.values.clear();
        self.terminated = true;
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const SEED: u64 = 1234;

    #[test]
    fn tokens_are_unique_uuids() -> Result<(), ExamGateError> {
        let mut rng = StdRng::seed_from_u64(SEED);
        let first = SessionToken::new(&mut rng)?;
        let second = SessionToken::new(&mut rng)?;

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
        Ok(())
    }

    #[test]
    fn session_token_round_trips_through_session() -> Result<(), ExamGateError> {
        let mut rng = StdRng::seed_from_u64(SEED);
        let token = SessionToken::new(&mut rng)?;
        let mut session = SessionData::new();

        assert!(session.session_token().is_none());
        session.set_session_token(&token);
        assert_eq!(session.session_token(), Some(token));
        Ok(())
    }

    #[test]
    fn blank_session_token_counts_as_absent() {
        let mut session = SessionData::new();
        session.insert(SESSION_TOKEN_FIELD, "");
        assert!(session.session_token().is_none());

        session.insert(SESSION_TOKEN_FIELD, "   ");
        assert!(session.session_token().is_none());
    }

    #[test]
    fn terminate_clears_values() -> Result<(), ExamGateError> {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut session = SessionData::new();
        session.set_session_token(&SessionToken::new(&mut rng)?);
        session.insert("locale", "en");

        session.terminate();

        assert!(session.is_terminated());
        assert!(session.session_token().is_none());
        assert!(session.get("locale").is_none());
        Ok(())
    }
}
