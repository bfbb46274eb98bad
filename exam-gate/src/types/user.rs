//! User identity as handed to us by the host platform.

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::{constants::SINGLE_SESSION_KEY_PREFIX, ExamGateError};

/// Opaque, stable user id. Only ever used as a component of cache keys and in
/// log lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Key under which this user's authorized session token lives in the
    /// shared token store.
    pub fn single_session_key(&self) -> String {
        format!("{SINGLE_SESSION_KEY_PREFIX}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = ExamGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ExamGateError::InvalidUserId);
        }
        Ok(Self(s.to_string()))
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_session_key_uses_prefix() {
        let user = UserId::from(42);
        assert_eq!(user.single_session_key(), "user_single_session_42");
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(matches!(
            UserId::from_str("  "),
            Err(ExamGateError::InvalidUserId)
        ));
        assert_eq!(UserId::from_str("17").unwrap().as_str(), "17");
    }

    #[test]
    fn display_is_the_bare_id() {
        let user = UserId::from(42);
        assert_eq!(user.to_string(), "42");
        assert_eq!(format!("user {user} logged in"), "user 42 logged in");
    }
}
