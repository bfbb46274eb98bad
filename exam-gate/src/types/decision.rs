//! Decisions produced by the two engines, with the structured facts the host
//! needs to log the outcome or explain it to the user.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    crypto::ConfigKeyHash,
    types::{course::KeyKind, user::UserId},
};

/// Outcome of single-session arbitration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SessionDecision {
    Allow,
    ForceLogout(SessionConflict),
}

impl SessionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SessionDecision::Allow)
    }
}

/// A session that was superseded by a newer login for the same user.
///
/// Tokens are deliberately not included; they are credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConflict {
    pub user_id: UserId,
}

/// Why an exam client request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DenialReason {
    /// Enforcement is on but the course has no key. Blocks everyone.
    NoKeyConfigured,
    /// The request did not carry a config-key hash, or it was empty.
    MissingHash,
    /// A hash was sent but matches none of the expected hashes.
    HashMismatch,
}

/// Facts about a denied exam client request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamClientDenial {
    pub reason: DenialReason,
    pub request_url: String,
    pub configured_keys: Vec<KeyKind>,
    pub expected_hashes: Vec<ConfigKeyHash>,
    pub received_hash: Option<String>,
}

/// Outcome of exam client validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ExamClientDecision {
    Allow { matched: KeyKind },
    Deny(ExamClientDenial),
}

impl ExamClientDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ExamClientDecision::Allow { .. })
    }
}
