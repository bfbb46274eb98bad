//! Constants that are shared between other crates in this workspace.
//! Crate-specific constants should go in their respective crates.

/// Prefix of the shared token store key holding a user's authorized token.
pub const SINGLE_SESSION_KEY_PREFIX: &str = "user_single_session_";

/// Session-local slot carrying the session's own token.
pub const SESSION_TOKEN_FIELD: &str = "canvas_seb_session_token";

pub mod headers {
    /// Hash asserted by the exam client over the request URL and its config key.
    pub const CONFIG_KEY_HASH: &str = "X-SafeExamBrowser-ConfigKeyHash";
    pub const USER_AGENT: &str = "User-Agent";
}
