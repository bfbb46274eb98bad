//! Plugin-wide settings. Built once at start-up and shared read-only with every
//! component that needs them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ExamGateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case", default)]
pub struct Settings {
    /// Master switch. When off, exam-gate stays out of every request.
    pub enabled: bool,
    /// Allow one active session per user.
    pub single_session: bool,
    /// Require a valid exam client config-key hash to view or start quizzes.
    pub enforce_exam_client: bool,
    pub hide_all_media_controls: bool,
    pub disable_media_seek: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            single_session: false,
            enforce_exam_client: false,
            hide_all_media_controls: false,
            disable_media_seek: false,
        }
    }
}

impl Settings {
    pub fn single_session_active(&self) -> bool {
        self.enabled && self.single_session
    }

    pub fn exam_client_enforced(&self) -> bool {
        self.enabled && self.enforce_exam_client
    }
}

impl FromStr for Settings {
    type Err = ExamGateError;

    fn from_str(settings_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(settings_string)?)
    }
}
