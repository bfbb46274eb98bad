//! Course-level exam client configuration.
//!
//! Instructors configure zero, one or two config keys per course. The keys are
//! read-only inputs here; storing them is the host's business.

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};
use strum::{Display, EnumString};
use zeroize::Zeroize;

use crate::{crypto::ConfigKeyHash, ExamGateError};

/// Secret shared between a course and the exam clients configured for it.
/// Never printed; zeroed when dropped.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ConfigKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ConfigKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Drop for ConfigKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfigKey(***REDACTED***)")
    }
}

/// Which course setting an accepted key came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyKind {
    Mac,
    /// Single key from before per-platform keys existed. Stands in for the
    /// mac key.
    LegacyQuiz,
    Windows,
}

/// A configured key, tagged with the setting it came from.
#[derive(Debug, Clone, Copy)]
pub struct AcceptedKey<'a> {
    pub kind: KeyKind,
    pub key: &'a ConfigKey,
}

impl AcceptedKey<'_> {
    pub fn expected_hash(&self, request_url: &str) -> ConfigKeyHash {
        ConfigKeyHash::compute(request_url, self.key)
    }
}

/// The exam client keys configured on a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct CourseExamKeys {
    #[serde(default)]
    pub mac_key: Option<ConfigKey>,
    #[serde(default)]
    pub win_key: Option<ConfigKey>,
    /// Legacy single key.
    #[serde(default)]
    pub quiz_key: Option<ConfigKey>,
}

impl CourseExamKeys {
    /// Keys an exam client may have been launched with, in evaluation order.
    ///
    /// The mac key is preferred, falling back to the legacy quiz key when no
    /// mac key is set. The windows key is considered independently. Blank
    /// settings count as unset.
    pub fn accepted_keys(&self) -> Vec<AcceptedKey<'_>> {
        let mut accepted = Vec::with_capacity(2);

        let primary = match self.mac_key.as_ref().filter(|key| !key.is_blank()) {
            Some(key) => Some(AcceptedKey {
                kind: KeyKind::Mac,
                key,
            }),
            None => self
                .quiz_key
                .as_ref()
                .filter(|key| !key.is_blank())
                .map(|key| AcceptedKey {
                    kind: KeyKind::LegacyQuiz,
                    key,
                }),
        };
        accepted.extend(primary);

        if let Some(key) = self.win_key.as_ref().filter(|key| !key.is_blank()) {
            accepted.push(AcceptedKey {
                kind: KeyKind::Windows,
                key,
            });
        }

        accepted
    }
}

/// Opaque course id assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The course a quiz request belongs to, as far as exam-gate needs to know.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Course {
    pub id: CourseId,
    pub name: Option<String>,
    #[serde(default)]
    pub exam_keys: CourseExamKeys,
}

impl Course {
    pub const UNKNOWN_NAME: &'static str = "Unknown Course";

    pub fn new(id: impl Into<String>, name: Option<String>, exam_keys: CourseExamKeys) -> Self {
        Self {
            id: CourseId(id.into()),
            name,
            exam_keys,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::UNKNOWN_NAME)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExamGateError> {
        let course_string = std::fs::read_to_string(&path)?;
        Self::from_str(&course_string)
    }
}

impl FromStr for Course {
    type Err = ExamGateError;

    fn from_str(course_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(course_string)?)
    }
}
