//! Exam client config-key validation.
//!
//! Policy-free with respect to roles and settings: callers decide whether
//! enforcement applies and whether the user may bypass it. Both the quiz
//! access hook and submission generation go through [`ExamClientValidator::evaluate_course`]
//! so that they can never disagree about the same request.

use exam_gate::{
    crypto::ConfigKeyHash,
    types::{
        course::{AcceptedKey, CourseExamKeys, KeyKind},
        decision::{DenialReason, ExamClientDecision, ExamClientDenial},
    },
};

pub struct ExamClientValidator;

impl ExamClientValidator {
    /// Select the course's accepted keys and evaluate `client_hash` against
    /// them for `request_url`.
    pub fn evaluate_course(
        keys: &CourseExamKeys,
        request_url: &str,
        client_hash: Option<&str>,
    ) -> ExamClientDecision {
        Self::evaluate(&keys.accepted_keys(), request_url, client_hash)
    }

    /// Allow iff `client_hash` is non-empty and equals the hash of
    /// `request_url` with at least one accepted key. No accepted keys means
    /// deny.
    pub fn evaluate(
        accepted_keys: &[AcceptedKey<'_>],
        request_url: &str,
        client_hash: Option<&str>,
    ) -> ExamClientDecision {
        let configured_keys: Vec<KeyKind> = accepted_keys.iter().map(|key| key.kind).collect();
        let expected: Vec<(KeyKind, ConfigKeyHash)> = accepted_keys
            .iter()
            .map(|key| (key.kind, key.expected_hash(request_url)))
            .collect();
        let received = client_hash.filter(|hash| !hash.is_empty());

        let reason = if expected.is_empty() {
            DenialReason::NoKeyConfigured
        } else if let Some(received) = received {
            match expected.iter().find(|(_, hash)| hash.matches(received)) {
                Some((kind, _)) => return ExamClientDecision::Allow { matched: *kind },
                None => DenialReason::HashMismatch,
            }
        } else {
            DenialReason::MissingHash
        };

        ExamClientDecision::Deny(ExamClientDenial {
            reason,
            request_url: request_url.to_string(),
            configured_keys,
            expected_hashes: expected.into_iter().map(|(_, hash)| hash).collect(),
            received_hash: client_hash.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_gate::types::course::ConfigKey;

    const URL: &str = "https://x/y";

    fn hash(url: &str, key: &str) -> String {
        ConfigKeyHash::compute(url, &ConfigKey::from(key)).to_string()
    }

    fn mac_only() -> CourseExamKeys {
        CourseExamKeys {
            mac_key: Some("abc".into()),
            ..Default::default()
        }
    }

    fn denial_reason(decision: &ExamClientDecision) -> Option<DenialReason> {
        match decision {
            ExamClientDecision::Deny(denial) => Some(denial.reason),
            ExamClientDecision::Allow { .. } => None,
        }
    }

    #[test]
    fn matching_mac_hash_allows() {
        let client_hash = hash(URL, "abc");
        let decision = ExamClientValidator::evaluate_course(&mac_only(), URL, Some(&client_hash));
        assert_eq!(decision, ExamClientDecision::Allow { matched: KeyKind::Mac });
    }

    #[test]
    fn empty_hash_denies() {
        let decision = ExamClientValidator::evaluate_course(&mac_only(), URL, Some(""));
        assert_eq!(denial_reason(&decision), Some(DenialReason::MissingHash));

        let decision = ExamClientValidator::evaluate_course(&mac_only(), URL, None);
        assert_eq!(denial_reason(&decision), Some(DenialReason::MissingHash));
    }

    #[test]
    fn windows_hash_allows_in_multi_key_mode() {
        let keys = CourseExamKeys {
            mac_key: Some("abc".into()),
            win_key: Some("xyz".into()),
            quiz_key: None,
        };
        let client_hash = hash(URL, "xyz");

        let decision = ExamClientValidator::evaluate_course(&keys, URL, Some(&client_hash));
        assert_eq!(
            decision,
            ExamClientDecision::Allow {
                matched: KeyKind::Windows
            }
        );
    }

    #[test]
    fn no_keys_denies_regardless_of_hash() {
        let keys = CourseExamKeys::default();
        for client_hash in [None, Some(""), Some("anything")] {
            let decision = ExamClientValidator::evaluate_course(&keys, URL, client_hash);
            assert_eq!(denial_reason(&decision), Some(DenialReason::NoKeyConfigured));
        }
    }

    #[test]
    fn url_change_invalidates_hash() {
        let client_hash = hash(URL, "abc");

        let decision =
            ExamClientValidator::evaluate_course(&mac_only(), "https://x/z", Some(&client_hash));
        assert_eq!(denial_reason(&decision), Some(DenialReason::HashMismatch));

        let recomputed = hash("https://x/z", "abc");
        let decision =
            ExamClientValidator::evaluate_course(&mac_only(), "https://x/z", Some(&recomputed));
        assert!(decision.is_allowed());
    }

    #[test]
    fn legacy_key_treated_as_mac_key() {
        let keys = CourseExamKeys {
            quiz_key: Some("abc".into()),
            ..Default::default()
        };
        let client_hash = hash(URL, "abc");

        let decision = ExamClientValidator::evaluate_course(&keys, URL, Some(&client_hash));
        assert_eq!(
            decision,
            ExamClientDecision::Allow {
                matched: KeyKind::LegacyQuiz
            }
        );
    }

    #[test]
    fn legacy_key_ignored_when_mac_key_set() {
        let keys = CourseExamKeys {
            mac_key: Some("abc".into()),
            quiz_key: Some("old".into()),
            ..Default::default()
        };
        let client_hash = hash(URL, "old");

        let decision = ExamClientValidator::evaluate_course(&keys, URL, Some(&client_hash));
        assert_eq!(denial_reason(&decision), Some(DenialReason::HashMismatch));
    }

    #[test]
    fn denial_carries_diagnostics() {
        let keys = CourseExamKeys {
            mac_key: Some("abc".into()),
            win_key: Some("xyz".into()),
            quiz_key: None,
        };

        let decision = ExamClientValidator::evaluate_course(&keys, URL, Some("bogus"));
        let denial = match decision {
            ExamClientDecision::Deny(denial) => denial,
            other => panic!("expected denial, got {other:?}"),
        };

        assert_eq!(denial.reason, DenialReason::HashMismatch);
        assert_eq!(denial.request_url, URL);
        assert_eq!(denial.configured_keys, vec![KeyKind::Mac, KeyKind::Windows]);
        assert_eq!(
            denial
                .expected_hashes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec![hash(URL, "abc"), hash(URL, "xyz")]
        );
        assert_eq!(denial.received_hash.as_deref(), Some("bogus"));
    }

    #[test]
    fn uppercase_hash_is_rejected() {
        let client_hash = hash(URL, "abc").to_uppercase();
        let decision = ExamClientValidator::evaluate_course(&mac_only(), URL, Some(&client_hash));
        assert_eq!(denial_reason(&decision), Some(DenialReason::HashMismatch));
    }
}
