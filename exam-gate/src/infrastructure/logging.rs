//! Utilities for our logging (tracing) infrastructure.

use std::fmt::Debug;
use tracing::{warn, Span};

/// For the current active span, record `field_value` for the field
/// `field_name`. The field must already be declared on the current span,
/// usually as an empty field in an `#[instrument(fields(...))]` attribute.
///
/// Events emitted inside the span carry the recorded value, e.g.:
/// ```text
///   2026-03-02T10:12:41.090605Z  WARN exam_gate_server::policy::session_arbiter: Session token superseded. Forcing logout.
///     in exam_gate_server::policy::session_arbiter::evaluate with user_id: "42", outcome: "ForceLogout"
/// ```
///
/// In debug builds a warning is logged when the field was never declared.
pub fn record_field(field_name: &str, field_value: &dyn Debug) {
    if cfg!(debug_assertions) && !Span::current().has_field(field_name) {
        warn!("Field {} not defined in current span!", field_name);
    }

    // Ignore the resulting span.
    let _ = Span::current().record(field_name, &format!("{field_value:?}"));
}

/// Renders an optional request attribute for log lines, substituting
/// `fallback` when the host did not capture it.
pub fn or_unknown<T: ToString>(value: Option<T>, fallback: &str) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| fallback.to_string())
}
