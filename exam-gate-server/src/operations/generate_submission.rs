use exam_gate::{
    infrastructure::logging::or_unknown,
    types::{
        course::{Course, CourseExamKeys},
        decision::{DenialReason, ExamClientDecision},
    },
};
use tracing::{info, warn};

use crate::{
    policy::ExamClientValidator,
    server::{Context, RequestContext},
    ExamGateServerError,
};

/// Re-checks exam client attestation when the host generates a quiz
/// submission, using the request details captured when the request arrived.
///
/// Previews skip the check. Otherwise this runs the same key selection and
/// hash comparison as the quiz access hook, so a request that passed the hook
/// cannot fail here.
pub fn generate_submission(
    context: &Context,
    request: &RequestContext,
    preview: bool,
) -> Result<(), ExamGateServerError> {
    let course_name = request
        .course
        .as_ref()
        .map_or(Course::UNKNOWN_NAME, Course::display_name);

    if context.settings().exam_client_enforced() && !preview {
        let no_keys = CourseExamKeys::default();
        let keys = request
            .course
            .as_ref()
            .map_or(&no_keys, |course| &course.exam_keys);

        match ExamClientValidator::evaluate_course(keys, &request.url, request.client_hash()) {
            ExamClientDecision::Allow { .. } => {}
            ExamClientDecision::Deny(denial) if denial.reason == DenialReason::NoKeyConfigured => {
                info!(
                    user_id = ?request.user,
                    "Preventing quiz start (no exam client key configured) in course '{}'.",
                    course_name
                );
                return Err(ExamGateServerError::QuizzesDisabled {
                    course: course_name.to_string(),
                });
            }
            ExamClientDecision::Deny(denial) => {
                warn!(
                    user_id = ?request.user,
                    url = %denial.request_url,
                    expected_hashes = ?denial.expected_hashes,
                    received_hash = ?denial.received_hash,
                    "Exam client config key mismatch at submission."
                );
                return Err(ExamGateServerError::QuizRequiresExamClient);
            }
        }
    }

    info!(
        user_id = ?request.user,
        ip = %or_unknown(request.remote_ip, "Unknown IP"),
        user_agent = %or_unknown(request.user_agent(), "Unknown UA"),
        "User is starting a quiz in course '{}'.",
        course_name
    );

    Ok(())
}
