use async_trait::async_trait;
use exam_gate::types::{
    course::{Course, CourseExamKeys},
    decision::ExamClientDecision,
};
use tracing::{info, warn};

use crate::{
    policy::ExamClientValidator,
    server::{Context, Hook, HookName, HookOutcome, Interruption, RequestContext, Route},
    ExamGateServerError,
};

/// Gate in front of viewing and starting quizzes.
pub struct QuizAccessHook;

#[async_trait]
impl Hook for QuizAccessHook {
    fn name(&self) -> HookName {
        HookName::QuizAccess
    }

    fn applies_to(&self, route: Route) -> bool {
        route.is_quiz_route()
    }

    async fn before(
        &self,
        context: &Context,
        request: &mut RequestContext,
    ) -> Result<HookOutcome, ExamGateServerError> {
        if !context.settings().exam_client_enforced() || request.can_preview {
            return Ok(HookOutcome::Continue);
        }

        // A quiz request without a course has no keys to check against.
        let no_keys = CourseExamKeys::default();
        let keys = request
            .course
            .as_ref()
            .map_or(&no_keys, |course| &course.exam_keys);

        let decision = ExamClientValidator::evaluate_course(keys, &request.url, request.client_hash());

        match decision {
            ExamClientDecision::Allow { matched } => {
                info!(url = %request.url, %matched, "Exam client hash matched. Access granted.");
                Ok(HookOutcome::Continue)
            }
            ExamClientDecision::Deny(denial) => {
                warn!(
                    url = %denial.request_url,
                    reason = %denial.reason,
                    configured_keys = ?denial.configured_keys,
                    expected_hashes = ?denial.expected_hashes,
                    received_hash = denial.received_hash.as_deref().unwrap_or("MISSING"),
                    "Exam client validation failed. Redirecting."
                );
                Ok(HookOutcome::Halt(Interruption::ExamClientRequired {
                    course_id: request.course.as_ref().map(|course| course.id.clone()),
                    course_name: request
                        .course
                        .as_ref()
                        .map_or(Course::UNKNOWN_NAME, Course::display_name)
                        .to_string(),
                    denial,
                }))
            }
        }
    }
}
