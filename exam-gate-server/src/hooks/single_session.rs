use async_trait::async_trait;
use exam_gate::types::decision::SessionDecision;

use crate::{
    policy::SessionArbiter,
    server::{Context, Hook, HookName, HookOutcome, Interruption, RequestContext, Route},
    ExamGateServerError,
};

/// Global gate run on every request outside the login/logout family.
pub struct SingleSessionHook;

#[async_trait]
impl Hook for SingleSessionHook {
    fn name(&self) -> HookName {
        HookName::SingleSession
    }

    fn applies_to(&self, route: Route) -> bool {
        !route.is_session_route()
    }

    async fn before(
        &self,
        context: &Context,
        request: &mut RequestContext,
    ) -> Result<HookOutcome, ExamGateServerError> {
        let decision = SessionArbiter::new(context)
            .evaluate(request.user.as_ref(), &mut request.session)
            .await;

        match decision {
            SessionDecision::Allow => Ok(HookOutcome::Continue),
            SessionDecision::ForceLogout(conflict) => {
                request.session.terminate();
                Ok(HookOutcome::Halt(Interruption::ForceLogout(conflict)))
            }
        }
    }
}
