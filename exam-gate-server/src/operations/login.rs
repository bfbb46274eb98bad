use exam_gate::types::session::SessionToken;
use tracing::debug;

use crate::{
    policy::SessionArbiter,
    server::{Context, RequestContext},
    ExamGateServerError,
};

/// Installs a fresh authoritative session token after the host has
/// authenticated `request.user`. Does nothing when single-session is off or
/// the login did not produce a user.
pub async fn login_succeeded(
    context: &Context,
    request: &mut RequestContext,
) -> Result<Option<SessionToken>, ExamGateServerError> {
    if !context.settings().single_session_active() {
        return Ok(None);
    }
    let user = match &request.user {
        Some(user) => user,
        None => {
            debug!("Login finished without a user. Nothing to record.");
            return Ok(None);
        }
    };

    let token = SessionArbiter::new(context)
        .on_login_success(user, &mut request.session)
        .await?;
    Ok(Some(token))
}
