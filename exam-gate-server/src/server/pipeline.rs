//! Ordered before-hooks wrapped around a host operation.
//!
//! Hooks run in registration order. Any hook may halt the request, in which
//! case the remaining hooks and the wrapped operation never run.

use async_trait::async_trait;
use exam_gate::types::{
    course::CourseId,
    decision::{ExamClientDenial, SessionConflict},
};
use serde::Serialize;
use std::{fmt::Display, future::Future};
use tracing::{debug, info, info_span, instrument};
use tracing_futures::Instrument;

use crate::{
    server::{Context, RequestContext, Route},
    ExamGateServerError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookName {
    SingleSession,
    QuizAccess,
    /// Hooks registered by the host.
    Custom(&'static str),
}

impl Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookName::SingleSession => f.write_str("single_session"),
            HookName::QuizAccess => f.write_str("quiz_access"),
            HookName::Custom(name) => f.write_str(name),
        }
    }
}

/// Why a request was stopped before reaching its operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "interruption", rename_all = "snake_case")]
pub enum Interruption {
    /// The session was superseded. The host logs the user out and redirects
    /// to the login page.
    ForceLogout(SessionConflict),
    /// The host redirects to the disabled-quiz page.
    ExamClientRequired {
        course_id: Option<CourseId>,
        course_name: String,
        denial: ExamClientDenial,
    },
}

impl Interruption {
    /// Default English explanation for the user.
    pub fn user_message(&self) -> String {
        match self {
            Interruption::ForceLogout(_) => {
                "Your session has been terminated because you logged in from another browser."
                    .to_string()
            }
            Interruption::ExamClientRequired { course_name, .. } => format!(
                "Quizzes are currently disabled by the exam client policy for course '{course_name}'."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Continue,
    Halt(Interruption),
}

#[async_trait]
pub trait Hook: Send + Sync {
    fn name(&self) -> HookName;

    /// Whether this hook runs for requests on `route`.
    fn applies_to(&self, route: Route) -> bool;

    async fn before(
        &self,
        context: &Context,
        request: &mut RequestContext,
    ) -> Result<HookOutcome, ExamGateServerError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome<T> {
    Completed(T),
    Interrupted(Interruption),
}

pub struct Pipeline {
    context: Context,
    hooks: Vec<Box<dyn Hook>>,
}

impl Pipeline {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            hooks: Vec::new(),
        }
    }

    /// Append `hook`; it runs after every hook registered before it.
    pub fn register(&mut self, hook: impl Hook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn hook_names(&self) -> Vec<HookName> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    /// Run every applicable hook. Returns the first interruption, if any.
    #[instrument(skip_all, err(Debug), fields(request_id = %request.request_id, route = %request.route))]
    pub async fn run_before_hooks(
        &self,
        request: &mut RequestContext,
    ) -> Result<Option<Interruption>, ExamGateServerError> {
        for hook in &self.hooks {
            if !hook.applies_to(request.route) {
                continue;
            }

            debug!("Running {} hook.", hook.name());
            match hook.before(&self.context, request).await? {
                HookOutcome::Continue => {}
                HookOutcome::Halt(interruption) => {
                    info!("Request halted by {} hook.", hook.name());
                    return Ok(Some(interruption));
                }
            }
        }

        Ok(None)
    }

    /// Run the hooks, then `operation` if none of them halted the request.
    pub async fn run<T, F, Fut>(
        &self,
        request: &mut RequestContext,
        operation: F,
    ) -> Result<PipelineOutcome<T>, ExamGateServerError>
    where
        F: FnOnce(&RequestContext) -> Fut,
        Fut: Future<Output = Result<T, ExamGateServerError>>,
    {
        if let Some(interruption) = self.run_before_hooks(request).await? {
            return Ok(PipelineOutcome::Interrupted(interruption));
        }

        let span = info_span!("operation", request_id = %request.request_id);
        let value = operation(&*request).instrument(span).await?;
        Ok(PipelineOutcome::Completed(value))
    }
}
