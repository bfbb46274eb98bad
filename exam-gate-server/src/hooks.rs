//! Hooks exam-gate registers in the default pipeline.

mod quiz_access;
mod single_session;

pub use quiz_access::QuizAccessHook;
pub use single_session::SingleSessionHook;
