//! The two decision engines.

pub mod exam_client;
pub mod session_arbiter;

pub use exam_client::ExamClientValidator;
pub use session_arbiter::SessionArbiter;
