//! This crate implements the two exam-gate decision engines: single active
//! session arbitration and exam client config-key validation, together with
//! the hook pipeline a host runs them through.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod hooks;
pub mod operations;
pub mod policy;
pub mod server;

pub use config::Config;
pub use error::ExamGateServerError;
pub use server::{ExamGateServer, RequestContext, Route};
