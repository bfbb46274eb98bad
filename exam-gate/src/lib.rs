//! Shared types, hashing and context used by multiple entities in the
//! exam-gate access-control system.
//!
//! This crate holds everything that is pure: identifiers, session-local data,
//! course exam keys, config-key hashing and the decision types produced by the
//! engines in `exam-gate-server`.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod infrastructure;
pub mod types;

pub use error::ExamGateError;
