//! This crate is an in-process implementation of the shared token store used
//! by exam-gate's single-session arbitration.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod config;
pub mod error;

pub use api::HashmapTokenStore;
pub use error::Error;
