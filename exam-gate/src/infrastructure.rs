//! Infrastructure shared by the exam-gate crates.

pub mod logging;
