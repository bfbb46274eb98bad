//! Configuration shared between the exam-gate crates.

pub mod settings;

pub use settings::Settings;
