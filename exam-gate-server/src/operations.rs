//! Operations a host calls at specific points of its own request handling.

pub mod generate_submission;
pub mod login;
pub mod media_player;
