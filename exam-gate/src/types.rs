//! Domain types shared between the decision engines and their hosts.

pub mod course;
pub mod decision;
pub mod session;
pub mod user;
