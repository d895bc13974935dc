//! Types shared by the waitlist page, its subscription endpoint and the CLI.

pub mod domain;
pub mod error;
pub mod protocol;
