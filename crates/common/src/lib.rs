//! Common types, cookie payloads, and errors shared across workspace crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
