//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material, session tokens or session contents** may appear in any
//!   span attribute or log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
