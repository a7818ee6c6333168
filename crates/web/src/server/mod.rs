//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Read and write codec-sealed cookies.
//! - Inject shared application state (`AppState`) into handlers.

pub mod cookie;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;
