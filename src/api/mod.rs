//! HTTP API layer for Mentor Gate.
//!
//! Provides the token verification endpoint, the protected identity route
//! and a health check.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
