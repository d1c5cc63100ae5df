//! Authentication module for Mentor Gate.
//!
//! Verifies `Authorization: Bearer <jwt>` credentials against the shared
//! secret. Exposed either as a standalone verification endpoint or as
//! middleware in front of protected routes (see `AuthMode`).

mod bearer;
mod jwt;
mod middleware;

pub use bearer::*;
pub use jwt::*;
pub use middleware::*;
