//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the user behind a valid JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- an [`auth::AuthUser`] who currently holds the elevated role.

pub mod auth;
pub mod rbac;
