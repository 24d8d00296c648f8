//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves a JWT Bearer token to a live user row.
//! - [`admin::RequireAdmin`] -- Requires the admin flag on top of that.

pub mod admin;
pub mod auth;
