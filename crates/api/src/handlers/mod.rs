//! Request handlers, one module per resource.
//!
//! Every handler resolves the caller through [`AuthUser`] (or
//! [`RequireAdmin`]) and applies the cross-cutting ownership policy: 404
//! when a row is truly absent, 403 when it exists but belongs to someone
//! else.
//!
//! [`AuthUser`]: crate::middleware::auth::AuthUser
//! [`RequireAdmin`]: crate::middleware::admin::RequireAdmin

pub mod auth;
pub mod devices;
pub mod locations;
pub mod preferences;
pub mod settings;
pub mod tokens;
pub mod user;
