//! Entity models and DTOs.
//!
//! Each entity file contains the `FromRow` database struct, the request
//! DTOs consumed by repositories, and the sanitized response struct the
//! API serializes. Ids in response structs are rendered as decimal
//! strings via `waypost_core::types::id_string`.

pub mod device;
pub mod location;
pub mod preference;
pub mod refresh_token;
pub mod setting;
pub mod user;
