//! Domain-level building blocks shared by the db and api crates.
//!
//! - [`error`] -- the `CoreError` taxonomy every operation maps into.
//! - [`types`] -- id/timestamp aliases and the string-form id JSON codec.
//! - [`battery`] -- plausibility rule for reported battery levels.

pub mod battery;
pub mod error;
pub mod types;
