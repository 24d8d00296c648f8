//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_repo;
pub mod location_repo;
pub mod preference_repo;
pub mod refresh_token_repo;
pub mod setting_repo;
pub mod user_repo;

pub use device_repo::DeviceRepo;
pub use location_repo::LocationRepo;
pub use preference_repo::PreferenceRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use setting_repo::SettingRepo;
pub use user_repo::UserRepo;
