//! Client for the storage and work order resources of the admin backend.
//!
//! - [`api`] - the shared request transport
//! - [`resource`] - resource collections and their CRUD operations
//! - [`config`] - persisted settings

pub mod api;
pub mod config;
pub mod resource;

/// Version injected at compile time via ADMINCTL_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("ADMINCTL_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
