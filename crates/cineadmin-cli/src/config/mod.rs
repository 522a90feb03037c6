//! Application configuration module.
//!
//! Manages the TOML config file (backend URL, timeout, access token)
//! and access token resolution.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod token;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
pub use token::resolve_access_token;
