//! Configuration management for the TFE audit client.
//!
//! This crate provides types and loaders for the connection settings and the
//! organization token, read from environment variables and `.env` files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, ENV_ADDRESS, ENV_MAX_RETRIES, ENV_ORGANIZATION_TOKEN,
    ENV_RATE_LIMIT, ENV_RETRY_SERVER_ERRORS, ENV_SKIP_VERIFY, ENV_TIMEOUT, env_var_or_none,
};
pub use types::{Config, ConnectionConfig};
