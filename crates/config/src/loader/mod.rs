//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and `TFE_*` environment variables.
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::{
    ENV_ADDRESS, ENV_MAX_RETRIES, ENV_ORGANIZATION_TOKEN, ENV_RATE_LIMIT, ENV_RETRY_SERVER_ERRORS,
    ENV_SKIP_VERIFY, ENV_TIMEOUT, env_var_or_none,
};
pub use error::ConfigError;
