//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `TFE_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_ADDRESS: &str = "TFE_ADDRESS";
pub const ENV_ORGANIZATION_TOKEN: &str = "TFE_ORGANIZATION_TOKEN";
pub const ENV_TIMEOUT: &str = "TFE_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "TFE_MAX_RETRIES";
pub const ENV_RATE_LIMIT: &str = "TFE_RATE_LIMIT";
pub const ENV_SKIP_VERIFY: &str = "TFE_SKIP_VERIFY";
pub const ENV_RETRY_SERVER_ERRORS: &str = "TFE_RETRY_SERVER_ERRORS";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_ADDRESS) {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none(ENV_ORGANIZATION_TOKEN) {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = parse_env::<usize>(ENV_MAX_RETRIES, "must be a non-negative integer")? {
        loader.set_max_retries(Some(retries));
    }
    if let Some(rate) = parse_env::<u32>(ENV_RATE_LIMIT, "must be a positive integer")? {
        loader.set_rate_limit_per_second(Some(rate));
    }
    if let Some(skip) = parse_env::<bool>(ENV_SKIP_VERIFY, "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(retry) = parse_env::<bool>(ENV_RETRY_SERVER_ERRORS, "must be true or false")? {
        loader.set_retry_server_errors(Some(retry));
    }
    Ok(())
}
