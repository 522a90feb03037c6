//! Access token resolution.

use anyhow::{Result, bail};
use cineadmin_api::cinema::AccessToken;

use super::config::AppConfig;

/// Environment variable holding the operator token.
pub const TOKEN_ENV: &str = "CINEADMIN_TOKEN";

/// Picks the access token: `--token` flag, then `env_value`, then the config file.
///
/// Blank values are skipped.
///
/// # Errors
///
/// Returns an error if no source provides a token.
pub fn pick_access_token(
    flag: Option<&str>,
    env_value: Option<&str>,
    config: &AppConfig,
) -> Result<AccessToken> {
    let configured = config.api.access_token.as_deref();
    let Some(token) = [flag, env_value, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
    else {
        bail!("an access token is required: pass --token, set {TOKEN_ENV}, or add api.access_token to the config file");
    };
    Ok(AccessToken::new(token))
}

/// Resolves the access token, reading `CINEADMIN_TOKEN` from the environment.
///
/// # Errors
///
/// Returns an error if no source provides a token.
pub fn resolve_access_token(flag: Option<&str>, config: &AppConfig) -> Result<AccessToken> {
    let env_value = std::env::var(TOKEN_ENV).ok();
    pick_access_token(flag, env_value.as_deref(), config)
}
