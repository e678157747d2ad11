use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{AppError, Context, Result};
use crate::fetch::expand_env_vars;

use super::{ClientConfig, ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_TOKEN};

/// Load client settings from a JSON file. Fields left out fall back to the builtin values.
pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read client config JSON at {}", path.display()))?;

    let raw: RawClientConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse client config JSON at {}", path.display()))?;

    raw.into_client_config()
}

/// Apply `IEX_BASE_URL`, `IEX_TOKEN` and `IEX_TIMEOUT_SECS` on top of `config`.
pub fn apply_env_overrides(config: ClientConfig) -> Result<ClientConfig> {
    apply_overrides(config, |name| std::env::var(name).ok())
}

fn apply_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
        config.base_url = base_url.trim().to_string();
    }

    if let Some(token) = lookup(ENV_TOKEN).filter(|value| !value.trim().is_empty()) {
        config.token = Some(token.trim().to_string());
    }

    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS).filter(|value| !value.trim().is_empty()) {
        config.timeout_secs = timeout.trim().parse().map_err(|_| {
            AppError::message(format!(
                "{} must be a whole number of seconds, got `{}`",
                ENV_TIMEOUT_SECS, timeout
            ))
        })?;
    }

    Ok(config)
}

#[derive(Debug, Deserialize, Default)]
struct RawClientConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl RawClientConfig {
    fn into_client_config(self) -> Result<ClientConfig> {
        let mut config = ClientConfig::builtin();

        if let Some(base_url) = self.base_url {
            if base_url.trim().is_empty() {
                return Err(AppError::message("base_url must not be empty when provided"));
            }
            config.base_url = base_url.trim().to_string();
        }

        // Tokens may reference the environment, e.g. "${IEX_TOKEN}".
        config.token = match self.token {
            Some(token) if !token.trim().is_empty() => Some(expand_env_vars(token.trim())?),
            _ => None,
        };

        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }

        Ok(config)
    }
}
