use std::time::Duration;

pub mod loader;

pub use loader::{apply_env_overrides, load_client_config};

pub const DEFAULT_BASE_URL: &str = "https://cloud.iexapis.com/stable";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "IEX_BASE_URL";
pub const ENV_TOKEN: &str = "IEX_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "IEX_TIMEOUT_SECS";

/// Connection settings consumed by the REST executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Publishable token appended as the `token` query pair when present.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn builtin() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
