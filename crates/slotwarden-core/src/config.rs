use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
/// Per-request cap on store calls; the original had none and could hang.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Top-level config (slotwarden.toml + SLOTWARDEN_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// The remote JSON document store the warden fronts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL, e.g. "https://example-rtdb.firebaseio.com".
    /// Env override: SLOTWARDEN_STORE_URL.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

/// Shared secret gating the raw read/write passthrough routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Value the X-Secret request header must equal.
    /// Env override: SLOTWARDEN_PROXY_SECRET.
    #[serde(default)]
    pub secret: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_store_timeout() -> u64 {
    DEFAULT_STORE_TIMEOUT_SECS
}

impl WardenConfig {
    /// Load config from a TOML file with SLOTWARDEN_* env var overrides.
    ///
    /// The file is optional — a deployment that only sets
    /// SLOTWARDEN_STORE_URL and SLOTWARDEN_PROXY_SECRET is complete.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("slotwarden.toml");

        let config: WardenConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("SLOTWARDEN_").split("_"))
            .extract()
            .map_err(|e| crate::error::WardenError::Config(e.to_string()))?;

        Ok(config)
    }
}
