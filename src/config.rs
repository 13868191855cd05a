//! Configuration of the token info server.
//!
//! Values come from a JSON file (`--config`, `$CONFIG`, `./config.json`). Keys missing
//! from the file fall back to environment variables, then to hardcoded defaults. A
//! missing `./config.json` is not an error: every value then comes from the environment.
//!
//! ```json
//! {
//!   "port": 8080,
//!   "utlApiBaseUrl": "https://token-list-api.solana.cloud",
//!   "utlApiTimeoutMs": 5000,
//!   "badTokens": "MintA,MintB"
//! }
//! ```

use clap::Parser;
use explorer_tokens_client::RedactedTokens;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "explorer-tokens")]
#[command(about = "Token metadata HTTP server for the Solana explorer")]
struct CliArgs {
    /// Path to the JSON configuration file
    #[arg(long, short, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "config_defaults::default_port")]
    port: u16,
    #[serde(default = "config_defaults::default_host")]
    host: IpAddr,
    #[serde(default = "config_defaults::default_utl_api_base_url")]
    utl_api_base_url: String,
    #[serde(
        default = "config_defaults::default_utl_api_timeout_ms",
        deserialize_with = "deserialize_timeout_ms"
    )]
    utl_api_timeout_ms: u64,
    #[serde(default = "config_defaults::default_token_list_url")]
    token_list_url: String,
    #[serde(default = "config_defaults::default_bad_tokens")]
    bad_tokens: String,
    #[serde(default = "config_defaults::default_response_cache_ttl_secs")]
    response_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: config_defaults::default_port(),
            host: config_defaults::default_host(),
            utl_api_base_url: config_defaults::default_utl_api_base_url(),
            utl_api_timeout_ms: config_defaults::default_utl_api_timeout_ms(),
            token_list_url: config_defaults::default_token_list_url(),
            bad_tokens: config_defaults::default_bad_tokens(),
            response_cache_ttl_secs: config_defaults::default_response_cache_ttl_secs(),
        }
    }
}

/// Accepts a number or a numeric string; anything else means the default.
fn deserialize_timeout_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let timeout = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => config_defaults::parse_timeout_ms(s),
        _ => None,
    };
    Ok(timeout.unwrap_or(config_defaults::DEFAULT_UTL_API_TIMEOUT_MS))
}

pub mod config_defaults {
    use explorer_tokens_client::RedactedTokens;
    use std::env;
    use std::net::{IpAddr, Ipv4Addr};

    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    pub const DEFAULT_UTL_API_BASE_URL: &str = "https://token-list-api.solana.cloud";
    pub const DEFAULT_UTL_API_TIMEOUT_MS: u64 = 5_000;
    pub const DEFAULT_TOKEN_LIST_URL: &str =
        "https://cdn.jsdelivr.net/gh/solana-labs/token-list@latest/src/tokens/solana.tokenlist.json";
    pub const DEFAULT_RESPONSE_CACHE_TTL_SECS: u64 = 3_600;

    /// $PORT -> 8080
    pub fn default_port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// $HOST -> 0.0.0.0
    pub fn default_host() -> IpAddr {
        env::var("HOST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HOST)
    }

    /// $UTL_API_BASE_URL -> https://token-list-api.solana.cloud
    pub fn default_utl_api_base_url() -> String {
        env::var("UTL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_UTL_API_BASE_URL.to_string())
    }

    /// $UTL_API_TIMEOUT_MS -> 5000
    pub fn default_utl_api_timeout_ms() -> u64 {
        env::var("UTL_API_TIMEOUT_MS")
            .ok()
            .and_then(|s| parse_timeout_ms(&s))
            .unwrap_or(DEFAULT_UTL_API_TIMEOUT_MS)
    }

    /// $TOKEN_LIST_URL -> jsDelivr copy of the legacy token list
    pub fn default_token_list_url() -> String {
        env::var("TOKEN_LIST_URL").unwrap_or_else(|_| DEFAULT_TOKEN_LIST_URL.to_string())
    }

    /// $BAD_TOKENS -> none
    pub fn default_bad_tokens() -> String {
        env::var(RedactedTokens::ENV_VAR).unwrap_or_default()
    }

    /// $RESPONSE_CACHE_TTL_SECS -> 3600
    pub fn default_response_cache_ttl_secs() -> u64 {
        env::var("RESPONSE_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RESPONSE_CACHE_TTL_SECS)
    }

    pub fn parse_timeout_ms(value: &str) -> Option<u64> {
        value.trim().parse().ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Config {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    /// Base URL of the token metadata service.
    pub fn utl_api_base_url(&self) -> &str {
        &self.utl_api_base_url
    }

    pub fn utl_api_timeout(&self) -> Duration {
        Duration::from_millis(self.utl_api_timeout_ms)
    }

    /// URL of the legacy token list document.
    pub fn token_list_url(&self) -> &str {
        &self.token_list_url
    }

    pub fn redacted_tokens(&self) -> RedactedTokens {
        RedactedTokens::parse(&self.bad_tokens)
    }

    pub fn response_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.response_cache_ttl_secs)
    }

    /// Loads configuration from the file named on the command line.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        let optional = cli_args.config == Path::new(DEFAULT_CONFIG_PATH);
        Self::load_from_path(&cli_args.config, optional)
    }

    /// Reads `path`. When `optional` is set, a missing file yields the defaults.
    fn load_from_path(path: &Path, optional: bool) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if optional && e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No config file, using environment and defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::FileRead(path.to_path_buf(), e)),
        }
    }
}
