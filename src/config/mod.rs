use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no wallet address configured (set BLOCKFOLIO_WALLET or [api].wallet)")]
    MissingWallet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Blockchain-data REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key - loaded from env BLOCKFOLIO_API_KEY
    #[serde(default)]
    pub api_key: String,
    /// Wallet address to report on - loaded from env BLOCKFOLIO_WALLET
    #[serde(default)]
    pub wallet: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_base_url() -> String {
    "https://api.blokness.com/".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            wallet: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file, then overlay environment variables for secrets.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        // Override secrets from environment variables (never store in config file)
        if let Ok(key) = std::env::var("BLOCKFOLIO_API_KEY") {
            config.api.api_key = key;
        }
        if let Ok(wallet) = std::env::var("BLOCKFOLIO_WALLET") {
            config.api.wallet = wallet;
        }

        Ok(config)
    }

    /// Load a default config with env-only values (no file needed).
    pub fn from_env() -> Self {
        Config {
            api: ApiConfig {
                base_url: std::env::var("BLOCKFOLIO_API_URL")
                    .unwrap_or_else(|_| default_base_url()),
                api_key: std::env::var("BLOCKFOLIO_API_KEY").unwrap_or_default(),
                wallet: std::env::var("BLOCKFOLIO_WALLET").unwrap_or_default(),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// The report is per-wallet; refuse to run without one.
    pub fn require_wallet(&self) -> Result<&str, ConfigError> {
        if self.api.wallet.is_empty() {
            return Err(ConfigError::MissingWallet);
        }
        Ok(&self.api.wallet)
    }
}
