use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub igdb: IgdbConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outbound IGDB API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgdbConfig {
    /// Static key sent with every request
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_igdb_base_url")]
    pub base_url: String,
    /// Header the key is sent in
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Optional request timeout ("30s", "2m"); unset leaves the transport default
    #[serde(default)]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// File logging; console logging is always on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append log records to this file when set
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// Minimum level written to `log_path`
    #[serde(default = "default_file_level")]
    pub file_level: String,
}

fn default_igdb_base_url() -> String {
    DEFAULT_IGDB_BASE_URL.to_string()
}

fn default_api_key_header() -> String {
    DEFAULT_IGDB_API_KEY_HEADER.to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_file_level() -> String {
    DEFAULT_LOG_FILE_LEVEL.to_string()
}

impl Default for IgdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_igdb_base_url(),
            api_key_header: default_api_key_header(),
            request_timeout: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            file_level: default_file_level(),
        }
    }
}

impl IgdbConfig {
    /// Parsed request timeout, if one is configured
    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.request_timeout
            .as_deref()
            .map(|raw| {
                humantime::parse_duration(raw)
                    .with_context(|| format!("Invalid igdb.request_timeout: '{raw}'"))
            })
            .transpose()
    }
}

impl LoggingConfig {
    pub fn file_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.file_level)
            .with_context(|| format!("Invalid logging.file_level: '{}'", self.file_level))
    }
}

impl Config {
    /// Layer defaults, the TOML file (when present) and environment variables
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if !std::path::Path::new(config_file).exists() {
            info!("Config file {} not found, using defaults and environment", config_file);
        }

        let config: Config = Self::figment(config_file)
            .extract()
            .with_context(|| format!("Failed to load configuration from {config_file}"))?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[LEGACY_API_KEY_VAR])
                    .map(|_| "igdb.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&[LEGACY_LOG_PATH_VAR])
                    .map(|_| "logging.log_path".into()),
            )
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.igdb.base_url)
            .with_context(|| format!("Invalid igdb.base_url: '{}'", self.igdb.base_url))?;
        self.igdb.timeout()?;
        self.logging.file_level_filter()?;

        if self.igdb.api_key.is_empty() {
            warn!("No IGDB API key configured; upstream calls will be rejected");
        }
        Ok(())
    }
}
