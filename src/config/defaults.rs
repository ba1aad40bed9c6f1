/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/igdb-proxy.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// IGDB defaults
pub const DEFAULT_IGDB_BASE_URL: &str = "https://api-v3.igdb.com/";
pub const DEFAULT_IGDB_API_KEY_HEADER: &str = "user-key";

// Logging defaults
pub const DEFAULT_LOG_FILE_LEVEL: &str = "warn";

// Environment
pub const ENV_PREFIX: &str = "IGDB_PROXY_";
pub const LEGACY_API_KEY_VAR: &str = "IGDB_KEY";
pub const LEGACY_LOG_PATH_VAR: &str = "LOG_PATH";
