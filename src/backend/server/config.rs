/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite database the rest of the backend runs on.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary first), with defaults for local development.
 *
 * | Variable           | Default                          |
 * |--------------------|----------------------------------|
 * | `DATABASE_URL`     | `sqlite://todoboard.db?mode=rwc` |
 * | `JWT_SECRET`       | development fallback             |
 * | `SERVER_HOST`      | `0.0.0.0`                        |
 * | `SERVER_PORT`      | `5000`                           |
 * | `UPLOAD_DIR`       | `uploads`                        |
 * | `MAX_UPLOAD_BYTES` | `10485760`                       |
 * | `BCRYPT_COST`      | `bcrypt::DEFAULT_COST`           |
 * | `ENVIRONMENT`      | `development`                    |
 *
 * # Error Handling
 *
 * Unlike optional services, nothing here is optional: a malformed value or a
 * missing production secret stops start-up with a `ConfigError`.
 */

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::shared::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todoboard.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const DEV_JWT_SECRET: &str = "todoboard-development-secret";
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Deployment mode. Production hides internal error detail and insists on a
/// real signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "ENVIRONMENT",
                value: value.to_string(),
            }),
        }
    }
}

/// Everything the server needs to start
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub bcrypt_cost: u32,
    pub environment: Environment,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            environment: Environment::Development,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /**
     * Load configuration through an arbitrary key lookup.
     *
     * # Arguments
     * * `lookup` - returns the raw value for a variable name, if set
     *
     * # Errors
     * `ConfigError::InvalidValue` for unparsable numbers, an unknown
     * environment or an out-of-range bcrypt cost; `ConfigError::MissingValue`
     * when production runs without `JWT_SECRET`
     */
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let environment = match get("ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => defaults.environment,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::MissingValue("JWT_SECRET"))
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let port = parse_var(&get, "SERVER_PORT")?.unwrap_or(defaults.port);
        let max_upload_bytes =
            parse_var(&get, "MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes);

        let bcrypt_cost: u32 = parse_var(&get, "BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost);
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            host: get("SERVER_HOST").unwrap_or(defaults.host),
            port,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes,
            bcrypt_cost,
            environment,
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(None),
    }
}

/// Open the SQLite pool and bring the schema up to date
///
/// # Errors
///
/// Fails if the URL cannot be parsed, the database cannot be opened or a
/// migration does not apply. The server cannot run without its store, so the
/// caller should treat this as fatal.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}
