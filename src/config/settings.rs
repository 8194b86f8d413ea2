//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use chrono::{Duration, Utc};

use super::constants::{
    DEFAULT_HASH_WORKERS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TOKEN_TTL_HOURS,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub token_ttl_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub hash_workers: usize,
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("hash_workers", &self.hash_workers)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for every optional setting.
    ///
    /// # Errors
    /// Returns a validation error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH` or the database URL is empty.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let database_url = database_url.into();
        let jwt_secret = jwt_secret.into();

        if database_url.trim().is_empty() {
            return Err(AppError::validation("DATABASE_URL must not be empty"));
        }
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            hash_workers: DEFAULT_HASH_WORKERS,
            cors_allowed_origins: Vec::new(),
            static_dir: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` have no fallback values.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::validation("DATABASE_URL environment variable must be set"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::validation("JWT_SECRET environment variable must be set"))?;

        let mut config = Self::new(database_url, jwt_secret)?;

        if let Some(hours) = env_setting("TOKEN_TTL_HOURS")? {
            config.token_ttl_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env_setting("SERVER_PORT")? {
            config.server_port = port;
        }
        if let Some(workers) = env_setting("HASH_WORKERS")? {
            config.hash_workers = workers;
        }
        if let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = parse_origins(&origins);
        }
        config.static_dir = env::var("STATIC_DIR").ok().filter(|d| !d.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Check the optional settings after overrides were applied.
    ///
    /// The token lifetime must be positive and small enough that an expiry
    /// computed from the current time stays representable.
    pub fn validate(&self) -> AppResult<()> {
        if self.token_ttl_hours <= 0 {
            return Err(AppError::validation("TOKEN_TTL_HOURS must be positive"));
        }
        let expiry = Duration::try_hours(self.token_ttl_hours)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        if expiry.is_none() {
            return Err(AppError::validation("TOKEN_TTL_HOURS is out of range"));
        }
        if self.hash_workers == 0 {
            return Err(AppError::validation("HASH_WORKERS must be at least 1"));
        }
        Ok(())
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Token validity window. Falls back to the default for values
    /// `validate` would reject.
    pub fn token_ttl(&self) -> Duration {
        Duration::try_hours(self.token_ttl_hours)
            .unwrap_or_else(|| Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Read an optional numeric setting; a value that does not parse is an error.
fn env_setting<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => parse_setting(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_setting<T: FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{} has an invalid value: {:?}", name, raw)))
}

/// Split a comma separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
