/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, token secret, timeouts, hash cost)
 * - Validate them once at startup (missing/invalid -> refuse to start)
 * - Everything downstream receives values from here, never from env directly
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Minimum length (in bytes) accepted for the HMAC signing secret.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Longest token lifetime we accept (30 days).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashCost {
    // OWASP minimum for argon2id
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_connect_timeout: Duration,
    pub db_operation_timeout: Duration,

    pub auth_token_secret: String,
    pub auth_issuer: String,
    pub auth_token_ttl_seconds: u64,

    pub password_hash_cost: PasswordHashCost,

    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret or credentials embedded in the connection string
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_timeout", &self.db_connect_timeout)
            .field("db_operation_timeout", &self.db_operation_timeout)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_token_ttl_seconds", &self.auth_token_ttl_seconds)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (env, a map in tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let database_url = required(&lookup, "DATABASE_URL")?;

        let auth_token_secret = required(&lookup, "AUTH_TOKEN_SECRET")?;
        if auth_token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(ConfigError::Invalid("AUTH_TOKEN_SECRET"));
        }

        let auth_issuer = lookup("AUTH_ISSUER")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "task-manager".to_string());

        let auth_token_ttl_seconds = parse_or(&lookup, "AUTH_TOKEN_TTL_SECONDS", 43_200); // 12h
        if auth_token_ttl_seconds == 0 || auth_token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid("AUTH_TOKEN_TTL_SECONDS"));
        }

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10);
        let db_connect_timeout =
            Duration::from_secs(parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECONDS", 10));
        let db_operation_timeout =
            Duration::from_secs(parse_or(&lookup, "DB_OPERATION_TIMEOUT_SECONDS", 5));

        let defaults = PasswordHashCost::default();
        let password_hash_cost = PasswordHashCost {
            memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib),
            iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations),
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism),
        };

        let request_timeout = Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30));

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_max_connections,
            db_connect_timeout,
            db_operation_timeout,
            auth_token_secret,
            auth_issuer,
            auth_token_ttl_seconds,
            password_hash_cost,
            request_timeout,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
