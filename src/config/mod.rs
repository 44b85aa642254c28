use std::env;

use anyhow::{Context, Result};

/// Application configuration, read from the environment once at startup and
/// passed by reference to whatever needs it. No global singleton.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub port: u16,
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
    /// Seconds a connection may sit idle before being reaped.
    pub max_idle_time_secs: u64,
    /// Seconds a connection may live before being recycled.
    pub max_life_time_secs: u64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
    /// Whether bearer auth is enforced on the todolist routes.
    pub auth_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            app: AppConfig {
                name: string_from_env("APP_NAME", "todolist-api"),
                port: parse_from_env("PORT", 8080)?,
                debug: parse_from_env("DEBUG", false)?,
            },
            database: DatabaseConfig {
                host: string_from_env("DB_HOST", "localhost"),
                port: parse_from_env("DB_PORT", 5432)?,
                username: string_from_env("DB_USERNAME", "postgres"),
                password: string_from_env("DB_PASSWORD", "postgres"),
                name: string_from_env("DB_NAME", "todolist"),
                ssl_mode: string_from_env("DB_SSL_MODE", "disable"),
                max_open_conns: parse_from_env("DB_MAX_OPEN_CONNS", 10)?,
                max_idle_conns: parse_from_env("DB_MAX_IDLE_CONNS", 5)?,
                max_idle_time_secs: parse_from_env("DB_MAX_IDLE_TIME", 30)?,
                max_life_time_secs: parse_from_env("DB_MAX_LIFE_TIME", 300)?,
            },
            jwt: JwtConfig {
                secret: string_from_env("JWT_SECRET", "please-change-me"),
                issuer: string_from_env("JWT_ISSUER", "todolist"),
                ttl_secs: parse_from_env("JWT_TTL", 3600)?,
                auth_enabled: parse_from_env("AUTH_ENABLED", false)?,
            },
        })
    }
}

fn string_from_env(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Parse an env var, falling back when unset. A set-but-unparsable value is a
/// startup error rather than a silent default.
fn parse_from_env<T: std::str::FromStr>(key: &str, fallback: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value.parse::<T>().with_context(|| format!("parse {}", key)),
        Err(_) => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_unset() {
        let config = Config::from_env().expect("config");
        assert_eq!(config.app.name, "todolist-api");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.jwt.issuer, "todolist");
    }

    #[test]
    fn malformed_numeric_value_is_an_error() {
        env::set_var("TEST_ONLY_MAX_CONNS", "not-a-number");
        let parsed: Result<u32> = parse_from_env("TEST_ONLY_MAX_CONNS", 10);
        assert!(parsed.is_err());
        env::remove_var("TEST_ONLY_MAX_CONNS");
    }
}
