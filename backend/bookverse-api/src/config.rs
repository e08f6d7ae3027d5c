//! Configuration management for the BookVerse API
//!
//! Settings are loaded from environment variables, with a `.env` file picked
//! up in debug builds for local development.

use anyhow::{Context, Result};
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub session: SessionSettings,
    pub server: ServerSettings,
    pub cors: CorsSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            session: SessionSettings::from_env()?,
            server: ServerSettings::from_env()?,
            cors: CorsSettings::from_env(),
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: u64,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            acquire_timeout: env::var("DATABASE_ACQUIRE_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT")?,
        })
    }
}

/// Access-token signing settings
///
/// The signing secret is process-wide configuration loaded once at startup;
/// rotating it invalidates all outstanding access tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("Invalid JWT_EXPIRY_SECONDS")?,
        })
    }
}

/// Refresh-token lifecycle settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub refresh_ttl_days: i64,
    pub purge_interval_secs: u64,
}

impl SessionSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            refresh_ttl_days: env::var("REFRESH_TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid REFRESH_TOKEN_TTL_DAYS")?,
            purge_interval_secs: env::var("TOKEN_PURGE_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid TOKEN_PURGE_INTERVAL_SECS")?,
        })
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// CORS settings; comma-separated origin list, `*` allows any origin
#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: String,
}

impl CorsSettings {
    fn from_env() -> Self {
        Self {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_settings_from_env() {
        env::set_var("JWT_SECRET", "test-secret-key");
        env::set_var("JWT_EXPIRY_SECONDS", "7200");

        let settings = JwtSettings::from_env().unwrap();

        assert_eq!(settings.secret, "test-secret-key");
        assert_eq!(settings.expiry_seconds, 7200);

        env::remove_var("JWT_SECRET");
        env::remove_var("JWT_EXPIRY_SECONDS");
    }

    #[test]
    fn test_session_settings_defaults() {
        let settings = SessionSettings::from_env().unwrap();

        assert_eq!(settings.refresh_ttl_days, 7);
        assert_eq!(settings.purge_interval_secs, 3600);
    }

    #[test]
    fn test_server_settings_defaults() {
        let settings = ServerSettings::from_env().unwrap();

        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
    }
}
