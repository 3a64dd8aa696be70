//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_SESSION_COOKIE, DEFAULT_SESSION_TTL_SECONDS, DEVELOPMENT_SESSION_SECRET,
    MEMORY_DATABASE_URL,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

impl DatabaseSettings {
    /// `memory://` selects the in-process store instead of MySQL.
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl_seconds: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// Directory for daily-rolling log files; stdout only when unset.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::load_for(&env)
    }

    /// Loads the layered settings for `env`. `app.env` always equals `env`,
    /// whatever the files or environment variables say.
    pub fn load_for(env: &str) -> Result<Self, AppError> {
        let config = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .set_override("app.env", env)?
            .build()?;
        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "contact-server")?
            .set_default("app.request_timeout_secs", 15)?
            .set_default("database.url", MEMORY_DATABASE_URL)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("session.secret", DEVELOPMENT_SESSION_SECRET)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.cookie_name", DEFAULT_SESSION_COOKIE)?
            .set_default("session.secure_cookie", false)?
            .set_default("log.level", "info")?
            .set_default("log.json", true)
    }

    pub fn is_development(&self) -> bool {
        self.app.env == "development"
    }

    /// Rejects settings that must never reach a deployed environment.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.ttl_seconds <= 0 {
            return Err(AppError::InsecureConfig(
                "session.ttl_seconds must be positive".into(),
            ));
        }
        if self.is_development() {
            return Ok(());
        }
        if self.session.secret.is_empty() || self.session.secret == DEVELOPMENT_SESSION_SECRET {
            return Err(AppError::InsecureConfig(
                "session.secret must be set outside development".into(),
            ));
        }
        Ok(())
    }
}
