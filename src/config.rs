use serde::Deserialize;
use std::path::PathBuf;

/// Secret shipped in the built-in defaults. Only meant for local development.
pub const DEV_SECRET_KEY: &str = "change-this-secret";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub pool_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub algorithm: TokenAlgorithm,
    pub access_token_expire_minutes: i64,
    pub leeway_seconds: u64,
    pub bcrypt_cost: u32,
}

/// Symmetric signing algorithms accepted for access tokens.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TokenAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl TokenAlgorithm {
    pub fn to_jsonwebtoken(self) -> jsonwebtoken::Algorithm {
        match self {
            Self::HS256 => jsonwebtoken::Algorithm::HS256,
            Self::HS384 => jsonwebtoken::Algorithm::HS384,
            Self::HS512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config/default")
    }

    // Defaults, then the optional file, then APP_SECTION__KEY environment overrides.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000_i64)?
            .set_default("server.max_body_size", 1_048_576_i64)?
            .set_default("database.path", "todolist.db")?
            .set_default("database.pool_size", 8_i64)?
            .set_default("auth.secret_key", DEV_SECRET_KEY)?
            .set_default("auth.algorithm", "HS256")?
            .set_default("auth.access_token_expire_minutes", 60_i64)?
            .set_default("auth.leeway_seconds", 0_i64)?
            .set_default("auth.bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .set_default("log.level", "info")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
