use log::warn;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::database::DatabaseSettings;
use crate::gemini::DEFAULT_GEMINI_API_URL;

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://magical-profiterole-f67df4.netlify.app",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown SURVEY_STORE `{0}` (expected `postgres` or `memory`)")]
    UnknownStore(String),
    #[error("Invalid bind address {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub address: SocketAddr,
    pub cors_origins: Vec<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub generation_timeout: Duration,
    pub short_hair_text_path: PathBuf,
    pub long_hair_text_path: PathBuf,
    pub store: StoreBackend,
    pub database: DatabaseSettings,
}

impl AppConfig {
    /// Read settings from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "0.0.0.0");
        let port: u16 = parse_or(&lookup, "PORT", 8000);
        let address: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", host, port)))?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());

        let defaults = DatabaseSettings::default();
        let database = DatabaseSettings {
            host: get("DB_HOST", &defaults.host),
            port: parse_or(&lookup, "DB_PORT", defaults.port),
            dbname: get("DB_NAME", &defaults.dbname),
            user: get("DB_USER", &defaults.user),
            password: get("DB_PASSWORD", &defaults.password),
        };

        Ok(Self {
            address,
            cors_origins,
            gemini_api_key,
            gemini_api_url: get("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            generation_timeout: Duration::from_secs(parse_or(
                &lookup,
                "GENERATION_TIMEOUT_SECS",
                30,
            )),
            short_hair_text_path: PathBuf::from(get(
                "SHORT_HAIR_TEXT_PATH",
                "assets/the_value_of_short_hair.txt",
            )),
            long_hair_text_path: PathBuf::from(get(
                "LONG_HAIR_TEXT_PATH",
                "assets/the_value_of_long_hair.txt",
            )),
            store: get("SURVEY_STORE", "postgres").parse()?,
            database,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
