use std::{env, net::SocketAddr, path::PathBuf};

use config::{Config, ConfigError, FileFormat};
use serde::Deserialize;

pub mod application;
pub mod domain;
pub mod infrastructure;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/hotelier.ini";

#[derive(Clone, Debug, Deserialize)]
pub struct HotelierConfig {
    pub database: Database,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub logger: Logger,
}

impl HotelierConfig {
    /// Loads the file named by `HOTELIER_CONFIG`, or [`DEFAULT_CONFIG_PATH`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("HOTELIER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::new(path, FileFormat::Ini))
            .add_source(config::Environment::with_prefix("HOTELIER").separator("__"))
            .build()?
            .try_deserialize::<HotelierConfig>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ini(content: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::from_str(content, FileFormat::Ini))
            .build()?
            .try_deserialize::<HotelierConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects blank values for the keys the database connection needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("database.host", &self.database.host),
            ("database.user", &self.database.user),
            ("database.password", &self.database.password),
            ("database.database", &self.database.database),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(ConfigError::Message(format!(
                "incomplete configuration: `{key}` must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    pub host: String,
    #[serde(default = "Database::default_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "Database::default_charset")]
    pub charset: String,
    #[serde(default = "Database::default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub migrate: bool,
}

impl Database {
    fn default_port() -> u16 {
        3306
    }

    fn default_charset() -> String {
        "utf8mb4".to_owned()
    }

    fn default_max_connections() -> u32 {
        10
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub address: SocketAddr,
    pub tls_cert: Option<PathBuf>,
    pub tls_key: Option<PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            tls_cert: None,
            tls_key: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
