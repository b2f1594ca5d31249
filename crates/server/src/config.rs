use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Returns the default data path for this environment
    pub fn default_data_path(&self) -> PathBuf {
        match self {
            Self::Dev => PathBuf::from("./data"),
            Self::Prod => PathBuf::from("/data"),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Connection settings for the Transmission daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9091,
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl TransmissionConfig {
    pub fn rpc_url(&self) -> String {
        transmission::TransmissionClient::rpc_url_for(&self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credentials are only used when both halves are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) if !u.is_empty() => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

/// Destination roots of the media library, one per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryPaths {
    pub films: PathBuf,
    pub series: PathBuf,
    pub other: PathBuf,
}

impl Default for LibraryPaths {
    fn default() -> Self {
        Self {
            films: PathBuf::from("/plex/movies"),
            series: PathBuf::from("/plex/series"),
            other: PathBuf::from("/plex/other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub env: Environment,
    pub data_path: PathBuf,
    pub database_url: String,
    pub max_connections: u32,
    pub transmission: TransmissionConfig,
    pub library: LibraryPaths,
    pub sync_interval_secs: u64,
    #[serde(skip_serializing)]
    pub tmdb_api_key: String,
}

impl Config {
    pub fn new(env: Environment, data_path: impl AsRef<Path>) -> Self {
        let data_path = data_path.as_ref().to_path_buf();
        let database_url = format!(
            "sqlite:{}?mode=rwc",
            data_path.join("plexdl.db").display()
        );
        Self {
            env,
            data_path,
            database_url,
            max_connections: 5,
            transmission: TransmissionConfig::default(),
            library: LibraryPaths::default(),
            sync_interval_secs: 300,
            tmdb_api_key: String::new(),
        }
    }

    /// Build the configuration from process environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env(env: Environment, data_path: impl AsRef<Path>) -> Self {
        let mut config = Self::new(env, data_path);

        let defaults = TransmissionConfig::default();
        config.transmission = TransmissionConfig {
            host: env_or("TRANSMISSION_HOST", defaults.host),
            port: env_parse("TRANSMISSION_PORT", defaults.port),
            username: env_opt("TRANSMISSION_USERNAME"),
            password: env_opt("TRANSMISSION_PASSWORD"),
            timeout_secs: env_parse("TRANSMISSION_TIMEOUT_SECS", defaults.timeout_secs),
        };

        let defaults = LibraryPaths::default();
        config.library = LibraryPaths {
            films: env_opt("PLEX_MOVIES_PATH").map(PathBuf::from).unwrap_or(defaults.films),
            series: env_opt("PLEX_SERIES_PATH").map(PathBuf::from).unwrap_or(defaults.series),
            other: env_opt("PLEX_OTHER_PATH").map(PathBuf::from).unwrap_or(defaults.other),
        };

        config.sync_interval_secs = env_parse("SYNC_INTERVAL_SECS", config.sync_interval_secs);
        config.tmdb_api_key = env_opt("TMDB_API_KEY").unwrap_or_default();

        config
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: String) -> String {
    env_opt(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid value for {}: {}", key, raw);
            default
        }),
        None => default,
    }
}
