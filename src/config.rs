//! Startup configuration read from the process environment.
//!
//! `main` loads a `.env` file with `dotenvy` first, then calls
//! [`Config::from_env`]. Values are read once; handlers never consult the
//! environment themselves.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set and cannot be blank")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment flavour. Only `Dev` allows the destructive admin reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Dev,
    Production,
}

impl Platform {
    pub fn is_dev(self) -> bool {
        matches!(self, Platform::Dev)
    }
}

impl From<Option<&str>> for Platform {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some("dev") => Platform::Dev,
            _ => Platform::Production,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Scylla contact point, e.g. `127.0.0.1:9042`.
    pub db_url: String,
    pub platform: Platform,
    pub port: u16,
    pub filepath_root: PathBuf,
    pub workers: usize,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 8080;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_url = lookup("DB_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DB_URL"))?;

        let platform = Platform::from(lookup("PLATFORM").as_deref());

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => Self::DEFAULT_PORT,
        };

        let filepath_root = lookup("FILEPATH_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let workers = match lookup("WORKERS") {
            Some(value) => match value.parse::<usize>() {
                Ok(workers) if workers > 0 => workers,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "WORKERS",
                        value,
                    })
                }
            },
            None => num_cpus::get(),
        };

        Ok(Self {
            db_url,
            platform,
            port,
            filepath_root,
            workers,
        })
    }
}
