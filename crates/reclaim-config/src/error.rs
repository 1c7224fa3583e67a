use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{option} must be a non-negative number of days, got {days}")]
    InvalidThreshold { option: &'static str, days: i64 },

    #[error("invalid period {value:?}: {source}")]
    InvalidPeriod {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
