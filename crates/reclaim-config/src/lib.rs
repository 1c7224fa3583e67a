mod config;
pub mod constants;
mod error;

pub use config::{
    CleanupConfig, ScheduleConfig, Thresholds, load_config, parse_period, parse_whitelist,
};
pub use error::{ConfigError, Result};
