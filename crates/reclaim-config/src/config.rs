use crate::constants;
use crate::error::{ConfigError, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    #[serde(default = "default_inactive_days_before_deletion")]
    pub inactive_days_before_deletion: i64,

    #[serde(default = "default_inactive_days_before_stop")]
    pub inactive_days_before_stop: i64,

    #[serde(default)]
    pub whitelist: Vec<String>,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    #[serde(default = "default_cleanup_days")]
    pub days: Vec<String>,

    #[serde(default = "default_cleanup_start")]
    pub start: String,

    #[serde(default = "default_cleanup_end")]
    pub end: String,

    #[serde(
        default = "default_cleanup_period",
        deserialize_with = "deserialize_period"
    )]
    pub period: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub deletion: TimeDelta,
    pub stop: TimeDelta,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            inactive_days_before_deletion: default_inactive_days_before_deletion(),
            inactive_days_before_stop: default_inactive_days_before_stop(),
            whitelist: Vec::new(),
            dry_run: false,
            schedule: ScheduleConfig::default(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days: default_cleanup_days(),
            start: default_cleanup_start(),
            end: default_cleanup_end(),
            period: default_cleanup_period(),
        }
    }
}

impl CleanupConfig {
    pub fn thresholds(&self) -> Result<Thresholds> {
        Ok(Thresholds {
            deletion: days_to_threshold(
                "inactive_days_before_deletion",
                self.inactive_days_before_deletion,
            )?,
            stop: days_to_threshold("inactive_days_before_stop", self.inactive_days_before_stop)?,
        })
    }
}

fn days_to_threshold(option: &'static str, days: i64) -> Result<TimeDelta> {
    if days < 0 {
        return Err(ConfigError::InvalidThreshold { option, days });
    }
    TimeDelta::try_days(days).ok_or(ConfigError::InvalidThreshold { option, days })
}

/// Splits a comma separated list of application names. Empty entries, as left
/// by leading, trailing or doubled commas, are dropped.
pub fn parse_whitelist(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a human readable duration such as `30m`, `1h` or `1h 30m`.
pub fn parse_period(value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim()).map_err(|source| ConfigError::InvalidPeriod {
        value: value.to_string(),
        source,
    })
}

fn deserialize_period<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_period(&value).map_err(serde::de::Error::custom)
}

fn default_inactive_days_before_deletion() -> i64 {
    constants::DEFAULT_INACTIVE_DAYS_BEFORE_DELETION
}

fn default_inactive_days_before_stop() -> i64 {
    constants::DEFAULT_INACTIVE_DAYS_BEFORE_STOP
}

fn default_cleanup_days() -> Vec<String> {
    constants::DEFAULT_CLEANUP_DAYS
        .iter()
        .map(|day| day.to_string())
        .collect()
}

fn default_cleanup_start() -> String {
    constants::DEFAULT_CLEANUP_START.to_string()
}

fn default_cleanup_end() -> String {
    constants::DEFAULT_CLEANUP_END.to_string()
}

fn default_cleanup_period() -> Duration {
    constants::DEFAULT_CLEANUP_PERIOD
}

pub async fn load_config(path: &Path) -> Result<CleanupConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let config: CleanupConfig = toml::from_str(&content)?;
    debug!("Loaded cleanup config from {:?}", path);

    Ok(config)
}
