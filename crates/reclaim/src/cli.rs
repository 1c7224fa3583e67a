use crate::commands::Operation;
use clap::{Args, Parser, Subcommand};
use reclaim_config::constants::{CONFIG_PATH_ENV, DEFAULT_LOG_LEVEL};
use std::path::PathBuf;
use std::time::Duration;

/// Stops and deletes applications that nobody has touched for a while.
#[derive(Parser, Debug)]
#[command(name = "reclaim", version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Settings {
    /// TOML configuration file
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Days without activity before an application is deleted
    #[arg(long, global = true, env = "RECLAIM_INACTIVE_DAYS_BEFORE_DELETION")]
    pub inactive_days_before_deletion: Option<i64>,

    /// Days without activity before an application is stopped
    #[arg(long, global = true, env = "RECLAIM_INACTIVE_DAYS_BEFORE_STOP")]
    pub inactive_days_before_stop: Option<i64>,

    /// Comma separated applications to never touch, on top of the reserved ones
    #[arg(long, global = true, env = "RECLAIM_WHITELISTED_APPS")]
    pub whitelisted_apps: Option<String>,

    /// Weekdays the continuous commands may act on (mo,tu,we,th,fr,sa,su)
    #[arg(long, global = true, env = "RECLAIM_CLEANUP_DAYS", value_delimiter = ',')]
    pub cleanup_days: Option<Vec<String>>,

    /// Start of the daily cleanup window (HH:MM, local time)
    #[arg(long, global = true, env = "RECLAIM_CLEANUP_START")]
    pub cleanup_start: Option<String>,

    /// End of the daily cleanup window (HH:MM, local time)
    #[arg(long, global = true, env = "RECLAIM_CLEANUP_END")]
    pub cleanup_end: Option<String>,

    /// Time between checks in continuous mode, e.g. 30m or 1h
    #[arg(long, global = true, env = "RECLAIM_PERIOD", value_parser = reclaim_config::parse_period)]
    pub period: Option<Duration>,

    /// Report what would be stopped or deleted without changing anything
    #[arg(long, global = true, env = "RECLAIM_DRY_RUN")]
    pub dry_run: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "RECLAIM_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Human readable logs instead of JSON
    #[arg(long, global = true, env = "RECLAIM_PRETTY_PRINT")]
    pub pretty_print: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List applications inactive long enough to be deleted
    ListForDeletion,
    /// List deletion candidates on every tick inside the cleanup window
    ListForDeletionContinuously,
    /// List applications inactive long enough to be stopped
    ListForStop,
    /// List stop candidates on every tick inside the cleanup window
    ListForStopContinuously,
    /// List both stop and deletion candidates
    ListForStopAndDeletion,
    /// List stop and deletion candidates on every tick inside the cleanup window
    ListForStopAndDeletionContinuously,
    /// Delete inactive applications
    Delete,
    /// Delete inactive applications on every tick inside the cleanup window
    DeleteContinuously,
    /// Scale inactive applications to zero replicas
    Stop,
    /// Stop inactive applications on every tick inside the cleanup window
    StopContinuously,
    /// Stop inactive applications, then delete those inactive long enough
    StopAndDelete,
    /// Stop and delete on every tick inside the cleanup window
    StopAndDeleteContinuously,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Version,
    Once(Operation),
    Continuously(Operation),
}

impl Command {
    pub fn plan(self) -> Plan {
        use Operation::*;
        match self {
            Command::ListForDeletion => Plan::Once(ListForDeletion),
            Command::ListForDeletionContinuously => Plan::Continuously(ListForDeletion),
            Command::ListForStop => Plan::Once(ListForStop),
            Command::ListForStopContinuously => Plan::Continuously(ListForStop),
            Command::ListForStopAndDeletion => Plan::Once(ListForStopAndDeletion),
            Command::ListForStopAndDeletionContinuously => {
                Plan::Continuously(ListForStopAndDeletion)
            }
            Command::Delete => Plan::Once(Delete),
            Command::DeleteContinuously => Plan::Continuously(Delete),
            Command::Stop => Plan::Once(Stop),
            Command::StopContinuously => Plan::Continuously(Stop),
            Command::StopAndDelete => Plan::Once(StopAndDelete),
            Command::StopAndDeleteContinuously => Plan::Continuously(StopAndDelete),
            Command::Version => Plan::Version,
        }
    }
}

pub fn version_info() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
