use crate::cli::Settings;
use reclaim_config::{CleanupConfig, load_config, parse_whitelist};

/// Defaults, then the TOML file if one was given, then flags and
/// environment variables.
pub async fn resolve(settings: &Settings) -> reclaim_config::Result<CleanupConfig> {
    let config = match &settings.config {
        Some(path) => load_config(path).await?,
        None => CleanupConfig::default(),
    };
    let config = apply_overrides(config, settings);
    config.thresholds()?;
    Ok(config)
}

pub fn apply_overrides(mut config: CleanupConfig, settings: &Settings) -> CleanupConfig {
    if let Some(days) = settings.inactive_days_before_deletion {
        config.inactive_days_before_deletion = days;
    }
    if let Some(days) = settings.inactive_days_before_stop {
        config.inactive_days_before_stop = days;
    }
    if let Some(apps) = &settings.whitelisted_apps {
        config.whitelist.extend(parse_whitelist(apps));
    }
    if let Some(days) = &settings.cleanup_days {
        config.schedule.days = days.clone();
    }
    if let Some(start) = &settings.cleanup_start {
        config.schedule.start = start.clone();
    }
    if let Some(end) = &settings.cleanup_end {
        config.schedule.end = end.clone();
    }
    if let Some(period) = settings.period {
        config.schedule.period = period;
    }
    config.dry_run |= settings.dry_run;
    config
}
