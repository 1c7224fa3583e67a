use std::time::Duration;

pub const DEFAULT_INACTIVE_DAYS_BEFORE_DELETION: i64 = 7 * 4;
pub const DEFAULT_INACTIVE_DAYS_BEFORE_STOP: i64 = 7;

pub const DEFAULT_CLEANUP_DAYS: [&str; 7] = ["mo", "tu", "we", "th", "fr", "sa", "su"];
pub const DEFAULT_CLEANUP_START: &str = "06:00";
pub const DEFAULT_CLEANUP_END: &str = "09:00";
pub const DEFAULT_CLEANUP_PERIOD: Duration = Duration::from_secs(30 * 60);

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const CONFIG_PATH_ENV: &str = "RECLAIM_CONFIG";

pub const RESERVED_APPLICATIONS: [&str; 15] = [
    "radix-api",
    "radix-public-site",
    "radix-web-console",
    "radix-vulnerability-scanner",
    "radix-github-webhook",
    "radix-canary-golang",
    "radix-vulnerability-scanner-api",
    "radix-servicenow-proxy",
    "radix-networkpolicy-canary",
    "radix-cost-allocation-api",
    "radix-log-api",
    "canarycicd-test1",
    "canarycicd-test2",
    "canarycicd-test3",
    "canarycicd-test4",
];
