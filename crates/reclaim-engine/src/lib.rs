pub mod activity;
mod actions;
mod clock;
mod error;
mod events;
mod scanner;
mod whitelist;

pub use actions::{
    ActionSummary, delete_inactive, list_candidates, scale_to_zero, stop_and_delete_inactive,
    stop_inactive, stop_registration,
};
pub use activity::InactivityPolicy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EngineError, Result};
pub use events::{Event, Observer, TracingObserver};
pub use scanner::{find_inactive_registrations, list_deployments_in_namespaces};
pub use whitelist::{Whitelist, is_whitelisted};

use chrono::TimeDelta;
use reclaim_cluster::ClusterClient;
use reclaim_config::Thresholds;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stop,
    Deletion,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Stop => "stop",
            Action::Deletion => "deletion",
        }
    }

    pub fn threshold(&self, thresholds: &Thresholds) -> TimeDelta {
        match self {
            Action::Stop => thresholds.stop,
            Action::Deletion => thresholds.deletion,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone)]
pub struct EngineContext {
    pub client: Arc<dyn ClusterClient>,
    pub whitelist: Arc<Whitelist>,
    pub thresholds: Thresholds,
    pub clock: Arc<dyn Clock>,
    pub observer: Arc<dyn Observer>,
    pub dry_run: bool,
}
