mod error;
mod runner;
mod ticker;
mod window;

pub use error::{Result, ScheduleError};
pub use runner::{PeriodicRunner, RunSummary};
pub use ticker::{JitterTicker, TickSource};
pub use window::{TimeWindow, parse_weekday};

pub use tokio_util::sync::CancellationToken;
