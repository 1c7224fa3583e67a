use crate::error::{Result, ScheduleError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[async_trait]
pub trait TickSource: Send {
    async fn tick(&mut self) -> Option<DateTime<Utc>>;
}

/// Ticks once per period, starting after a random delay within the first
/// period so that replicas started together spread out.
pub struct JitterTicker {
    interval: Interval,
    jitter: Duration,
}

impl JitterTicker {
    pub fn new(period: Duration) -> Result<Self> {
        Self::with_rng(period, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(period: Duration, rng: &mut R) -> Result<Self> {
        if period.is_zero() {
            return Err(ScheduleError::ZeroPeriod);
        }

        let jitter = initial_delay(period, rng);
        let mut interval = time::interval_at(Instant::now() + jitter, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Ok(Self { interval, jitter })
    }

    pub fn jitter(&self) -> Duration {
        self.jitter
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[async_trait]
impl TickSource for JitterTicker {
    async fn tick(&mut self) -> Option<DateTime<Utc>> {
        self.interval.tick().await;
        Some(Utc::now())
    }
}

fn initial_delay<R: Rng + ?Sized>(period: Duration, rng: &mut R) -> Duration {
    let nanos = u64::try_from(period.as_nanos()).unwrap_or(u64::MAX);
    Duration::from_nanos(rng.gen_range(0..nanos))
}
