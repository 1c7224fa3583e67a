use crate::ticker::TickSource;
use crate::window::TimeWindow;
use chrono::{Local, TimeZone};
use std::fmt::Display;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub runs: usize,
}

pub struct PeriodicRunner<T, Tz: TimeZone = Local> {
    window: TimeWindow,
    ticker: T,
    cancel: CancellationToken,
    timezone: Tz,
}

impl<T: TickSource> PeriodicRunner<T, Local> {
    pub fn new(window: TimeWindow, ticker: T, cancel: CancellationToken) -> Self {
        Self {
            window,
            ticker,
            cancel,
            timezone: Local,
        }
    }
}

impl<T, Tz> PeriodicRunner<T, Tz>
where
    T: TickSource,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone<Z: TimeZone>(self, timezone: Z) -> PeriodicRunner<T, Z> {
        PeriodicRunner {
            window: self.window,
            ticker: self.ticker,
            cancel: self.cancel,
            timezone,
        }
    }

    /// Loops until the pipeline fails, the token is cancelled or the tick
    /// source ends. Each in-window tick runs the pipeline once to completion
    /// before the next tick is awaited.
    pub async fn run<F, Fut, E>(mut self, mut pipeline: F) -> Result<RunSummary, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        info!("Starting periodic cleanup in window {}", self.window);
        let mut summary = RunSummary::default();

        loop {
            let at = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!("Periodic cleanup cancelled");
                    break;
                }
                tick = self.ticker.tick() => match tick {
                    Some(at) => at,
                    None => {
                        warn!("Tick source ended, stopping periodic cleanup");
                        break;
                    }
                },
            };
            summary.ticks += 1;

            let local = at.with_timezone(&self.timezone);
            if !self.window.contains(&local) {
                info!("{} is outside of window {}. Continue sleeping", local, self.window);
                continue;
            }

            info!("{} is inside window {}. Starting cleanup", local, self.window);
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!("Periodic cleanup cancelled while running");
                    break;
                }
                result = pipeline() => {
                    result?;
                    summary.runs += 1;
                }
            }
        }

        Ok(summary)
    }
}
