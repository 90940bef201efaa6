use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::source::{ClockSource, Tick, Ticker};

/// Wall clock backed by tokio timers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn ticker(&self, period: Duration) -> Box<dyn Ticker> {
        Box::new(SystemTicker::new(period))
    }
}

pub struct SystemTicker {
    interval: Interval,
    stopped: bool,
}

impl SystemTicker {
    fn new(period: Duration) -> Self {
        // first tick lands one full period after creation
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self {
            interval,
            stopped: false,
        }
    }
}

#[async_trait]
impl Ticker for SystemTicker {
    async fn next_tick(&mut self) -> Option<Tick> {
        if self.stopped {
            return None;
        }
        self.interval.tick().await;
        Some(Tick::new(Utc::now()))
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
