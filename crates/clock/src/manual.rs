use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{mpsc, oneshot};

use crate::source::{ClockSource, Tick, Ticker};

/// Clock that only moves when told to. Intended for tests.
///
/// Each call to [`ManualClock::tick`] advances the clock by the period of the
/// most recently created ticker and resolves only after the consumer has
/// completed the tick, so assertions made afterwards never race the consumer.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    now: DateTime<Utc>,
    period: TimeDelta,
    tx: Option<mpsc::Sender<Tick>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualState {
                now: start,
                period: TimeDelta::zero(),
                tx: None,
            })),
        }
    }

    /// Advances by one period and delivers a tick. Returns `false` when no
    /// ticker is attached or the consumer is gone before finishing the tick.
    pub async fn tick(&self) -> bool {
        let (tx, at) = {
            let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(tx) = state.tx.clone() else {
                return false;
            };
            let period = state.period;
            state.now += period;
            (tx, state.now)
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        if tx.send(Tick::with_ack(at, ack_tx)).await.is_err() {
            return false;
        }
        ack_rx.await.is_ok()
    }

    pub async fn tick_n(&self, n: usize) -> bool {
        for _ in 0..n {
            if !self.tick().await {
                return false;
            }
        }
        true
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .now
    }

    fn ticker(&self, period: Duration) -> Box<dyn Ticker> {
        let (tx, rx) = mpsc::channel(1);
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.period = TimeDelta::from_std(period).unwrap_or(TimeDelta::MAX);
        state.tx = Some(tx);
        Box::new(ManualTicker { rx })
    }
}

struct ManualTicker {
    rx: mpsc::Receiver<Tick>,
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn next_tick(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }

    fn stop(&mut self) {
        self.rx.close();
    }
}
