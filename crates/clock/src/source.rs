use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

/// One periodic tick. Consumers call [`Tick::complete`] once they are done
/// with it so that a stepping clock can wait for the work to finish.
#[derive(Debug)]
pub struct Tick {
    at: DateTime<Utc>,
    ack: Option<oneshot::Sender<()>>,
}

impl Tick {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at, ack: None }
    }

    pub(crate) fn with_ack(at: DateTime<Utc>, ack: oneshot::Sender<()>) -> Self {
        Self { at, ack: Some(ack) }
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn complete(self) {
        if let Some(ack) = self.ack {
            let _ = ack.send(());
        }
    }
}

#[async_trait]
pub trait Ticker: Send {
    /// Waits for the next tick. `None` once the ticker is stopped or its
    /// source has gone away.
    async fn next_tick(&mut self) -> Option<Tick>;

    fn stop(&mut self);
}

pub trait ClockSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Must be called from within a tokio runtime.
    fn ticker(&self, period: Duration) -> Box<dyn Ticker>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_without_ack_is_noop() {
        let at = Utc::now();
        let tick = Tick::new(at);
        assert_eq!(tick.at(), at);
        tick.complete();
    }

    #[tokio::test]
    async fn complete_signals_ack() {
        let (tx, rx) = oneshot::channel();
        let tick = Tick::with_ack(Utc::now(), tx);
        tick.complete();
        assert!(rx.await.is_ok());
    }

    #[tokio::test]
    async fn dropped_tick_releases_waiter() {
        let (tx, rx) = oneshot::channel();
        drop(Tick::with_ack(Utc::now(), tx));
        assert!(rx.await.is_err());
    }
}
