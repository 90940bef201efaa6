use std::sync::{Arc, PoisonError, RwLock};

use tally_clock::Ticker;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::rolling::Shared;

/// Background task that rotates the ring once per tick.
pub(crate) struct Evictor {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Evictor {
    pub(crate) fn spawn(shared: Arc<RwLock<Shared>>, mut ticker: Box<dyn Ticker>) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    // also resolves when the owning window is dropped
                    _ = &mut stop_rx => break,
                    tick = ticker.next_tick() => {
                        let Some(tick) = tick else {
                            tracing::debug!("tick source closed");
                            break;
                        };
                        {
                            let mut state = shared.write().unwrap_or_else(PoisonError::into_inner);
                            state.ring.advance();
                            state.anchor = tick.at();
                            tracing::trace!(head = state.ring.head(), anchor = %state.anchor, "bucket evicted");
                        }
                        tick.complete();
                    }
                }
            }
            ticker.stop();
            tracing::debug!("evictor stopped");
        });

        Self { stop_tx, handle }
    }

    /// Hands the stop signal over without blocking, then waits for the task
    /// to exit. Must not be called while holding the data lock.
    pub(crate) async fn shutdown(self) {
        let Self { stop_tx, handle } = self;
        let _ = stop_tx.send(());
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "evictor task ended abnormally");
        }
    }
}
