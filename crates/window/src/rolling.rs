use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tally_clock::{ClockSource, SystemClock};

use crate::config::WindowConfig;
use crate::error::{validate_dimensions, WindowError};
use crate::evictor::Evictor;
use crate::ring::{Bucket, BucketRing};
use crate::stats::{MovingAverage, WindowStats};

pub(crate) struct Shared {
    pub(crate) ring: BucketRing,
    /// Time of the last eviction tick (construction time before the first).
    pub(crate) anchor: DateTime<Utc>,
    pub(crate) stopped: bool,
}

/// Moving statistics over the last `window` of samples, kept as one bucket
/// per `granularity`. A background evictor rotates the buckets on every
/// tick, so the window must be created inside a tokio runtime.
///
/// Statistics are computed over bucket sums, not individual samples.
pub struct RollingWindow {
    window: Duration,
    granularity: Duration,
    shared: Arc<RwLock<Shared>>,
    evictor: Mutex<Option<Evictor>>,
}

impl RollingWindow {
    pub fn new(window: Duration, granularity: Duration) -> Result<Self, WindowError> {
        Self::with_clock(window, granularity, &SystemClock)
    }

    pub fn with_clock(
        window: Duration,
        granularity: Duration,
        clock: &dyn ClockSource,
    ) -> Result<Self, WindowError> {
        let size = validate_dimensions(window, granularity)?;

        let shared = Arc::new(RwLock::new(Shared {
            ring: BucketRing::new(size),
            anchor: clock.now(),
            stopped: false,
        }));
        let evictor = Evictor::spawn(shared.clone(), clock.ticker(granularity));

        tracing::debug!(
            size,
            window_ms = window.as_millis(),
            granularity_ms = granularity.as_millis(),
            "rolling window started"
        );

        Ok(Self {
            window,
            granularity,
            shared,
            evictor: Mutex::new(Some(evictor)),
        })
    }

    pub fn from_config(config: &WindowConfig) -> Result<Self, WindowError> {
        Self::new(config.window(), config.granularity())
    }

    pub fn from_config_with_clock(
        config: &WindowConfig,
        clock: &dyn ClockSource,
    ) -> Result<Self, WindowError> {
        Self::with_clock(config.window(), config.granularity(), clock)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn granularity(&self) -> Duration {
        self.granularity
    }

    pub fn size(&self) -> usize {
        self.read().ring.size()
    }

    pub fn is_stopped(&self) -> bool {
        self.read().stopped
    }

    /// Adds a sample to the current bucket.
    pub fn insert(&self, value: f64) {
        let mut state = self.write();
        if state.stopped {
            return;
        }
        state.ring.record(value);
    }

    /// Adds a sample to the bucket its timestamp falls into, counted back
    /// from the last tick. Samples older than `anchor - window` are dropped;
    /// one exactly `window` old wraps onto the current bucket. Future-dated
    /// samples are clamped into the current bucket rather than indexed
    /// forward from head.
    pub fn insert_at(&self, value: f64, timestamp: DateTime<Utc>) {
        let mut state = self.write();
        if state.stopped {
            return;
        }

        let elapsed = match state.anchor.signed_duration_since(timestamp).to_std() {
            Ok(elapsed) => elapsed,
            Err(_) => Duration::ZERO,
        };
        if elapsed > self.window {
            tracing::debug!(
                %timestamp,
                anchor = %state.anchor,
                elapsed_ms = elapsed.as_millis(),
                "dropping sample older than window"
            );
            return;
        }
        let size = state.ring.size();
        let age = (elapsed.as_nanos() / self.granularity.as_nanos()) as usize % size;
        state.ring.record_back(age, value);
    }

    pub fn count(&self) -> i64 {
        self.read().ring.count()
    }

    /// Total of all buckets divided by the bucket count, populated or not.
    pub fn average(&self) -> f64 {
        average_of(&self.read().ring)
    }

    /// Mean over the most recent `sub_window / granularity` buckets.
    pub fn average_since(&self, sub_window: Duration) -> Result<f64, WindowError> {
        if sub_window > self.window {
            return Err(WindowError::WindowTooLarge {
                requested: sub_window,
                window: self.window,
            });
        }
        let n = (sub_window.as_nanos() / self.granularity.as_nanos()) as usize;
        if n == 0 {
            return Ok(0.0);
        }
        Ok(self.read().ring.trailing_sum(n) / n as f64)
    }

    pub fn max(&self) -> f64 {
        self.read().ring.max()
    }

    /// Smallest bucket sum; ties resolve to the last such bucket.
    pub fn min(&self) -> f64 {
        self.read().ring.min()
    }

    pub fn snapshot(&self) -> WindowStats {
        let state = self.read();
        WindowStats {
            count: state.ring.count(),
            average: average_of(&state.ring),
            max: state.ring.max(),
            min: state.ring.min(),
        }
    }

    /// Copy of the buckets in ring order, together with the head index.
    pub fn buckets(&self) -> (Vec<Bucket>, usize) {
        let state = self.read();
        (state.ring.buckets().to_vec(), state.ring.head())
    }

    /// Stops accepting samples and waits for the evictor to exit. Further
    /// calls return immediately.
    pub async fn stop(&self) {
        self.write().stopped = true;

        let evictor = self
            .evictor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(evictor) = evictor {
            evictor.shutdown().await;
            tracing::debug!("rolling window stopped");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Shared> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shared> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn average_of(ring: &BucketRing) -> f64 {
    let total = ring.sum();
    if total == 0.0 {
        return total;
    }
    total / ring.size() as f64
}

impl MovingAverage for RollingWindow {
    fn add(&mut self, value: f64) {
        self.insert(value);
    }

    fn average(&self) -> f64 {
        RollingWindow::average(self)
    }

    fn max(&self) -> f64 {
        RollingWindow::max(self)
    }

    fn min(&self) -> f64 {
        RollingWindow::min(self)
    }
}

impl std::fmt::Debug for RollingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("RollingWindow")
            .field("window", &self.window)
            .field("granularity", &self.granularity)
            .field("head", &state.ring.head())
            .field("anchor", &state.anchor)
            .field("stopped", &state.stopped)
            .finish()
    }
}
