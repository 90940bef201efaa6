use serde::Serialize;

/// Common surface of the time-bucketed and the fixed-length windows.
pub trait MovingAverage {
    fn add(&mut self, value: f64);
    fn average(&self) -> f64;
    fn max(&self) -> f64;
    fn min(&self) -> f64;
}

/// Point-in-time view of a rolling window, read under one lock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: i64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}
