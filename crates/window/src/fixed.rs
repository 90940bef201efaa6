use std::collections::VecDeque;

use crate::error::WindowError;
use crate::stats::MovingAverage;

/// The last `len` raw samples, oldest dropped first. Starts filled with
/// zeros, so early averages are pulled toward zero.
#[derive(Debug, Clone)]
pub struct FixedWindow {
    values: VecDeque<f64>,
}

impl FixedWindow {
    pub fn new(len: usize) -> Result<Self, WindowError> {
        if len == 0 {
            return Err(WindowError::InvalidWindow);
        }
        Ok(Self {
            values: std::iter::repeat(0.0).take(len).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn add(&mut self, value: f64) {
        self.values.pop_front();
        self.values.push_back(value);
    }

    pub fn average(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn max(&self) -> f64 {
        let first = self.values[0];
        self.values
            .iter()
            .fold(first, |max, &v| if v > max { v } else { max })
    }

    pub fn min(&self) -> f64 {
        let first = self.values[0];
        self.values
            .iter()
            .fold(first, |min, &v| if v <= min { v } else { min })
    }
}

impl MovingAverage for FixedWindow {
    fn add(&mut self, value: f64) {
        FixedWindow::add(self, value);
    }

    fn average(&self) -> f64 {
        FixedWindow::average(self)
    }

    fn max(&self) -> f64 {
        FixedWindow::max(self)
    }

    fn min(&self) -> f64 {
        FixedWindow::min(self)
    }
}
