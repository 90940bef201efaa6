use serde::Serialize;

/// Accumulated samples for one time slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bucket {
    pub sum: f64,
    pub count: i64,
}

impl Bucket {
    pub fn record(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
