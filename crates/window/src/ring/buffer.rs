use super::bucket::Bucket;

/// Fixed-size circle of buckets. `head` is the slice still being filled;
/// walking backwards from it visits progressively older slices.
#[derive(Debug, Clone)]
pub struct BucketRing {
    buckets: Vec<Bucket>,
    head: usize,
}

impl BucketRing {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "ring needs at least one bucket");
        Self {
            buckets: vec![Bucket::default(); size],
            head: 0,
        }
    }

    /// Ring with pre-filled sums, one sample per non-zero slot.
    #[cfg(test)]
    pub(crate) fn from_sums(sums: &[f64], head: usize) -> Self {
        assert!(!sums.is_empty(), "ring needs at least one bucket");
        assert!(head < sums.len(), "head out of range");
        let buckets = sums
            .iter()
            .map(|&sum| Bucket {
                sum,
                count: i64::from(sum != 0.0),
            })
            .collect();
        Self { buckets, head }
    }

    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Moves head one slot forward and clears the slot it lands on.
    pub fn advance(&mut self) {
        self.head = (self.head + 1) % self.buckets.len();
        self.buckets[self.head].reset();
    }

    /// Index of the bucket `age` slices behind head. `age` must be below size.
    pub fn index_back(&self, age: usize) -> usize {
        let size = self.buckets.len();
        debug_assert!(age < size);
        (self.head + size - age) % size
    }

    pub fn record(&mut self, value: f64) {
        self.buckets[self.head].record(value);
    }

    pub fn record_back(&mut self, age: usize, value: f64) {
        let idx = self.index_back(age);
        self.buckets[idx].record(value);
    }

    pub fn count(&self) -> i64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn sum(&self) -> f64 {
        self.buckets.iter().map(|b| b.sum).sum()
    }

    /// Sum over the `n` most recent slices, head included.
    pub fn trailing_sum(&self, n: usize) -> f64 {
        (0..n.min(self.buckets.len()))
            .map(|age| self.buckets[self.index_back(age)].sum)
            .sum()
    }

    pub fn max(&self) -> f64 {
        let first = self.buckets[0].sum;
        self.buckets
            .iter()
            .fold(first, |max, b| if b.sum > max { b.sum } else { max })
    }

    pub fn min(&self) -> f64 {
        let first = self.buckets[0].sum;
        self.buckets
            .iter()
            .fold(first, |min, b| if b.sum <= min { b.sum } else { min })
    }
}
