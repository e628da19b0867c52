//! Running statistics for pixel reductions.
//!
//! - [`RunningMean`]: incremental mean that can be merged across partitions

use serde::{Deserialize, Serialize};

/// Incrementally updated arithmetic mean.
///
/// Each push applies `mean = (mean * n + x) / (n + 1)`, written as
/// `mean += (x - mean) / (n + 1)` so the stored value stays in the range of
/// the samples rather than growing with the image size.
///
/// # Example
///
/// ```
/// use snr_eval::stats::RunningMean;
///
/// let mut m = RunningMean::new();
/// m.push(1.0);
/// m.push(3.0);
/// assert_eq!(m.count(), 2);
/// assert!((m.mean() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningMean {
    mean: f64,
    count: u64,
}

impl RunningMean {
    /// An empty mean (zero samples, mean 0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        self.mean += (x - self.mean) / self.count as f64;
    }

    /// Combine with a mean computed over a disjoint set of samples.
    ///
    /// Uses the count-weighted rule `(m1*n1 + m2*n2) / (n1 + n2)`, so merging
    /// partitions in any grouping gives the same result up to rounding. An
    /// empty side is the identity.
    pub fn merge(&mut self, other: Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other;
            return;
        }
        let total = self.count + other.count;
        self.mean = (self.mean * self.count as f64 + other.mean * other.count as f64) / total as f64;
        self.count = total;
    }

    /// Current mean; 0 when no samples were pushed.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of samples pushed or merged in.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether no samples have been seen.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn running(values: &[f64]) -> RunningMean {
        let mut m = RunningMean::new();
        for &v in values {
            m.push(v);
        }
        m
    }

    #[test]
    fn test_running_matches_naive() {
        let values: Vec<f64> = (0..1000).map(|i| (f64::from(i) * 0.37).sin().abs()).collect();
        let m = running(&values);
        assert_eq!(m.count(), 1000);
        assert!((m.mean() - naive_mean(&values)).abs() < 1e-12);
    }

    #[test]
    fn test_running_order_independent() {
        let values: Vec<f64> = (0..257).map(|i| f64::from(i) * 1e-3 + 0.5).collect();
        let mut reversed = values.clone();
        reversed.reverse();

        let forward = running(&values);
        let backward = running(&reversed);
        assert!((forward.mean() - backward.mean()).abs() < 1e-12);
    }

    #[test]
    fn test_merge_weighted() {
        let mut a = running(&[1.0, 1.0, 1.0]);
        let b = running(&[5.0]);
        a.merge(b);
        assert_eq!(a.count(), 4);
        assert!((a.mean() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_groupings_agree() {
        let values: Vec<f64> = (0..90).map(|i| f64::from(i % 7) * 0.25).collect();
        let parts: Vec<RunningMean> = values.chunks(13).map(running).collect();

        let mut left = RunningMean::new();
        for p in &parts {
            left.merge(*p);
        }

        let mut right = RunningMean::new();
        for p in parts.iter().rev() {
            right.merge(*p);
        }

        assert_eq!(left.count(), 90);
        assert!((left.mean() - right.mean()).abs() < 1e-12);
        assert!((left.mean() - naive_mean(&values)).abs() < 1e-12);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut a = running(&[2.0, 4.0]);
        a.merge(RunningMean::new());
        assert_eq!(a, running(&[2.0, 4.0]));

        let mut empty = RunningMean::new();
        empty.merge(a);
        assert_eq!(empty, a);
    }

    #[test]
    fn test_empty() {
        let m = RunningMean::new();
        assert!(m.is_empty());
        assert_eq!(m.count(), 0);
    }
}
