//! Root-mean-square error accumulator.

use crate::metrics::{Accumulator, MetricConfig, Sample, has_nan, mean_squared_error};
use crate::stats::RunningMean;

/// Running RMSE between a query and a reference.
///
/// Also tracks the largest per-pixel squared error for diagnostics; it does
/// not affect [`Accumulator::result`].
#[derive(Debug, Clone, Default)]
pub struct RmseAccumulator {
    sqr_error: RunningMean,
    error_max: f64,
    skipped: u64,
}

impl RmseAccumulator {
    /// Mean per-pixel squared error (the MSE).
    pub fn sqr_error_mean(&self) -> f64 {
        self.sqr_error.mean()
    }

    /// Largest per-pixel squared error seen.
    pub fn max_error(&self) -> f64 {
        self.error_max
    }
}

impl Accumulator for RmseAccumulator {
    fn new(_channels: usize, _config: &MetricConfig) -> Self {
        Self::default()
    }

    fn update(&mut self, query: &[f32], reference: &[f32]) -> Sample {
        if has_nan(query, reference) {
            self.skipped += 1;
            return Sample::SkippedNan;
        }

        let err = mean_squared_error(query, reference);
        self.error_max = self.error_max.max(err);
        self.sqr_error.push(err);
        Sample::Counted
    }

    fn merge(&mut self, other: Self) {
        self.sqr_error.merge(other.sqr_error);
        self.error_max = self.error_max.max(other.error_max);
        self.skipped += other.skipped;
    }

    fn samples(&self) -> u64 {
        self.sqr_error.count()
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }

    fn result(&self) -> f64 {
        if self.samples() == 0 {
            return f64::NAN;
        }
        self.sqr_error.mean().sqrt()
    }
}
