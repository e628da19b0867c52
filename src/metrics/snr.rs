//! Signal-to-noise ratio accumulator.

use crate::metrics::{
    Accumulator, MetricConfig, Sample, SnrUnit, has_nan, mean_square, mean_squared_error,
};
use crate::stats::RunningMean;

/// Running SNR between a query and a reference.
///
/// Signal is measured on the reference only, so swapping the two images
/// changes the result.
#[derive(Debug, Clone)]
pub struct SnrAccumulator {
    signal: RunningMean,
    error: RunningMean,
    skipped: u64,
    unit: SnrUnit,
}

impl SnrAccumulator {
    /// Mean per-pixel signal power of the reference.
    pub fn signal_mean(&self) -> f64 {
        self.signal.mean()
    }

    /// Mean per-pixel squared error.
    pub fn error_mean(&self) -> f64 {
        self.error.mean()
    }

    /// `signal_mean / error_mean`, or `+inf` when there is no error.
    pub fn ratio(&self) -> f64 {
        let error = self.error.mean();
        if error == 0.0 {
            f64::INFINITY
        } else {
            self.signal.mean() / error
        }
    }
}

impl Accumulator for SnrAccumulator {
    fn new(_channels: usize, config: &MetricConfig) -> Self {
        Self {
            signal: RunningMean::new(),
            error: RunningMean::new(),
            skipped: 0,
            unit: config.snr_unit,
        }
    }

    fn update(&mut self, query: &[f32], reference: &[f32]) -> Sample {
        if has_nan(query, reference) {
            self.skipped += 1;
            return Sample::SkippedNan;
        }

        self.error.push(mean_squared_error(query, reference));
        self.signal.push(mean_square(reference));
        Sample::Counted
    }

    fn merge(&mut self, other: Self) {
        self.signal.merge(other.signal);
        self.error.merge(other.error);
        self.skipped += other.skipped;
    }

    fn samples(&self) -> u64 {
        self.error.count()
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }

    /// SNR in the configured unit; `+inf` for identical images.
    fn result(&self) -> f64 {
        if self.samples() == 0 {
            return f64::NAN;
        }
        self.unit.apply(self.ratio())
    }
}
