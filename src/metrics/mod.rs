//! Quality metrics for comparing a query image against a reference.
//!
//! Metrics are computed by streaming paired pixels through an
//! [`Accumulator`]. Supported metrics:
//!
//! - **SNR**: mean reference signal power over mean error power (higher is better)
//! - **RMSE**: root of the mean per-pixel squared error (lower is better, 0 = identical)
//! - **PSNR**: peak signal over mean error, from [`bordered`]
//!
//! ## Channels
//!
//! Per-pixel error and signal are averaged over the channels selected by
//! [`ChannelPolicy`]. The default uses the first three channels and rejects
//! images that have fewer.
//!
//! ## NaN handling
//!
//! The accumulators skip any pixel with a NaN in a used channel of either
//! image. Skipped pixels do not contribute to the means and are counted
//! separately. [`bordered`] does not skip.

pub mod bordered;
pub mod engine;
pub mod error_map;
pub mod rmse;
pub mod snr;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use bordered::{BorderedReport, bordered_metrics};
pub use engine::{compute_metric, compute_metric_for_images, validate_shape};
pub use rmse::RmseAccumulator;
pub use snr::SnrAccumulator;

/// Outcome of feeding one pixel pair to an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The pixel contributed to the statistics.
    Counted,
    /// The pixel held a NaN and was left out.
    SkippedNan,
}

/// A per-pixel reduction producing one scalar.
///
/// Implementations receive only the used channels of each pixel, so
/// `query.len() == reference.len() == channels` as passed to [`Accumulator::new`].
pub trait Accumulator: Sized + Send {
    /// Create an empty accumulator for pixels of `channels` values.
    fn new(channels: usize, config: &MetricConfig) -> Self;

    /// Feed one pixel pair.
    fn update(&mut self, query: &[f32], reference: &[f32]) -> Sample;

    /// Absorb an accumulator that saw a disjoint set of pixels.
    fn merge(&mut self, other: Self);

    /// Pixels that contributed to the statistics.
    fn samples(&self) -> u64;

    /// Pixels skipped because of NaN values.
    fn skipped(&self) -> u64;

    /// The metric value.
    fn result(&self) -> f64;
}

/// How an SNR ratio is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnrUnit {
    /// Plain power ratio, `signal / error`.
    #[default]
    Linear,
    /// Decibels, `10 * log10(signal / error)`.
    DecibelLog10,
}

impl SnrUnit {
    /// Express a linear power ratio in this unit.
    #[must_use]
    pub fn apply(self, ratio: f64) -> f64 {
        match self {
            Self::Linear => ratio,
            Self::DecibelLog10 => 10.0 * ratio.log10(),
        }
    }

    /// Unit suffix for display ("" or "dB").
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Linear => "",
            Self::DecibelLog10 => "dB",
        }
    }
}

impl fmt::Display for SnrUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::DecibelLog10 => write!(f, "db"),
        }
    }
}

impl FromStr for SnrUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "ratio" => Ok(Self::Linear),
            "db" | "decibel" | "log10" => Ok(Self::DecibelLog10),
            other => Err(format!("unknown SNR unit '{other}' (expected linear or db)")),
        }
    }
}

/// Which channels of each pixel the metrics average over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    /// The first three channels; extra channels such as alpha are ignored.
    #[default]
    Rgb,
    /// Every channel of the image.
    All,
}

impl ChannelPolicy {
    /// Number of leading channels to use for an image with `available` channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if the image has too few channels.
    pub fn used_channels(self, available: usize) -> Result<usize> {
        let required = match self {
            Self::Rgb => 3,
            Self::All => 1,
        };
        if available < required {
            return Err(Error::UnsupportedChannels {
                channels: available,
                required,
            });
        }
        Ok(match self {
            Self::Rgb => 3,
            Self::All => available,
        })
    }
}

impl fmt::Display for ChannelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "rgb"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for ChannelPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "all" => Ok(Self::All),
            other => Err(format!("unknown channel policy '{other}' (expected rgb or all)")),
        }
    }
}

/// Settings shared by every metric computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Unit of the SNR result.
    pub snr_unit: SnrUnit,
    /// Channels averaged per pixel.
    pub channels: ChannelPolicy,
    /// Require channel names to match position by position.
    pub strict_channel_names: bool,
    /// Margin in pixels excluded on every edge by the bordered metrics.
    pub border: usize,
    /// Split the pixel scan across the rayon thread pool.
    pub parallel: bool,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            snr_unit: SnrUnit::default(),
            channels: ChannelPolicy::default(),
            strict_channel_names: true,
            border: 0,
            parallel: false,
        }
    }
}

impl MetricConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> MetricConfigBuilder {
        MetricConfigBuilder::default()
    }
}

/// Builder for [`MetricConfig`].
#[derive(Debug, Default)]
pub struct MetricConfigBuilder {
    snr_unit: Option<SnrUnit>,
    channels: Option<ChannelPolicy>,
    strict_channel_names: Option<bool>,
    border: Option<usize>,
    parallel: Option<bool>,
}

impl MetricConfigBuilder {
    /// Set the SNR unit.
    #[must_use]
    pub fn snr_unit(mut self, unit: SnrUnit) -> Self {
        self.snr_unit = Some(unit);
        self
    }

    /// Set the channel policy.
    #[must_use]
    pub fn channels(mut self, policy: ChannelPolicy) -> Self {
        self.channels = Some(policy);
        self
    }

    /// Enable or disable the positional channel-name check.
    #[must_use]
    pub fn strict_channel_names(mut self, strict: bool) -> Self {
        self.strict_channel_names = Some(strict);
        self
    }

    /// Set the border margin used by the bordered metrics.
    #[must_use]
    pub fn border(mut self, border: usize) -> Self {
        self.border = Some(border);
        self
    }

    /// Enable or disable the parallel scan.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> MetricConfig {
        let defaults = MetricConfig::default();
        MetricConfig {
            snr_unit: self.snr_unit.unwrap_or(defaults.snr_unit),
            channels: self.channels.unwrap_or(defaults.channels),
            strict_channel_names: self
                .strict_channel_names
                .unwrap_or(defaults.strict_channel_names),
            border: self.border.unwrap_or(defaults.border),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        }
    }
}

/// Whether any value of either pixel is NaN.
pub(crate) fn has_nan(query: &[f32], reference: &[f32]) -> bool {
    query.iter().chain(reference).any(|v| v.is_nan())
}

/// Squared difference averaged over channels.
pub(crate) fn mean_squared_error(query: &[f32], reference: &[f32]) -> f64 {
    let sum: f64 = query
        .iter()
        .zip(reference)
        .map(|(&q, &r)| {
            let d = f64::from(r) - f64::from(q);
            d * d
        })
        .sum();
    sum / reference.len() as f64
}

/// Squared value averaged over channels.
pub(crate) fn mean_square(pixel: &[f32]) -> f64 {
    let sum: f64 = pixel.iter().map(|&v| f64::from(v) * f64::from(v)).sum();
    sum / pixel.len() as f64
}
