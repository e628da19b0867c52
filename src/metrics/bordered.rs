//! Full-frame SNR and PSNR with an excluded border.
//!
//! Unlike the accumulators, this sums squared error and squared signal over
//! the measured region and divides once by its pixel count, so `signal` and
//! `error` are per-pixel sums over the channels rather than channel means.
//! NaN values are not skipped and propagate into the result.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::{MetricConfig, engine::validate_shape};
use crate::raster::FloatImage;

/// SNR and PSNR over the region inside the border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderedReport {
    /// Border margin that was excluded on each edge.
    pub border: usize,
    /// Pixels in the measured region.
    pub pixels: usize,
    /// Squared reference values summed over channels, averaged over pixels.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub signal: f64,
    /// Squared error summed over channels, averaged over pixels.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub error: f64,
    /// Largest reference value in the region (at least 0).
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub peak: f64,
    /// `signal / error`.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub snr: f64,
    /// `10 * log10(signal / error)`.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub snr_db: f64,
    /// `peak^2 / error`.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub psnr: f64,
    /// `10 * log10(peak^2 / error)`.
    #[serde(with = "crate::eval::report::lossless_f64")]
    pub psnr_db: f64,
}

/// Compute SNR and PSNR, ignoring `config.border` pixels along every edge.
///
/// Channels are chosen by `config.channels`. Identical images give infinite
/// ratios.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] / [`Error::UnsupportedChannels`] as for the accumulators.
/// - [`Error::InvalidBorder`] if the border leaves no pixels.
pub fn bordered_metrics(
    query: &FloatImage,
    reference: &FloatImage,
    config: &MetricConfig,
) -> Result<BorderedReport> {
    validate_shape(query, reference, config.strict_channel_names)?;
    let channels = config.channels.used_channels(reference.channels())?;

    let (width, height, border) = (reference.width(), reference.height(), config.border);
    if 2 * border >= width || 2 * border >= height {
        return Err(Error::InvalidBorder {
            border,
            width,
            height,
        });
    }

    let mut error = 0.0_f64;
    let mut signal = 0.0_f64;
    let mut peak = 0.0_f64;

    for y in border..height - border {
        for x in border..width - border {
            let q = &query.pixel_at(x, y)[..channels];
            let r = &reference.pixel_at(x, y)[..channels];
            for (&qc, &rc) in q.iter().zip(r) {
                let (qc, rc) = (f64::from(qc), f64::from(rc));
                error += (qc - rc) * (qc - rc);
                signal += rc * rc;
                peak = peak.max(rc);
            }
        }
    }

    let pixels = (width - 2 * border) * (height - 2 * border);
    let error = error / pixels as f64;
    let signal = signal / pixels as f64;

    Ok(BorderedReport {
        border,
        pixels,
        signal,
        error,
        peak,
        snr: signal / error,
        snr_db: 10.0 * (signal.log10() - error.log10()),
        psnr: peak * peak / error,
        psnr_db: 10.0 * ((peak * peak).log10() - error.log10()),
    })
}
