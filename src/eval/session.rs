//! One-shot evaluation of a query image against a reference.
//!
//! Both images are loaded and validated once; SNR and RMSE are then reduced
//! from the same buffers. The buffers are dropped when evaluation returns,
//! including on error.

use std::path::Path;

use crate::decode::load_image;
use crate::error::Result;
use crate::eval::report::MetricReport;
use crate::metrics::{
    Accumulator, MetricConfig, RmseAccumulator, SnrAccumulator, bordered_metrics,
    compute_metric_for_images,
};
use crate::raster::FloatImage;

/// Load two images and evaluate them.
///
/// See [`evaluate_images`].
///
/// # Example
///
/// ```ignore
/// use snr_eval::{MetricConfig, evaluate_files};
///
/// let report = evaluate_files("render.exr", "reference.exr", &MetricConfig::default(), false)?;
/// println!("{report}");
/// ```
pub fn evaluate_files(
    query_path: impl AsRef<Path>,
    reference_path: impl AsRef<Path>,
    config: &MetricConfig,
    bordered: bool,
) -> Result<MetricReport> {
    let query = load_image(query_path)?;
    let reference = load_image(reference_path)?;
    evaluate_images(&query, &reference, config, bordered)
}

/// Compute SNR and RMSE between two images.
///
/// The border-limited SNR/PSNR block is added only when `bordered` is set;
/// `config.border` has no effect otherwise.
///
/// # Errors
///
/// Any error from [`compute_metric_for_images`] or [`bordered_metrics`].
pub fn evaluate_images(
    query: &FloatImage,
    reference: &FloatImage,
    config: &MetricConfig,
    bordered: bool,
) -> Result<MetricReport> {
    let snr: SnrAccumulator = compute_metric_for_images(query, reference, config)?;
    let rmse: RmseAccumulator = compute_metric_for_images(query, reference, config)?;

    let bordered = if bordered {
        Some(bordered_metrics(query, reference, config)?)
    } else {
        None
    };

    log::debug!(
        "{} vs {}: signal mean {}, error mean {}, {} samples",
        query.name(),
        reference.name(),
        snr.signal_mean(),
        snr.error_mean(),
        snr.samples()
    );

    Ok(MetricReport {
        query: query.name().to_string(),
        reference: reference.name().to_string(),
        width: reference.width(),
        height: reference.height(),
        channel_names: reference.channel_names().to_vec(),
        config: config.clone(),
        snr: snr.result(),
        rmse: rmse.result(),
        max_error: rmse.max_error(),
        samples: rmse.samples(),
        skipped: rmse.skipped(),
        bordered,
        timestamp: chrono::Utc::now(),
    })
}
