//! Pixel reduction driver.
//!
//! Validates that two images can be compared, then feeds every pixel pair,
//! in row-major order, to an [`Accumulator`].

use std::path::Path;

use rayon::prelude::*;

use crate::decode::load_image;
use crate::error::{Error, Result};
use crate::metrics::{Accumulator, MetricConfig, Sample};
use crate::raster::FloatImage;

/// Load two images and compute a metric between them.
///
/// # Example
///
/// ```ignore
/// use snr_eval::metrics::{MetricConfig, RmseAccumulator, compute_metric};
///
/// let rmse = compute_metric::<RmseAccumulator>("render.exr", "reference.exr", &MetricConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`Error::Decode`] if either file fails to load, and any error of
/// [`compute_metric_for_images`].
pub fn compute_metric<A: Accumulator>(
    query_path: impl AsRef<Path>,
    reference_path: impl AsRef<Path>,
    config: &MetricConfig,
) -> Result<f64> {
    let query = load_image(query_path)?;
    let reference = load_image(reference_path)?;
    let acc = compute_metric_for_images::<A>(&query, &reference, config)?;
    Ok(acc.result())
}

/// Compute a metric between two decoded images.
///
/// Returns the filled accumulator so callers can read diagnostics besides
/// [`Accumulator::result`].
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if the images differ in size, channel count, or
///   (with `strict_channel_names`) channel names. Raised before any pixel is read.
/// - [`Error::UnsupportedChannels`] if the channel policy needs more channels.
/// - [`Error::NoValidPixels`] if no pixel contributed.
pub fn compute_metric_for_images<A: Accumulator>(
    query: &FloatImage,
    reference: &FloatImage,
    config: &MetricConfig,
) -> Result<A> {
    validate_shape(query, reference, config.strict_channel_names)?;
    let channels = config.channels.used_channels(reference.channels())?;

    let acc: A = if config.parallel {
        reduce_parallel(query, reference, channels, config)
    } else {
        reduce(query, reference, channels, config)
    };

    if acc.skipped() > 0 {
        log::warn!(
            "Skipped {} of {} pixels containing NaN ({} vs {})",
            acc.skipped(),
            reference.pixel_count(),
            query.name(),
            reference.name()
        );
    }

    if acc.samples() == 0 {
        return Err(Error::NoValidPixels {
            skipped: acc.skipped(),
        });
    }

    Ok(acc)
}

/// Check that two images have the same width, height, and channel count.
///
/// With `strict_names`, channel names must also match position by position.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] describing the first difference found.
pub fn validate_shape(query: &FloatImage, reference: &FloatImage, strict_names: bool) -> Result<()> {
    let mismatch = |detail: String| Error::ShapeMismatch {
        query: query.name().to_string(),
        reference: reference.name().to_string(),
        detail,
    };

    if query.width() != reference.width() || query.height() != reference.height() {
        return Err(mismatch(format!(
            "dimensions {}x{} vs {}x{}",
            query.width(),
            query.height(),
            reference.width(),
            reference.height()
        )));
    }

    if query.channels() != reference.channels() {
        return Err(mismatch(format!(
            "channel count {} vs {}",
            query.channels(),
            reference.channels()
        )));
    }

    if strict_names {
        let names = query.channel_names().iter().zip(reference.channel_names());
        if let Some((i, (q, r))) = names.enumerate().find(|(_, (q, r))| q != r) {
            return Err(mismatch(format!("channel {i} named '{q}' vs '{r}'")));
        }
    }

    Ok(())
}

fn reduce<A: Accumulator>(
    query: &FloatImage,
    reference: &FloatImage,
    channels: usize,
    config: &MetricConfig,
) -> A {
    let mut acc = A::new(channels, config);
    for index in 0..reference.pixel_count() {
        scan_pixel(&mut acc, query, reference, index, channels);
    }
    acc
}

fn reduce_parallel<A: Accumulator>(
    query: &FloatImage,
    reference: &FloatImage,
    channels: usize,
    config: &MetricConfig,
) -> A {
    (0..reference.pixel_count())
        .into_par_iter()
        .fold(
            || A::new(channels, config),
            |mut acc, index| {
                scan_pixel(&mut acc, query, reference, index, channels);
                acc
            },
        )
        .reduce(
            || A::new(channels, config),
            |mut left, right| {
                left.merge(right);
                left
            },
        )
}

fn scan_pixel<A: Accumulator>(
    acc: &mut A,
    query: &FloatImage,
    reference: &FloatImage,
    index: usize,
    channels: usize,
) {
    let q = &query.pixel(index)[..channels];
    let r = &reference.pixel(index)[..channels];

    if acc.update(q, r) == Sample::SkippedNan {
        let width = reference.width();
        log::debug!("NaN at pixel ({}, {}), skipping", index % width, index / width);
    }
}
