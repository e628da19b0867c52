//! Per-pixel error map for inspecting where two images differ.

use std::path::Path;

use image::{DynamicImage, Rgb32FImage};
use imgref::ImgVec;

use crate::error::{Error, Result};
use crate::metrics::{MetricConfig, engine::validate_shape, mean_squared_error};
use crate::raster::FloatImage;

/// Squared error of every pixel, averaged over the used channels.
///
/// Pixels holding a NaN produce NaN in the map.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] or [`Error::UnsupportedChannels`] under the
/// same rules as the metric engine.
pub fn error_map(
    query: &FloatImage,
    reference: &FloatImage,
    config: &MetricConfig,
) -> Result<ImgVec<f32>> {
    validate_shape(query, reference, config.strict_channel_names)?;
    let channels = config.channels.used_channels(reference.channels())?;

    let errors = (0..reference.pixel_count())
        .map(|i| {
            let q = &query.pixel(i)[..channels];
            let r = &reference.pixel(i)[..channels];
            mean_squared_error(q, r) as f32
        })
        .collect();

    Ok(ImgVec::new(errors, reference.width(), reference.height()))
}

/// Write an error map as a grey float image; the format follows the file
/// extension (use `.exr` to keep the values unclamped).
///
/// # Errors
///
/// Returns [`Error::ImageWrite`] if encoding or writing fails.
pub fn save_error_map(map: &ImgVec<f32>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let write_err = |reason: String| Error::ImageWrite {
        path: path.to_path_buf(),
        reason,
    };

    let data: Vec<f32> = map.pixels().flat_map(|e| [e, e, e]).collect();
    let buf = Rgb32FImage::from_raw(map.width() as u32, map.height() as u32, data)
        .ok_or_else(|| write_err("buffer does not match dimensions".to_string()))?;

    DynamicImage::ImageRgb32F(buf)
        .save(path)
        .map_err(|e| write_err(e.to_string()))?;

    log::info!("Wrote error map to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::load_image;

    fn pair() -> (FloatImage, FloatImage) {
        let reference = FloatImage::from_rgb(2, 1, &[[0.5, 0.5, 0.5], [1.0, 1.0, 1.0]]).unwrap();
        let query = FloatImage::from_rgb(2, 1, &[[0.5, 0.5, 0.5], [0.0, 1.0, 1.0]]).unwrap();
        (query, reference)
    }

    #[test]
    fn test_error_map_values() {
        let (query, reference) = pair();
        let map = error_map(&query, &reference, &MetricConfig::default()).unwrap();

        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 1);
        let values: Vec<f32> = map.pixels().collect();
        assert_eq!(values[0], 0.0);
        assert!((values[1] - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_error_map_nan() {
        let (base, reference) = pair();
        let mut data = base.data().to_vec();
        data[0] = f32::NAN;
        let query = FloatImage::from_interleaved(2, 1, base.channel_names().to_vec(), data).unwrap();

        let map = error_map(&query, &reference, &MetricConfig::default()).unwrap();
        assert!(map.pixels().next().unwrap().is_nan());
    }

    #[test]
    fn test_save_error_map_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.exr");

        let (query, reference) = pair();
        let map = error_map(&query, &reference, &MetricConfig::default()).unwrap();
        save_error_map(&map, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.width(), 2);
        assert_eq!(loaded.channels(), 3);
        let second = loaded.pixel(1);
        assert!((second[0] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(second[0], second[2]);
    }

    #[test]
    fn test_save_error_map_bad_path() {
        let map = ImgVec::new(vec![0.0_f32; 4], 2, 2);
        let result = save_error_map(&map, "/nonexistent/dir/error.exr");
        assert!(matches!(result, Err(Error::ImageWrite { .. })));
    }
}
