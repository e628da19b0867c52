//! Image loading.
//!
//! Decoding is delegated to the `image` crate. OpenEXR and Radiance HDR files
//! keep their float values as stored; 8- and 16-bit formats are normalised to
//! `0.0..=1.0` by the decoder.
//!
//! # Example
//!
//! ```ignore
//! use snr_eval::decode::load_image;
//!
//! let reference = load_image("reference.exr")?;
//! println!("{}x{} {:?}", reference.width(), reference.height(), reference.channel_names());
//! ```

use std::path::Path;

use image::{ImageReader, Limits};

use crate::error::{Error, Result};
use crate::raster::{FloatImage, rgb_names, rgba_names};

/// Decode an image file into a [`FloatImage`].
///
/// Images with an alpha channel load as `R, G, B, A`; everything else,
/// grayscale included, loads as `R, G, B`. The returned image is named after
/// `path`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file is missing, malformed, or in a format
/// the decoder does not support.
pub fn load_image(path: impl AsRef<Path>) -> Result<FloatImage> {
    let path = path.as_ref();

    let decode_err = |reason: String| Error::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(e.to_string()))?;
    reader.limits(decode_limits());
    let decoded = reader.decode().map_err(|e| decode_err(e.to_string()))?;

    let has_alpha = decoded.color().has_alpha();
    let (width, height, names, data) = if has_alpha {
        let buf = decoded.into_rgba32f();
        (buf.width(), buf.height(), rgba_names(), buf.into_raw())
    } else {
        let buf = decoded.into_rgb32f();
        (buf.width(), buf.height(), rgb_names(), buf.into_raw())
    };

    log::debug!(
        "Loaded {}: {}x{}, {} channels",
        path.display(),
        width,
        height,
        names.len()
    );

    let image = FloatImage::from_interleaved(width as usize, height as usize, names, data)
        .map_err(|e| decode_err(e.to_string()))?;

    Ok(image.with_name(path.display().to_string()))
}

/// Allocation limits applied while decoding.
///
/// The decoder's default caps allocations at 512 MiB, which an 8K RGBA float
/// render already exceeds. Both images are held in memory anyway, so no cap
/// is applied here.
pub fn decode_limits() -> Limits {
    Limits::no_limits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb32FImage, Rgba32FImage};

    #[test]
    fn test_decode_limits_uncapped() {
        let limits = decode_limits();
        assert_eq!(limits.max_alloc, None);
        assert_eq!(limits.max_image_width, None);
        assert_eq!(limits.max_image_height, None);

        // An 8K RGBA f32 frame is over the decoder's default cap
        let frame_bytes = 7680_u64 * 4320 * 4 * 4;
        let default_cap = Limits::default().max_alloc.unwrap();
        assert!(frame_bytes > default_cap);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image("/nonexistent/definitely_missing.exr");
        match result {
            Err(Error::Decode { path, .. }) => {
                assert!(path.ends_with("definitely_missing.exr"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.exr");
        std::fs::write(&path, b"this is not an image").unwrap();

        assert!(matches!(load_image(&path), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_load_rgb_exr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.exr");

        let data = vec![
            0.25, 0.5, 2.0, //
            1.5, 0.0, 0.75, //
        ];
        let buf = Rgb32FImage::from_raw(2, 1, data.clone()).unwrap();
        DynamicImage::ImageRgb32F(buf).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
        assert_eq!(img.channel_names(), &["R", "G", "B"]);
        // EXR keeps values above 1.0
        assert_eq!(img.data(), data.as_slice());
        assert_eq!(img.name(), path.display().to_string());
    }

    #[test]
    fn test_load_rgba_exr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.exr");

        let buf = Rgba32FImage::from_raw(1, 2, vec![0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 0.5]).unwrap();
        DynamicImage::ImageRgba32F(buf).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.channels(), 4);
        assert_eq!(img.channel_names(), &["R", "G", "B", "A"]);
        assert_eq!(img.pixel(1), &[0.4, 0.5, 0.6, 0.5]);
    }
}
