//! Owned floating-point rasters.
//!
//! A [`FloatImage`] stores every channel of a pixel next to each other
//! (interleaved), rows top to bottom. Pixel `i` occupies
//! `data[i * channels .. (i + 1) * channels]`.

use crate::error::{Error, Result};

/// A multi-channel `f32` image.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    name: String,
    width: usize,
    height: usize,
    channel_names: Vec<String>,
    data: Vec<f32>,
}

impl FloatImage {
    /// Build an image from an interleaved buffer.
    ///
    /// The channel count is `channel_names.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if `data.len()` is not
    /// `width * height * channel_names.len()`.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channel_names: Vec<String>,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = width * height * channel_names.len();
        if data.len() != expected {
            return Err(Error::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            name: String::from("<memory>"),
            width,
            height,
            channel_names,
            data,
        })
    }

    /// Build an RGB image from `(r, g, b)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if `pixels.len() != width * height`.
    pub fn from_rgb(width: usize, height: usize, pixels: &[[f32; 3]]) -> Result<Self> {
        let data = pixels.iter().flatten().copied().collect();
        Self::from_interleaved(width, height, rgb_names(), data)
    }

    /// Attach a display name, usually the source path.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> usize {
        self.channel_names.len()
    }

    /// Channel names in storage order.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// The interleaved sample buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// All channels of the pixel at linear index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= pixel_count()`.
    pub fn pixel(&self, index: usize) -> &[f32] {
        let c = self.channels();
        &self.data[index * c..(index + 1) * c]
    }

    /// All channels of the pixel at column `x`, row `y`.
    pub fn pixel_at(&self, x: usize, y: usize) -> &[f32] {
        self.pixel(y * self.width + x)
    }
}

/// Channel names for a three-channel color image.
pub(crate) fn rgb_names() -> Vec<String> {
    ["R", "G", "B"].iter().map(|s| (*s).to_string()).collect()
}

/// Channel names for a four-channel color image with alpha.
pub(crate) fn rgba_names() -> Vec<String> {
    ["R", "G", "B", "A"].iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_interleaved_checks_length() {
        let result = FloatImage::from_interleaved(2, 2, rgb_names(), vec![0.0; 11]);
        assert!(matches!(
            result,
            Err(Error::InvalidBuffer {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_pixel_access() {
        let img = FloatImage::from_rgb(
            2,
            2,
            &[
                [0.0, 0.1, 0.2],
                [1.0, 1.1, 1.2],
                [2.0, 2.1, 2.2],
                [3.0, 3.1, 3.2],
            ],
        )
        .unwrap();

        assert_eq!(img.channels(), 3);
        assert_eq!(img.pixel_count(), 4);
        assert_eq!(img.pixel(1), &[1.0, 1.1, 1.2]);
        assert_eq!(img.pixel_at(0, 1), &[2.0, 2.1, 2.2]);
        assert_eq!(img.pixel_at(1, 1), img.pixel(3));
    }

    #[test]
    fn test_default_name() {
        let img = FloatImage::from_rgb(1, 1, &[[0.5, 0.5, 0.5]]).unwrap();
        assert_eq!(img.name(), "<memory>");
        assert_eq!(img.with_name("ref.exr").name(), "ref.exr");
    }
}
