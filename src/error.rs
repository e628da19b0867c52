//! Error types for snr-eval operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for snr-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading images or computing metrics.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to decode an image file.
    #[error("Image decode failed: {path}: {reason}")]
    Decode {
        /// Path to the image that failed to decode.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Query and reference images do not have the same shape.
    #[error("Shape mismatch between {query} and {reference}: {detail}")]
    ShapeMismatch {
        /// Name of the query image.
        query: String,
        /// Name of the reference image.
        reference: String,
        /// Which property differs.
        detail: String,
    },

    /// The channel policy cannot be applied to the image.
    #[error("Unsupported channel layout: {channels} channel(s), at least {required} required")]
    UnsupportedChannels {
        /// Channels present in the image.
        channels: usize,
        /// Channels required by the policy.
        required: usize,
    },

    /// A pixel buffer does not match the declared dimensions.
    #[error("Invalid pixel buffer: expected {expected} values, got {actual}")]
    InvalidBuffer {
        /// Expected number of floats (width * height * channels).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// The border margin leaves no pixels to measure.
    #[error("Border {border} too large for a {width}x{height} image")]
    InvalidBorder {
        /// Requested border margin.
        border: usize,
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },

    /// Every pixel was skipped, or the image is empty.
    #[error("No valid pixels to measure ({skipped} skipped)")]
    NoValidPixels {
        /// Number of pixels skipped because of NaN values.
        skipped: u64,
    },

    /// Failed to write a diagnostic image.
    #[error("Image write failed: {path}: {reason}")]
    ImageWrite {
        /// Destination path.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
