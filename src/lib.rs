//! # snr-eval
//!
//! Signal-to-noise ratio, peak SNR and root-mean-square error between two
//! floating-point images of the same size, typically a render or
//! reconstruction against a ground-truth reference.
//!
//! Metrics are per-pixel reductions: paired pixels stream through an
//! [`Accumulator`] that keeps running means and yields one scalar.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snr_eval::{MetricConfig, RmseAccumulator, SnrAccumulator, SnrUnit, compute_metric};
//!
//! let config = MetricConfig::builder()
//!     .snr_unit(SnrUnit::DecibelLog10)
//!     .build();
//!
//! let snr = compute_metric::<SnrAccumulator>("render.exr", "reference.exr", &config)?;
//! let rmse = compute_metric::<RmseAccumulator>("render.exr", "reference.exr", &config)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`raster`]: Owned multi-channel float images
//! - [`decode`]: Image loading
//! - [`metrics`]: Accumulators, the reduction engine, bordered SNR/PSNR, error maps
//! - [`stats`]: Running means
//! - [`eval`]: One-call evaluation and serializable reports

pub mod decode;
pub mod error;
pub mod eval;
pub mod metrics;
pub mod raster;
pub mod stats;

// Re-export commonly used types
pub use decode::load_image;
pub use error::{Error, Result};
pub use eval::{MetricReport, evaluate_files, evaluate_images};
pub use metrics::{
    Accumulator, BorderedReport, ChannelPolicy, MetricConfig, RmseAccumulator, Sample,
    SnrAccumulator, SnrUnit, bordered_metrics, compute_metric, compute_metric_for_images,
};
pub use raster::FloatImage;
