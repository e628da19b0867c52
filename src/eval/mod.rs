//! Whole-image evaluation and reporting.
//!
//! - [`session::evaluate_files`] / [`session::evaluate_images`]: SNR, RMSE and
//!   optional bordered metrics in one call
//! - [`report::MetricReport`]: the serializable result

pub mod report;
pub mod session;

pub use report::MetricReport;
pub use session::{evaluate_files, evaluate_images};
