//! Report type for one query/reference comparison.
//!
//! Reports serialize to JSON. Non-finite metric values (identical images give
//! an infinite SNR) are written as the strings `"inf"`, `"-inf"` and `"nan"`
//! because JSON numbers cannot represent them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{BorderedReport, MetricConfig};

/// Metrics for a query image measured against a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Query image name (usually its path).
    pub query: String,

    /// Reference image name (usually its path).
    pub reference: String,

    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Channel names shared by both images.
    pub channel_names: Vec<String>,

    /// Configuration the metrics were computed with.
    pub config: MetricConfig,

    /// SNR in `config.snr_unit`.
    #[serde(with = "lossless_f64")]
    pub snr: f64,

    /// Root-mean-square error.
    #[serde(with = "lossless_f64")]
    pub rmse: f64,

    /// Largest per-pixel squared error.
    #[serde(with = "lossless_f64")]
    pub max_error: f64,

    /// Pixels that contributed to SNR and RMSE.
    pub samples: u64,

    /// Pixels skipped because of NaN values.
    pub skipped: u64,

    /// Border-limited SNR/PSNR, when requested.
    pub bordered: Option<BorderedReport>,

    /// When this report was generated.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl MetricReport {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written by [`MetricReport::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Plain-text form: `SNR = …` and `RMSE = …` lines, followed by the bordered
/// block when present.
impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = self.config.snr_unit.suffix();
        if suffix.is_empty() {
            writeln!(f, "SNR = {}", self.snr)?;
        } else {
            writeln!(f, "SNR = {} {}", self.snr, suffix)?;
        }
        write!(f, "RMSE = {}", self.rmse)?;

        if let Some(b) = &self.bordered {
            writeln!(f)?;
            writeln!(f, "SNR (border {}) = {}", b.border, b.snr)?;
            writeln!(f, "SNRdb = {} dB", b.snr_db)?;
            writeln!(f, "PSNR = {}", b.psnr)?;
            write!(f, "PSNRdb = {} dB", b.psnr_db)?;
        }
        Ok(())
    }
}

// f64 that survives a JSON round trip even when infinite or NaN
pub(crate) mod lossless_f64 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let repr = if value.is_finite() {
            Repr::Number(*value)
        } else if value.is_nan() {
            Repr::Text("nan".to_string())
        } else if value.is_sign_positive() {
            Repr::Text("inf".to_string())
        } else {
            Repr::Text("-inf".to_string())
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(serde::de::Error::custom(format!("invalid number '{other}'"))),
            },
        }
    }
}

mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
