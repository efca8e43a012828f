//! Progress tracker report, as returned to the client.
//!
//! The analysis service measures the affected area in both images. When it
//! leaves out the percent change or the verdict, they are derived here from
//! the two areas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Changes within this band (in percent) count as no change.
pub const STABLE_BAND_PERCENT: f64 = 5.0;

pub const DEFAULT_DISEASE: &str = "Skin Lesion (Generic/Acne)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Improvement,
    Regression,
    NoSignificantChange,
}

impl ProgressStatus {
    pub fn classify(percent_change: f64) -> Self {
        if percent_change < -STABLE_BAND_PERCENT {
            ProgressStatus::Improvement
        } else if percent_change > STABLE_BAND_PERCENT {
            ProgressStatus::Regression
        } else {
            ProgressStatus::NoSignificantChange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Improvement => "IMPROVEMENT",
            ProgressStatus::Regression => "REGRESSION",
            ProgressStatus::NoSignificantChange => "NO SIGNIFICANT CHANGE",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative change of the affected area, in percent.
pub fn percent_change(past_area: f64, new_area: f64) -> f64 {
    if past_area == 0.0 {
        if new_area == 0.0 { 0.0 } else { 100.0 }
    } else {
        (new_area - past_area) / past_area * 100.0
    }
}

/// Body returned by the analysis service. Every field is optional so that a
/// partial answer can still be completed or rejected with a useful message.
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamReport {
    pub disease: Option<String>,
    pub past_area: Option<f64>,
    pub new_area: Option<f64>,
    pub percent_change: Option<f64>,
    pub status: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    pub disease: String,
    pub past_area: f64,
    pub new_area: f64,
    pub percent_change: f64,
    pub status: String,
}

impl ProgressReport {
    /// Completes an upstream answer. Fails when either area is missing or
    /// negative, since nothing meaningful can be reported then.
    pub fn from_upstream(upstream: UpstreamReport, requested_disease: &str) -> Result<Self, String> {
        let (past_area, new_area) = match (upstream.past_area, upstream.new_area) {
            (Some(past), Some(new)) if past >= 0.0 && new >= 0.0 => (past, new),
            (Some(_), Some(_)) => return Err("analysis reported a negative area".to_string()),
            _ => return Err("analysis response is missing the measured areas".to_string()),
        };

        let percent_change = upstream
            .percent_change
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| percent_change(past_area, new_area));

        let status = upstream
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| ProgressStatus::classify(percent_change).to_string());

        Ok(Self {
            disease: upstream
                .disease
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| requested_disease.to_string()),
            past_area,
            new_area,
            percent_change,
            status,
        })
    }
}
