//! Configuration sanity checks.
//!
//! Warnings here are advisory: a distribution that does not sum to 100
//! still computes, it just quietly misallocates the day, so the admin
//! UI surfaces these before anything else does.

use serde::{Deserialize, Serialize};

use crate::models::{Advisor, BusinessWindow, HourlyWeight};

/// Slack allowed on the in-window weight sum before flagging it.
///
/// Covers rounding noise from percentage arithmetic without hiding a
/// genuinely wrong distribution.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// Advisory finding about a session's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// In-window weights sum to something other than 100.
    WeightSumMismatch { sum: f64 },
    /// Weight rows exist for hours outside the operating window; they
    /// are ignored by every computation but linger in storage.
    OutOfWindowWeights { hours: Vec<i32> },
}

/// Check a session's weight rows against its operating window.
pub fn weight_warnings(window: BusinessWindow, weights: &[HourlyWeight]) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let sum: f64 = weights
        .iter()
        .filter(|w| window.contains(w.hour_start))
        .map(|w| w.percentage)
        .sum();
    if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        warnings.push(ConfigWarning::WeightSumMismatch { sum });
    }

    let mut stray_hours: Vec<i32> = weights
        .iter()
        .filter(|w| !window.contains(w.hour_start))
        .map(|w| w.hour_start)
        .collect();
    if !stray_hours.is_empty() {
        stray_hours.sort_unstable();
        warnings.push(ConfigWarning::OutOfWindowWeights { hours: stray_hours });
    }

    warnings
}

/// Case-insensitive duplicate check against an existing roster.
///
/// Leading and trailing whitespace on the candidate is ignored, so
/// " ana " collides with "Ana".
pub fn is_duplicate_name(existing: &[Advisor], candidate: &str) -> bool {
    let needle = candidate.trim().to_lowercase();
    existing
        .iter()
        .any(|advisor| advisor.name.trim().to_lowercase() == needle)
}
