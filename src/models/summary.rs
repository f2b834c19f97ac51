//! Public case overview
//!
//! The bundle ships an unencrypted per-case summary (`metadata.json`,
//! `hourly_metadata.json`, `hourly_top20.json`) so the ranking can be shown
//! before the password is entered.

use serde::Deserialize;

use super::confidence::Confidence;
use super::de::{lenient_i64, lenient_opt_i64, null_as_default};
use super::mechanism::Mechanism;

#[derive(Debug, Clone, Deserialize)]
pub struct CaseSummary {
    pub rank: u32,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub post_id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "B", default)]
    pub beauty_coefficient: Option<f64>,

    #[serde(rename = "tm", default, deserialize_with = "lenient_opt_i64")]
    pub peak_day: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(default)]
    pub mechanism: Mechanism,

    #[serde(default)]
    pub confidence: Confidence,

    /// Absent from the top-20 file
    #[serde(default)]
    pub comments_count: Option<usize>,

    /// Absent from the top-20 file
    #[serde(default)]
    pub has_prince: Option<bool>,
}
