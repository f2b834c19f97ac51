//! Case-study record model
//!
//! One record per "Sleeping Beauty" post: the post itself, its comments, the
//! daily view series, the researcher's mechanism assignment, and the optional
//! prince post and exploration trace.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::confidence::Confidence;
use super::de::{lenient_i64, lenient_opt_i64, lenient_string, null_as_default};
use super::mechanism::{Mechanism, MechanismKind};

/// The dormant post as originally published
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainPost {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author_id: String,
    /// Whether the author is in the top 1% of posters (hourly dataset only)
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_superuser: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

/// A comment on the dormant post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// Views on one day of the post's life
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct DailyView {
    /// Days since the post was created
    #[serde(default, deserialize_with = "lenient_i64")]
    pub post_age_days: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_views: f64,
}

/// The later post credited with waking the dormant one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrincePost {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub post_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_superuser: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// A post referenced from the exploration trace
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploredPost {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub post_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// What one peak-window commenter did elsewhere on the forum
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommenterActivity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts_created: Vec<ExploredPost>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub threads_participated: Vec<Value>,
}

/// Researcher's trace of the author's and commenters' wider activity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorationTrace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_posts: Vec<ExploredPost>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_comments_elsewhere: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peak_commenters: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commenter_activity: Vec<CommenterActivity>,
}

impl ExplorationTrace {
    /// True when the trace recorded nothing
    pub fn is_empty(&self) -> bool {
        self.author_posts.is_empty()
            && self.author_comments_elsewhere.is_empty()
            && self.peak_commenters.is_empty()
            && self.commenter_activity.is_empty()
    }

    /// Every post id the trace points at
    ///
    /// Thread ids may be recorded as strings or floats; unreadable ones are
    /// skipped.
    pub fn linked_post_ids(&self) -> BTreeSet<i64> {
        let mut ids: BTreeSet<i64> = self.author_posts.iter().map(|p| p.post_id).collect();

        for activity in &self.commenter_activity {
            ids.extend(activity.posts_created.iter().map(|p| p.post_id));
            for thread in &activity.threads_participated {
                if let Some(id) = thread.get("post_id").and_then(thread_post_id) {
                    ids.insert(id);
                }
            }
        }

        ids
    }
}

/// Calendar date of a `YYYY-MM-DD[ HH:MM:SS]` timestamp
pub fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let date = timestamp.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn thread_post_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// One decrypted case study
#[derive(Debug, Clone, Deserialize)]
pub struct CaseRecord {
    /// Position in the top-N ranking (1-based)
    pub rank: u32,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub post_id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Beauty coefficient of the view curve
    #[serde(rename = "B", default)]
    pub beauty_coefficient: Option<f64>,

    /// Awakening time: the post age in days at which views peaked
    #[serde(rename = "tm", default, deserialize_with = "lenient_opt_i64")]
    pub peak_day: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Mechanism label, classified at decode time
    #[serde(default)]
    pub mechanism: Mechanism,

    #[serde(default)]
    pub confidence: Confidence,

    #[serde(default, deserialize_with = "null_as_default")]
    pub evidence: String,

    #[serde(default)]
    pub main_post: Option<MainPost>,

    /// Comments in chronological order
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,

    /// View counts ordered by post age
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_views: Vec<DailyView>,

    #[serde(default)]
    pub prince_post: Option<PrincePost>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub exploration: ExplorationTrace,
}

impl CaseRecord {
    pub fn mechanism_kind(&self) -> MechanismKind {
        self.mechanism.kind()
    }

    pub fn has_prince(&self) -> bool {
        self.prince_post.is_some()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Day with the most views in the series (earliest on ties)
    pub fn series_peak(&self) -> Option<DailyView> {
        self.daily_views.iter().copied().fold(None, |best, view| match best {
            Some(b) if b.daily_views >= view.daily_views => Some(b),
            _ => Some(view),
        })
    }

    /// Peak day as recorded, falling back to the series maximum
    pub fn effective_peak_day(&self) -> Option<i64> {
        self.peak_day
            .or_else(|| self.series_peak().map(|v| v.post_age_days))
    }

    /// Sum of all daily views
    pub fn total_views(&self) -> f64 {
        self.daily_views.iter().map(|v| v.daily_views).sum()
    }

    /// Creation date of the dormant post
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.main_post
            .as_ref()
            .and_then(|p| parse_date(&p.date))
            .or_else(|| parse_date(&self.created_date))
    }

    /// Days between the dormant post and its prince post
    pub fn prince_delay_days(&self) -> Option<i64> {
        let prince = parse_date(&self.prince_post.as_ref()?.date)?;
        Some((prince - self.created_on()?).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record() {
        let record: CaseRecord = serde_json::from_str(r#"{"rank":1,"title":"Test"}"#).unwrap();
        assert_eq!(record.rank, 1);
        assert_eq!(record.title, "Test");
        assert!(record.comments.is_empty());
        assert!(record.main_post.is_none());
        assert!(record.exploration.is_empty());
        assert_eq!(record.mechanism_kind(), MechanismKind::Unclassified);
    }

    #[test]
    fn test_rank_is_required() {
        assert!(serde_json::from_str::<CaseRecord>(r#"{"title":"No rank"}"#).is_err());
    }

    #[test]
    fn test_full_record() {
        let value = json!({
            "rank": 3,
            "post_id": 81234,
            "title": "Inhaler question",
            "B": 152.5,
            "tm": 412,
            "created_date": "2016-02-01",
            "category": "Asthma",
            "mechanism": "Prince post cross-link",
            "confidence": "High",
            "evidence": "Prince post links here on day 410",
            "main_post": {
                "title": "Inhaler question",
                "body": null,
                "author_id": 17,
                "date": "2016-02-01 09:12:00",
                "category": "Asthma"
            },
            "comments": [
                {"user_id": 3, "body": "Same here", "date": "2017-03-18 10:00:00"}
            ],
            "daily_views": [
                {"post_age_days": 0, "daily_views": 40},
                {"post_age_days": 411.0, "daily_views": 5.0},
                {"post_age_days": 412, "daily_views": 310}
            ],
            "prince_post": {"post_id": 99001, "title": "Look at this old thread", "body": "..."},
            "exploration": {
                "author_posts": [{"post_id": 80000, "title": "Earlier post"}],
                "author_comments_elsewhere": [],
                "peak_commenters": [3],
                "commenter_activity": [{
                    "user_id": 3,
                    "posts_created": [{"post_id": 90000}],
                    "threads_participated": [{"post_id": "95000"}, {"post_id": null}]
                }]
            }
        });

        let record: CaseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.beauty_coefficient, Some(152.5));
        assert_eq!(record.peak_day, Some(412));
        assert_eq!(record.mechanism_kind(), MechanismKind::Prince);
        assert_eq!(record.confidence, Confidence::High);
        assert_eq!(record.main_post.as_ref().unwrap().body, "");
        assert_eq!(record.main_post.as_ref().unwrap().author_id, "17");
        assert_eq!(record.comment_count(), 1);
        assert!(record.has_prince());
        assert_eq!(record.daily_views[1].post_age_days, 411);
        assert_eq!(record.total_views(), 355.0);

        let ids: Vec<i64> = record.exploration.linked_post_ids().into_iter().collect();
        assert_eq!(ids, vec![80000, 90000, 95000]);
    }

    #[test]
    fn test_series_peak_and_fallback() {
        let value = json!({
            "rank": 1,
            "daily_views": [
                {"post_age_days": 0, "daily_views": 1},
                {"post_age_days": 5, "daily_views": 9},
                {"post_age_days": 6, "daily_views": 9}
            ]
        });
        let record: CaseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.series_peak().unwrap().post_age_days, 5);
        assert_eq!(record.peak_day, None);
        assert_eq!(record.effective_peak_day(), Some(5));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2016-02-01 09:12:00"),
            NaiveDate::from_ymd_opt(2016, 2, 1)
        );
        assert_eq!(parse_date("2016-02-01"), NaiveDate::from_ymd_opt(2016, 2, 1));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_prince_delay() {
        let value = json!({
            "rank": 1,
            "created_date": "2016-01-01",
            "main_post": {"date": "2016-02-01 09:12:00"},
            "prince_post": {"date": "2017-03-18 10:00:00"}
        });
        let record: CaseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.created_on(), NaiveDate::from_ymd_opt(2016, 2, 1));
        assert_eq!(record.prince_delay_days(), Some(411));

        let value = json!({"rank": 1, "created_date": "2016-01-01"});
        let record: CaseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.prince_delay_days(), None);
    }

    #[test]
    fn test_null_collections() {
        let value = json!({"rank": 2, "comments": null, "daily_views": null, "exploration": null});
        let record: CaseRecord = serde_json::from_value(value).unwrap();
        assert!(record.comments.is_empty());
        assert!(record.series_peak().is_none());
        assert_eq!(record.effective_peak_day(), None);
    }
}
