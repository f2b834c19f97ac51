//! Lenient field decoders
//!
//! The bundle is produced from dataframes, so missing values arrive as
//! `null`, integer columns sometimes arrive as floats (`12.0`), and user ids
//! may be numbers or strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(|f| {
            if f.is_finite() && f.fract() == 0.0 {
                Some(f as i64)
            } else {
                None
            }
        }),
        _ => None,
    }
}

/// Decode an integer that may be encoded as an integral float or string
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_i64(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_i64`], keeping `null` as `None`
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    value_to_i64(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {}", value)))
}

/// Decode an identifier that may be a number or a string
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => match value_to_i64(&Value::Number(n.clone())) {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
        #[serde(default, deserialize_with = "lenient_i64")]
        day: i64,
        #[serde(default, deserialize_with = "lenient_opt_i64")]
        peak: Option<i64>,
        #[serde(default, deserialize_with = "lenient_string")]
        user: String,
    }

    #[test]
    fn test_nulls_become_defaults() {
        let row: Row =
            serde_json::from_str(r#"{"text": null, "day": null, "peak": null, "user": null}"#)
                .unwrap();
        assert_eq!(row.text, "");
        assert_eq!(row.day, 0);
        assert_eq!(row.peak, None);
        assert_eq!(row.user, "");
    }

    #[test]
    fn test_integral_floats_accepted() {
        let row: Row = serde_json::from_str(r#"{"day": 12.0, "peak": "40"}"#).unwrap();
        assert_eq!(row.day, 12);
        assert_eq!(row.peak, Some(40));
    }

    #[test]
    fn test_fractional_day_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"day": 1.5}"#).is_err());
    }

    #[test]
    fn test_numeric_user_ids() {
        let row: Row = serde_json::from_str(r#"{"user": 1042}"#).unwrap();
        assert_eq!(row.user, "1042");
        let row: Row = serde_json::from_str(r#"{"user": 77.0}"#).unwrap();
        assert_eq!(row.user, "77");
        let row: Row = serde_json::from_str(r#"{"user": "u_9"}"#).unwrap();
        assert_eq!(row.user, "u_9");
    }
}
