//! Researcher confidence in a mechanism assignment

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// Anything else, kept verbatim (empty when missing)
    Unknown(String),
}

impl Confidence {
    /// Parse confidence from a label
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Self::High,
            "medium" | "med" | "m" | "moderate" => Self::Medium,
            "low" | "l" => Self::Low,
            _ => Self::Unknown(s.trim().to_string()),
        }
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<Option<String>> for Confidence {
    fn from(value: Option<String>) -> Self {
        value.map(|s| Self::parse(&s)).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Confidence::from)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Unknown(label) if label.is_empty() => write!(f, "-"),
            Self::Unknown(label) => write!(f, "{}", label),
        }
    }
}
