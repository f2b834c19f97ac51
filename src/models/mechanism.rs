//! Awakening mechanisms
//!
//! Researchers label each case with a free-text mechanism explaining why the
//! dormant post woke up. The label is classified once, when the record is
//! decoded, into a [`MechanismKind`] that selects the chain to render.

use std::fmt;

use serde::Deserialize;

/// Category of awakening mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MechanismKind {
    /// A later "prince" post linked to or revived the dormant one
    Prince,
    /// The original author came back and re-engaged
    AuthorReturn,
    /// A new comment bumped the thread back into view
    CommentRevival,
    /// Traffic arrived from search engines or outside sites
    ExternalReferral,
    /// The topic became relevant again on a recurring schedule
    Seasonal,
    /// No known pattern matched the label
    Unclassified,
}

/// Keyword lookup table, checked in order against the lowercased label.
///
/// Prince comes first because prince labels often also mention comments.
const MECHANISM_PATTERNS: &[(&str, MechanismKind)] = &[
    ("prince", MechanismKind::Prince),
    ("linked from", MechanismKind::Prince),
    ("cross-post", MechanismKind::Prince),
    ("author", MechanismKind::AuthorReturn),
    ("self-bump", MechanismKind::AuthorReturn),
    ("op return", MechanismKind::AuthorReturn),
    ("comment", MechanismKind::CommentRevival),
    ("reply", MechanismKind::CommentRevival),
    ("bump", MechanismKind::CommentRevival),
    ("search", MechanismKind::ExternalReferral),
    ("external", MechanismKind::ExternalReferral),
    ("referral", MechanismKind::ExternalReferral),
    ("google", MechanismKind::ExternalReferral),
    ("seasonal", MechanismKind::Seasonal),
    ("recurring", MechanismKind::Seasonal),
    ("annual", MechanismKind::Seasonal),
    ("news", MechanismKind::Seasonal),
];

impl MechanismKind {
    /// All kinds in display order
    pub const ALL: [MechanismKind; 6] = [
        Self::Prince,
        Self::AuthorReturn,
        Self::CommentRevival,
        Self::ExternalReferral,
        Self::Seasonal,
        Self::Unclassified,
    ];

    /// Classify a free-text mechanism label
    pub fn classify(label: &str) -> Self {
        let lowered = label.to_lowercase();
        MECHANISM_PATTERNS
            .iter()
            .find(|(pattern, _)| lowered.contains(pattern))
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Unclassified)
    }

    /// The awakening chain for this kind, dormant state first
    pub fn chain(&self) -> &'static [&'static str] {
        match self {
            Self::Prince => &[
                "Dormant post",
                "Prince post published",
                "Readers follow the link",
                "Awakening",
            ],
            Self::AuthorReturn => &[
                "Dormant post",
                "Author returns",
                "Thread resurfaces",
                "Awakening",
            ],
            Self::CommentRevival => &[
                "Dormant post",
                "New comment",
                "Thread bumped to the front page",
                "Awakening",
            ],
            Self::ExternalReferral => &[
                "Dormant post",
                "External search or referral",
                "Inbound traffic",
                "Awakening",
            ],
            Self::Seasonal => &[
                "Dormant post",
                "Recurring topical trigger",
                "Renewed interest",
                "Awakening",
            ],
            Self::Unclassified => &["Dormant post", "Awakening"],
        }
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prince => "Prince",
            Self::AuthorReturn => "Author return",
            Self::CommentRevival => "Comment revival",
            Self::ExternalReferral => "External referral",
            Self::Seasonal => "Seasonal",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A researcher's mechanism label with its resolved kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mechanism {
    label: String,
    kind: MechanismKind,
}

impl Mechanism {
    /// Resolve a label
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let kind = MechanismKind::classify(&label);
        Self { label, kind }
    }

    /// The label as written by the researcher
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> MechanismKind {
        self.kind
    }

    /// Chain steps to render
    ///
    /// Unclassified labels keep the researcher's wording as the middle step.
    pub fn chain(&self) -> Vec<&str> {
        let steps = self.kind.chain();
        if self.kind == MechanismKind::Unclassified && !self.label.trim().is_empty() {
            vec![steps[0], self.label.trim(), steps[1]]
        } else {
            steps.to_vec()
        }
    }
}

impl Default for Mechanism {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<Option<String>> for Mechanism {
    fn from(label: Option<String>) -> Self {
        Self::new(label.unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Mechanism {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Mechanism::from)
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(MechanismKind::classify("Prince Effect"), MechanismKind::Prince);
        assert_eq!(
            MechanismKind::classify("Author self-bump after 2 years"),
            MechanismKind::AuthorReturn
        );
        assert_eq!(
            MechanismKind::classify("New comment revival"),
            MechanismKind::CommentRevival
        );
        assert_eq!(
            MechanismKind::classify("Google search traffic"),
            MechanismKind::ExternalReferral
        );
        assert_eq!(MechanismKind::classify("SEASONAL"), MechanismKind::Seasonal);
    }

    #[test]
    fn test_prince_wins_over_comment() {
        assert_eq!(
            MechanismKind::classify("Comment linking to prince post"),
            MechanismKind::Prince
        );
    }

    #[test]
    fn test_unknown_label_is_unclassified() {
        assert_eq!(MechanismKind::classify("???"), MechanismKind::Unclassified);
        assert_eq!(MechanismKind::classify(""), MechanismKind::Unclassified);
    }

    #[test]
    fn test_chains_start_dormant_and_end_awake() {
        for kind in MechanismKind::ALL {
            let chain = kind.chain();
            assert_eq!(chain.first(), Some(&"Dormant post"));
            assert_eq!(chain.last(), Some(&"Awakening"));
        }
    }

    #[test]
    fn test_unclassified_chain_keeps_label() {
        let mechanism = Mechanism::new("Moderator pinned it");
        assert_eq!(mechanism.kind(), MechanismKind::Unclassified);
        assert_eq!(
            mechanism.chain(),
            vec!["Dormant post", "Moderator pinned it", "Awakening"]
        );
    }

    #[test]
    fn test_deserialize_resolves_kind() {
        let mechanism: Mechanism = serde_json::from_str(r#""Prince (cross-thread link)""#).unwrap();
        assert_eq!(mechanism.kind(), MechanismKind::Prince);
        assert_eq!(mechanism.label(), "Prince (cross-thread link)");
    }

    #[test]
    fn test_deserialize_null() {
        let mechanism: Mechanism = serde_json::from_str("null").unwrap();
        assert_eq!(mechanism, Mechanism::default());
        assert_eq!(mechanism.to_string(), "Unclassified");
    }
}
