//! Core data models for SB Viewer
//!
//! Decrypted case records, the public overview entries, and the enums that
//! classify them.

pub mod case;
pub mod confidence;
pub mod dataset;
pub mod de;
pub mod mechanism;
pub mod summary;

pub use case::{
    CaseRecord, Comment, CommenterActivity, DailyView, ExplorationTrace, ExploredPost, MainPost,
    PrincePost,
};
pub use confidence::Confidence;
pub use dataset::Dataset;
pub use mechanism::{Mechanism, MechanismKind};
pub use summary::CaseSummary;
