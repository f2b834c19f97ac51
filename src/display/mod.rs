//! Display formatting for terminal output
//!
//! Turns cases, public summaries and bundle checks into text for the CLI.
//! Nothing here touches the filesystem or the session.

pub mod case;
pub mod chart;
pub mod format;
pub mod overview;

pub use case::{format_case_details, format_case_table, format_chain, DetailOptions};
pub use chart::{sparkline, top_days, views_sparkline};
pub use overview::{format_bundle_status, format_mechanism_breakdown, format_overview};
