//! Public overview, mechanism breakdown and bundle status formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_bar, format_coefficient, format_day, single_line, truncate};
use crate::bundle::BundleFile;
use crate::models::{CaseSummary, Dataset};
use crate::session::MechanismGroup;

const TITLE_WIDTH: usize = 48;
const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "#")]
    rank: u32,
    #[tabled(rename = "Post")]
    post_id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "B")]
    beauty: String,
    #[tabled(rename = "Peak")]
    peak: String,
    #[tabled(rename = "Mechanism")]
    mechanism: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Comments")]
    comments: String,
}

impl From<&CaseSummary> for SummaryRow {
    fn from(summary: &CaseSummary) -> Self {
        let mut mechanism = summary.mechanism.kind().to_string();
        if summary.has_prince == Some(true) {
            mechanism.push_str(" ✓");
        }

        Self {
            rank: summary.rank,
            post_id: summary.post_id,
            title: truncate(&single_line(&summary.title), TITLE_WIDTH),
            beauty: format_coefficient(summary.beauty_coefficient),
            peak: format_day(summary.peak_day),
            mechanism,
            confidence: summary.confidence.to_string(),
            comments: summary
                .comments_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Format the public per-case overview of a dataset
pub fn format_overview(summaries: &[CaseSummary], dataset: Dataset) -> String {
    if summaries.is_empty() {
        return format!("{}: no cases listed.", dataset);
    }

    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    format!(
        "{} ({} cases)\n{}",
        dataset,
        summaries.len(),
        Table::new(rows).with(Style::psql())
    )
}

/// Format case counts per mechanism kind, each with its awakening chain
pub fn format_mechanism_breakdown(groups: &[MechanismGroup]) -> String {
    if groups.is_empty() {
        return "No cases found.".to_string();
    }

    let total: usize = groups.iter().map(MechanismGroup::count).sum();
    let max = groups.iter().map(MechanismGroup::count).max().unwrap_or(0);
    let name_width = groups
        .iter()
        .map(|g| g.kind.name().len())
        .max()
        .unwrap_or(9);

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!(
            "{:<name_width$}  {} {:>3} ({:.0}%)\n",
            group.kind.name(),
            format_bar(group.count() as f64, max as f64, BAR_WIDTH),
            group.count(),
            group.count() as f64 * 100.0 / total as f64,
            name_width = name_width,
        ));

        let ranks: Vec<String> = group.ranks.iter().map(|r| format!("#{}", r)).collect();
        output.push_str(&format!("    cases: {}\n", ranks.join(" ")));
        output.push_str(&format!("    chain: {}\n", group.kind.chain().join(" → ")));
    }

    output
}

/// Format presence and validity of bundle files
pub fn format_bundle_status(files: &[BundleFile]) -> String {
    let name_width = files.iter().map(|f| f.name.len()).max().unwrap_or(4);

    let mut output = String::new();
    for file in files {
        let status = match (file.present, file.valid_json) {
            (false, _) => "missing",
            (true, false) => "invalid JSON",
            (true, true) => "ok",
        };
        output.push_str(&format!(
            "  {:<name_width$}  {}\n",
            file.name,
            status,
            name_width = name_width
        ));
    }

    output
}
