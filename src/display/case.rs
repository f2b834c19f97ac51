//! Case display formatting
//!
//! Formats decrypted cases as a ranking table and as a detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::chart::{top_days, views_sparkline};
use super::format::{
    format_coefficient, format_day, format_views, or_placeholder, separator, single_line,
    truncate,
};
use crate::config::Settings;
use crate::models::CaseRecord;

const TITLE_WIDTH: usize = 48;
const COMMENT_WIDTH: usize = 160;
const TOP_DAYS: usize = 5;

#[derive(Tabled)]
struct CaseRow {
    #[tabled(rename = "#")]
    rank: u32,
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
    comments: usize,
    #[tabled(rename = "Prince")]
    prince: &'static str,
}

impl From<&CaseRecord> for CaseRow {
    fn from(case: &CaseRecord) -> Self {
        Self {
            rank: case.rank,
            title: truncate(&single_line(&case.title), TITLE_WIDTH),
            beauty: format_coefficient(case.beauty_coefficient),
            peak: format_day(case.effective_peak_day()),
            mechanism: case.mechanism_kind().to_string(),
            confidence: case.confidence.to_string(),
            comments: case.comment_count(),
            prince: if case.has_prince() { "✓" } else { "" },
        }
    }
}

/// Format decrypted cases as a ranking table
pub fn format_case_table(cases: &[CaseRecord]) -> String {
    if cases.is_empty() {
        return "No cases found.".to_string();
    }

    let rows: Vec<CaseRow> = cases.iter().map(CaseRow::from).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

/// How much of a case the detail view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailOptions {
    pub comment_limit: usize,
    pub body_preview_chars: usize,
    pub chart_width: usize,
}

impl From<&Settings> for DetailOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            comment_limit: settings.comment_limit,
            body_preview_chars: settings.body_preview_chars,
            chart_width: settings.chart_width,
        }
    }
}

fn push_section(output: &mut String, title: &str) {
    output.push('\n');
    output.push_str(title);
    output.push('\n');
}

fn superuser_marker(is_superuser: bool) -> &'static str {
    if is_superuser {
        " (superuser)"
    } else {
        ""
    }
}

/// Render the awakening chain as `step → step → step`
pub fn format_chain(case: &CaseRecord) -> String {
    case.mechanism.chain().join(" → ")
}

/// Format a single case's details
pub fn format_case_details(case: &CaseRecord, options: &DetailOptions) -> String {
    let mut output = String::new();

    let heading = format!("#{}  {}", case.rank, or_placeholder(&case.title, "(untitled)"));
    output.push_str(&heading);
    output.push('\n');
    output.push_str(&separator(heading.chars().count().max(40)));
    output.push('\n');

    output.push_str(&format!("Post:        {}\n", case.post_id));
    if !case.created_date.is_empty() {
        output.push_str(&format!("Created:     {}\n", case.created_date));
    }
    output.push_str(&format!(
        "Category:    {}\n",
        or_placeholder(&case.category, "(none)")
    ));
    output.push_str(&format!(
        "B:           {}\n",
        format_coefficient(case.beauty_coefficient)
    ));
    output.push_str(&format!(
        "Peak:        {}\n",
        format_day(case.effective_peak_day())
    ));
    if case.mechanism.label().trim().is_empty() {
        output.push_str(&format!("Mechanism:   {}\n", case.mechanism_kind()));
    } else {
        output.push_str(&format!(
            "Mechanism:   {} ({})\n",
            case.mechanism.label().trim(),
            case.mechanism_kind()
        ));
    }
    output.push_str(&format!("Confidence:  {}\n", case.confidence));

    push_section(&mut output, "Awakening chain");
    output.push_str(&format!("  {}\n", format_chain(case)));

    if let Some(post) = &case.main_post {
        push_section(&mut output, "Main post");
        if !post.title.is_empty() && post.title != case.title {
            output.push_str(&format!("  Title:  {}\n", post.title));
        }
        output.push_str(&format!(
            "  Author: {}{}\n",
            or_placeholder(&post.author_id, "(unknown)"),
            superuser_marker(post.is_superuser)
        ));
        if !post.date.is_empty() {
            output.push_str(&format!("  Date:   {}\n", post.date));
        }
        output.push_str(&format!(
            "  {}\n",
            truncate(
                &single_line(or_placeholder(&post.body, "(no body)")),
                options.body_preview_chars
            )
        ));
    }

    if !case.evidence.trim().is_empty() {
        push_section(&mut output, "Evidence");
        output.push_str(&format!("  {}\n", single_line(&case.evidence)));
    }

    if !case.daily_views.is_empty() {
        push_section(
            &mut output,
            &format!(
                "Daily views ({} days, {} total)",
                case.daily_views.len(),
                format_views(case.total_views())
            ),
        );
        output.push_str(&format!(
            "  {}\n",
            views_sparkline(&case.daily_views, options.chart_width)
        ));
        if let Some(peak) = case.series_peak() {
            output.push_str(&format!(
                "  Peak: day {} ({} views)\n",
                peak.post_age_days,
                format_views(peak.daily_views)
            ));
        }
        let top: Vec<String> = top_days(&case.daily_views, TOP_DAYS)
            .iter()
            .map(|v| format!("day {}: {}", v.post_age_days, format_views(v.daily_views)))
            .collect();
        output.push_str(&format!("  Top days: {}\n", top.join(", ")));
    }

    if let Some(prince) = &case.prince_post {
        push_section(&mut output, "Prince post");
        output.push_str(&format!(
            "  #{} {}\n",
            prince.post_id,
            or_placeholder(&prince.title, "(untitled)")
        ));
        output.push_str(&format!(
            "  Author: {}{}\n",
            or_placeholder(&prince.author_id, "(unknown)"),
            superuser_marker(prince.is_superuser)
        ));
        if !prince.date.is_empty() {
            output.push_str(&format!("  Date:   {}\n", prince.date));
        }
        if let Some(days) = case.prince_delay_days() {
            output.push_str(&format!("  Published {} days after the dormant post\n", days));
        }
        if !prince.body.trim().is_empty() {
            output.push_str(&format!(
                "  {}\n",
                truncate(&single_line(&prince.body), options.body_preview_chars)
            ));
        }
    }

    let trace = &case.exploration;
    if !trace.is_empty() {
        push_section(&mut output, "Exploration");
        output.push_str(&format!("  Author posts:              {}\n", trace.author_posts.len()));
        output.push_str(&format!(
            "  Author comments elsewhere: {}\n",
            trace.author_comments_elsewhere.len()
        ));
        output.push_str(&format!("  Peak commenters:           {}\n", trace.peak_commenters.len()));
        output.push_str(&format!(
            "  Linked posts:              {}\n",
            trace.linked_post_ids().len()
        ));
    }

    let total = case.comment_count();
    if total > 0 && options.comment_limit > 0 {
        let shown = total.min(options.comment_limit);
        push_section(
            &mut output,
            &format!("Comments (showing {} of {})", shown, total),
        );
        for comment in case.comments.iter().take(shown) {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                or_placeholder(&comment.date, "?"),
                or_placeholder(&comment.user_id, "anonymous"),
                truncate(&single_line(&comment.body), COMMENT_WIDTH)
            ));
        }
    } else if total == 0 {
        push_section(&mut output, "Comments");
        output.push_str("  (none)\n");
    }

    output
}
