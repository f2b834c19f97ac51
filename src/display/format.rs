//! Formatting utilities for terminal output

/// Create a simple bar representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept.trim_end())
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Beauty coefficient with two decimals, or `-` when absent
pub fn format_coefficient(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Day number as `day N`, or `-` when absent
pub fn format_day(day: Option<i64>) -> String {
    day.map(|d| format!("day {}", d))
        .unwrap_or_else(|| "-".to_string())
}

/// View count without decimals when it is whole
pub fn format_views(views: f64) -> String {
    if views.fract() == 0.0 {
        format!("{:.0}", views)
    } else {
        format!("{:.1}", views)
    }
}

/// Text or a placeholder when empty
pub fn or_placeholder<'a>(s: &'a str, placeholder: &'a str) -> &'a str {
    if s.trim().is_empty() {
        placeholder
    } else {
        s
    }
}
