//! Daily-view charts rendered as text

use crate::models::DailyView;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a series as a one-line sparkline at most `width` columns wide
///
/// Longer series are bucketed; each column shows the maximum of its bucket
/// so a one-day spike stays visible.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let columns: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|col| {
                let start = col * values.len() / width;
                let end = ((col + 1) * values.len() / width).max(start + 1);
                values[start..end]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    };

    render(&columns)
}

fn render(columns: &[f64]) -> String {
    let max = columns.iter().copied().fold(0.0_f64, f64::max);
    columns
        .iter()
        .map(|&v| {
            if max <= 0.0 || v <= 0.0 {
                LEVELS[0]
            } else {
                let level = ((v / max) * (LEVELS.len() - 1) as f64).round() as usize;
                LEVELS[level.min(LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Sparkline of a case's view series along the post-age axis
///
/// Columns cover every day from the first to the last recorded one, so days
/// without a record (the dormant stretch) show as the lowest level.
pub fn views_sparkline(series: &[DailyView], width: usize) -> String {
    let (Some(first), Some(last)) = (
        series.iter().map(|v| v.post_age_days).min(),
        series.iter().map(|v| v.post_age_days).max(),
    ) else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let span = (i128::from(last) - i128::from(first) + 1) as u128;
    let count = span.min(width as u128) as usize;

    let mut columns = vec![0.0_f64; count];
    for view in series {
        let offset = (i128::from(view.post_age_days) - i128::from(first)) as u128;
        let col = (offset * count as u128 / span) as usize;
        columns[col] = columns[col].max(view.daily_views);
    }

    render(&columns)
}

/// The `n` busiest days, most views first, earlier day first on ties
pub fn top_days(series: &[DailyView], n: usize) -> Vec<DailyView> {
    let mut days = series.to_vec();
    days.sort_by(|a, b| {
        b.daily_views
            .total_cmp(&a.daily_views)
            .then(a.post_age_days.cmp(&b.post_age_days))
    });
    days.truncate(n);
    days
}
