//! Human-readable runtime and bundle summaries.

use crate::types::Combination;

/// Format minutes as "45m", "2h" or "2h 5m"
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, mins) => format!("{mins}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, mins) => format!("{hours}h {mins}m"),
    }
}

/// One-line summary such as "2 movies • 2h 5m • ★ 7.8"
pub fn summarize(combination: &Combination) -> String {
    let count = combination.size();
    let noun = if count == 1 { "movie" } else { "movies" };
    // Halves round up (7.25 -> 7.3); `{:.1}` alone rounds them to even
    let rating = (f64::from(combination.average_rating) * 10.0).round() / 10.0;
    format!(
        "{} {} • {} • ★ {:.1}",
        count,
        noun,
        format_runtime(combination.total_runtime),
        rating
    )
}
