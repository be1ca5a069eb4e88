//! Generic formatting helpers shared by the CLI and the explorer.

use crate::core::models::PLACEHOLDER;

/// Format a token count as human-readable (e.g. "128k", "1M", "1.5M").
pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000 {
        let tenths = (n as f64 / 100_000.0).round() as u64;
        if tenths % 10 == 0 {
            format!("{}M", tenths / 10)
        } else {
            format!("{}.{}M", tenths / 10, tenths % 10)
        }
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Token count, or the placeholder when absent.
pub fn format_token_limit(n: Option<u64>) -> String {
    n.map(format_tokens)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Truncate to `max` characters, appending an ellipsis when shortened.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
