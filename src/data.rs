//! Field-level parsing and display helpers shared by the loader and renderers.

/// Parses a numeric field. Blank, placeholder, unparseable and non-finite
/// inputs all read as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_placeholder_token(&trimmed.to_ascii_lowercase()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn is_placeholder_token(lowered: &str) -> bool {
    let stripped = lowered.trim_start_matches('#');
    matches!(
        stripped,
        "na" | "n/a" | "n.a." | "null" | "none" | "nan" | "missing"
    ) || stripped.chars().all(|c| c == '-')
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
