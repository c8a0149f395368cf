use chrono::{DateTime, FixedOffset, NaiveDateTime};

pub const PLACEHOLDER: &str = "-";
pub const PLAY_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[must_use]
pub fn medal_glyph(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// CSS class for the rank cell, podium places get their own colour.
#[must_use]
pub fn rank_class(rank: u32) -> &'static str {
    match rank {
        1 => "rank rank-gold",
        2 => "rank rank-silver",
        3 => "rank rank-bronze",
        _ => "rank",
    }
}

/// Renders a play timestamp as `YYYY/MM/DD HH:MM` in `offset`.
///
/// Timestamps without a zone are taken to already be in `offset`. Text that is
/// not a timestamp at all is returned unchanged.
#[must_use]
pub fn format_play_time(raw: Option<&str>, offset: &FixedOffset) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(offset).format(PLAY_TIME_FORMAT).to_string();
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map_or_else(
            || raw.to_string(),
            |naive| naive.format(PLAY_TIME_FORMAT).to_string(),
        )
}

/// Whole numbers print without a fraction; missing values print the placeholder.
#[must_use]
pub fn format_number(value: Option<f64>) -> String {
    match value {
        None => PLACEHOLDER.to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Some(n) => n.to_string(),
    }
}

#[must_use]
pub fn text_or_placeholder(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER)
}
