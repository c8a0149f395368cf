use chrono::{FixedOffset, Offset, Utc};
use reqwest::Url;

/// # Errors
///
/// Will return `Err` if the value is not an absolute http(s) url that can carry a path
pub fn check_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| format!("'{value}' is not a valid url: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("'{value}' must use http or https."));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(format!("'{value}' cannot be used as an api base url."));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(format!("'{value}' must not carry a query or fragment."));
    }
    Ok(url)
}

/// # Errors
///
/// Will return `Err` if the value is not a positive number of seconds
pub fn check_positive_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("The duration must be at least one second.".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(format!("'{value}' is not a number of seconds: {e}")),
    }
}

/// Parses `+HH:MM`, `-HH:MM` or `Z`.
///
/// # Errors
///
/// Will return `Err` if the value is not a utc offset within a day
pub fn check_utc_offset(value: &str) -> Result<FixedOffset, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }
    value
        .parse::<FixedOffset>()
        .map_err(|e| format!("'{value}' is not a utc offset like +09:00: {e}"))
}
