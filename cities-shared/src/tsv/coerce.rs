//! Pure field coercion helpers. Parse failures yield `None`, never a
//! silent zero; the caller decides between fallback and rejection.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Radix-10 integer parse.
pub fn parse_i32(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Float parse accepting `,` as the decimal separator alongside `.`.
pub fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Case-insensitive `"true"` is true, every other token is false.
pub fn parse_bool(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Accepts `DD.MM.YYYY`, `YYYY-MM-DD` and full RFC 3339 timestamps.
/// Non-representable dates (e.g. 31.02) yield `None`.
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .ok()?;

    Some(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    ))
}
