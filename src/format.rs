//! Display formatting helpers for amounts, dates, and text.
//!
//! Pure functions converting values to presentation strings. Output is
//! US-style; there is no locale machinery.

use chrono::{DateTime, NaiveDate, Utc};
use numfmt::{Formatter, Precision};

use crate::models::Month;

/// Formats an amount as a US-style currency string, e.g. `$1,234.56`.
///
/// Negative amounts render with the minus ahead of the symbol, e.g.
/// `-$12.30`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let mut formatted = if amount < 0.0 {
        currency_formatter("-$").fmt_string(amount.abs())
    } else if amount > 0.0 {
        currency_formatter("$").fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted.as_bytes().get(formatted.len().wrapping_sub(3)) != Some(&b'.') {
        formatted.push('0');
    }

    formatted
}

/// Builds a two-decimal currency formatter with the given prefix.
fn currency_formatter(prefix: &str) -> Formatter {
    Formatter::currency(prefix).map_or_else(
        |_err| Formatter::new(),
        |formatter| formatter.precision(Precision::Decimals(2)),
    )
}

/// Formats a timestamp as a medium date, e.g. `Jan 15, 2024`.
#[inline]
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a month for display, e.g. `January 2024`.
#[inline]
#[must_use]
pub fn format_month(month: Month) -> String {
    NaiveDate::from_ymd_opt(month.year(), month.month(), 1)
        .map_or_else(String::new, |date| date.format("%B %Y").to_string())
}

/// Formats a ratio as a percentage string, e.g. `0.423` → `42.3%`.
#[inline]
#[must_use]
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Truncates text to at most `max_chars` characters, appending `...`
/// when something was cut.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Describes how far `date` lies from `now`, e.g. `2 days ago` or
/// `in 3 hours`.
///
/// Uses the largest fitting unit: under a minute counts seconds, under an
/// hour minutes, under a day hours, under 30 days days, under a year
/// months (30-day months), then years. A zero offset renders as `now`.
#[must_use]
pub fn relative_time(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = date.signed_duration_since(now).num_seconds();
    let (count, unit) = scale(seconds);
    if count == 0 {
        return "now".to_owned();
    }
    let magnitude = count.unsigned_abs();
    let plural = if magnitude == 1 { "" } else { "s" };
    if count < 0 {
        format!("{magnitude} {unit}{plural} ago")
    } else {
        format!("in {magnitude} {unit}{plural}")
    }
}

/// Picks the largest unit fitting the signed offset in seconds.
fn scale(seconds: i64) -> (i64, &'static str) {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;
    let years = months / 12;
    if seconds.abs() < 60 {
        (seconds, "second")
    } else if minutes.abs() < 60 {
        (minutes, "minute")
    } else if hours.abs() < 24 {
        (hours, "hour")
    } else if days.abs() < 30 {
        (days, "day")
    } else if months.abs() < 12 {
        (months, "month")
    } else {
        (years, "year")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed reference instant: 2024-01-15T10:00:00Z.
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_705_312_800, 0).unwrap()
    }

    /// The reference instant shifted by a signed number of seconds.
    fn at(offset_secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_705_312_800 + offset_secs, 0).unwrap()
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn currency_zero_is_special_cased() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn currency_negative_has_leading_minus() {
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn currency_pads_trailing_zero() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(0.5), "$0.50");
    }

    #[test]
    fn date_renders_medium_style() {
        assert_eq!(format_date(&now()), "Jan 15, 2024");
    }

    #[test]
    fn month_renders_full_name_and_year() {
        assert_eq!(format_month(Month::new(2024, 1).unwrap()), "January 2024");
        assert_eq!(format_month(Month::new(2023, 12).unwrap()), "December 2023");
    }

    #[test]
    fn percentage_respects_decimals() {
        assert_eq!(format_percentage(0.423, 1), "42.3%");
        assert_eq!(format_percentage(0.5, 0), "50%");
        assert_eq!(format_percentage(1.0, 2), "100.00%");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_text("short", 30), "short");
    }

    #[test]
    fn truncate_cuts_long_text_with_ellipsis() {
        assert_eq!(truncate_text("a very long description here", 10), "a very lon...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        // Four characters; must not split inside a multi-byte sequence.
        assert_eq!(truncate_text("caf\u{e9}s!", 4), "caf\u{e9}...");
    }

    #[test]
    fn relative_time_zero_is_now() {
        assert_eq!(relative_time(&now(), &now()), "now");
    }

    #[test]
    fn relative_time_past_and_future() {
        assert_eq!(relative_time(&at(-30), &now()), "30 seconds ago");
        assert_eq!(relative_time(&at(90), &now()), "in 1 minute");
        assert_eq!(relative_time(&at(-2 * 3600), &now()), "2 hours ago");
        assert_eq!(relative_time(&at(3 * 86_400), &now()), "in 3 days");
    }

    #[test]
    fn relative_time_months_and_years() {
        assert_eq!(relative_time(&at(-45 * 86_400), &now()), "1 month ago");
        assert_eq!(relative_time(&at(400 * 86_400), &now()), "in 1 year");
    }
}
