//! Display formatting for deal cards and stage headers.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::Amounts;

const MS_PER_DAY: i64 = 86_400_000;

/// Format `value` with thousands separators and at most two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
}

/// One `"<amount> <currency>"` label per non-zero currency, in currency order.
#[must_use]
pub fn format_amounts(amounts: &Amounts) -> Vec<String> {
    amounts
        .iter()
        .filter(|(_, value)| **value != 0.0)
        .map(|(currency, value)| format!("{} {currency}", format_amount(*value)))
        .collect()
}

/// Render a close date as `YYYY-MM-DD`.
///
/// Accepts epoch milliseconds (as the API sends them) or an ISO-8601 string.
#[must_use]
pub fn format_close_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ms) = raw.parse::<i64>() {
        let (y, m, d) = civil_from_days(ms.div_euclid(MS_PER_DAY));
        return Some(format!("{y:04}-{m:02}-{d:02}"));
    }
    let date = raw.get(..10)?;
    let bytes = date.as_bytes();
    let shaped = bytes.iter().enumerate().all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    shaped.then(|| date.to_owned())
}

/// Days since 1970-01-01 to a proleptic Gregorian `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, u32::try_from(month).unwrap_or(1), u32::try_from(day).unwrap_or(1))
}

/// Up to two uppercase initials for an avatar bubble.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
