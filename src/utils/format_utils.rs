use chrono::{DateTime, NaiveDate, Utc};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DEADLINE: &str = "No Deadline";

const DATE_LABEL_FORMAT: &str = "%d %b %Y";
const DATETIME_LABEL_FORMAT: &str = "%d %b %Y %H:%M";

/// `Rp 1.250.000` style amount with dot thousand separators.
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}

pub fn format_budget_range(from: Option<u64>, to: Option<u64>) -> String {
    match (from, to) {
        (Some(from), Some(to)) if from != to => {
            format!("{} - {}", format_rupiah(from), format_rupiah(to))
        }
        (Some(amount), _) | (None, Some(amount)) => format_rupiah(amount),
        (None, None) => NOT_AVAILABLE.to_string(),
    }
}

/// Parses a stored date, either `YYYY-MM-DD` or RFC 3339.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

pub fn format_date_label(raw: Option<&str>, fallback: &str) -> String {
    raw.and_then(parse_date)
        .map(|date| date.format(DATE_LABEL_FORMAT).to_string())
        .unwrap_or_else(|| fallback.to_string())
}

pub fn format_datetime_label(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format(DATETIME_LABEL_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_duration_days(days: Option<u32>) -> String {
    match days {
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{days} days"),
        None => NOT_AVAILABLE.to_string(),
    }
}
