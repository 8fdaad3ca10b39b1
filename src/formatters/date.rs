use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Month names in the genitive case, as they read after a day number
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Dates arrive from the wizard as `DD.MM.YYYY` or `YYYY-MM-DD`, with
/// RFC3339/naive datetimes as a fallback for machine-produced values
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d.%m.%Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = raw.parse::<DateTime<FixedOffset>>() {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Some(datetime.date());
    }
    None
}

/// Long Russian form: `15.03.1990` -> `15 марта 1990`.
///
/// Returns an empty string when the input does not parse as a date.
pub fn format_date_long(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => {
            format!("{} {} {}", date.day(), MONTHS_GENITIVE[date.month0() as usize], date.year())
        }
        None => String::new(),
    }
}

/// Short numeric form: `1990-03-15` -> `15.03.1990`.
///
/// Returns an empty string when the input does not parse as a date.
pub fn format_date_short(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => String::new(),
    }
}
