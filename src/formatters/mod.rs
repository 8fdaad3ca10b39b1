//! Display formatting of raw context values.
//!
//! These are pure functions, the renderer routes placeholder values through
//! them based on the shape of the placeholder key.

pub mod date;
pub mod money;
pub mod number;

pub use self::date::{format_date_long, format_date_short};
pub use self::money::{format_amount, format_rub_short};
pub use self::number::format_spaced;

/// How a placeholder key wants its value formatted
#[derive(Clone, Debug, PartialEq)]
pub enum KeyFormat {
    /// Long Russian calendar date
    Date,
    /// Amount in words with pluralized currency
    Amount,
    /// Amount in words, taken from the sibling key obtained by stripping the
    /// `Formatted` suffix
    AmountOf(String),
    /// No formatting
    Verbatim,
}

fn is_amount_key(key: &str) -> bool {
    if key.ends_with("Amount") {
        return true;
    }
    key.rsplit('.').next().map_or(false, |last| last.eq_ignore_ascii_case("amount"))
}

/// Decides the formatter for a placeholder key.
///
/// Keys ending in `Date` carry dates, keys ending in `Amount` (or whose last
/// segment is `amount`) carry money, keys ending in `AmountFormatted` format
/// their sibling without the suffix.
pub fn key_format(key: &str) -> KeyFormat {
    if key.ends_with("AmountFormatted") {
        return KeyFormat::AmountOf(key[..key.len() - "Formatted".len()].to_string());
    }
    if is_amount_key(key) {
        return KeyFormat::Amount;
    }
    if key.ends_with("Date") {
        return KeyFormat::Date;
    }
    KeyFormat::Verbatim
}
