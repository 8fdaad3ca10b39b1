//! Currency formatting: amounts spelled out in words with grammatically
//! correct pluralization, the way sums are written in Russian contracts.

use crate::formatters::number::{format_spaced, pluralize};

const UNITS: [&str; 9] =
    ["один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять"];
// thousands take the feminine form of one and two
const UNITS_FEMININE: [&str; 9] =
    ["одна", "две", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять"];
const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];
const TENS: [&str; 8] = [
    "двадцать",
    "тридцать",
    "сорок",
    "пятьдесят",
    "шестьдесят",
    "семьдесят",
    "восемьдесят",
    "девяносто",
];
const HUNDREDS: [&str; 9] = [
    "сто",
    "двести",
    "триста",
    "четыреста",
    "пятьсот",
    "шестьсот",
    "семьсот",
    "восемьсот",
    "девятьсот",
];

/// Scale words by triple-group index, lowest first, with their feminine flag.
/// Goes all the way to quintillions so spelling any `u64` is total.
const SCALES: [([&'static str; 3], bool); 6] = [
    (["тысяча", "тысячи", "тысяч"], true),
    (["миллион", "миллиона", "миллионов"], false),
    (["миллиард", "миллиарда", "миллиардов"], false),
    (["триллион", "триллиона", "триллионов"], false),
    (["квадриллион", "квадриллиона", "квадриллионов"], false),
    (["квинтиллион", "квинтиллиона", "квинтиллионов"], false),
];

const RUBLE_FORMS: [&str; 3] = ["рубль", "рубля", "рублей"];
const KOPECK_FORMS: [&str; 3] = ["копейка", "копейки", "копеек"];

/// The largest supported amount is 15 integer digits (hundreds of trillions)
const MAX_INT_DIGITS: usize = 15;

fn spell_triple(n: u64, feminine: bool, words: &mut Vec<&'static str>) {
    let hundreds = n / 100;
    if hundreds > 0 {
        words.push(HUNDREDS[(hundreds - 1) as usize]);
    }
    let tail = n % 100;
    if (10..20).contains(&tail) {
        words.push(TEENS[(tail - 10) as usize]);
        return;
    }
    let tens = tail / 10;
    if tens >= 2 {
        words.push(TENS[(tens - 2) as usize]);
    }
    let units = tail % 10;
    if units > 0 {
        let table = if feminine { UNITS_FEMININE } else { UNITS };
        words.push(table[(units - 1) as usize]);
    }
}

/// Spells a non-negative integer in Russian words: `40000` -> `сорок тысяч`
pub fn spell_integer(n: u64) -> String {
    if n == 0 {
        return "ноль".to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut words: Vec<&'static str> = Vec::new();
    for idx in (0..groups.len()).rev() {
        let group = groups[idx];
        if group == 0 {
            continue;
        }
        if idx > 0 {
            let (forms, feminine) = SCALES[idx - 1];
            spell_triple(group, feminine, &mut words);
            words.push(pluralize(group, forms));
        } else {
            spell_triple(group, false, &mut words);
        }
    }

    words.join(" ")
}

/// Splits a decimal amount into whole rubles and rounded kopecks.
///
/// Accepts comma or dot as the fractional separator and ignores grouping
/// spaces. Kopecks are two digits, rounded half-up on the third, with the
/// carry propagated into rubles. `None` means the input is not an amount.
pub(crate) fn parse_amount(raw: &str) -> Option<(u64, u8)> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (int_part, frac_part) = match cleaned.find('.') {
        Some(i) => (&cleaned[..i], &cleaned[i + 1..]),
        None => (cleaned.as_str(), ""),
    };
    if int_part.is_empty()
        || int_part.len() > MAX_INT_DIGITS
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut rubles: u64 = int_part.parse().ok()?;
    let digits: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();
    let mut kopecks =
        u32::from(digits.first().copied().unwrap_or(0)) * 10 + u32::from(digits.get(1).copied().unwrap_or(0));
    if digits.get(2).copied().unwrap_or(0) >= 5 {
        kopecks += 1;
    }
    if kopecks == 100 {
        kopecks = 0;
        rubles += 1;
    }
    if rubles >= 10u64.pow(MAX_INT_DIGITS as u32) {
        return None;
    }

    Some((rubles, kopecks as u8))
}

fn capitalize(words: String) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => words,
    }
}

/// The full contract form of an amount:
/// `40000` -> `40 000 (Сорок тысяч) рублей 00 копеек`.
///
/// Input that does not parse as an amount is returned unchanged.
pub fn format_amount(raw: &str) -> String {
    match parse_amount(raw) {
        Some((rubles, kopecks)) => format!(
            "{} ({}) {} {:02} {}",
            format_spaced(rubles),
            capitalize(spell_integer(rubles)),
            pluralize(rubles, RUBLE_FORMS),
            kopecks,
            pluralize(u64::from(kopecks), KOPECK_FORMS)
        ),
        None => raw.to_string(),
    }
}

/// The short table form of an amount: `1500` -> `1 500 руб.`.
///
/// Input that does not parse as an amount is returned unchanged.
pub fn format_rub_short(raw: &str) -> String {
    match parse_amount(raw) {
        Some((rubles, 0)) => format!("{} руб.", format_spaced(rubles)),
        Some((rubles, kopecks)) => format!("{},{:02} руб.", format_spaced(rubles), kopecks),
        None => raw.to_string(),
    }
}
