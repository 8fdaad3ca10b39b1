/// Formats an integer with space-separated thousand groups: `40000` -> `40 000`
pub fn format_spaced(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Index of the Russian plural form for a count: 0 singular (1), 1 paucal
/// (2-4), 2 plural (0, 5-20), with 11-14 always plural
pub fn plural_index(n: u64) -> usize {
    let tail = n % 100;
    if (11..=14).contains(&tail) {
        return 2;
    }
    match tail % 10 {
        1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// Picks the grammatically correct form for a count
pub fn pluralize(n: u64, forms: [&'static str; 3]) -> &'static str {
    forms[plural_index(n)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_thousand_groups() {
        assert_eq!(format_spaced(0), "0");
        assert_eq!(format_spaced(5), "5");
        assert_eq!(format_spaced(100), "100");
        assert_eq!(format_spaced(1000), "1 000");
        assert_eq!(format_spaced(40000), "40 000");
        assert_eq!(format_spaced(1234567), "1 234 567");
        assert_eq!(format_spaced(1000000000), "1 000 000 000");
    }

    #[test]
    fn plural_forms() {
        const DAYS: [&str; 3] = ["день", "дня", "дней"];
        assert_eq!(pluralize(1, DAYS), "день");
        assert_eq!(pluralize(2, DAYS), "дня");
        assert_eq!(pluralize(4, DAYS), "дня");
        assert_eq!(pluralize(5, DAYS), "дней");
        assert_eq!(pluralize(0, DAYS), "дней");
        assert_eq!(pluralize(11, DAYS), "дней");
        assert_eq!(pluralize(12, DAYS), "дней");
        assert_eq!(pluralize(14, DAYS), "дней");
        assert_eq!(pluralize(19, DAYS), "дней");
        assert_eq!(pluralize(21, DAYS), "день");
        assert_eq!(pluralize(22, DAYS), "дня");
        assert_eq!(pluralize(111, DAYS), "дней");
        assert_eq!(pluralize(101, DAYS), "день");
    }
}
