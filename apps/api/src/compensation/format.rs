// Currency and percentage formatting for narrative text.

/// Whole-unit amount with thousands separators: `1234567.8` -> `1,234,568`.
pub fn format_whole(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits.chars().any(|c| c != '0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Dollar amount: `90000.0` -> `$90,000`, `-2500.0` -> `-$2,500`.
pub fn format_currency(value: f64) -> String {
    let whole = format_whole(value);
    match whole.strip_prefix('-') {
        Some(positive) => format!("-${positive}"),
        None => format!("${whole}"),
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_whole(0.0), "0");
        assert_eq!(format_whole(999.0), "999");
        assert_eq!(format_whole(1_000.0), "1,000");
        assert_eq!(format_whole(90_000.0), "90,000");
        assert_eq!(format_whole(1_234_567.8), "1,234,568");
    }

    #[test]
    fn test_currency_sign_placement() {
        assert_eq!(format_currency(140_000.0), "$140,000");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(20.04, 1), 20.0);
        assert_eq!(round_to(-33.333, 1), -33.3);
        assert_eq!(round_to(130_499.6, 0), 130_500.0);
    }
}
