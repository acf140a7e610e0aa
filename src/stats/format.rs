//! Display formatting for KPI values.

/// `1234.5` -> `"$1,234.50"`.
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

/// One decimal place, e.g. `"66.7%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Short label for chart bars: `"1.2M"`, `"35k"`, `"980"`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}G", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_separators_and_cents() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(17509.0), "$17,509.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-2500.5), "-$2,500.50");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(66.666), "66.7%");
        assert_eq!(format_percent(100.0), "100.0%");
    }

    #[test]
    fn compact_labels() {
        assert_eq!(format_compact(980.0), "980");
        assert_eq!(format_compact(35_400.0), "35k");
        assert_eq!(format_compact(1_240_000.0), "1.2M");
    }
}
