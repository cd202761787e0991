fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn with_sign(negative: bool, body: String) -> String {
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Whole number with thousands separators. Fractions are truncated.
pub fn thousands(value: f64) -> String {
    let whole = value.trunc();
    let digits = format!("{:.0}", whole.abs());
    with_sign(whole < 0.0, group_digits(&digits))
}

/// Thousands separators with one decimal place.
pub fn thousands_1dp(value: f64) -> String {
    let text = format!("{:.1}", value.abs());
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "0"));
    let negative = value < 0.0 && text != "0.0";
    with_sign(negative, format!("{}.{}", group_digits(int_part), frac))
}

pub fn percent_1dp(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(1234567.9), "1,234,567");
        assert_eq!(thousands(-4500.0), "-4,500");
    }

    #[test]
    fn one_decimal() {
        assert_eq!(thousands_1dp(0.0), "0.0");
        assert_eq!(thousands_1dp(1234.56), "1,234.6");
        assert_eq!(thousands_1dp(999.96), "1,000.0");
        assert_eq!(thousands_1dp(-0.01), "0.0");
    }

    #[test]
    fn percentages() {
        assert_eq!(percent_1dp(100.0), "100.0%");
        assert_eq!(percent_1dp(33.3333), "33.3%");
    }
}
