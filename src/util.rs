// Numeric helpers shared by the aggregation stages and the report tables.
//
// Everything that turns loosely typed cell text into numbers lives here, as
// does the thousands-separator formatting used by the console previews.
use num_format::{Locale, ToFormattedString};

/// Parse cell text into a finite `f64`, forgiving the formatting noise that
/// spreadsheet exports tend to carry.
///
/// - Trims whitespace; empty text is not a number.
/// - Strips thousands separators like `","` before parsing.
/// - Rejects letters other than an exponent marker, so `inf`/`NaN` spellings
///   never sneak through `str::parse`.
/// - Returns `None` for anything non-finite.
pub fn parse_f64_safe(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn average(v: &[f64]) -> f64 {
    // Arithmetic mean with a divisor floor of 1, so an empty slice gives 0.
    let sum: f64 = v.iter().copied().sum();
    sum / v.len().max(1) as f64
}

/// `sum / count`, or 0 when nothing was counted.
pub fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn max_or_zero(v: &[f64]) -> f64 {
    v.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub fn min_or_zero(v: &[f64]) -> f64 {
    v.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    // "-0.0" after rounding reads as noise in a table.
    if neg && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_pct(n: f64, decimals: usize) -> String {
    format!("{}%", format_number(n, decimals))
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_separated_numbers() {
        assert_eq!(parse_f64_safe("42"), Some(42.0));
        assert_eq!(parse_f64_safe(" 1,250.5 "), Some(1250.5));
        assert_eq!(parse_f64_safe("-3.5"), Some(-3.5));
        assert_eq!(parse_f64_safe("1e3"), Some(1000.0));
    }

    #[test]
    fn rejects_text_and_non_finite() {
        assert_eq!(parse_f64_safe(""), None);
        assert_eq!(parse_f64_safe("   "), None);
        assert_eq!(parse_f64_safe("abc"), None);
        assert_eq!(parse_f64_safe("inf"), None);
        assert_eq!(parse_f64_safe("NaN"), None);
        assert_eq!(parse_f64_safe("1e400"), None);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn extrema_of_empty_are_zero() {
        assert_eq!(max_or_zero(&[]), 0.0);
        assert_eq!(min_or_zero(&[]), 0.0);
        assert_eq!(max_or_zero(&[-5.0, -1.0]), -1.0);
        assert_eq!(min_or_zero(&[3.0, 7.0]), 3.0);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 1), "-1,500.0");
        assert_eq!(format_number(-0.01, 1), "0.0");
        assert_eq!(format_pct(12.345, 1), "12.3%");
        assert_eq!(format_int(9855usize), "9,855");
    }
}
