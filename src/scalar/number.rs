//! Decimal text parsing, precision rounding, and number formatting.
//!
//! ```text
//! " 1 234,5 " ──strip ws──▶ "1234,5" ──separator──▶ "1234.5" ──▶ 1234.5
//!                                     (Comma locale, no dot present)
//! ```
//!
//! Rounding works on `value × 10^decimals`. The scaled value is first settled
//! to 15 significant digits so binary noise (`2.675 × 100 = 267.49999…`) does
//! not flip the rounding direction.

/// Decimal separator of the active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

/// Languages whose numeric convention writes `12,5` for twelve and a half.
const COMMA_LANGUAGES: &[&str] = &[
    "be", "bg", "cs", "da", "de", "el", "es", "et", "fi", "fr", "hr", "hu", "id", "it", "kk", "lt", "lv", "nb", "nl",
    "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sr", "sv", "tr", "uk", "vi",
];

impl DecimalSeparator {
    /// Map a POSIX/BCP-47 locale name (`ru_RU.UTF-8`, `de-DE`, `C`) to its separator.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale.split(['_', '-', '.', '@']).next().unwrap_or("").to_ascii_lowercase();
        if COMMA_LANGUAGES.contains(&language.as_str()) { DecimalSeparator::Comma } else { DecimalSeparator::Dot }
    }

    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Dot => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// How a value is brought to the requested precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round half to even.
    #[default]
    Auto,
    /// `ceil` at the requested precision.
    Upward,
    /// Truncate toward zero at the requested precision.
    Downward,
}

/// Parse loosely formatted decimal text.
///
/// All whitespace is removed first. With a `Comma` separator and no dot in
/// the text, the first comma becomes the decimal point. With a `Dot`
/// separator, thousands grouping (`1,234.5`, `100,000`) is stripped first;
/// otherwise a comma in dot-free text is read as the point too (`12,5`).
/// Anything that is not plain decimal notation (including `inf`/`nan`)
/// yields `None`.
pub fn parse_decimal(text: &str, separator: DecimalSeparator) -> Option<f64> {
    let mut text: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    match separator {
        DecimalSeparator::Comma => {
            if !text.contains('.') {
                if let Some(pos) = text.find(',') {
                    text.replace_range(pos..pos + 1, ".");
                }
            }
        }
        DecimalSeparator::Dot => {
            if regex!(r"^[+-]?\d{1,3}(,\d{3})+(\.\d*)?$").is_match(&text) {
                text.retain(|c| c != ',');
            } else if !text.contains('.') {
                if let Some(pos) = text.find(',') {
                    text.replace_range(pos..pos + 1, ".");
                }
            }
        }
    }

    if !regex!(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").is_match(&text) {
        return None;
    }

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round `value` to `decimals` digits after the point using `mode`.
pub fn round_to(value: f64, decimals: u32, mode: RoundingMode) -> f64 {
    let factor = 10f64.powi(decimals.min(308) as i32);
    let scaled = settle(value * factor);
    if !scaled.is_finite() {
        return value;
    }

    let rounded = match mode {
        RoundingMode::Auto => scaled.round_ties_even(),
        RoundingMode::Upward => scaled.ceil(),
        RoundingMode::Downward => scaled.trunc(),
    };

    let out = rounded / factor;
    // -0.0 prints as "-0"
    if out == 0.0 { 0.0 } else { out }
}

fn settle(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{x:.14e}").parse().unwrap_or(x)
}

/// Format with a fixed number of decimals, a decimal separator and an
/// optional thousands separator (`""` disables grouping).
pub fn format_number(value: f64, decimals: u32, decimal_sep: &str, thousands_sep: &str) -> String {
    let rounded = round_to(value, decimals, RoundingMode::Auto);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 * thousands_sep.len() + 1);
    if rounded < 0.0 {
        out.push('-');
    }

    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            out.push_str(thousands_sep);
        }
        out.push(ch);
    }

    if let Some(frac) = frac_part {
        out.push_str(decimal_sep);
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_locale_rewrites_first_comma() {
        assert_eq!(parse_decimal("12,5", DecimalSeparator::Comma), Some(12.5));
        assert_eq!(parse_decimal(" 1 000,25 ", DecimalSeparator::Comma), Some(1000.25));
        assert_eq!(parse_decimal("12.5", DecimalSeparator::Comma), Some(12.5));
        assert_eq!(parse_decimal("1,2,3", DecimalSeparator::Comma), None);
    }

    #[test]
    fn dot_locale_prefers_grouping_then_lone_comma() {
        assert_eq!(parse_decimal("1,234.5", DecimalSeparator::Dot), Some(1234.5));
        assert_eq!(parse_decimal("100,000", DecimalSeparator::Dot), Some(100000.0));
        assert_eq!(parse_decimal("12,5", DecimalSeparator::Dot), Some(12.5));
        assert_eq!(parse_decimal("1,2,3", DecimalSeparator::Dot), None);
    }

    #[test]
    fn rejects_non_decimal_text() {
        for text in ["", "abc", "inf", "NaN", "1e", "--1", "0x10", "1.2.3"] {
            assert_eq!(parse_decimal(text, DecimalSeparator::Dot), None, "{text}");
        }
        assert_eq!(parse_decimal(".5", DecimalSeparator::Dot), Some(0.5));
        assert_eq!(parse_decimal("-3.", DecimalSeparator::Dot), Some(-3.0));
        assert_eq!(parse_decimal("1e3", DecimalSeparator::Dot), Some(1000.0));
    }

    #[test]
    fn rounding_modes() {
        assert_eq!(round_to(2.675, 2, RoundingMode::Auto), 2.68);
        assert_eq!(round_to(0.125, 2, RoundingMode::Auto), 0.12);
        assert_eq!(round_to(2.5, 0, RoundingMode::Auto), 2.0);
        assert_eq!(round_to(3.5, 0, RoundingMode::Auto), 4.0);
        assert_eq!(round_to(1.231, 2, RoundingMode::Upward), 1.24);
        assert_eq!(round_to(1.239, 2, RoundingMode::Downward), 1.23);
        assert_eq!(round_to(-1.239, 2, RoundingMode::Downward), -1.23);
        assert_eq!(round_to(1.2, 2, RoundingMode::Upward), 1.2);
    }

    #[test]
    fn rounding_never_returns_negative_zero() {
        let v = round_to(-0.001, 2, RoundingMode::Downward);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2, ".", " "), "1 234 567.89");
        assert_eq!(format_number(12.5, 2, ",", ""), "12,50");
        assert_eq!(format_number(-1234.0, 0, ".", ","), "-1,234");
        assert_eq!(format_number(999.0, 0, ".", ","), "999");
    }

    #[test]
    fn locale_names_map_to_separators() {
        assert_eq!(DecimalSeparator::for_locale("ru_RU.UTF-8"), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::for_locale("de-DE"), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::for_locale("en_US.UTF-8"), DecimalSeparator::Dot);
        assert_eq!(DecimalSeparator::for_locale("C"), DecimalSeparator::Dot);
    }
}
