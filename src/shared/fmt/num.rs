//! Number formatting for price display.
//!
//! Prices are rendered the way the Indian locale (`en-IN`) renders them: the last
//! three integer digits form one group and the rest is grouped in pairs
//! (`12,34,567.89`), with at most three fraction digits.

/// Currency symbol prefixed to every formatted price.
pub const RUPEE: &str = "₹";

/// Rendered in place of a price that is missing or unparseable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Maximum fraction digits kept when rendering (the `en-IN` default).
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a raw price field for display.
///
/// `None`, blank, unparseable or non-finite input yields `"N/A"`. Zero is a real
/// price and renders as `"₹0"`.
pub fn format_price(raw: Option<&str>) -> String {
    match parse_price(raw) {
        Some(value) => format!("{}{}", RUPEE, display_en_in(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Parse a raw price field into a finite number.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format an f64 with `en-IN` digit grouping, rounded to three fraction digits.
pub fn display_en_in(amount: f64) -> String {
    display_grouped(format!("{:.1$}", amount, MAX_FRACTION_DIGITS))
}

/// Trims trailing zeros, adds `en-IN` group separators.
pub fn display_grouped(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };

    let (integer_part, fraction_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let grouped = group_indian(integer_part);

    match fraction_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);

    // A leading odd digit stands alone, everything after it pairs up.
    let lead = head.len() % 2;
    out.push_str(&head[..lead]);
    for pair in head.as_bytes()[lead..].chunks(2) {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }

    out.push(',');
    out.push_str(tail);
    out
}
