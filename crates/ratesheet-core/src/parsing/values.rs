use crate::parsing::compile_pattern;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Separator, optional dollar sign and a numeric literal following a label.
const VALUE_SUFFIX: &str = r"[:\s]*\$?([\d.,]*\.?\d+)";

/// Build the pattern for a field from its label regex.
pub fn field_pattern(label: &str) -> Result<Regex, regex::Error> {
    compile_pattern(&format!("(?:{}){}", label, VALUE_SUFFIX))
}

/// Extract the numeric value following a field label.
///
/// Returns None when the label is absent or the matched literal is not a
/// number (e.g. "1.2.3").
pub fn extract_numeric(section: &str, field: &Regex) -> Option<Decimal> {
    let literal = field.captures(section)?.get(1)?.as_str();
    parse_decimal(literal)
}

/// Parse a rate literal, tolerating thousands separators ("1,234.50") and
/// bare decimals (".08058").
///
/// Literals too large to be expressed in cents are rejected, so every parsed
/// dollar value has a cent value.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = if cleaned.starts_with('.') {
        format!("0{}", cleaned)
    } else {
        cleaned
    };
    let value = Decimal::from_str(&cleaned).ok()?;
    value.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(value)
}
