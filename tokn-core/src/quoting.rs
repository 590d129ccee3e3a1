//! Quoting policy
//!
//!     Decides whether a literal string value is emitted bare or as a quoted string. Hex colors,
//!     numbers with an optional length/time/percent unit and function-call shaped values
//!     (`var(...)`, `calc(...)`, `rgba(...)`) are live expressions and never quoted. Tokens typed
//!     `color` are never quoted either.
//!
//!     The two formats disagree on the rest:
//!
//!     - flattened: `fontFamilies` is always quoted, `fontWeights` only with whitespace,
//!       everything else stays bare.
//!     - alias-preserving: anything that is not a bare kebab-ish lowercase word is quoted.
//!
//!     The empty string is quoted by both.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_WITH_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d*\.?\d+(px|rem|em|ms|s|%)?$").unwrap());

static FUNCTION_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z-]+\(").unwrap());

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]").unwrap());

const COLOR_TYPE: &str = "color";
const FONT_FAMILIES_TYPE: &str = "fontFamilies";
const FONT_WEIGHTS_TYPE: &str = "fontWeights";

/// Values that are emitted bare in both formats, whatever their type.
fn is_live_expression(value: &str) -> bool {
    value.starts_with('#') || NUMBER_WITH_UNIT.is_match(value) || FUNCTION_CALL.is_match(value)
}

/// Quoting rule of the flattened (custom property) format.
pub fn should_quote_flat(value: &str, token_type: Option<&str>) -> bool {
    if value.is_empty() {
        return true;
    }
    if is_live_expression(value) {
        return false;
    }
    match token_type {
        Some(COLOR_TYPE) => false,
        Some(FONT_FAMILIES_TYPE) => true,
        Some(FONT_WEIGHTS_TYPE) => value.chars().any(char::is_whitespace),
        _ => false,
    }
}

/// Quoting rule of the alias-preserving (stylesheet variable) format.
pub fn should_quote_alias(value: &str, token_type: Option<&str>) -> bool {
    if value.is_empty() {
        return true;
    }
    if is_live_expression(value) {
        return false;
    }
    if token_type == Some(COLOR_TYPE) {
        return false;
    }
    value.contains(' ') || value.chars().any(|c| c.is_ascii_uppercase()) || NON_WORD.is_match(value)
}

/// Wrap in double quotes, backslash-escaping embedded double quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape_double_quotes(value))
}

pub fn escape_double_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#335CFF", None)]
    #[case("4", None)]
    #[case("-0.5rem", None)]
    #[case(".25s", None)]
    #[case("100%", None)]
    #[case("var(--primary-base)", None)]
    #[case("calc(4px * 2)", None)]
    #[case("rgba(0, 0, 0, 0.1)", None)]
    #[case("Inter Display", Some("color"))]
    fn test_live_values_are_bare_in_both_formats(#[case] value: &str, #[case] ty: Option<&str>) {
        assert!(!should_quote_flat(value, ty));
        assert!(!should_quote_alias(value, ty));
    }

    #[rstest]
    #[case("Inter", Some("fontFamilies"), true, true)]
    #[case("inter", Some("fontFamilies"), true, false)]
    #[case("Semi Bold", Some("fontWeights"), true, true)]
    #[case("Bold", Some("fontWeights"), false, true)]
    #[case("bold", Some("fontWeights"), false, false)]
    #[case("ease-in-out", None, false, false)]
    #[case("cubic-bezier", None, false, false)]
    #[case("1px solid", None, false, true)]
    #[case("Uppercase", Some("textCase"), false, true)]
    #[case("a.b", None, false, true)]
    #[case("", None, true, true)]
    fn test_format_specific_rules(
        #[case] value: &str,
        #[case] ty: Option<&str>,
        #[case] flat: bool,
        #[case] alias: bool,
    ) {
        assert_eq!(should_quote_flat(value, ty), flat, "flat rule for {:?}", value);
        assert_eq!(should_quote_alias(value, ty), alias, "alias rule for {:?}", value);
    }

    #[test]
    fn test_quote_escapes_double_quotes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote("Inter"), "\"Inter\"");
    }
}
